//! # Reports
//!
//! Read-only views over a [`Store`]. Nothing here mutates or persists.
//!
//! ```text
//! dashboard_summary(n) ──► lifetime sales, stock value, low-stock count,
//!                          n newest invoices (newest first)
//! ledger()             ──► invoices then purchases, each in insertion order
//! sales_report()       ──► (reference, date, total) per invoice
//! stock_report()       ──► (name, stock, price) per product
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::store::Store;
use crate::types::{Invoice, Settings};

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    /// Sum of every invoice total ever recorded.
    pub total_sales: Money,
    /// Σ stock × cost over the catalog.
    pub stock_value: Money,
    /// Products at or below their low-stock threshold.
    pub low_stock_count: usize,
    /// Newest invoices first.
    pub recent_invoices: Vec<Invoice>,
}

// =============================================================================
// Ledger
// =============================================================================

/// What a ledger row summarizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum LedgerKind {
    Sale { total: Money },
    Purchase { item_count: usize },
}

/// A display row of the combined sales/purchases ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerEntry {
    /// `INV-n` or `PUR-n`
    pub reference: String,
    /// Customer or supplier label, with fallbacks applied.
    pub counterparty: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub kind: LedgerKind,
}

impl LedgerEntry {
    /// `INV-1 • Walk-in • ₹84.00` or `PUR-1 • Supplier • 2 items`.
    pub fn render(&self, settings: &Settings) -> String {
        let detail = match &self.kind {
            LedgerKind::Sale { total } => settings.format_money(*total),
            LedgerKind::Purchase { item_count } => format!("{} items", item_count),
        };
        format!("{} • {} • {}", self.reference, self.counterparty, detail)
    }
}

// =============================================================================
// Text Reports
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReportRow {
    pub reference: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockReportRow {
    pub name: String,
    pub stock: i64,
    pub price: Money,
}

/// One line per invoice: `INV-1 • 2026-10-19 • ₹84.00`.
pub fn render_sales_report(rows: &[SalesReportRow], settings: &Settings) -> String {
    rows.iter()
        .map(|r| {
            format!(
                "{} • {} • {}",
                r.reference,
                r.date.format("%Y-%m-%d"),
                settings.format_money(r.total)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per product: `Paracetamol 500mg • stock: 47 • ₹25.00`.
pub fn render_stock_report(rows: &[StockReportRow], settings: &Settings) -> String {
    rows.iter()
        .map(|r| format!("{} • stock: {} • {}", r.name, r.stock, settings.format_money(r.price)))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Queries
// =============================================================================

impl Store {
    pub fn dashboard_summary(&self, recent_limit: usize) -> DashboardSummary {
        DashboardSummary {
            total_sales: self.invoices().iter().map(|i| i.total).sum(),
            stock_value: self.products().iter().map(|p| p.stock_value()).sum(),
            low_stock_count: self.products().iter().filter(|p| p.is_low_stock()).count(),
            recent_invoices: self
                .invoices()
                .iter()
                .rev()
                .take(recent_limit)
                .cloned()
                .collect(),
        }
    }

    /// Invoices first, then purchases. Not interleaved by time.
    pub fn ledger(&self) -> Vec<LedgerEntry> {
        let sales = self.invoices().iter().map(|inv| LedgerEntry {
            reference: inv.reference(),
            counterparty: inv.customer_label().to_string(),
            created_at: inv.created_at,
            kind: LedgerKind::Sale { total: inv.total },
        });

        let purchases = self.purchases().iter().map(|pur| LedgerEntry {
            reference: pur.reference(),
            counterparty: pur.supplier_label().to_string(),
            created_at: pur.created_at,
            kind: LedgerKind::Purchase {
                item_count: pur.items.len(),
            },
        });

        sales.chain(purchases).collect()
    }

    pub fn sales_report(&self) -> Vec<SalesReportRow> {
        self.invoices()
            .iter()
            .map(|inv| SalesReportRow {
                reference: inv.reference(),
                date: inv.created_at.date_naive(),
                total: inv.total,
            })
            .collect()
    }

    pub fn stock_report(&self) -> Vec<StockReportRow> {
        self.products()
            .iter()
            .map(|p| StockReportRow {
                name: p.name.clone(),
                stock: p.stock,
                price: p.price,
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LedgerPolicy;
    use crate::store::{LineRequest, ProductInput};

    fn busy_store() -> Store {
        let mut store = Store::seeded();
        let para = store.products()[0].id.clone();
        let policy = LedgerPolicy::default();

        for _ in 0..10 {
            store
                .record_sale(None, &[LineRequest::new(&para, 1)], &policy)
                .unwrap();
        }
        store
            .record_purchase(
                Some("MedSupply".into()),
                &[LineRequest::new(&para, 5), LineRequest::new(&para, 5)],
                &policy,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_dashboard_summary() {
        let store = busy_store();
        let summary = store.dashboard_summary(8);

        // 10 sales of 25.00 + 12% tax
        assert_eq!(summary.total_sales.cents(), 10 * 2800);
        // 50 - 10 + 10 = 50 units at 12.00
        assert_eq!(summary.stock_value.cents(), 60_000);
        assert_eq!(summary.low_stock_count, 0);
        assert_eq!(summary.recent_invoices.len(), 8);
        assert_eq!(summary.recent_invoices[0].number, 10);
        assert_eq!(summary.recent_invoices[7].number, 3);
    }

    #[test]
    fn test_stock_value_saturates_on_huge_stock() {
        let mut store = Store::seeded();
        store.upsert_product(ProductInput {
            cost: Some("0.02".into()),
            stock: Some("9e18".into()),
            ..ProductInput::default()
        });

        let summary = store.dashboard_summary(8);

        assert_eq!(summary.stock_value.cents(), i64::MAX);
        assert_eq!(summary.low_stock_count, 0);
    }

    #[test]
    fn test_low_stock_count_is_inclusive() {
        let mut store = Store::empty();
        store.upsert_product(ProductInput {
            stock: Some("5".into()),
            ..ProductInput::default()
        });
        store.upsert_product(ProductInput {
            stock: Some("6".into()),
            ..ProductInput::default()
        });

        assert_eq!(store.dashboard_summary(8).low_stock_count, 1);
    }

    #[test]
    fn test_ledger_orders_invoices_before_purchases() {
        let store = busy_store();
        let ledger = store.ledger();

        assert_eq!(ledger.len(), 11);
        assert_eq!(ledger[0].reference, "INV-1");
        assert_eq!(ledger[10].reference, "PUR-1");

        let settings = store.settings();
        assert_eq!(ledger[0].render(settings), "INV-1 • Walk-in • ₹28.00");
        assert_eq!(ledger[10].render(settings), "PUR-1 • MedSupply • 2 items");
    }

    #[test]
    fn test_sales_and_stock_reports() {
        let store = busy_store();

        let sales = store.sales_report();
        assert_eq!(sales.len(), 10);
        assert_eq!(sales[0].total.cents(), 2800);

        let today = store.invoices()[0].created_at.date_naive();
        let text = render_sales_report(&sales[..1], store.settings());
        assert_eq!(text, format!("INV-1 • {} • ₹28.00", today.format("%Y-%m-%d")));

        let stock = store.stock_report();
        assert_eq!(
            render_stock_report(&stock, store.settings()),
            "Paracetamol 500mg • stock: 50 • ₹25.00"
        );
    }

    #[test]
    fn test_empty_store_reports() {
        let store = Store::empty();
        let summary = store.dashboard_summary(8);

        assert!(summary.total_sales.is_zero());
        assert!(summary.recent_invoices.is_empty());
        assert!(store.ledger().is_empty());
        assert_eq!(render_sales_report(&store.sales_report(), store.settings()), "");
    }
}
