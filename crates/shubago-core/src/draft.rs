//! # Line Draft
//!
//! The caller-side scratch list of lines a sale or purchase is built from.
//! Nothing here touches the [`Store`](crate::store::Store): a draft is
//! committed by handing [`LineDraft::requests`] to `record_sale` or
//! `record_purchase`, and discarded with [`LineDraft::clear`].
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Operations                                     │
//! │                                                                         │
//! │  Caller Action            Method                  Draft Change          │
//! │  ─────────────            ──────                  ────────────          │
//! │                                                                         │
//! │  Pick product ──────────► add(&product) ────────► push or qty += 1     │
//! │  Press "+" ─────────────► increment(id) ────────► qty += 1             │
//! │  Press "-" ─────────────► decrement(id) ────────► qty -= 1 (min 1)     │
//! │  Press "x" ─────────────► remove(id) ───────────► lines.remove(i)      │
//! │  Commit ────────────────► requests() ───────────► record_sale(..)      │
//! │  Cancel / committed ────► clear() ──────────────► lines.clear()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are unique by product id; picking the same product again bumps the
//! quantity. Unit amounts shown in the draft are frozen when the line is
//! added, but the committed record re-reads the catalog at commit time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::store::LineRequest;
use crate::types::{Product, SaleTotals, TaxRate};

/// Whether a draft prices its lines at sale price or at cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DraftKind {
    Sale,
    Purchase,
}

/// One line of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DraftLine {
    pub product_id: String,

    /// Product name when the line was added (frozen)
    pub name: String,

    /// Price (sale) or cost (purchase) when the line was added (frozen)
    pub unit: Money,

    /// Always at least 1
    pub qty: i64,
}

impl DraftLine {
    fn from_product(product: &Product, kind: DraftKind) -> Self {
        let unit = match kind {
            DraftKind::Sale => product.price,
            DraftKind::Purchase => product.cost,
        };

        DraftLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit,
            qty: 1,
        }
    }

    /// Line amount (unit × qty).
    pub fn line_total(&self) -> Money {
        self.unit.multiply_quantity(self.qty)
    }
}

/// An ordered, uncommitted list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineDraft {
    kind: DraftKind,
    lines: Vec<DraftLine>,
}

impl LineDraft {
    /// Empty draft for a sale (lines priced at sale price).
    pub fn for_sale() -> Self {
        LineDraft {
            kind: DraftKind::Sale,
            lines: Vec::new(),
        }
    }

    /// Empty draft for a purchase (lines priced at cost).
    pub fn for_purchase() -> Self {
        LineDraft {
            kind: DraftKind::Purchase,
            lines: Vec::new(),
        }
    }

    pub fn kind(&self) -> DraftKind {
        self.kind
    }

    /// Adds a product with qty 1, or bumps the existing line for it.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.qty = line.qty.saturating_add(1);
            return;
        }

        self.lines.push(DraftLine::from_product(product, self.kind));
    }

    /// Bumps a line's quantity by one. Returns false if no line matches.
    pub fn increment(&mut self, product_id: &str) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                line.qty = line.qty.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Lowers a line's quantity by one, never below 1.
    pub fn decrement(&mut self, product_id: &str) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                line.qty = (line.qty - 1).max(1);
                true
            }
            None => false,
        }
    }

    /// Drops a line. Returns false if no line matches.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != initial_len
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().fold(0i64, |acc, l| acc.saturating_add(l.qty))
    }

    /// Sum of the frozen line amounts.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(DraftLine::line_total).sum()
    }

    /// Preview of what a sale from this draft would total at `rate`.
    pub fn sale_totals(&self, rate: TaxRate) -> SaleTotals {
        SaleTotals::from_subtotal(self.subtotal(), rate)
    }

    /// Preview of a purchase's cost (no tax on purchases).
    pub fn purchase_cost(&self) -> Money {
        self.subtotal()
    }

    /// The lines as commit requests, in draft order.
    pub fn requests(&self) -> Vec<LineRequest> {
        self.lines
            .iter()
            .map(|l| LineRequest::new(&l.product_id, l.qty))
            .collect()
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut DraftLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LedgerPolicy;
    use crate::store::{ProductInput, Store};
    use crate::types::generate_id;

    fn product(name: &str, price: i64, cost: i64) -> Product {
        Product {
            id: generate_id(),
            sku: "SKU-TEST".to_string(),
            name: name.to_string(),
            price: Money::from_cents(price),
            cost: Money::from_cents(cost),
            stock: 10,
            low: 5,
        }
    }

    #[test]
    fn test_add_same_product_bumps_quantity() {
        let para = product("Paracetamol", 2500, 1200);
        let mut draft = LineDraft::for_sale();

        draft.add(&para);
        draft.add(&para);
        draft.add(&para);

        assert_eq!(draft.lines().len(), 1);
        assert_eq!(draft.lines()[0].qty, 3);
        assert_eq!(draft.subtotal().cents(), 7500);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let para = product("Paracetamol", 2500, 1200);
        let mut draft = LineDraft::for_sale();
        draft.add(&para);

        assert!(draft.decrement(&para.id));
        assert!(draft.decrement(&para.id));
        assert_eq!(draft.lines()[0].qty, 1);

        assert!(draft.increment(&para.id));
        assert_eq!(draft.lines()[0].qty, 2);
    }

    #[test]
    fn test_unknown_line_operations_report_false() {
        let mut draft = LineDraft::for_purchase();
        assert!(!draft.increment("missing"));
        assert!(!draft.decrement("missing"));
        assert!(!draft.remove("missing"));
    }

    #[test]
    fn test_remove_and_clear() {
        let a = product("A", 100, 50);
        let b = product("B", 200, 80);
        let mut draft = LineDraft::for_sale();
        draft.add(&a);
        draft.add(&b);

        assert!(draft.remove(&a.id));
        assert_eq!(draft.lines().len(), 1);
        assert_eq!(draft.lines()[0].product_id, b.id);

        draft.clear();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_sale_totals_preview() {
        let para = product("Paracetamol", 2500, 1200);
        let mut draft = LineDraft::for_sale();
        draft.add(&para);
        draft.increment(&para.id);
        draft.increment(&para.id);

        let totals = draft.sale_totals(TaxRate::from_bps(1200));
        assert_eq!(totals.subtotal.cents(), 7500);
        assert_eq!(totals.tax.cents(), 900);
        assert_eq!(totals.total.cents(), 8400);
    }

    #[test]
    fn test_purchase_draft_uses_cost() {
        let para = product("Paracetamol", 2500, 1200);
        let mut draft = LineDraft::for_purchase();
        draft.add(&para);
        draft.add(&para);

        assert_eq!(draft.purchase_cost().cents(), 2400);
        let requests = draft.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].qty, 2);
    }

    #[test]
    fn test_sale_draft_commits_through_store() {
        let mut store = Store::seeded();
        let amox = store.upsert_product(ProductInput {
            name: Some("Amoxicillin 250mg".into()),
            price: Some("40".into()),
            stock: Some("30".into()),
            ..ProductInput::default()
        });
        let para = store.products()[0].clone();

        let mut draft = LineDraft::for_sale();
        draft.add(&para);
        draft.add(&amox);
        draft.add(&para);
        draft.increment(&amox.id);
        draft.decrement(&amox.id);
        let preview = draft.sale_totals(TaxRate::from_bps(1200));

        let invoice = store
            .record_sale(Some("Asha".into()), &draft.requests(), &LedgerPolicy::default())
            .unwrap();
        draft.clear();

        // 2 x 25.00 + 1 x 40.00 = 90.00, plus 12%
        assert_eq!(invoice.subtotal, preview.subtotal);
        assert_eq!(invoice.tax, preview.tax);
        assert_eq!(invoice.total.cents(), 10_080);
        assert_eq!(invoice.items[0].product_id, para.id);
        assert_eq!(invoice.items[1].qty, 1);
        assert_eq!(store.product(&para.id).unwrap().stock, 48);
        assert_eq!(store.product(&amox.id).unwrap().stock, 29);
        assert!(draft.is_empty());
    }

    #[test]
    fn test_purchase_draft_commits_through_store() {
        let mut store = Store::seeded();
        let para = store.products()[0].clone();

        let mut draft = LineDraft::for_purchase();
        draft.add(&para);
        draft.increment(&para.id);
        draft.increment(&para.id);

        let purchase = store
            .record_purchase(Some("MedSupply".into()), &draft.requests(), &LedgerPolicy::default())
            .unwrap();

        assert_eq!(purchase.items.len(), 1);
        assert_eq!(purchase.items[0].qty, 3);
        assert_eq!(purchase.items[0].cost.cents(), 1200);
        assert_eq!(draft.purchase_cost().cents(), 3600);
        assert_eq!(store.product(&para.id).unwrap().stock, 53);
    }
}
