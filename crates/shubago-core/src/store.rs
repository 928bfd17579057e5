//! # Store
//!
//! The in-memory aggregate of everything the pharmacy persists: the product
//! catalog, invoice history, purchase history and settings.
//!
//! ## Mutation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Operations                                   │
//! │                                                                         │
//! │  upsert_product ────► replace by id, or append with a fresh UUID       │
//! │  delete_product ────► remove by id (history keeps its snapshots)       │
//! │  record_sale ───────► validate ► resolve ► Invoice ► stock -= qty      │
//! │  record_purchase ───► validate ► resolve ► Purchase ► stock += qty     │
//! │  update_settings ───► blank fields fall back to defaults               │
//! │                                                                         │
//! │  Every failing operation returns before the first write, so an Err     │
//! │  always leaves the Store exactly as it was.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//! Invoices and purchases carry a UUID `id` plus a display `number`
//! allocated as one more than the highest number already in the
//! collection. The human reference (`INV-7`, `PUR-3`) is derived from the
//! number, so it never depends on collection length.
//!
//! The Store is a plain value: it owns no I/O and is handed to whoever
//! persists it. Tests build as many independent stores as they like.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::policy::{clamp_stock, coerce_count, coerce_money, validate_quantity, LedgerPolicy, LineResolution};
use crate::types::{
    generate_id, Invoice, InvoiceLineItem, Product, Purchase, PurchaseLineItem, SaleTotals, Settings,
};
use crate::{DEFAULT_BUSINESS_NAME, DEFAULT_CURRENCY, DEFAULT_LOW_STOCK_THRESHOLD};

// =============================================================================
// Inputs
// =============================================================================

/// Raw product form input. Every field is optional and numeric fields are
/// text, coerced by the [`policy`](crate::policy) functions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    /// Existing product to replace. Absent or unknown creates a new product.
    pub id: Option<String>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub cost: Option<String>,
    pub stock: Option<String>,
    pub low: Option<String>,
}

/// One requested line of a sale or purchase: which product, how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineRequest {
    pub product_id: String,
    pub qty: i64,
}

impl LineRequest {
    pub fn new(product_id: &str, qty: i64) -> Self {
        LineRequest {
            product_id: product_id.to_string(),
            qty,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// The whole persisted document.
///
/// Serializes to exactly `{products, invoices, purchases, settings}`; there
/// is no other state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Store {
    products: Vec<Product>,
    invoices: Vec<Invoice>,
    purchases: Vec<Purchase>,
    settings: Settings,
}

impl Store {
    /// A store with no records and default settings.
    pub fn empty() -> Self {
        Store {
            products: Vec::new(),
            invoices: Vec::new(),
            purchases: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// The first-run store: default settings plus one sample product.
    pub fn seeded() -> Self {
        let mut store = Store::empty();
        store.products.push(Product {
            id: generate_id(),
            sku: "PARA500".to_string(),
            name: "Paracetamol 500mg".to_string(),
            price: Money::from_cents(2500),
            cost: Money::from_cents(1200),
            stock: 50,
            low: 10,
        });
        store
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn invoice(&self, id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.id == id)
    }

    /// Case-insensitive substring search over name + sku, in catalog order.
    /// An empty query matches everything. The query is matched as typed,
    /// surrounding whitespace included.
    pub fn find_products(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| needle.is_empty() || p.search_text().contains(&needle))
            .collect()
    }

    /// Case-insensitive substring search over reference + customer label.
    pub fn find_invoices(&self, query: &str) -> Vec<&Invoice> {
        let needle = query.to_lowercase();
        self.invoices
            .iter()
            .filter(|inv| {
                needle.is_empty()
                    || format!("{}{}", inv.reference(), inv.customer_label())
                        .to_lowercase()
                        .contains(&needle)
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Creates or fully replaces a product. Never fails: blank text gets a
    /// default and bad numbers coerce to zero.
    ///
    /// ## Defaults
    /// - sku: generated `SKU-XXXX` placeholder
    /// - name: `Unnamed`
    /// - price, cost, stock: 0
    /// - low: 5 (only when absent or blank; an explicit `0` is kept)
    pub fn upsert_product(&mut self, input: ProductInput) -> Product {
        let existing = input
            .id
            .as_deref()
            .and_then(|id| self.products.iter().position(|p| p.id == id));

        let id = match existing {
            Some(idx) => self.products[idx].id.clone(),
            None => generate_id(),
        };

        let low = match non_blank(input.low.as_deref()) {
            Some(raw) => coerce_count(raw),
            None => DEFAULT_LOW_STOCK_THRESHOLD,
        };

        let product = Product {
            id,
            sku: non_blank(input.sku.as_deref())
                .map(str::to_string)
                .unwrap_or_else(placeholder_sku),
            name: non_blank(input.name.as_deref()).unwrap_or("Unnamed").to_string(),
            price: coerce_money(input.price.as_deref().unwrap_or_default()),
            cost: coerce_money(input.cost.as_deref().unwrap_or_default()),
            stock: coerce_count(input.stock.as_deref().unwrap_or_default()),
            low,
        };

        match existing {
            Some(idx) => {
                debug!(product_id = %product.id, sku = %product.sku, "Replacing product");
                self.products[idx] = product.clone();
            }
            None => {
                if let Some(requested) = input.id.as_deref() {
                    debug!(requested_id = %requested, "Unknown product id, creating new product");
                }
                info!(product_id = %product.id, sku = %product.sku, "Product created");
                self.products.push(product.clone());
            }
        }

        product
    }

    /// Removes a product. Historical line items keep their snapshots.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<Product> {
        let idx = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        let removed = self.products.remove(idx);
        info!(product_id = %removed.id, sku = %removed.sku, "Product deleted");
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Sales & Purchases
    // -------------------------------------------------------------------------

    /// Commits a sale.
    ///
    /// ## Flow
    /// ```text
    /// lines empty? ──► EmptySale
    /// any qty < 1? ──► ValidationError
    /// resolve ids ──► Strict: unknown id ► ProductNotFound
    ///                 BestEffort: unknown id ► line skipped
    /// nothing left? ─► EmptySale
    /// append Invoice, then stock = clamp_stock(stock, -qty) per line
    /// ```
    pub fn record_sale(
        &mut self,
        customer: Option<String>,
        lines: &[LineRequest],
        policy: &LedgerPolicy,
    ) -> CoreResult<Invoice> {
        if lines.is_empty() {
            return Err(CoreError::EmptySale);
        }

        let resolved = self.resolve_lines(lines, policy.line_resolution)?;
        if resolved.is_empty() {
            warn!(requested = lines.len(), "No sale line matched a product");
            return Err(CoreError::EmptySale);
        }

        let items: Vec<InvoiceLineItem> = resolved
            .iter()
            .map(|&(idx, qty)| {
                let product = &self.products[idx];
                InvoiceLineItem {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    price: product.price,
                    qty,
                }
            })
            .collect();

        let subtotal: Money = items.iter().map(InvoiceLineItem::line_total).sum();
        let totals = SaleTotals::from_subtotal(subtotal, policy.tax_rate);

        let invoice = Invoice {
            id: generate_id(),
            number: next_number(self.invoices.iter().map(|i| i.number)),
            customer: normalize_label(customer),
            items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            created_at: Utc::now(),
        };

        for &(idx, qty) in &resolved {
            let product = &mut self.products[idx];
            let before = product.stock;
            product.stock = clamp_stock(before, -qty);
            if before < qty {
                debug!(
                    product_id = %product.id,
                    stock = before,
                    qty,
                    "Sale exceeds stock, clamped to zero"
                );
            }
        }

        info!(
            invoice = %invoice.reference(),
            lines = invoice.items.len(),
            total_cents = invoice.total.cents(),
            "Sale recorded"
        );

        self.invoices.push(invoice.clone());
        Ok(invoice)
    }

    /// Commits a restock. Mirrors [`Store::record_sale`] without money
    /// totals; stock is incremented with no upper bound.
    pub fn record_purchase(
        &mut self,
        supplier: Option<String>,
        lines: &[LineRequest],
        policy: &LedgerPolicy,
    ) -> CoreResult<Purchase> {
        if lines.is_empty() {
            return Err(CoreError::EmptyPurchase);
        }

        let resolved = self.resolve_lines(lines, policy.line_resolution)?;
        if resolved.is_empty() {
            warn!(requested = lines.len(), "No purchase line matched a product");
            return Err(CoreError::EmptyPurchase);
        }

        let items: Vec<PurchaseLineItem> = resolved
            .iter()
            .map(|&(idx, qty)| {
                let product = &self.products[idx];
                PurchaseLineItem {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    cost: product.cost,
                    qty,
                }
            })
            .collect();

        let purchase = Purchase {
            id: generate_id(),
            number: next_number(self.purchases.iter().map(|p| p.number)),
            supplier: normalize_label(supplier),
            items,
            created_at: Utc::now(),
        };

        for &(idx, qty) in &resolved {
            let product = &mut self.products[idx];
            product.stock = clamp_stock(product.stock, qty);
        }

        info!(
            purchase = %purchase.reference(),
            lines = purchase.items.len(),
            "Purchase recorded"
        );

        self.purchases.push(purchase.clone());
        Ok(purchase)
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Replaces the settings; blank values fall back to the defaults.
    pub fn update_settings(&mut self, business_name: &str, currency: &str) -> &Settings {
        self.settings = Settings {
            business_name: non_blank(Some(business_name))
                .unwrap_or(DEFAULT_BUSINESS_NAME)
                .to_string(),
            currency: non_blank(Some(currency)).unwrap_or(DEFAULT_CURRENCY).to_string(),
        };
        debug!(business_name = %self.settings.business_name, "Settings updated");
        &self.settings
    }

    /// Clamps any negative stock left by a hand-edited document.
    pub(crate) fn normalize(&mut self) {
        for product in &mut self.products {
            if product.stock < 0 {
                warn!(product_id = %product.id, stock = product.stock, "Negative stock clamped to zero");
                product.stock = 0;
            }
        }
    }

    /// Validates every line, then maps each to a catalog index.
    ///
    /// Runs before any mutation so a rejected line leaves nothing half done.
    fn resolve_lines(
        &self,
        lines: &[LineRequest],
        resolution: LineResolution,
    ) -> CoreResult<Vec<(usize, i64)>> {
        for line in lines {
            if line.product_id.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "product_id".to_string(),
                }
                .into());
            }
            validate_quantity(line.qty)?;
        }

        let mut resolved = Vec::with_capacity(lines.len());
        for line in lines {
            match self.products.iter().position(|p| p.id == line.product_id) {
                Some(idx) => resolved.push((idx, line.qty)),
                None => match resolution {
                    LineResolution::Strict => {
                        return Err(CoreError::ProductNotFound(line.product_id.clone()));
                    }
                    LineResolution::BestEffort => {
                        warn!(product_id = %line.product_id, "Skipping line for unknown product");
                    }
                },
            }
        }

        Ok(resolved)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// One more than the highest number in use; 1 for an empty collection.
fn next_number(numbers: impl Iterator<Item = u64>) -> u64 {
    numbers.max().unwrap_or(0).saturating_add(1)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn normalize_label(label: Option<String>) -> Option<String> {
    non_blank(label.as_deref()).map(str::to_string)
}

fn placeholder_sku() -> String {
    let suffix: String = generate_id()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(4)
        .collect();
    format!("SKU-{}", suffix.to_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxRate;
    use std::collections::HashSet;

    fn para_store() -> (Store, String) {
        let mut store = Store::empty();
        let product = store.upsert_product(ProductInput {
            sku: Some("PARA500".into()),
            name: Some("Paracetamol 500mg".into()),
            price: Some("25".into()),
            cost: Some("12".into()),
            stock: Some("50".into()),
            low: Some("10".into()),
            ..ProductInput::default()
        });
        (store, product.id)
    }

    #[test]
    fn test_seeded_store() {
        let store = Store::seeded();
        assert_eq!(store.products().len(), 1);
        assert_eq!(store.products()[0].sku, "PARA500");
        assert_eq!(store.products()[0].price.cents(), 2500);
        assert!(store.invoices().is_empty());
        assert!(store.purchases().is_empty());
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_upsert_defaults() {
        let mut store = Store::empty();
        let product = store.upsert_product(ProductInput::default());

        assert!(product.sku.starts_with("SKU-"));
        assert_eq!(product.sku.len(), 8);
        assert_eq!(product.name, "Unnamed");
        assert_eq!(product.price, Money::zero());
        assert_eq!(product.stock, 0);
        assert_eq!(product.low, 5);
    }

    #[test]
    fn test_upsert_coerces_bad_numbers() {
        let mut store = Store::empty();
        let product = store.upsert_product(ProductInput {
            price: Some("abc".into()),
            cost: Some("-4".into()),
            stock: Some("12.7".into()),
            low: Some("0".into()),
            ..ProductInput::default()
        });

        assert_eq!(product.price.cents(), 0);
        assert_eq!(product.cost.cents(), 0);
        assert_eq!(product.stock, 12);
        assert_eq!(product.low, 0);
    }

    #[test]
    fn test_upsert_replaces_whole_record() {
        let (mut store, id) = para_store();
        let updated = store.upsert_product(ProductInput {
            id: Some(id.clone()),
            name: Some("Paracetamol 650mg".into()),
            price: Some("30".into()),
            ..ProductInput::default()
        });

        assert_eq!(updated.id, id);
        assert_eq!(store.products().len(), 1);
        // full replace: omitted fields take their defaults, not the old values
        assert_eq!(updated.stock, 0);
        assert_eq!(updated.low, 5);
        assert!(updated.sku.starts_with("SKU-"));
    }

    #[test]
    fn test_upsert_unknown_id_creates_fresh_product() {
        let mut store = Store::empty();
        let product = store.upsert_product(ProductInput {
            id: Some("no-such-id".into()),
            ..ProductInput::default()
        });

        assert_ne!(product.id, "no-such-id");
        assert_eq!(store.products().len(), 1);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut store = Store::empty();
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let product = store.upsert_product(ProductInput::default());
            assert!(seen.insert(product.id));
        }
    }

    #[test]
    fn test_delete_unknown_product_fails() {
        let (mut store, _) = para_store();
        let err = store.delete_product("missing").unwrap_err();

        assert!(matches!(err, CoreError::ProductNotFound(_)));
        assert_eq!(store.products().len(), 1);
    }

    #[test]
    fn test_delete_keeps_history_snapshots() {
        let (mut store, id) = para_store();
        store
            .record_sale(None, &[LineRequest::new(&id, 2)], &LedgerPolicy::default())
            .unwrap();

        store.delete_product(&id).unwrap();

        assert!(store.products().is_empty());
        assert_eq!(store.invoices()[0].items[0].name, "Paracetamol 500mg");
    }

    #[test]
    fn test_find_products() {
        let (mut store, _) = para_store();
        store.upsert_product(ProductInput {
            sku: Some("AMOX250".into()),
            name: Some("Amoxicillin".into()),
            ..ProductInput::default()
        });

        assert_eq!(store.find_products("").len(), 2);
        assert_eq!(store.find_products("para").len(), 1);
        assert_eq!(store.find_products("amox250")[0].name, "Amoxicillin");
        assert!(store.find_products("ibuprofen").is_empty());
    }

    #[test]
    fn test_find_products_matches_query_as_typed() {
        let (store, _) = para_store();

        assert_eq!(store.find_products("500mg").len(), 1);
        // name and sku are joined without a separator
        assert_eq!(store.find_products("500mgpara").len(), 1);
        assert_eq!(store.find_products(" 500mg").len(), 1);
        assert!(store.find_products("para500 ").is_empty());
        assert!(store.find_products("   ").is_empty());
    }

    #[test]
    fn test_sale_example() {
        let (mut store, id) = para_store();
        let invoice = store
            .record_sale(None, &[LineRequest::new(&id, 3)], &LedgerPolicy::default())
            .unwrap();

        assert_eq!(invoice.number, 1);
        assert_eq!(invoice.reference(), "INV-1");
        assert_eq!(invoice.subtotal.cents(), 7500);
        assert_eq!(invoice.tax.cents(), 900);
        assert_eq!(invoice.total.cents(), 8400);
        assert_eq!(store.product(&id).unwrap().stock, 47);
    }

    #[test]
    fn test_purchase_example() {
        let (mut store, id) = para_store();
        store
            .record_sale(None, &[LineRequest::new(&id, 3)], &LedgerPolicy::default())
            .unwrap();
        let purchase = store
            .record_purchase(None, &[LineRequest::new(&id, 20)], &LedgerPolicy::default())
            .unwrap();

        assert_eq!(purchase.reference(), "PUR-1");
        assert_eq!(purchase.items[0].cost.cents(), 1200);
        assert_eq!(store.product(&id).unwrap().stock, 67);
        assert_eq!(store.invoices().len(), 1);
    }

    #[test]
    fn test_purchase_then_sale_conserves_stock() {
        let (mut store, id) = para_store();
        let policy = LedgerPolicy::default();

        store
            .record_purchase(Some("Acme".into()), &[LineRequest::new(&id, 15)], &policy)
            .unwrap();
        store
            .record_sale(Some("Asha".into()), &[LineRequest::new(&id, 15)], &policy)
            .unwrap();

        assert_eq!(store.product(&id).unwrap().stock, 50);
    }

    #[test]
    fn test_stock_never_negative() {
        let (mut store, id) = para_store();
        let policy = LedgerPolicy::default();

        for qty in [30, 30, 1, 100] {
            store
                .record_sale(None, &[LineRequest::new(&id, qty)], &policy)
                .unwrap();
            assert!(store.product(&id).unwrap().stock >= 0);
        }
        assert_eq!(store.product(&id).unwrap().stock, 0);
    }

    #[test]
    fn test_totals_consistent_for_every_invoice() {
        let (mut store, id) = para_store();
        let other = store
            .upsert_product(ProductInput {
                price: Some("0.29".into()),
                stock: Some("100".into()),
                ..ProductInput::default()
            })
            .id;
        let policy = LedgerPolicy::default();

        for qty in 1..=10 {
            store
                .record_sale(
                    None,
                    &[LineRequest::new(&id, qty), LineRequest::new(&other, qty)],
                    &policy,
                )
                .unwrap();
        }

        for invoice in store.invoices() {
            assert!(invoice.totals_consistent(TaxRate::from_bps(1200)));
        }
    }

    #[test]
    fn test_empty_sale_leaves_store_unchanged() {
        let (mut store, _) = para_store();
        let before = store.clone();

        let err = store
            .record_sale(Some("custA".into()), &[], &LedgerPolicy::default())
            .unwrap_err();

        assert!(matches!(err, CoreError::EmptySale));
        assert_eq!(store, before);
    }

    #[test]
    fn test_empty_purchase_fails() {
        let (mut store, _) = para_store();
        let err = store
            .record_purchase(None, &[], &LedgerPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyPurchase));
        assert!(store.purchases().is_empty());
    }

    #[test]
    fn test_best_effort_skips_unknown_lines() {
        let (mut store, id) = para_store();
        let invoice = store
            .record_sale(
                None,
                &[LineRequest::new("ghost", 4), LineRequest::new(&id, 2)],
                &LedgerPolicy::default(),
            )
            .unwrap();

        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.subtotal.cents(), 5000);
    }

    #[test]
    fn test_best_effort_purchase_skips_unknown_lines() {
        let (mut store, id) = para_store();
        let purchase = store
            .record_purchase(
                Some("MedSupply".into()),
                &[LineRequest::new(&id, 5), LineRequest::new("ghost", 7)],
                &LedgerPolicy::default(),
            )
            .unwrap();

        assert_eq!(purchase.items.len(), 1);
        assert_eq!(purchase.items[0].product_id, id);
        assert_eq!(store.product(&id).unwrap().stock, 55);

        let err = store
            .record_purchase(None, &[LineRequest::new("ghost", 1)], &LedgerPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyPurchase));
        assert_eq!(store.purchases().len(), 1);
    }

    #[test]
    fn test_best_effort_with_nothing_resolved_is_empty_sale() {
        let (mut store, id) = para_store();
        let err = store
            .record_sale(None, &[LineRequest::new("ghost", 1)], &LedgerPolicy::default())
            .unwrap_err();

        assert!(matches!(err, CoreError::EmptySale));
        assert!(store.invoices().is_empty());
        assert_eq!(store.product(&id).unwrap().stock, 50);
    }

    #[test]
    fn test_strict_rejects_unknown_lines_without_mutating() {
        let (mut store, id) = para_store();
        let before = store.clone();
        let policy = LedgerPolicy::default().strict();

        let err = store
            .record_purchase(
                None,
                &[LineRequest::new(&id, 5), LineRequest::new("ghost", 1)],
                &policy,
            )
            .unwrap_err();

        assert!(matches!(err, CoreError::ProductNotFound(ref missing) if missing == "ghost"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let (mut store, id) = para_store();
        let err = store
            .record_sale(None, &[LineRequest::new(&id, 0)], &LedgerPolicy::default())
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(store.product(&id).unwrap().stock, 50);
    }

    #[test]
    fn test_huge_coerced_price_saturates_sale_totals() {
        let mut store = Store::empty();
        let id = store
            .upsert_product(ProductInput {
                price: Some("1e17".into()),
                stock: Some("10".into()),
                ..ProductInput::default()
            })
            .id;
        assert_eq!(store.product(&id).unwrap().price.cents(), i64::MAX);

        let invoice = store
            .record_sale(None, &[LineRequest::new(&id, 2)], &LedgerPolicy::default())
            .unwrap();

        assert_eq!(invoice.subtotal.cents(), i64::MAX);
        assert_eq!(invoice.total.cents(), i64::MAX);
        assert!(invoice.tax.cents() > 0);
        assert!(invoice.totals_consistent(TaxRate::from_bps(1200)));
        assert_eq!(store.product(&id).unwrap().stock, 8);
    }

    #[test]
    fn test_huge_quantity_is_recorded_not_rejected() {
        let (mut store, id) = para_store();
        let policy = LedgerPolicy::default();

        store
            .record_purchase(None, &[LineRequest::new(&id, i64::MAX)], &policy)
            .unwrap();
        assert_eq!(store.product(&id).unwrap().stock, i64::MAX);

        let invoice = store
            .record_sale(None, &[LineRequest::new(&id, i64::MAX)], &policy)
            .unwrap();
        assert_eq!(invoice.subtotal.cents(), i64::MAX);
        // the restock pinned at the bound, so the sale empties it
        assert_eq!(store.product(&id).unwrap().stock, 0);
    }

    #[test]
    fn test_configured_tax_rate() {
        let (mut store, id) = para_store();
        let policy = LedgerPolicy {
            tax_rate: TaxRate::from_bps(500),
            ..LedgerPolicy::default()
        };

        let invoice = store
            .record_sale(None, &[LineRequest::new(&id, 4)], &policy)
            .unwrap();

        assert_eq!(invoice.tax.cents(), 500);
        assert_eq!(invoice.total.cents(), 10_500);
    }

    #[test]
    fn test_numbers_keep_growing_past_the_highest() {
        let (mut store, id) = para_store();
        let policy = LedgerPolicy::default();
        for _ in 0..3 {
            store
                .record_sale(None, &[LineRequest::new(&id, 1)], &policy)
                .unwrap();
        }
        // a gap left by an older document must not produce a duplicate
        store.invoices.remove(1);

        let next = store
            .record_sale(None, &[LineRequest::new(&id, 1)], &policy)
            .unwrap();
        assert_eq!(next.number, 4);
    }

    #[test]
    fn test_find_invoices_by_reference_and_customer() {
        let (mut store, id) = para_store();
        let policy = LedgerPolicy::default();
        store
            .record_sale(Some("Asha Rao".into()), &[LineRequest::new(&id, 1)], &policy)
            .unwrap();
        store
            .record_sale(Some("  ".into()), &[LineRequest::new(&id, 1)], &policy)
            .unwrap();

        assert_eq!(store.find_invoices("asha").len(), 1);
        assert_eq!(store.find_invoices("walk-in").len(), 1);
        assert_eq!(store.find_invoices("inv-2")[0].customer, None);
    }

    #[test]
    fn test_update_settings_falls_back_on_blank() {
        let mut store = Store::empty();
        store.update_settings("Green Cross", "$");
        assert_eq!(store.settings().business_name, "Green Cross");

        let settings = store.update_settings("   ", "");
        assert_eq!(settings, &Settings::default());
    }
}
