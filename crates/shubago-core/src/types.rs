//! # Domain Types
//!
//! Core domain types held by the [`Store`](crate::store::Store).
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Invoice     │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  sku            │   │  number → INV-n │   │  number → PUR-n │       │
//! │  │  price, cost    │   │  items[]        │   │  items[]        │       │
//! │  │  stock, low     │   │  subtotal/tax/  │   │  supplier       │       │
//! │  └─────────────────┘   │  total          │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │    Settings     │                             │
//! │  │  bps (u32)      │   │  business_name  │                             │
//! │  │  1200 = 12%     │   │  currency       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Line items copy the product's name and price (or cost) at the moment of
//! the sale or purchase. Editing or deleting the product later never changes
//! a historical record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::{DEFAULT_BUSINESS_NAME, DEFAULT_CURRENCY, DEFAULT_LOW_STOCK_THRESHOLD};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1200 bps = 12%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for config files and env vars).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4), immutable after creation.
    pub id: String,

    /// Stock keeping code. Conventionally unique, not enforced.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Unit sale price.
    pub price: Money,

    /// Unit cost (drives inventory valuation).
    pub cost: Money,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Flag the product for restock at or below this level.
    #[serde(default = "default_low_threshold")]
    pub low: i64,
}

fn default_low_threshold() -> i64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Product {
    /// True when stock is at or below the low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low
    }

    /// Inventory valuation of this product: stock × cost.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.cost.multiply_quantity(self.stock)
    }

    /// Text matched by catalog search: name followed by sku.
    pub(crate) fn search_text(&self) -> String {
        format!("{}{}", self.name, self.sku).to_lowercase()
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A line item in an invoice, frozen at the moment of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceLineItem {
    /// Back-reference to the product (may no longer exist).
    pub product_id: String,
    /// Product name at time of sale.
    pub name: String,
    /// Unit price at time of sale.
    pub price: Money,
    /// Quantity sold, at least 1.
    pub qty: i64,
}

impl InvoiceLineItem {
    /// Line total (price × qty).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.qty)
    }
}

/// A completed sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Display sequence number; the human reference is `INV-{number}`.
    pub number: u64,
    /// Optional customer label.
    pub customer: Option<String>,
    /// Lines in entry order.
    pub items: Vec<InvoiceLineItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Human-readable reference, e.g. `INV-12`.
    pub fn reference(&self) -> String {
        format!("INV-{}", self.number)
    }

    /// Customer label for display; blank means a walk-in sale.
    pub fn customer_label(&self) -> &str {
        display_label(self.customer.as_deref(), "Walk-in")
    }

    /// Recomputes the subtotal from the line items.
    pub fn computed_subtotal(&self) -> Money {
        self.items.iter().map(InvoiceLineItem::line_total).sum()
    }

    /// True when the stored totals match what the line items produce at `rate`.
    pub fn totals_consistent(&self, rate: TaxRate) -> bool {
        let expected = SaleTotals::from_subtotal(self.computed_subtotal(), rate);
        expected.subtotal == self.subtotal && expected.tax == self.tax && expected.total == self.total
    }
}

/// Derived money fields of a sale: subtotal, tax on it, and their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl SaleTotals {
    /// Applies the flat tax rate to a subtotal.
    pub fn from_subtotal(subtotal: Money, rate: TaxRate) -> Self {
        let tax = subtotal.calculate_tax(rate);
        SaleTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A line item in a purchase, frozen at the moment of restock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseLineItem {
    pub product_id: String,
    /// Product name at time of purchase.
    pub name: String,
    /// Unit cost at time of purchase.
    pub cost: Money,
    pub qty: i64,
}

/// A completed restock. Carries no derived money fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Purchase {
    pub id: String,
    /// Display sequence number; the human reference is `PUR-{number}`.
    pub number: u64,
    pub supplier: Option<String>,
    pub items: Vec<PurchaseLineItem>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Human-readable reference, e.g. `PUR-3`.
    pub fn reference(&self) -> String {
        format!("PUR-{}", self.number)
    }

    pub fn supplier_label(&self) -> &str {
        display_label(self.supplier.as_deref(), "Supplier")
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Business display settings, a mutable singleton within the Store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settings {
    pub business_name: String,
    /// Currency symbol or prefix, e.g. `₹`.
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Settings {
    /// Formats an amount with this store's currency prefix.
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Generates a fresh entity identifier (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

fn display_label<'a>(label: Option<&'a str>, fallback: &'a str) -> &'a str {
    match label {
        Some(l) if !l.trim().is_empty() => l,
        _ => fallback,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
