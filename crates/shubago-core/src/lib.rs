//! # shubago-core: Pure Ledger Logic for Shubago Pharmacy
//!
//! This crate is the **heart** of the pharmacy ledger. It holds the product
//! catalog, invoice history, purchase history and settings as one in-memory
//! [`Store`], and every rule that keeps stock, totals and records consistent.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shubago Ledger Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation layer (CLI, forms, lists)            │   │
//! │  │     builds a LineDraft ──► record_sale / record_purchase       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              shubago-db: Ledger (load / mutate / save)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shubago-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │   money   │  │  reports  │  │  policy   │  │   │
//! │  │   │ products  │  │   Money   │  │ dashboard │  │  coerce   │  │   │
//! │  │   │ invoices  │  │  TaxRate  │  │  ledger   │  │  clamp    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Invoice, Purchase, Settings)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`policy`] - Numeric coercion, stock clamping, line resolution policy
//! - [`draft`] - Caller-side scratch list of lines before commit
//! - [`store`] - The Store aggregate and its mutating operations
//! - [`reports`] - Read-only aggregate views
//! - [`snapshot`] - Whole-document encode/decode
//!
//! ## Example Usage
//!
//! ```rust
//! use shubago_core::{LedgerPolicy, LineRequest, ProductInput, Store};
//!
//! let mut store = Store::empty();
//! let product = store.upsert_product(ProductInput {
//!     sku: Some("PARA500".into()),
//!     price: Some("25".into()),
//!     stock: Some("50".into()),
//!     ..ProductInput::default()
//! });
//!
//! let invoice = store
//!     .record_sale(None, &[LineRequest::new(&product.id, 3)], &LedgerPolicy::default())
//!     .unwrap();
//!
//! assert_eq!(invoice.subtotal.cents(), 7500);
//! assert_eq!(invoice.tax.cents(), 900);
//! assert_eq!(invoice.total.cents(), 8400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod money;
pub mod policy;
pub mod reports;
pub mod snapshot;
pub mod store;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::{DraftKind, DraftLine, LineDraft};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use policy::{LedgerPolicy, LineResolution};
pub use reports::{
    render_sales_report, render_stock_report, DashboardSummary, LedgerEntry, LedgerKind,
    SalesReportRow, StockReportRow,
};
pub use store::{LineRequest, ProductInput, Store};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default flat tax rate: 1200 bps = 12%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1200;

/// Low-stock threshold applied when a product doesn't specify one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// How many invoices the dashboard lists as "recent".
pub const DEFAULT_RECENT_LIMIT: usize = 8;

/// Business name used when settings are left blank.
pub const DEFAULT_BUSINESS_NAME: &str = "SHUBAGO Pharmacy";

/// Currency prefix used when settings are left blank.
pub const DEFAULT_CURRENCY: &str = "₹";
