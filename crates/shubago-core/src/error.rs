//! # Error Types
//!
//! Domain-specific error types for shubago-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shubago-core errors (this file)                                       │
//! │  ├── CoreError        - Ledger rule violations, unreadable documents   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shubago-db errors (separate crate)                                    │
//! │  ├── DbError          - Backing medium failures                        │
//! │  └── LedgerError      - CoreError | DbError at the caller boundary     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError → caller message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable: the caller shows a message and the Store is
//! left exactly as it was before the failed operation.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An operation referenced a product identifier that isn't in the catalog.
    ///
    /// ## When This Occurs
    /// - `delete_product` with an unknown id
    /// - `record_sale` / `record_purchase` under [`LineResolution::Strict`]
    ///
    /// [`LineResolution::Strict`]: crate::policy::LineResolution::Strict
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A sale was committed with no (resolvable) lines.
    #[error("Sale has no line items")]
    EmptySale,

    /// A purchase was committed with no (resolvable) lines.
    #[error("Purchase has no line items")]
    EmptyPurchase,

    /// Imported snapshot bytes don't parse into a store document.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// The persisted document couldn't be parsed at load time.
    ///
    /// ## User Workflow
    /// ```text
    /// Ledger::open()
    ///      │
    ///      ▼
    /// stored bytes ──► parse ──✗──► CorruptState
    ///      │
    ///      ▼
    /// open_or_recover(): back up bad bytes, start fresh, tell the user
    /// ```
    #[error("Stored state is corrupt: {0}")]
    CorruptState(String),

    /// The store couldn't be serialized.
    #[error("Failed to encode store: {0}")]
    Encode(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Numeric product fields are never validated (they coerce instead); these
/// cover the few inputs that must be rejected outright.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
