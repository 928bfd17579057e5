//! # Policy Module
//!
//! The ledger's permissive rules, kept as named functions so each can be
//! tested and swapped on its own.
//!
//! ## Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  coerce_numeric   "25" → 25.0   "abc" → 0.0   "" → 0.0                  │
//! │  coerce_money     "12.5" → 1250 minor units, negatives → 0             │
//! │  coerce_count     "7" → 7, "7.9" → 7, "-3" → 0                          │
//! │  clamp_stock      (3, -5) → 0      stock never goes negative            │
//! │  LineResolution   BestEffort: skip unknown products                     │
//! │                   Strict:     fail the whole operation                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invalid product numbers coerce instead of failing. Oversold quantity is
//! absorbed by the clamp rather than reported as a shortfall.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::types::TaxRate;
use crate::DEFAULT_RECENT_LIMIT;

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Parses caller-supplied text as a number; anything unparseable is 0.
///
/// ## Example
/// ```rust
/// use shubago_core::policy::coerce_numeric;
///
/// assert_eq!(coerce_numeric(" 25 "), 25.0);
/// assert_eq!(coerce_numeric("twelve"), 0.0);
/// assert_eq!(coerce_numeric("NaN"), 0.0);
/// ```
pub fn coerce_numeric(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Coerces text in major units (`"12.50"`) to non-negative [`Money`].
pub fn coerce_money(raw: &str) -> Money {
    let major = coerce_numeric(raw).max(0.0);
    Money::from_cents((major * 100.0).round() as i64)
}

/// Coerces text to a non-negative whole count, truncating fractions.
pub fn coerce_count(raw: &str) -> i64 {
    coerce_numeric(raw).max(0.0).trunc() as i64
}

// =============================================================================
// Stock Clamping
// =============================================================================

/// Applies a stock delta without ever going below zero.
///
/// ## Example
/// ```rust
/// use shubago_core::policy::clamp_stock;
///
/// assert_eq!(clamp_stock(50, -3), 47);
/// assert_eq!(clamp_stock(2, -5), 0);
/// assert_eq!(clamp_stock(0, 20), 20);
/// ```
pub fn clamp_stock(current: i64, delta: i64) -> i64 {
    current.saturating_add(delta).max(0)
}

// =============================================================================
// Line Validation
// =============================================================================

/// Validates a line quantity before anything is mutated.
///
/// Quantity has no upper bound: stock clamps and money saturates, so a
/// huge line is recorded rather than rejected.
pub fn validate_quantity(qty: i64) -> Result<(), ValidationError> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Line Resolution
// =============================================================================

/// What to do with a sale or purchase line whose product isn't in the
/// catalog any more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineResolution {
    /// Skip the line and record the rest.
    #[default]
    BestEffort,
    /// Fail the whole operation with `ProductNotFound`.
    Strict,
}

impl std::fmt::Display for LineResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineResolution::BestEffort => write!(f, "best_effort"),
            LineResolution::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for LineResolution {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "best_effort" | "lenient" => Ok(LineResolution::BestEffort),
            "strict" => Ok(LineResolution::Strict),
            _ => Err(CoreError::Validation(ValidationError::NotAllowed {
                field: "line policy".to_string(),
                allowed: vec!["best_effort".to_string(), "strict".to_string()],
            })),
        }
    }
}

// =============================================================================
// Ledger Policy
// =============================================================================

/// Tunables the Store operations read; built from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerPolicy {
    /// Flat tax applied to every sale.
    pub tax_rate: TaxRate,
    /// Handling of lines that reference unknown products.
    pub line_resolution: LineResolution,
    /// How many invoices the dashboard lists.
    pub recent_limit: usize,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        LedgerPolicy {
            tax_rate: TaxRate::default(),
            line_resolution: LineResolution::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl LedgerPolicy {
    /// Same policy with strict line resolution.
    pub fn strict(mut self) -> Self {
        self.line_resolution = LineResolution::Strict;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
