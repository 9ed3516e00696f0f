//! # Validation Module
//!
//! Input validation utilities for bill lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Bill form / API client                                       │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Caller (preview, bill handlers)                              │
//! │  └── THIS MODULE: quantity > 0, percentages in range, GST slab check  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: GST engine (gst.rs)                                          │
//! │  └── Trusts its inputs; only fails on unusable numbers                 │
//! │                                                                         │
//! │  The engine never clamps. Out-of-range values are rejected HERE.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mybilling_core::validation::{validate_gst_rate, validate_quantity};
//! use rust_decimal::Decimal;
//!
//! assert!(validate_gst_rate(Decimal::from(18), false));
//! assert!(!validate_gst_rate(Decimal::from(17), false));
//! assert!(validate_quantity(2).is_ok());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::gst::STANDARD_GST_RATES;
use crate::money::{parse_decimal, ONE_HUNDRED};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// GST Rate Validation
// =============================================================================

/// Checks a GST rate.
///
/// ## Rules
/// - `allow_custom = false`: the rate must be one of 0, 5, 12, 18, 28
///   (compared numerically, so `18.00` passes)
/// - `allow_custom = true`: any rate in 0..=100
///
/// This is a business-rule check: it answers, it never fails.
pub fn validate_gst_rate(rate: Decimal, allow_custom: bool) -> bool {
    if allow_custom {
        return rate >= Decimal::ZERO && rate <= ONE_HUNDRED;
    }
    is_standard_gst_rate(rate)
}

/// Same as [`validate_gst_rate`], for a rate still in its raw text form.
///
/// Non-numeric input is simply invalid.
///
/// ## Example
/// ```rust
/// use mybilling_core::validation::validate_gst_rate_str;
///
/// assert!(validate_gst_rate_str("18.00", false));
/// assert!(validate_gst_rate_str("17", true));
/// assert!(!validate_gst_rate_str("abc", true));
/// ```
pub fn validate_gst_rate_str(raw: &str, allow_custom: bool) -> bool {
    parse_decimal("gst_rate", raw)
        .map(|rate| validate_gst_rate(rate, allow_custom))
        .unwrap_or(false)
}

/// Returns true when `rate` is one of the standard GST slabs.
pub fn is_standard_gst_rate(rate: Decimal) -> bool {
    STANDARD_GST_RATES.contains(&rate)
}

// =============================================================================
// Rate Classification
// =============================================================================

/// Whether an accepted rate is a standard slab or a custom rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    Standard,
    Custom,
}

/// Classifies a rate the way the rate-check screen reports it.
///
/// ## Rules
/// - Invalid under `allow_custom` → `None`
/// - Valid and outside the standard set (only possible when custom rates are
///   allowed) → `Custom`
/// - Otherwise → `Standard`
pub fn classify_gst_rate(rate: Decimal, allow_custom: bool) -> Option<RateKind> {
    if !validate_gst_rate(rate, allow_custom) {
        return None;
    }

    if allow_custom && !is_standard_gst_rate(rate) {
        Some(RateKind::Custom)
    } else {
        Some(RateKind::Standard)
    }
}

// =============================================================================
// Line Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// The engine accepts any integer; this is the upstream check bill handlers
/// run before calling it.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage field (discount, custom GST rate).
///
/// ## Rules
/// - Must be within 0..=100
pub fn validate_percentage(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_gst_rate_standard() {
        assert!(validate_gst_rate(dec!(18), false));
        assert!(validate_gst_rate(dec!(18.00), false));
        assert!(validate_gst_rate(dec!(0), false));
        assert!(validate_gst_rate(dec!(28), false));

        assert!(!validate_gst_rate(dec!(17), false));
        assert!(!validate_gst_rate(dec!(18.5), false));
        assert!(!validate_gst_rate(dec!(-5), false));
    }

    #[test]
    fn test_validate_gst_rate_custom() {
        assert!(validate_gst_rate(dec!(17), true));
        assert!(validate_gst_rate(dec!(0), true));
        assert!(validate_gst_rate(dec!(100), true));
        assert!(validate_gst_rate(dec!(0.25), true));

        assert!(!validate_gst_rate(dec!(-0.01), true));
        assert!(!validate_gst_rate(dec!(100.01), true));
    }

    #[test]
    fn test_validate_gst_rate_str() {
        assert!(validate_gst_rate_str("18", false));
        assert!(validate_gst_rate_str(" 5.0 ", false));
        assert!(!validate_gst_rate_str("17", false));
        assert!(validate_gst_rate_str("17", true));
        assert!(!validate_gst_rate_str("", true));
        assert!(!validate_gst_rate_str("eighteen", false));
    }

    #[test]
    fn test_classify_gst_rate() {
        assert_eq!(classify_gst_rate(dec!(18), false), Some(RateKind::Standard));
        assert_eq!(classify_gst_rate(dec!(18), true), Some(RateKind::Standard));
        assert_eq!(classify_gst_rate(dec!(17), true), Some(RateKind::Custom));
        assert_eq!(classify_gst_rate(dec!(17), false), None);
        assert_eq!(classify_gst_rate(dec!(120), true), None);
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("discount_percent", dec!(0)).is_ok());
        assert!(validate_percentage("discount_percent", dec!(12.5)).is_ok());
        assert!(validate_percentage("discount_percent", dec!(100)).is_ok());

        let err = validate_percentage("discount_percent", dec!(101)).unwrap_err();
        assert_eq!(err.to_string(), "discount_percent must be between 0 and 100");
        assert!(validate_percentage("discount_percent", dec!(-1)).is_err());
    }
}
