//! # Money Module
//!
//! Decimal helpers shared by every monetary calculation in MyBilling.
//!
//! ## Why Decimal, and Why Round Every Step?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal + quantize()                       │
//! │    Every intermediate amount is rounded to 2 places (half-up)           │
//! │    BEFORE it feeds the next step. Stored bills were produced this       │
//! │    way, so recomputation must follow the same staircase exactly.       │
//! │                                                                         │
//! │    118.00 ÷ 1.18 → 100.00 → ×2 → 200.00 → −10% → 180.00 → +18% GST      │
//! │         q()          q()          q()            q()                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mybilling_core::money::{format_for_display, quantize};
//! use rust_decimal::Decimal;
//!
//! let amount = quantize(Decimal::new(212395, 3)); // 212.395
//! assert_eq!(amount.to_string(), "212.40");
//! assert_eq!(format_for_display(amount, "₹"), "₹212.40");
//! ```

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Constants
// =============================================================================

/// Number of decimal places every monetary value and rate is quantized to.
pub const MONEY_SCALE: u32 = 2;

/// Percentages are divided by this to become fractions.
pub const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Default display currency (Indian Rupee).
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

// =============================================================================
// Quantization
// =============================================================================

/// Rounds to 2 decimal places, half away from zero, and fixes the scale at 2.
///
/// ## Why also rescale?
/// `round_dp` never *adds* digits: `18` stays `"18"`. Summary keys and the
/// JSON contract need `"18.00"`, so the scale is pinned after rounding.
///
/// ## Limit
/// A `Decimal` holds 28 significant digits, so values with more than 26
/// integer digits keep a smaller scale. Amounts that must carry exactly two
/// places go through [`quantize_amount`] instead.
///
/// ## Example
/// ```rust
/// use mybilling_core::money::quantize;
/// use rust_decimal::Decimal;
///
/// assert_eq!(quantize(Decimal::new(1625, 3)).to_string(), "1.63"); // 1.625
/// assert_eq!(quantize(Decimal::new(-1625, 3)).to_string(), "-1.63");
/// assert_eq!(quantize(Decimal::from(18)).to_string(), "18.00");
/// ```
pub fn quantize(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// [`quantize`], failing when the value cannot carry two decimal places.
///
/// ## Example
/// ```rust
/// use mybilling_core::money::quantize_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(quantize_amount("total", Decimal::new(2124, 1)).unwrap().to_string(), "212.40");
/// assert!(quantize_amount("total", Decimal::MAX).is_err());
/// ```
pub fn quantize_amount(field: &str, value: Decimal) -> CoreResult<Decimal> {
    let amount = quantize(value);
    if amount.scale() != MONEY_SCALE {
        return Err(CoreError::invalid(
            field,
            "value is too large to carry two decimal places",
        ));
    }
    Ok(amount)
}

/// The 2-place zero (`0.00`).
#[inline]
pub fn zero() -> Decimal {
    quantize(Decimal::ZERO)
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a caller-supplied numeric string into a decimal.
///
/// Accepts plain (`"118.00"`) and scientific (`"1.18e2"`) notation with
/// surrounding whitespace. Anything else is an
/// [`InvalidArgument`](CoreError::InvalidArgument) naming `field`.
pub fn parse_decimal(field: &str, raw: &str) -> CoreResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid(field, "value is empty"));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CoreError::invalid(field, format!("'{}' is not a number", raw)))
}

// =============================================================================
// Display
// =============================================================================

/// Formats an amount for humans: currency symbol, thousands separators,
/// exactly two decimals.
///
/// ## Note
/// This is for receipts, logs and terminals. JSON payloads carry the plain
/// decimal string instead.
///
/// ## Example
/// ```rust
/// use mybilling_core::money::format_for_display;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_for_display(Decimal::new(123456789, 2), "₹"), "₹1,234,567.89");
/// assert_eq!(format_for_display(Decimal::new(-55, 1), "₹"), "₹-5.50");
/// ```
pub fn format_for_display(value: Decimal, currency: &str) -> String {
    let amount = quantize(value);
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = amount.abs().to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}{}.{}", currency, sign, grouped, frac_part)
}

// =============================================================================
// Unit Tests
// =============================================================================
