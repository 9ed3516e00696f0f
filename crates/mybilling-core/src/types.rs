//! # Domain Types
//!
//! Value objects consumed and produced by the GST engine.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   calc_line   ┌─────────────────┐                 │
//! │  │   LineInput     │ ────────────► │   LineResult    │ ──┐             │
//! │  │  unit_price     │               │  taxable_amount │   │             │
//! │  │  quantity       │               │  cgst / sgst    │   │             │
//! │  │  gst_rate       │               │  final_total    │   │             │
//! │  │  discount_pct   │               └─────────────────┘   │             │
//! │  │  mode           │                                     │             │
//! │  └─────────────────┘          ┌──────────────────────────┴──┐          │
//! │                               ▼                             ▼          │
//! │                   ┌─────────────────────┐     ┌─────────────────┐      │
//! │                   │ GstSummary          │     │   BillTotals    │      │
//! │                   │ "18.00" → RateSum.  │     │  grand_total    │      │
//! │                   │ "5.00"  → RateSum.  │     │  ...            │      │
//! │                   └─────────────────────┘     └─────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these types has identity or lifecycle: they are built per request
//! and handed back to the caller, which persists or serializes them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::parse_decimal;

// =============================================================================
// GST Mode
// =============================================================================

/// Whether a quoted unit price already contains GST.
///
/// Serialized as `"INCLUSIVE"` / `"EXCLUSIVE"`; read case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum GstMode {
    /// Price includes GST; the engine extracts the base (MRP-style pricing).
    Inclusive,
    /// Price is the base; GST is added on top.
    #[default]
    Exclusive,
}

impl GstMode {
    /// The canonical uppercase name echoed in every `LineResult`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GstMode::Inclusive => "INCLUSIVE",
            GstMode::Exclusive => "EXCLUSIVE",
        }
    }
}

impl fmt::Display for GstMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GstMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INCLUSIVE" => Ok(GstMode::Inclusive),
            "EXCLUSIVE" => Ok(GstMode::Exclusive),
            other => Err(CoreError::invalid(
                "mode",
                format!("'{}' is not INCLUSIVE or EXCLUSIVE", other),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for GstMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Numeric Value
// =============================================================================

/// A loosely typed numeric field as it arrives from a form or JSON body.
///
/// Bill forms post numbers as strings (`"118.00"`) while API clients send
/// JSON numbers (`118`). Both are accepted; conversion is strict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(serde_json::Number),
    Text(String),
}

impl NumericValue {
    /// Converts to a decimal, or fails with `InvalidArgument` naming `field`.
    pub fn to_decimal(&self, field: &str) -> CoreResult<Decimal> {
        match self {
            NumericValue::Number(n) => match n.as_i64() {
                Some(i) => Ok(Decimal::from(i)),
                None => parse_decimal(field, &n.to_string()),
            },
            NumericValue::Text(s) => parse_decimal(field, s),
        }
    }

    /// Converts to an integer quantity.
    ///
    /// ## Rules
    /// - JSON integers and integral strings (`"3"`, `" +3 "`) are taken as-is
    /// - JSON floats are truncated toward zero (`2.9` → `2`)
    /// - Fractional strings (`"2.5"`) and non-numbers are rejected
    pub fn to_quantity(&self, field: &str) -> CoreResult<i64> {
        match self {
            NumericValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
                    _ => Err(CoreError::invalid(field, format!("{} is out of range", n))),
                }
            }
            NumericValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| CoreError::invalid(field, format!("'{}' is not an integer", s))),
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Number(n) => write!(f, "{}", n),
            NumericValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for NumericValue {
    fn from(value: &str) -> Self {
        NumericValue::Text(value.to_string())
    }
}

impl From<i64> for NumericValue {
    fn from(value: i64) -> Self {
        NumericValue::Number(value.into())
    }
}

impl From<Decimal> for NumericValue {
    fn from(value: Decimal) -> Self {
        NumericValue::Text(value.to_string())
    }
}

// =============================================================================
// Line Input
// =============================================================================

/// Typed inputs for one bill line.
///
/// ## Preconditions (not checked by the engine)
/// - `quantity > 0`
/// - `gst_rate` and `discount_percent` within 0..=100
///
/// Callers reject these upstream; see [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInput {
    pub unit_price: Decimal,
    pub quantity: i64,
    pub gst_rate: Decimal,
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub mode: GstMode,
}

impl LineInput {
    /// Builds a line input from raw form/JSON values.
    ///
    /// Fails with `InvalidArgument` on the first field that does not parse.
    pub fn parse(
        unit_price: &NumericValue,
        quantity: &NumericValue,
        gst_rate: &NumericValue,
        discount_percent: &NumericValue,
        mode: &str,
    ) -> CoreResult<Self> {
        Ok(LineInput {
            unit_price: unit_price.to_decimal("unit_price")?,
            quantity: quantity.to_quantity("qty")?,
            gst_rate: gst_rate.to_decimal("gst_rate")?,
            discount_percent: discount_percent.to_decimal("discount_percent")?,
            mode: mode.parse()?,
        })
    }

    /// Runs [`crate::gst::calc_line`] on this input.
    pub fn calculate(&self) -> CoreResult<LineResult> {
        crate::gst::calc_line(
            self.unit_price,
            self.quantity,
            self.gst_rate,
            self.discount_percent,
            self.mode,
        )
    }
}

// =============================================================================
// Line Result
// =============================================================================

/// Fully reconciled GST breakdown for one bill line.
///
/// Every decimal is already quantized to 2 places. Consumers must not
/// re-round.
///
/// ## Invariant
/// `final_total == taxable_amount + cgst_amount + sgst_amount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineResult {
    /// Unit price with GST removed (equals the input price when EXCLUSIVE).
    #[ts(as = "String")]
    pub unit_price_base: Decimal,
    /// `unit_price_base × quantity`.
    #[ts(as = "String")]
    pub line_base_total: Decimal,
    #[ts(as = "String")]
    pub discount_amount: Decimal,
    /// Post-discount, pre-tax value GST is computed on.
    #[ts(as = "String")]
    pub taxable_amount: Decimal,
    #[ts(as = "String")]
    pub cgst_rate: Decimal,
    #[ts(as = "String")]
    pub sgst_rate: Decimal,
    #[ts(as = "String")]
    pub cgst_amount: Decimal,
    #[ts(as = "String")]
    pub sgst_amount: Decimal,
    #[ts(as = "String")]
    pub total_gst: Decimal,
    #[ts(as = "String")]
    pub final_total: Decimal,
    #[ts(as = "String")]
    pub gst_rate: Decimal,
    pub mode: GstMode,
}

// =============================================================================
// Rate Summary
// =============================================================================

/// Totals for every line sharing one GST rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateSummary {
    #[ts(as = "String")]
    pub taxable_amount: Decimal,
    #[ts(as = "String")]
    pub cgst_amount: Decimal,
    #[ts(as = "String")]
    pub sgst_amount: Decimal,
    #[ts(as = "String")]
    pub total_gst: Decimal,
    #[ts(as = "String")]
    pub final_total: Decimal,
}

/// Rate-wise summary keyed by the 2-place rate string (`"18.00"`).
pub type GstSummary = BTreeMap<String, RateSummary>;

// =============================================================================
// Bill Totals
// =============================================================================

/// Bill-level totals across all lines regardless of rate.
///
/// Serialized with the key names the bill screens already read
/// (`grand_total`, `total_gst_amount`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillTotals {
    #[serde(rename = "total_taxable_amount")]
    #[ts(as = "String")]
    pub taxable_amount: Decimal,
    #[serde(rename = "total_cgst_amount")]
    #[ts(as = "String")]
    pub cgst_amount: Decimal,
    #[serde(rename = "total_sgst_amount")]
    #[ts(as = "String")]
    pub sgst_amount: Decimal,
    #[serde(rename = "total_gst_amount")]
    #[ts(as = "String")]
    pub total_gst: Decimal,
    #[serde(rename = "grand_total")]
    #[ts(as = "String")]
    pub final_total: Decimal,
}

// =============================================================================
// Unit Tests
// =============================================================================
