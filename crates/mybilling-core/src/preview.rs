//! # Bill Preview
//!
//! Runs a whole draft bill through the GST engine without storing anything,
//! so the bill screen can show live totals while the shopkeeper types.
//!
//! ## Preview Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PreviewRequest { items, bill_mode }                                    │
//! │       │                                                                 │
//! │       ├── no items? ─────────────────────────► PreviewError::NoItems    │
//! │       │                                                                 │
//! │       ▼  for each item                                                  │
//! │  qty parses? qty > 0? numbers parse? rate valid? mode valid?            │
//! │       │ no ──► "Item n: ..." warning, item skipped                      │
//! │       ▼ yes                                                             │
//! │  calc_line ──► PreviewLine                                              │
//! │       │                                                                 │
//! │       ├── every item skipped? ──────► PreviewError::AllItemsRejected    │
//! │       ├── sums out of range? ───────► PreviewError::Totals              │
//! │       ▼                                                                 │
//! │  BillPreview { lines, summary, totals, warnings }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One bad row never blocks the rest of the bill: it becomes a warning and
//! the other rows are still summed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::PreviewError;
use crate::gst::{calc_line, calculate_bill_totals, generate_gst_summary};
use crate::types::{BillTotals, GstMode, GstSummary, LineResult, NumericValue};
use crate::validation::{classify_gst_rate, validate_gst_rate, validate_quantity, RateKind};

// =============================================================================
// Options
// =============================================================================

/// Tenant-level knobs for previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewOptions {
    /// Accept any rate in 0..=100 instead of only the standard slabs.
    pub allow_custom_rates: bool,
    /// Mode for items when neither the item nor the bill names one.
    pub default_mode: GstMode,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        PreviewOptions {
            allow_custom_rates: true,
            default_mode: GstMode::Exclusive,
        }
    }
}

// =============================================================================
// Request
// =============================================================================

/// A draft bill as posted by the bill screen.
///
/// `line_items` and `gst_mode` are accepted as older spellings of `items`
/// and `bill_mode`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewRequest {
    #[serde(default, alias = "line_items")]
    pub items: Vec<PreviewItem>,
    #[serde(default, alias = "gst_mode")]
    pub bill_mode: Option<String>,
}

/// One draft bill row. Every field is optional and loosely typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewItem {
    /// Defaults to `0`.
    #[serde(default, alias = "price")]
    pub unit_price: Option<NumericValue>,
    /// Defaults to `1`.
    #[serde(default, alias = "quantity")]
    pub qty: Option<NumericValue>,
    /// Defaults to `0`.
    #[serde(default)]
    pub gst_rate: Option<NumericValue>,
    /// Defaults to `0`.
    #[serde(default)]
    pub discount_percent: Option<NumericValue>,
    /// Falls back to the bill mode, then to [`PreviewOptions::default_mode`].
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub hsn_code: Option<String>,
}

// =============================================================================
// Response
// =============================================================================

/// A calculated row, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PreviewLine {
    #[serde(flatten)]
    pub result: LineResult,
    /// Zero-based position of the row in the request.
    pub item_index: usize,
    pub product_name: String,
    pub hsn_code: String,
}

/// The previewed bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillPreview {
    pub lines: Vec<PreviewLine>,
    pub summary: GstSummary,
    pub totals: BillTotals,
    /// One message per skipped row. Omitted from JSON when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

// =============================================================================
// Bill Preview
// =============================================================================

/// Previews a draft bill.
///
/// ## Errors
/// - [`PreviewError::NoItems`] for an empty request
/// - [`PreviewError::AllItemsRejected`] when no row could be calculated
/// - [`PreviewError::Totals`] when the accepted rows cannot be summed
///
/// ## Example
/// ```rust
/// use mybilling_core::preview::{preview_bill, PreviewOptions, PreviewRequest};
///
/// let request: PreviewRequest = serde_json::from_str(r#"{
///     "items": [{"unit_price": "118", "qty": 2, "gst_rate": "18",
///                "discount_percent": "10", "mode": "INCLUSIVE"}]
/// }"#).unwrap();
///
/// let preview = preview_bill(&request, &PreviewOptions::default()).unwrap();
/// assert_eq!(preview.totals.final_total.to_string(), "212.40");
/// ```
pub fn preview_bill(
    request: &PreviewRequest,
    options: &PreviewOptions,
) -> Result<BillPreview, PreviewError> {
    if request.items.is_empty() {
        return Err(PreviewError::NoItems);
    }

    let bill_mode = request.bill_mode.as_deref();
    let mut lines = Vec::with_capacity(request.items.len());
    let mut warnings = Vec::new();

    for (index, item) in request.items.iter().enumerate() {
        match preview_item(index, item, bill_mode, options) {
            Ok(line) => {
                debug!(
                    item_index = index,
                    gst_rate = %line.result.gst_rate,
                    final_total = %line.result.final_total,
                    "Calculated preview line"
                );
                lines.push(line);
            }
            Err(message) => {
                warn!(item_index = index, %message, "Skipping preview item");
                warnings.push(message);
            }
        }
    }

    if lines.is_empty() {
        return Err(PreviewError::AllItemsRejected { errors: warnings });
    }

    let results: Vec<LineResult> = lines.iter().map(|line| line.result.clone()).collect();

    let summary = generate_gst_summary(&results).map_err(PreviewError::Totals)?;
    let totals = calculate_bill_totals(&results).map_err(PreviewError::Totals)?;

    Ok(BillPreview {
        summary,
        totals,
        lines,
        warnings,
    })
}

/// Validates and calculates one row. The error is the user-facing warning.
fn preview_item(
    index: usize,
    item: &PreviewItem,
    bill_mode: Option<&str>,
    options: &PreviewOptions,
) -> Result<PreviewLine, String> {
    let n = index + 1;

    let qty = match &item.qty {
        Some(raw) => raw
            .to_quantity("qty")
            .map_err(|_| format!("Item {}: Invalid quantity", n))?,
        None => 1,
    };
    if validate_quantity(qty).is_err() {
        return Err(format!("Item {}: Quantity must be greater than 0", n));
    }

    let zero = NumericValue::from("0");
    let raw_price = item.unit_price.as_ref().unwrap_or(&zero);
    let raw_rate = item.gst_rate.as_ref().unwrap_or(&zero);
    let raw_discount = item.discount_percent.as_ref().unwrap_or(&zero);

    let (unit_price, gst_rate, discount_percent) = match (
        raw_price.to_decimal("unit_price"),
        raw_rate.to_decimal("gst_rate"),
        raw_discount.to_decimal("discount_percent"),
    ) {
        (Ok(price), Ok(rate), Ok(discount)) => (price, rate, discount),
        _ => return Err(format!("Item {}: Invalid numeric values", n)),
    };

    if !validate_gst_rate(gst_rate, options.allow_custom_rates) {
        return Err(format!("Item {}: Invalid GST rate: {}", n, raw_rate));
    }

    let mode = match item.mode.as_deref().or(bill_mode) {
        Some(raw) => raw
            .parse::<GstMode>()
            .map_err(|_| format!("Item {}: Invalid mode. Must be INCLUSIVE or EXCLUSIVE", n))?,
        None => options.default_mode,
    };

    let result = calc_line(unit_price, qty, gst_rate, discount_percent, mode)
        .map_err(|e| format!("Item {}: Calculation error - {}", n, e))?;

    Ok(PreviewLine {
        result,
        item_index: index,
        product_name: item.product_name.clone().unwrap_or_default(),
        hsn_code: item.hsn_code.clone().unwrap_or_default(),
    })
}

// =============================================================================
// Rate Check
// =============================================================================

/// Answer to "is this GST rate acceptable?" for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateCheck {
    pub valid: bool,
    /// The rate as parsed, in its original precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    /// `standard` or `custom`; absent when invalid.
    #[serde(rename = "type")]
    pub kind: Option<RateKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Checks a raw rate value and reports whether it is standard or custom.
///
/// ## Example
/// ```rust
/// use mybilling_core::preview::check_gst_rate;
/// use mybilling_core::validation::RateKind;
///
/// let check = check_gst_rate(&"17".into(), true);
/// assert!(check.valid);
/// assert_eq!(check.kind, Some(RateKind::Custom));
///
/// let check = check_gst_rate(&"abc".into(), true);
/// assert!(!check.valid);
/// assert_eq!(check.error.as_deref(), Some("Invalid numeric value"));
/// ```
pub fn check_gst_rate(raw: &NumericValue, allow_custom: bool) -> RateCheck {
    let rate: Decimal = match raw.to_decimal("gst_rate") {
        Ok(rate) => rate,
        Err(_) => {
            return RateCheck {
                valid: false,
                rate: None,
                kind: None,
                error: Some("Invalid numeric value".to_string()),
            }
        }
    };

    let kind = classify_gst_rate(rate, allow_custom);
    RateCheck {
        valid: kind.is_some(),
        rate: Some(rate.to_string()),
        kind,
        error: None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
