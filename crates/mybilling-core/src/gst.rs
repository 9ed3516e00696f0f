//! # GST Calculation Engine
//!
//! Converts bill line inputs into a reconciled CGST/SGST breakdown and
//! aggregates computed lines into rate-wise summaries and bill totals.
//!
//! ## Calculation Staircase
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calc_line(price, qty, rate, discount%, mode)                           │
//! │                                                                         │
//! │  1. unit_price_base   INCLUSIVE: q(price ÷ (1 + rate/100))              │
//! │                       EXCLUSIVE: q(price)                               │
//! │  2. line_base_total   q(unit_price_base × qty)                          │
//! │  3. discount_amount   q(line_base_total × (discount/100))               │
//! │  4. taxable_amount    q(line_base_total − discount_amount)              │
//! │  5. cgst = sgst       q(taxable_amount × (rate/2) / 100)                │
//! │     total_gst         q(cgst + sgst)                                    │
//! │  6. final_total       q(taxable_amount + total_gst)                     │
//! │                                                                         │
//! │  q() = round half-up to 2 places, applied BEFORE the next step.         │
//! │  Discount always precedes tax.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! Nothing here performs I/O, logs, or keeps state. Every function can be
//! called from any number of threads at once.
//!
//! ## Example
//! ```rust
//! use mybilling_core::gst::calc_line;
//! use mybilling_core::GstMode;
//! use rust_decimal::Decimal;
//!
//! let line = calc_line(
//!     Decimal::from(118),
//!     2,
//!     Decimal::from(18),
//!     Decimal::from(10),
//!     GstMode::Inclusive,
//! )
//! .unwrap();
//!
//! assert_eq!(line.taxable_amount.to_string(), "180.00");
//! assert_eq!(line.total_gst.to_string(), "32.40");
//! assert_eq!(line.final_total.to_string(), "212.40");
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::money::{quantize, quantize_amount, zero, ONE_HUNDRED};
use crate::types::{BillTotals, GstMode, GstSummary, LineResult, RateSummary};

// =============================================================================
// Rate Constants
// =============================================================================

/// The standard Indian GST slabs, in percent.
///
/// Non-custom rate validation accepts exactly these values.
pub const STANDARD_GST_RATES: [Decimal; 5] = [
    Decimal::ZERO,
    Decimal::from_parts(5, 0, 0, false, 0),
    Decimal::from_parts(12, 0, 0, false, 0),
    Decimal::from_parts(18, 0, 0, false, 0),
    Decimal::from_parts(28, 0, 0, false, 0),
];

const TWO: Decimal = Decimal::TWO;

// =============================================================================
// Checked Arithmetic
// =============================================================================
// rust_decimal's operators panic on overflow and division by zero. The engine
// surfaces both as InvalidArgument against the step that failed, for line
// arithmetic and aggregation alike.

fn overflow(step: &str) -> CoreError {
    CoreError::invalid(step, "result is outside the decimal range")
}

fn mul(step: &str, a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(step))
}

fn div(step: &str, a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    if b.is_zero() {
        return Err(CoreError::invalid(step, "division by zero"));
    }
    a.checked_div(b).ok_or_else(|| overflow(step))
}

fn add(step: &str, a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(step))
}

fn sub(step: &str, a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(step))
}

// =============================================================================
// Unit Price Conversion
// =============================================================================

/// Removes GST from a GST-inclusive unit price.
///
/// ## Formula
/// `base = inclusive ÷ (1 + rate/100)`, quantized to 2 places.
///
/// The result is rounded *before* the caller multiplies it by quantity;
/// stored bill lines depend on that order.
///
/// ## Example
/// ```rust
/// use mybilling_core::gst::base_from_inclusive_unit_price;
/// use rust_decimal::Decimal;
///
/// let base = base_from_inclusive_unit_price(Decimal::from(118), Decimal::from(18)).unwrap();
/// assert_eq!(base.to_string(), "100.00");
///
/// let base = base_from_inclusive_unit_price(Decimal::from(100), Decimal::from(18)).unwrap();
/// assert_eq!(base.to_string(), "84.75");
/// ```
pub fn base_from_inclusive_unit_price(unit_price_incl: Decimal, gst_rate: Decimal) -> CoreResult<Decimal> {
    if gst_rate.is_zero() {
        return quantize_amount("unit_price", unit_price_incl);
    }

    let divisor = add(
        "gst_rate",
        Decimal::ONE,
        div("gst_rate", gst_rate, ONE_HUNDRED)?,
    )?;
    quantize_amount("unit_price", div("unit_price", unit_price_incl, divisor)?)
}

// =============================================================================
// Line Calculation
// =============================================================================

/// Calculates the full GST breakdown of one bill line.
///
/// ## Preconditions
/// - `qty > 0` (callers reject non-positive quantities before calling)
/// - `gst_rate` and `discount_percent` in 0..=100; values outside are NOT
///   clamped, the arithmetic simply runs (a negative discount inflates the
///   taxable amount)
///
/// ## Errors
/// [`CoreError::InvalidArgument`] when a step leaves the decimal range, an
/// amount is too large to keep two decimal places, or an inclusive price
/// meets a `-100%` rate.
///
/// ## Example
/// ```rust
/// use mybilling_core::gst::calc_line;
/// use mybilling_core::GstMode;
/// use rust_decimal::Decimal;
///
/// let line = calc_line(Decimal::from(50), 3, Decimal::ZERO, Decimal::ZERO, GstMode::Exclusive).unwrap();
/// assert_eq!(line.cgst_amount.to_string(), "0.00");
/// assert_eq!(line.final_total.to_string(), "150.00");
/// ```
pub fn calc_line(
    price: Decimal,
    qty: i64,
    gst_rate: Decimal,
    discount_percent: Decimal,
    mode: GstMode,
) -> CoreResult<LineResult> {
    let unit_price_base = match mode {
        GstMode::Inclusive => base_from_inclusive_unit_price(price, gst_rate)?,
        GstMode::Exclusive => quantize_amount("unit_price", price)?,
    };
    let line_base_total = quantize_amount(
        "line_base_total",
        mul("line_base_total", unit_price_base, Decimal::from(qty))?,
    )?;

    // Discount is taken off the base before any tax is computed.
    let discount_fraction = div("discount_percent", discount_percent, ONE_HUNDRED)?;
    let discount_amount = quantize_amount(
        "discount_amount",
        mul("discount_amount", line_base_total, discount_fraction)?,
    )?;
    let taxable_amount = quantize_amount(
        "taxable_amount",
        sub("taxable_amount", line_base_total, discount_amount)?,
    )?;

    let half_rate = div("gst_rate", gst_rate, TWO)?;
    let (cgst_amount, sgst_amount, total_gst) = if gst_rate.is_zero() {
        (zero(), zero(), zero())
    } else {
        let cgst_amount = quantize_amount(
            "cgst_amount",
            div("cgst_amount", mul("cgst_amount", taxable_amount, half_rate)?, ONE_HUNDRED)?,
        )?;
        let sgst_amount = quantize_amount(
            "sgst_amount",
            div("sgst_amount", mul("sgst_amount", taxable_amount, half_rate)?, ONE_HUNDRED)?,
        )?;
        let total_gst = quantize_amount("total_gst", add("total_gst", cgst_amount, sgst_amount)?)?;
        (cgst_amount, sgst_amount, total_gst)
    };

    let final_total = quantize_amount("final_total", add("final_total", taxable_amount, total_gst)?)?;
    let half_rate = quantize_amount("gst_rate", half_rate)?;

    Ok(LineResult {
        unit_price_base,
        line_base_total,
        discount_amount,
        taxable_amount,
        cgst_rate: half_rate,
        sgst_rate: half_rate,
        cgst_amount,
        sgst_amount,
        total_gst,
        final_total,
        gst_rate: quantize_amount("gst_rate", gst_rate)?,
        mode,
    })
}

// =============================================================================
// Aggregation
// =============================================================================

/// The summary key for a rate: its 2-place string form (`18` → `"18.00"`).
pub fn rate_key(gst_rate: Decimal) -> String {
    quantize(gst_rate).to_string()
}

/// Groups computed lines by GST rate and sums each group.
///
/// ## Rules
/// - Lines whose rates are numerically equal share a bucket (`18` and
///   `18.00` both land in `"18.00"`)
/// - Summed values are re-quantized to 2 places
/// - Empty input → empty map; input order never changes the result
///
/// ## Errors
/// [`CoreError::InvalidArgument`] when a bucket sum leaves the decimal range.
///
/// ## Example
/// ```text
/// [line(18%), line(18%), line(5%)]
///      │
///      ▼
/// { "18.00": line1 + line2, "5.00": line3 }
/// ```
pub fn generate_gst_summary(line_results: &[LineResult]) -> CoreResult<GstSummary> {
    let mut summary = GstSummary::new();

    for line in line_results {
        let bucket: &mut RateSummary = summary.entry(rate_key(line.gst_rate)).or_default();
        bucket.taxable_amount = add("taxable_amount", bucket.taxable_amount, line.taxable_amount)?;
        bucket.cgst_amount = add("cgst_amount", bucket.cgst_amount, line.cgst_amount)?;
        bucket.sgst_amount = add("sgst_amount", bucket.sgst_amount, line.sgst_amount)?;
        bucket.total_gst = add("total_gst", bucket.total_gst, line.total_gst)?;
        bucket.final_total = add("final_total", bucket.final_total, line.final_total)?;
    }

    for bucket in summary.values_mut() {
        bucket.taxable_amount = quantize_amount("taxable_amount", bucket.taxable_amount)?;
        bucket.cgst_amount = quantize_amount("cgst_amount", bucket.cgst_amount)?;
        bucket.sgst_amount = quantize_amount("sgst_amount", bucket.sgst_amount)?;
        bucket.total_gst = quantize_amount("total_gst", bucket.total_gst)?;
        bucket.final_total = quantize_amount("final_total", bucket.final_total)?;
    }

    Ok(summary)
}

/// Sums the five amount fields across every line, regardless of rate.
///
/// Lines are already quantized, so the grand total is exactly the sum of the
/// line totals; no drift accumulates here. Empty input → all `0.00`.
pub fn calculate_bill_totals(line_results: &[LineResult]) -> CoreResult<BillTotals> {
    let mut totals = BillTotals::default();

    for line in line_results {
        totals.taxable_amount = add("total_taxable_amount", totals.taxable_amount, line.taxable_amount)?;
        totals.cgst_amount = add("total_cgst_amount", totals.cgst_amount, line.cgst_amount)?;
        totals.sgst_amount = add("total_sgst_amount", totals.sgst_amount, line.sgst_amount)?;
        totals.total_gst = add("total_gst_amount", totals.total_gst, line.total_gst)?;
        totals.final_total = add("grand_total", totals.final_total, line.final_total)?;
    }

    Ok(BillTotals {
        taxable_amount: quantize_amount("total_taxable_amount", totals.taxable_amount)?,
        cgst_amount: quantize_amount("total_cgst_amount", totals.cgst_amount)?,
        sgst_amount: quantize_amount("total_sgst_amount", totals.sgst_amount)?,
        total_gst: quantize_amount("total_gst_amount", totals.total_gst)?,
        final_total: quantize_amount("grand_total", totals.final_total)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(price: Decimal, qty: i64, rate: Decimal, discount: Decimal, mode: GstMode) -> LineResult {
        calc_line(price, qty, rate, discount, mode).unwrap()
    }

    // -------------------------------------------------------------------------
    // Reference scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn test_inclusive_line_with_discount() {
        // ₹118 incl. 18% GST, qty 2, 10% discount
        let result = line(dec!(118), 2, dec!(18), dec!(10), GstMode::Inclusive);

        assert_eq!(result.unit_price_base, dec!(100.00));
        assert_eq!(result.line_base_total, dec!(200.00));
        assert_eq!(result.discount_amount, dec!(20.00));
        assert_eq!(result.taxable_amount, dec!(180.00));
        assert_eq!(result.cgst_rate, dec!(9.00));
        assert_eq!(result.sgst_rate, dec!(9.00));
        assert_eq!(result.cgst_amount, dec!(16.20));
        assert_eq!(result.sgst_amount, dec!(16.20));
        assert_eq!(result.total_gst, dec!(32.40));
        assert_eq!(result.final_total, dec!(212.40));
        assert_eq!(result.gst_rate.to_string(), "18.00");
        assert_eq!(result.mode, GstMode::Inclusive);
    }

    #[test]
    fn test_exclusive_line_with_discount() {
        let result = line(dec!(100), 2, dec!(18), dec!(10), GstMode::Exclusive);

        assert_eq!(result.unit_price_base, dec!(100.00));
        assert_eq!(result.taxable_amount, dec!(180.00));
        assert_eq!(result.total_gst, dec!(32.40));
        assert_eq!(result.final_total, dec!(212.40));
        assert_eq!(result.mode, GstMode::Exclusive);
    }

    #[test]
    fn test_zero_rate_line() {
        let result = line(dec!(50), 3, dec!(0), dec!(0), GstMode::Exclusive);

        assert_eq!(result.cgst_amount.to_string(), "0.00");
        assert_eq!(result.sgst_amount.to_string(), "0.00");
        assert_eq!(result.total_gst.to_string(), "0.00");
        assert_eq!(result.cgst_rate.to_string(), "0.00");
        assert_eq!(result.final_total.to_string(), "150.00");
    }

    #[test]
    fn test_all_amounts_have_two_places() {
        let result = line(dec!(10), 1, dec!(5), dec!(0), GstMode::Exclusive);
        for amount in [
            result.unit_price_base,
            result.line_base_total,
            result.discount_amount,
            result.taxable_amount,
            result.cgst_rate,
            result.sgst_rate,
            result.cgst_amount,
            result.sgst_amount,
            result.total_gst,
            result.final_total,
            result.gst_rate,
        ] {
            assert_eq!(amount.scale(), 2, "{} should have scale 2", amount);
        }
    }

    // -------------------------------------------------------------------------
    // Rounding order
    // -------------------------------------------------------------------------

    #[test]
    fn test_base_price_rounded_before_quantity() {
        // 100 ÷ 1.18 = 84.7457… → 84.75, then × 3 = 254.25.
        // Full precision would give 254.237… → 254.24.
        let result = line(dec!(100), 3, dec!(18), dec!(0), GstMode::Inclusive);
        assert_eq!(result.unit_price_base, dec!(84.75));
        assert_eq!(result.line_base_total, dec!(254.25));
    }

    #[test]
    fn test_each_half_rounded_separately() {
        // taxable 0.33 at 5%: each half = 0.33 × 2.5 / 100 = 0.00825 → 0.01
        // A single 5% computation would be 0.0165 → 0.02 as well, but split
        // rounding must give cgst == sgst exactly.
        let result = line(dec!(0.33), 1, dec!(5), dec!(0), GstMode::Exclusive);
        assert_eq!(result.cgst_amount, dec!(0.01));
        assert_eq!(result.sgst_amount, dec!(0.01));
        assert_eq!(result.total_gst, dec!(0.02));

        // taxable 1.00 at 1%: each half = 0.005 → 0.01 (half-up)
        let result = line(dec!(1), 1, dec!(1), dec!(0), GstMode::Exclusive);
        assert_eq!(result.cgst_amount, dec!(0.01));
        assert_eq!(result.total_gst, dec!(0.02));
    }

    #[test]
    fn test_discount_rounded_half_up() {
        // 10.05 × 5% = 0.5025 → 0.50; 10.10 × 5% = 0.505 → 0.51
        let result = line(dec!(10.05), 1, dec!(0), dec!(5), GstMode::Exclusive);
        assert_eq!(result.discount_amount, dec!(0.50));
        let result = line(dec!(10.10), 1, dec!(0), dec!(5), GstMode::Exclusive);
        assert_eq!(result.discount_amount, dec!(0.51));
        assert_eq!(result.taxable_amount, dec!(9.59));
    }

    #[test]
    fn test_exclusive_price_is_quantized() {
        let result = line(dec!(19.999), 1, dec!(12), dec!(0), GstMode::Exclusive);
        assert_eq!(result.unit_price_base, dec!(20.00));
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    #[test]
    fn test_reconciliation_invariant() {
        let prices = [dec!(0.01), dec!(1.99), dec!(99.99), dec!(118), dec!(1234.567)];
        let rates = [dec!(0), dec!(5), dec!(12), dec!(18), dec!(28), dec!(3.5)];
        let discounts = [dec!(0), dec!(7.5), dec!(33.33)];

        for price in prices {
            for rate in rates {
                for discount in discounts {
                    for mode in [GstMode::Inclusive, GstMode::Exclusive] {
                        for qty in [1, 3, 17] {
                            let r = line(price, qty, rate, discount, mode);
                            assert_eq!(
                                r.final_total,
                                r.taxable_amount + r.cgst_amount + r.sgst_amount,
                                "price={} rate={} discount={} mode={} qty={}",
                                price, rate, discount, mode, qty
                            );
                            assert_eq!(r.cgst_amount, r.sgst_amount);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let a = line(dec!(99.99), 7, dec!(28), dec!(12.5), GstMode::Inclusive);
        let b = line(dec!(99.99), 7, dec!(28), dec!(12.5), GstMode::Inclusive);
        assert_eq!(a, b);
    }

    #[test]
    fn test_inclusive_exclusive_duality() {
        for (base, rate) in [(dec!(100), dec!(18)), (dec!(49.99), dec!(12)), (dec!(7.35), dec!(5))] {
            let exclusive = line(base, 4, rate, dec!(0), GstMode::Exclusive);
            let inclusive_price = quantize(base * (Decimal::ONE + rate / ONE_HUNDRED));
            let inclusive = line(inclusive_price, 4, rate, dec!(0), GstMode::Inclusive);

            let diff = (exclusive.final_total - inclusive.final_total).abs();
            assert!(diff <= dec!(0.01), "diff {} too large for base {}", diff, base);
            assert_eq!(inclusive.unit_price_base, exclusive.unit_price_base);
        }
    }

    #[test]
    fn test_zero_rate_short_circuit() {
        for mode in [GstMode::Inclusive, GstMode::Exclusive] {
            let r = line(dec!(333.33), 9, dec!(0), dec!(15), mode);
            assert!(r.cgst_amount.is_zero());
            assert!(r.sgst_amount.is_zero());
            assert!(r.total_gst.is_zero());
            assert_eq!(r.final_total, r.taxable_amount);
        }
    }

    // -------------------------------------------------------------------------
    // Caller-precondition edge cases
    // -------------------------------------------------------------------------

    #[test]
    fn test_negative_discount_is_not_clamped() {
        let r = line(dec!(100), 1, dec!(18), dec!(-10), GstMode::Exclusive);
        assert_eq!(r.discount_amount, dec!(-10.00));
        assert_eq!(r.taxable_amount, dec!(110.00));
    }

    #[test]
    fn test_inclusive_minus_hundred_percent_is_invalid_argument() {
        let err = calc_line(dec!(100), 1, dec!(-100), dec!(0), GstMode::Inclusive).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
    }

    #[test]
    fn test_overflow_is_invalid_argument() {
        let price = dec!(500000000000000000000000000);
        let err = calc_line(price, 1000, dec!(18), dec!(0), GstMode::Exclusive).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { ref field, .. } if field == "line_base_total"));
    }

    #[test]
    fn test_price_without_room_for_cents_is_invalid_argument() {
        let price = dec!(50000000000000000000000000000);
        let err = calc_line(price, 1, dec!(0), dec!(0), GstMode::Exclusive).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { ref field, .. } if field == "unit_price"));

        let err = calc_line(Decimal::MAX, 2, dec!(18), dec!(0), GstMode::Inclusive).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
    }

    #[test]
    fn test_base_from_inclusive_zero_rate() {
        let base = base_from_inclusive_unit_price(dec!(118.005), dec!(0)).unwrap();
        assert_eq!(base, dec!(118.01));
    }

    // -------------------------------------------------------------------------
    // Aggregation
    // -------------------------------------------------------------------------

    #[test]
    fn test_gst_summary_groups_by_rate() {
        let a = line(dec!(100), 2, dec!(18), dec!(10), GstMode::Exclusive);
        let b = line(dec!(118), 2, dec!(18), dec!(10), GstMode::Inclusive);
        let c = line(dec!(40), 5, dec!(5), dec!(0), GstMode::Exclusive);

        let summary = generate_gst_summary(&[a.clone(), b.clone(), c.clone()]).unwrap();

        assert_eq!(summary.len(), 2);
        let eighteen = &summary["18.00"];
        assert_eq!(eighteen.taxable_amount, dec!(360.00));
        assert_eq!(eighteen.cgst_amount, dec!(32.40));
        assert_eq!(eighteen.total_gst, dec!(64.80));
        assert_eq!(eighteen.final_total, a.final_total + b.final_total);

        let five = &summary["5.00"];
        assert_eq!(five.taxable_amount, c.taxable_amount);
        assert_eq!(five.final_total, c.final_total);
    }

    #[test]
    fn test_gst_summary_merges_equal_rates() {
        let mut a = line(dec!(10), 1, dec!(12), dec!(0), GstMode::Exclusive);
        a.gst_rate = dec!(12);
        let b = line(dec!(20), 1, dec!(12.00), dec!(0), GstMode::Exclusive);

        let summary = generate_gst_summary(&[a, b]).unwrap();
        assert_eq!(summary.keys().collect::<Vec<_>>(), vec!["12.00"]);
        assert_eq!(summary["12.00"].taxable_amount, dec!(30.00));
    }

    #[test]
    fn test_gst_summary_order_independent() {
        let lines = vec![
            line(dec!(10), 1, dec!(18), dec!(0), GstMode::Exclusive),
            line(dec!(20), 2, dec!(5), dec!(0), GstMode::Exclusive),
            line(dec!(30), 3, dec!(18), dec!(5), GstMode::Inclusive),
        ];
        let mut reversed = lines.clone();
        reversed.reverse();

        assert_eq!(
            generate_gst_summary(&lines).unwrap(),
            generate_gst_summary(&reversed).unwrap()
        );
        assert!(generate_gst_summary(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_bill_totals() {
        let lines = vec![
            line(dec!(118), 2, dec!(18), dec!(10), GstMode::Inclusive),
            line(dec!(100), 2, dec!(18), dec!(10), GstMode::Exclusive),
            line(dec!(50), 3, dec!(0), dec!(0), GstMode::Exclusive),
        ];

        let totals = calculate_bill_totals(&lines).unwrap();
        assert_eq!(totals.taxable_amount, dec!(510.00));
        assert_eq!(totals.cgst_amount, dec!(32.40));
        assert_eq!(totals.sgst_amount, dec!(32.40));
        assert_eq!(totals.total_gst, dec!(64.80));
        assert_eq!(totals.final_total, dec!(574.80));

        let sum: Decimal = lines.iter().map(|l| l.final_total).sum();
        assert_eq!(totals.final_total, quantize(sum));
    }

    #[test]
    fn test_bill_totals_empty() {
        let totals = calculate_bill_totals(&[]).unwrap();
        assert_eq!(totals.final_total.to_string(), "0.00");
        assert_eq!(totals.taxable_amount.to_string(), "0.00");
        assert_eq!(totals.total_gst.to_string(), "0.00");
    }

    #[test]
    fn test_aggregation_overflow_is_invalid_argument() {
        // Each line fits; their sum no longer has room for two places.
        let big = line(dec!(500000000000000000000000000), 1, dec!(0), dec!(0), GstMode::Exclusive);
        assert_eq!(big.final_total.scale(), 2);
        let lines = vec![big.clone(), big];

        let err = calculate_bill_totals(&lines).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));

        let err = generate_gst_summary(&lines).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
    }

    #[test]
    fn test_standard_rates_constant() {
        let rendered: Vec<String> = STANDARD_GST_RATES.iter().map(|r| r.to_string()).collect();
        assert_eq!(rendered, vec!["0", "5", "12", "18", "28"]);
    }
}
