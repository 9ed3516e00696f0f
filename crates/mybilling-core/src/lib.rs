//! # mybilling-core: GST Engine for MyBilling
//!
//! This crate holds the billing arithmetic every MyBilling screen and report
//! depends on: GST line calculation, rate-wise summaries, bill totals, draft
//! bill previews, payment settlement and customer ledger posting.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       MyBilling Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Bill screen / API clients / gst-preview CLI          │   │
//! │  │   Add item ──► Live preview ──► Save bill ──► Record payment    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (decimals as strings)             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ mybilling-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐           │   │
//! │  │   │  money  │  │   gst   │  │ preview │  │ ledger  │           │   │
//! │  │   │quantize │  │calc_line│  │ preview │  │ settle  │           │   │
//! │  │   │ display │  │ summary │  │  _bill  │  │  post   │           │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └─────────┘           │   │
//! │  │   ┌─────────┐  ┌──────────┐  ┌─────────┐                        │   │
//! │  │   │  types  │  │validation│  │  error  │                        │   │
//! │  │   └─────────┘  └──────────┘  └─────────┘                        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Persistence (bills, bill items, ledger rows)           │   │
//! │  │             owned by the caller, never by this crate            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`gst`] - Line calculation, rate-wise summary, bill totals
//! - [`money`] - Quantization, parsing and display of decimal amounts
//! - [`types`] - Line inputs/results, summaries, totals
//! - [`validation`] - GST slab and input checks
//! - [`preview`] - Whole-bill preview with per-item warnings
//! - [`ledger`] - Payment settlement and customer ledger posting
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; no clock, no ids, no I/O
//! 2. **Decimal Money**: every amount is a `rust_decimal::Decimal`, never `f64`
//! 3. **Round Every Step**: each intermediate is quantized to 2 places, half-up
//! 4. **Explicit Errors**: bad numbers are `CoreError::InvalidArgument`, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use mybilling_core::{calc_line, calculate_bill_totals, generate_gst_summary, GstMode};
//! use rust_decimal::Decimal;
//!
//! // 2 × ₹118 MRP (GST-inclusive) at 18%, 10% discount
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
//!
//! let lines = vec![line];
//! assert!(generate_gst_summary(&lines).unwrap().contains_key("18.00"));
//! assert_eq!(calculate_bill_totals(&lines).unwrap().final_total.to_string(), "212.40");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gst;
pub mod ledger;
pub mod money;
pub mod preview;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mybilling_core::calc_line` instead of
// `use mybilling_core::gst::calc_line`

pub use error::{CoreError, CoreResult, PreviewError, ValidationError};
pub use gst::{
    base_from_inclusive_unit_price, calc_line, calculate_bill_totals, generate_gst_summary,
    STANDARD_GST_RATES,
};
pub use types::*;
pub use validation::validate_gst_rate;
