//! # Error Types
//!
//! Domain-specific error types for mybilling-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mybilling-core errors (this file)                                     │
//! │  ├── CoreError        - Engine failures (invalid arguments)            │
//! │  ├── ValidationError  - Caller-side input checks                       │
//! │  └── PreviewError     - Whole-bill preview rejections                  │
//! │                                                                         │
//! │  gst-preview errors (app)                                              │
//! │  └── AppError         - Config, I/O, JSON, and preview failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PreviewError → AppError → stdout  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in the message
//! 3. Business-rule checks (e.g. "rate not standard") are booleans, not errors

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the GST engine.
///
/// The engine has exactly one failure mode: an argument it cannot turn into
/// a decimal (or integer) value, or arithmetic that leaves the decimal range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A numeric input could not be parsed or used.
    ///
    /// ## When This Occurs
    /// - `price = "abc"`, `qty = "2.5"`, `mode = "HALF"`
    /// - An inclusive price with `gst_rate = -100` (divisor becomes zero)
    /// - Products or quotients beyond the 28-digit decimal range
    #[error("Invalid argument for {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidArgument`].
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used by callers (preview, apps) for checks the engine itself leaves to
/// them: quantity positivity and percentage ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Preview Error
// =============================================================================

/// Reasons a whole bill preview is rejected.
///
/// Individual bad items never reject the bill on their own; they are
/// reported as warnings alongside the items that did calculate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    /// The request carried no line items.
    #[error("No items provided for calculation")]
    NoItems,

    /// Every line item was rejected.
    #[error("All {} items were rejected", .errors.len())]
    AllItemsRejected { errors: Vec<String> },

    /// The accepted lines could not be summed.
    #[error("Bill totals could not be calculated: {0}")]
    Totals(CoreError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
