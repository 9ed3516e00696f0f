//! Error types for gst-preview.

use mybilling_core::PreviewError;
use thiserror::Error;

/// Result type alias for gst-preview.
pub type AppResult<T> = Result<T, AppError>;

/// Everything that can stop a preview run.
#[derive(Debug, Error)]
pub enum AppError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A config value is present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Bad command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// The bill input could not be read.
    #[error("Failed to read input: {0}")]
    InputReadFailed(String),

    /// The bill input is not a valid preview request.
    #[error("Invalid JSON input: {0}")]
    InvalidInput(String),

    /// The result could not be written to stdout.
    #[error("Failed to write output: {0}")]
    OutputFailed(String),

    // =========================================================================
    // Preview Errors
    // =========================================================================
    #[error(transparent)]
    Preview(#[from] PreviewError),
}

impl AppError {
    /// Per-item messages, when the error carries any.
    pub fn item_errors(&self) -> Option<&[String]> {
        match self {
            AppError::Preview(PreviewError::AllItemsRejected { errors }) => Some(errors),
            _ => None,
        }
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigLoadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_error_is_transparent() {
        let err: AppError = PreviewError::NoItems.into();
        assert_eq!(err.to_string(), "No items provided for calculation");
        assert!(err.item_errors().is_none());
    }

    #[test]
    fn test_item_errors() {
        let err: AppError = PreviewError::AllItemsRejected {
            errors: vec!["Item 1: Invalid quantity".to_string()],
        }
        .into();
        assert_eq!(err.item_errors().map(|e| e.len()), Some(1));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = json_err.into();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
