//! # Preview Configuration
//!
//! Settings for the gst-preview command.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MYBILLING_ALLOW_CUSTOM_RATES=false                                 │
//! │     MYBILLING_DEFAULT_MODE=INCLUSIVE                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/billing/gst-preview.toml (Linux)                         │
//! │     ~/Library/Application Support/com.mybilling.billing/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     custom rates allowed, EXCLUSIVE, ₹, info                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # gst-preview.toml
//! [gst]
//! allow_custom_rates = false   # only 0, 5, 12, 18, 28
//! default_mode = "INCLUSIVE"   # INCLUSIVE | EXCLUSIVE
//!
//! [display]
//! currency_symbol = "₹"
//! pretty = true
//!
//! [log]
//! level = "debug"
//! ```

use std::path::PathBuf;

use mybilling_core::money::DEFAULT_CURRENCY_SYMBOL;
use mybilling_core::preview::PreviewOptions;
use mybilling_core::GstMode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// =============================================================================
// GST Settings
// =============================================================================

/// Tenant GST policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstSettings {
    /// Accept any rate in 0..=100, not just the standard slabs.
    #[serde(default = "default_true")]
    pub allow_custom_rates: bool,

    /// Mode for items that name none.
    #[serde(default)]
    pub default_mode: GstMode,
}

fn default_true() -> bool {
    true
}

impl Default for GstSettings {
    fn default() -> Self {
        GstSettings {
            allow_custom_rates: true,
            default_mode: GstMode::default(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for `--display` amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Pretty-print JSON output.
    #[serde(default)]
    pub pretty: bool,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            pretty: false,
        }
    }
}

// =============================================================================
// Log Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: default_log_level(),
        }
    }
}

// =============================================================================
// Main Preview Configuration
// =============================================================================

/// Complete gst-preview configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default)]
    pub gst: GstSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub log: LogSettings,
}

impl PreviewConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (gst-preview.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let explicit = config_path.is_some();
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading preview config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| AppError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = Self::from_toml(&contents)?;
            } else if explicit {
                return Err(AppError::ConfigLoadFailed(format!(
                    "{}: file not found",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document; missing sections and keys take defaults.
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.display.currency_symbol.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log.level.to_lowercase().as_str()) {
            return Err(AppError::InvalidConfig(format!(
                "Unknown log level: '{}'. Valid options: {}",
                self.log.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Options handed to the preview engine.
    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            allow_custom_rates: self.gst.allow_custom_rates,
            default_mode: self.gst.default_mode,
        }
    }

    /// Applies environment variable overrides.
    ///
    /// An override that is set but unparsable is an error, not a silent
    /// fallback to the file or default value.
    fn apply_env_overrides(&mut self) -> AppResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        // Custom rates
        if let Some(value) = var("MYBILLING_ALLOW_CUSTOM_RATES") {
            self.gst.allow_custom_rates = match value.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(AppError::InvalidConfig(format!(
                        "MYBILLING_ALLOW_CUSTOM_RATES must be true or false, got: '{}'",
                        value
                    )))
                }
            };
            debug!(allow_custom_rates = self.gst.allow_custom_rates, "Overriding custom rates from environment");
        }

        // Default mode
        if let Some(mode) = var("MYBILLING_DEFAULT_MODE") {
            let parsed = mode.parse::<GstMode>().map_err(|_| {
                AppError::InvalidConfig(format!(
                    "MYBILLING_DEFAULT_MODE must be INCLUSIVE or EXCLUSIVE, got: '{}'",
                    mode
                ))
            })?;
            debug!(mode = %parsed, "Overriding default GST mode from environment");
            self.gst.default_mode = parsed;
        }

        // Currency symbol
        if let Some(symbol) = var("MYBILLING_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }

        // Log level
        if let Some(level) = var("MYBILLING_LOG_LEVEL") {
            self.log.level = level;
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "mybilling", "billing")
            .map(|dirs| dirs.config_dir().join("gst-preview.toml"))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = PreviewConfig::default();
        assert!(config.gst.allow_custom_rates);
        assert_eq!(config.gst.default_mode, GstMode::Exclusive);
        assert_eq!(config.display.currency_symbol, "₹");
        assert!(!config.display.pretty);
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let config = PreviewConfig::from_toml(
            r#"
            [gst]
            allow_custom_rates = false
            default_mode = "INCLUSIVE"

            [display]
            pretty = true
            "#,
        )
        .unwrap();

        assert!(!config.gst.allow_custom_rates);
        assert_eq!(config.gst.default_mode, GstMode::Inclusive);
        assert!(config.display.pretty);
        assert_eq!(config.display.currency_symbol, "₹");
        assert_eq!(config.log.level, "info");

        let options = config.preview_options();
        assert!(!options.allow_custom_rates);
        assert_eq!(options.default_mode, GstMode::Inclusive);
    }

    #[test]
    fn test_config_from_bad_toml() {
        let err = PreviewConfig::from_toml("[gst]\ndefault_mode = \"HALF\"").unwrap_err();
        assert!(matches!(err, AppError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_validate() {
        let mut config = PreviewConfig::default();
        config.log.level = "loud".to_string();
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));

        let mut config = PreviewConfig::default();
        config.display.currency_symbol = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = PreviewConfig::default();
        config.log.level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MYBILLING_ALLOW_CUSTOM_RATES", "false"),
            ("MYBILLING_DEFAULT_MODE", "inclusive"),
            ("MYBILLING_CURRENCY_SYMBOL", "Rs. "),
            ("MYBILLING_LOG_LEVEL", "warn"),
        ]
        .into_iter()
        .collect();

        let mut config = PreviewConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert!(!config.gst.allow_custom_rates);
        assert_eq!(config.gst.default_mode, GstMode::Inclusive);
        assert_eq!(config.display.currency_symbol, "Rs. ");
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_unparsable_overrides_are_rejected() {
        let mut config = PreviewConfig::default();
        let err = config
            .apply_overrides(|key| match key {
                "MYBILLING_DEFAULT_MODE" => Some("GROSS".to_string()),
                _ => None,
            })
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(ref msg) if msg.contains("GROSS")));
        assert_eq!(config.gst.default_mode, GstMode::Exclusive);

        let mut config = PreviewConfig::default();
        let err = config
            .apply_overrides(|key| match key {
                "MYBILLING_ALLOW_CUSTOM_RATES" => Some("maybe".to_string()),
                _ => None,
            })
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
        assert!(config.gst.allow_custom_rates);
    }

    #[test]
    fn test_config_mode_is_case_insensitive() {
        let config = PreviewConfig::from_toml("[gst]\ndefault_mode = \"inclusive\"").unwrap();
        assert_eq!(config.gst.default_mode, GstMode::Inclusive);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let err = PreviewConfig::load(Some(PathBuf::from("/nonexistent/gst-preview.toml")))
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigLoadFailed(_)));
    }
}
