//! # Configuration Settings
//!
//! Defines the settings structure for gwvalidate.

use crate::errors::{GwValidateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Logging configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,

    /// Document checking configuration
    #[validate(nested)]
    pub check: CheckConfig,
}

impl Settings {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(GwValidateError::from)?;
        self.validate_custom()
    }

    /// Checks the validator derive cannot express
    fn validate_custom(&self) -> Result<()> {
        tracing_subscriber::EnvFilter::try_new(&self.observability.log_level).map_err(|e| {
            GwValidateError::config_with_source(
                format!("Invalid log level '{}'", self.observability.log_level),
                Box::new(e),
            )
        })?;
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "warn".to_string(), json_logging: false }
    }
}

/// Document checking configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct CheckConfig {
    /// Namespace assumed for documents that do not carry one
    #[validate(length(
        min = 1,
        max = 63,
        message = "Default namespace must be between 1 and 63 characters"
    ))]
    pub default_namespace: String,

    /// Report format
    pub output: OutputFormat,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { default_namespace: "default".to_string(), output: OutputFormat::Text }
    }
}

/// Report format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One violation per line
    #[default]
    Text,
    /// A JSON array of per-document reports
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = GwValidateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(GwValidateError::config(format!(
                "Unsupported output format: '{}'. Use 'text' or 'json'.",
                s
            ))),
        }
    }
}
