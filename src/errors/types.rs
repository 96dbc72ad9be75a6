//! # Error Types
//!
//! Crate-level error types for gwvalidate using `thiserror`.
//!
//! These errors cover the boundaries of the engine: loading settings,
//! reading and decoding configuration documents, and turning a non-empty
//! violation list into a failure. The validators themselves never return
//! them; they accumulate [`crate::validation::ErrorList`] values instead.

/// Custom result type for gwvalidate operations
pub type Result<T> = std::result::Result<T, GwValidateError>;

/// Main error type for gwvalidate
#[derive(thiserror::Error, Debug)]
pub enum GwValidateError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Document decoding errors (JSON or YAML)
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        context: String,
    },

    /// A document was decoded but failed semantic validation
    #[error("Validation error: {message}")]
    Validation { message: String, violations: usize },

    /// Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GwValidateError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Create an I/O error with context
    pub fn io<S: Into<String>>(source: std::io::Error, context: S) -> Self {
        Self::Io { source, context: context.into() }
    }

    /// Create a decoding error with context
    pub fn serialization<S: Into<String>>(
        source: Box<dyn std::error::Error + Send + Sync>,
        context: S,
    ) -> Self {
        Self::Serialization { source, context: context.into() }
    }

    /// Create a validation failure summarising `violations` field errors
    pub fn validation<S: Into<String>>(message: S, violations: usize) -> Self {
        Self::Validation { message: message.into(), violations }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Add context to an error
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        let context = context.into();
        match &mut self {
            GwValidateError::Io { context: ctx, .. }
            | GwValidateError::Serialization { context: ctx, .. } => {
                *ctx = format!("{}: {}", context, ctx);
            }
            GwValidateError::Config { message, .. }
            | GwValidateError::Validation { message, .. }
            | GwValidateError::Internal { message } => {
                *message = format!("{}: {}", context, message);
            }
        }
        self
    }

    /// Process exit code the CLI should use for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GwValidateError::Validation { .. } => 1,
            GwValidateError::Serialization { .. } => 3,
            GwValidateError::Config { .. } | GwValidateError::Io { .. } => 2,
            GwValidateError::Internal { .. } => 70,
        }
    }
}

impl From<std::io::Error> for GwValidateError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error, "I/O operation failed")
    }
}

impl From<serde_json::Error> for GwValidateError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(Box::new(error), "JSON decoding failed")
    }
}

impl From<serde_yaml::Error> for GwValidateError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization(Box::new(error), "YAML decoding failed")
    }
}

impl From<config::ConfigError> for GwValidateError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for GwValidateError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string()))
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::config(format!("Invalid settings: {}", message))
    }
}
