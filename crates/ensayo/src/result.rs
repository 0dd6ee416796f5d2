//! Result and error types for Ensayo.

use thiserror::Error;

/// Result type for Ensayo operations
pub type EnsayoResult<T> = Result<T, EnsayoError>;

/// Errors that can occur in Ensayo
#[derive(Debug, Error)]
pub enum EnsayoError {
    /// The model could not produce its empty instance
    #[error("Cannot construct {model}: {message}")]
    Construction {
        /// Model name
        model: String,
        /// Error message
        message: String,
    },

    /// A field could not be written
    #[error("Cannot write {model}.{field}: {message}")]
    FieldAccess {
        /// Model name
        model: String,
        /// Field name
        field: String,
        /// Error message
        message: String,
    },

    /// A `random` field whose type is neither a string nor an integer
    #[error("Random generation is not supported for {model}.{field} of type {declared}")]
    UnsupportedScalar {
        /// Model name
        model: String,
        /// Field name
        field: String,
        /// Declared field type
        declared: String,
    },

    /// Invalid harness configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Log subscriber could not be installed
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EnsayoError {
    /// Construction failure for `model`
    pub fn construction(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Write failure for `model.field`
    pub fn field_access(
        model: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::FieldAccess {
            model: model.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Random generation requested for a type the provider cannot fill
    pub fn unsupported_scalar(
        model: impl Into<String>,
        field: impl Into<String>,
        declared: impl Into<String>,
    ) -> Self {
        Self::UnsupportedScalar {
            model: model.into(),
            field: field.into(),
            declared: declared.into(),
        }
    }

    /// Configuration failure
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error aborted a `generate` call
    #[must_use]
    pub const fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Self::Construction { .. } | Self::FieldAccess { .. } | Self::UnsupportedScalar { .. }
        )
    }
}
