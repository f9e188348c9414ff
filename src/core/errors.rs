//! Error types for the wirekey-rs library.
//!
//! Matching itself never fails: an unknown key is reported through the
//! [`NOT_FOUND`](crate::matcher::automaton::NOT_FOUND) sentinel, which is a
//! valid outcome rather than an error. The error type here covers the
//! construction-side surface (configuration parsing and descriptor
//! registration) where misuse is detectable up front.

use thiserror::Error;

/// Main result type for wirekey operations.
pub type Result<T> = std::result::Result<T, WirekeyError>;

/// Error type for construction-side wirekey operations.
#[derive(Error, Debug)]
pub enum WirekeyError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Type descriptor registration errors
    #[error("Descriptor error for type '{type_name}': {message}")]
    Descriptor {
        /// Name of the offending type descriptor
        type_name: String,
        /// Error description
        message: String,
    },

    /// Serialization/deserialization errors from config loading
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data format being parsed
        format: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
        /// Additional context
        context: Option<String>,
    },
}

impl WirekeyError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new descriptor error
    pub fn descriptor(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Descriptor {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: None,
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let Self::Internal { context: ctx, .. } = &mut self {
            *ctx = Some(context.into());
        }
        self
    }
}

impl From<serde_json::Error> for WirekeyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON parsing failed: {err}"),
            format: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for WirekeyError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML parsing failed: {err}"),
            format: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<WirekeyError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}
