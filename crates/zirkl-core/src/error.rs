//! Error types for the Zirkl client core.

use thiserror::Error;

/// A shared error type for the whole client core.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every variant maps to one
/// branch of the client's failure taxonomy: remote API failures, local
/// validation, permission denials, storage problems.
#[derive(Error, Debug, Clone)]
pub enum ZirklError {
    /// The remote API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a usable response (connect, timeout, body).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Input rejected before any network call was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A device permission (location, contacts) was denied.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Local persistence error (key-value store layer).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Entity not found error with type information.
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Configuration error (missing env vars, bad base URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ZirklError {
    /// Creates an Api error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Permission error.
    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission(message.into())
    }

    /// Creates a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a NotFound error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Permission error.
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::Permission(_))
    }

    /// True for failures that never left the device (no server state changed).
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Permission(_) | Self::Storage(_) | Self::Config(_)
        )
    }
}

impl From<std::io::Error> for ZirklError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for ZirklError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ZirklError>`.
pub type Result<T> = std::result::Result<T, ZirklError>;
