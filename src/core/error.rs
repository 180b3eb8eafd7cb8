//! Typed error handling for the storefront API
//!
//! Every error that can leave a handler is a [`StorefrontError`]. Each
//! category knows its HTTP status and its stable machine-readable code, and
//! all of them render through the same [`ErrorResponse`] wire shape:
//!
//! ```json
//! { "error": "Validation failed", "code": "VALIDATION_ERROR", "details": [...] }
//! ```
//!
//! # Error Categories
//!
//! - [`ValidationError`]: field-level input failures (the only 400 with `details`)
//! - [`RequestError`]: malformed requests that never reach validation
//! - [`AddressError`]: address book lookups
//! - [`ConfigError`]: rule set and server configuration problems
//! - [`StorageError`]: store backend faults

use crate::core::validation::ValidationFailure;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The main error type for the storefront API
#[derive(Debug)]
pub enum StorefrontError {
    /// Payload failed its rule set
    Validation(ValidationError),

    /// Request could not be interpreted
    Request(RequestError),

    /// Address book errors
    Address(AddressError),

    /// Configuration errors
    Config(ConfigError),

    /// Storage backend errors
    Storage(StorageError),

    /// Programming defects (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for StorefrontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorefrontError::Validation(e) => write!(f, "{}", e),
            StorefrontError::Request(e) => write!(f, "{}", e),
            StorefrontError::Address(e) => write!(f, "{}", e),
            StorefrontError::Config(e) => write!(f, "{}", e),
            StorefrontError::Storage(e) => write!(f, "{}", e),
            StorefrontError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for StorefrontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorefrontError::Validation(e) => Some(e),
            StorefrontError::Request(e) => Some(e),
            StorefrontError::Address(e) => Some(e),
            StorefrontError::Config(e) => Some(e),
            StorefrontError::Storage(e) => Some(e),
            StorefrontError::Internal(_) => None,
        }
    }
}

/// Wire-level error body
///
/// Field order and names are part of the client contract; mobile clients read
/// `details[].field` to highlight form inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable summary
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Field failures, only present for validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationFailure>>,
}

impl StorefrontError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorefrontError::Validation(_) => StatusCode::BAD_REQUEST,
            StorefrontError::Request(e) => e.status_code(),
            StorefrontError::Address(e) => e.status_code(),
            StorefrontError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StorefrontError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StorefrontError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            StorefrontError::Validation(_) => "VALIDATION_ERROR",
            StorefrontError::Request(e) => e.error_code(),
            StorefrontError::Address(e) => e.error_code(),
            StorefrontError::Config(_) => "CONFIG_ERROR",
            StorefrontError::Storage(_) => "STORAGE_ERROR",
            StorefrontError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            details: match self {
                StorefrontError::Validation(ValidationError::Failed(failures)) => {
                    Some(failures.clone())
                }
                _ => None,
            },
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Input failed the rule set of its operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more field rules were violated, in declaration order
    Failed(Vec<ValidationFailure>),
}

impl ValidationError {
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            ValidationError::Failed(failures) => failures,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Failed(_) => write!(f, "Validation failed"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for StorefrontError {
    fn from(err: ValidationError) -> Self {
        StorefrontError::Validation(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Requests rejected before any rule set runs
#[derive(Debug)]
pub enum RequestError {
    /// Body is not valid JSON
    InvalidJson { message: String },

    /// Path identifier is not a UUID
    InvalidId { id: String },

    /// No rule set is registered under this operation name
    UnknownOperation { operation: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidJson { message } => write!(f, "Invalid JSON: {}", message),
            RequestError::InvalidId { id } => write!(f, "Invalid ID format: '{}'", id),
            RequestError::UnknownOperation { operation } => {
                write!(f, "Unknown operation: {}", operation)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidJson { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            RequestError::UnknownOperation { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidJson { .. } => "INVALID_JSON",
            RequestError::InvalidId { .. } => "INVALID_ID",
            RequestError::UnknownOperation { .. } => "UNKNOWN_OPERATION",
        }
    }
}

impl From<RequestError> for StorefrontError {
    fn from(err: RequestError) -> Self {
        StorefrontError::Request(err)
    }
}

// =============================================================================
// Address Errors
// =============================================================================

#[derive(Debug)]
pub enum AddressError {
    NotFound { id: Uuid },
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::NotFound { id } => write!(f, "Address with id '{}' not found", id),
        }
    }
}

impl std::error::Error for AddressError {}

impl AddressError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AddressError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AddressError::NotFound { .. } => "ADDRESS_NOT_FOUND",
        }
    }
}

impl From<AddressError> for StorefrontError {
    fn from(err: AddressError) -> Self {
        StorefrontError::Address(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or parse a configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// A field rule could not be built
    InvalidRule { field: String, message: String },

    /// A rule set declaration is inconsistent
    InvalidRuleSet { operation: String, message: String },

    /// The same operation was declared twice in one config
    DuplicateOperation { operation: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => match file {
                Some(file) => write!(f, "Failed to parse config '{}': {}", file, message),
                None => write!(f, "Failed to parse config: {}", message),
            },
            ConfigError::InvalidRule { field, message } => {
                write!(f, "Invalid rule for field '{}': {}", field, message)
            }
            ConfigError::InvalidRuleSet { operation, message } => {
                write!(f, "Invalid rule set '{}': {}", operation, message)
            }
            ConfigError::DuplicateOperation { operation } => {
                write!(f, "Operation '{}' is declared more than once", operation)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for StorefrontError {
    fn from(err: ConfigError) -> Self {
        StorefrontError::Config(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by address stores
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to acquire {kind} lock on {store}")]
    LockPoisoned { store: &'static str, kind: &'static str },
}

impl From<StorageError> for StorefrontError {
    fn from(err: StorageError) -> Self {
        StorefrontError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for StorefrontError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StorefrontError>() {
            Ok(e) => e,
            Err(err) => StorefrontError::Internal(err.to_string()),
        }
    }
}
