//! Typed error handling for the restaurant service
//!
//! Handlers and services return [`RestaurantError`], which knows its HTTP
//! status, a stable error code and the JSON body sent to clients.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a record or a relation it points to could not be resolved
//! - [`ValidationError`]: the request carried malformed or missing fields
//! - [`StorageError`]: the document store itself failed
//! - [`RequestError`]: transport-level problems (auth, deadline)
//! - [`ConfigError`]: configuration could not be loaded
//!
//! # Example
//!
//! ```rust,ignore
//! use restaurant::core::error::{EntityError, RestaurantError};
//!
//! let food = stores.foods.get(&id).await.map_err(StorageError::from_store)?
//!     .ok_or_else(|| EntityError::not_found("food", &id))?;
//!
//! match result {
//!     Err(RestaurantError::Entity(EntityError::NotFound { id, .. })) => { /* 404 */ }
//!     Err(e) => eprintln!("{}", e),
//!     Ok(_) => {}
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The main error type of the service
#[derive(Debug, thiserror::Error)]
pub enum RestaurantError {
    /// Entity lookups and relations
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Input validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Document store failures
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// HTTP/request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RestaurantError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestaurantError::Entity(e) => e.status_code(),
            RestaurantError::Validation(_) => StatusCode::BAD_REQUEST,
            RestaurantError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestaurantError::Request(e) => e.status_code(),
            RestaurantError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RestaurantError::Entity(e) => e.error_code(),
            RestaurantError::Validation(_) => "VALIDATION_ERROR",
            RestaurantError::Storage(_) => "STORAGE_ERROR",
            RestaurantError::Request(e) => e.error_code(),
            RestaurantError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Storage failures are reported generically; their cause stays in the logs.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            RestaurantError::Storage(_) => "internal storage failure".to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RestaurantError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({ "entity_type": entity_type, "id": id }))
            }
            RestaurantError::Entity(EntityError::MissingRelation { relation, id }) => {
                Some(serde_json::json!({ "relation": relation, "id": id }))
            }
            RestaurantError::Validation(ValidationError::FieldError { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            RestaurantError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            RestaurantError::Validation(ValidationError::BatchItem { index, field, .. }) => {
                Some(serde_json::json!({ "index": index, "field": field }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for RestaurantError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// The addressed record does not exist
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// A record referenced by the request (order, table, menu, order items)
    /// could not be resolved
    #[error("{relation} '{id}' was not found")]
    MissingRelation { relation: String, id: String },
}

impl EntityError {
    pub fn not_found(entity_type: &str, id: &str) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn missing_relation(relation: &str, id: &str) -> Self {
        EntityError::MissingRelation {
            relation: relation.to_string(),
            id: id.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::MissingRelation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::MissingRelation { .. } => "RELATION_NOT_FOUND",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// One item of a multi-item batch is invalid; the whole batch is rejected
    #[error("order_items[{index}].{field}: {message}")]
    BatchItem {
        index: usize,
        field: String,
        message: String,
    },

    /// Invalid JSON body
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Name of the first offending field, if the error carries one
    pub fn first_field(&self) -> Option<&str> {
        match self {
            ValidationError::FieldError { field, .. } => Some(field),
            ValidationError::FieldErrors(errors) => errors.first().map(|e| e.field.as_str()),
            ValidationError::BatchItem { field, .. } => Some(field),
            ValidationError::InvalidJson { .. } => None,
        }
    }

    /// Re-scope a payload error to the position of the item inside a batch
    pub fn in_batch(self, index: usize) -> Self {
        match self {
            ValidationError::FieldError { field, message } => ValidationError::BatchItem {
                index,
                field,
                message,
            },
            ValidationError::FieldErrors(mut errors) if !errors.is_empty() => {
                let first = errors.remove(0);
                ValidationError::BatchItem {
                    index,
                    field: first.field,
                    message: first.message,
                }
            }
            other => other,
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for RestaurantError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RestaurantError::Validation(errors.into())
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by the document store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// A store operation failed
    #[error("{operation} on '{collection}' failed: {message}")]
    QueryError {
        collection: String,
        operation: String,
        message: String,
    },
}

impl StorageError {
    /// Wrap an adapter failure for the given collection and operation
    pub fn query(collection: &str, operation: &str, err: anyhow::Error) -> Self {
        StorageError::QueryError {
            collection: collection.to_string(),
            operation: operation.to_string(),
            message: format!("{:#}", err),
        }
    }
}

/// Attach the collection and operation to a failed store call
pub trait StoreResultExt<T> {
    fn in_store(self, collection: &str, operation: &str) -> Result<T, StorageError>;
}

impl<T> StoreResultExt<T> for anyhow::Result<T> {
    fn in_store(self, collection: &str, operation: &str) -> Result<T, StorageError> {
        self.map_err(|err| StorageError::query(collection, operation, err))
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Missing or rejected credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The per-request deadline elapsed
    #[error("Request exceeded its {seconds}s deadline")]
    Timeout { seconds: u64 },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::Timeout { .. } => "REQUEST_TIMEOUT",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for RestaurantError {
    fn from(err: serde_json::Error) -> Self {
        RestaurantError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for service operations
pub type RestaurantResult<T> = Result<T, RestaurantError>;
