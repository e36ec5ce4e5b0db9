//! Error types for the RentFit client

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Main client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request already in progress: {0}")]
    Busy(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Build an error from a non-success backend response
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(first_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string()
            });

        match status {
            StatusCode::BAD_REQUEST => ClientError::Validation {
                message,
                fields: parsed.as_ref().map(field_errors).unwrap_or_default(),
            },
            StatusCode::UNAUTHORIZED => ClientError::Authentication(message),
            StatusCode::FORBIDDEN => ClientError::Authorization(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            _ => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Message reported by the backend, if the error came from one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Validation { message, .. }
            | ClientError::Server { message, .. } => Some(message),
            ClientError::Authentication(msg)
            | ClientError::Authorization(msg)
            | ClientError::NotFound(msg)
            | ClientError::Conflict(msg) => Some(msg),
            _ => None,
        }
    }

    /// Text shown inline next to the action that failed
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Network(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            ClientError::Authentication(_) => {
                "Your session has expired. Please log in again.".to_string()
            }
            ClientError::Busy(_) => "Please wait for the current request to finish.".to_string(),
            ClientError::BadRequest(msg) => msg.clone(),
            other => other
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, ClientError::Authentication(_))
    }
}

/// Pick the first human readable message out of a backend error body.
///
/// Known shapes, in priority order: `{"error": ..}`, `{"non_field_errors": [..]}`,
/// `{"detail": ..}`, `{"message": ..}`, `{"errors": {..}}` and finally the first
/// field-keyed message list.
pub fn first_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        Value::Object(map) => {
            for key in ["error", "non_field_errors", "detail", "message", "errors"] {
                if let Some(found) = map.get(key).and_then(first_message) {
                    return Some(found);
                }
            }
            map.iter()
                .filter(|(key, _)| key.as_str() != "success")
                .find_map(|(_, value)| match value {
                    Value::Array(_) | Value::Object(_) => first_message(value),
                    _ => None,
                })
        }
        _ => None,
    }
}

fn field_errors(body: &Value) -> BTreeMap<String, Vec<String>> {
    let map = match body.get("errors").unwrap_or(body) {
        Value::Object(map) => map,
        _ => return BTreeMap::new(),
    };

    map.iter()
        .filter_map(|(field, value)| {
            let messages: Vec<String> = value
                .as_array()?
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            (!messages.is_empty()).then(|| (field.clone(), messages))
        })
        .collect()
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
