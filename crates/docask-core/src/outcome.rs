//! Ok/Fail normalization for backend calls.
//!
//! The backend signals failure three ways, inconsistently across versions:
//! the transport rejects outright, the response carries a non-2xx status
//! whose body may contain `{error}`, or a success status arrives with an
//! `{error}` body anyway. All three collapse into one [`ApiFailure`] here
//! so orchestrators have a single failure path and never branch on where a
//! failure came from.

use serde::de::DeserializeOwned;
use shared_types::ErrorBody;
use thiserror::Error;

/// Normalized failure for any backend call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiFailure {
    /// Human-readable message, shown to the user as-is.
    pub message: String,
    /// HTTP status, absent for transport-level failures.
    pub status: Option<u16>,
}

pub type ApiResult<T> = Result<T, ApiFailure>;

impl ApiFailure {
    /// Failure before any response arrived (network unreachable, request
    /// construction error).
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.is_empty() {
                "Network request failed".to_string()
            } else {
                message
            },
            status: None,
        }
    }

    /// Failure signalled by a non-2xx status. The message comes from the
    /// body's `error` field when present, else a generic fallback.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = embedded_error(body)
            .unwrap_or_else(|| format!("Request failed (HTTP {})", status));
        Self {
            message,
            status: Some(status),
        }
    }
}

/// Parse a success-status body. A body that still carries `{error}`
/// normalizes to Fail, since some backend versions report failure that way.
pub fn parse_success<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    if let Some(message) = embedded_error(body) {
        return Err(ApiFailure {
            message,
            status: Some(status),
        });
    }
    serde_json::from_str(body)
        .map_err(|e| ApiFailure::transport(format!("Unexpected response shape: {}", e)))
}

/// The `error` field of the body, if the body is an object carrying a
/// non-empty one.
fn embedded_error(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .error
        .filter(|m| !m.is_empty())
}
