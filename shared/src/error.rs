//! Failure taxonomy shared by every transport and every screen.

use std::time::Duration;

use thiserror::Error;

use crate::{moderation::ActionKind, resource::ResourceKind};

/// Everything that can go wrong between the admin client and the backend.
///
/// Values are `Clone + Eq` so they can sit inside UI state and be asserted on
/// in tests. An empty page is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, TLS, connection
    /// reset, CORS, ...).
    #[error("network error: {0}")]
    Transport(String),
    /// The backend answered with a non-2xx status.
    #[error("server responded with HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server supplied message, or the raw body when none was found.
        message: String,
    },
    /// A 2xx response whose body could not be understood.
    #[error("unexpected response payload: {0}")]
    Decode(String),
    /// The client-side deadline elapsed before the backend answered.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    /// A mutating action was invoked without an item id.
    #[error("resource id must not be empty")]
    EmptyId,
    /// The backend exposes no endpoint for this action on this resource.
    #[error("{action} is not supported for {kind}")]
    Unsupported {
        /// Resource type the action targeted.
        kind: ResourceKind,
        /// Rejected action.
        action: ActionKind,
    },
    /// The backend has no single-record endpoint for this resource.
    #[error("{0} has no single-record endpoint")]
    NoDetailEndpoint(ResourceKind),
}

impl ApiError {
    /// Build a [`ApiError::Status`] from a response body, preferring the
    /// `message`/`error` field of a JSON body over the raw text.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["message", "error"]
                    .iter()
                    .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
            })
            .unwrap_or_else(|| truncate(body.trim(), 200));
        ApiError::Status {
            status,
            message,
        }
    }

    /// Reject a 2xx mutation body that carries `"success": false`.
    ///
    /// Anything else, including an empty or non-JSON body, counts as success.
    pub fn check_success_flag(payload: &serde_json::Value) -> Result<(), ApiError> {
        if payload.get("success").and_then(|v| v.as_bool()) != Some(false) {
            return Ok(());
        }
        let message = payload
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("request was not successful")
            .to_string();
        Err(ApiError::Status {
            status: 200,
            message,
        })
    }

    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) | ApiError::Timeout(_) => true,
            ApiError::Status {
                status, ..
            } => *status >= 500,
            _ => false,
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_prefers_json_message() {
        let err = ApiError::from_status_body(404, r#"{"success":false,"message":"Performer not found"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                message: "Performer not found".to_string(),
            }
        );
    }

    #[test]
    fn status_body_falls_back_to_raw_text() {
        let err = ApiError::from_status_body(502, "  Bad Gateway \n");
        assert_eq!(err.to_string(), "server responded with HTTP 502: Bad Gateway");
        assert!(err.is_transient());
    }

    #[test]
    fn success_flag_only_fails_on_explicit_false() {
        assert!(ApiError::check_success_flag(&serde_json::json!({"success": true})).is_ok());
        assert!(ApiError::check_success_flag(&serde_json::Value::Null).is_ok());
        let err = ApiError::check_success_flag(&serde_json::json!({"success": false}))
            .expect_err("flagged");
        assert_eq!(err.to_string(), "server responded with HTTP 200: request was not successful");
    }

    #[test]
    fn client_errors_are_not_transient() {
        assert!(!ApiError::from_status_body(400, "nope").is_transient());
        assert!(!ApiError::EmptyId.is_transient());
        assert!(ApiError::Timeout(Duration::from_secs(20)).is_transient());
    }
}
