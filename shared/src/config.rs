//! Connection settings shared by the browser and the command line clients.

use std::time::Duration;

/// Client-side deadline for every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default API base for local development.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Where the backend lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme + host (+ optional path prefix), without a trailing slash.
    pub base_url: String,
    /// Bearer token; requests go out unauthenticated without one.
    pub token: Option<String>,
    /// Per-request deadline.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Settings for `base_url` with no token and [`DEFAULT_TIMEOUT`].
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Attach a bearer token. Blank tokens are treated as absent.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    /// Override the per-request deadline. Zero is replaced by the default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            timeout
        };
        self
    }

    /// Absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `Authorization` header value, when a token is configured.
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = ClientConfig::new("https://api.example.com/ ");
        assert_eq!(
            config.endpoint("/api/admin/venue/get-all-venues"),
            "https://api.example.com/api/admin/venue/get-all-venues"
        );
    }

    #[test]
    fn blank_token_is_absent() {
        let config = ClientConfig::default().with_token(Some("  ".into()));
        assert_eq!(config.authorization(), None);
        let config = config.with_token(Some("abc".into()));
        assert_eq!(config.authorization().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn zero_timeout_falls_back() {
        let config = ClientConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
