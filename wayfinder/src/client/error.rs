//! Client error types.

/// Errors from the place search and routing clients.
///
/// Cloneable so that a failure can be held inside session state and handed
/// to the subscriber.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, DNS, TLS, ...)
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by the API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The background task running the request panicked or was cancelled
    #[error("request task failed: {message}")]
    TaskFailed { message: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Http {
                message: err.to_string(),
            }
        }
    }
}
