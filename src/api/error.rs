//! Error taxonomy for calls against the storefront API.
//!
//! Callers mostly care about one distinction: did the request fail to reach
//! the server at all (`Network`), or did the server answer with a rejection
//! (`Rejected`)? Session restoration retries the former and never the latter.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Transport-level failure: the request never got a server response
    /// (connection refused, DNS failure, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status. `message` carries the
    /// server-provided message when one was present in the body.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The server answered 2xx but the body did not match the expected shape.
    #[error("invalid response from server: {0}")]
    Decode(String),

    /// Rejected locally before any request was issued.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// True for transport failures, the only class the session-restore
    /// retry policy applies to.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Message suitable for showing to the user: the server's own message
    /// when we have one, otherwise the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Extract a user-facing message from an error response body.
///
/// The API returns `{"message": "..."}` on rejections; anything else
/// (HTML error pages, empty bodies) degrades to a status-derived message.
pub(crate) fn rejection_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status))
}
