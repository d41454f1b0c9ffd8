use thiserror::Error;

/// Unified error type for all backend operations.
/// Aggregates transport, protocol and decoding failures into the small set of
/// categories callers actually branch on.
#[derive(Debug, Error)]
pub enum Error {
    /// The call did not complete within its timeout budget on the final attempt.
    #[error("Request timed out after {budget_ms} ms")]
    Timeout { budget_ms: u64 },

    /// No response was received: DNS failure, refused connection, dropped link.
    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// The backend rejected the request with a 4xx status. Never retried.
    /// `detail` carries the backend's own message when the body provides one.
    #[error("Backend rejected the request (HTTP {status}): {detail}")]
    Api { status: u16, detail: String },

    /// The backend failed with a 5xx status after all retries were spent.
    #[error("Backend failure (HTTP {status})")]
    Server { status: u16 },

    /// A 2xx response body was not valid JSON for the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local input check failed before any network call was made.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Client construction failed (missing or malformed base URL, bad tunable).
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config {
            message: msg.into(),
        }
    }

    /// Build the 4xx error for `status`, pulling the human-readable detail out
    /// of the response body when one is present.
    pub(crate) fn api_from_body(status: u16, body: &str) -> Self {
        let detail = detail_from_body(body).unwrap_or_else(|| generic_detail(status).to_string());
        Error::Api { status, detail }
    }

    /// Whether another attempt could plausibly change the outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Timeout { .. } | Error::Transport(_) | Error::Server { .. }
        )
    }

    /// HTTP status carried by the error, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::Server { status } => Some(*status),
            _ => None,
        }
    }

    /// Short, actionable text suitable for direct display to an operator.
    pub fn user_message(&self) -> String {
        match self {
            Error::Timeout { .. } => "The request took too long. Try again.".to_string(),
            Error::Transport(_) => {
                "Cannot reach the server. Check your network connection.".to_string()
            }
            Error::Api { detail, .. } => detail.clone(),
            Error::Server { .. } => {
                "The server ran into a problem. Try again in a moment.".to_string()
            }
            Error::Decode(_) => "The server returned an unexpected response.".to_string(),
            Error::Validation { message } | Error::Config { message } => message.clone(),
        }
    }
}

/// Pull a message out of the error shapes the backend is known to produce:
/// `{"detail": "..."}`, `{"detail": [{"msg": "..."}, ...]}` (validation
/// rejections) and `{"error": "..."}` from the global exception handler.
fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail") {
        Some(serde_json::Value::String(s)) => return Some(s.clone()),
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }
    for key in ["error", "message"] {
        if let Some(s) = value.get(key).and_then(|v| v.as_str()) {
            return Some(s.to_string());
        }
    }
    None
}

fn generic_detail(status: u16) -> &'static str {
    match status {
        400 => "invalid input",
        404 => "not found",
        422 => "validation failure",
        _ => "request rejected",
    }
}
