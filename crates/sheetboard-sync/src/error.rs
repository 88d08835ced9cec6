use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport failure. Built through `SyncError::transport` so the
    /// request URL, which carries the API key, never reaches the message.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Non-success status from the sheet API. `reason` is the canonical
    /// status text, `body` is kept for logs only.
    #[error("API error: {status} {reason}")]
    Server {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "http")]
impl SyncError {
    pub fn transport(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}
