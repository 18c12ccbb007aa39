//! Feed client error types.

/// Errors from fetching a GBFS feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Network failure, TLS failure, or client construction failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The body was not the JSON document we expected
    #[error("JSON parse error for {url}: {message}")]
    Json { url: String, message: String },
}

impl FeedError {
    /// The upstream status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Status { status, .. } => Some(*status),
            FeedError::Http(e) => e.status().map(|s| s.as_u16()),
            FeedError::Json { .. } => None,
        }
    }
}
