use reqwest::StatusCode;
use thiserror::Error;

/// Failures of calls issued through a [`crate::http::ClientHandle`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request path: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("API returned status {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("no country name provided")]
    EmptyQuery,
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            _ => None,
        }
    }
}
