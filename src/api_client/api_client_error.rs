use crate::http_client::error::Error;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiClientError {
    #[error(transparent)]
    Transport(#[from] Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to encode the request body: {0}")]
    Encode(String),

    #[error("Failed to decode the response body: {0}")]
    Decode(String),

    /// Free-form failure for clients that do not speak HTTP status codes.
    #[error("{0}")]
    Rejected(String),
}
