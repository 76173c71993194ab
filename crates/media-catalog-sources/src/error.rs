use media_catalog_models::MediaType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{media_type} {id} not found")]
    NotFound { media_type: MediaType, id: u64 },

    #[error("{0}")]
    Other(String),
}

impl SourceError {
    pub fn new(message: String) -> Self {
        SourceError::Other(message)
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            SourceError::NotFound { .. } => true,
            SourceError::Status { status, .. } => *status == 404,
            _ => false,
        }
    }

    /// Connection-level failure (timeout, refused, DNS) rather than a bad response
    pub fn is_connection(&self) -> bool {
        matches!(self, SourceError::Http { source, .. } if source.is_connect() || source.is_timeout())
    }
}
