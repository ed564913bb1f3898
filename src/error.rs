use thiserror::Error;

/// A response body returned alongside a failed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchBody {
    Json(serde_json::Value),
    Text(String),
}

/// Errors raised by the external collaborators (graph fetch, global catalog).
///
/// This is the only failure the core hands back to its callers; resolution and
/// persistence problems degrade to empty results instead.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("Request to '{url}' failed: {message}")]
    Transport { url: String, message: String },

    #[error("GET {url} failed with status {status}")]
    Http {
        url: String,
        status: u16,
        body: Option<FetchBody>,
    },

    #[error("Failed to parse graph document from '{url}': {message}")]
    Parse { url: String, message: String },
}

/// Errors reported by a key-value medium backing the prefill store.
#[derive(Error, Debug, Clone)]
pub enum MediumError {
    #[error("Storage medium is unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Failed to read key '{key}': {message}")]
    Read { key: String, message: String },

    #[error("Failed to write key '{key}': {message}")]
    Write { key: String, message: String },
}

impl FetchError {
    /// The HTTP status, when the failure came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
