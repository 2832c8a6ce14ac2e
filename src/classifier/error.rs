use thiserror::Error;

/// Why an item could not be classified
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Please enter an item name")]
    EmptyItem,

    #[error("Failed to build HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {endpoint} timed out after {secs}s")]
    Timeout { endpoint: String, secs: u64 },

    #[error("Inference service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response from inference service: {0}")]
    MalformedResponse(String),
}

impl ClassifyError {
    /// Input was rejected before any request was made
    pub fn is_validation(&self) -> bool {
        matches!(self, ClassifyError::EmptyItem)
    }
}
