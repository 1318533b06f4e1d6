use thiserror::Error;

/// Failure of a single backend request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to fetch {resource}: {status} {reason}")]
    Status {
        resource: &'static str,
        status: u16,
        reason: String,
    },

    #[error("Failed to fetch {resource}: {source}")]
    Network {
        resource: &'static str,
        source: reqwest::Error,
    },

    #[error("Failed to parse {resource} response: {source}")]
    Parse {
        resource: &'static str,
        source: serde_json::Error,
    },

    #[error("Invalid {resource} response: {message}")]
    Schema {
        resource: &'static str,
        message: String,
    },

    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl RequestError {
    /// HTTP status code, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
