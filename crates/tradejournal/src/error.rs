//! Error types for persistence, settings and the narrative generator.

/// Errors from a storage slot read or write
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Errors from loading or saving `config.yaml`
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Errors from the external narrative generator.
///
/// None of these are fatal: the session logs them and keeps the previous
/// analysis.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("API key not configured (set {var})")]
    MissingCredential { var: String },

    #[error("Request failed: {0}")]
    Http(String),

    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No response from the narrative service")]
    EmptyResponse,

    #[error("Malformed analysis: {0}")]
    Malformed(String),

    #[error("Narrative worker is not running")]
    WorkerUnavailable,
}

impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        NarrativeError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for NarrativeError {
    fn from(err: serde_json::Error) -> Self {
        NarrativeError::Malformed(err.to_string())
    }
}
