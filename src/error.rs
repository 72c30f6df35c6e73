#[derive(Debug, thiserror::Error)]
pub enum SectorCapError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status from market data API: {0}")]
    Status(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed market data response: {0}")]
    Decode(serde_json::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to persist data file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SectorCapError {
    /// Whether the error came from talking to the upstream API rather than
    /// from the local data file. A body that does not decode counts as
    /// upstream.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SectorCapError::Http(_) | SectorCapError::Status(_) | SectorCapError::Decode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SectorCapError>;
