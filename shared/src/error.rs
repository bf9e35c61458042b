use thiserror::Error;

/// Why an event load failed.
///
/// The widget only ever sees a bare failure; the variant is kept for logging.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type LoadResult<T> = Result<T, LoadError>;
