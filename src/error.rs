use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Startup errors. The typing engine itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("word list '{0}' not found")]
    UnknownWordList(String),

    #[error("word list '{0}' contains no words")]
    EmptyVocabulary(String),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
