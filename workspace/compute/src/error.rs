use thiserror::Error;

pub type Result<T> = std::result::Result<T, ComputeError>;

#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Unknown document: {0}")]
    UnknownDocument(String),
}
