use promdash_protocol::{ErrorKind, ToolFailure};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Error fetching metrics: {0}")]
    Fetch(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Lookup
    }
}

impl From<SourceError> for ToolFailure {
    fn from(err: SourceError) -> Self {
        ToolFailure::new(err.kind(), err.to_string())
    }
}
