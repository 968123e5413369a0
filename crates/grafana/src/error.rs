use promdash_protocol::{ErrorKind, ToolFailure};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Lookup(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Grafana Error {status}: {body}")]
    Write { status: u16, body: String },

    #[error("Error saving dashboard: {0}")]
    WriteTransport(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lookup(_) => ErrorKind::Lookup,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Write { .. } | Self::WriteTransport(_) => ErrorKind::Write,
        }
    }
}

impl From<StoreError> for ToolFailure {
    fn from(err: StoreError) -> Self {
        ToolFailure::new(err.kind(), err.to_string())
    }
}
