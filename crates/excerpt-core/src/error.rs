//! Fatal run errors and per-document load errors

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that abort a run before any document is processed
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("persona text must be non-empty")]
    MissingPersona,
    #[error("job-to-be-done text must be non-empty")]
    MissingJob,
    #[error("at least one target document is required")]
    NoDocuments,
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
    #[error("failed to start worker pool")]
    WorkerPool {
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }
}

/// A document that could not be turned into pages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}
