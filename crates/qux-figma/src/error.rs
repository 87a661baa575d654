//! Import errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use thiserror::Error;

pub type ImportResult<T> = Result<T, ImportError>;

/// Errors surfaced by the importer.
///
/// Malformed nodes and dangling navigation references are not errors; they
/// are logged and the walk continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The request never produced an HTTP response.
    #[error("transport error '{0}'")]
    Transport(SmolStr),

    /// The document endpoint answered with a non-success status.
    #[error("http status {status}: {message}")]
    Http { status: u16, message: SmolStr },

    /// The response body was not the JSON we expected.
    #[error("invalid response body '{0}'")]
    Decode(SmolStr),

    /// The image service reported an error for one batch.
    #[error("image batch {batch} failed: {message}")]
    ImageBatch { batch: usize, message: SmolStr },

    /// A background request task did not finish.
    #[error("request task failed '{0}'")]
    TaskJoin(SmolStr),

    /// Configuration error.
    #[error("invalid config '{0}'")]
    InvalidConfig(SmolStr),
}

impl From<ureq::Error> for ImportError {
    fn from(value: ureq::Error) -> Self {
        Self::Transport(value.to_string().into())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string().into())
    }
}

impl From<tokio::task::JoinError> for ImportError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::TaskJoin(value.to_string().into())
    }
}
