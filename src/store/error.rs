use crate::recipe::{RecipeId, RecordError};
use std::time::Duration;
use thiserror::Error;

/// Failures of a query executor while answering a request.
///
/// These are server-side failures; they are never retried by the caller.
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    #[error("Recipe storage is unavailable: {0}")]
    Unavailable(String),

    #[error("Recipe storage timed out after {0:?}")]
    Timeout(Duration),
}

pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Failures while reading or writing a dataset file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read dataset '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write dataset '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid recipe in dataset: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("Recipe id {0} appears more than once in the dataset")]
    DuplicateId(RecipeId),
}
