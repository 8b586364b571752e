use distil_db::StorageError;
use distil_types::ValidationError;
use thiserror::Error;

/// Failure during redaction or row construction. Aborts the whole chat.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),
    #[error("residual payload serialization failed: {0}")]
    ResidualPayload(#[from] serde_json::Error),
}

/// The one exception a caller sees per failed chat. None of these are
/// retried internally; either every row is staged or none are.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
