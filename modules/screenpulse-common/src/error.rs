use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error taxonomy for a pipeline run.
///
/// `SourceUnavailable` and `ReferenceLookupFailed` are recoverable and are
/// absorbed (with a log record) at the step that owns the risk. The rest
/// abort the run and surface to the caller unmodified.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Item source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Classification failed: {0}")]
    Classification(String),

    #[error("Reference lookup failed: {0}")]
    ReferenceLookupFailed(String),

    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}
