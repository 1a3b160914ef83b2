use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Every way formatting a target can fail. None of them are recoverable.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Expected a directory as input: {}", path.display())]
    InvalidInput { path: PathBuf },

    #[error("Formatter failed on {}: {stderr}", path.display())]
    FormatterFailure { path: PathBuf, stderr: String },

    #[error("Formatter timed out after {timeout:?} on {}", path.display())]
    Timeout { path: PathBuf, timeout: Duration },

    #[error("Failed to spawn formatter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait on formatter for {}: {source}", path.display())]
    Wait {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
