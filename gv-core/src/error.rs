//! Error types for outline persistence

use std::path::PathBuf;
use thiserror::Error;

/// Recoverable failures surfaced to the caller.
///
/// Out-of-range buffer offsets and unknown headline ids are not represented
/// here: those are caller bugs and panic.
#[derive(Debug, Error)]
pub enum OutlineError {
    /// The persisted document is malformed or empty
    #[error("Invalid outline document: {0}")]
    Structural(String),

    /// Reading or writing the outline file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutlineError {
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for outline operations
pub type OutlineResult<T> = Result<T, OutlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_message() {
        let err = OutlineError::structural("no headlines");
        assert_eq!(err.to_string(), "Invalid outline document: no headlines");
    }

    #[test]
    fn test_io_message_includes_path() {
        let err = OutlineError::io(
            "/tmp/missing.gv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.gv"));
        assert!(msg.contains("not found"));
    }
}
