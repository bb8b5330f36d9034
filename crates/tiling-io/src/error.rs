//! Error types for snapshot I/O.

use thiserror::Error;
use tiling_refine::RefineError;

/// Result type for snapshot operations.
pub type SnapshotResult<T> = std::result::Result<T, SnapshotError>;

/// Errors that can occur while reading or writing mesh snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A data line did not hold exactly six parseable integers.
    #[error("malformed snapshot line {line}: expected six comma-separated integers")]
    MalformedLine {
        /// 1-based line number within the snapshot.
        line: usize,
    },

    /// The repair pass found the loaded registry inconsistent.
    #[error("snapshot repair failed: {0}")]
    Repair(#[from] RefineError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SnapshotError::MalformedLine { line: 4 };
        assert_eq!(
            format!("{err}"),
            "malformed snapshot line 4: expected six comma-separated integers"
        );
    }
}
