//! Error types for environment resolution and persistence.
//!
//! Responsibilities:
//! - Define error variants for all engine failures.
//! - Keep the §7-style taxonomy visible in the type: recoverable
//!   per-source problems are absorbed during resolution and never
//!   appear here; only hard failures do.
//!
//! Does NOT handle:
//! - Logging of absorbed per-source problems (see `service.rs`).
//!
//! Invariants:
//! - All variants include context for debugging (paths, key names).
//! - The access-gate variant carries a fixed message; callers must be
//!   able to rely on its text being stable.

use std::path::PathBuf;

use thiserror::Error;

use crate::constants::NOT_AVAILABLE_MESSAGE;

/// Errors that can occur during resolution or persistence.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The operation was refused by the production access gate.
    #[error("{NOT_AVAILABLE_MESSAGE}")]
    NotAvailable,

    /// The injected filesystem capability refuses all file operations
    /// (e.g. the browser-side stub).
    #[error("filesystem access is not available in this context")]
    FilesystemUnavailable,

    /// Every existing candidate file failed to read and the process
    /// environment did not cover every required key, so the status
    /// query has nothing trustworthy to answer with.
    #[error("all {count} candidate environment files under {base_dir} were unreadable")]
    AllSourcesUnreadable { base_dir: PathBuf, count: usize },

    /// Reading the write-back target failed for a reason other than
    /// the file not existing.
    #[error("failed to read target file at {path}")]
    TargetReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the merged content back to disk failed. The target is
    /// either untouched or holds the complete new content; the write
    /// is a single full-content overwrite.
    #[error("failed to write environment file at {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    /// Whether this error is the fixed access-gate refusal.
    pub fn is_gate_refusal(&self) -> bool {
        matches!(self, EngineError::NotAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_refusal_message_is_fixed() {
        let err = EngineError::NotAvailable;
        assert_eq!(err.to_string(), NOT_AVAILABLE_MESSAGE);
        assert!(err.is_gate_refusal());
    }

    #[test]
    fn test_write_failed_includes_path() {
        let err = EngineError::WriteFailed {
            path: PathBuf::from("/tmp/.env.local"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/.env.local"));
        assert!(!err.is_gate_refusal());
    }
}
