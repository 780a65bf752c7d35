//! Merge-on-write persistence of environment files.
//!
//! Responsibilities:
//! - Read the target file (if present), merge new values over its
//!   parsed contents, and write the result back as one overwrite.
//!
//! Does NOT handle:
//! - Deciding which file to target or gating writes (see `service.rs`).
//!
//! Invariants:
//! - New values always win on key collision with existing entries.
//! - The write is a single full-content overwrite performed only
//!   after the in-memory merge succeeds; the target is never left
//!   partially written.
//! - Comments and manual formatting in the original file are lost on
//!   rewrite, and values are written verbatim without re-quoting.
//!   Both are known limitations of the format.
//! - No locking: two concurrent writers to the same file are a
//!   read-modify-write race, last writer wins. Acceptable only under
//!   the single-local-process assumption; callers must not rely on
//!   this engine for multi-writer coordination.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::capability::FileSystem;
use crate::error::EngineError;
use crate::parser::{parse_env_text, serialize_env};

/// Outcome of one merge-write, for logging and re-validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// The file that was written.
    pub path: PathBuf,
    /// Number of entries in the file after the write.
    pub total_entries: usize,
    /// Number of pre-existing entries that were carried over.
    pub preserved_entries: usize,
}

/// Writes key/value updates into an environment file, preserving
/// entries the update does not touch.
pub struct FileMergeWriter<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> FileMergeWriter<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Merge `new_values` over the current contents of `target` and
    /// overwrite the file with the result.
    ///
    /// A missing target is treated as empty. Read and write failures
    /// are hard errors; on failure the target either still holds its
    /// previous contents or the complete new contents.
    pub fn merge_write(
        &self,
        target: &Path,
        new_values: &BTreeMap<String, String>,
    ) -> Result<WriteReport, EngineError> {
        let existing = if self.fs.exists(target) {
            let text = self
                .fs
                .read_to_string(target)
                .map_err(|source| Self::map_io(source, target, true))?;
            parse_env_text(&text)
        } else {
            BTreeMap::new()
        };

        let mut merged = existing.clone();
        for (key, value) in new_values {
            merged.insert(key.clone(), value.clone());
        }

        let preserved_entries = merged
            .iter()
            .filter(|(key, _)| !new_values.contains_key(*key) && existing.contains_key(*key))
            .count();

        self.fs
            .write(target, &serialize_env(&merged))
            .map_err(|source| Self::map_io(source, target, false))?;

        tracing::debug!(
            path = %target.display(),
            total = merged.len(),
            preserved = preserved_entries,
            "wrote merged environment file"
        );

        Ok(WriteReport {
            path: target.to_path_buf(),
            total_entries: merged.len(),
            preserved_entries,
        })
    }

    fn map_io(source: io::Error, target: &Path, reading: bool) -> EngineError {
        if source.kind() == io::ErrorKind::Unsupported {
            return EngineError::FilesystemUnavailable;
        }
        if reading {
            EngineError::TargetReadFailed {
                path: target.to_path_buf(),
                source,
            }
        } else {
            EngineError::WriteFailed {
                path: target.to_path_buf(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{DeniedFileSystem, OsFileSystem};

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_merge_write_creates_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(".env.local");
        let fs = OsFileSystem;

        let report = FileMergeWriter::new(&fs)
            .merge_write(&target, &values(&[("FOO", "1")]))
            .unwrap();

        assert_eq!(report.total_entries, 1);
        assert_eq!(report.preserved_entries, 0);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "FOO=1\n");
    }

    #[test]
    fn test_merge_write_new_values_win_and_others_survive() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(".env.local");
        std::fs::write(&target, "FOO=0\nBAR=2\n").unwrap();
        let fs = OsFileSystem;

        let report = FileMergeWriter::new(&fs)
            .merge_write(&target, &values(&[("FOO", "1")]))
            .unwrap();

        assert_eq!(report.total_entries, 2);
        assert_eq!(report.preserved_entries, 1);

        let parsed = parse_env_text(&std::fs::read_to_string(&target).unwrap());
        assert_eq!(parsed, values(&[("FOO", "1"), ("BAR", "2")]));
    }

    #[test]
    fn test_merge_write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(".env.local");
        std::fs::write(&target, "BAR=2\n").unwrap();
        let fs = OsFileSystem;
        let writer = FileMergeWriter::new(&fs);
        let new_values = values(&[("FOO", "1")]);

        writer.merge_write(&target, &new_values).unwrap();
        let first = std::fs::read_to_string(&target).unwrap();
        writer.merge_write(&target, &new_values).unwrap();
        let second = std::fs::read_to_string(&target).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_merge_write_drops_comments_from_original() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(".env");
        std::fs::write(&target, "# keep me? no.\nBAR=2\n").unwrap();
        let fs = OsFileSystem;

        FileMergeWriter::new(&fs)
            .merge_write(&target, &values(&[("FOO", "1")]))
            .unwrap();

        let text = std::fs::read_to_string(&target).unwrap();
        assert!(!text.contains('#'));
        assert!(text.contains("BAR=2"));
    }

    #[test]
    fn test_merge_write_denied_filesystem_is_typed_failure() {
        let fs = DeniedFileSystem;
        let err = FileMergeWriter::new(&fs)
            .merge_write(Path::new("/nowhere/.env"), &values(&[("FOO", "1")]))
            .unwrap_err();
        assert!(matches!(err, EngineError::FilesystemUnavailable));
    }

    #[cfg(unix)]
    #[test]
    fn test_merge_write_reports_permission_failure() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(".env.local");
        std::fs::write(&target, "BAR=2\n").unwrap();
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o444)).unwrap();
        if std::fs::write(&target, "BAR=2\n").is_ok() {
            // Running as root; permissions cannot block writes here.
            return;
        }

        let fs = OsFileSystem;
        let err = FileMergeWriter::new(&fs)
            .merge_write(&target, &values(&[("FOO", "1")]))
            .unwrap_err();

        assert!(matches!(err, EngineError::WriteFailed { .. }));
        // The failed write left the previous contents intact.
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "BAR=2\n");
    }
}
