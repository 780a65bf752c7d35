//! Candidate environment-file location.
//!
//! Responsibilities:
//! - Compute the ordered override-file chain for a mode.
//! - Filter the chain to files that actually exist on disk.
//!
//! Does NOT handle:
//! - Reading or parsing file contents (see `parser.rs`).
//! - Merge ordering semantics (see `merge.rs`).
//!
//! Invariants:
//! - Candidates are returned highest override priority first:
//!   `.env.{mode}.local` > `.env.local` > `.env.{mode}` > `.env`.
//! - `.env.local` applies in every mode and outranks the per-mode
//!   plain file.
//! - Non-existent candidates are silently dropped, never errored.
//! - The only side effect is filesystem existence checks.

use std::path::{Path, PathBuf};

use crate::capability::FileSystem;
use crate::constants::{ENV_FILE, LOCAL_SUFFIX};
use crate::types::Mode;

/// Locates candidate `.env` files under a base directory.
pub struct FileLocator<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> FileLocator<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// The override-file names for `mode`, highest priority first.
    ///
    /// When `include_per_mode_files` is false the two `{mode}`
    /// candidates are omitted and only `.env.local` / `.env` remain.
    pub fn candidate_names(mode: &Mode, include_per_mode_files: bool) -> Vec<String> {
        let mut names = Vec::with_capacity(4);
        if include_per_mode_files {
            names.push(format!("{ENV_FILE}.{}.{LOCAL_SUFFIX}", mode.as_str()));
        }
        names.push(format!("{ENV_FILE}.{LOCAL_SUFFIX}"));
        if include_per_mode_files {
            names.push(format!("{ENV_FILE}.{}", mode.as_str()));
        }
        names.push(ENV_FILE.to_string());
        names
    }

    /// The candidate paths under `base_dir` that exist on disk,
    /// highest priority first.
    pub fn locate(
        &self,
        base_dir: &Path,
        mode: &Mode,
        include_per_mode_files: bool,
    ) -> Vec<PathBuf> {
        Self::candidate_names(mode, include_per_mode_files)
            .into_iter()
            .map(|name| base_dir.join(name))
            .filter(|path| self.fs.exists(path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::OsFileSystem;

    #[test]
    fn test_candidate_names_highest_priority_first() {
        let names = FileLocator::candidate_names(&Mode::Development, true);
        assert_eq!(
            names,
            vec![
                ".env.development.local",
                ".env.local",
                ".env.development",
                ".env",
            ]
        );
    }

    #[test]
    fn test_candidate_names_without_per_mode_files() {
        let names = FileLocator::candidate_names(&Mode::Production, false);
        assert_eq!(names, vec![".env.local", ".env"]);
    }

    #[test]
    fn test_candidate_names_custom_mode() {
        let names = FileLocator::candidate_names(&Mode::Custom("staging".into()), true);
        assert_eq!(names[0], ".env.staging.local");
        assert_eq!(names[2], ".env.staging");
    }

    #[test]
    fn test_locate_drops_missing_candidates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "A=1\n").unwrap();
        std::fs::write(dir.path().join(".env.local"), "A=2\n").unwrap();

        let fs = OsFileSystem;
        let locator = FileLocator::new(&fs);
        let located = locator.locate(dir.path(), &Mode::Development, true);

        assert_eq!(
            located,
            vec![dir.path().join(".env.local"), dir.path().join(".env")]
        );
    }

    #[test]
    fn test_locate_empty_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let fs = OsFileSystem;
        let locator = FileLocator::new(&fs);

        assert!(locator.locate(dir.path(), &Mode::Development, true).is_empty());
    }

    #[test]
    fn test_locate_ignores_directories_with_candidate_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".env")).unwrap();

        let fs = OsFileSystem;
        let locator = FileLocator::new(&fs);

        assert!(locator.locate(dir.path(), &Mode::Development, true).is_empty());
    }
}
