//! Injected capabilities: filesystem access and process-environment reads.
//!
//! Responsibilities:
//! - Define the `FileSystem` trait the engine performs all disk I/O through.
//! - Define the `EnvironmentReader` trait the engine reads process
//!   environment variables through.
//! - Provide the real implementations (`OsFileSystem`,
//!   `ProcessEnvironment`) and the non-server/test implementations
//!   (`DeniedFileSystem`, `StaticEnvironment`).
//!
//! Does NOT handle:
//! - Deciding which files to read (see `locator.rs`).
//! - Parsing file contents (see `parser.rs`).
//!
//! Invariants:
//! - The engine never calls `std::fs` or `std::env` directly outside
//!   this module; resolution is a pure function of the injected
//!   capabilities.
//! - `EnvironmentReader` is read-only; the engine never mutates the
//!   process environment.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Filesystem operations the engine needs. Injected so contexts
/// without disk access (e.g. a browser bundle) can supply a stub that
/// refuses, replacing runtime environment sniffing with static
/// configuration.
pub trait FileSystem {
    /// Whether a regular file exists at `path`. Metadata-only check.
    fn exists(&self, path: &Path) -> bool;

    /// Read the full contents of `path` as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the contents of `path` with `contents` in one write.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Real filesystem, backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// Filesystem stub for contexts without disk access. Every operation
/// fails with [`io::ErrorKind::Unsupported`]; existence checks report
/// that nothing exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedFileSystem;

impl DeniedFileSystem {
    fn refuse<T>() -> io::Result<T> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "filesystem access is not available in this context",
        ))
    }
}

impl FileSystem for DeniedFileSystem {
    fn exists(&self, _path: &Path) -> bool {
        false
    }

    fn read_to_string(&self, _path: &Path) -> io::Result<String> {
        Self::refuse()
    }

    fn write(&self, _path: &Path, _contents: &str) -> io::Result<()> {
        Self::refuse()
    }
}

/// Read-only view of environment variables.
pub trait EnvironmentReader {
    /// The value of `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// A snapshot of every variable. Read once per merge.
    fn snapshot(&self) -> BTreeMap<String, String>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentReader for ProcessEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        std::env::vars().collect()
    }
}

/// Fixed in-memory environment for tests and non-process contexts.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    vars: BTreeMap<String, String>,
}

impl StaticEnvironment {
    /// Build from `(key, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvironmentReader for StaticEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars.clone()
    }
}
