//! Priority merging of resolved environment sources.
//!
//! Responsibilities:
//! - Define the immutable per-resolution snapshot (`ResolvedEnvironment`).
//! - Fold all sources into one flat mapping (`MergedEnvironment`).
//!
//! Does NOT handle:
//! - Locating or reading sources (see `locator.rs` / `service.rs`).
//!
//! Invariants:
//! - Sources are held in ascending priority order; the process
//!   environment, when present, is always the last (highest) source.
//! - For a key present in two or more sources, the value from the
//!   highest-priority source wins.
//! - Merging is a pure function of the snapshot: same inputs, same
//!   output, no hidden global state. O(total keys across sources).

use std::collections::BTreeMap;
use std::path::PathBuf;

/// One flat mapping, the result of folding every source by priority.
pub type MergedEnvironment = BTreeMap<String, String>;

/// Identifies where a source's key/value pairs came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceId {
    /// A specific file on disk.
    File(PathBuf),
    /// The live process environment.
    ProcessEnvironment,
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceId::File(path) => write!(f, "{}", path.display()),
            SourceId::ProcessEnvironment => f.write_str("process-env"),
        }
    }
}

/// One origin of key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub id: SourceId,
    pub vars: BTreeMap<String, String>,
}

/// Immutable snapshot of every source that contributed to one
/// resolution call, in ascending priority order. Candidate files that
/// existed but could not be read are recorded separately so callers
/// can decide whether the degradation is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    sources: Vec<Source>,
    unreadable: Vec<PathBuf>,
}

impl ResolvedEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source that overrides everything added before it.
    pub fn push(&mut self, id: SourceId, vars: BTreeMap<String, String>) {
        self.sources.push(Source { id, vars });
    }

    /// Record a candidate file that existed but failed to read and so
    /// contributed nothing.
    pub fn mark_unreadable(&mut self, path: PathBuf) {
        self.unreadable.push(path);
    }

    /// The sources in ascending priority order.
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Candidate files that were dropped because they failed to read.
    pub fn unreadable(&self) -> &[PathBuf] {
        &self.unreadable
    }

    /// Whether any file-backed source contributed to the snapshot.
    pub fn has_file_source(&self) -> bool {
        self.sources
            .iter()
            .any(|source| matches!(source.id, SourceId::File(_)))
    }

    /// Fold every source into one flat mapping, later (higher
    /// priority) sources overwriting earlier ones key by key.
    pub fn merge(&self) -> MergedEnvironment {
        let mut merged = MergedEnvironment::new();
        for source in &self.sources {
            for (key, value) in &source.vars {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}
