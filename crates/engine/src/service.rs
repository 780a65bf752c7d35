//! Orchestration: status queries and update commands.
//!
//! Responsibilities:
//! - `ResolutionService`: locate, parse, merge, and validate, answering
//!   "is configuration valid, and what is missing".
//! - `PersistenceService`: apply new values to a target file, with
//!   optional re-validation afterward.
//! - `AccessGate`: refuse both operations in production mode unless an
//!   explicit override is set.
//!
//! Does NOT handle:
//! - Line-level parsing (see `parser.rs`) or the merge fold itself
//!   (see `merge.rs`).
//!
//! Invariants:
//! - A status query either returns a complete `ValidationResult` or a
//!   typed error; no intermediate state is observable.
//! - Unreadable candidate files degrade to warnings and contribute
//!   nothing; the query fails hard only when every existing candidate
//!   is unreadable and the process environment leaves a required key
//!   unmet.
//! - The process environment is read once per resolution and always
//!   merged last (highest priority).
//! - An update never partially writes: the gate and the in-memory
//!   merge both precede the single disk mutation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::capability::{EnvironmentReader, FileSystem};
use crate::error::EngineError;
use crate::locator::FileLocator;
use crate::merge::{MergedEnvironment, ResolvedEnvironment, SourceId};
use crate::parser::parse_env_text;
use crate::schema::SchemaValidator;
use crate::types::{FileOptions, Mode, ValidationResult, VariableSpec};
use crate::writer::FileMergeWriter;

/// Production gate for engine operations.
///
/// In production mode both the update command and the status query are
/// refused with a fixed error unless the override flag is set.
#[derive(Debug, Clone)]
pub struct AccessGate {
    mode: Mode,
    allow_production: bool,
}

impl AccessGate {
    /// Gate for `mode` with the production override unset.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            allow_production: false,
        }
    }

    /// Gate for `mode` with the production override set.
    pub fn permissive(mode: Mode) -> Self {
        Self {
            mode,
            allow_production: true,
        }
    }

    /// The runtime mode this gate was built for.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    fn check(&self) -> Result<(), EngineError> {
        if self.mode.is_production() && !self.allow_production {
            return Err(EngineError::NotAvailable);
        }
        Ok(())
    }
}

/// Input of a status query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    /// Declared variables to validate against.
    pub required_vars: Vec<VariableSpec>,
    /// Directory holding the candidate `.env` files.
    pub base_dir: PathBuf,
    /// Mode to resolve for; defaults to the gate's runtime mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

/// Input of an update command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    /// The file to merge the new values into.
    pub target_file: PathBuf,
    /// New key/value pairs; they win over existing entries.
    pub values: BTreeMap<String, String>,
}

impl UpdateRequest {
    /// Build an update targeting the default write-back file from
    /// `options`, resolved under `base_dir`.
    pub fn for_default_target(
        base_dir: &std::path::Path,
        options: &FileOptions,
        values: BTreeMap<String, String>,
    ) -> Self {
        Self {
            target_file: base_dir.join(&options.target_path),
            values,
        }
    }
}

/// Outcome of an update command. Failures are carried in `error`
/// rather than panicking so any transport can forward them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub success: bool,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Answers status queries by folding every source and validating the
/// declared schema against the result.
pub struct ResolutionService<'a> {
    fs: &'a dyn FileSystem,
    env: &'a dyn EnvironmentReader,
    gate: AccessGate,
    options: FileOptions,
}

impl<'a> ResolutionService<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        env: &'a dyn EnvironmentReader,
        gate: AccessGate,
        options: FileOptions,
    ) -> Self {
        Self {
            fs,
            env,
            gate,
            options,
        }
    }

    /// Snapshot every contributing source for `request`, in ascending
    /// priority order, with the process environment last.
    ///
    /// An unreadable candidate file is logged, recorded on the
    /// snapshot, and skipped; resolution itself never fails over read
    /// problems. Whether the degradation is acceptable is decided by
    /// [`ResolutionService::status`], which escalates only when a
    /// required key is left unmet with no file-backed source at all.
    pub fn resolve(&self, request: &StatusRequest) -> Result<ResolvedEnvironment, EngineError> {
        let mode = request.mode.clone().unwrap_or_else(|| self.gate.mode().clone());
        let locator = FileLocator::new(self.fs);
        let candidates = locator.locate(
            &request.base_dir,
            &mode,
            self.options.include_per_mode_files,
        );

        let mut resolved = ResolvedEnvironment::new();

        // Candidates arrive highest priority first; fold lowest first.
        for path in candidates.iter().rev() {
            match self.fs.read_to_string(path) {
                Ok(text) => {
                    let vars = parse_env_text(&text);
                    tracing::debug!(path = %path.display(), keys = vars.len(), "parsed env file");
                    resolved.push(SourceId::File(path.clone()), vars);
                }
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        %error,
                        "skipping unreadable env file"
                    );
                    resolved.mark_unreadable(path.clone());
                }
            }
        }

        resolved.push(SourceId::ProcessEnvironment, self.env.snapshot());
        Ok(resolved)
    }

    /// Resolve and fold all sources into one flat mapping.
    pub fn merged(&self, request: &StatusRequest) -> Result<MergedEnvironment, EngineError> {
        Ok(self.resolve(request)?.merge())
    }

    /// Answer "is configuration valid, and what is missing".
    ///
    /// Unreadable candidate files normally degrade to warnings. The
    /// query fails hard only when every existing candidate was
    /// unreadable AND the process environment did not cover every
    /// required key; a fully satisfied schema keeps the query
    /// answerable no matter how the files fared.
    pub fn status(&self, request: &StatusRequest) -> Result<ValidationResult, EngineError> {
        self.gate.check()?;

        let resolved = self.resolve(request)?;
        let merged = resolved.merge();
        let result = SchemaValidator::validate(&request.required_vars, &merged);

        if !result.is_valid && !resolved.unreadable().is_empty() && !resolved.has_file_source() {
            return Err(EngineError::AllSourcesUnreadable {
                base_dir: request.base_dir.clone(),
                count: resolved.unreadable().len(),
            });
        }

        tracing::debug!(
            base_dir = %request.base_dir.display(),
            valid = result.is_valid,
            missing = result.missing_vars.len(),
            "resolved environment status"
        );
        Ok(result)
    }
}

/// Applies update commands to environment files.
pub struct PersistenceService<'a> {
    fs: &'a dyn FileSystem,
    gate: AccessGate,
}

impl<'a> PersistenceService<'a> {
    pub fn new(fs: &'a dyn FileSystem, gate: AccessGate) -> Self {
        Self { fs, gate }
    }

    /// Apply `request.values` to the target file. The gate is checked
    /// before anything touches disk; a refused or failed update leaves
    /// the target untouched.
    pub fn update(&self, request: &UpdateRequest) -> UpdateOutcome {
        let path = request.target_file.display().to_string();

        if let Err(error) = self.gate.check() {
            return UpdateOutcome {
                success: false,
                path,
                error: Some(error.to_string()),
            };
        }

        match FileMergeWriter::new(self.fs).merge_write(&request.target_file, &request.values) {
            Ok(report) => {
                tracing::info!(
                    path = %report.path.display(),
                    updated = request.values.len(),
                    total = report.total_entries,
                    "environment file updated"
                );
                UpdateOutcome {
                    success: true,
                    path,
                    error: None,
                }
            }
            Err(error) => {
                tracing::warn!(path = %path, %error, "environment file update failed");
                UpdateOutcome {
                    success: false,
                    path,
                    error: Some(error.to_string()),
                }
            }
        }
    }

    /// Apply an update, then re-run a status query on success.
    ///
    /// A failed re-validation degrades to `None` rather than masking a
    /// write that already succeeded.
    pub fn update_and_revalidate(
        &self,
        request: &UpdateRequest,
        resolution: &ResolutionService<'_>,
        status: &StatusRequest,
    ) -> (UpdateOutcome, Option<ValidationResult>) {
        let outcome = self.update(request);
        if !outcome.success {
            return (outcome, None);
        }
        match resolution.status(status) {
            Ok(result) => (outcome, Some(result)),
            Err(error) => {
                tracing::warn!(%error, "re-validation after update failed");
                (outcome, None)
            }
        }
    }
}
