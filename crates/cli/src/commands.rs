//! Command execution: status queries and update commands.
//!
//! Responsibilities:
//! - Build engine services from CLI arguments.
//! - Print boundary results as JSON and map them to exit codes.
//!
//! Does NOT handle:
//! - Argument parsing (see `args.rs`).
//! - Resolution or persistence semantics (see `envstack-engine`).
//!
//! Invariants:
//! - Results go to stdout as JSON; diagnostics go to the log on
//!   stderr.
//! - `status` exits 0 when valid, 1 when variables are missing, 2 on
//!   engine failure (printed as `{"error": "..."}`).
//! - `set` exits 0 on success, 1 on a failed outcome.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use envstack_engine::{
    AccessGate, FileOptions, Mode, OsFileSystem, PersistenceService, ProcessEnvironment,
    ResolutionService, StatusRequest, UpdateRequest, VariableSpec,
};

use crate::args::{Cli, Command};

/// Process exit codes.
pub const EXIT_OK: i32 = 0;
pub const EXIT_INVALID: i32 = 1;
pub const EXIT_FAILURE: i32 = 2;

/// Execute the parsed command, returning the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    let mode = match cli.mode.as_deref() {
        Some(name) => Mode::parse(name),
        None => Mode::from_env(&ProcessEnvironment),
    };
    let gate = if cli.allow_production {
        AccessGate::permissive(mode)
    } else {
        AccessGate::new(mode)
    };
    tracing::debug!(mode = %gate.mode(), "dispatching command");

    match cli.command {
        Command::Status {
            dir,
            schema,
            no_mode_files,
        } => run_status(gate, dir, &schema, no_mode_files),
        Command::Set { pairs, file } => run_set(gate, pairs, file),
    }
}

fn run_status(
    gate: AccessGate,
    dir: PathBuf,
    schema: &Path,
    no_mode_files: bool,
) -> Result<i32> {
    let required_vars = load_schema(schema)?;
    let fs = OsFileSystem;
    let env = ProcessEnvironment;
    let options = FileOptions {
        include_per_mode_files: !no_mode_files,
        ..FileOptions::default()
    };
    let service = ResolutionService::new(&fs, &env, gate, options);

    let request = StatusRequest {
        required_vars,
        base_dir: dir,
        mode: None,
    };

    match service.status(&request) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(if result.is_valid { EXIT_OK } else { EXIT_INVALID })
        }
        Err(error) => {
            println!(
                "{}",
                serde_json::json!({ "error": error.to_string() })
            );
            Ok(EXIT_FAILURE)
        }
    }
}

fn run_set(gate: AccessGate, pairs: Vec<String>, file: PathBuf) -> Result<i32> {
    let values = parse_pairs(&pairs)?;
    let fs = OsFileSystem;
    let service = PersistenceService::new(&fs, gate);

    let outcome = service.update(&UpdateRequest {
        target_file: file,
        values,
    });

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(if outcome.success { EXIT_OK } else { EXIT_INVALID })
}

/// Read a JSON array of variable specs from disk.
fn load_schema(path: &Path) -> Result<Vec<VariableSpec>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse schema file {}", path.display()))
}

/// Parse `KEY=VALUE` command-line pairs.
fn parse_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("invalid pair '{pair}': expected KEY=VALUE");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("invalid pair '{pair}': empty key");
        }
        values.insert(key.to_string(), value.to_string());
    }
    Ok(values)
}
