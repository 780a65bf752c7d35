//! Command-line argument definitions.
//!
//! Responsibilities:
//! - Define the `envstack` command tree with clap derive.
//!
//! Does NOT handle:
//! - Executing commands (see `commands.rs`).
//!
//! Invariants:
//! - Global options (`--mode`, `--allow-production`) apply to every
//!   subcommand.
//! - When `--mode` is absent the engine's mode detection takes over
//!   (`ENVSTACK_MODE`, then `development`); see `commands.rs`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect and update layered `.env` configuration files.
#[derive(Debug, Parser)]
#[command(name = "envstack", version, about)]
pub struct Cli {
    /// Runtime mode used for file selection and the production gate.
    /// Defaults to the ENVSTACK_MODE environment variable, then to
    /// development.
    #[arg(long, global = true)]
    pub mode: Option<String>,

    /// Permit operations even when the mode is production.
    #[arg(long, global = true)]
    pub allow_production: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report which declared variables are missing from the merged
    /// environment. Prints the validation result as JSON.
    Status {
        /// Directory holding the candidate `.env` files.
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// JSON file with the declared variable specs
        /// (`[{"name": "...", "required": true, ...}, ...]`).
        #[arg(long)]
        schema: PathBuf,

        /// Consult only `.env` and `.env.local`, skipping the
        /// per-mode candidates.
        #[arg(long)]
        no_mode_files: bool,
    },

    /// Merge KEY=VALUE pairs into an environment file. Prints the
    /// update outcome as JSON.
    Set {
        /// Pairs in KEY=VALUE form.
        #[arg(required = true, value_name = "KEY=VALUE")]
        pairs: Vec<String>,

        /// Target file to update.
        #[arg(long, default_value = ".env.local")]
        file: PathBuf,
    },
}
