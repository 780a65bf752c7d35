//! envstack - inspect and update layered `.env` configuration files.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging, dispatch to the engine, and map results to
//!   exit codes.
//!
//! Does NOT handle:
//! - Resolution, validation, or persistence semantics (see
//!   `crates/engine`).
//!
//! Invariants:
//! - JSON results go to stdout; logs go to stderr via `tracing`.

mod args;
mod commands;

use args::Cli;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match commands::run(cli) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(commands::EXIT_FAILURE);
        }
    }
}
