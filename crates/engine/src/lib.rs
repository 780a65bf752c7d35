//! Environment resolution and write-back engine for envstack.
//!
//! Resolves named configuration values from layered `.env` files and
//! the live process environment, validates them against a declared
//! schema, and persists missing values back to disk with merge-on-write
//! semantics. UI, HTTP, and CLI consumers all call through the
//! [`ResolutionService`] / [`PersistenceService`] boundary; none of
//! them re-implement parsing or writing.
//!
//! Known limitations (deliberately preserved, not silently fixed):
//! - Quoting is asymmetric: parsing strips one layer of quotes, writing
//!   never re-adds them, so values that need quoting do not round-trip.
//! - Rewrites drop comments and manual formatting from the target file.
//! - No file locking: concurrent writers to one target race
//!   read-modify-write; assumed single local developer process.

pub mod capability;
pub mod constants;
mod error;
mod locator;
mod merge;
pub mod parser;
mod schema;
mod service;
mod types;
mod writer;

pub use capability::{
    DeniedFileSystem, EnvironmentReader, FileSystem, OsFileSystem, ProcessEnvironment,
    StaticEnvironment,
};
pub use error::EngineError;
pub use locator::FileLocator;
pub use merge::{MergedEnvironment, ResolvedEnvironment, Source, SourceId};
pub use parser::{parse_env_text, serialize_env};
pub use schema::SchemaValidator;
pub use service::{
    AccessGate, PersistenceService, ResolutionService, StatusRequest, UpdateOutcome,
    UpdateRequest,
};
pub use types::{Encoding, FileOptions, Mode, ValidationResult, VariableSpec};
pub use writer::{FileMergeWriter, WriteReport};
