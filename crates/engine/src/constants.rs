//! Centralized constants for the envstack workspace.
//!
//! This module contains file-name conventions and fixed messages used
//! across crates to avoid magic string duplication.

// =============================================================================
// File-Name Conventions
// =============================================================================

/// Base name of the plain environment file.
pub const ENV_FILE: &str = ".env";

/// Suffix marking a local (non-committed) override file.
pub const LOCAL_SUFFIX: &str = "local";

// =============================================================================
// Modes
// =============================================================================

/// Mode name used when nothing else is configured.
pub const DEFAULT_MODE: &str = "development";

/// Mode name in which mutations are gated off.
pub const PRODUCTION_MODE: &str = "production";

/// Environment variable consulted by [`crate::Mode::from_env`].
pub const MODE_ENV_VAR: &str = "ENVSTACK_MODE";

// =============================================================================
// Access Gate
// =============================================================================

/// Fixed message returned when an operation is refused in production.
pub const NOT_AVAILABLE_MESSAGE: &str = "not available in production mode";
