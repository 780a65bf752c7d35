//! Core data types for environment resolution.
//!
//! Responsibilities:
//! - Define the declared-variable schema type (`VariableSpec`).
//! - Define the validation verdict type (`ValidationResult`).
//! - Define file-handling options (`FileOptions`) and the runtime `Mode`.
//!
//! Does NOT handle:
//! - Parsing or merging logic (see `parser.rs` / `merge.rs`).
//! - Validation logic itself (see `schema.rs`).
//!
//! Invariants:
//! - `ValidationResult::missing_vars` is always a subset of `all_vars`.
//! - `ValidationResult::is_valid` holds iff `missing_vars` is empty.
//! - Field names serialize as camelCase for the UI/API consumers.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MODE, MODE_ENV_VAR, PRODUCTION_MODE};
use crate::capability::EnvironmentReader;

/// A declared configuration key the embedding application needs.
///
/// The spec list is supplied once at startup and treated as immutable
/// for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableSpec {
    /// Unique key name, e.g. `DATABASE_URL`.
    pub name: String,
    /// Whether resolution must produce a value for this key.
    #[serde(default)]
    pub required: bool,
    /// Human-readable description shown by consumers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fallback value; a non-empty default satisfies the spec even
    /// when no source sets the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl VariableSpec {
    /// Create a required spec with no default or description.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            description: None,
            default_value: None,
        }
    }

    /// Create an optional spec with no default or description.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: None,
            default_value: None,
        }
    }

    /// Attach a default value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Verdict of comparing a spec list against a merged environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff no required, default-less spec is absent from the
    /// merged environment.
    pub is_valid: bool,
    /// Specs that are required and unsatisfied, in input order.
    pub missing_vars: Vec<VariableSpec>,
    /// The full spec list the verdict was computed against.
    pub all_vars: Vec<VariableSpec>,
}

/// Text encoding of persisted environment files.
///
/// Only UTF-8 is currently supported; the variant exists so the option
/// surface matches the consumers' expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Utf8,
}

/// Pure configuration for file location and write-back. No runtime state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileOptions {
    /// Text encoding for reads and writes.
    pub encoding: Encoding,
    /// Default write-back target, relative to the base directory.
    pub target_path: PathBuf,
    /// When false, the `.env.{mode}` / `.env.{mode}.local` candidates
    /// are skipped and only `.env` / `.env.local` are consulted.
    pub include_per_mode_files: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Utf8,
            target_path: PathBuf::from(".env.local"),
            include_per_mode_files: true,
        }
    }
}

/// The runtime environment name used to select per-mode override files
/// and to drive the production access gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    Development,
    Production,
    Test,
    /// Any other mode name, e.g. `staging`.
    Custom(String),
}

impl Mode {
    /// Parse a mode name. Unrecognized names become [`Mode::Custom`].
    pub fn parse(name: &str) -> Self {
        match name {
            DEFAULT_MODE => Mode::Development,
            PRODUCTION_MODE => Mode::Production,
            "test" => Mode::Test,
            other => Mode::Custom(other.to_string()),
        }
    }

    /// Determine the mode from an [`EnvironmentReader`], falling back
    /// to development when the mode variable is unset or blank.
    pub fn from_env(env: &dyn EnvironmentReader) -> Self {
        match env.get(MODE_ENV_VAR) {
            Some(name) if !name.trim().is_empty() => Mode::parse(name.trim()),
            _ => Mode::Development,
        }
    }

    /// The mode name as it appears in file names (`.env.<mode>`).
    pub fn as_str(&self) -> &str {
        match self {
            Mode::Development => DEFAULT_MODE,
            Mode::Production => PRODUCTION_MODE,
            Mode::Test => "test",
            Mode::Custom(name) => name,
        }
    }

    /// Whether mutations are gated off in this mode.
    pub fn is_production(&self) -> bool {
        matches!(self, Mode::Production)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Development
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Mode {
    fn from(name: String) -> Self {
        Mode::parse(&name)
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::StaticEnvironment;

    #[test]
    fn test_mode_parse_round_trips_known_names() {
        assert_eq!(Mode::parse("development"), Mode::Development);
        assert_eq!(Mode::parse("production"), Mode::Production);
        assert_eq!(Mode::parse("test"), Mode::Test);
        assert_eq!(
            Mode::parse("staging"),
            Mode::Custom("staging".to_string())
        );
        assert_eq!(Mode::parse("staging").as_str(), "staging");
    }

    #[test]
    fn test_mode_from_env_defaults_to_development() {
        let env = StaticEnvironment::default();
        assert_eq!(Mode::from_env(&env), Mode::Development);

        let env = StaticEnvironment::from_pairs([("ENVSTACK_MODE", "  ")]);
        assert_eq!(Mode::from_env(&env), Mode::Development);

        let env = StaticEnvironment::from_pairs([("ENVSTACK_MODE", "production")]);
        assert_eq!(Mode::from_env(&env), Mode::Production);
    }

    #[test]
    fn test_variable_spec_builders() {
        let spec = VariableSpec::required("API_KEY").with_description("upstream key");
        assert!(spec.required);
        assert_eq!(spec.name, "API_KEY");
        assert_eq!(spec.description.as_deref(), Some("upstream key"));
        assert!(spec.default_value.is_none());

        let spec = VariableSpec::optional("LOG_LEVEL").with_default("info");
        assert!(!spec.required);
        assert_eq!(spec.default_value.as_deref(), Some("info"));
    }

    #[test]
    fn test_variable_spec_camel_case_serialization() {
        let spec = VariableSpec::required("API_KEY").with_default("x");
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"defaultValue\":\"x\""));
        assert!(json.contains("\"required\":true"));

        let parsed: VariableSpec =
            serde_json::from_str(r#"{"name":"API_KEY","required":true}"#).unwrap();
        assert_eq!(parsed, VariableSpec::required("API_KEY"));
    }

    #[test]
    fn test_file_options_default() {
        let options = FileOptions::default();
        assert_eq!(options.encoding, Encoding::Utf8);
        assert_eq!(options.target_path, PathBuf::from(".env.local"));
        assert!(options.include_per_mode_files);
    }
}
