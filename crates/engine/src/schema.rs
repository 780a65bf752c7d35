//! Validation of a declared variable schema against a merged environment.
//!
//! Responsibilities:
//! - Decide which declared keys are satisfied and which are missing.
//! - Produce the `ValidationResult` verdict.
//!
//! Does NOT handle:
//! - Producing the merged environment (see `merge.rs`).
//! - Ordering missing keys by anything other than input order; callers
//!   wanting "required first" must sort themselves.
//!
//! Invariants:
//! - A key is satisfied iff it is present in the merged mapping OR its
//!   spec carries a non-empty default value.
//! - A spec is missing iff it is required and unsatisfied.
//! - `missing_vars` preserves the order of the input spec list.
//! - `is_valid == missing_vars.is_empty()`.

use crate::merge::MergedEnvironment;
use crate::types::{ValidationResult, VariableSpec};

/// Compares declared variable specs against a merged environment.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Whether one spec is satisfied by the merged environment.
    pub fn is_satisfied(spec: &VariableSpec, merged: &MergedEnvironment) -> bool {
        merged.contains_key(&spec.name)
            || spec
                .default_value
                .as_deref()
                .is_some_and(|default| !default.is_empty())
    }

    /// Validate every spec, collecting the required-and-unsatisfied
    /// ones in input order.
    pub fn validate(specs: &[VariableSpec], merged: &MergedEnvironment) -> ValidationResult {
        let missing_vars: Vec<VariableSpec> = specs
            .iter()
            .filter(|spec| spec.required && !Self::is_satisfied(spec, merged))
            .cloned()
            .collect();

        ValidationResult {
            is_valid: missing_vars.is_empty(),
            missing_vars,
            all_vars: specs.to_vec(),
        }
    }
}
