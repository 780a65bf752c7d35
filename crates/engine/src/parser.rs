//! Parsing and serialization of `KEY=VALUE` environment text.
//!
//! Responsibilities:
//! - Parse raw env-file text into a flat key/value mapping.
//! - Serialize a mapping back into env-file text.
//!
//! Does NOT handle:
//! - File I/O (see `capability.rs` / `writer.rs`).
//! - Priority merging across files (see `merge.rs`).
//!
//! Invariants:
//! - Malformed lines (no `=`) are skipped, never errors.
//! - Exactly one layer of matching single or double quotes is
//!   stripped from a fully quoted value.
//! - Within one text, the last occurrence of a duplicated key wins.
//! - Lines whose key trims to nothing (`=value`) are skipped like
//!   other malformed lines rather than storing an empty key; dotenv
//!   convention, deliberately chosen over a literal split-and-store.
//! - No escape-sequence processing and no multiline values; this is a
//!   documented limitation of the file format.

use std::collections::BTreeMap;

/// Parse env-file text into a key/value mapping.
///
/// Line algorithm: trim; skip blanks and `#` comments; split on the
/// first `=` (values may contain further `=`); trim key and value
/// independently; strip one layer of wholesale single/double quoting.
pub fn parse_env_text(text: &str) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        vars.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    vars
}

/// Strip exactly one layer of matching single or double quotes from a
/// value that is wholly wrapped in them.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Serialize a mapping as `KEY=VALUE` lines, one per entry, in the
/// mapping's iteration order, with a trailing newline.
///
/// Values are written verbatim, never re-quoted: a parsed value that
/// originally needed quoting (leading/trailing space, literal `#`)
/// will not round-trip. This asymmetry mirrors the parse side's
/// single-layer unquoting and is a known limitation.
pub fn serialize_env(vars: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in vars {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}
