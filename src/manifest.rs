//! JSON manifest (`marketplace.json`, `plugin.json`) validation.
//!
//! Each file is parsed, then checked against a caller-supplied schema. A
//! syntax error fails the file without running the schema.

use std::path::Path;

use serde_json::Value;

use crate::diagnostics::{Diagnostic, J001, J002, J003};
use crate::errors::Result;
use crate::fs_util::{relative_to, sorted_glob};
use crate::models::{AggregateReport, ValidationResult};
use crate::schema::{self, Validator};

/// Marketplace manifest location relative to the marketplace root.
pub const MARKETPLACE_MANIFEST: &str = ".claude-plugin/marketplace.json";

/// Plugin manifest pattern relative to the plugins directory.
pub const PLUGIN_MANIFEST_PATTERN: &str = "*/.claude-plugin/plugin.json";

/// Validate one JSON file against the schema at `schema_path`.
///
/// Never fails: unreadable files and unusable schemas are reported as
/// unexpected-error diagnostics on the file.
#[must_use]
pub fn validate_json_file(json_path: &Path, schema_path: &Path) -> Vec<Diagnostic> {
    check_file(json_path, &schema::load_validator(schema_path))
}

/// Validate one JSON file against a schema compiled by the caller.
///
/// The schema is only consulted once the file has parsed, so a syntax error
/// is reported even when the schema itself is unusable.
fn check_file(json_path: &Path, schema: &Result<Validator>) -> Vec<Diagnostic> {
    let content = match std::fs::read_to_string(json_path) {
        Ok(c) => c,
        Err(e) => return vec![Diagnostic::error(J003, format!("Unexpected error: {e}"))],
    };

    let instance: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => return vec![Diagnostic::error(J001, format!("JSON parsing error: {e}"))],
    };

    let validator = match schema {
        Ok(v) => v,
        Err(e) => return vec![Diagnostic::error(J003, format!("Unexpected error: {e}"))],
    };

    schema::validate(&instance, validator)
        .iter()
        .flat_map(|v| v.to_lines())
        .map(|line| Diagnostic::error(J002, line))
        .collect()
}

/// Validate `<base>/.claude-plugin/marketplace.json`.
///
/// A missing manifest yields an empty report; the structure checker is the
/// one that treats its absence as an error.
#[must_use]
pub fn validate_marketplace(base: &Path, schema_path: &Path) -> AggregateReport {
    let manifest = base.join(MARKETPLACE_MANIFEST);
    if !manifest.is_file() {
        tracing::debug!(path = %manifest.display(), "no marketplace manifest");
        return AggregateReport::default();
    }

    let diags = validate_json_file(&manifest, schema_path);
    std::iter::once(ValidationResult::from_diagnostics(
        relative_to(&manifest, base),
        &diags,
    ))
    .collect()
}

/// Validate every `<plugins_dir>/*/.claude-plugin/plugin.json`, sorted.
///
/// Labels are relative to the parent of `plugins_dir`.
pub fn validate_plugins(plugins_dir: &Path, schema_path: &Path) -> Result<AggregateReport> {
    let files = sorted_glob(plugins_dir, PLUGIN_MANIFEST_PATTERN)?;
    if files.is_empty() {
        return Ok(AggregateReport::default());
    }
    let schema = schema::load_validator(schema_path);
    tracing::debug!(
        plugins_dir = %plugins_dir.display(),
        count = files.len(),
        "validating plugin manifests"
    );
    let base = plugins_dir.parent().unwrap_or(Path::new(""));

    Ok(files
        .iter()
        .map(|file| {
            let diags = check_file(file, &schema);
            let result = ValidationResult::from_diagnostics(relative_to(file, base), &diags);
            tracing::debug!(file = %result.file().display(), valid = result.is_valid());
            result
        })
        .collect())
}
