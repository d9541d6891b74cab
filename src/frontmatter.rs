//! YAML frontmatter extraction and validation for `SKILL.md` files.
//!
//! A skill document opens with a `---` line, carries a YAML mapping, and
//! closes the block with the next `---` line. The mapping is validated
//! against a JSON Schema, then against a few content rules the schema cannot
//! express well.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::diagnostics::{Diagnostic, Severity, F001, F002, F003, F004, F005, F006, F007};
use crate::errors::Result;
use crate::fs_util::{relative_to, sorted_glob};
use crate::models::{AggregateReport, ValidationResult};
use crate::schema::{self, Validator};
use crate::structure::is_valid_name;

/// Minimum description length, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// Why a frontmatter block could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    MissingOpening,
    MissingClosing,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOpening => write!(f, "Missing opening '---' for frontmatter"),
            Self::MissingClosing => write!(f, "Missing closing '---' for frontmatter"),
        }
    }
}

impl std::error::Error for ExtractError {}

/// A located frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    /// Text strictly between the delimiter lines.
    pub payload: String,
    /// 1-based line of the opening delimiter.
    pub start_line: usize,
    /// 1-based line of the closing delimiter.
    pub end_line: usize,
}

/// Locate the frontmatter block at the head of `content`.
///
/// Line 0 must be `---` (surrounding whitespace ignored); the block ends at
/// the first later line that is also `---`.
pub fn extract_frontmatter(content: &str) -> std::result::Result<Frontmatter, ExtractError> {
    let lines: Vec<&str> = content.split('\n').collect();

    if lines.first().map(|l| l.trim()) != Some("---") {
        return Err(ExtractError::MissingOpening);
    }

    let end_idx = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.trim() == "---")
        .map(|(i, _)| i)
        .ok_or(ExtractError::MissingClosing)?;

    Ok(Frontmatter {
        payload: lines[1..end_idx].join("\n"),
        start_line: 1,
        end_line: end_idx + 1,
    })
}

/// Parse a frontmatter payload into a JSON value for schema validation.
pub fn parse_payload(payload: &str) -> Result<Value> {
    Ok(serde_yaml_ng::from_str(payload)?)
}

/// Content rules applied once the schema has accepted the mapping.
///
/// All violations are collected. A missing "use when" clause is advisory.
#[must_use]
pub fn check_content_rules(frontmatter: &Value, file_label: &str) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    let name = frontmatter
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("");
    if !is_valid_name(name) {
        diags.push(Diagnostic::error(
            F004,
            format!(
                "Invalid name format: '{name}'. Must use lowercase letters, numbers, and hyphens only."
            ),
        ));
    }

    let description = frontmatter
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("");
    let len = description.chars().count();
    if len < MIN_DESCRIPTION_CHARS {
        diags.push(Diagnostic::error(
            F005,
            format!(
                "Description too short ({len} chars). Should be at least \
                 {MIN_DESCRIPTION_CHARS} characters and include both what the skill does \
                 and when to use it."
            ),
        ));
    }

    if !description.to_lowercase().contains("use when") {
        diags.push(Diagnostic::new(
            Severity::Info,
            F006,
            format!(
                "Description in {file_label} should include 'Use when...' clause for better skill discovery."
            ),
        ));
    }

    diags
}

/// Validate frontmatter text against an already compiled schema.
#[must_use]
pub fn check_content(content: &str, validator: &Validator, file_label: &str) -> Vec<Diagnostic> {
    let block = match extract_frontmatter(content) {
        Ok(b) => b,
        Err(e) => {
            return vec![Diagnostic::error(
                F001,
                format!("Frontmatter extraction error: {e}"),
            )]
        }
    };

    let frontmatter = match parse_payload(&block.payload) {
        Ok(v) => v,
        Err(e) => {
            return vec![Diagnostic::error(
                F002,
                format!(
                    "YAML parsing error (lines {}-{}): {e}",
                    block.start_line, block.end_line
                ),
            )]
        }
    };

    let violations = schema::validate(&frontmatter, validator);
    if violations.is_empty() {
        return check_content_rules(&frontmatter, file_label);
    }
    violations
        .iter()
        .flat_map(|v| v.to_lines())
        .map(|line| Diagnostic::error(F003, line))
        .collect()
}

/// Validate the frontmatter of one `SKILL.md` file.
///
/// An unreadable file or an unusable schema is reported on the file as an
/// unexpected error.
#[must_use]
pub fn validate_skill_file(path: &Path, schema: &Result<Validator>) -> Vec<Diagnostic> {
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let validator = match schema {
        Ok(v) => v,
        Err(e) => return vec![Diagnostic::error(F007, format!("Unexpected error: {e}"))],
    };
    match std::fs::read_to_string(path) {
        Ok(content) => check_content(&content, validator, &label),
        Err(e) => vec![Diagnostic::error(F007, format!("Unexpected error: {e}"))],
    }
}

/// Validate every `<plugins_dir>/*/SKILL.md`, in sorted order.
///
/// Labels are relative to the parent of `plugins_dir`. No matching files
/// yields an empty report. The schema is compiled once for the batch; if it
/// cannot be loaded, every file reports the failure instead.
pub fn validate_all_skills(plugins_dir: &Path, schema_path: &Path) -> Result<AggregateReport> {
    let files = sorted_glob(plugins_dir, "*/SKILL.md")?;
    let schema = schema::load_validator(schema_path);
    tracing::debug!(
        plugins_dir = %plugins_dir.display(),
        count = files.len(),
        "validating skill frontmatter"
    );
    let base = plugins_dir.parent().unwrap_or(Path::new(""));

    Ok(files
        .iter()
        .map(|file| {
            let diags = validate_skill_file(file, &schema);
            let result = ValidationResult::from_diagnostics(relative_to(file, base), &diags);
            tracing::debug!(file = %result.file().display(), valid = result.is_valid());
            result
        })
        .collect())
}
