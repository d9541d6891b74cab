//! Generic JSON Schema execution.
//!
//! The checkers never interpret schema keywords themselves. They load a
//! schema document, compile it once with the `jsonschema` engine, run every
//! instance of the batch through that validator, and turn whatever the
//! engine reports into messages.

use std::path::Path;

pub use jsonschema::Validator;
use serde_json::Value;

use crate::errors::{MarketlintError, Result};

/// One schema violation reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Engine message (e.g., `"\"name\" is a required property"`).
    pub message: String,
    /// Dotted path into the instance (`"plugins.0.name"`); empty at the root.
    pub instance_path: String,
    /// Dotted path into the schema of the keyword that rejected the instance.
    pub schema_path: String,
}

impl SchemaViolation {
    /// Render as the message lines attached to a failing item.
    ///
    /// The path lines are omitted when the corresponding path is empty.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Schema validation error: {}", self.message)];
        if !self.instance_path.is_empty() {
            lines.push(format!("  at path: {}", self.instance_path));
        }
        if !self.schema_path.is_empty() {
            lines.push(format!("  schema path: {}", self.schema_path));
        }
        lines
    }
}

/// Load a schema document from disk.
///
/// JSON is the expected format; YAML is accepted as well since every JSON
/// document is also valid YAML.
pub fn load_schema(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(MarketlintError::NotFound {
            kind: "Schema file",
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if is_yaml {
        Ok(serde_yaml_ng::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

/// Compile a schema document into a reusable validator.
pub fn compile(schema: &Value) -> Result<Validator> {
    jsonschema::validator_for(schema).map_err(|e| MarketlintError::Schema {
        message: e.to_string(),
    })
}

/// Load and compile the schema at `path`.
pub fn load_validator(path: &Path) -> Result<Validator> {
    let validator = compile(&load_schema(path)?)?;
    tracing::debug!(path = %path.display(), "compiled schema");
    Ok(validator)
}

/// Validate `instance`, returning every violation found.
///
/// An empty list means the instance conforms.
#[must_use]
pub fn validate(instance: &Value, validator: &Validator) -> Vec<SchemaViolation> {
    validator
        .iter_errors(instance)
        .map(|e| SchemaViolation {
            message: e.to_string(),
            instance_path: dotted(&e.instance_path.to_string()),
            schema_path: dotted(&e.schema_path.to_string()),
        })
        .collect()
}

/// Convert a JSON Pointer (`/a/0/b~1c`) into a dotted path (`a.0.b/c`).
fn dotted(pointer: &str) -> String {
    pointer
        .split('/')
        .filter(|seg| !seg.is_empty())
        .map(|seg| seg.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}
