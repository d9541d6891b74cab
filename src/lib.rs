pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod frontmatter;
pub mod manifest;
pub mod models;
pub mod render;
pub mod schema;
pub mod structure;
pub mod suite;

pub(crate) mod fs_util;

// Re-export key types at crate root for convenience.
pub use config::Config;
pub use diagnostics::{Diagnostic, Severity};
pub use errors::{MarketlintError, Result};
pub use frontmatter::{extract_frontmatter, validate_all_skills, ExtractError, Frontmatter};
pub use manifest::{validate_json_file, validate_marketplace, validate_plugins};
pub use models::{AggregateReport, StructureReport, ValidationResult};
pub use render::{Reporter, TextReporter};
pub use schema::{load_schema, load_validator, SchemaViolation, Validator};
pub use structure::validate_structure;
pub use suite::{capture, expand_patterns, CheckOutcome, SuiteSummary};
