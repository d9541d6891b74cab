//! Structured diagnostics for structure, manifest, and frontmatter checks.
//!
//! Checkers produce typed diagnostics carrying a stable code and a severity.
//! [`crate::models::ValidationResult`] flattens them into the plain string
//! lists printed to users.

use serde::Deserialize;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A rule violation that causes validation failure.
    Error,
    /// A potential issue that does not cause failure.
    Warning,
    /// A non-blocking recommendation.
    Info,
}

/// A structured diagnostic message from a checker.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Stable code (e.g., `"M001"`, `"F006"`).
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic with the given severity, code, and message.
    #[must_use]
    pub fn new(severity: Severity, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
        }
    }

    /// Shorthand for an error diagnostic.
    #[must_use]
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Shorthand for a warning diagnostic.
    #[must_use]
    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Returns `true` if this diagnostic is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Returns `true` if this diagnostic is a warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Returns `true` if this diagnostic is informational.
    #[must_use]
    pub fn is_info(&self) -> bool {
        self.severity == Severity::Info
    }
}

// ── Code constants ──────────────────────────────────────────────────────

// Marketplace root (M001–M003)

/// `.claude-plugin/marketplace.json` is missing.
pub const M001: &str = "M001";
/// `plugins/` directory is missing.
pub const M002: &str = "M002";
/// Recommended top-level file is missing.
pub const M003: &str = "M003";

// Plugin layout (P001–P003)

/// Plugin directory name is not kebab-case.
pub const P001: &str = "P001";
/// Neither `plugin.json` nor `SKILL.md` present.
pub const P002: &str = "P002";
/// Component directory nested under `.claude-plugin/`.
pub const P003: &str = "P003";

// Skill layout (K001–K004)

/// Skill directory name is not kebab-case.
pub const K001: &str = "K001";
/// `SKILL.md` missing at skill root.
pub const K002: &str = "K002";
/// `SKILL.md` nested under `skills/`.
pub const K003: &str = "K003";
/// `SKILL.md` has wrong casing.
pub const K004: &str = "K004";

// Manifest checks (J001–J003)

/// JSON syntax error.
pub const J001: &str = "J001";
/// Schema violation.
pub const J002: &str = "J002";
/// Unexpected error (unreadable file, unusable schema).
pub const J003: &str = "J003";

// Frontmatter checks (F001–F007)

/// Frontmatter delimiters missing.
pub const F001: &str = "F001";
/// YAML payload does not parse.
pub const F002: &str = "F002";
/// Schema violation.
pub const F003: &str = "F003";
/// `name` not kebab-case.
pub const F004: &str = "F004";
/// `description` too short.
pub const F005: &str = "F005";
/// `description` lacks a "Use when" clause.
pub const F006: &str = "F006";
/// Unexpected error (unreadable file, unusable schema).
pub const F007: &str = "F007";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_predicates() {
        let e = Diagnostic::error(P001, "x");
        let w = Diagnostic::warning(P002, "x");
        let i = Diagnostic::new(Severity::Info, F006, "x");
        assert!(e.is_error() && !e.is_warning() && !e.is_info());
        assert!(!w.is_error() && w.is_warning() && !w.is_info());
        assert!(!i.is_error() && !i.is_warning() && i.is_info());
    }

    #[test]
    fn codes_are_unique() {
        let codes = [
            M001, M002, M003, P001, P002, P003, K001, K002, K003, K004, J001, J002, J003, F001,
            F002, F003, F004, F005, F006, F007,
        ];
        let mut seen = std::collections::HashSet::new();
        for code in &codes {
            assert!(seen.insert(code), "duplicate code: {code}");
        }
    }
}
