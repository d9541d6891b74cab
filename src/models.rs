use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostic;

/// Outcome of checking a single file or directory.
///
/// Only constructible from diagnostics, so `errors` is empty exactly when
/// `valid` is `true`. Warnings and advisories never affect validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    file: PathBuf,
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result from the diagnostics collected for `file`.
    #[must_use]
    pub fn from_diagnostics(file: impl Into<PathBuf>, diags: &[Diagnostic]) -> Self {
        let errors: Vec<String> = diags
            .iter()
            .filter(|d| d.is_error())
            .map(|d| d.message.clone())
            .collect();
        let warnings = diags
            .iter()
            .filter(|d| !d.is_error())
            .map(|d| d.message.clone())
            .collect();
        Self {
            file: file.into(),
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// A passing result with no messages.
    #[must_use]
    pub fn pass(file: impl Into<PathBuf>) -> Self {
        Self::from_diagnostics(file, &[])
    }

    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Pass/fail tally over a batch of [`ValidationResult`]s.
///
/// Counts are derived from `details` when the report is assembled, so
/// `total == passed + failed` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    total: usize,
    passed: usize,
    failed: usize,
    details: Vec<ValidationResult>,
}

impl AggregateReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.passed
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    #[must_use]
    pub fn details(&self) -> &[ValidationResult] {
        &self.details
    }

    /// Returns `true` if no item was examined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl FromIterator<ValidationResult> for AggregateReport {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        let details: Vec<ValidationResult> = iter.into_iter().collect();
        let passed = details.iter().filter(|r| r.is_valid()).count();
        Self {
            total: details.len(),
            passed,
            failed: details.len() - passed,
            details,
        }
    }
}

/// Result of a full structure check over a marketplace tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureReport {
    marketplace: ValidationResult,
    plugins: Vec<ValidationResult>,
    total_errors: usize,
    total_warnings: usize,
}

impl StructureReport {
    #[must_use]
    pub fn new(marketplace: ValidationResult, plugins: Vec<ValidationResult>) -> Self {
        let all = || std::iter::once(&marketplace).chain(plugins.iter());
        let total_errors = all().map(|r| r.errors().len()).sum();
        let total_warnings = all().map(|r| r.warnings().len()).sum();
        Self {
            marketplace,
            plugins,
            total_errors,
            total_warnings,
        }
    }

    #[must_use]
    pub fn marketplace(&self) -> &ValidationResult {
        &self.marketplace
    }

    #[must_use]
    pub fn plugins(&self) -> &[ValidationResult] {
        &self.plugins
    }

    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.total_errors
    }

    #[must_use]
    pub fn total_warnings(&self) -> usize {
        self.total_warnings
    }

    /// Returns `true` if the run should exit successfully.
    ///
    /// Errors always fail; warnings fail only in strict mode.
    #[must_use]
    pub fn passes(&self, strict: bool) -> bool {
        self.total_errors == 0 && !(strict && self.total_warnings > 0)
    }
}
