//! Human-readable rendering of checker reports.
//!
//! Checkers return structured reports; a [`Reporter`] turns them into text
//! on whatever sink it was given. Nothing here touches global state, so the
//! orchestrator can point a reporter at an in-memory buffer.

use std::io::{self, Write};

use crate::models::{AggregateReport, StructureReport, ValidationResult};

const PASS: &str = "✓ PASS";
const FAIL: &str = "✗ FAIL";

/// Sink for checker results.
pub trait Reporter {
    /// Render the full structure check.
    fn structure(&mut self, report: &StructureReport) -> io::Result<()>;

    /// Render one batch report under `title`.
    fn aggregate(&mut self, title: &str, report: &AggregateReport) -> io::Result<()>;

    /// Emit a free-standing informational line.
    fn notice(&mut self, message: &str) -> io::Result<()>;
}

/// Plain-text reporter writing to any [`Write`] sink.
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn bullets(&mut self, heading: &str, items: &[String]) -> io::Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "\n{heading}")?;
        for item in items {
            writeln!(self.out, "  • {item}")?;
        }
        Ok(())
    }

    fn result_row(&mut self, result: &ValidationResult) -> io::Result<()> {
        let status = if result.is_valid() { PASS } else { FAIL };
        writeln!(self.out, "  {status}  {}", result.file().display())?;
        for e in result.errors() {
            writeln!(self.out, "      ✗ {e}")?;
        }
        for w in result.warnings() {
            writeln!(self.out, "      ⚠ {w}")?;
        }
        Ok(())
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn structure(&mut self, report: &StructureReport) -> io::Result<()> {
        writeln!(self.out, "\nFile Structure Validation")?;

        let market = report.marketplace();
        self.bullets("✗ Marketplace structure errors:", market.errors())?;
        self.bullets("⚠ Marketplace structure warnings:", market.warnings())?;

        if !report.plugins().is_empty() {
            writeln!(self.out, "\nPlugin Structure Validation")?;
            for plugin in report.plugins() {
                self.result_row(plugin)?;
            }
        }

        writeln!(self.out, "\nSummary:")?;
        writeln!(self.out, "Total errors: {}", report.total_errors())?;
        writeln!(self.out, "Total warnings: {}", report.total_warnings())?;
        if report.total_errors() == 0 {
            writeln!(self.out, "✓ All structure validations passed!")?;
        }
        Ok(())
    }

    fn aggregate(&mut self, title: &str, report: &AggregateReport) -> io::Result<()> {
        writeln!(self.out, "\n{title}")?;
        writeln!(self.out, "Total files: {}", report.total())?;
        writeln!(self.out, "Passed: {}", report.passed())?;
        writeln!(self.out, "Failed: {}", report.failed())?;
        if !report.is_empty() {
            writeln!(self.out, "\nValidation Details")?;
            for detail in report.details() {
                self.result_row(detail)?;
            }
        }
        Ok(())
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }
}
