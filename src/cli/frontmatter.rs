use std::io::{self, Write};
use std::path::Path;

use marketlint::{AggregateReport, Reporter, TextReporter};

pub(crate) fn run(
    plugins_dir: &Path,
    schema: &Path,
    strict: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    if !plugins_dir.exists() {
        return super::fail(
            err,
            format_args!("Error: Plugins directory not found: {}", plugins_dir.display()),
        );
    }
    if !schema.exists() {
        return super::fail(
            err,
            format_args!("Error: Schema file not found: {}", schema.display()),
        );
    }

    // An unusable schema is reported per file; only missing inputs stop here.
    let results = match marketlint::validate_all_skills(plugins_dir, schema) {
        Ok(r) => r,
        Err(e) => return super::fail(err, format_args!("Error: {e}")),
    };

    let mut reporter = TextReporter::new(out);
    if let Err(e) = render(&mut reporter, plugins_dir, &results) {
        return super::output_error(err, &e);
    }

    i32::from(strict && results.failed() > 0)
}

fn render(
    reporter: &mut impl Reporter,
    plugins_dir: &Path,
    results: &AggregateReport,
) -> io::Result<()> {
    if results.is_empty() {
        reporter.notice(&format!(
            "No SKILL.md files found in {}",
            plugins_dir.display()
        ))?;
    }
    reporter.aggregate("YAML Frontmatter Validation Summary", results)
}
