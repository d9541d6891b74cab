use std::io::{self, Write};
use std::path::PathBuf;

use marketlint::{Reporter, TextReporter};

pub(crate) struct Options {
    pub marketplace: bool,
    pub plugins: bool,
    pub strict: bool,
    pub base_dir: PathBuf,
    pub marketplace_schema: PathBuf,
    pub plugin_schema: PathBuf,
}

pub(crate) fn run(options: &Options, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    match report(options, out, err) {
        Ok(failed) => i32::from(options.strict && failed > 0),
        Err(e) => super::output_error(err, &e),
    }
}

/// Render the selected manifest checks, returning the number of failed files.
fn report(options: &Options, out: &mut dyn Write, err: &mut dyn Write) -> io::Result<usize> {
    let mut reporter = TextReporter::new(out);
    let mut failed = 0;

    if options.marketplace {
        let results =
            marketlint::validate_marketplace(&options.base_dir, &options.marketplace_schema);
        if results.is_empty() {
            let path = options
                .base_dir
                .join(marketlint::manifest::MARKETPLACE_MANIFEST);
            reporter.notice(&format!("No marketplace.json found at {}", path.display()))?;
        }
        reporter.aggregate("Marketplace Validation", &results)?;
        failed += results.failed();
    }

    if options.plugins {
        let plugins_dir = options.base_dir.join("plugins");
        match marketlint::validate_plugins(&plugins_dir, &options.plugin_schema) {
            Ok(results) => {
                if results.is_empty() {
                    reporter.notice(&format!(
                        "No plugin.json files found in {}",
                        plugins_dir.display()
                    ))?;
                }
                reporter.aggregate("Plugin Validation", &results)?;
                failed += results.failed();
            }
            Err(e) => {
                writeln!(err, "Error: {e}")?;
                failed += 1;
            }
        }
    }

    Ok(failed)
}
