use std::io::Write;
use std::path::Path;

use marketlint::{Config, Reporter, TextReporter};

pub(crate) fn run(
    base_dir: &Path,
    strict: bool,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let report = marketlint::validate_structure(base_dir, &config.structure);

    if let Err(e) = TextReporter::new(out).structure(&report) {
        return super::output_error(err, &e);
    }

    i32::from(!report.passes(strict))
}
