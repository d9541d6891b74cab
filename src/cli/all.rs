use std::io::{self, Write};

use clap::Parser;

use marketlint::{capture, expand_patterns, CheckOutcome, Config, SuiteSummary};

const RULE_WIDTH: usize = 70;

/// The checks run by the suite, in order: description and subcommand argv.
fn checks(strict: bool) -> Vec<(&'static str, Vec<&'static str>)> {
    let strict_flag: &[&'static str] = if strict { &["--strict"] } else { &[] };
    let with = |base: &[&'static str]| -> Vec<&'static str> {
        base.iter().chain(strict_flag).copied().collect()
    };
    vec![
        ("File Structure Validation", with(&["structure"])),
        ("JSON Manifest Validation", with(&["manifest", "--all"])),
        ("YAML Frontmatter Validation", with(&["frontmatter"])),
    ]
}

/// Run one check in-process, exactly as `marketlint <args>` would.
fn run_check(description: &str, args: &[&str], config: &Config) -> CheckOutcome {
    let argv: Vec<String> = std::iter::once("marketlint".to_string())
        .chain(expand_patterns(args))
        .collect();
    tracing::debug!(check = description, ?argv, "running check");

    capture(description, |out, err| match super::Cli::try_parse_from(&argv) {
        Ok(cli) => super::execute(cli.command, config, out, err),
        Err(e) => {
            super::emit(err, e);
            2
        }
    })
}

pub(crate) fn run(
    strict: bool,
    verbose: bool,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    match run_suite(strict, verbose, config, out) {
        Ok(summary) => summary.exit_code(),
        Err(e) => super::output_error(err, &e),
    }
}

fn run_suite(
    strict: bool,
    verbose: bool,
    config: &Config,
    out: &mut dyn Write,
) -> io::Result<SuiteSummary> {
    let checks = checks(strict);
    writeln!(out, "Claude Marketplace - Static Validation Suite")?;
    writeln!(out, "Running {} validation checks...", checks.len())?;

    let mut outcomes = Vec::with_capacity(checks.len());
    for (description, args) in &checks {
        let outcome = run_check(description, args, config);
        let status = if outcome.passed() { "✓ PASS" } else { "✗ FAIL" };
        writeln!(out, "{status} {description}")?;
        outcomes.push(outcome);
    }
    let summary: SuiteSummary = outcomes.into_iter().collect();

    writeln!(out, "\n{}\n", "=".repeat(RULE_WIDTH))?;

    for outcome in summary.outcomes() {
        if verbose || !outcome.passed() {
            writeln!(out, "\n{}", outcome.description)?;
            writeln!(out, "{}", outcome.stdout)?;
            if !outcome.stderr.is_empty() {
                writeln!(out, "Stderr:\n{}", outcome.stderr)?;
            }
        }
    }

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Validation Summary\n")?;
    writeln!(out, "Total checks: {}", summary.outcomes().len())?;
    writeln!(out, "Passed: {}", summary.passed())?;
    writeln!(out, "Failed: {}", summary.failed())?;

    if summary.failed() == 0 {
        writeln!(out, "✓ All validations passed!")?;
    } else {
        writeln!(out, "✗ Some validations failed.")?;
        if !verbose {
            writeln!(out, "Run with --verbose to see full output.")?;
        }
    }

    Ok(summary)
}
