//! Orchestration primitives: captured check outcomes and their aggregate.
//!
//! A check is any function that writes to an stdout-like and a stderr-like
//! sink and returns an exit status. [`capture`] runs one against in-memory
//! buffers, giving the same observable result as spawning it as a process.

use std::io::Write;

/// Captured result of one check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub description: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CheckOutcome {
    /// A check passes iff it exited with status zero.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `check` with captured output.
pub fn capture<F>(description: impl Into<String>, check: F) -> CheckOutcome
where
    F: FnOnce(&mut dyn Write, &mut dyn Write) -> i32,
{
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit_code = check(&mut stdout, &mut stderr);
    CheckOutcome {
        description: description.into(),
        exit_code,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    }
}

/// Pass/fail tally across all checks of a suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    outcomes: Vec<CheckOutcome>,
    passed: usize,
    failed: usize,
}

impl SuiteSummary {
    #[must_use]
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.passed
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Process exit status for the whole suite.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.failed > 0)
    }
}

impl FromIterator<CheckOutcome> for SuiteSummary {
    fn from_iter<I: IntoIterator<Item = CheckOutcome>>(iter: I) -> Self {
        let outcomes: Vec<CheckOutcome> = iter.into_iter().collect();
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        Self {
            failed: outcomes.len() - passed,
            passed,
            outcomes,
        }
    }
}

/// Returns `true` if `arg` contains a glob wildcard.
fn has_wildcard(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Expand wildcard arguments against the filesystem.
///
/// Arguments without wildcards pass through untouched. A pattern with no
/// matches, or one that is not a valid glob, is passed through as written.
#[must_use]
pub fn expand_patterns<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(args.len());
    for arg in args {
        let arg = arg.as_ref();
        if !has_wildcard(arg) {
            expanded.push(arg.to_string());
            continue;
        }
        let matches: Vec<String> = match glob::glob(arg) {
            Ok(paths) => paths
                .flatten()
                .map(|p| p.display().to_string())
                .collect(),
            Err(_) => Vec::new(),
        };
        if matches.is_empty() {
            tracing::debug!(pattern = arg, "no matches, passing through");
            expanded.push(arg.to_string());
        } else {
            expanded.extend(matches);
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn outcome(description: &str, exit_code: i32) -> CheckOutcome {
        CheckOutcome {
            description: description.into(),
            exit_code,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    #[test]
    fn capture_collects_both_streams_and_status() {
        let o = capture("demo", |out, err| {
            writeln!(out, "hello").unwrap();
            writeln!(err, "oops").unwrap();
            1
        });
        assert_eq!(o.description, "demo");
        assert_eq!(o.stdout, "hello\n");
        assert_eq!(o.stderr, "oops\n");
        assert!(!o.passed());
    }

    #[test]
    fn zero_exit_passes() {
        assert!(outcome("x", 0).passed());
        assert!(!outcome("x", 2).passed());
    }

    #[test]
    fn one_failure_of_three() {
        let summary: SuiteSummary = vec![outcome("a", 0), outcome("b", 1), outcome("c", 0)]
            .into_iter()
            .collect();
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(summary.outcomes()[1].description, "b");
    }

    #[test]
    fn all_passing_exits_zero() {
        let summary: SuiteSummary = vec![outcome("a", 0), outcome("b", 0)].into_iter().collect();
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn plain_arguments_pass_through() {
        assert_eq!(expand_patterns(&["--strict", "plugins"]), ["--strict", "plugins"]);
    }

    #[test]
    fn wildcard_expands_to_sorted_matches() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "").unwrap();
        fs::write(dir.path().join("a.md"), "").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();
        let pattern = format!("{}/*.md", dir.path().display());
        let expanded = expand_patterns(&["--flag".to_string(), pattern]);
        assert_eq!(
            expanded,
            [
                "--flag".to_string(),
                dir.path().join("a.md").display().to_string(),
                dir.path().join("b.md").display().to_string(),
            ]
        );
    }

    #[test]
    fn unmatched_wildcard_is_kept() {
        let dir = tempdir().unwrap();
        let pattern = format!("{}/*.nothing", dir.path().display());
        assert_eq!(expand_patterns(&[pattern.clone()]), [pattern]);
    }

    #[test]
    fn invalid_pattern_is_kept() {
        assert_eq!(expand_patterns(&["[unclosed"]), ["[unclosed"]);
    }
}
