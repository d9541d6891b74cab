use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

/// Return a `Command` for the `marketlint` binary built by Cargo.
fn marketlint() -> Command {
    cargo_bin_cmd!("marketlint")
}

/// `marketlint` running with `dir` as the working directory.
fn marketlint_in(dir: &Path) -> Command {
    let mut cmd = marketlint();
    cmd.current_dir(dir);
    cmd
}

const VALID_SKILL: &str = "---\nname: pdf-tools\ndescription: Extracts text and tables from PDF files. Use when working with PDFs.\n---\n# PDF tools\n";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A marketplace that passes every check, with the shipped schemas copied in.
fn make_marketplace() -> TempDir {
    let root = tempdir().unwrap();
    let base = root.path();

    let schemas = Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas");
    for name in [
        "marketplace-schema.json",
        "plugin-schema.json",
        "skill-frontmatter-schema.json",
    ] {
        write(
            base,
            &format!("schemas/{name}"),
            &fs::read_to_string(schemas.join(name)).unwrap(),
        );
    }

    write(
        base,
        ".claude-plugin/marketplace.json",
        r#"{
  "name": "demo-market",
  "owner": { "name": "Demo Team" },
  "plugins": [
    { "name": "code-review", "source": "./plugins/code-review" },
    { "name": "pdf-tools", "source": "./plugins/pdf-tools" }
  ]
}"#,
    );
    write(base, "README.md", "# Demo\n");
    write(base, "CHANGELOG.md", "# Changelog\n");
    write(base, ".gitignore", "target/\n");
    write(
        base,
        "plugins/code-review/.claude-plugin/plugin.json",
        r#"{ "name": "code-review", "version": "1.0.0" }"#,
    );
    write(base, "plugins/code-review/commands/review.md", "# Review\n");
    write(base, "plugins/pdf-tools/SKILL.md", VALID_SKILL);
    root
}

// ── Global flags ────────────────────────────────────────────────────

#[test]
fn help_flag() {
    marketlint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Static validation suite"));
}

#[test]
fn version_flag() {
    marketlint()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn about_flag() {
    marketlint()
        .arg("--about")
        .assert()
        .success()
        .stdout(predicate::str::contains("marketlint:"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("licence:"));
}

#[test]
fn no_args_shows_usage() {
    marketlint()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_explicit_config_fails() {
    marketlint()
        .args(["structure", "--config", "/nonexistent/marketlint.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

// ── structure ───────────────────────────────────────────────────────

#[test]
fn structure_conforming_marketplace_passes() {
    let root = make_marketplace();
    marketlint_in(root.path())
        .args(["structure", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total errors: 0"))
        .stdout(predicate::str::contains("Total warnings: 0"))
        .stdout(predicate::str::contains("✓ All structure validations passed!"));
}

#[test]
fn structure_base_dir_flag() {
    let root = make_marketplace();
    marketlint()
        .args(["structure", "--base-dir", root.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ PASS  plugins/code-review"));
}

#[test]
fn structure_bad_plugin_name_fails() {
    let root = make_marketplace();
    write(root.path(), "plugins/My_Plugin/SKILL.md", VALID_SKILL);
    marketlint_in(root.path())
        .arg("structure")
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ FAIL  plugins/My_Plugin"))
        .stdout(predicate::str::contains("My_Plugin: Invalid plugin name"));
}

#[test]
fn structure_misplaced_component_fails() {
    let root = make_marketplace();
    fs::create_dir_all(root.path().join("plugins/code-review/.claude-plugin/commands")).unwrap();
    marketlint_in(root.path())
        .arg("structure")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "'commands/' should be at plugin root, not inside .claude-plugin/",
        ));
}

#[test]
fn structure_missing_marketplace_manifest_fails() {
    let root = make_marketplace();
    fs::remove_file(root.path().join(".claude-plugin/marketplace.json")).unwrap();
    marketlint_in(root.path())
        .arg("structure")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Missing .claude-plugin/marketplace.json file",
        ));
}

#[test]
fn structure_warnings_only_exit_zero_unless_strict() {
    let root = make_marketplace();
    fs::remove_file(root.path().join("CHANGELOG.md")).unwrap();
    marketlint_in(root.path())
        .arg("structure")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommended file missing: CHANGELOG.md"));
    marketlint_in(root.path())
        .args(["structure", "--strict"])
        .assert()
        .failure();
}

#[test]
fn structure_config_promotes_missing_manifest_to_error() {
    let root = make_marketplace();
    fs::create_dir_all(root.path().join("plugins/bare")).unwrap();
    marketlint_in(root.path())
        .arg("structure")
        .assert()
        .success();
    write(
        root.path(),
        "marketlint.toml",
        "[structure]\nmissing_manifest_severity = \"error\"\n",
    );
    marketlint_in(root.path())
        .arg("structure")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Neither plugin.json nor SKILL.md found"));
}

// ── manifest ────────────────────────────────────────────────────────

#[test]
fn manifest_valid_files_pass() {
    let root = make_marketplace();
    marketlint_in(root.path())
        .args(["manifest", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marketplace Validation"))
        .stdout(predicate::str::contains("Plugin Validation"))
        .stdout(predicate::str::contains(
            "✓ PASS  plugins/code-review/.claude-plugin/plugin.json",
        ));
}

#[test]
fn manifest_invalid_json_reported_and_strict_fails() {
    let root = make_marketplace();
    write(
        root.path(),
        "plugins/code-review/.claude-plugin/plugin.json",
        "{ \"name\": ",
    );
    marketlint_in(root.path())
        .args(["manifest", "--plugins"])
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON parsing error"))
        .stdout(predicate::str::contains("Failed: 1"))
        .stdout(predicate::str::contains("Marketplace Validation").not());
    marketlint_in(root.path())
        .args(["manifest", "--plugins", "--strict"])
        .assert()
        .failure();
}

#[test]
fn manifest_schema_violation_shows_paths() {
    let root = make_marketplace();
    write(
        root.path(),
        "plugins/code-review/.claude-plugin/plugin.json",
        r#"{ "name": "code-review", "version": "one" }"#,
    );
    marketlint_in(root.path())
        .args(["manifest", "--plugins"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema validation error:"))
        .stdout(predicate::str::contains("at path: version"))
        .stdout(predicate::str::contains("schema path: properties.version.pattern"));
}

#[test]
fn manifest_empty_plugins_dir_is_informational() {
    let root = make_marketplace();
    fs::remove_dir_all(root.path().join("plugins")).unwrap();
    fs::create_dir(root.path().join("plugins")).unwrap();
    marketlint_in(root.path())
        .args(["manifest", "--plugins", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plugin.json files found"))
        .stdout(predicate::str::contains("Total files: 0"));
}

#[test]
fn manifest_marketplace_only() {
    let root = make_marketplace();
    marketlint_in(root.path())
        .args(["manifest", "--marketplace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marketplace Validation"))
        .stdout(predicate::str::contains("Plugin Validation").not());
}

// ── frontmatter ─────────────────────────────────────────────────────

#[test]
fn frontmatter_valid_skills_pass() {
    let root = make_marketplace();
    marketlint_in(root.path())
        .args(["frontmatter", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ PASS  plugins/pdf-tools/SKILL.md"));
}

#[test]
fn frontmatter_missing_plugins_dir_fails_early() {
    let root = make_marketplace();
    marketlint_in(root.path())
        .args(["frontmatter", "--plugins-dir", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plugins directory not found: nowhere"));
}

#[test]
fn frontmatter_missing_schema_fails_early() {
    let root = make_marketplace();
    marketlint_in(root.path())
        .args(["frontmatter", "--schema", "schemas/none.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schema file not found"));
}

#[test]
fn frontmatter_malformed_schema_reported_per_file() {
    let root = make_marketplace();
    write(root.path(), "plugins/code-review/SKILL.md", VALID_SKILL);
    write(root.path(), "schemas/skill-frontmatter-schema.json", "{ not json");
    marketlint_in(root.path())
        .arg("frontmatter")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files: 2"))
        .stdout(predicate::str::contains("Failed: 2"))
        .stdout(predicate::str::contains("✗ Unexpected error: JSON error:"));
    marketlint_in(root.path())
        .args(["frontmatter", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed: 2"));
}

#[test]
fn frontmatter_short_description_fails_under_strict() {
    let root = make_marketplace();
    write(
        root.path(),
        "plugins/pdf-tools/SKILL.md",
        "---\nname: pdf-tools\ndescription: Reads PDFs.\n---\n",
    );
    marketlint_in(root.path())
        .arg("frontmatter")
        .assert()
        .success()
        .stdout(predicate::str::contains("Description too short (11 chars)"))
        .stdout(predicate::str::contains("Use when"));
    marketlint_in(root.path())
        .args(["frontmatter", "--strict"])
        .assert()
        .failure();
}

#[test]
fn frontmatter_missing_opening_delimiter() {
    let root = make_marketplace();
    write(root.path(), "plugins/pdf-tools/SKILL.md", "# No frontmatter\n");
    marketlint_in(root.path())
        .args(["frontmatter", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Missing opening '---' for frontmatter",
        ));
}

#[test]
fn frontmatter_no_skills_is_informational() {
    let root = make_marketplace();
    fs::remove_file(root.path().join("plugins/pdf-tools/SKILL.md")).unwrap();
    marketlint_in(root.path())
        .args(["frontmatter", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No SKILL.md files found"));
}

#[test]
fn frontmatter_schema_from_config() {
    let root = make_marketplace();
    write(
        root.path(),
        "custom/strict-schema.json",
        r#"{ "type": "object", "required": ["license"] }"#,
    );
    write(
        root.path(),
        "custom.toml",
        "[schemas]\nfrontmatter = \"custom/strict-schema.json\"\n",
    );
    marketlint_in(root.path())
        .args(["frontmatter", "--strict", "--config", "custom.toml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("license"));
}

// ── all ─────────────────────────────────────────────────────────────

#[test]
fn all_passes_on_conforming_marketplace() {
    let root = make_marketplace();
    marketlint_in(root.path())
        .args(["all", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ PASS File Structure Validation"))
        .stdout(predicate::str::contains("✓ PASS JSON Manifest Validation"))
        .stdout(predicate::str::contains("✓ PASS YAML Frontmatter Validation"))
        .stdout(predicate::str::contains("Passed: 3"))
        .stdout(predicate::str::contains("✓ All validations passed!"))
        .stdout(predicate::str::contains("Total errors:").not());
}

#[test]
fn all_one_failing_check() {
    let root = make_marketplace();
    fs::create_dir_all(root.path().join("plugins/code-review/.claude-plugin/hooks")).unwrap();
    marketlint_in(root.path())
        .arg("all")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ FAIL File Structure Validation"))
        .stdout(predicate::str::contains("Total checks: 3"))
        .stdout(predicate::str::contains("Passed: 2"))
        .stdout(predicate::str::contains("Failed: 1"))
        .stdout(predicate::str::contains("'hooks/' should be at plugin root"))
        .stdout(predicate::str::contains("Run with --verbose"));
}

#[test]
fn all_strict_fails_on_warnings() {
    let root = make_marketplace();
    fs::remove_file(root.path().join("README.md")).unwrap();
    marketlint_in(root.path()).arg("all").assert().success();
    marketlint_in(root.path())
        .args(["all", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ FAIL File Structure Validation"));
}

#[test]
fn all_verbose_shows_passing_output() {
    let root = make_marketplace();
    marketlint_in(root.path())
        .args(["all", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total errors: 0"))
        .stdout(predicate::str::contains("YAML Frontmatter Validation Summary"));
}

#[test]
fn all_reports_missing_frontmatter_inputs() {
    let root = make_marketplace();
    fs::remove_file(root.path().join("schemas/skill-frontmatter-schema.json")).unwrap();
    marketlint_in(root.path())
        .arg("all")
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ FAIL YAML Frontmatter Validation"))
        .stdout(predicate::str::contains("Stderr:"))
        .stdout(predicate::str::contains("Schema file not found"));
}
