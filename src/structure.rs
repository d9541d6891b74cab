//! Directory layout validation for a plugin marketplace.
//!
//! Checks the marketplace root, then every directory under `plugins/`:
//!
//! - M001: `.claude-plugin/marketplace.json` missing (Error)
//! - M002: `plugins/` missing (Warning)
//! - M003: recommended top-level file missing (Warning)
//! - P001: plugin name not kebab-case (Error)
//! - P002: neither `plugin.json` nor `SKILL.md` (Warning by default, configurable)
//! - P003: component directory inside `.claude-plugin/` (Error)
//! - K001–K004: skill directory rules, applied to plugins that carry a `SKILL.md`

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::StructureConfig;
use crate::diagnostics::{Diagnostic, K001, K002, K003, K004, M001, M002, M003, P001, P002, P003};
use crate::fs_util::{relative_to, sorted_file_names, sorted_subdirs};
use crate::models::{StructureReport, ValidationResult};

/// Lowercase alphanumerics separated by single hyphens.
pub static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("name regex must compile"));

/// Directories that belong at plugin root, never under `.claude-plugin/`.
pub const COMPONENT_DIRS: &[&str] = &["commands", "agents", "skills", "hooks", "scripts"];

/// Name of the plugin metadata directory.
pub const PLUGIN_META_DIR: &str = ".claude-plugin";

/// Returns `true` if `name` is a valid plugin or skill name.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Check the marketplace root directory.
#[must_use]
pub fn check_marketplace(base: &Path, config: &StructureConfig) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    if !base.join(PLUGIN_META_DIR).join("marketplace.json").exists() {
        diags.push(Diagnostic::error(
            M001,
            "Missing .claude-plugin/marketplace.json file",
        ));
    }

    if !base.join("plugins").exists() {
        diags.push(Diagnostic::warning(
            M002,
            "No 'plugins/' directory found. This is okay if plugins are sourced externally.",
        ));
    }

    for file in &config.recommended_files {
        if !base.join(file).exists() {
            diags.push(Diagnostic::warning(
                M003,
                format!("Recommended file missing: {file}"),
            ));
        }
    }

    diags
}

/// Check a single plugin directory's layout.
#[must_use]
pub fn check_plugin(plugin_dir: &Path, config: &StructureConfig) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let name = dir_name(plugin_dir);

    if !is_valid_name(&name) {
        diags.push(Diagnostic::error(
            P001,
            format!(
                "{name}: Invalid plugin name. Must use lowercase letters, numbers, and hyphens only."
            ),
        ));
    }

    let meta_dir = plugin_dir.join(PLUGIN_META_DIR);
    let has_manifest = meta_dir.join("plugin.json").exists();
    let has_skill = plugin_dir.join("SKILL.md").exists();
    if !has_manifest && !has_skill {
        diags.push(Diagnostic::new(
            config.missing_manifest_severity,
            P002,
            format!(
                "{name}: Neither plugin.json nor SKILL.md found. \
                 This might be okay if strict=false in marketplace."
            ),
        ));
    }

    for comp in COMPONENT_DIRS {
        if meta_dir.join(comp).exists() {
            diags.push(Diagnostic::error(
                P003,
                format!("{name}: '{comp}/' should be at plugin root, not inside .claude-plugin/"),
            ));
        }
    }

    diags
}

/// Check a skill directory's layout.
#[must_use]
pub fn check_skill(skill_dir: &Path) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let name = dir_name(skill_dir);

    if !is_valid_name(&name) {
        diags.push(Diagnostic::error(
            K001,
            format!(
                "{name}: Invalid skill name. Must use lowercase letters, numbers, and hyphens only."
            ),
        ));
    }

    if !skill_dir.join("SKILL.md").exists() {
        diags.push(Diagnostic::error(
            K002,
            format!("{name}: Missing required SKILL.md file"),
        ));
    }

    if skill_dir.join("skills").join("SKILL.md").exists() {
        diags.push(Diagnostic::error(
            K003,
            format!("{name}: SKILL.md should be at root, not in skills/ subdirectory"),
        ));
    }

    for file in sorted_file_names(skill_dir) {
        if file.to_lowercase() == "skill.md" && file != "SKILL.md" {
            diags.push(Diagnostic::error(
                K004,
                format!("{name}: Found '{file}' but should be 'SKILL.md' (uppercase)"),
            ));
        }
    }

    diags
}

/// Run every structure check under `base`.
///
/// Plugins are visited in sorted order; entries under `plugins/` that are
/// not directories are ignored.
#[must_use]
pub fn validate_structure(base: &Path, config: &StructureConfig) -> StructureReport {
    tracing::debug!(base = %base.display(), "checking marketplace structure");

    let marketplace =
        ValidationResult::from_diagnostics(base, &check_marketplace(base, config));

    let plugins = sorted_subdirs(&base.join("plugins"))
        .into_iter()
        .map(|dir| {
            let mut diags = check_plugin(&dir, config);
            if dir.join("SKILL.md").exists() {
                diags.extend(check_skill(&dir));
            }
            let result = ValidationResult::from_diagnostics(relative_to(&dir, base), &diags);
            tracing::debug!(plugin = %result.file().display(), valid = result.is_valid());
            result
        })
        .collect();

    StructureReport::new(marketplace, plugins)
}
