//! Optional `marketlint.toml` configuration.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! CLI flags override whatever the file sets.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostics::Severity;
use crate::errors::{MarketlintError, Result};

/// File name looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "marketlint.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub schemas: SchemaPaths,
    pub structure: StructureConfig,
}

/// Locations of the three schema documents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaPaths {
    pub marketplace: PathBuf,
    pub plugin: PathBuf,
    pub frontmatter: PathBuf,
}

impl Default for SchemaPaths {
    fn default() -> Self {
        Self {
            marketplace: PathBuf::from("schemas/marketplace-schema.json"),
            plugin: PathBuf::from("schemas/plugin-schema.json"),
            frontmatter: PathBuf::from("schemas/skill-frontmatter-schema.json"),
        }
    }
}

/// Tunables for the structure checker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StructureConfig {
    /// Severity when a plugin has neither `plugin.json` nor `SKILL.md`.
    ///
    /// Marketplaces whose entries are all `strict: true` should set this to
    /// `error`; the default tolerates manifest-less plugins.
    pub missing_manifest_severity: Severity,
    /// Top-level files whose absence is warned about.
    pub recommended_files: Vec<String>,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            missing_manifest_severity: Severity::Warning,
            recommended_files: ["README.md", "CHANGELOG.md", ".gitignore"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] is read if present and defaults are used
    /// otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) if !p.exists() => {
                return Err(MarketlintError::NotFound {
                    kind: "Config file",
                    path: p.to_path_buf(),
                });
            }
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };
        tracing::debug!(path = %path.display(), "loading config");
        Self::from_toml(&std::fs::read_to_string(&path)?)
    }
}
