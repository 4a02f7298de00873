//! Generator configuration
//!
//! Settings are read from a `routegen.toml` file that sits alongside the schema
//! document (or is passed explicitly) and can be overridden per run from the
//! command line.
//!
//! ```toml
//! options_key = "cmd"
//! fallback_status = 500
//! unmapped = "skip"          # or "error"
//! error_code_scope = "enum"  # or "schema"
//! max_depth = 8
//! ```

use anyhow::{bail, Context};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the schema document
pub const CONFIG_FILE_NAME: &str = "routegen.toml";

/// What to do with methods that have neither an HTTP mapping nor options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Leave the method out of every table
    #[default]
    Skip,
    /// Record an `UnmappedMethod` failure for the method
    Error,
}

/// Scope within which enum error codes must be unique
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCodeScope {
    #[default]
    Enum,
    Schema,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Generic-option key whose text value becomes the operation identifier
    pub options_key: String,
    /// HTTP status for error values with no status of their own or from their enum
    pub fallback_status: u16,
    pub unmapped: UnmappedPolicy,
    pub error_code_scope: ErrorCodeScope,
    /// Maximum number of components in a dotted field reference
    pub max_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            options_key: "cmd".to_string(),
            fallback_status: 500,
            unmapped: UnmappedPolicy::Skip,
            error_code_scope: ErrorCodeScope::Enum,
            max_depth: 8,
        }
    }
}

impl GeneratorConfig {
    /// Reject settings no generation run can honour
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.options_key.trim().is_empty() {
            bail!("options_key must not be empty");
        }
        if !(100..=599).contains(&self.fallback_status) {
            bail!(
                "fallback_status {} is not an HTTP status code (100-599)",
                self.fallback_status
            );
        }
        if self.max_depth == 0 {
            bail!("max_depth must be at least 1");
        }
        Ok(())
    }
}

/// Load and validate a configuration file
pub fn load_config(config_path: &Path) -> anyhow::Result<GeneratorConfig> {
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", config_path.display()))?;
    Ok(config)
}

/// `routegen.toml` in the schema's directory, if present
pub fn auto_detect_config_path(schema_path: &Path) -> Option<PathBuf> {
    let config_path = schema_path.parent()?.join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the schema
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, schema_path: &Path) -> Option<PathBuf> {
    match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => auto_detect_config_path(schema_path),
    }
}

/// Resolve and load the config for a schema, falling back to defaults
///
/// An explicit path that cannot be read is an error; a missing auto-detected
/// file is not.
pub fn load_config_for(
    explicit_path: Option<&Path>,
    schema_path: &Path,
) -> anyhow::Result<GeneratorConfig> {
    match resolve_config_path(explicit_path, schema_path) {
        Some(path) => {
            tracing::debug!(config = %path.display(), "Loading generator config");
            load_config(&path)
        }
        None => Ok(GeneratorConfig::default()),
    }
}
