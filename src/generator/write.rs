use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::artifacts::Artifacts;
use super::templates::render_report;

/// Serialization format of the written artifact bundle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "routegen.json",
            OutputFormat::Yaml => "routegen.yaml",
        }
    }
}

/// Serialize artifacts in the given format
pub fn serialize_artifacts(artifacts: &Artifacts, format: OutputFormat) -> anyhow::Result<String> {
    let mut out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(artifacts)
            .context("Failed to serialize artifacts as JSON")?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(artifacts).context("Failed to serialize artifacts as YAML")?
        }
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Write the artifact bundle into `out_dir`, creating it if needed
///
/// Returns the path of the written file.
pub fn write_artifacts(
    out_dir: &Path,
    artifacts: &Artifacts,
    format: OutputFormat,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
    let path = out_dir.join(format.file_name());
    let content = serialize_artifacts(artifacts, format)?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote artifacts");
    Ok(path)
}

/// Write the route report as `routes.txt` into `out_dir`
pub fn write_report(out_dir: &Path, artifacts: &Artifacts) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
    let path = out_dir.join("routes.txt");
    let report = render_report(artifacts)?;
    fs::write(&path, report).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote route report");
    Ok(path)
}
