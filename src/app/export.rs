use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use nest_analysis::clustering::ClusterLabel;

pub fn write_labels(path: &Path, labels: &[ClusterLabel]) -> Result<()> {
    let json = serde_json::to_string_pretty(labels).context("failed to serialize cluster labels")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write cluster labels to {}", path.display()))?;
    log::info!("wrote {} cluster labels to {}", labels.len(), path.display());
    Ok(())
}
