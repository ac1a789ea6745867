//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use quire_nav::Severity;
use quire_static::StaticBuilder;

use crate::config::{project_root, ConfigFile};

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    minify: Option<bool>,
    strict: bool,
) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = ConfigFile::load(config_path)?;
    let mut config = file_config.into_build_config(&project_root(config_path));

    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(minify) = minify {
        config.minify = minify;
    }
    if strict {
        config.on_broken_links = Severity::Fail;
    }

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);
    if !result.sidebar_issues.is_empty() {
        tracing::warn!(
            "{} sidebar problem(s) found, run 'quire check' for details",
            result.sidebar_issues.len()
        );
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
