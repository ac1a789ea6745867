//! Sidebar validation command.

use std::path::Path;

use anyhow::Result;
use quire_nav::Severity;
use quire_static::StaticBuilder;

use crate::config::{project_root, ConfigFile};

/// Run the check command.
///
/// Reports every sidebar problem. Fails when any exist and the configured
/// severity is `fail` or `strict` is set.
pub async fn run(config_path: &Path, strict: bool) -> Result<()> {
    let file_config = ConfigFile::load(config_path)?;
    let mut config = file_config.into_build_config(&project_root(config_path));

    let severity = if strict {
        Severity::Fail
    } else {
        config.on_broken_links
    };
    // Collect everything here and decide below
    config.on_broken_links = Severity::Ignore;

    let sources = StaticBuilder::new(config).load()?;

    for issue in &sources.issues {
        tracing::warn!("{}", issue);
    }

    let pages: usize = sources.sidebars.iter().map(|s| s.flatten().len()).sum();
    tracing::info!(
        "Checked {} sidebar(s) with {} entries against {} documents: {} problem(s)",
        sources.sidebars.len(),
        pages,
        sources.docs.len(),
        sources.issues.len()
    );

    if severity == Severity::Fail && !sources.issues.is_empty() {
        anyhow::bail!("{} sidebar problem(s) found", sources.issues.len());
    }

    Ok(())
}
