//! Project configuration (quire.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use quire_components::HomepageFeatures;
use quire_docs::RouteOptions;
use quire_nav::Severity;
use quire_static::{BuildConfig, Footer, Navbar, SiteMetadata};

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub site: SiteConfig,
    pub docs: DocsConfig,
    pub navbar: Navbar,
    pub footer: Footer,
    pub homepage: HomepageFeatures,
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    #[serde(flatten)]
    pub metadata: SiteMetadata,
    pub base_url: String,
    pub trailing_slash: bool,
    pub on_broken_links: Severity,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            metadata: SiteMetadata::default(),
            base_url: "/".to_string(),
            trailing_slash: false,
            on_broken_links: Severity::Warn,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub dir: String,
    pub output: String,
    pub sidebar_path: String,
    pub route_base_path: String,
    pub edit_url: Option<String>,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: "docs".to_string(),
            output: "build".to_string(),
            sidebar_path: "sidebars.json".to_string(),
            route_base_path: "docs".to_string(),
            edit_url: None,
            styles: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self { minify: true }
    }
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    ///
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// URL layout of the site.
    pub fn routes(&self) -> RouteOptions {
        RouteOptions {
            base_url: self.site.base_url.clone(),
            route_base_path: self.docs.route_base_path.clone(),
            trailing_slash: self.site.trailing_slash,
        }
    }

    /// Convert into a builder configuration.
    ///
    /// Relative paths are resolved against `root`, the directory holding the
    /// config file.
    pub fn into_build_config(self, root: &Path) -> BuildConfig {
        let routes = self.routes();

        BuildConfig {
            project_root: root.to_path_buf(),
            docs_dir: root.join(&self.docs.dir),
            output_dir: root.join(&self.docs.output),
            sidebar_path: Some(root.join(&self.docs.sidebar_path)),
            minify: self.build.minify,
            routes,
            on_broken_links: self.site.on_broken_links,
            edit_url: self.docs.edit_url,
            styles: self
                .docs
                .styles
                .iter()
                .map(|style| root.join(style).display().to_string())
                .collect(),
            site: self.site.metadata,
            navbar: self.navbar,
            footer: self.footer,
            homepage: self.homepage,
        }
    }
}

/// Directory a config path is relative to.
pub fn project_root(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
