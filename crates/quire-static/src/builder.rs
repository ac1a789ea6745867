//! Static site builder.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use std::time::Instant;

use rayon::prelude::*;
use regex::Regex;

use quire_components::{Component as _, HomepageFeatures};
use quire_docs::{Document, DocumentSet, RouteOptions, ScanError};
use quire_nav::{
    load_sidebars, read_sidebars, render_sidebar, Severity, SidebarFileError, Sidebars,
    ValidationError, ValidationErrors,
};

use crate::assets::AssetPipeline;
use crate::site::{Footer, Navbar, SiteMetadata};
use crate::templates::{Context, Layout, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Project directory; edit links are relative to it
    pub project_root: PathBuf,

    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Sidebars file; a sidebar is generated from the docs layout when unset
    /// or missing
    pub sidebar_path: Option<PathBuf>,

    /// Minify CSS output
    pub minify: bool,

    /// URL layout
    pub routes: RouteOptions,

    /// What to do with sidebar problems
    pub on_broken_links: Severity,

    /// Repository URL prefix for "Edit this page" links
    pub edit_url: Option<String>,

    /// Paths to extra CSS stylesheets to include
    pub styles: Vec<String>,

    pub site: SiteMetadata,
    pub navbar: Navbar,
    pub footer: Footer,
    pub homepage: HomepageFeatures,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            docs_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("build"),
            sidebar_path: None,
            minify: true,
            routes: RouteOptions::default(),
            on_broken_links: Severity::Warn,
            edit_url: None,
            styles: vec![],
            site: SiteMetadata::default(),
            navbar: Navbar::default(),
            footer: Footer::default(),
            homepage: HomepageFeatures::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of documentation pages generated
    pub pages: usize,

    /// Sidebar problems tolerated under the configured severity
    pub sidebar_issues: Vec<ValidationError>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    SidebarFile(#[from] SidebarFileError),

    #[error("Sidebar validation failed: {0}")]
    Sidebars(#[from] ValidationErrors),

    #[error("Failed to read: {0}")]
    ReadError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Documents and sidebars a site is built from.
#[derive(Debug)]
pub struct SiteSources {
    pub docs: DocumentSet,
    pub sidebars: Sidebars,
    /// Sidebar problems tolerated under the configured severity
    pub issues: Vec<ValidationError>,
}

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("valid regex"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(#+|>|[-*+]|\d+\.)\s+|[*_`~|]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Longest search excerpt, in characters.
const SEARCH_EXCERPT_CHARS: usize = 300;

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Scan documents and load the sidebars against them.
    pub fn load(&self) -> Result<SiteSources, BuildError> {
        let docs = DocumentSet::scan(&self.config.docs_dir, &self.config.routes)?;
        tracing::debug!("Found {} documents", docs.len());

        let sidebar_file = self
            .config
            .sidebar_path
            .as_ref()
            .filter(|path| path.exists());

        let (sidebars, issues) = match sidebar_file {
            Some(path) => {
                let raw = read_sidebars(path)?;
                let loaded = load_sidebars(&raw, &docs, self.config.on_broken_links)?;
                tracing::debug!(
                    "Loaded {} sidebars from {}",
                    loaded.sidebars.len(),
                    path.display()
                );
                (loaded.sidebars, loaded.issues)
            }
            None => {
                tracing::info!("No sidebars file, generating sidebar from docs layout");
                let mut sidebars = Sidebars::new();
                sidebars.insert(docs.generated_sidebar());
                (sidebars, Vec::new())
            }
        };

        Ok(SiteSources {
            docs,
            sidebars,
            issues,
        })
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let sources = self.load()?;

        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let layout = self.layout(&sources);

        // Render pages in parallel
        let docs: Vec<&Document> = sources.docs.iter().collect();
        docs.par_iter()
            .map(|doc| self.build_page(doc, &sources, &layout))
            .collect::<Result<Vec<()>, BuildError>>()?;

        let has_index_doc = docs
            .iter()
            .any(|doc| self.config.routes.output_file(&doc.permalink) == Path::new("index.html"));
        if has_index_doc {
            tracing::info!("A document is served at the site root, skipping homepage");
        } else {
            self.build_homepage(&layout)?;
        }

        self.build_not_found(&layout)?;
        self.generate_assets()?;
        self.generate_search_index(&docs)?;
        self.generate_sitemap(&docs, !has_index_doc)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: docs.len(),
            sidebar_issues: sources.issues,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Chrome shared by every page.
    fn layout(&self, sources: &SiteSources) -> Layout {
        let base_url = self.config.routes.base();

        Layout {
            site: self.config.site.clone(),
            navbar: self.config.navbar.resolve(
                &self.config.site,
                &self.config.routes,
                &sources.sidebars,
                &sources.docs,
            ),
            footer: self.config.footer.resolve(&self.config.routes),
            styles: self
                .config
                .styles
                .iter()
                .map(|s| format!("{}assets/{}", base_url, stylesheet_name(s)))
                .collect(),
            base_url,
        }
    }

    /// Build a single documentation page.
    fn build_page(
        &self,
        doc: &Document,
        sources: &SiteSources,
        layout: &Layout,
    ) -> Result<(), BuildError> {
        let sidebar = sources.sidebars.sidebar_for(&doc.id);
        if sidebar.is_none() {
            tracing::debug!("Document '{}' is not in any sidebar", doc.id);
        }

        let frontmatter = &doc.parsed.frontmatter;

        let mut context = Context::new(layout, doc.title.clone());
        context.description = frontmatter.description.clone();
        context.content = doc.parsed.render_html();
        context.edit_url = self.edit_url(doc);

        if let Some(sidebar) = sidebar {
            context.sidebar = render_sidebar(sidebar, &sources.docs, Some(&doc.id));
            context.pagination = sidebar.pagination(&doc.id, &sources.docs);
        }

        if !frontmatter.hide_table_of_contents {
            context.toc = doc
                .parsed
                .toc
                .iter()
                .filter(|entry| (2..=3).contains(&entry.level))
                .cloned()
                .collect();
        }

        let html = self
            .templates
            .render_page("doc.html", &context)
            .map_err(|e| BuildError::TemplateError(format!("{}: {}", doc.id, e)))?;

        let output_path = self
            .config
            .output_dir
            .join(self.config.routes.output_file(&doc.permalink));
        write_file(&output_path, html)
    }

    /// "Edit this page" URL, relative to the project root.
    fn edit_url(&self, doc: &Document) -> Option<String> {
        let base = self.config.edit_url.as_ref()?;

        let docs_dir = &self.config.docs_dir;
        let project_docs_dir = match docs_dir.strip_prefix(&self.config.project_root) {
            Ok(relative) => relative,
            Err(_) => {
                tracing::debug!(
                    "{} is outside {}, linking by directory name",
                    docs_dir.display(),
                    self.config.project_root.display()
                );
                docs_dir.file_name().map(Path::new).unwrap_or(Path::new(""))
            }
        };

        let segments: Vec<String> = project_docs_dir
            .join(&doc.relative_path)
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();

        Some(format!("{}/{}", base.trim_end_matches('/'), segments.join("/")))
    }

    fn build_homepage(&self, layout: &Layout) -> Result<(), BuildError> {
        let mut context = Context::new(layout, layout.site.title.clone());
        if !layout.site.tagline.is_empty() {
            context.description = Some(layout.site.tagline.clone());
        }
        if !self.config.homepage.is_empty() {
            tracing::debug!("Rendering {} on the homepage", self.config.homepage.name());
            context.content = self.config.homepage.to_html();
        }

        let html = self
            .templates
            .render_page("home.html", &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        write_file(&self.config.output_dir.join("index.html"), html)
    }

    fn build_not_found(&self, layout: &Layout) -> Result<(), BuildError> {
        let context = Context::new(layout, "Page Not Found");

        let html = self
            .templates
            .render_page("404.html", &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        write_file(&self.config.output_dir.join("404.html"), html)
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Serving unminified CSS: {}", e);
                css
            })
        } else {
            css
        };
        write_file(&assets_dir.join("main.css"), css)?;

        // Copy configured stylesheets
        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if !source_path.exists() {
                tracing::warn!("Stylesheet not found: {}", style_path);
                continue;
            }

            let content = fs::read_to_string(&source_path).map_err(|e| {
                BuildError::ReadError(format!("stylesheet {}: {}", style_path, e))
            })?;
            let content = if self.config.minify {
                AssetPipeline::minify_css(&content).unwrap_or(content)
            } else {
                content
            };
            write_file(&assets_dir.join(stylesheet_name(style_path)), content)?;
            tracing::info!("Copied stylesheet from {}", style_path);
        }

        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(&self, docs: &[&Document]) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = docs
            .iter()
            .map(|doc| {
                serde_json::json!({
                    "id": doc.id,
                    "title": doc.title,
                    "description": doc.parsed.frontmatter.description.clone().unwrap_or_default(),
                    "url": doc.permalink,
                    "content": search_excerpt(&doc.parsed.content),
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        write_file(&self.config.output_dir.join("search-index.json"), json)
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, docs: &[&Document], with_home: bool) -> Result<(), BuildError> {
        let origin = self.config.site.url.trim_end_matches('/');

        let home = with_home.then(|| self.config.routes.base());
        let urls: Vec<String> = home
            .into_iter()
            .chain(docs.iter().map(|doc| doc.permalink.clone()))
            .map(|url| {
                format!(
                    "  <url>\n    <loc>{}{}</loc>\n  </url>",
                    origin,
                    html_escape::encode_text(&url)
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        write_file(&self.config.output_dir.join("sitemap.xml"), sitemap)?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}{}sitemap.xml\n",
            origin,
            self.config.routes.base()
        );
        write_file(&self.config.output_dir.join("robots.txt"), robots)
    }
}

fn write_file(path: &Path, contents: String) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }

    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

fn stylesheet_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("style.css")
        .to_string()
}

/// Plain-text excerpt of markdown for the search index.
fn search_excerpt(markdown: &str) -> String {
    let text = CODE_FENCE.replace_all(markdown, " ");
    let text = MARKDOWN_LINK.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, " ");
    let text = MARKUP.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");

    text.trim().chars().take(SEARCH_EXCERPT_CHARS).collect()
}
