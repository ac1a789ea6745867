//! The set of documents a site is built from.
//!
//! Documents are identified by their path below the docs directory, without
//! extension (`fundamentals/market-overview.md` is `fundamentals/market-overview`).
//! Sidebars resolve their references against this set.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use quire_nav::{DocLink, DocumentIndex, Sidebar, SidebarEntry, DEFAULT_SIDEBAR};

use crate::parser::{parse_doc, ParsedDoc};

/// How document ids map to URLs and output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOptions {
    /// Path the site is served under, e.g. "/pyDCMvnDocs/"
    pub base_url: String,

    /// Route prefix for documents, e.g. "docs"
    pub route_base_path: String,

    /// Whether page URLs end with a slash
    pub trailing_slash: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            route_base_path: "docs".to_string(),
            trailing_slash: false,
        }
    }
}

impl RouteOptions {
    /// Base URL normalized to start and end with `/`.
    pub fn base(&self) -> String {
        let trimmed = self.base_url.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        }
    }

    /// Absolute URL of a site-relative path such as "/docs/intro".
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base(), path.trim_start_matches('/'))
    }

    /// Permalink of a document given its id or slug.
    pub fn doc_permalink(&self, path: &str) -> String {
        let route = [self.route_base_path.trim_matches('/'), path.trim_matches('/')]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        let url = self.url(&route);
        if self.trailing_slash && !url.ends_with('/') {
            format!("{}/", url)
        } else {
            url
        }
    }

    /// Output file for a permalink, relative to the output directory.
    pub fn output_file(&self, permalink: &str) -> PathBuf {
        let base = self.base();
        let relative = permalink
            .strip_prefix(base.as_str())
            .unwrap_or(permalink)
            .trim_start_matches('/');

        if relative.is_empty() {
            PathBuf::from("index.html")
        } else if relative.ends_with('/') {
            Path::new(relative.trim_end_matches('/')).join("index.html")
        } else {
            PathBuf::from(format!("{}.html", relative))
        }
    }
}

/// A single documentation page.
#[derive(Debug, Clone)]
pub struct Document {
    /// Document id used by sidebars
    pub id: String,

    /// Source file
    pub source_path: PathBuf,

    /// Path relative to the docs directory
    pub relative_path: PathBuf,

    /// Resolved page title
    pub title: String,

    /// Label used in navigation
    pub sidebar_label: String,

    /// Absolute URL path
    pub permalink: String,

    /// Parsed contents
    pub parsed: ParsedDoc,
}

impl Document {
    /// Build a document from its source text.
    pub fn from_source(
        source: &str,
        source_path: PathBuf,
        relative_path: PathBuf,
        routes: &RouteOptions,
    ) -> Result<Self, ScanError> {
        let parsed = parse_doc(source).map_err(|e| ScanError::Parse {
            path: source_path.display().to_string(),
            message: e.to_string(),
        })?;

        let id = doc_id(&relative_path, parsed.frontmatter.id.as_deref());
        let title = parsed
            .frontmatter
            .title
            .clone()
            .or_else(|| parsed.first_heading().map(str::to_string))
            .unwrap_or_else(|| id.rsplit('/').next().unwrap_or(&id).to_string());
        let sidebar_label = parsed
            .frontmatter
            .sidebar_label
            .clone()
            .unwrap_or_else(|| title.clone());
        let permalink = routes.doc_permalink(parsed.frontmatter.slug.as_deref().unwrap_or(&id));

        Ok(Self {
            id,
            source_path,
            relative_path,
            title,
            sidebar_label,
            permalink,
            parsed,
        })
    }
}

/// Derive a document id from its relative path.
fn doc_id(relative: &Path, frontmatter_id: Option<&str>) -> String {
    let mut segments: Vec<String> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();

    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    segments.push(frontmatter_id.unwrap_or(stem).to_string());

    segments.join("/")
}

/// Errors that can occur while scanning the docs directory.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Docs directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Duplicate document id '{id}' ({first} and {second})")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Duplicate permalink '{permalink}' ({first} and {second})")]
    DuplicatePermalink {
        permalink: String,
        first: String,
        second: String,
    },
}

/// All documents of a site, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    docs: BTreeMap<String, Document>,
    /// Permalink to owning document id
    permalinks: BTreeMap<String, String>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a docs directory for `.md` and `.mdx` files.
    ///
    /// Files and directories starting with `_` are skipped.
    pub fn scan(docs_dir: &Path, routes: &RouteOptions) -> Result<Self, ScanError> {
        if !docs_dir.exists() {
            return Err(ScanError::DirectoryNotFound(docs_dir.display().to_string()));
        }

        let mut set = Self::new();

        let walker = WalkDir::new(docs_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('_')
            });

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "md" && ext != "mdx" {
                continue;
            }

            let source = fs::read_to_string(path).map_err(|e| ScanError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let relative_path = path.strip_prefix(docs_dir).unwrap_or(path).to_path_buf();
            let doc = Document::from_source(&source, path.to_path_buf(), relative_path, routes)?;
            tracing::debug!("Found document {} at {}", doc.id, path.display());
            set.insert(doc)?;
        }

        Ok(set)
    }

    /// Add a document, rejecting duplicate ids and permalinks.
    pub fn insert(&mut self, doc: Document) -> Result<(), ScanError> {
        if let Some(existing) = self.docs.get(&doc.id) {
            return Err(ScanError::DuplicateId {
                id: doc.id.clone(),
                first: existing.relative_path.display().to_string(),
                second: doc.relative_path.display().to_string(),
            });
        }

        if let Some(existing) = self
            .permalinks
            .get(&doc.permalink)
            .and_then(|id| self.docs.get(id))
        {
            return Err(ScanError::DuplicatePermalink {
                permalink: doc.permalink.clone(),
                first: existing.relative_path.display().to_string(),
                second: doc.relative_path.display().to_string(),
            });
        }

        self.permalinks.insert(doc.permalink.clone(), doc.id.clone());
        self.docs.insert(doc.id.clone(), doc);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.docs.get(id)
    }

    /// Documents ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.values()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Sidebar derived from the directory layout.
    ///
    /// Documents at each level come first (by file path), followed by one
    /// category per subdirectory.
    pub fn generated_sidebar(&self) -> Sidebar {
        let mut docs: Vec<&Document> = self.docs.values().collect();
        docs.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        let mut root = DirNode::default();
        for doc in docs {
            let mut node = &mut root;
            if let Some(parent) = doc.relative_path.parent() {
                for component in parent.components() {
                    let name = component.as_os_str().to_string_lossy().to_string();
                    node = node.dirs.entry(name).or_default();
                }
            }
            node.docs.push(doc.id.clone());
        }

        Sidebar::new(DEFAULT_SIDEBAR, root.into_entries())
    }
}

impl DocumentIndex for DocumentSet {
    fn resolve(&self, id: &str) -> Option<DocLink> {
        self.docs
            .get(id)
            .map(|doc| DocLink::new(doc.sidebar_label.clone(), doc.permalink.clone()))
    }
}

#[derive(Default)]
struct DirNode {
    docs: Vec<String>,
    dirs: BTreeMap<String, DirNode>,
}

impl DirNode {
    fn into_entries(self) -> Vec<SidebarEntry> {
        let mut entries: Vec<SidebarEntry> = self.docs.into_iter().map(SidebarEntry::doc).collect();

        for (name, dir) in self.dirs {
            entries.push(SidebarEntry::category(capitalize(&name), dir.into_entries()));
        }

        entries
    }
}

/// Capitalize a directory name for use as a category label.
fn capitalize(s: &str) -> String {
    let spaced = s.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
