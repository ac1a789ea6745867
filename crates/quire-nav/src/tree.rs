//! Validated sidebar tree.

use std::collections::BTreeMap;

use serde::Serialize;

/// Name of the sidebar generated when no sidebars file exists.
pub const DEFAULT_SIDEBAR: &str = "tutorialSidebar";

/// Reference to a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRef {
    /// Document identifier (e.g. "fundamentals/market-overview")
    pub id: String,

    /// Label override from the explicit `{type: "doc"}` form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DocRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }
}

/// A named group of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Display label
    pub label: String,

    /// Children, in author order
    pub items: Vec<SidebarEntry>,

    /// Render collapsed unless it holds the active page
    pub collapsed: bool,
}

/// One node of a sidebar tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SidebarEntry {
    Doc(DocRef),
    Category(Category),
}

impl SidebarEntry {
    /// Shorthand for a doc leaf.
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc(DocRef::new(id))
    }

    /// Shorthand for an expanded category.
    pub fn category(label: impl Into<String>, items: Vec<SidebarEntry>) -> Self {
        Self::Category(Category {
            label: label.into(),
            items,
            collapsed: false,
        })
    }
}

/// Depth-first, pre-order list of the doc leaves below `entries`.
///
/// Category nodes contribute only their descendants.
pub fn flatten(entries: &[SidebarEntry]) -> Vec<&DocRef> {
    let mut out = Vec::new();
    collect_docs(entries, &mut out);
    out
}

fn collect_docs<'a>(entries: &'a [SidebarEntry], out: &mut Vec<&'a DocRef>) {
    for entry in entries {
        match entry {
            SidebarEntry::Doc(doc) => out.push(doc),
            SidebarEntry::Category(category) => collect_docs(&category.items, out),
        }
    }
}

/// One root collection of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub name: String,
    pub entries: Vec<SidebarEntry>,
}

impl Sidebar {
    pub fn new(name: impl Into<String>, entries: Vec<SidebarEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Linear reading order used for previous/next links.
    pub fn flatten(&self) -> Vec<&DocRef> {
        flatten(&self.entries)
    }

    /// Check whether the document appears anywhere in this sidebar.
    pub fn contains(&self, id: &str) -> bool {
        self.flatten().iter().any(|doc| doc.id == id)
    }

    /// First document in reading order.
    pub fn first_doc(&self) -> Option<&DocRef> {
        self.flatten().into_iter().next()
    }
}

/// All sidebars of a site, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidebars {
    sidebars: BTreeMap<String, Sidebar>,
}

impl Sidebars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sidebar, replacing any with the same name.
    pub fn insert(&mut self, sidebar: Sidebar) {
        self.sidebars.insert(sidebar.name.clone(), sidebar);
    }

    pub fn get(&self, name: &str) -> Option<&Sidebar> {
        self.sidebars.get(name)
    }

    /// Sidebar displayed next to the given document (first by name).
    pub fn sidebar_for(&self, id: &str) -> Option<&Sidebar> {
        self.sidebars.values().find(|sidebar| sidebar.contains(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sidebar> {
        self.sidebars.values()
    }

    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }
}
