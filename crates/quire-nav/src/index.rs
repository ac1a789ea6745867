//! Lookup seam between sidebars and the document collection.

use std::collections::BTreeMap;

use serde::Serialize;

/// Where a resolved document lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocLink {
    /// Title shown in navigation
    pub title: String,
    /// Absolute URL path
    pub permalink: String,
}

impl DocLink {
    pub fn new(title: impl Into<String>, permalink: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            permalink: permalink.into(),
        }
    }
}

/// A set of documents that sidebar ids resolve against.
pub trait DocumentIndex {
    /// Resolve a document id to its navigation link.
    fn resolve(&self, id: &str) -> Option<DocLink>;

    /// Check whether the id names an existing document.
    fn contains(&self, id: &str) -> bool {
        self.resolve(id).is_some()
    }
}

impl DocumentIndex for BTreeMap<String, DocLink> {
    fn resolve(&self, id: &str) -> Option<DocLink> {
        self.get(id).cloned()
    }
}
