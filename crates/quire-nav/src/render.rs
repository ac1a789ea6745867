//! Sidebar rendering contract consumed by page templates.

use serde::Serialize;

use crate::index::DocumentIndex;
use crate::tree::{DocRef, Sidebar, SidebarEntry};

/// Kind of a rendered navigation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavKind {
    Doc,
    Category,
}

/// A navigation item ready for templating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub kind: NavKind,
    /// Display label
    pub label: String,
    /// Link target; `None` for categories and broken references
    pub href: Option<String>,
    /// This item is, or contains, the current page
    pub active: bool,
    /// Reference to a document that does not exist
    pub broken: bool,
    /// Category starts collapsed
    pub collapsed: bool,
    /// Child items
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Render a sidebar into navigation items, marking the active document.
pub fn render_sidebar<D: DocumentIndex + ?Sized>(
    sidebar: &Sidebar,
    docs: &D,
    active: Option<&str>,
) -> Vec<NavItem> {
    sidebar
        .entries
        .iter()
        .map(|entry| render_entry(entry, docs, active))
        .collect()
}

fn render_entry<D: DocumentIndex + ?Sized>(
    entry: &SidebarEntry,
    docs: &D,
    active: Option<&str>,
) -> NavItem {
    match entry {
        SidebarEntry::Doc(doc) => {
            let link = docs.resolve(&doc.id);
            let label = doc
                .label
                .clone()
                .or_else(|| link.as_ref().map(|l| l.title.clone()))
                .unwrap_or_else(|| doc.id.clone());

            NavItem {
                kind: NavKind::Doc,
                label,
                broken: link.is_none(),
                href: link.map(|l| l.permalink),
                active: active == Some(doc.id.as_str()),
                collapsed: false,
                children: Vec::new(),
            }
        }
        SidebarEntry::Category(category) => {
            let children: Vec<NavItem> = category
                .items
                .iter()
                .map(|child| render_entry(child, docs, active))
                .collect();
            let active = children.iter().any(|child| child.active);

            NavItem {
                kind: NavKind::Category,
                label: category.label.clone(),
                href: None,
                active,
                broken: false,
                collapsed: category.collapsed && !active,
                children,
            }
        }
    }
}

/// A previous or next link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub title: String,
    pub permalink: String,
}

/// Neighbours of a document in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
}

impl Sidebar {
    /// Previous/next links around the first occurrence of `id`.
    ///
    /// Neighbours that do not resolve are skipped over.
    pub fn pagination<D: DocumentIndex + ?Sized>(&self, id: &str, docs: &D) -> Pagination {
        let order = self.flatten();
        let Some(position) = order.iter().position(|doc| doc.id == id) else {
            return Pagination::default();
        };

        let link = |doc: &&DocRef| {
            docs.resolve(&doc.id).map(|resolved| PageLink {
                title: doc.label.clone().unwrap_or(resolved.title),
                permalink: resolved.permalink,
            })
        };

        Pagination {
            previous: order[..position].iter().rev().find_map(link),
            next: order[position + 1..].iter().find_map(link),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::index::DocLink;
    use crate::tree::{Category, DocRef};

    fn docs() -> BTreeMap<String, DocLink> {
        [
            ("intro", "Introduction"),
            ("setup", "Setup"),
            ("install", "Install"),
        ]
        .into_iter()
        .map(|(id, title)| {
            (
                id.to_string(),
                DocLink::new(title, format!("/docs/{}", id)),
            )
        })
        .collect()
    }

    fn sidebar() -> Sidebar {
        Sidebar::new(
            "tutorialSidebar",
            vec![
                SidebarEntry::doc("intro"),
                SidebarEntry::Category(Category {
                    label: "Getting Started".to_string(),
                    items: vec![SidebarEntry::doc("setup"), SidebarEntry::doc("install")],
                    collapsed: true,
                }),
            ],
        )
    }

    #[test]
    fn renders_labels_and_links() {
        let nav = render_sidebar(&sidebar(), &docs(), None);

        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].label, "Introduction");
        assert_eq!(nav[0].href.as_deref(), Some("/docs/intro"));
        assert_eq!(nav[1].kind, NavKind::Category);
        assert_eq!(nav[1].label, "Getting Started");
        assert!(nav[1].collapsed);
        let children: Vec<_> = nav[1].children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(children, vec!["Setup", "Install"]);
    }

    #[test]
    fn active_doc_expands_its_category() {
        let nav = render_sidebar(&sidebar(), &docs(), Some("install"));

        assert!(!nav[0].active);
        assert!(nav[1].active);
        assert!(!nav[1].collapsed);
        assert!(nav[1].children[1].active);
    }

    #[test]
    fn broken_reference_renders_without_link() {
        let sidebar = Sidebar::new(
            "main",
            vec![SidebarEntry::Doc(DocRef {
                id: "gone".to_string(),
                label: None,
            })],
        );

        let nav = render_sidebar(&sidebar, &docs(), None);

        assert!(nav[0].broken);
        assert_eq!(nav[0].href, None);
        assert_eq!(nav[0].label, "gone");
    }

    #[test]
    fn paginates_in_reading_order() {
        let sidebar = sidebar();
        let docs = docs();

        let first = sidebar.pagination("intro", &docs);
        assert_eq!(first.previous, None);
        assert_eq!(first.next.map(|l| l.title), Some("Setup".to_string()));

        let middle = sidebar.pagination("setup", &docs);
        assert_eq!(
            middle.previous.map(|l| l.permalink),
            Some("/docs/intro".to_string())
        );
        assert_eq!(
            middle.next.map(|l| l.permalink),
            Some("/docs/install".to_string())
        );

        let last = sidebar.pagination("install", &docs);
        assert_eq!(last.next, None);
    }

    #[test]
    fn pagination_skips_broken_neighbours() {
        let sidebar = Sidebar::new(
            "main",
            vec![
                SidebarEntry::doc("intro"),
                SidebarEntry::doc("gone"),
                SidebarEntry::doc("setup"),
            ],
        );

        let pagination = sidebar.pagination("intro", &docs());

        assert_eq!(pagination.next.map(|l| l.title), Some("Setup".to_string()));
        assert_eq!(sidebar.pagination("unknown", &docs()), Pagination::default());
    }
}
