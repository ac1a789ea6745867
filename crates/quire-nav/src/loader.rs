//! Sidebar loading and validation.
//!
//! Raw sidebars arrive as loosely-typed values (a document id string, or an
//! object with a `type` discriminator). Loading turns them into
//! [`SidebarEntry`] trees and collects every problem it finds instead of
//! stopping at the first one. What happens to those problems is decided by
//! the [`Severity`] the caller passes in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::index::DocumentIndex;
use crate::tree::{Category, DocRef, Sidebar, SidebarEntry, Sidebars};

/// How sidebar problems affect the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Record problems without logging them
    Ignore,
    /// Log each problem and keep going
    #[default]
    Warn,
    /// Reject the sidebars if any problem exists
    Fail,
}

/// A single problem found while loading a sidebar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{location}: document '{id}' does not exist")]
    UnresolvedReference { location: String, id: String },

    #[error("{location}: category '{label}' has no items")]
    EmptyCategory { location: String, label: String },

    #[error("{location}: {reason}")]
    MalformedNode { location: String, reason: String },
}

impl ValidationError {
    /// Path of the offending node, e.g. `tutorialSidebar[1].items[0]`.
    pub fn location(&self) -> &str {
        match self {
            Self::UnresolvedReference { location, .. }
            | Self::EmptyCategory { location, .. }
            | Self::MalformedNode { location, .. } => location,
        }
    }
}

/// Every problem found, returned when the severity is [`Severity::Fail`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} sidebar problem(s) found", .0.len())]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationError] {
        &self.0
    }
}

/// A loaded sidebar together with the problems tolerated while loading it.
#[derive(Debug, Clone)]
pub struct LoadedSidebar {
    pub sidebar: Sidebar,
    pub issues: Vec<ValidationError>,
}

/// All loaded sidebars together with the problems tolerated while loading them.
#[derive(Debug, Clone)]
pub struct LoadedSidebars {
    pub sidebars: Sidebars,
    pub issues: Vec<ValidationError>,
}

/// Load one sidebar from its raw item array.
pub fn load_sidebar<D: DocumentIndex + ?Sized>(
    name: &str,
    raw: &Value,
    docs: &D,
    severity: Severity,
) -> Result<LoadedSidebar, ValidationErrors> {
    let mut loader = Loader::new(docs);
    let sidebar = loader.sidebar(name, raw);
    let issues = apply_severity(loader.issues, severity)?;

    Ok(LoadedSidebar { sidebar, issues })
}

/// Load every sidebar from a raw object mapping names to item arrays.
pub fn load_sidebars<D: DocumentIndex + ?Sized>(
    raw: &Value,
    docs: &D,
    severity: Severity,
) -> Result<LoadedSidebars, ValidationErrors> {
    let mut loader = Loader::new(docs);
    let mut sidebars = Sidebars::new();

    match raw {
        Value::Object(map) => {
            for (name, items) in map {
                sidebars.insert(loader.sidebar(name, items));
            }
        }
        other => loader.malformed(
            "<root>",
            format!(
                "sidebars must be an object of named sidebars, found {}",
                kind_of(other)
            ),
        ),
    }

    let issues = apply_severity(loader.issues, severity)?;

    Ok(LoadedSidebars { sidebars, issues })
}

fn apply_severity(
    issues: Vec<ValidationError>,
    severity: Severity,
) -> Result<Vec<ValidationError>, ValidationErrors> {
    match severity {
        Severity::Ignore => Ok(issues),
        Severity::Warn => {
            for issue in &issues {
                tracing::warn!("{}", issue);
            }
            Ok(issues)
        }
        Severity::Fail if issues.is_empty() => Ok(issues),
        Severity::Fail => Err(ValidationErrors(issues)),
    }
}

struct Loader<'a, D: ?Sized> {
    docs: &'a D,
    issues: Vec<ValidationError>,
}

impl<'a, D: DocumentIndex + ?Sized> Loader<'a, D> {
    fn new(docs: &'a D) -> Self {
        Self {
            docs,
            issues: Vec::new(),
        }
    }

    fn sidebar(&mut self, name: &str, raw: &Value) -> Sidebar {
        let entries = match raw {
            Value::Array(items) => self.entries(items, name),
            other => {
                self.malformed(
                    name,
                    format!("sidebar must be an array of items, found {}", kind_of(other)),
                );
                Vec::new()
            }
        };

        Sidebar::new(name, entries)
    }

    fn entries(&mut self, items: &[Value], location: &str) -> Vec<SidebarEntry> {
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.entry(item, &format!("{}[{}]", location, i)))
            .collect()
    }

    fn entry(&mut self, node: &Value, location: &str) -> Option<SidebarEntry> {
        match node {
            Value::String(id) => self.doc(id, None, location),
            Value::Object(map) => match map.get("type") {
                Some(Value::String(kind)) => match kind.as_str() {
                    "category" => self.category(map, location),
                    "doc" => self.explicit_doc(map, location),
                    other => {
                        self.malformed(location, format!("unknown node type '{}'", other));
                        None
                    }
                },
                Some(other) => {
                    self.malformed(
                        location,
                        format!("'type' must be a string, found {}", kind_of(other)),
                    );
                    None
                }
                None => {
                    self.malformed(location, "object is missing a 'type' discriminator");
                    None
                }
            },
            other => {
                self.malformed(
                    location,
                    format!(
                        "expected a document id or an object, found {}",
                        kind_of(other)
                    ),
                );
                None
            }
        }
    }

    fn explicit_doc(&mut self, map: &Map<String, Value>, location: &str) -> Option<SidebarEntry> {
        let Some(id) = map.get("id").and_then(Value::as_str) else {
            self.malformed(location, "doc node requires a string 'id'");
            return None;
        };

        let label = match map.get("label") {
            None => None,
            Some(Value::String(label)) => Some(label.clone()),
            Some(other) => {
                self.malformed(
                    location,
                    format!("doc label must be a string, found {}", kind_of(other)),
                );
                return None;
            }
        };

        self.doc(id, label, location)
    }

    fn doc(&mut self, id: &str, label: Option<String>, location: &str) -> Option<SidebarEntry> {
        if id.trim().is_empty() {
            self.malformed(location, "document id must not be empty");
            return None;
        }

        // Broken references stay in the tree so they render as broken links.
        if !self.docs.contains(id) {
            self.issues.push(ValidationError::UnresolvedReference {
                location: location.to_string(),
                id: id.to_string(),
            });
        }

        Some(SidebarEntry::Doc(DocRef {
            id: id.to_string(),
            label,
        }))
    }

    fn category(&mut self, map: &Map<String, Value>, location: &str) -> Option<SidebarEntry> {
        let label = match map.get("label") {
            Some(Value::String(label)) if !label.trim().is_empty() => label.clone(),
            _ => {
                self.malformed(location, "category requires a non-empty string 'label'");
                return None;
            }
        };

        let items = match map.get("items") {
            Some(Value::Array(items)) if items.is_empty() => {
                self.issues.push(ValidationError::EmptyCategory {
                    location: location.to_string(),
                    label: label.clone(),
                });
                Vec::new()
            }
            Some(Value::Array(items)) => self.entries(items, &format!("{}.items", location)),
            Some(other) => {
                self.malformed(
                    location,
                    format!(
                        "category '{}' items must be an array, found {}",
                        label,
                        kind_of(other)
                    ),
                );
                return None;
            }
            None => {
                self.malformed(location, format!("category '{}' is missing 'items'", label));
                return None;
            }
        };

        let collapsed = match map.get("collapsed") {
            None => false,
            Some(Value::Bool(collapsed)) => *collapsed,
            Some(other) => {
                self.malformed(
                    location,
                    format!(
                        "category '{}' collapsed must be a boolean, found {}",
                        label,
                        kind_of(other)
                    ),
                );
                return None;
            }
        };

        Some(SidebarEntry::Category(Category {
            label,
            items,
            collapsed,
        }))
    }

    fn malformed(&mut self, location: &str, reason: impl Into<String>) {
        self.issues.push(ValidationError::MalformedNode {
            location: location.to_string(),
            reason: reason.into(),
        });
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::index::DocLink;

    fn docs(ids: &[&str]) -> BTreeMap<String, DocLink> {
        ids.iter()
            .map(|id| (id.to_string(), DocLink::new(*id, format!("/docs/{}", id))))
            .collect()
    }

    #[test]
    fn loads_shorthand_and_categories() {
        let raw = json!([
            "intro",
            {"type": "category", "label": "Getting Started", "items": ["setup", "install"]}
        ]);

        let loaded = load_sidebar(
            "tutorialSidebar",
            &raw,
            &docs(&["intro", "setup", "install"]),
            Severity::Fail,
        )
        .unwrap();

        assert!(loaded.issues.is_empty());
        assert_eq!(
            loaded.sidebar.entries,
            vec![
                SidebarEntry::doc("intro"),
                SidebarEntry::category(
                    "Getting Started",
                    vec![SidebarEntry::doc("setup"), SidebarEntry::doc("install")]
                ),
            ]
        );
        let flat: Vec<_> = loaded
            .sidebar
            .flatten()
            .into_iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(flat, vec!["intro", "setup", "install"]);
    }

    #[test]
    fn loads_explicit_doc_with_label() {
        let raw = json!([{"type": "doc", "id": "intro", "label": "Start here"}]);

        let loaded = load_sidebar("main", &raw, &docs(&["intro"]), Severity::Fail).unwrap();

        assert_eq!(
            loaded.sidebar.entries,
            vec![SidebarEntry::Doc(DocRef {
                id: "intro".to_string(),
                label: Some("Start here".to_string()),
            })]
        );
    }

    #[test]
    fn reads_collapsed_flag() {
        let raw = json!([
            {"type": "category", "label": "Refs", "collapsed": true, "items": ["a"]}
        ]);

        let loaded = load_sidebar("main", &raw, &docs(&["a"]), Severity::Fail).unwrap();

        match &loaded.sidebar.entries[0] {
            SidebarEntry::Category(category) => assert!(category.collapsed),
            other => panic!("expected category, got {:?}", other),
        }
    }

    #[test]
    fn reports_unresolved_reference_by_id() {
        let raw = json!(["intro", {"type": "category", "label": "Guide", "items": ["missing"]}]);

        let loaded = load_sidebar("main", &raw, &docs(&["intro"]), Severity::Warn).unwrap();

        assert_eq!(
            loaded.issues,
            vec![ValidationError::UnresolvedReference {
                location: "main[1].items[0]".to_string(),
                id: "missing".to_string(),
            }]
        );
        // Kept in the tree as a broken link
        assert_eq!(loaded.sidebar.flatten().len(), 2);
    }

    #[test]
    fn reports_empty_category_without_dropping_it() {
        let raw = json!([{"type": "category", "label": "Soon", "items": []}]);

        let loaded = load_sidebar("main", &raw, &docs(&[]), Severity::Warn).unwrap();

        assert_eq!(
            loaded.issues,
            vec![ValidationError::EmptyCategory {
                location: "main[0]".to_string(),
                label: "Soon".to_string(),
            }]
        );
        assert_eq!(
            loaded.sidebar.entries,
            vec![SidebarEntry::category("Soon", vec![])]
        );
    }

    #[test]
    fn reports_malformed_nodes() {
        let raw = json!([
            42,
            {"label": "No type", "items": ["a"]},
            {"type": "link", "href": "https://example.com"},
            {"type": "category", "label": "", "items": ["a"]},
            {"type": "category", "label": "Bad", "items": "a"},
            {"type": "doc"},
            "",
            {"type": "category", "label": "Folded", "items": ["a"], "collapsed": "yes"},
            "a"
        ]);

        let loaded = load_sidebar("main", &raw, &docs(&["a"]), Severity::Ignore).unwrap();

        let locations: Vec<_> = loaded.issues.iter().map(|i| i.location()).collect();
        assert_eq!(
            locations,
            vec![
                "main[0]", "main[1]", "main[2]", "main[3]", "main[4]", "main[5]", "main[6]",
                "main[7]"
            ]
        );
        assert!(loaded
            .issues
            .iter()
            .all(|i| matches!(i, ValidationError::MalformedNode { .. })));
        assert_eq!(loaded.sidebar.entries, vec![SidebarEntry::doc("a")]);
    }

    #[test]
    fn collects_all_problems_before_failing() {
        let raw = json!([
            "missing-one",
            {"type": "category", "label": "Empty", "items": []},
            true,
            "missing-two"
        ]);

        let err = load_sidebar("main", &raw, &docs(&[]), Severity::Fail).unwrap_err();

        assert_eq!(err.issues().len(), 4);
        assert_eq!(err.to_string(), "4 sidebar problem(s) found");
    }

    #[test]
    fn warn_and_ignore_never_fail() {
        let raw = json!(["missing"]);

        for severity in [Severity::Warn, Severity::Ignore] {
            let loaded = load_sidebar("main", &raw, &docs(&[]), severity).unwrap();
            assert_eq!(loaded.issues.len(), 1);
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn logged_while_loading(severity: Severity) -> String {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            load_sidebar("main", &json!(["missing"]), &docs(&[]), severity).unwrap();
        });

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn warn_logs_each_problem() {
        let output = logged_while_loading(Severity::Warn);

        assert!(output.contains("WARN"));
        assert!(output.contains("main[0]: document 'missing' does not exist"));
    }

    #[test]
    fn ignore_stays_silent() {
        assert_eq!(logged_while_loading(Severity::Ignore), "");
    }

    #[test]
    fn loads_named_sidebars() {
        let raw = json!({
            "tutorialSidebar": ["intro"],
            "api": [{"type": "category", "label": "API", "items": ["api/ref"]}]
        });

        let loaded =
            load_sidebars(&raw, &docs(&["intro", "api/ref"]), Severity::Fail).unwrap();

        assert_eq!(loaded.sidebars.len(), 2);
        assert!(loaded.sidebars.get("tutorialSidebar").is_some());
        assert_eq!(
            loaded.sidebars.sidebar_for("api/ref").map(|s| s.name.as_str()),
            Some("api")
        );
    }

    #[test]
    fn rejects_non_object_root_and_non_array_sidebar() {
        let err = load_sidebars(&json!(["intro"]), &docs(&["intro"]), Severity::Fail).unwrap_err();
        assert_eq!(err.issues()[0].location(), "<root>");

        let err =
            load_sidebars(&json!({"main": "intro"}), &docs(&["intro"]), Severity::Fail)
                .unwrap_err();
        assert_eq!(err.issues()[0].location(), "main");
    }

    #[test]
    fn severity_parses_lowercase() {
        let severity: Severity = serde_json::from_value(json!("fail")).unwrap();
        assert_eq!(severity, Severity::Fail);
        assert_eq!(Severity::default(), Severity::Warn);
    }
}
