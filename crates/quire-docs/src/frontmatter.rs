//! Frontmatter extraction and parsing.

use serde::Deserialize;

/// Frontmatter of a documentation page. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Frontmatter {
    /// Replaces the last segment of the path-derived document id
    pub id: Option<String>,

    /// Page title
    pub title: Option<String>,

    /// Page description for SEO and the search index
    pub description: Option<String>,

    /// Label shown in the sidebar instead of the title
    pub sidebar_label: Option<String>,

    /// URL override, relative to the docs route
    pub slug: Option<String>,

    /// Hide the "On this page" panel
    pub hide_table_of_contents: bool,
}

/// Split a document into its frontmatter and the remaining body.
///
/// A document without a leading `---` block yields default frontmatter.
pub fn extract_frontmatter(source: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    let Some(after_open) = trimmed.strip_prefix("---") else {
        return Ok((Frontmatter::default(), source));
    };

    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml = after_open[..close_pos].trim();
    let body = &after_open[close_pos + 4..];

    let frontmatter = if yaml.is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((frontmatter, body.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
