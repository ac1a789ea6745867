//! Documentation sources for quire sites.
//!
//! This crate scans a docs directory, parses markdown with YAML frontmatter,
//! and assigns every page an id and permalink. The resulting [`DocumentSet`]
//! is the index sidebar references are resolved against.

pub mod collection;
pub mod frontmatter;
pub mod parser;

pub use collection::{Document, DocumentSet, RouteOptions, ScanError};
pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
pub use parser::{parse_doc, slugify, ParseError, ParsedDoc, TocEntry};
