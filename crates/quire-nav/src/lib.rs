//! Sidebar navigation trees.
//!
//! A sidebar is an ordered tree of document references and named categories.
//! This crate loads sidebars from their loosely-typed authored form, validates
//! them against a [`DocumentIndex`], and derives what page templates need:
//! the linear reading order, previous/next links, and render-ready
//! [`NavItem`] trees.

pub mod file;
pub mod index;
pub mod loader;
pub mod render;
pub mod tree;

pub use file::{read_sidebars, SidebarFileError};
pub use index::{DocLink, DocumentIndex};
pub use loader::{
    load_sidebar, load_sidebars, LoadedSidebar, LoadedSidebars, Severity, ValidationError,
    ValidationErrors,
};
pub use render::{render_sidebar, NavItem, NavKind, PageLink, Pagination};
pub use tree::{flatten, Category, DocRef, Sidebar, SidebarEntry, Sidebars, DEFAULT_SIDEBAR};
