//! Static site generator for quire documentation.
//!
//! Builds a static documentation site from markdown files, their sidebars and
//! the site configuration: one page per document, a homepage with the feature
//! section, and the usual search index, sitemap and 404 page.

pub mod assets;
pub mod builder;
pub mod site;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteSources, StaticBuilder};
pub use site::{
    Footer, FooterGroup, FooterLink, Logo, Navbar, NavbarItem, Position, SiteMetadata,
};
