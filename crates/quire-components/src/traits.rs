//! Trait definitions for presentational components.

use crate::node::{render_html, Node};

/// A stateless component that renders static input into nodes.
///
/// Rendering is pure: the same input always yields the same nodes.
pub trait Component {
    /// Component identifier (e.g. "homepage-features")
    fn name(&self) -> &'static str;

    /// Render into a sequence of nodes.
    fn render(&self) -> Vec<Node>;

    /// Render straight to HTML.
    fn to_html(&self) -> String {
        render_html(&self.render())
    }
}
