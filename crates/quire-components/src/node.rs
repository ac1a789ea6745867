//! Minimal HTML node tree produced by components.

use std::fmt::Write;

/// A rendered node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with optional class and children
    Element(Element),
    /// Plain text, escaped on output
    Text(String),
    /// Trusted markup, written as-is
    Html(String),
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub class: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            class: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Write this node as HTML.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
            Node::Html(html) => out.push_str(html),
            Node::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                if let Some(class) = &element.class {
                    let _ = write!(
                        out,
                        " class=\"{}\"",
                        html_escape::encode_double_quoted_attribute(class)
                    );
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

/// Render a sequence of nodes to an HTML string.
pub fn render_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_elements() {
        let node: Node = Element::new("div")
            .class("card")
            .child(Element::new("h3").text("Title"))
            .into();

        assert_eq!(
            render_html(&[node]),
            r#"<div class="card"><h3>Title</h3></div>"#
        );
    }

    #[test]
    fn escapes_text_but_not_trusted_html() {
        let nodes = vec![
            Node::Text("<b>Revit & IFC</b>".to_string()),
            Node::Html("<em>kept</em>".to_string()),
        ];

        assert_eq!(
            render_html(&nodes),
            "&lt;b&gt;Revit &amp; IFC&lt;/b&gt;<em>kept</em>"
        );
    }

    #[test]
    fn escapes_class_attribute() {
        let node: Node = Element::new("span").class("a\"b").into();

        assert_eq!(render_html(&[node]), r#"<span class="a&quot;b"></span>"#);
    }
}
