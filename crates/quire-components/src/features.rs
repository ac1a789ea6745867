//! Feature cards.

use serde::{Deserialize, Serialize};

use crate::node::{Element, Node};
use crate::traits::Component;

/// One feature shown on the homepage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureDescriptor {
    /// Plain-text title
    pub title: String,

    /// Markup fragment, inserted as-is
    pub description: String,
}

impl FeatureDescriptor {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Render one card per feature, in input order.
pub fn render(features: &[FeatureDescriptor]) -> Vec<Node> {
    features.iter().map(render_card).collect()
}

fn render_card(feature: &FeatureDescriptor) -> Node {
    Element::new("div")
        .class("col col--4")
        .child(
            Element::new("div")
                .class("text--center padding-horiz--md")
                .child(Element::new("h3").text(&feature.title))
                .child(Element::new("p").child(Node::Html(feature.description.clone()))),
        )
        .into()
}

/// The feature cards as a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureList {
    pub features: Vec<FeatureDescriptor>,
}

impl Component for FeatureList {
    fn name(&self) -> &'static str {
        "feature-list"
    }

    fn render(&self) -> Vec<Node> {
        render(&self.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::render_html;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_one_card_per_feature_in_order() {
        let features = vec![
            FeatureDescriptor::new("A", "x"),
            FeatureDescriptor::new("B", "y"),
        ];

        let html = render_html(&render(&features));

        assert_eq!(
            html,
            concat!(
                r#"<div class="col col--4"><div class="text--center padding-horiz--md">"#,
                "<h3>A</h3><p>x</p></div></div>",
                r#"<div class="col col--4"><div class="text--center padding-horiz--md">"#,
                "<h3>B</h3><p>y</p></div></div>",
            )
        );
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render(&[]).is_empty());
    }

    #[test]
    fn rendering_is_idempotent() {
        let features = vec![FeatureDescriptor::new(
            "Codebase Understanding",
            "Indexes your <strong>entire</strong> project.",
        )];

        assert_eq!(render(&features), render(&features));
    }

    #[test]
    fn missing_fields_render_empty() {
        let feature: FeatureDescriptor = toml::from_str(r#"title = "Only title""#).unwrap();

        let html = render_html(&render(&[feature]));

        assert!(html.contains("<h3>Only title</h3><p></p>"));
    }

    #[test]
    fn title_is_escaped_description_is_not() {
        let features = vec![FeatureDescriptor::new("Revit & IFC", "<em>fast</em>")];

        let html = FeatureList { features }.to_html();

        assert!(html.contains("<h3>Revit &amp; IFC</h3>"));
        assert!(html.contains("<p><em>fast</em></p>"));
    }
}
