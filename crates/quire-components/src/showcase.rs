//! Static grids shown below the feature cards.

use serde::{Deserialize, Serialize};

use crate::node::{Element, Node};
use crate::traits::Component;

/// A headline number with a caption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatCard {
    pub value: String,
    pub label: String,
}

/// A titled example prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptExample {
    pub title: String,
    pub prompt: String,
}

/// Grid of stat cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsGrid {
    pub heading: String,
    pub cards: Vec<StatCard>,
}

impl Component for StatsGrid {
    fn name(&self) -> &'static str {
        "stats-grid"
    }

    fn render(&self) -> Vec<Node> {
        let cards = self.cards.iter().map(|card| -> Node {
            Element::new("div")
                .class("stat-card")
                .child(Element::new("span").class("stat-number").text(&card.value))
                .child(Element::new("span").class("stat-label").text(&card.label))
                .into()
        });

        vec![Element::new("div")
            .class("showcase-stats")
            .child(Element::new("h2").text(&self.heading))
            .child(Element::new("div").class("stats-grid").children(cards))
            .into()]
    }
}

/// Grid of example prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptGrid {
    pub heading: String,
    pub examples: Vec<PromptExample>,
}

impl Component for PromptGrid {
    fn name(&self) -> &'static str {
        "prompt-grid"
    }

    fn render(&self) -> Vec<Node> {
        let cards = self.examples.iter().map(|example| -> Node {
            Element::new("div")
                .class("prompt-card")
                .child(Element::new("h4").text(&example.title))
                .child(
                    Element::new("p")
                        .child(Element::new("em").text(format!("\"{}\"", example.prompt))),
                )
                .into()
        });

        vec![Element::new("div")
            .class("showcase-prompts")
            .child(Element::new("h3").text(&self.heading))
            .child(Element::new("div").class("prompt-grid").children(cards))
            .into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_stat_cards_in_order() {
        let grid = StatsGrid {
            heading: "Why Cursor for BIM Development?".to_string(),
            cards: vec![
                StatCard {
                    value: "5x".to_string(),
                    label: "Faster Development".to_string(),
                },
                StatCard {
                    value: "24/7".to_string(),
                    label: "AI Assistant".to_string(),
                },
            ],
        };

        let html = grid.to_html();

        assert!(html.contains("<h2>Why Cursor for BIM Development?</h2>"));
        let first = html.find("5x").unwrap();
        let second = html.find("24/7").unwrap();
        assert!(first < second);
        assert!(html.contains(r#"<span class="stat-label">Faster Development</span>"#));
    }

    #[test]
    fn quotes_and_escapes_prompts() {
        let grid = PromptGrid {
            heading: "Prompt Engineering for BIM".to_string(),
            examples: vec![PromptExample {
                title: "IFC Processing".to_string(),
                prompt: "Build an IFC analyzer for <spaces>".to_string(),
            }],
        };

        let html = grid.to_html();

        assert!(html.contains("<h4>IFC Processing</h4>"));
        assert!(html.contains("<em>\"Build an IFC analyzer for &lt;spaces&gt;\"</em>"));
    }

    #[test]
    fn empty_grid_keeps_heading() {
        let grid = PromptGrid {
            heading: "Prompts".to_string(),
            examples: vec![],
        };

        assert_eq!(
            grid.to_html(),
            r#"<div class="showcase-prompts"><h3>Prompts</h3><div class="prompt-grid"></div></div>"#
        );
    }
}
