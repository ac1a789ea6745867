//! The homepage features section.

use serde::{Deserialize, Serialize};

use crate::features::{self, FeatureDescriptor};
use crate::node::{Element, Node};
use crate::showcase::{PromptGrid, StatsGrid};
use crate::traits::Component;

/// Everything shown in the homepage features section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomepageFeatures {
    pub features: Vec<FeatureDescriptor>,
    pub stats: Option<StatsGrid>,
    pub prompts: Option<PromptGrid>,
}

impl HomepageFeatures {
    /// Whether there is anything to show.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.stats.is_none() && self.prompts.is_none()
    }
}

impl Component for HomepageFeatures {
    fn name(&self) -> &'static str {
        "homepage-features"
    }

    fn render(&self) -> Vec<Node> {
        let mut container = Element::new("div")
            .class("container")
            .child(
                Element::new("div")
                    .class("row")
                    .children(features::render(&self.features)),
            );

        if let Some(stats) = &self.stats {
            container = container.children(stats.render());
        }
        if let Some(prompts) = &self.prompts {
            container = container.children(prompts.render());
        }

        vec![Element::new("section")
            .class("features")
            .child(container)
            .into()]
    }
}
