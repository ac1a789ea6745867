//! Presentational components for quire sites.
//!
//! Components turn static, author-supplied descriptors (feature cards, stat
//! cards, example prompts) into a small HTML node tree. They hold no state and
//! perform no validation: rendering is a pure, order-preserving mapping.

pub mod features;
pub mod homepage;
pub mod node;
pub mod showcase;
pub mod traits;

pub use features::{render, FeatureDescriptor, FeatureList};
pub use homepage::HomepageFeatures;
pub use node::{render_html, Element, Node};
pub use showcase::{PromptExample, PromptGrid, StatCard, StatsGrid};
pub use traits::Component;
