//! Hierarchical navigation menu
//!
//! Pipeline: flat list records -> [`tree::build_forest`] -> [`render::render_forest`],
//! with interactivity modeled in [`interact`] and offline defaults in
//! [`fallback`].

pub mod fallback;
pub mod interact;
pub mod render;
pub mod resolve;
pub mod tree;

pub use fallback::fallback_records;
pub use interact::{
    DomPatch, InteractionClock, InteractionMode, MenuEvent, MenuInteraction, NodeState,
};
pub use render::{render_forest, RenderContext};
pub use resolve::resolve_url;
pub use tree::{build_forest, forest_max_level, forest_size, MenuNode};
