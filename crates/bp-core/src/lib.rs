pub mod config;
pub mod error;
pub mod grid;
pub mod hint;
pub mod id;
pub mod keywords;
pub mod layout;
pub mod model;
pub mod overlay;
pub mod source;

pub use config::CanvasConfig;
pub use error::{Error, Result};
pub use id::NodeId;
pub use layout::{
    Archetype, ArchetypeConfig, CanvasLayout, LayoutProposal, Position, Zone, layout_children,
    propose_layout,
};
pub use model::*;
pub use overlay::{
    Grain, LayoutOverride, Overlay, Presence, Registre, StyleOverride, Substyle, SubstyleOverride,
};
pub use source::DocumentSource;

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
