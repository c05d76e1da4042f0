//! Hit testing: canvas point → node, handle, title or primitive.
//!
//! Visuals are painted in order, so the scene is walked in reverse to find
//! the topmost one.

use crate::handles::HandleKind;
use crate::scene::{NodeVisual, Scene};
use bp_core::NodeId;

/// Topmost node whose rect contains `(px, py)`. `None` on empty canvas.
pub fn hit_node(scene: &Scene, px: f64, py: f64) -> Option<NodeId> {
    scene
        .visuals
        .iter()
        .rev()
        .find(|v| v.rect.contains(px, py))
        .map(|v| v.id)
}

/// Resize handle under `(px, py)`, if handles are shown.
pub fn hit_handle(scene: &Scene, px: f64, py: f64) -> Option<HandleKind> {
    scene
        .handles
        .iter()
        .find(|h| h.hit(px, py))
        .map(|h| h.kind)
}

/// Whether `(px, py)` falls on the node's title label.
pub fn hit_title(visual: &NodeVisual, px: f64, py: f64) -> bool {
    visual.title.rect().contains(px, py)
}

/// Index of the topmost content primitive of `visual` under `(px, py)`.
pub fn hit_primitive(visual: &NodeVisual, px: f64, py: f64) -> Option<usize> {
    visual.content.as_ref()?.primitive_at(px, py)
}
