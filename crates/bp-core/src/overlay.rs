//! Presentation overlay: per-node overrides kept beside the document.
//!
//! Overrides are created on first edit and mutated in place afterwards. The
//! core never deletes them. The overlay serializes on its own, so the
//! semantic document and its presentation can be stored separately.

use crate::error::Result;
use crate::grid::snap;
use crate::id::NodeId;
use crate::model::{Document, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Smallest width a layout override may have.
pub const MIN_WIDTH: f64 = 40.0;
/// Smallest height a layout override may have.
pub const MIN_HEIGHT: f64 = 20.0;

/// Canvas-space rectangle that replaces the computed layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutOverride {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl LayoutOverride {
    /// Clamp to the minimum size, then snap all four values when `snap_to_grid`.
    ///
    /// Clamping first keeps the result on-grid: any height ≥ 20 snaps to ≥ 24.
    pub fn normalized(rect: Rect, snap_to_grid: bool) -> Self {
        let w = rect.w.max(MIN_WIDTH);
        let h = rect.h.max(MIN_HEIGHT);
        if snap_to_grid {
            Self {
                x: snap(rect.x),
                y: snap(rect.y),
                w: snap(w),
                h: snap(h),
            }
        } else {
            Self {
                x: rect.x,
                y: rect.y,
                w,
                h,
            }
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Visual style overrides set from the canvas or a property panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
}

impl StyleOverride {
    /// Overlay the fields set in `patch` onto `self`.
    pub fn merge(&mut self, patch: &StyleOverride) {
        let StyleOverride {
            fill,
            stroke,
            stroke_width,
            font,
            padding,
            margin,
        } = patch.clone();
        self.fill = fill.or(self.fill.take());
        self.stroke = stroke.or(self.stroke.take());
        self.stroke_width = stroke_width.or(self.stroke_width);
        self.font = font.or(self.font.take());
        self.padding = padding.or(self.padding);
        self.margin = margin.or(self.margin);
    }
}

/// Texture of the frame outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grain {
    Fine,
    #[default]
    Normal,
    Coarse,
}

impl Grain {
    pub fn stroke_width(self) -> f64 {
        match self {
            Grain::Fine => 1.0,
            Grain::Normal => 1.5,
            Grain::Coarse => 2.5,
        }
    }
}

/// Typographic register of labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Registre {
    Technical,
    #[default]
    Neutral,
    Expressive,
}

impl Registre {
    pub fn font_family(self) -> &'static str {
        match self {
            Registre::Technical => "JetBrains Mono, ui-monospace, monospace",
            Registre::Neutral => "Inter, system-ui, sans-serif",
            Registre::Expressive => "Georgia, 'Times New Roman', serif",
        }
    }
}

/// How strongly the frame fill stands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Discreet,
    #[default]
    Standard,
    Prominent,
}

impl Presence {
    pub fn fill_opacity(self) -> f32 {
        match self {
            Presence::Discreet => 0.04,
            Presence::Standard => 0.08,
            Presence::Prominent => 0.16,
        }
    }
}

/// Partial substyle; unset fields inherit from the parent node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstyleOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grain: Option<Grain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registre: Option<Registre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence: Option<Presence>,
}

/// A substyle with every field resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Substyle {
    pub grain: Grain,
    pub registre: Registre,
    pub presence: Presence,
}

/// Side table of overrides keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overlay {
    pub layout: HashMap<NodeId, LayoutOverride>,
    pub style: HashMap<NodeId, StyleOverride>,
    pub substyle: HashMap<NodeId, SubstyleOverride>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(&self, id: NodeId) -> Option<LayoutOverride> {
        self.layout.get(&id).copied()
    }

    /// Write a layout override, enforcing the minimum size.
    pub fn set_layout(&mut self, id: NodeId, value: LayoutOverride) {
        let clamped = LayoutOverride {
            w: value.w.max(MIN_WIDTH),
            h: value.h.max(MIN_HEIGHT),
            ..value
        };
        self.layout.insert(id, clamped);
    }

    pub fn style(&self, id: NodeId) -> Option<&StyleOverride> {
        self.style.get(&id)
    }

    /// Merge `patch` into the node's style override, creating it if needed.
    pub fn merge_style(&mut self, id: NodeId, patch: &StyleOverride) -> &StyleOverride {
        let entry = self.style.entry(id).or_default();
        entry.merge(patch);
        entry
    }

    pub fn substyle_override(&self, id: NodeId) -> Option<SubstyleOverride> {
        self.substyle.get(&id).copied()
    }

    pub fn set_substyle(&mut self, id: NodeId, value: SubstyleOverride) {
        self.substyle.insert(id, value);
    }

    /// Resolve a substyle: node override → nearest ancestor → defaults.
    pub fn substyle(&self, doc: &Document, id: NodeId) -> Substyle {
        let chain = std::iter::once(id).chain(doc.ancestors(id));
        let mut grain = None;
        let mut registre = None;
        let mut presence = None;
        for node in chain {
            if let Some(o) = self.substyle.get(&node) {
                grain = grain.or(o.grain);
                registre = registre.or(o.registre);
                presence = presence.or(o.presence);
            }
            if grain.is_some() && registre.is_some() && presence.is_some() {
                break;
            }
        }
        Substyle {
            grain: grain.unwrap_or_default(),
            registre: registre.unwrap_or_default(),
            presence: presence.unwrap_or_default(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact MessagePack snapshot.
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DesignNode, NodeKind, PhaseCategory};
    use pretty_assertions::assert_eq;

    #[test]
    fn normalized_clamps_then_snaps() {
        let o = LayoutOverride::normalized(Rect::new(101.0, 99.0, 12.0, 19.0), true);
        assert_eq!(o, LayoutOverride { x: 104.0, y: 96.0, w: 40.0, h: 24.0 });
    }

    #[test]
    fn normalized_without_snap_only_clamps() {
        let o = LayoutOverride::normalized(Rect::new(3.5, 7.25, 10.0, 300.0), false);
        assert_eq!(o, LayoutOverride { x: 3.5, y: 7.25, w: 40.0, h: 300.0 });
    }

    #[test]
    fn set_layout_enforces_minimum() {
        let mut overlay = Overlay::new();
        let id = NodeId::intern("ov_small");
        overlay.set_layout(id, LayoutOverride { x: 0.0, y: 0.0, w: 1.0, h: 1.0 });
        let o = overlay.layout(id).unwrap();
        assert_eq!((o.w, o.h), (MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn merge_style_keeps_unset_fields() {
        let mut overlay = Overlay::new();
        let id = NodeId::intern("ov_style");
        overlay.merge_style(
            id,
            &StyleOverride {
                fill: Some("#FFF".into()),
                padding: Some(16.0),
                ..Default::default()
            },
        );
        let merged = overlay
            .merge_style(
                id,
                &StyleOverride {
                    stroke: Some("#000".into()),
                    ..Default::default()
                },
            )
            .clone();
        assert_eq!(merged.fill.as_deref(), Some("#FFF"));
        assert_eq!(merged.stroke.as_deref(), Some("#000"));
        assert_eq!(merged.padding, Some(16.0));
    }

    #[test]
    fn substyle_inherits_from_ancestors_then_defaults() {
        let mut doc = Document::new();
        let p = doc
            .add_node(
                doc.root,
                DesignNode::new(
                    NodeId::intern("sub_p"),
                    NodeKind::Phase {
                        category: PhaseCategory::Composition,
                    },
                    "P",
                ),
            )
            .unwrap();
        doc.add_node(p, DesignNode::new(NodeId::intern("sub_s"), NodeKind::Section, "S"))
            .unwrap();

        let mut overlay = Overlay::new();
        overlay.set_substyle(
            NodeId::intern("sub_p"),
            SubstyleOverride {
                grain: Some(Grain::Coarse),
                registre: Some(Registre::Technical),
                presence: None,
            },
        );
        overlay.set_substyle(
            NodeId::intern("sub_s"),
            SubstyleOverride {
                registre: Some(Registre::Expressive),
                ..Default::default()
            },
        );

        let resolved = overlay.substyle(&doc, NodeId::intern("sub_s"));
        assert_eq!(
            resolved,
            Substyle {
                grain: Grain::Coarse,
                registre: Registre::Expressive,
                presence: Presence::Standard,
            }
        );
    }

    #[test]
    fn msgpack_snapshot_restores_overlay() {
        let mut overlay = Overlay::new();
        overlay.set_layout(
            NodeId::intern("ov_pack"),
            LayoutOverride { x: 8.0, y: 16.0, w: 200.0, h: 120.0 },
        );
        overlay.merge_style(
            NodeId::intern("ov_pack"),
            &StyleOverride {
                font: Some("Inter".into()),
                ..Default::default()
            },
        );
        let bytes = overlay.to_msgpack().unwrap();
        assert_eq!(Overlay::from_msgpack(&bytes).unwrap(), overlay);
    }

    #[test]
    fn style_override_uses_camel_case_keys() {
        let style = StyleOverride {
            stroke_width: Some(2.0),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&style).unwrap(), r#"{"strokeWidth":2.0}"#);
    }
}
