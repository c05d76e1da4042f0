//! Design document model.
//!
//! The document is a strict four-level tree under an implicit root:
//! Phase → Section → Feature → Component. Components are the leaves and carry
//! interaction attributes. Presentation state (layout, style) never lives
//! here; see [`crate::overlay`].

use crate::id::NodeId;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Accent used when a Phase declares no color.
pub const DEFAULT_ACCENT: Color = Color::rgba(0.388, 0.4, 0.945, 1.0);

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let pair = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => {
                let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
                Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0))
            }
            6 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, 1.0)),
            8 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// `#RRGGBB`, ignoring alpha. SVG carries alpha as a separate opacity.
    pub fn to_hex(&self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", c(self.r), c(self.g), c(self.b))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear blend towards `other`; `t = 0` keeps `self`.
    pub fn mix(self, other: Color, t: f32) -> Self {
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Self::rgba(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
            lerp(self.a, other.a),
        )
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Shrink by `d` on every side. Never produces a negative size.
    pub fn inset(&self, d: f64) -> Self {
        let w = (self.w - 2.0 * d).max(0.0);
        let h = (self.h - 2.0 * d).max(0.0);
        Self::new(self.x + d, self.y + d, w, h)
    }
}

// ─── Node attributes ─────────────────────────────────────────────────────

/// Depth of a node in the design tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Phase,
    Section,
    Feature,
    Component,
}

impl Level {
    pub fn index(self) -> u8 {
        match self {
            Level::Phase => 0,
            Level::Section => 1,
            Level::Feature => 2,
            Level::Component => 3,
        }
    }

    /// The level of this level's children; `None` for leaves.
    pub fn child(self) -> Option<Level> {
        match self {
            Level::Phase => Some(Level::Section),
            Level::Section => Some(Level::Feature),
            Level::Feature => Some(Level::Component),
            Level::Component => None,
        }
    }

    pub fn is_leaf(self) -> bool {
        self == Level::Component
    }
}

/// Category of a Phase. Fixes the canvas archetype used below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseCategory {
    Exploration,
    Architecture,
    #[default]
    Composition,
    Pipeline,
}

/// Semantic role of a leaf component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Action,
    DataEntry,
    DataDisplay,
    Component,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    #[default]
    Normal,
}

/// Interaction attributes carried by leaf components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeafAttrs {
    pub interaction_type: Option<String>,
    pub importance: Option<Importance>,
    pub density: Density,
    pub semantic_role: Option<Role>,
}

/// What a node is, by depth.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Implicit document root; parent of all Phases.
    Root,
    Phase { category: PhaseCategory },
    Section,
    Feature,
    Component(LeafAttrs),
}

/// A single node of the design tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub visual_hint: Option<String>,
    pub description: Option<String>,
    /// Explicit accent; inherited from the nearest ancestor when absent.
    pub color: Option<Color>,
}

impl DesignNode {
    pub fn new(id: NodeId, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            visual_hint: None,
            description: None,
            color: None,
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.kind {
            NodeKind::Root => None,
            NodeKind::Phase { .. } => Some(Level::Phase),
            NodeKind::Section => Some(Level::Section),
            NodeKind::Feature => Some(Level::Feature),
            NodeKind::Component(_) => Some(Level::Component),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Component(_))
    }

    pub fn leaf(&self) -> Option<&LeafAttrs> {
        match &self.kind {
            NodeKind::Component(attrs) => Some(attrs),
            _ => None,
        }
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// Id of the implicit root. Not a valid id for user nodes.
pub const ROOT_ID: &str = "::root";

/// The complete design document.
///
/// Edges go from parent → child. Children come back in insertion order.
#[derive(Debug, Clone)]
pub struct Document {
    pub graph: StableDiGraph<DesignNode, ()>,
    pub root: NodeIndex,
    id_index: HashMap<NodeId, NodeIndex>,
}

impl Document {
    /// An empty document holding only the root.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let root_id = NodeId::intern(ROOT_ID);
        let root = graph.add_node(DesignNode::new(root_id, NodeKind::Root, ""));
        let mut id_index = HashMap::new();
        id_index.insert(root_id, root);
        Self {
            graph,
            root,
            id_index,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.graph[self.root].id
    }

    /// Add `node` under `parent`. Returns `None` if the id is taken.
    pub fn add_node(&mut self, parent: NodeIndex, node: DesignNode) -> Option<NodeIndex> {
        if self.id_index.contains_key(&node.id) {
            return None;
        }
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        Some(idx)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Number of user nodes (root excluded).
    pub fn len(&self) -> usize {
        self.graph.node_count() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: NodeId) -> Option<&DesignNode> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DesignNode> {
        self.id_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    pub fn parent_id(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.index_of(id)?;
        self.parent(idx).map(|p| self.graph[p].id)
    }

    /// Children of a node in insertion order.
    ///
    /// Sorted by `NodeIndex`: `StableDiGraph` never reuses indices here
    /// (nodes are only added), so index order is insertion order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Child ids of `id`; empty when `id` is unknown.
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        match self.index_of(id) {
            Some(idx) => self
                .children(idx)
                .into_iter()
                .map(|c| self.graph[c].id)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn phases(&self) -> Vec<NodeId> {
        self.child_ids(self.root_id())
    }

    /// Ancestors of `id`, nearest first, root excluded.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(mut idx) = self.index_of(id) else {
            return out;
        };
        while let Some(p) = self.parent(idx) {
            if p == self.root {
                break;
            }
            out.push(self.graph[p].id);
            idx = p;
        }
        out
    }

    /// The Phase `id` belongs to (itself if it is a Phase).
    pub fn ancestor_phase(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        if matches!(node.kind, NodeKind::Phase { .. }) {
            return Some(id);
        }
        self.ancestors(id)
            .into_iter()
            .find(|a| matches!(self.get(*a).map(|n| &n.kind), Some(NodeKind::Phase { .. })))
    }

    pub fn phase_category(&self, id: NodeId) -> PhaseCategory {
        self.ancestor_phase(id)
            .and_then(|p| match self.get(p)?.kind {
                NodeKind::Phase { category } => Some(category),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Accent color: own color, else the nearest ancestor's, else the default.
    pub fn accent_color(&self, id: NodeId) -> Color {
        if let Some(c) = self.get(id).and_then(|n| n.color) {
            return c;
        }
        self.ancestors(id)
            .into_iter()
            .find_map(|a| self.get(a).and_then(|n| n.color))
            .unwrap_or(DEFAULT_ACCENT)
    }

    /// Set the display name of a node. Returns `false` for unknown ids.
    pub fn rename(&mut self, id: NodeId, name: &str) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.name = name.to_string();
                true
            }
            None => false,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
