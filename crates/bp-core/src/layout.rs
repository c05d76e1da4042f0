//! Automatic placement of a node's children on the canvas.
//!
//! Two strategies:
//! - [`propose_layout`] classifies children into screen zones by keyword and
//!   places each zone; used for the phase overview and a phase's sections.
//! - [`CanvasLayout::calculate`] arranges children by the archetype of the
//!   ancestor phase; used for features and components.
//!
//! Both are pure and deterministic.

use crate::grid;
use crate::id::NodeId;
use crate::keywords::{Rule, first_match, search_text};
use crate::model::{Document, Level, PhaseCategory, Rect};
use serde::{Deserialize, Serialize};

pub const MARGIN: f64 = grid::LG;
pub const GAP: f64 = grid::GAP;

const TOP_HEIGHT: f64 = grid::XXL;
const RIGHT_WIDTH: f64 = 240.0;
const RIGHT_HEIGHT: f64 = 120.0;
const CENTER_COLUMNS: usize = 4;
const CELL_WIDTH: f64 = 200.0;
const CELL_HEIGHT: f64 = 160.0;
const BOTTOM_WIDTH: f64 = 160.0;
const BOTTOM_HEIGHT: f64 = grid::XL;
const FLOATING_WIDTH: f64 = 320.0;
const FLOATING_HEIGHT: f64 = 200.0;

/// Screen zone a child is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Top,
    Right,
    Bottom,
    Floating,
    Center,
}

const ZONES: &[Rule<Zone>] = &[
    (
        Zone::Top,
        &[
            "header", "nav", "toolbar", "stepper", "breadcrumb", "topbar", "banner", "tabs",
            "progress",
        ],
    ),
    (
        Zone::Right,
        &[
            "sidebar", "panel", "inspector", "aside", "detail", "properties", "filter",
        ],
    ),
    (
        Zone::Bottom,
        &["footer", "action", "submit", "button", "cta", "status"],
    ),
    (
        Zone::Floating,
        &["modal", "dialog", "popup", "toast", "tooltip", "overlay", "drawer"],
    ),
];

/// Classify free text (already lowercase) into a zone.
pub fn classify(text: &str) -> Zone {
    first_match(text, ZONES).unwrap_or(Zone::Center)
}

/// Computed rectangle for one child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Set by the zone layout only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
}

impl Position {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Positions for every child plus the view box that contains them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutProposal {
    pub positions: Vec<Position>,
    pub view_box: Rect,
}

impl LayoutProposal {
    pub fn get(&self, id: NodeId) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }
}

/// Zone layout of `parent`'s children on a `width × height` canvas.
///
/// Positions come back in child order, one per child.
pub fn propose_layout(doc: &Document, parent: NodeId, width: f64, height: f64) -> LayoutProposal {
    let children = doc.child_ids(parent);
    let zones: Vec<Zone> = children
        .iter()
        .map(|id| {
            let node = doc.get(*id);
            let text = search_text([
                Some(id.as_str()),
                node.map(|n| n.name.as_str()),
                node.and_then(|n| n.visual_hint.as_deref()),
            ]);
            classify(&text)
        })
        .collect();

    let members = |zone: Zone| -> Vec<usize> {
        (0..children.len()).filter(|i| zones[*i] == zone).collect()
    };
    let top = members(Zone::Top);
    let right = members(Zone::Right);
    let center = members(Zone::Center);
    let bottom = members(Zone::Bottom);
    let floating = members(Zone::Floating);

    let mut rects: Vec<Rect> = vec![Rect::default(); children.len()];
    let available = (width - 2.0 * MARGIN).max(0.0);
    let mut lowest: f64 = 0.0;

    if !top.is_empty() {
        let w = grid::cols(available, top.len(), GAP);
        for (k, &i) in top.iter().enumerate() {
            rects[i] = Rect::new(MARGIN + k as f64 * (w + GAP), MARGIN, w, TOP_HEIGHT);
        }
        lowest = MARGIN + TOP_HEIGHT;
    }
    let content_y = if top.is_empty() {
        MARGIN
    } else {
        MARGIN + TOP_HEIGHT + GAP
    };

    let right_x = width - MARGIN - RIGHT_WIDTH;
    for (k, &i) in right.iter().enumerate() {
        let y = content_y + k as f64 * (RIGHT_HEIGHT + GAP);
        rects[i] = Rect::new(right_x, y, RIGHT_WIDTH, RIGHT_HEIGHT);
    }
    let right_height = stack_height(right.len(), RIGHT_HEIGHT);

    for (k, &i) in center.iter().enumerate() {
        let col = (k % CENTER_COLUMNS) as f64;
        let row = (k / CENTER_COLUMNS) as f64;
        rects[i] = Rect::new(
            MARGIN + col * (CELL_WIDTH + GAP),
            content_y + row * (CELL_HEIGHT + GAP),
            CELL_WIDTH,
            CELL_HEIGHT,
        );
    }
    let center_rows = center.len().div_ceil(CENTER_COLUMNS);
    let center_height = stack_height(center_rows, CELL_HEIGHT);

    let body = center_height.max(right_height);
    if body > 0.0 {
        lowest = lowest.max(content_y + body);
    }

    if !bottom.is_empty() {
        let y = if body > 0.0 {
            content_y + body + GAP
        } else {
            content_y
        };
        let n = bottom.len();
        let right_edge = width - MARGIN;
        for (k, &i) in bottom.iter().enumerate() {
            let x = right_edge - (n - k) as f64 * (BOTTOM_WIDTH + GAP) + GAP;
            rects[i] = Rect::new(x, y, BOTTOM_WIDTH, BOTTOM_HEIGHT);
        }
        lowest = lowest.max(y + BOTTOM_HEIGHT);
    }

    for &i in &floating {
        rects[i] = Rect::new(
            width / 2.0 - FLOATING_WIDTH / 2.0,
            height / 2.0 - FLOATING_HEIGHT / 2.0,
            FLOATING_WIDTH,
            FLOATING_HEIGHT,
        );
        lowest = lowest.max(height / 2.0 + FLOATING_HEIGHT / 2.0);
    }

    let positions = children
        .iter()
        .zip(rects.iter())
        .zip(zones.iter())
        .map(|((id, r), zone)| Position {
            id: *id,
            x: r.x,
            y: r.y,
            w: r.w,
            h: r.h,
            zone: Some(*zone),
        })
        .collect();

    let view_height = if lowest > 0.0 {
        height.max(lowest + MARGIN)
    } else {
        height
    };
    log::trace!(
        "zone layout for {parent}: top={} right={} center={} bottom={} floating={}",
        top.len(),
        right.len(),
        center.len(),
        bottom.len(),
        floating.len()
    );
    LayoutProposal {
        positions,
        view_box: Rect::new(0.0, 0.0, width, view_height),
    }
}

fn stack_height(n: usize, item: f64) -> f64 {
    if n == 0 {
        0.0
    } else {
        n as f64 * item + (n - 1) as f64 * GAP
    }
}

// ─── Archetype layout ────────────────────────────────────────────────────

/// Arrangement used below the section level, fixed by the phase category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Exploration,
    Architecture,
    Composition,
    Pipeline,
}

impl From<PhaseCategory> for Archetype {
    fn from(category: PhaseCategory) -> Self {
        match category {
            PhaseCategory::Exploration => Archetype::Exploration,
            PhaseCategory::Architecture => Archetype::Architecture,
            PhaseCategory::Composition => Archetype::Composition,
            PhaseCategory::Pipeline => Archetype::Pipeline,
        }
    }
}

/// Canvas dimensions handed to [`CanvasLayout::calculate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeConfig {
    pub width: f64,
    /// Minimum view box height.
    pub height: f64,
    pub margin: f64,
    pub gap: f64,
}

impl Default for ArchetypeConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            margin: MARGIN,
            gap: GAP,
        }
    }
}

pub struct CanvasLayout;

impl CanvasLayout {
    const EXPLORATION_MAX_WIDTH: f64 = 720.0;
    const EXPLORATION_HEIGHT: f64 = 96.0;
    const ARCHITECTURE_HEIGHT: f64 = 120.0;
    const COMPOSITION_WIDTH: f64 = 400.0;
    const COMPOSITION_HEIGHT: f64 = 200.0;
    const PIPELINE_WIDTH: f64 = 220.0;
    const PIPELINE_HEIGHT: f64 = 160.0;
    const PIPELINE_GAP: f64 = grid::XL;

    /// Place `items` in order according to `archetype`.
    pub fn calculate(
        archetype: Archetype,
        items: &[NodeId],
        config: &ArchetypeConfig,
    ) -> LayoutProposal {
        let m = config.margin;
        let gap = config.gap;
        let inner = (config.width - 2.0 * m).max(crate::overlay::MIN_WIDTH);

        let rects: Vec<Rect> = match archetype {
            Archetype::Exploration => {
                let w = grid::snap(inner.min(Self::EXPLORATION_MAX_WIDTH));
                let x = grid::snap((config.width - w) / 2.0);
                column(items.len(), x, m, w, Self::EXPLORATION_HEIGHT, gap)
            }
            Archetype::Architecture => column(items.len(), m, m, inner, Self::ARCHITECTURE_HEIGHT, gap),
            Archetype::Composition => (0..items.len())
                .map(|i| {
                    let col = (i % 2) as f64;
                    let row = (i / 2) as f64;
                    Rect::new(
                        m + col * (Self::COMPOSITION_WIDTH + gap),
                        m + row * (Self::COMPOSITION_HEIGHT + gap),
                        Self::COMPOSITION_WIDTH,
                        Self::COMPOSITION_HEIGHT,
                    )
                })
                .collect(),
            Archetype::Pipeline => (0..items.len())
                .map(|i| {
                    Rect::new(
                        m + i as f64 * (Self::PIPELINE_WIDTH + Self::PIPELINE_GAP),
                        m,
                        Self::PIPELINE_WIDTH,
                        Self::PIPELINE_HEIGHT,
                    )
                })
                .collect(),
        };

        let right = rects.iter().map(Rect::right).fold(0.0_f64, f64::max);
        let bottom = rects.iter().map(Rect::bottom).fold(0.0_f64, f64::max);
        let view_w = if rects.is_empty() {
            config.width
        } else {
            config.width.max(right + m)
        };
        let view_h = if rects.is_empty() {
            config.height
        } else {
            config.height.max(bottom + m)
        };

        let positions = items
            .iter()
            .zip(rects)
            .map(|(id, r)| Position {
                id: *id,
                x: r.x,
                y: r.y,
                w: r.w,
                h: r.h,
                zone: None,
            })
            .collect();
        LayoutProposal {
            positions,
            view_box: Rect::new(0.0, 0.0, view_w, view_h),
        }
    }
}

fn column(n: usize, x: f64, top: f64, w: f64, h: f64, gap: f64) -> Vec<Rect> {
    (0..n)
        .map(|i| Rect::new(x, top + i as f64 * (h + gap), w, h))
        .collect()
}

/// Lay out the children of `parent` with the strategy its level calls for.
///
/// The root and phases use the zone layout; sections and features use the
/// archetype of their phase. Leaves have no children and get an empty
/// proposal.
pub fn layout_children(doc: &Document, parent: NodeId, width: f64, height: f64) -> LayoutProposal {
    let level = doc.get(parent).and_then(|n| n.level());
    match level {
        None | Some(Level::Phase) => propose_layout(doc, parent, width, height),
        Some(Level::Section) | Some(Level::Feature) => {
            let archetype = Archetype::from(doc.phase_category(parent));
            let config = ArchetypeConfig {
                width,
                height,
                ..ArchetypeConfig::default()
            };
            CanvasLayout::calculate(archetype, &doc.child_ids(parent), &config)
        }
        Some(Level::Component) => LayoutProposal {
            positions: Vec::new(),
            view_box: Rect::new(0.0, 0.0, width, height),
        },
    }
}
