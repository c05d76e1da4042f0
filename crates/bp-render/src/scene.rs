//! Scene construction: one visual group per rendered node.
//!
//! A node's visual is a frame (background + outline), a thin accent stripe,
//! a centered title and a content fragment. Which content is drawn depends
//! on the node's level and resolved hint:
//!
//! | node                  | content                          | title  |
//! |-----------------------|----------------------------------|--------|
//! | leaf                  | library fragment, else atom      | dimmed |
//! | non-leaf with hint    | library fragment                 | dimmed |
//! | phase                 | accent glyph                     | hidden |
//! | section / feature     | description, else child preview  | hidden |
//!
//! Hidden titles are revealed on hover or selection.

use crate::atom::{AtomKind, AtomRenderer};
use crate::handles::{Handle, handles_for};
use crate::primitive::{Anchor, Fragment, GLYPH_ADVANCE, LINE_HEIGHT, Primitive};
use crate::wireframe::{INK, MUTED, WHITE, WireframeLibrary};
use bp_core::{
    Color, Document, LayoutProposal, Level, NodeId, Overlay, Rect, StyleOverride, hint,
};

pub const STRIPE_HEIGHT: f64 = 4.0;
pub const DIMMED_TITLE_OPACITY: f32 = 0.6;

const TITLE_GAP: f64 = 6.0;
const BODY_SIZE: f64 = 12.0;
const BODY_LINE: f64 = 18.0;
pub const CORNER_RADIUS: f64 = 8.0;

/// How the title of a node is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleState {
    Hidden,
    Dimmed,
    Visible,
}

impl TitleState {
    pub fn opacity(self) -> f32 {
        match self {
            TitleState::Hidden => 0.0,
            TitleState::Dimmed => DIMMED_TITLE_OPACITY,
            TitleState::Visible => 1.0,
        }
    }
}

/// What the content fragment of a visual was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentKind {
    Wireframe(String),
    Atom(AtomKind),
    Glyph,
    Description,
    Preview,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub rect: Rect,
    pub fill: Color,
    pub fill_opacity: f32,
    pub stroke: Color,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub text: String,
    /// Horizontal center.
    pub x: f64,
    /// Baseline.
    pub y: f64,
    pub size: f64,
    pub font: String,
    /// State when neither hovered nor selected.
    pub rest: TitleState,
}

impl Title {
    /// Estimated bounds of the label, used for hit testing and the rename field.
    pub fn rect(&self) -> Rect {
        let w = self.text.chars().count() as f64 * self.size * GLYPH_ADVANCE;
        let h = self.size * LINE_HEIGHT;
        Rect::new(self.x - w / 2.0, self.y - self.size, w, h)
    }
}

/// Everything drawn for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub id: NodeId,
    pub level: Level,
    pub rect: Rect,
    pub accent: Color,
    pub frame: Frame,
    pub stripe: Rect,
    pub title: Title,
    pub content: Option<Fragment>,
    pub content_kind: ContentKind,
    pub hovered: bool,
    pub selected: bool,
    /// Faded while a sibling is in group edit.
    pub dimmed: bool,
    /// The title is being renamed in place.
    pub editing: bool,
}

impl NodeVisual {
    pub fn title_state(&self) -> TitleState {
        if self.editing {
            TitleState::Hidden
        } else if self.hovered || self.selected {
            TitleState::Visible
        } else {
            self.title.rest
        }
    }

    /// Move everything by a canvas delta without re-rendering.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.rect = self.rect.translate(dx, dy);
        self.frame.rect = self.frame.rect.translate(dx, dy);
        self.stripe = self.stripe.translate(dx, dy);
        self.title.x += dx;
        self.title.y += dy;
        if let Some(content) = &mut self.content {
            content.translate(dx, dy);
        }
    }

    /// Move the top-left corner to `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let (dx, dy) = (x - self.rect.x, y - self.rect.y);
        self.translate(dx, dy);
    }

    fn keep_flags(&mut self, from: &NodeVisual) {
        self.hovered = from.hovered;
        self.selected = from.selected;
        self.dimmed = from.dimmed;
        self.editing = from.editing;
    }
}

/// The visuals currently on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Node whose children are rendered.
    pub parent: NodeId,
    pub view_box: Rect,
    pub visuals: Vec<NodeVisual>,
    /// Resize handles of the selection; empty when nothing is selected.
    pub handles: Vec<Handle>,
    /// Highlighted primitive while editing a group.
    pub primitive_focus: Option<(NodeId, usize)>,
}

impl Scene {
    pub fn empty(parent: NodeId, view_box: Rect) -> Self {
        Self {
            parent,
            view_box,
            visuals: Vec::new(),
            handles: Vec::new(),
            primitive_focus: None,
        }
    }

    pub fn visual(&self, id: NodeId) -> Option<&NodeVisual> {
        self.visuals.iter().find(|v| v.id == id)
    }

    pub fn visual_mut(&mut self, id: NodeId) -> Option<&mut NodeVisual> {
        self.visuals.iter_mut().find(|v| v.id == id)
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.visuals.iter().map(|v| v.id).collect()
    }

    /// Show handles around `rect`, or hide them.
    pub fn set_handles(&mut self, rect: Option<Rect>) {
        self.handles = rect.map(handles_for).unwrap_or_default();
    }
}

/// Builds and refreshes node visuals.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRenderer {
    pub title_size: f64,
    pub leaf_title_size: f64,
    /// Content inset when the style sets no padding.
    pub padding: f64,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self {
            title_size: 14.0,
            leaf_title_size: 11.0,
            padding: 12.0,
        }
    }
}

impl SceneRenderer {
    /// Render node `id` into `rect`. `None` for unknown ids or the root.
    pub fn render_node(
        &self,
        doc: &Document,
        overlay: &Overlay,
        id: NodeId,
        rect: Rect,
        accent: Color,
    ) -> Option<NodeVisual> {
        let Some(node) = doc.get(id) else {
            log::debug!("render_node: unknown node {id}");
            return None;
        };
        let level = node.level()?;
        let empty = StyleOverride::default();
        let style = overlay.style(id).unwrap_or(&empty);
        let substyle = overlay.substyle(doc, id);

        let frame_rect = rect.inset(style.margin.unwrap_or(0.0).max(0.0));
        let (fill, fill_opacity) = match parse_color(id, "fill", style.fill.as_deref()) {
            Some(c) => (c, 1.0),
            None => (accent, substyle.presence.fill_opacity()),
        };
        let frame = Frame {
            rect: frame_rect,
            fill,
            fill_opacity,
            stroke: parse_color(id, "stroke", style.stroke.as_deref())
                .unwrap_or(accent.with_alpha(0.5)),
            stroke_width: style
                .stroke_width
                .unwrap_or(substyle.grain.stroke_width())
                .max(0.0),
        };
        let stripe = Rect::new(frame_rect.x, frame_rect.y, frame_rect.w, STRIPE_HEIGHT);

        let leaf = level.is_leaf();
        let size = if leaf {
            self.leaf_title_size
        } else {
            self.title_size
        };
        let font = style
            .font
            .clone()
            .unwrap_or_else(|| substyle.registre.font_family().to_string());
        let title_top = frame_rect.y + STRIPE_HEIGHT + TITLE_GAP;
        let band = TITLE_GAP + size * LINE_HEIGHT;

        let padding = style.padding.unwrap_or(self.padding).max(0.0);
        let inner = frame_rect.inset(padding);
        let area = Rect::new(
            inner.x,
            inner.y + band,
            inner.w,
            (inner.h - band).max(0.0),
        );

        let resolved = hint::resolve(node);
        let library = resolved.as_deref().and_then(|h| {
            WireframeLibrary::get(h, accent, area.w, area.h, &node.name).map(|mut f| {
                f.translate(area.x, area.y);
                (h.to_string(), f)
            })
        });

        let (content, content_kind, rest) = match library {
            Some((h, fragment)) => (Some(fragment), ContentKind::Wireframe(h), TitleState::Dimmed),
            None if leaf => {
                let atom = AtomRenderer::render_atom(node, area.w, accent);
                let mut fragment = atom.fragment;
                if atom.height > area.h && atom.height > 0.0 {
                    fragment.scale = area.h / atom.height;
                }
                fragment.x = area.x + (area.w - atom.width * fragment.scale) / 2.0;
                fragment.y = area.y;
                (Some(fragment), ContentKind::Atom(atom.kind), TitleState::Dimmed)
            }
            None => {
                let (content, kind) = match level {
                    Level::Phase => (Some(glyph(area, accent)), ContentKind::Glyph),
                    _ => self.summary(doc, id, level, area, accent),
                };
                (content, kind, TitleState::Hidden)
            }
        };

        Some(NodeVisual {
            id,
            level,
            rect,
            accent,
            frame,
            stripe,
            title: Title {
                text: node.name.clone(),
                x: frame_rect.x + frame_rect.w / 2.0,
                y: title_top + size,
                size,
                font,
                rest,
            },
            content,
            content_kind,
            hovered: false,
            selected: false,
            dimmed: false,
            editing: false,
        })
    }

    /// Re-render `visual` at a new size, keeping its position and flags.
    ///
    /// The hint is re-resolved and the label re-read from the live node.
    /// Returns `false` when the node no longer exists.
    pub fn update_node(
        &self,
        visual: &mut NodeVisual,
        doc: &Document,
        overlay: &Overlay,
        w: f64,
        h: f64,
    ) -> bool {
        let rect = Rect::new(visual.rect.x, visual.rect.y, w, h);
        match self.render_node(doc, overlay, visual.id, rect, visual.accent) {
            Some(mut fresh) => {
                fresh.keep_flags(visual);
                *visual = fresh;
                true
            }
            None => false,
        }
    }

    /// Render every child in `proposal`, preferring layout overrides.
    pub fn build_scene(
        &self,
        doc: &Document,
        overlay: &Overlay,
        parent: NodeId,
        proposal: &LayoutProposal,
    ) -> Scene {
        let mut scene = Scene::empty(parent, proposal.view_box);
        for position in &proposal.positions {
            let rect = overlay
                .layout(position.id)
                .map(|o| o.rect())
                .unwrap_or_else(|| position.rect());
            let accent = doc.accent_color(position.id);
            if let Some(visual) = self.render_node(doc, overlay, position.id, rect, accent) {
                scene.visuals.push(visual);
            }
        }
        log::debug!(
            "built scene for {parent} with {} visuals",
            scene.visuals.len()
        );
        scene
    }

    /// Description text, or a preview of the first children.
    fn summary(
        &self,
        doc: &Document,
        id: NodeId,
        level: Level,
        area: Rect,
        accent: Color,
    ) -> (Option<Fragment>, ContentKind) {
        let max_lines = (area.h / BODY_LINE).floor().max(0.0) as usize;
        let node = doc.get(id);

        if let Some(text) = node.and_then(|n| n.description.as_deref())
            && !text.trim().is_empty()
        {
            let max_chars = (area.w / (BODY_SIZE * GLYPH_ADVANCE)).floor().max(1.0) as usize;
            let lines: Vec<Primitive> = wrap(text, max_chars)
                .into_iter()
                .take(max_lines)
                .enumerate()
                .map(|(i, line)| {
                    Primitive::text(0.0, BODY_SIZE + i as f64 * BODY_LINE, line, BODY_SIZE)
                        .anchor(Anchor::Start)
                        .fill(INK)
                        .opacity(0.8)
                })
                .collect();
            return (Some(at(lines, area)), ContentKind::Description);
        }

        let limit = if level == Level::Section { 3 } else { 4 };
        let names: Vec<String> = doc
            .child_ids(id)
            .into_iter()
            .filter_map(|c| doc.get(c).map(|n| n.name.clone()))
            .take(limit.min(max_lines))
            .collect();
        if names.is_empty() {
            return (None, ContentKind::Empty);
        }
        let lines = names
            .into_iter()
            .enumerate()
            .flat_map(|(i, name)| {
                let baseline = BODY_SIZE + i as f64 * BODY_LINE;
                [
                    Primitive::circle(3.0, baseline - BODY_SIZE / 3.0, 3.0).fill(accent),
                    Primitive::text(12.0, baseline, name, BODY_SIZE)
                        .anchor(Anchor::Start)
                        .fill(MUTED)
                        .tag("preview"),
                ]
            })
            .collect();
        (Some(at(lines, area)), ContentKind::Preview)
    }
}

fn at(primitives: Vec<Primitive>, area: Rect) -> Fragment {
    let mut fragment = Fragment::new(primitives);
    fragment.translate(area.x, area.y);
    fragment
}

fn glyph(area: Rect, accent: Color) -> Fragment {
    let r = (area.w.min(area.h) / 4.0).clamp(0.0, 16.0);
    let (cx, cy) = (area.w / 2.0, area.h / 2.0);
    at(
        vec![
            Primitive::circle(cx, cy, r).fill(accent).tag("glyph"),
            Primitive::circle(cx, cy, r / 2.0).fill(WHITE),
        ],
        area,
    )
}

fn parse_color(id: NodeId, field: &str, value: Option<&str>) -> Option<Color> {
    let value = value?;
    let color = Color::from_hex(value);
    if color.is_none() {
        log::warn!("ignoring {field} override {value:?} on {id}: not a hex color");
    }
    color
}

/// Greedy word wrap. Words longer than a line are kept whole.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
