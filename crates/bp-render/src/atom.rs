//! Synthesized drawings for leaf components without a library fragment.
//!
//! The drawing is picked from the component's name, interaction type and
//! hint, then sized by its density. Unlike library fragments, atoms are
//! drawn at canvas scale: the returned height depends on the archetype.

use crate::primitive::{Anchor, Fragment, Primitive};
use crate::wireframe::{INK, LINE, MUTED, SURFACE, WHITE};
use bp_core::keywords::{Rule, first_match, search_text};
use bp_core::{Color, Density, DesignNode, Importance, Role, hint};

/// Which drawing an atom uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    Button,
    Form,
    List,
    Table,
    Upload,
    Breadcrumb,
    Accordion,
    Stepper,
    StatusPill,
    DashboardCard,
    CodeEditor,
    ChatBubbles,
    Grid,
    Generic,
}

const KINDS: &[Rule<AtomKind>] = &[
    (AtomKind::Upload, &["upload", "file", "drop", "attach"]),
    (AtomKind::Breadcrumb, &["breadcrumb", "nav"]),
    (AtomKind::Accordion, &["accordion", "faq", "collapse", "expand"]),
    (AtomKind::Stepper, &["stepper", "step", "wizard"]),
    (AtomKind::StatusPill, &["status", "badge", "pill", "tag"]),
    (AtomKind::DashboardCard, &["dashboard", "kpi", "metric", "stat"]),
    (AtomKind::CodeEditor, &["code", "snippet", "terminal"]),
    (AtomKind::ChatBubbles, &["chat", "message", "conversation"]),
    (AtomKind::Grid, &["gallery", "tiles", "matrix", "grid"]),
];

/// Size metrics driven by density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub row: f64,
    pub pad: f64,
    pub font: f64,
}

impl Metrics {
    pub fn for_density(density: Density) -> Self {
        match density {
            Density::Compact => Self {
                row: 24.0,
                pad: 8.0,
                font: 11.0,
            },
            Density::Normal => Self {
                row: 32.0,
                pad: 12.0,
                font: 13.0,
            },
        }
    }
}

/// Result of [`AtomRenderer::render_atom`]; the fragment sits at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomOutput {
    pub fragment: Fragment,
    pub width: f64,
    pub height: f64,
    pub kind: AtomKind,
}

/// Role derived from explicit attributes, then interaction type, then hint.
pub fn role_of(node: &DesignNode) -> Role {
    let attrs = node.leaf();
    if let Some(role) = attrs.and_then(|a| a.semantic_role) {
        return role;
    }
    let interaction = attrs
        .and_then(|a| a.interaction_type.as_deref())
        .map(str::to_lowercase);
    match interaction.as_deref() {
        Some("submit" | "click") => return Role::Action,
        Some("input" | "select") => return Role::DataEntry,
        _ => {}
    }
    match hint::resolve(node).as_deref() {
        Some("table" | "list") => Role::DataDisplay,
        Some("button") => Role::Action,
        Some("form" | "search") => Role::DataEntry,
        _ => Role::Component,
    }
}

/// Explicit importance, else primary for actions.
pub fn importance_of(node: &DesignNode, role: Role) -> Importance {
    node.leaf()
        .and_then(|a| a.importance)
        .unwrap_or(if role == Role::Action {
            Importance::Primary
        } else {
            Importance::Secondary
        })
}

/// Pick the drawing for a node with the given role.
pub fn kind_of(node: &DesignNode, role: Role) -> AtomKind {
    let resolved = hint::resolve(node);
    let text = search_text([
        Some(node.name.as_str()),
        node.leaf().and_then(|a| a.interaction_type.as_deref()),
        resolved.as_deref(),
    ]);
    if let Some(kind) = first_match(&text, KINDS) {
        return kind;
    }
    match role {
        Role::Action => AtomKind::Button,
        Role::DataEntry => AtomKind::Form,
        Role::DataDisplay if resolved.as_deref() == Some("table") => AtomKind::Table,
        Role::DataDisplay => AtomKind::List,
        Role::Component => AtomKind::Generic,
    }
}

pub struct AtomRenderer;

impl AtomRenderer {
    pub fn render_atom(node: &DesignNode, available_width: f64, color: Color) -> AtomOutput {
        let role = role_of(node);
        let importance = importance_of(node, role);
        let density = node.leaf().map(|a| a.density).unwrap_or_default();
        let m = Metrics::for_density(density);
        let kind = kind_of(node, role);
        let w = available_width.max(0.0);
        let accent = match importance {
            Importance::Primary => color,
            Importance::Secondary => color.with_alpha(0.6),
        };
        let label = node.name.as_str();

        let (primitives, width, height) = match kind {
            AtomKind::Button => button(label, w, m, accent, importance),
            AtomKind::Form => form(w, m, accent),
            AtomKind::List => list(w, m, accent),
            AtomKind::Table => table(w, m, accent),
            AtomKind::Upload => upload(w, m, accent),
            AtomKind::Breadcrumb => breadcrumb(w, m, accent),
            AtomKind::Accordion => accordion(w, m, accent),
            AtomKind::Stepper => stepper(w, m, accent),
            AtomKind::StatusPill => status_pill(label, w, m, accent),
            AtomKind::DashboardCard => dashboard_card(w, m, accent),
            AtomKind::CodeEditor => code_editor(w, m, accent),
            AtomKind::ChatBubbles => chat(w, m, accent),
            AtomKind::Grid => grid(w, m, accent),
            AtomKind::Generic => generic(label, w, density, m, accent),
        };
        log::trace!("atom for {}: {kind:?} {width}×{height}", node.id);
        AtomOutput {
            fragment: Fragment::new(primitives),
            width,
            height,
            kind,
        }
    }
}

type Drawn = (Vec<Primitive>, f64, f64);

fn stack_height(m: Metrics, rows: usize, gap: f64) -> f64 {
    2.0 * m.pad + rows as f64 * m.row + rows.saturating_sub(1) as f64 * gap
}

fn placeholder(x: f64, y: f64, w: f64, color: Color) -> Primitive {
    Primitive::rect(x, y, w.max(0.0), 6.0).rounded(3.0).fill(color)
}

fn button(label: &str, w: f64, m: Metrics, accent: Color, importance: Importance) -> Drawn {
    let bw = w.min(200.0);
    let h = m.row + m.pad;
    let x = (w - bw) / 2.0;
    let rect = Primitive::rect(x, 0.0, bw, h).rounded(6.0).tag("button");
    let (rect, ink) = match importance {
        Importance::Primary => (rect.fill(accent), WHITE),
        Importance::Secondary => (rect.fill(WHITE).stroke(accent, 1.5), accent),
    };
    let text = Primitive::text(w / 2.0, h / 2.0 + m.font / 3.0, label, m.font)
        .fill(ink)
        .bold();
    (vec![rect, text], w, h)
}

fn form(w: f64, m: Metrics, accent: Color) -> Drawn {
    let h = stack_height(m, 2, m.pad);
    let mut out = Vec::new();
    for i in 0..2 {
        let y = m.pad + i as f64 * (m.row + m.pad);
        out.push(
            Primitive::rect(m.pad, y, (w - 2.0 * m.pad).max(0.0), m.row)
                .rounded(4.0)
                .fill(WHITE)
                .stroke(if i == 0 { accent } else { LINE }, 1.5)
                .tag("input"),
        );
        out.push(placeholder(2.0 * m.pad, y + m.row / 2.0 - 3.0, w * 0.3, LINE));
    }
    (out, w, h)
}

fn list(w: f64, m: Metrics, accent: Color) -> Drawn {
    let h = stack_height(m, 4, 4.0);
    let mut out = Vec::new();
    for i in 0..4 {
        let y = m.pad + i as f64 * (m.row + 4.0);
        out.push(
            Primitive::rect(m.pad, y, (w - 2.0 * m.pad).max(0.0), m.row)
                .rounded(4.0)
                .fill(SURFACE)
                .tag("row"),
        );
        out.push(Primitive::circle(m.pad + m.row / 2.0, y + m.row / 2.0, m.row / 5.0).fill(accent));
        out.push(placeholder(m.pad + m.row, y + m.row / 2.0 - 3.0, w * 0.4, LINE));
    }
    (out, w, h)
}

fn table(w: f64, m: Metrics, accent: Color) -> Drawn {
    let rows = 4;
    let h = 2.0 * m.pad + rows as f64 * m.row;
    let inner = (w - 2.0 * m.pad).max(0.0);
    let mut out = vec![
        Primitive::rect(m.pad, m.pad, inner, rows as f64 * m.row)
            .rounded(4.0)
            .fill(WHITE)
            .stroke(LINE, 1.0),
        Primitive::rect(m.pad, m.pad, inner, m.row)
            .fill(accent.with_alpha(0.15))
            .tag("header"),
    ];
    for r in 1..rows {
        let y = m.pad + r as f64 * m.row;
        out.push(Primitive::line(m.pad, y, m.pad + inner, y).stroke(LINE, 1.0).tag("row"));
    }
    for c in 1..3 {
        let x = m.pad + inner * c as f64 / 3.0;
        out.push(Primitive::line(x, m.pad, x, h - m.pad).stroke(LINE, 1.0));
    }
    (out, w, h)
}

fn upload(w: f64, m: Metrics, accent: Color) -> Drawn {
    let h = 3.0 * m.row + 2.0 * m.pad;
    let cx = w / 2.0;
    let cy = h / 2.0;
    let out = vec![
        Primitive::rect(m.pad, m.pad, (w - 2.0 * m.pad).max(0.0), 3.0 * m.row)
            .rounded(6.0)
            .fill(accent.with_alpha(0.06))
            .stroke(accent, 1.5)
            .dashed()
            .tag("dropzone"),
        Primitive::polyline(vec![(cx - 8.0, cy - 2.0), (cx, cy - 10.0), (cx + 8.0, cy - 2.0)])
            .stroke(accent, 2.0),
        Primitive::line(cx, cy - 10.0, cx, cy + 10.0).stroke(accent, 2.0),
    ];
    (out, w, h)
}

fn breadcrumb(w: f64, m: Metrics, accent: Color) -> Drawn {
    let h = m.row + m.pad;
    let seg = ((w - 2.0 * m.pad) / 3.0).max(0.0);
    let mut out = Vec::new();
    for i in 0..3 {
        let x = m.pad + i as f64 * seg;
        let last = i == 2;
        out.push(
            placeholder(x, h / 2.0 - 3.0, seg * 0.6, if last { accent } else { MUTED }).tag("crumb"),
        );
        if !last {
            let sx = x + seg * 0.75;
            out.push(
                Primitive::polyline(vec![(sx, h / 2.0 - 5.0), (sx + 5.0, h / 2.0), (sx, h / 2.0 + 5.0)])
                    .stroke(MUTED, 1.5),
            );
        }
    }
    (out, w, h)
}

fn accordion(w: f64, m: Metrics, accent: Color) -> Drawn {
    let open = m.row * 1.5;
    let h = 2.0 * m.pad + 3.0 * m.row + open + 3.0 * 4.0;
    let inner = (w - 2.0 * m.pad).max(0.0);
    let mut out = Vec::new();
    let mut y = m.pad;
    for i in 0..3 {
        out.push(
            Primitive::rect(m.pad, y, inner, m.row)
                .rounded(4.0)
                .fill(WHITE)
                .stroke(LINE, 1.0)
                .tag("panel"),
        );
        out.push(placeholder(2.0 * m.pad, y + m.row / 2.0 - 3.0, inner * 0.4, INK.with_alpha(0.4)));
        y += m.row + 4.0;
        if i == 0 {
            out.push(
                Primitive::rect(m.pad, y, inner, open)
                    .fill(accent.with_alpha(0.06))
                    .tag("body"),
            );
            y += open + 4.0;
        }
    }
    (out, w, h)
}

fn stepper(w: f64, m: Metrics, accent: Color) -> Drawn {
    let h = m.row + 2.0 * m.pad;
    let r = m.row / 3.0;
    let span = (w - 2.0 * m.pad - 2.0 * r).max(0.0);
    let cy = h / 2.0;
    let mut out = vec![Primitive::line(m.pad + r, cy, m.pad + r + span, cy).stroke(LINE, 2.0)];
    for i in 0..4 {
        let cx = m.pad + r + span * i as f64 / 3.0;
        let dot = Primitive::circle(cx, cy, r).tag("step");
        out.push(if i < 2 {
            dot.fill(accent)
        } else {
            dot.fill(WHITE).stroke(LINE, 1.5)
        });
    }
    (out, w, h)
}

fn status_pill(label: &str, w: f64, m: Metrics, accent: Color) -> Drawn {
    let h = m.row;
    let pw = (label.chars().count() as f64 * m.font * 0.6 + 2.0 * m.pad + h / 2.0).min(w);
    let out = vec![
        Primitive::rect(0.0, 0.0, pw, h)
            .rounded(h / 2.0)
            .fill(accent.with_alpha(0.15))
            .tag("pill"),
        Primitive::circle(m.pad + 3.0, h / 2.0, 3.5).fill(accent),
        Primitive::text(m.pad + 12.0, h / 2.0 + m.font / 3.0, label, m.font)
            .anchor(Anchor::Start)
            .fill(INK),
    ];
    (out, w, h)
}

fn dashboard_card(w: f64, m: Metrics, accent: Color) -> Drawn {
    let h = 3.0 * m.row + 2.0 * m.pad;
    let inner = (w - 2.0 * m.pad).max(0.0);
    let out = vec![
        Primitive::rect(0.0, 0.0, w, h)
            .rounded(8.0)
            .fill(WHITE)
            .stroke(LINE, 1.0)
            .tag("card"),
        placeholder(m.pad, m.pad, inner * 0.4, MUTED),
        Primitive::text(m.pad, m.pad + m.row * 1.6, "00", m.row * 0.8)
            .anchor(Anchor::Start)
            .fill(accent)
            .bold(),
        Primitive::polyline(vec![
            (m.pad, h - m.pad),
            (m.pad + inner * 0.3, h - m.pad - m.row * 0.4),
            (m.pad + inner * 0.6, h - m.pad - m.row * 0.2),
            (m.pad + inner, h - m.pad - m.row * 0.8),
        ])
        .stroke(accent, 1.5),
    ];
    (out, w, h)
}

fn code_editor(w: f64, m: Metrics, accent: Color) -> Drawn {
    let h = 4.0 * m.row + 2.0 * m.pad;
    let gutter = m.row;
    let mut out = vec![
        Primitive::rect(0.0, 0.0, w, h).rounded(6.0).fill(INK).tag("editor"),
        Primitive::rect(0.0, 0.0, gutter, h).fill(INK.mix(WHITE, 0.1)),
    ];
    let step = (h - 2.0 * m.pad) / 6.0;
    for i in 0..6 {
        let indent = if (1..4).contains(&i) { m.pad } else { 0.0 };
        let width = (w - gutter - 2.0 * m.pad) * [0.5, 0.7, 0.4, 0.6, 0.3, 0.5][i];
        let tint = if i % 2 == 0 { accent } else { MUTED };
        out.push(placeholder(gutter + m.pad + indent, m.pad + i as f64 * step, width, tint).tag("code-line"));
    }
    (out, w, h)
}

fn chat(w: f64, m: Metrics, accent: Color) -> Drawn {
    let h = 2.0 * m.pad + 3.0 * m.row + 2.0 * m.pad;
    let bw = (w * 0.6).max(0.0);
    let out: Vec<Primitive> = (0..3)
        .map(|i| {
            let y = m.pad + i as f64 * (m.row + m.pad);
            let mine = i == 1;
            let x = if mine { w - m.pad - bw } else { m.pad };
            let bubble = Primitive::rect(x, y, bw, m.row).rounded(m.row / 2.0).tag("bubble");
            if mine {
                bubble.fill(accent)
            } else {
                bubble.fill(SURFACE).stroke(LINE, 1.0)
            }
        })
        .collect();
    (out, w, h)
}

fn grid(w: f64, m: Metrics, accent: Color) -> Drawn {
    let cell_h = 2.0 * m.row;
    let h = 2.0 * m.pad + 2.0 * cell_h + m.pad;
    let cell_w = ((w - 3.0 * m.pad) / 2.0).max(0.0);
    let mut out = Vec::new();
    for row in 0..2 {
        for col in 0..2 {
            out.push(
                Primitive::rect(
                    m.pad + col as f64 * (cell_w + m.pad),
                    m.pad + row as f64 * (cell_h + m.pad),
                    cell_w,
                    cell_h,
                )
                .rounded(4.0)
                .fill(accent.with_alpha(0.1 + 0.05 * (row * 2 + col) as f32))
                .tag("cell"),
            );
        }
    }
    (out, w, h)
}

fn generic(label: &str, w: f64, density: Density, m: Metrics, accent: Color) -> Drawn {
    let h = match density {
        Density::Compact => 40.0,
        Density::Normal => 56.0,
    };
    let out = vec![
        Primitive::rect(0.0, 0.0, w, h)
            .rounded(8.0)
            .fill(WHITE)
            .stroke(accent.with_alpha(0.5), 1.0)
            .tag("component"),
        Primitive::text(w / 2.0, h / 2.0 + m.font / 3.0, label, m.font).fill(INK),
    ];
    (out, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_core::{DEFAULT_ACCENT, LeafAttrs, NodeId, NodeKind};
    use pretty_assertions::assert_eq;

    fn leaf(id: &str, name: &str, attrs: LeafAttrs) -> DesignNode {
        DesignNode::new(NodeId::intern(id), NodeKind::Component(attrs), name)
    }

    fn interaction(kind: &str) -> LeafAttrs {
        LeafAttrs {
            interaction_type: Some(kind.into()),
            ..LeafAttrs::default()
        }
    }

    #[test]
    fn roles_come_from_interaction_type() {
        assert_eq!(role_of(&leaf("at_a", "Pay", interaction("submit"))), Role::Action);
        assert_eq!(role_of(&leaf("at_b", "Name", interaction("Input"))), Role::DataEntry);
        assert_eq!(role_of(&leaf("at_c", "Pick", interaction("select"))), Role::DataEntry);
        assert_eq!(role_of(&leaf("at_d", "Logo", LeafAttrs::default())), Role::Component);
    }

    #[test]
    fn explicit_role_wins() {
        let attrs = LeafAttrs {
            semantic_role: Some(Role::DataDisplay),
            ..interaction("click")
        };
        assert_eq!(role_of(&leaf("at_e", "Orders", attrs)), Role::DataDisplay);
    }

    #[test]
    fn importance_defaults_by_role() {
        let node = leaf("at_f", "Go", interaction("click"));
        assert_eq!(importance_of(&node, Role::Action), Importance::Primary);
        assert_eq!(importance_of(&node, Role::DataEntry), Importance::Secondary);
    }

    #[test]
    fn density_drives_button_height() {
        let normal = AtomRenderer::render_atom(
            &leaf("at_g", "Save", interaction("submit")),
            240.0,
            DEFAULT_ACCENT,
        );
        let compact = AtomRenderer::render_atom(
            &leaf(
                "at_h",
                "Save",
                LeafAttrs {
                    density: Density::Compact,
                    ..interaction("submit")
                },
            ),
            240.0,
            DEFAULT_ACCENT,
        );
        assert_eq!(normal.kind, AtomKind::Button);
        assert_eq!((normal.height, compact.height), (44.0, 32.0));
    }

    #[test]
    fn keywords_pick_archetypes() {
        let kind = |name: &str| {
            let node = leaf(&format!("at_k_{name}"), name, LeafAttrs::default());
            AtomRenderer::render_atom(&node, 200.0, DEFAULT_ACCENT).kind
        };
        assert_eq!(kind("Avatar upload"), AtomKind::Upload);
        assert_eq!(kind("FAQ"), AtomKind::Accordion);
        assert_eq!(kind("Order status"), AtomKind::StatusPill);
        assert_eq!(kind("Snippet"), AtomKind::CodeEditor);
        assert_eq!(kind("Support chat"), AtomKind::ChatBubbles);
        assert_eq!(kind("Tiles"), AtomKind::Grid);
    }

    #[test]
    fn data_entry_renders_two_field_form() {
        let out = AtomRenderer::render_atom(
            &leaf("at_i", "Address", interaction("input")),
            300.0,
            DEFAULT_ACCENT,
        );
        assert_eq!(out.kind, AtomKind::Form);
        let inputs = out
            .fragment
            .primitives
            .iter()
            .filter(|p| p.tag == Some("input"))
            .count();
        assert_eq!(inputs, 2);
        // 2*12 + 2*32 + 12
        assert_eq!(out.height, 100.0);
    }

    #[test]
    fn generic_fallback_heights() {
        let normal = AtomRenderer::render_atom(&leaf("at_j", "Logo", LeafAttrs::default()), 200.0, DEFAULT_ACCENT);
        assert_eq!((normal.kind, normal.height), (AtomKind::Generic, 56.0));
        let compact = AtomRenderer::render_atom(
            &leaf(
                "at_l",
                "Logo",
                LeafAttrs {
                    density: Density::Compact,
                    ..LeafAttrs::default()
                },
            ),
            200.0,
            DEFAULT_ACCENT,
        );
        assert_eq!(compact.height, 40.0);
    }

    #[test]
    fn zero_width_never_panics() {
        for name in ["Pay", "Orders", "Address", "Upload", "Chat", "Tiles", "Logo"] {
            let node = leaf(&format!("at_z_{name}"), name, interaction("click"));
            let out = AtomRenderer::render_atom(&node, 0.0, DEFAULT_ACCENT);
            assert!(out.width >= 0.0 && out.height > 0.0);
        }
    }
}
