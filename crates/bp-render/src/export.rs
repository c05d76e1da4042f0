//! Standalone SVG export of a scene.

use crate::scene::{CORNER_RADIUS, NodeVisual, Scene, TitleState};
use bp_core::{Color, Level};
use svg::Document;
use svg::node::element as svg_element;

const BACKGROUND: &str = "#FFFFFF";
const SELECTION: &str = "#2563EB";
const DIMMED_OPACITY: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    /// Draw the resize handles of the selection.
    pub include_handles: bool,
    /// Paint a white background behind the scene.
    pub background: bool,
    /// Screen size of a live surface. The view box is then stretched over
    /// it on both axes, matching the viewport transform.
    pub surface_size: Option<(f64, f64)>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            include_handles: false,
            background: true,
            surface_size: None,
        }
    }
}

/// Serialize `scene` into an SVG document, sized to its view box unless a
/// surface size is given.
pub fn render_svg(scene: &Scene, options: &SvgOptions) -> String {
    let vb = scene.view_box;
    let mut doc = Document::new().set("viewBox", format!("{} {} {} {}", vb.x, vb.y, vb.w, vb.h));
    doc = match options.surface_size {
        Some((w, h)) => doc
            .set("width", w)
            .set("height", h)
            .set("preserveAspectRatio", "none"),
        None => doc.set("width", vb.w).set("height", vb.h),
    };

    if options.background {
        doc = doc.add(
            svg_element::Rectangle::new()
                .set("x", vb.x)
                .set("y", vb.y)
                .set("width", vb.w)
                .set("height", vb.h)
                .set("fill", BACKGROUND),
        );
    }

    for visual in &scene.visuals {
        let focus = scene
            .primitive_focus
            .filter(|(id, _)| *id == visual.id)
            .map(|(_, index)| index);
        doc = doc.add(visual_to_svg(visual, focus));
    }

    if options.include_handles {
        for handle in &scene.handles {
            let r = handle.rect();
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("class", "handle")
                    .set("x", r.x)
                    .set("y", r.y)
                    .set("width", r.w)
                    .set("height", r.h)
                    .set("fill", BACKGROUND)
                    .set("stroke", SELECTION)
                    .set("stroke-width", 1),
            );
        }
    }

    doc.to_string()
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Phase => "phase",
        Level::Section => "section",
        Level::Feature => "feature",
        Level::Component => "component",
    }
}

fn color_attr(c: Color) -> String {
    c.to_hex()
}

/// One node as an SVG group: frame, stripe, content, title.
pub fn visual_to_svg(visual: &NodeVisual, focus: Option<usize>) -> svg_element::Group {
    let f = &visual.frame;
    let mut group = svg_element::Group::new()
        .set("id", visual.id.as_str())
        .set("class", format!("node {}", level_class(visual.level)));
    if visual.dimmed {
        group = group.set("opacity", DIMMED_OPACITY);
    }

    let (stroke, stroke_width) = if visual.selected {
        (SELECTION.to_string(), f.stroke_width.max(2.0))
    } else {
        (color_attr(f.stroke), f.stroke_width)
    };
    let mut frame = svg_element::Rectangle::new()
        .set("x", f.rect.x)
        .set("y", f.rect.y)
        .set("width", f.rect.w)
        .set("height", f.rect.h)
        .set("rx", CORNER_RADIUS)
        .set("fill", color_attr(f.fill))
        .set("fill-opacity", f.fill_opacity * f.fill.a)
        .set("stroke", stroke)
        .set("stroke-width", stroke_width);
    if !visual.selected && f.stroke.a < 1.0 {
        frame = frame.set("stroke-opacity", f.stroke.a);
    }
    group = group.add(frame);

    group = group.add(
        svg_element::Rectangle::new()
            .set("class", "stripe")
            .set("x", visual.stripe.x)
            .set("y", visual.stripe.y)
            .set("width", visual.stripe.w)
            .set("height", visual.stripe.h)
            .set("fill", color_attr(visual.accent)),
    );

    if let Some(content) = &visual.content {
        group = group.add(content.to_svg());
        if let Some(b) = focus.and_then(|i| content.primitive_bounds(i)) {
            group = group.add(
                svg_element::Rectangle::new()
                    .set("class", "primitive-focus")
                    .set("x", b.x - 2.0)
                    .set("y", b.y - 2.0)
                    .set("width", b.w + 4.0)
                    .set("height", b.h + 4.0)
                    .set("fill", "none")
                    .set("stroke", SELECTION)
                    .set("stroke-dasharray", "3,2"),
            );
        }
    }

    let state = visual.title_state();
    if state != TitleState::Hidden {
        let t = &visual.title;
        let mut title = svg_element::Text::new(t.text.as_str())
            .set("class", "title")
            .set("x", t.x)
            .set("y", t.y)
            .set("text-anchor", "middle")
            .set("font-family", t.font.as_str())
            .set("font-size", t.size)
            .set("font-weight", 600)
            .set("fill", "#1E293B");
        if state == TitleState::Dimmed {
            title = title.set("opacity", state.opacity());
        }
        group = group.add(title);
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneRenderer;
    use bp_core::{Document, NodeId, Overlay, layout_children};

    fn scene() -> Scene {
        let doc = Document::from_json(
            r#"{"phases":[{"id":"sv_p","name":"Plan","sections":[
                {"id":"sv_a","name":"Access","visual_hint":"form"},
                {"id":"sv_b","name":"Notes"}]}]}"#,
        )
        .unwrap();
        let parent = NodeId::intern("sv_p");
        let proposal = layout_children(&doc, parent, 1200.0, 800.0);
        SceneRenderer::default().build_scene(&doc, &Overlay::new(), parent, &proposal)
    }

    #[test]
    fn document_has_view_box_and_groups() {
        let out = render_svg(&scene(), &SvgOptions::default());
        assert!(out.starts_with("<svg"));
        assert!(out.contains("viewBox=\"0 0 1200 800\""));
        assert!(out.contains("id=\"sv_a\""));
        assert!(out.contains("class=\"node section\""));
    }

    #[test]
    fn hidden_titles_are_omitted() {
        let out = render_svg(&scene(), &SvgOptions::default());
        // sv_a has a dimmed title, sv_b's is hidden
        assert!(out.contains("Access"));
        assert!(!out.contains("Notes"));
    }

    #[test]
    fn handles_are_opt_in() {
        let mut scene = scene();
        let rect = scene.visuals[0].rect;
        scene.set_handles(Some(rect));
        let without = render_svg(&scene, &SvgOptions::default());
        assert!(!without.contains("class=\"handle\""));
        let with = render_svg(
            &scene,
            &SvgOptions {
                include_handles: true,
                ..SvgOptions::default()
            },
        );
        assert_eq!(with.matches("class=\"handle\"").count(), 8);
    }

    #[test]
    fn live_surface_stretches_the_view_box() {
        let mut scene = scene();
        scene.view_box = bp_core::Rect::new(100.0, 50.0, 600.0, 400.0);
        let out = render_svg(
            &scene,
            &SvgOptions {
                surface_size: Some((1000.0, 800.0)),
                ..SvgOptions::default()
            },
        );
        assert!(out.contains("viewBox=\"100 50 600 400\""));
        assert!(out.contains("width=\"1000\""));
        assert!(out.contains("height=\"800\""));
        assert!(out.contains("preserveAspectRatio=\"none\""));

        let export = render_svg(&scene, &SvgOptions::default());
        assert!(export.contains("width=\"600\""));
        assert!(!export.contains("preserveAspectRatio"));
    }
}
