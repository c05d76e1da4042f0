//! Vector primitives and fragments.
//!
//! A [`Fragment`] is a small drawing authored in its own design coordinates
//! and mapped onto the canvas by an offset and a uniform scale. Primitives
//! stay in design coordinates so that a fragment can be re-fitted to a new
//! size without rebuilding it.

use bp_core::{Color, Rect};
use svg::node::element as svg_element;

/// Default font stack for labels inside fragments.
pub const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

/// Average glyph advance relative to the font size.
pub const GLYPH_ADVANCE: f64 = 0.6;
/// Line box height relative to the font size.
pub const LINE_HEIGHT: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    Start,
    #[default]
    Middle,
    End,
}

impl Anchor {
    fn as_svg(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        rx: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Polyline {
        points: Vec<(f64, f64)>,
    },
    /// `y` is the baseline.
    Text {
        x: f64,
        y: f64,
        content: String,
        size: f64,
        anchor: Anchor,
        bold: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub dashed: bool,
    pub opacity: f32,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            dashed: false,
            opacity: 1.0,
        }
    }
}

/// One drawable shape with its paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub paint: Paint,
    /// Semantic tag (`input`, `button`, `row`, ...) emitted as the SVG class.
    pub tag: Option<&'static str>,
}

impl Primitive {
    fn from_shape(shape: Shape) -> Self {
        Self {
            shape,
            paint: Paint::default(),
            tag: None,
        }
    }

    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::from_shape(Shape::Rect { x, y, w, h, rx: 0.0 })
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self::from_shape(Shape::Circle { cx, cy, r })
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::from_shape(Shape::Line { x1, y1, x2, y2 })
    }

    pub fn polyline(points: Vec<(f64, f64)>) -> Self {
        Self::from_shape(Shape::Polyline { points })
    }

    pub fn text(x: f64, y: f64, content: impl Into<String>, size: f64) -> Self {
        Self::from_shape(Shape::Text {
            x,
            y,
            content: content.into(),
            size,
            anchor: Anchor::Middle,
            bold: false,
        })
    }

    pub fn rounded(mut self, radius: f64) -> Self {
        if let Shape::Rect { rx, .. } = &mut self.shape {
            *rx = radius;
        }
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.paint.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        self.paint.stroke = Some(color);
        self.paint.stroke_width = width;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.paint.dashed = true;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.paint.opacity = opacity;
        self
    }

    pub fn anchor(mut self, value: Anchor) -> Self {
        if let Shape::Text { anchor, .. } = &mut self.shape {
            *anchor = value;
        }
        self
    }

    pub fn bold(mut self) -> Self {
        if let Shape::Text { bold, .. } = &mut self.shape {
            *bold = true;
        }
        self
    }

    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Axis-aligned bounds. Text uses an estimated advance per glyph.
    pub fn bounds(&self) -> Rect {
        match &self.shape {
            Shape::Rect { x, y, w, h, .. } => Rect::new(*x, *y, *w, *h),
            Shape::Circle { cx, cy, r } => Rect::new(cx - r, cy - r, 2.0 * r, 2.0 * r),
            Shape::Line { x1, y1, x2, y2 } => Rect::new(
                x1.min(*x2),
                y1.min(*y2),
                (x2 - x1).abs(),
                (y2 - y1).abs(),
            ),
            Shape::Polyline { points } => points_bounds(points),
            Shape::Text {
                x,
                y,
                content,
                size,
                anchor,
                ..
            } => {
                let (w, h) = text_size(content, *size);
                let left = match anchor {
                    Anchor::Start => *x,
                    Anchor::Middle => x - w / 2.0,
                    Anchor::End => x - w,
                };
                Rect::new(left, y - size, w, h)
            }
        }
    }

    /// Point containment with a small slop for thin shapes.
    pub fn contains(&self, px: f64, py: f64, slop: f64) -> bool {
        let b = self.bounds();
        Rect::new(b.x - slop, b.y - slop, b.w + 2.0 * slop, b.h + 2.0 * slop).contains(px, py)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        match &mut self.shape {
            Shape::Rect { x, y, .. } | Shape::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Shape::Circle { cx, cy, .. } => {
                *cx += dx;
                *cy += dy;
            }
            Shape::Line { x1, y1, x2, y2 } => {
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
            Shape::Polyline { points } => {
                for (x, y) in points {
                    *x += dx;
                    *y += dy;
                }
            }
        }
    }

    pub fn to_svg(&self) -> Box<dyn svg::Node> {
        let node: Box<dyn svg::Node> = match &self.shape {
            Shape::Rect { x, y, w, h, rx } => {
                let mut rect = svg_element::Rectangle::new()
                    .set("x", *x)
                    .set("y", *y)
                    .set("width", *w)
                    .set("height", *h);
                if *rx > 0.0 {
                    rect = rect.set("rx", *rx);
                }
                Box::new(self.paint.apply(rect))
            }
            Shape::Circle { cx, cy, r } => Box::new(
                self.paint.apply(
                    svg_element::Circle::new()
                        .set("cx", *cx)
                        .set("cy", *cy)
                        .set("r", *r),
                ),
            ),
            Shape::Line { x1, y1, x2, y2 } => Box::new(
                self.paint.apply(
                    svg_element::Line::new()
                        .set("x1", *x1)
                        .set("y1", *y1)
                        .set("x2", *x2)
                        .set("y2", *y2),
                ),
            ),
            Shape::Polyline { points } => {
                let list = points
                    .iter()
                    .map(|(x, y)| format!("{x},{y}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                Box::new(self.paint.apply(svg_element::Polyline::new().set("points", list)))
            }
            Shape::Text {
                x,
                y,
                content,
                size,
                anchor,
                bold,
            } => {
                let mut text = svg_element::Text::new(content.as_str())
                    .set("x", *x)
                    .set("y", *y)
                    .set("font-size", *size)
                    .set("font-family", FONT_FAMILY)
                    .set("text-anchor", anchor.as_svg());
                if *bold {
                    text = text.set("font-weight", 600);
                }
                Box::new(self.paint.apply(text))
            }
        };
        match self.tag {
            Some(tag) => Box::new(svg_element::Group::new().set("class", tag).add(node)),
            None => node,
        }
    }
}

impl Paint {
    fn apply<T: svg::Node>(&self, mut el: T) -> T {
        match self.fill {
            Some(c) => {
                el.assign("fill", c.to_hex());
                if c.a < 1.0 {
                    el.assign("fill-opacity", c.a);
                }
            }
            None => el.assign("fill", "none"),
        }
        if let Some(c) = self.stroke {
            el.assign("stroke", c.to_hex());
            el.assign("stroke-width", self.stroke_width);
            if c.a < 1.0 {
                el.assign("stroke-opacity", c.a);
            }
            if self.dashed {
                el.assign("stroke-dasharray", "4,3");
            }
        }
        if self.opacity < 1.0 {
            el.assign("opacity", self.opacity);
        }
        el
    }
}

/// Estimated `(width, height)` of a single line of text.
pub fn text_size(content: &str, size: f64) -> (f64, f64) {
    (
        content.chars().count() as f64 * size * GLYPH_ADVANCE,
        size * LINE_HEIGHT,
    )
}

fn points_bounds(points: &[(f64, f64)]) -> Rect {
    let Some(&(x0, y0)) = points.first() else {
        return Rect::default();
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
    for &(x, y) in points {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

// ─── Fragments ───────────────────────────────────────────────────────────

/// A group of primitives placed on the canvas at `(x, y)` with a uniform scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub primitives: Vec<Primitive>,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Fragment {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self {
            primitives,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }

    /// Scale a `design_w × design_h` drawing uniformly into `target`, centered.
    pub fn fit(mut self, design_w: f64, design_h: f64, target: Rect) -> Self {
        let scale = (target.w / design_w).min(target.h / design_h);
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        self.scale = scale;
        self.x = target.x + (target.w - design_w * scale) / 2.0;
        self.y = target.y + (target.h - design_h * scale) / 2.0;
        self
    }

    /// Move the whole fragment on the canvas.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Canvas point → design coordinates.
    pub fn to_local(&self, px: f64, py: f64) -> Option<(f64, f64)> {
        if self.scale <= 0.0 {
            return None;
        }
        Some(((px - self.x) / self.scale, (py - self.y) / self.scale))
    }

    /// Canvas-space bounds of one primitive.
    pub fn primitive_bounds(&self, index: usize) -> Option<Rect> {
        let b = self.primitives.get(index)?.bounds();
        Some(Rect::new(
            self.x + b.x * self.scale,
            self.y + b.y * self.scale,
            b.w * self.scale,
            b.h * self.scale,
        ))
    }

    /// Canvas-space bounds of the whole drawing.
    pub fn bounds(&self) -> Rect {
        let mut iter = (0..self.len()).filter_map(|i| self.primitive_bounds(i));
        let Some(first) = iter.next() else {
            return Rect::new(self.x, self.y, 0.0, 0.0);
        };
        iter.fold(first, |acc, b| {
            let x = acc.x.min(b.x);
            let y = acc.y.min(b.y);
            Rect::new(x, y, acc.right().max(b.right()) - x, acc.bottom().max(b.bottom()) - y)
        })
    }

    /// Topmost primitive under a canvas point.
    pub fn primitive_at(&self, px: f64, py: f64) -> Option<usize> {
        let (lx, ly) = self.to_local(px, py)?;
        let slop = 3.0 / self.scale;
        self.primitives
            .iter()
            .enumerate()
            .rev()
            .find(|(_, p)| p.contains(lx, ly, slop))
            .map(|(i, _)| i)
    }

    /// Move one primitive by a canvas-space delta.
    pub fn translate_primitive(&mut self, index: usize, dx: f64, dy: f64) -> bool {
        if self.scale <= 0.0 {
            return false;
        }
        let scale = self.scale;
        match self.primitives.get_mut(index) {
            Some(p) => {
                p.translate(dx / scale, dy / scale);
                true
            }
            None => false,
        }
    }

    pub fn to_svg(&self) -> svg_element::Group {
        self.primitives.iter().fold(
            svg_element::Group::new().set(
                "transform",
                format!("translate({} {}) scale({})", self.x, self.y, self.scale),
            ),
            |group, p| group.add(p.to_svg()),
        )
    }

    /// Standalone SVG markup sized to the fragment's bounds.
    pub fn to_svg_string(&self) -> String {
        let b = self.bounds();
        svg::Document::new()
            .set("viewBox", format!("{} {} {} {}", b.x, b.y, b.w, b.h))
            .set("width", b.w)
            .set("height", b.h)
            .add(self.to_svg())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INK: Color = Color::rgba(0.2, 0.25, 0.33, 1.0);

    #[test]
    fn text_bounds_follow_anchor() {
        let t = Primitive::text(100.0, 50.0, "abcd", 10.0);
        assert_eq!(t.bounds(), Rect::new(88.0, 40.0, 24.0, 13.0));
        let start = Primitive::text(100.0, 50.0, "abcd", 10.0).anchor(Anchor::Start);
        assert_eq!(start.bounds().x, 100.0);
    }

    #[test]
    fn fit_centers_and_scales_uniformly() {
        let f = Fragment::new(vec![Primitive::rect(0.0, 0.0, 280.0, 180.0)]).fit(
            280.0,
            180.0,
            Rect::new(10.0, 20.0, 560.0, 180.0),
        );
        assert_eq!(f.scale, 1.0);
        assert_eq!((f.x, f.y), (150.0, 20.0));
        assert_eq!(f.bounds(), Rect::new(150.0, 20.0, 280.0, 180.0));
    }

    #[test]
    fn degenerate_fit_never_panics() {
        let f = Fragment::new(vec![Primitive::circle(5.0, 5.0, 5.0)]).fit(
            280.0,
            180.0,
            Rect::new(0.0, 0.0, -10.0, f64::NAN),
        );
        assert_eq!(f.scale, 0.0);
        assert_eq!(f.primitive_at(1.0, 1.0), None);
    }

    #[test]
    fn primitive_at_picks_topmost() {
        let f = Fragment::new(vec![
            Primitive::rect(0.0, 0.0, 100.0, 100.0),
            Primitive::rect(40.0, 40.0, 20.0, 20.0),
        ])
        .fit(100.0, 100.0, Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(f.primitive_at(100.0, 100.0), Some(1));
        assert_eq!(f.primitive_at(20.0, 20.0), Some(0));
        assert_eq!(f.primitive_at(300.0, 300.0), None);
    }

    #[test]
    fn translate_primitive_uses_canvas_units() {
        let mut f = Fragment::new(vec![Primitive::rect(0.0, 0.0, 10.0, 10.0)]).fit(
            10.0,
            10.0,
            Rect::new(0.0, 0.0, 20.0, 20.0),
        );
        assert!(f.translate_primitive(0, 8.0, 4.0));
        assert_eq!(f.primitive_bounds(0), Some(Rect::new(8.0, 4.0, 20.0, 20.0)));
        assert!(!f.translate_primitive(3, 1.0, 1.0));
    }

    #[test]
    fn svg_markup_carries_paint_and_tags() {
        let f = Fragment::new(vec![
            Primitive::rect(0.0, 0.0, 40.0, 20.0)
                .rounded(4.0)
                .stroke(INK, 1.5)
                .tag("input"),
            Primitive::text(20.0, 14.0, "Go", 10.0).fill(INK).bold(),
        ]);
        let markup = f.to_svg_string();
        assert!(markup.contains("class=\"input\""));
        assert!(markup.contains("rx=\"4\""));
        assert!(markup.contains("Go"));
        assert!(markup.contains("font-weight=\"600\""));
    }
}
