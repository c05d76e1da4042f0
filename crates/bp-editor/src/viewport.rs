//! The visible window onto the canvas.
//!
//! Zoom is represented purely as the scale of the view box against the
//! default canvas size: a 600-wide view box on a 1200-wide canvas is 2×.
//! Screen ↔ canvas conversion always takes the live surface size, since the
//! host element can be resized at any time.

use bp_core::{CanvasConfig, Rect};
use kurbo::{Affine, Point, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub view_box: Rect,
    canvas: Size,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            view_box: Rect::new(0.0, 0.0, config.canvas_width, config.canvas_height),
            canvas: Size::new(config.canvas_width, config.canvas_height),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }

    /// Current zoom factor; 1.0 for the default view box.
    pub fn zoom(&self) -> f64 {
        if self.view_box.w > 0.0 {
            self.canvas.width / self.view_box.w
        } else {
            1.0
        }
    }

    /// Canvas → screen for a surface of `surface` pixels.
    ///
    /// The view box is stretched to fill the surface on both axes, so the
    /// scale is non-uniform when aspect ratios differ.
    pub fn transform(&self, surface: Size) -> Affine {
        let vb = self.view_box;
        if vb.w <= 0.0 || vb.h <= 0.0 || surface.width <= 0.0 || surface.height <= 0.0 {
            return Affine::IDENTITY;
        }
        Affine::scale_non_uniform(surface.width / vb.w, surface.height / vb.h)
            * Affine::translate((-vb.x, -vb.y))
    }

    /// Screen point → canvas point.
    pub fn to_local(&self, point: Point, surface: Size) -> Point {
        self.transform(surface).inverse() * point
    }

    /// Canvas point → screen point.
    pub fn to_screen(&self, point: Point, surface: Size) -> Point {
        self.transform(surface) * point
    }

    /// Canvas units per screen pixel on each axis.
    pub fn units_per_pixel(&self, surface: Size) -> (f64, f64) {
        if surface.width <= 0.0 || surface.height <= 0.0 {
            return (1.0, 1.0);
        }
        (
            self.view_box.w / surface.width,
            self.view_box.h / surface.height,
        )
    }

    /// Follow a pointer drag of `(dx, dy)` screen pixels.
    pub fn pan_by_screen(&mut self, dx: f64, dy: f64, surface: Size) {
        let (ux, uy) = self.units_per_pixel(surface);
        self.view_box.x -= dx * ux;
        self.view_box.y -= dy * uy;
    }

    /// Zoom by `factor` keeping `anchor` (canvas space) fixed on screen.
    ///
    /// Returns `false` when the zoom is already at the limit.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let current = self.zoom();
        let target = (current * factor).max(self.min_zoom).min(self.max_zoom);
        let effective = target / current;
        if (effective - 1.0).abs() < f64::EPSILON {
            return false;
        }
        let vb = self.view_box;
        self.view_box = Rect::new(
            anchor.x - (anchor.x - vb.x) / effective,
            anchor.y - (anchor.y - vb.y) / effective,
            vb.w / effective,
            vb.h / effective,
        );
        log::trace!("zoom {current:.3} -> {target:.3}");
        true
    }

    /// Zoom around the middle of the view box.
    pub fn zoom_center(&mut self, factor: f64) -> bool {
        let (cx, cy) = self.view_box.center();
        self.zoom_at(factor, Point::new(cx, cy))
    }

    /// Back to `(0, 0, canvas_width, canvas_height)`.
    pub fn reset(&mut self) {
        self.view_box = Rect::new(0.0, 0.0, self.canvas.width, self.canvas.height);
    }
}
