//! The drawing surface the controller paints onto.
//!
//! The browser host implements this over its canvas element; tests use
//! [`RecordingSurface`].

use bp_core::{NodeId, Rect};
use bp_render::Scene;
use kurbo::Size;

/// Text input placed over a node label for in-place renaming.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub node: NodeId,
    pub value: String,
    /// Screen-space placement.
    pub rect: Rect,
    /// Screen-space font size.
    pub font_size: f64,
    pub font: String,
}

pub trait Surface {
    /// Current size of the surface in screen pixels. Read on every event.
    fn client_size(&self) -> Size;

    /// Paint `scene`. Called after every visible state change.
    fn present(&mut self, scene: &Scene);

    fn mount_text_field(&mut self, field: &TextField);

    fn unmount_text_field(&mut self);
}

/// Keeps the last presented scene and the mounted text field.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub size: Size,
    pub last: Option<Scene>,
    pub presents: usize,
    pub text_field: Option<TextField>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            last: None,
            presents: 0,
            text_field: None,
        }
    }
}

impl Surface for RecordingSurface {
    fn client_size(&self) -> Size {
        self.size
    }

    fn present(&mut self, scene: &Scene) {
        self.last = Some(scene.clone());
        self.presents += 1;
    }

    fn mount_text_field(&mut self, field: &TextField) {
        self.text_field = Some(field.clone());
    }

    fn unmount_text_field(&mut self) {
        self.text_field = None;
    }
}
