//! WASM bridge for the blueprint canvas: exposes the controller to the
//! browser host.
//!
//! Compiled via `wasm-pack build --target web`. The host forwards DOM events,
//! pulls the current SVG after each handled event, and receives
//! notifications as JSON strings through a callback.

use bp_core::{CanvasConfig, Document, NodeId, Overlay, StyleOverride};
use bp_editor::{
    CanvasController, Inbound, InputEvent, InteractionMode, Modifiers, Notification,
    NotificationSink, Surface, TextField,
};
use bp_render::{Scene, SvgOptions, render_svg};
use kurbo::Size;
use wasm_bindgen::prelude::*;

// ─── Host surface ────────────────────────────────────────────────────────

/// Caches the SVG of the last presented scene for the host to pull.
struct HostSurface {
    size: Size,
    svg: String,
    text_field: Option<TextField>,
    dirty: bool,
}

impl Surface for HostSurface {
    fn client_size(&self) -> Size {
        self.size
    }

    fn present(&mut self, scene: &Scene) {
        self.svg = render_svg(
            scene,
            &SvgOptions {
                include_handles: true,
                surface_size: Some((self.size.width, self.size.height)),
                ..SvgOptions::default()
            },
        );
        self.dirty = true;
    }

    fn mount_text_field(&mut self, field: &TextField) {
        self.text_field = Some(field.clone());
    }

    fn unmount_text_field(&mut self) {
        self.text_field = None;
    }
}

// ─── Notification sink ───────────────────────────────────────────────────

/// Forwards notifications to a JS callback, or queues them until one is set.
#[derive(Default)]
struct JsSink {
    callback: Option<js_sys::Function>,
    queue: Vec<String>,
}

impl NotificationSink for JsSink {
    fn notify(&mut self, notification: Notification) {
        let json = match serde_json::to_string(&notification) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("dropping notification {notification:?}: {e}");
                return;
            }
        };
        match &self.callback {
            Some(callback) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("notification callback failed: {e:?}");
                }
            }
            None => self.queue.push(json),
        }
    }
}

// ─── Canvas ──────────────────────────────────────────────────────────────

/// The canvas controller as seen from JavaScript.
#[wasm_bindgen]
pub struct BlueprintCanvas {
    controller: CanvasController<HostSurface, JsSink>,
}

#[wasm_bindgen]
impl BlueprintCanvas {
    /// Build a canvas from the document JSON. `overlay_json` and
    /// `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        document_json: &str,
        overlay_json: &str,
        config_json: &str,
        width: f64,
        height: f64,
    ) -> Result<BlueprintCanvas, JsValue> {
        console_error_panic_hook_setup();

        let doc = Document::from_json(document_json).map_err(to_js)?;
        let overlay = if overlay_json.trim().is_empty() {
            Overlay::new()
        } else {
            Overlay::from_json(overlay_json).map_err(to_js)?
        };
        let config = if config_json.trim().is_empty() {
            CanvasConfig::default()
        } else {
            CanvasConfig::from_json(config_json).map_err(to_js)?
        };
        let surface = HostSurface {
            size: Size::new(width, height),
            svg: String::new(),
            text_field: None,
            dirty: false,
        };
        Ok(Self {
            controller: CanvasController::new(doc, overlay, config, surface, JsSink::default()),
        })
    }

    /// Deliver notifications to `callback(json)` from now on. Queued ones
    /// are flushed immediately.
    pub fn set_notification_callback(&mut self, callback: js_sys::Function) {
        let sink = self.controller.sink_mut();
        for json in sink.queue.drain(..) {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::warn!("notification callback failed: {e:?}");
            }
        }
        sink.callback = Some(callback);
    }

    /// Queued notifications as a JSON array, emptying the queue.
    pub fn take_notifications(&mut self) -> String {
        let queue = std::mem::take(&mut self.controller.sink_mut().queue);
        format!("[{}]", queue.join(","))
    }

    /// The host element changed size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.controller.surface_mut().size = Size::new(width, height);
        self.controller.repaint();
    }

    // ─── Input ───────────────────────────────────────────────────────────

    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.controller
            .handle(&InputEvent::PointerDown { x, y, modifiers })
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.controller.handle(&InputEvent::pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.controller.handle(&InputEvent::pointer_up(x, y))
    }

    pub fn handle_double_click(&mut self, x: f64, y: f64) -> bool {
        self.controller.handle(&InputEvent::DoubleClick { x, y })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn handle_wheel(
        &mut self,
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        ctrl: bool,
        meta: bool,
    ) -> bool {
        let modifiers = Modifiers {
            ctrl,
            meta,
            ..Modifiers::NONE
        };
        self.controller.handle(&InputEvent::Wheel {
            x,
            y,
            dx,
            dy,
            modifiers,
        })
    }

    pub fn handle_key_down(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.controller.handle(&InputEvent::KeyDown {
            key: key.to_string(),
            modifiers,
        })
    }

    pub fn handle_key_up(&mut self, key: &str) -> bool {
        self.controller.handle(&InputEvent::KeyUp {
            key: key.to_string(),
        })
    }

    /// Enter or blur in the rename field.
    pub fn rename_commit(&mut self, value: &str) -> bool {
        self.controller.handle(&InputEvent::RenameCommit {
            value: value.to_string(),
        })
    }

    pub fn rename_cancel(&mut self) -> bool {
        self.controller.handle(&InputEvent::RenameCancel)
    }

    /// The rename field to show, as JSON, or an empty string when none.
    pub fn get_text_field(&self) -> String {
        let Some(field) = &self.controller.surface().text_field else {
            return String::new();
        };
        serde_json::json!({
            "id": field.node.as_str(),
            "value": field.value,
            "x": field.rect.x,
            "y": field.rect.y,
            "width": field.rect.w,
            "height": field.rect.h,
            "fontSize": field.font_size,
            "font": field.font,
        })
        .to_string()
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Apply an inbound message, e.g. `{"type":"openPhase","id":"p1"}`.
    pub fn apply_inbound(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Inbound>(json) {
            Ok(message) => self.controller.apply_inbound(message),
            Err(e) => {
                log::warn!("ignoring inbound message: {e}");
                false
            }
        }
    }

    pub fn open_phase(&mut self, id: &str) -> bool {
        match NodeId::lookup(id) {
            Some(id) => self.controller.open_phase(id),
            None => false,
        }
    }

    pub fn drill_into(&mut self, id: &str) -> bool {
        match NodeId::lookup(id) {
            Some(id) => self.controller.drill_into(id),
            None => false,
        }
    }

    pub fn drill_out(&mut self) -> bool {
        self.controller.drill_out()
    }

    /// Select by id; an empty string clears the selection.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        if id.is_empty() {
            return self.controller.select(None);
        }
        match NodeId::lookup(id) {
            Some(id) => self.controller.select(Some(id)),
            None => false,
        }
    }

    pub fn enter_group_edit(&mut self, id: &str) -> bool {
        match NodeId::lookup(id) {
            Some(id) => self.controller.enter_group_edit(id),
            None => false,
        }
    }

    pub fn exit_group_edit(&mut self) -> bool {
        self.controller.exit_group_edit()
    }

    /// Merge a style patch such as `{"fill":"#FFFFFF","strokeWidth":2}`.
    pub fn restyle(&mut self, id: &str, style_json: &str) -> bool {
        let Some(id) = NodeId::lookup(id) else {
            return false;
        };
        match serde_json::from_str::<StyleOverride>(style_json) {
            Ok(patch) => self.controller.restyle(id, &patch),
            Err(e) => {
                log::warn!("ignoring style patch for {id}: {e}");
                false
            }
        }
    }

    pub fn zoom_in(&mut self) -> bool {
        self.controller.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.controller.zoom_out()
    }

    pub fn reset_zoom(&mut self) {
        self.controller.reset_zoom();
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// SVG of the current view, including selection handles.
    pub fn render_svg(&mut self) -> String {
        let surface = self.controller.surface_mut();
        surface.dirty = false;
        surface.svg.clone()
    }

    /// Whether the view changed since the last `render_svg`.
    pub fn needs_render(&self) -> bool {
        self.controller.surface().dirty
    }

    /// Standalone SVG of the whole rendered level, without handles.
    pub fn export_svg(&self) -> String {
        self.controller.export_svg()
    }

    pub fn get_overlay_json(&self) -> String {
        self.controller.overlay().to_json().unwrap_or_else(|e| {
            log::warn!("overlay serialization failed: {e}");
            String::new()
        })
    }

    pub fn get_document_json(&self) -> String {
        self.controller.document().to_json().unwrap_or_else(|e| {
            log::warn!("document serialization failed: {e}");
            String::new()
        })
    }

    pub fn get_selected_id(&self) -> String {
        self.controller
            .selection()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn get_current_parent(&self) -> String {
        self.controller.current_parent().as_str().to_string()
    }

    pub fn get_mode(&self) -> String {
        mode_name(self.controller.mode()).to_string()
    }
}

fn mode_name(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Idle => "idle",
        InteractionMode::Dragging(_) => "dragging",
        InteractionMode::Resizing(_) => "resizing",
        InteractionMode::Panning { .. } => "panning",
        InteractionMode::GroupEdit { .. } => "groupEdit",
    }
}

fn to_js(e: bp_core::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ─── Logging & panics ────────────────────────────────────────────────────

/// Route `log` records to the browser console at `level` and above.
/// Unknown levels fall back to `info`.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> bool {
    install_logger(parse_level(level))
}

fn parse_level(level: &str) -> log::Level {
    level.trim().parse().unwrap_or(log::Level::Info)
}

#[cfg(target_arch = "wasm32")]
fn install_logger(level: log::Level) -> bool {
    console_log::init_with_level(level).is_ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn install_logger(level: log::Level) -> bool {
    log::set_max_level(level.to_level_filter());
    false
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("blueprint wasm panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
