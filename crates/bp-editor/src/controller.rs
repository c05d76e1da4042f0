//! The canvas controller: one state machine for every interaction.
//!
//! ## Modes
//!
//! | Mode        | Entered by                                  | Left by            |
//! |-------------|---------------------------------------------|--------------------|
//! | `Idle`      | default                                     |                    |
//! | `Dragging`  | pointer-down on a node                      | pointer-up         |
//! | `Resizing`  | pointer-down on a handle of the selection   | pointer-up         |
//! | `Panning`   | pointer-down with Alt or Space held         | pointer-up         |
//! | `GroupEdit` | [`CanvasController::enter_group_edit`], Enter | pointer-down outside, Escape |
//!
//! Pointer-up is the only commit point for drag and resize. Every write to
//! the overlay or document ends with a notification.

use crate::drill::{DrillFrame, DrillStack};
use crate::input::{InputEvent, Modifiers};
use crate::notify::{Inbound, Notification, NotificationSink};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::surface::{Surface, TextField};
use crate::viewport::Viewport;
use bp_core::grid::snap;
use bp_core::{
    CanvasConfig, Document, LayoutOverride, Level, NodeId, Overlay, Rect, StyleOverride,
    SubstyleOverride, layout_children,
};
use bp_render::{
    HandleKind, Scene, SceneRenderer, SvgOptions, hit_handle, hit_node, hit_primitive, hit_title,
    render_svg, resize,
};
use kurbo::{Point, Vec2};

/// Narrowest rename field, in screen pixels.
const MIN_FIELD_WIDTH: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub id: NodeId,
    /// Pointer minus the node's top-left corner, in canvas units.
    pub offset: Vec2,
    /// Screen position of the pointer-down.
    pub down: Point,
    pub moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeState {
    pub id: NodeId,
    pub handle: HandleKind,
    pub start: Rect,
    /// Canvas position of the pointer-down.
    pub origin: Point,
    pub moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionMode {
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
    /// `last` is the previous pointer position in screen pixels.
    Panning { last: Point },
    GroupEdit {
        target: NodeId,
        selected_primitive: Option<usize>,
        /// Last canvas position while a primitive is being dragged.
        drag: Option<Point>,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Rename {
    id: NodeId,
    original: String,
}

/// Owns the document, its overlay and all ephemeral canvas state.
///
/// The surface and notification sink are injected so the same controller
/// runs in the browser and in tests.
pub struct CanvasController<S: Surface, N: NotificationSink> {
    doc: Document,
    overlay: Overlay,
    config: CanvasConfig,
    surface: S,
    sink: N,
    renderer: SceneRenderer,
    viewport: Viewport,
    scene: Scene,
    /// Extent of the rendered layout; may be taller than the canvas.
    extent: Rect,
    phase: Option<NodeId>,
    drill: DrillStack,
    mode: InteractionMode,
    selection: Option<NodeId>,
    hovered: Option<NodeId>,
    rename: Option<Rename>,
    space_held: bool,
}

impl<S: Surface, N: NotificationSink> CanvasController<S, N> {
    /// Build the controller and render the phase overview.
    pub fn new(doc: Document, overlay: Overlay, config: CanvasConfig, surface: S, sink: N) -> Self {
        let viewport = Viewport::new(&config);
        let root = doc.root_id();
        let mut this = Self {
            scene: Scene::empty(root, viewport.view_box),
            extent: viewport.view_box,
            doc,
            overlay,
            config,
            surface,
            sink,
            renderer: SceneRenderer::default(),
            viewport,
            phase: None,
            drill: DrillStack::new(),
            mode: InteractionMode::Idle,
            selection: None,
            hovered: None,
            rename: None,
            space_held: false,
        };
        this.render_children(root);
        this
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn selection(&self) -> Option<NodeId> {
        self.selection
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn drill(&self) -> &DrillStack {
        &self.drill
    }

    /// Node whose children are on the canvas.
    pub fn current_parent(&self) -> NodeId {
        self.scene.parent
    }

    pub fn opened_phase(&self) -> Option<NodeId> {
        self.phase
    }

    pub fn is_renaming(&self) -> bool {
        self.rename.is_some()
    }

    // ─── Events ──────────────────────────────────────────────────────────

    /// Handle one host event. Returns `true` when it was consumed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y, modifiers } => {
                self.pointer_down(Point::new(*x, *y), *modifiers)
            }
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::DoubleClick { x, y } => self.double_click(Point::new(*x, *y)),
            InputEvent::Wheel {
                x,
                y,
                dx,
                dy,
                modifiers,
            } => self.wheel(Point::new(*x, *y), *dx, *dy, *modifiers),
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, *modifiers),
            InputEvent::KeyUp { key } => self.key_up(key),
            InputEvent::RenameCommit { value } => self.commit_rename(value),
            InputEvent::RenameCancel => self.cancel_rename(),
        }
    }

    fn to_canvas(&self, screen: Point) -> Point {
        self.viewport.to_local(screen, self.surface.client_size())
    }

    fn pointer_down(&mut self, screen: Point, modifiers: Modifiers) -> bool {
        // The host commits on blur; until then the field owns the pointer.
        if self.rename.is_some() {
            return true;
        }
        let p = self.to_canvas(screen);

        if let InteractionMode::GroupEdit { target, .. } = self.mode {
            return self.group_edit_pointer_down(target, p);
        }

        if modifiers.alt || self.space_held {
            self.mode = InteractionMode::Panning { last: screen };
            return true;
        }

        if let Some(id) = self.selection
            && let Some(handle) = hit_handle(&self.scene, p.x, p.y)
            && let Some(visual) = self.scene.visual(id)
        {
            self.mode = InteractionMode::Resizing(ResizeState {
                id,
                handle,
                start: visual.rect,
                origin: p,
                moved: false,
            });
            log::debug!("resize {id} from {handle:?}");
            return true;
        }

        let hit = hit_node(&self.scene, p.x, p.y).and_then(|id| {
            self.scene.visual(id).map(|v| (id, v.rect))
        });
        match hit {
            Some((id, rect)) => {
                self.selection = Some(id);
                self.mode = InteractionMode::Dragging(DragState {
                    id,
                    offset: Vec2::new(p.x - rect.x, p.y - rect.y),
                    down: screen,
                    moved: false,
                });
                self.present();
                self.sink.notify(Notification::NodeSelected { id });
                true
            }
            None => {
                self.mode = InteractionMode::Idle;
                if self.selection.take().is_some() {
                    self.present();
                    self.sink.notify(Notification::SelectionCleared);
                }
                false
            }
        }
    }

    fn group_edit_pointer_down(&mut self, target: NodeId, p: Point) -> bool {
        let inside = self
            .scene
            .visual(target)
            .is_some_and(|v| v.rect.contains(p.x, p.y));
        if !inside {
            // Leaving group edit consumes the event: no drag, no selection.
            self.exit_group_edit();
            return true;
        }
        let index = self
            .scene
            .visual(target)
            .and_then(|v| hit_primitive(v, p.x, p.y));
        self.mode = InteractionMode::GroupEdit {
            target,
            selected_primitive: index,
            drag: index.map(|_| p),
        };
        self.present();
        true
    }

    fn pointer_move(&mut self, screen: Point) -> bool {
        let p = self.to_canvas(screen);
        match self.mode {
            InteractionMode::Panning { last } => {
                let size = self.surface.client_size();
                self.viewport
                    .pan_by_screen(screen.x - last.x, screen.y - last.y, size);
                self.mode = InteractionMode::Panning { last: screen };
                self.present();
                true
            }
            InteractionMode::Dragging(mut drag) => {
                let (mut x, mut y) = (p.x - drag.offset.x, p.y - drag.offset.y);
                if self.config.snap_to_grid {
                    x = snap(x);
                    y = snap(y);
                }
                drag.moved |= screen != drag.down;
                self.mode = InteractionMode::Dragging(drag);
                let Some(visual) = self.scene.visual_mut(drag.id) else {
                    return false;
                };
                visual.move_to(x, y);
                log::trace!("drag {} to ({x}, {y})", drag.id);
                self.present();
                self.sink.notify(Notification::NodeMoved {
                    id: drag.id,
                    x,
                    y,
                    w: None,
                    h: None,
                });
                true
            }
            InteractionMode::Resizing(mut state) => {
                let rect = resize(
                    state.start,
                    state.handle,
                    p.x - state.origin.x,
                    p.y - state.origin.y,
                    self.config.snap_to_grid,
                );
                state.moved = true;
                self.mode = InteractionMode::Resizing(state);
                self.place_visual(state.id, rect);
                self.present();
                self.sink.notify(Notification::NodeMoved {
                    id: state.id,
                    x: rect.x,
                    y: rect.y,
                    w: Some(rect.w),
                    h: Some(rect.h),
                });
                true
            }
            InteractionMode::GroupEdit {
                target,
                selected_primitive: Some(index),
                drag: Some(last),
            } => {
                let moved = self
                    .scene
                    .visual_mut(target)
                    .and_then(|v| v.content.as_mut())
                    .is_some_and(|c| c.translate_primitive(index, p.x - last.x, p.y - last.y));
                self.mode = InteractionMode::GroupEdit {
                    target,
                    selected_primitive: Some(index),
                    drag: Some(p),
                };
                if moved {
                    self.present();
                }
                moved
            }
            InteractionMode::GroupEdit { .. } => false,
            InteractionMode::Idle => self.update_hover(p),
        }
    }

    fn pointer_up(&mut self) -> bool {
        match std::mem::replace(&mut self.mode, InteractionMode::Idle) {
            InteractionMode::Dragging(drag) => drag.moved && self.commit_layout(drag.id),
            InteractionMode::Resizing(state) => state.moved && self.commit_layout(state.id),
            InteractionMode::Panning { .. } => true,
            InteractionMode::GroupEdit {
                target,
                selected_primitive,
                ..
            } => {
                self.mode = InteractionMode::GroupEdit {
                    target,
                    selected_primitive,
                    drag: None,
                };
                true
            }
            InteractionMode::Idle => false,
        }
    }

    fn double_click(&mut self, screen: Point) -> bool {
        if self.rename.is_some() || matches!(self.mode, InteractionMode::GroupEdit { .. }) {
            return false;
        }
        let p = self.to_canvas(screen);
        match hit_node(&self.scene, p.x, p.y) {
            Some(id) => {
                let on_leaf_title = self
                    .scene
                    .visual(id)
                    .is_some_and(|v| v.level.is_leaf() && hit_title(v, p.x, p.y));
                if on_leaf_title {
                    self.begin_rename(id)
                } else {
                    self.drill_into(id)
                }
            }
            None => self.drill_out(),
        }
    }

    fn wheel(&mut self, screen: Point, dx: f64, dy: f64, modifiers: Modifiers) -> bool {
        if modifiers.command() {
            let step = self.config.wheel_zoom_step;
            let factor = if dy < 0.0 {
                step
            } else if dy > 0.0 {
                1.0 / step
            } else {
                return false;
            };
            let anchor = self.to_canvas(screen);
            if !self.viewport.zoom_at(factor, anchor) {
                return false;
            }
        } else {
            let size = self.surface.client_size();
            self.viewport.pan_by_screen(-dx, -dy, size);
        }
        self.present();
        true
    }

    fn key_down(&mut self, key: &str, modifiers: Modifiers) -> bool {
        if self.rename.is_some() {
            return key == "Escape" && self.cancel_rename();
        }
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return false;
        };
        match action {
            ShortcutAction::ZoomIn => self.zoom_in(),
            ShortcutAction::ZoomOut => self.zoom_out(),
            ShortcutAction::ZoomReset => {
                self.reset_zoom();
                true
            }
            ShortcutAction::PanHold => {
                self.space_held = true;
                true
            }
            ShortcutAction::EnterGroupEdit => match self.selection {
                Some(id) => self.enter_group_edit(id),
                None => false,
            },
            ShortcutAction::Escape => self.exit_group_edit(),
            ShortcutAction::ToggleSnap => {
                self.config.snap_to_grid = !self.config.snap_to_grid;
                log::debug!("snap to grid: {}", self.config.snap_to_grid);
                true
            }
        }
    }

    fn key_up(&mut self, key: &str) -> bool {
        if key == " " {
            self.space_held = false;
            return true;
        }
        false
    }

    fn update_hover(&mut self, p: Point) -> bool {
        let hovered = hit_node(&self.scene, p.x, p.y);
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        self.present();
        true
    }

    // ─── Navigation ──────────────────────────────────────────────────────

    /// Open a phase: reset navigation, selection and viewport, then render
    /// its sections.
    pub fn open_phase(&mut self, id: NodeId) -> bool {
        if self.doc.get(id).and_then(|n| n.level()) != Some(Level::Phase) {
            log::debug!("open_phase: {id} is not a phase");
            return false;
        }
        self.cancel_rename();
        self.drill.clear();
        self.mode = InteractionMode::Idle;
        self.selection = None;
        self.hovered = None;
        self.viewport.reset();
        self.phase = Some(id);
        self.render_children(id)
    }

    /// Repaint, e.g. after the surface changed size.
    pub fn repaint(&mut self) {
        self.present();
    }

    /// Show the children of `id`, pushing it on the drill stack.
    ///
    /// `id` must be on the canvas. Phases are opened instead of pushed.
    /// Leaves and the node already on top are no-ops.
    pub fn drill_into(&mut self, id: NodeId) -> bool {
        if self.scene.visual(id).is_none() {
            log::debug!("drill_into: {id} is not on the canvas");
            return false;
        }
        let Some(level) = self.doc.get(id).and_then(|n| n.level()) else {
            log::debug!("drill_into: unknown node {id}");
            return false;
        };
        if level == Level::Phase {
            return self.open_phase(id);
        }
        if level.is_leaf() || !self.drill.push(DrillFrame { level, id }) {
            return false;
        }
        log::debug!("drill into {id} ({level:?}), depth {}", self.drill.len());
        self.render_children(id)
    }

    /// Go back one level.
    ///
    /// With an empty stack, asks for phase selection and returns to the
    /// phase overview; the stack itself is untouched.
    pub fn drill_out(&mut self) -> bool {
        if self.drill.pop().is_none() {
            self.sink.notify(Notification::PhaseSelectionRequested);
            if self.phase.take().is_some() {
                let root = self.doc.root_id();
                self.render_children(root);
            }
            return false;
        }
        let target = self
            .drill
            .top()
            .map(|f| f.id)
            .or(self.phase)
            .unwrap_or_else(|| self.doc.root_id());
        self.render_children(target)
    }

    fn render_children(&mut self, parent: NodeId) -> bool {
        let Some(node) = self.doc.get(parent) else {
            log::debug!("render_children: unknown node {parent}");
            return false;
        };
        let level = match node.level() {
            Some(level) => level.child(),
            None => Some(Level::Phase),
        };
        self.cancel_rename();
        let proposal = layout_children(
            &self.doc,
            parent,
            self.config.canvas_width,
            self.config.canvas_height,
        );
        self.extent = proposal.view_box;
        self.scene = self
            .renderer
            .build_scene(&self.doc, &self.overlay, parent, &proposal);
        self.mode = InteractionMode::Idle;
        self.hovered = None;
        let cleared = self
            .selection
            .is_some_and(|id| self.scene.visual(id).is_none());
        if cleared {
            self.selection = None;
        }
        self.present();
        if cleared {
            self.sink.notify(Notification::SelectionCleared);
        }
        self.sink
            .notify(Notification::ChildSetRendered { level, parent });
        true
    }

    // ─── Selection & group edit ──────────────────────────────────────────

    /// Select a rendered node, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<NodeId>) -> bool {
        match id {
            Some(id) if self.scene.visual(id).is_some() => {
                self.selection = Some(id);
                self.present();
                self.sink.notify(Notification::NodeSelected { id });
                true
            }
            Some(id) => {
                log::debug!("select: {id} is not on the canvas");
                false
            }
            None => {
                if self.selection.take().is_none() {
                    return false;
                }
                self.present();
                self.sink.notify(Notification::SelectionCleared);
                true
            }
        }
    }

    /// Make the primitives of `id` individually editable; siblings fade.
    pub fn enter_group_edit(&mut self, id: NodeId) -> bool {
        if self.scene.visual(id).is_none() {
            log::debug!("enter_group_edit: {id} is not on the canvas");
            return false;
        }
        self.mode = InteractionMode::GroupEdit {
            target: id,
            selected_primitive: None,
            drag: None,
        };
        self.present();
        true
    }

    pub fn exit_group_edit(&mut self) -> bool {
        if !matches!(self.mode, InteractionMode::GroupEdit { .. }) {
            return false;
        }
        self.mode = InteractionMode::Idle;
        self.present();
        true
    }

    // ─── Rename ──────────────────────────────────────────────────────────

    /// Mount a text field over the label of `id`.
    pub fn begin_rename(&mut self, id: NodeId) -> bool {
        if self.rename.is_some() {
            return false;
        }
        let size = self.surface.client_size();
        let Some(visual) = self.scene.visual(id) else {
            log::debug!("begin_rename: {id} is not on the canvas");
            return false;
        };
        let label = visual.title.rect();
        let top_left = self.viewport.to_screen(Point::new(label.x, label.y), size);
        let bottom_right = self
            .viewport
            .to_screen(Point::new(label.right(), label.bottom()), size);
        let scale = if label.h > 0.0 {
            (bottom_right.y - top_left.y) / label.h
        } else {
            1.0
        };
        let field = TextField {
            node: id,
            value: visual.title.text.clone(),
            rect: Rect::new(
                top_left.x,
                top_left.y,
                (bottom_right.x - top_left.x).max(MIN_FIELD_WIDTH),
                bottom_right.y - top_left.y,
            ),
            font_size: visual.title.size * scale,
            font: visual.title.font.clone(),
        };
        self.rename = Some(Rename {
            id,
            original: field.value.clone(),
        });
        self.surface.mount_text_field(&field);
        self.present();
        true
    }

    /// Apply the edited name. Empty or unchanged values are dropped.
    pub fn commit_rename(&mut self, value: &str) -> bool {
        let Some(Rename { id, original }) = self.rename.take() else {
            return false;
        };
        self.surface.unmount_text_field();
        let name = value.trim();
        let changed = !name.is_empty() && name != original && self.doc.rename(id, name);
        if changed {
            self.refresh_visual(id);
        }
        self.present();
        if changed {
            log::debug!("renamed {id} to {name:?}");
            self.sink.notify(Notification::DataChanged);
        }
        changed
    }

    pub fn cancel_rename(&mut self) -> bool {
        if self.rename.take().is_none() {
            return false;
        }
        self.surface.unmount_text_field();
        self.present();
        true
    }

    // ─── Overrides ───────────────────────────────────────────────────────

    /// Merge a style patch into the overlay and redraw the node.
    pub fn restyle(&mut self, id: NodeId, patch: &StyleOverride) -> bool {
        let Some(style) = self.apply_style(id, patch) else {
            return false;
        };
        self.sink
            .notify(Notification::NodeStyleChanged { id, style });
        self.sink.notify(Notification::DataChanged);
        true
    }

    /// Set substyle tokens on `id`. Descendants inherit them, so every
    /// visual on the canvas is redrawn.
    pub fn set_substyle(&mut self, id: NodeId, value: SubstyleOverride) -> bool {
        if !self.doc.contains(id) {
            log::debug!("set_substyle: unknown node {id}");
            return false;
        }
        self.overlay.set_substyle(id, value);
        for id in self.scene.ids() {
            self.refresh_visual(id);
        }
        self.present();
        self.sink.notify(Notification::DataChanged);
        true
    }

    /// Apply a message from another part of the application.
    pub fn apply_inbound(&mut self, message: Inbound) -> bool {
        match message {
            Inbound::OpenPhase { id } => self.open_phase(id),
            Inbound::LayoutChanged { id, rect } => {
                if !self.doc.contains(id) {
                    log::debug!("layout change for unknown node {id}");
                    return false;
                }
                self.overlay.set_layout(id, rect);
                if let Some(applied) = self.overlay.layout(id) {
                    self.place_visual(id, applied.rect());
                }
                self.present();
                self.sink.notify(Notification::DataChanged);
                true
            }
            Inbound::StyleChanged { id, style } => {
                if self.apply_style(id, &style).is_none() {
                    return false;
                }
                self.sink.notify(Notification::DataChanged);
                true
            }
        }
    }

    fn apply_style(&mut self, id: NodeId, patch: &StyleOverride) -> Option<StyleOverride> {
        if !self.doc.contains(id) {
            log::debug!("style change for unknown node {id}");
            return None;
        }
        let style = self.overlay.merge_style(id, patch).clone();
        self.refresh_visual(id);
        self.present();
        Some(style)
    }

    fn commit_layout(&mut self, id: NodeId) -> bool {
        let Some(rect) = self.scene.visual(id).map(|v| v.rect) else {
            return false;
        };
        let value = LayoutOverride::normalized(rect, self.config.snap_to_grid);
        self.overlay.set_layout(id, value);
        self.place_visual(id, value.rect());
        self.present();
        log::debug!("committed layout of {id}: {value:?}");
        self.sink
            .notify(Notification::NodeLayoutChanged { id, rect: value });
        self.sink.notify(Notification::DataChanged);
        true
    }

    /// Move the visual of `id` to `rect`, re-rendering when the size changed.
    fn place_visual(&mut self, id: NodeId, rect: Rect) {
        let Some(visual) = self.scene.visual_mut(id) else {
            return;
        };
        visual.move_to(rect.x, rect.y);
        if visual.rect.w != rect.w || visual.rect.h != rect.h {
            self.renderer
                .update_node(visual, &self.doc, &self.overlay, rect.w, rect.h);
        }
    }

    fn refresh_visual(&mut self, id: NodeId) {
        if let Some(visual) = self.scene.visual_mut(id) {
            let (w, h) = (visual.rect.w, visual.rect.h);
            self.renderer
                .update_node(visual, &self.doc, &self.overlay, w, h);
        }
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.viewport.zoom_center(self.config.zoom_step);
        if changed {
            self.present();
        }
        changed
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.viewport.zoom_center(1.0 / self.config.zoom_step);
        if changed {
            self.present();
        }
        changed
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
        self.present();
    }

    /// Standalone SVG of the rendered children, covering the whole layout.
    pub fn export_svg(&self) -> String {
        let mut scene = self.scene.clone();
        scene.view_box = self.extent;
        scene.handles.clear();
        scene.primitive_focus = None;
        render_svg(&scene, &SvgOptions::default())
    }

    /// Sync visual flags with controller state and hand the scene over.
    fn present(&mut self) {
        let group_target = match self.mode {
            InteractionMode::GroupEdit { target, .. } => Some(target),
            _ => None,
        };
        let editing = self.rename.as_ref().map(|r| r.id);
        for visual in &mut self.scene.visuals {
            visual.hovered = self.hovered == Some(visual.id);
            visual.selected = self.selection == Some(visual.id);
            visual.dimmed = group_target.is_some_and(|t| t != visual.id);
            visual.editing = editing == Some(visual.id);
        }
        let handles = match group_target {
            Some(_) => None,
            None => self
                .selection
                .and_then(|id| self.scene.visual(id))
                .map(|v| v.rect),
        };
        self.scene.set_handles(handles);
        self.scene.primitive_focus = match self.mode {
            InteractionMode::GroupEdit {
                target,
                selected_primitive: Some(index),
                ..
            } => Some((target, index)),
            _ => None,
        };
        self.scene.view_box = self.viewport.view_box;
        self.surface.present(&self.scene);
    }
}
