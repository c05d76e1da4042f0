//! Integration tests: controller driven by host events (bp-editor).
//!
//! The recording surface is 1200×800, the size of the default canvas, so
//! screen and canvas coordinates coincide until the view is panned or
//! zoomed.

use bp_core::{
    CanvasConfig, Document, Grain, LayoutOverride, Level, NodeId, Overlay, StyleOverride,
    SubstyleOverride,
};
use bp_editor::{
    CanvasController, Inbound, InputEvent, InteractionMode, Modifiers, Notification,
    RecordingSurface,
};
use kurbo::Size;
use pretty_assertions::assert_eq;

type Controller = CanvasController<RecordingSurface, Vec<Notification>>;

fn product() -> Document {
    Document::from_json(include_str!("../../bp-core/tests/fixtures/product.json")).unwrap()
}

fn id(s: &str) -> NodeId {
    NodeId::intern(s)
}

fn controller() -> Controller {
    CanvasController::new(
        product(),
        Overlay::new(),
        CanvasConfig::default(),
        RecordingSurface::new(1200.0, 800.0),
        Vec::new(),
    )
}

/// Controller showing the sections of `p_product`, with an empty sink.
fn on_product() -> Controller {
    let mut c = controller();
    assert!(c.apply_inbound(Inbound::OpenPhase { id: id("p_product") }));
    c.sink_mut().clear();
    c
}

fn down(c: &mut Controller, x: f64, y: f64) -> bool {
    c.handle(&InputEvent::pointer_down(x, y))
}

fn drag(c: &mut Controller, from: (f64, f64), to: (f64, f64)) {
    down(c, from.0, from.1);
    c.handle(&InputEvent::pointer_move(to.0, to.1));
    c.handle(&InputEvent::pointer_up(to.0, to.1));
}

fn double_click(c: &mut Controller, x: f64, y: f64) -> bool {
    c.handle(&InputEvent::DoubleClick { x, y })
}

fn center_of(c: &Controller, node: &str) -> (f64, f64) {
    c.scene().visual(id(node)).unwrap().rect.center()
}

// ─── Navigation ─────────────────────────────────────────────────────────

#[test]
fn starts_on_the_phase_overview() {
    let c = controller();
    let root = c.document().root_id();
    assert_eq!(c.current_parent(), root);
    assert_eq!(c.scene().ids(), c.document().phases());
    assert_eq!(
        c.sink().last(),
        Some(&Notification::ChildSetRendered {
            level: Some(Level::Phase),
            parent: root,
        })
    );
    assert!(c.surface().presents >= 1);
}

#[test]
fn drill_down_and_back_up() {
    let mut c = controller();

    let (x, y) = center_of(&c, "p_product");
    assert!(double_click(&mut c, x, y));
    assert_eq!(c.opened_phase(), Some(id("p_product")));
    assert_eq!(c.current_parent(), id("p_product"));
    assert!(c.drill().is_empty());

    let (x, y) = center_of(&c, "s_catalog");
    assert!(double_click(&mut c, x, y));
    let (x, y) = center_of(&c, "f_browse");
    assert!(double_click(&mut c, x, y));
    assert_eq!(c.current_parent(), id("f_browse"));
    assert_eq!(c.drill().len(), 2);

    // Leaves have no children to show.
    let price = c.scene().visual(id("c_price")).unwrap().rect;
    assert!(!double_click(&mut c, price.x + 4.0, price.bottom() - 4.0));
    assert_eq!(c.current_parent(), id("f_browse"));

    assert!(double_click(&mut c, 1100.0, 700.0));
    assert_eq!(c.current_parent(), id("s_catalog"));
    assert!(double_click(&mut c, 1100.0, 700.0));
    assert_eq!(c.current_parent(), id("p_product"));
    assert!(c.drill().is_empty());

    c.sink_mut().clear();
    assert!(!double_click(&mut c, 1100.0, 700.0));
    assert!(c.drill().is_empty());
    assert_eq!(c.sink()[0], Notification::PhaseSelectionRequested);
    assert_eq!(c.current_parent(), c.document().root_id());
}

#[test]
fn drilling_into_the_top_frame_is_a_no_op() {
    let mut c = on_product();
    assert!(c.drill_into(id("s_catalog")));
    assert!(!c.drill_into(id("s_catalog")));
    assert_eq!(c.drill().len(), 1);
}

#[test]
fn drilling_requires_a_node_on_the_canvas() {
    let mut c = on_product();
    // A section of another phase, and a feature one level too deep.
    assert!(!c.drill_into(id("s_delivery")));
    assert!(!c.drill_into(id("f_login")));
    assert_eq!(c.opened_phase(), Some(id("p_product")));
    assert_eq!(c.current_parent(), id("p_product"));
    assert!(c.drill().is_empty());
    assert!(c.sink().is_empty());
}

// ─── Selection, drag, resize ────────────────────────────────────────────

#[test]
fn pointer_down_selects_and_shows_handles() {
    let mut c = on_product();
    let (x, y) = center_of(&c, "n1_auth");
    assert!(down(&mut c, x, y));
    c.handle(&InputEvent::pointer_up(x, y));
    assert_eq!(c.selection(), Some(id("n1_auth")));
    assert_eq!(c.surface().last.as_ref().unwrap().handles.len(), 8);
    assert_eq!(c.sink()[0], Notification::NodeSelected { id: id("n1_auth") });

    assert!(!down(&mut c, 700.0, 600.0));
    assert_eq!(c.selection(), None);
    assert!(c.surface().last.as_ref().unwrap().handles.is_empty());
    assert_eq!(c.sink().last(), Some(&Notification::SelectionCleared));
}

#[test]
fn drag_commits_a_snapped_override() {
    let mut c = on_product();
    // n1_auth sits at (32, 112); grab it 100/80 from the corner.
    drag(&mut c, (132.0, 192.0), (145.0, 203.0));

    let committed = c.overlay().layout(id("n1_auth")).unwrap();
    assert_eq!(
        committed,
        LayoutOverride {
            x: 48.0,
            y: 120.0,
            w: 200.0,
            h: 160.0
        }
    );
    for v in [committed.x, committed.y, committed.w, committed.h] {
        assert_eq!(v % 8.0, 0.0);
    }
    assert!(c.sink().contains(&Notification::NodeMoved {
        id: id("n1_auth"),
        x: 48.0,
        y: 120.0,
        w: None,
        h: None,
    }));
    assert!(c.sink().contains(&Notification::NodeLayoutChanged {
        id: id("n1_auth"),
        rect: committed,
    }));
    assert_eq!(c.sink().last(), Some(&Notification::DataChanged));
    assert_eq!(c.mode(), InteractionMode::Idle);
}

#[test]
fn click_without_movement_commits_nothing() {
    let mut c = on_product();
    drag(&mut c, (132.0, 192.0), (132.0, 192.0));
    assert_eq!(c.overlay().layout(id("n1_auth")), None);
    assert!(!c.sink().contains(&Notification::DataChanged));
}

#[test]
fn bottom_right_resize_snaps_all_four() {
    let mut c = on_product();
    c.apply_inbound(Inbound::LayoutChanged {
        id: id("s_catalog"),
        rect: LayoutOverride {
            x: 100.0,
            y: 100.0,
            w: 200.0,
            h: 100.0,
        },
    });
    down(&mut c, 250.0, 150.0);
    c.handle(&InputEvent::pointer_up(250.0, 150.0));
    assert_eq!(c.selection(), Some(id("s_catalog")));
    c.sink_mut().clear();

    assert!(down(&mut c, 300.0, 200.0));
    assert!(matches!(c.mode(), InteractionMode::Resizing(_)));
    c.handle(&InputEvent::pointer_move(320.0, 220.0));
    assert_eq!(
        c.sink()[0],
        Notification::NodeMoved {
            id: id("s_catalog"),
            x: 104.0,
            y: 104.0,
            w: Some(224.0),
            h: Some(120.0),
        }
    );
    c.handle(&InputEvent::pointer_up(320.0, 220.0));

    let committed = c.overlay().layout(id("s_catalog")).unwrap();
    assert_eq!((committed.w, committed.h), (224.0, 120.0));
    assert_eq!(c.scene().visual(id("s_catalog")).unwrap().rect, committed.rect());
}

#[test]
fn resize_never_goes_below_minimum() {
    let mut c = on_product();
    let (x, y) = center_of(&c, "s_checkout");
    down(&mut c, x, y);
    c.handle(&InputEvent::pointer_up(x, y));
    let rect = c.scene().visual(id("s_checkout")).unwrap().rect;

    drag(&mut c, (rect.right(), rect.bottom()), (rect.x - 300.0, rect.y - 300.0));
    let committed = c.overlay().layout(id("s_checkout")).unwrap();
    assert!(committed.w >= 40.0 && committed.h >= 20.0);
    assert_eq!((committed.x, committed.y), (rect.x, rect.y));
}

// ─── Group edit ─────────────────────────────────────────────────────────

#[test]
fn pointer_down_outside_group_edit_is_consumed() {
    let mut c = on_product();
    assert!(c.enter_group_edit(id("n1_auth")));
    let shown = c.surface().last.as_ref().unwrap();
    assert!(shown.visual(id("s_catalog")).unwrap().dimmed);
    assert!(!shown.visual(id("n1_auth")).unwrap().dimmed);

    let before = c.scene().visual(id("s_catalog")).unwrap().rect;
    let (x, y) = center_of(&c, "s_catalog");
    assert!(down(&mut c, x, y));
    assert_eq!(c.mode(), InteractionMode::Idle);
    assert_eq!(c.selection(), None);

    c.handle(&InputEvent::pointer_move(x + 40.0, y + 40.0));
    c.handle(&InputEvent::pointer_up(x + 40.0, y + 40.0));
    assert_eq!(c.scene().visual(id("s_catalog")).unwrap().rect, before);
    assert_eq!(c.overlay().layout(id("s_catalog")), None);
    assert!(c.sink().is_empty());
}

#[test]
fn primitives_move_inside_group_edit() {
    let mut c = on_product();
    assert!(c.enter_group_edit(id("n1_auth")));

    let content = c.scene().visual(id("n1_auth")).unwrap().content.clone().unwrap();
    let input = content
        .primitives
        .iter()
        .position(|p| p.tag == Some("input"))
        .unwrap();
    let before = content.primitive_bounds(input).unwrap();
    let (x, y) = before.center();

    drag(&mut c, (x, y), (x + 10.0, y));
    assert_eq!(c.scene().primitive_focus, Some((id("n1_auth"), input)));
    let after = c
        .scene()
        .visual(id("n1_auth"))
        .unwrap()
        .content
        .as_ref()
        .unwrap()
        .primitive_bounds(input)
        .unwrap();
    assert!((after.x - before.x - 10.0).abs() < 1e-9);
    assert_eq!(after.y, before.y);
    // Primitive edits stay in the scene.
    assert!(c.sink().is_empty());

    assert!(c.handle(&InputEvent::key("Escape")));
    assert_eq!(c.mode(), InteractionMode::Idle);
}

#[test]
fn enter_key_starts_group_edit_on_selection() {
    let mut c = on_product();
    let (x, y) = center_of(&c, "n1_auth");
    down(&mut c, x, y);
    c.handle(&InputEvent::pointer_up(x, y));
    assert!(c.handle(&InputEvent::key("Enter")));
    assert!(matches!(
        c.mode(),
        InteractionMode::GroupEdit { target, .. } if target == id("n1_auth")
    ));
    // Handles are hidden while editing a group.
    assert!(c.surface().last.as_ref().unwrap().handles.is_empty());
}

// ─── Rename ─────────────────────────────────────────────────────────────

fn on_login() -> Controller {
    let mut c = on_product();
    assert!(c.drill_into(id("n1_auth")));
    assert!(c.drill_into(id("f_login")));
    c.sink_mut().clear();
    c
}

fn double_click_title(c: &mut Controller, node: &str) -> bool {
    let (x, y) = c.scene().visual(id(node)).unwrap().title.rect().center();
    double_click(c, x, y)
}

#[test]
fn rename_commits_trimmed_name() {
    let mut c = on_login();
    assert!(double_click_title(&mut c, "c_email"));
    assert!(c.is_renaming());
    let field = c.surface().text_field.clone().unwrap();
    assert_eq!(field.value, "Email");
    assert_eq!(field.node, id("c_email"));
    assert!(c.scene().visual(id("c_email")).unwrap().editing);

    assert!(c.handle(&InputEvent::RenameCommit {
        value: "  Work email ".into()
    }));
    assert_eq!(c.document().get(id("c_email")).unwrap().name, "Work email");
    assert_eq!(c.scene().visual(id("c_email")).unwrap().title.text, "Work email");
    assert!(c.surface().text_field.is_none());
    assert_eq!(c.sink().as_slice(), &[Notification::DataChanged]);
}

#[test]
fn unchanged_empty_or_cancelled_renames_are_dropped() {
    let mut c = on_login();

    double_click_title(&mut c, "c_email");
    assert!(!c.handle(&InputEvent::RenameCommit {
        value: "Email".into()
    }));

    double_click_title(&mut c, "c_email");
    assert!(!c.handle(&InputEvent::RenameCommit { value: "   ".into() }));

    double_click_title(&mut c, "c_email");
    assert!(c.handle(&InputEvent::key("Escape")));
    assert!(!c.is_renaming());

    assert_eq!(c.document().get(id("c_email")).unwrap().name, "Email");
    assert!(c.sink().is_empty());
}

#[test]
fn pointer_down_while_renaming_starts_no_drag() {
    let mut c = on_login();
    double_click_title(&mut c, "c_email");
    let (x, y) = center_of(&c, "c_email");
    assert!(down(&mut c, x, y));
    assert_eq!(c.mode(), InteractionMode::Idle);
    assert_eq!(c.selection(), None);
    assert!(c.is_renaming());
    assert!(c.sink().is_empty());
}

// ─── View ───────────────────────────────────────────────────────────────

#[test]
fn zoom_keys_and_reset() {
    let mut c = on_product();
    assert!(c.handle(&InputEvent::key("+")));
    assert!((c.viewport().zoom() - 1.2).abs() < 1e-9);
    assert!(c.handle(&InputEvent::key("-")));
    assert!((c.viewport().zoom() - 1.0).abs() < 1e-9);
    c.handle(&InputEvent::key("+"));
    c.handle(&InputEvent::key("0"));
    assert_eq!(c.viewport().view_box, bp_core::Rect::new(0.0, 0.0, 1200.0, 800.0));
}

#[test]
fn alt_drag_pans_without_selecting() {
    let mut c = on_product();
    let (x, y) = center_of(&c, "n1_auth");
    c.handle(&InputEvent::PointerDown {
        x,
        y,
        modifiers: Modifiers {
            alt: true,
            ..Modifiers::NONE
        },
    });
    assert!(matches!(c.mode(), InteractionMode::Panning { .. }));
    c.handle(&InputEvent::pointer_move(x + 50.0, y + 20.0));
    c.handle(&InputEvent::pointer_up(x + 50.0, y + 20.0));

    let vb = c.viewport().view_box;
    assert_eq!((vb.x, vb.y), (-50.0, -20.0));
    assert_eq!(c.selection(), None);
    assert_eq!(c.overlay().layout(id("n1_auth")), None);
    assert_eq!(c.surface().last.as_ref().unwrap().view_box, vb);
}

#[test]
fn space_held_pans_too() {
    let mut c = on_product();
    c.handle(&InputEvent::key(" "));
    let (x, y) = center_of(&c, "n1_auth");
    down(&mut c, x, y);
    assert!(matches!(c.mode(), InteractionMode::Panning { .. }));
    c.handle(&InputEvent::pointer_up(x, y));
    c.handle(&InputEvent::KeyUp { key: " ".into() });
    down(&mut c, x, y);
    assert!(matches!(c.mode(), InteractionMode::Dragging(_)));
}

#[test]
fn ctrl_wheel_zooms_around_pointer() {
    let mut c = on_product();
    c.handle(&InputEvent::Wheel {
        x: 600.0,
        y: 400.0,
        dx: 0.0,
        dy: -1.0,
        modifiers: Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        },
    });
    assert!((c.viewport().zoom() - 1.1).abs() < 1e-9);
    let (cx, cy) = c.viewport().view_box.center();
    assert!((cx - 600.0).abs() < 1e-9 && (cy - 400.0).abs() < 1e-9);
}

#[test]
fn hit_testing_uses_the_live_surface_size() {
    let mut c = on_product();
    c.surface_mut().size = Size::new(600.0, 400.0);
    // Half-size surface: screen (66, 96) is canvas (132, 192).
    down(&mut c, 66.0, 96.0);
    assert_eq!(c.selection(), Some(id("n1_auth")));
}

#[test]
fn hover_reveals_title() {
    let mut c = on_product();
    let (x, y) = center_of(&c, "s_catalog");
    assert!(c.handle(&InputEvent::pointer_move(x, y)));
    assert_eq!(c.hovered(), Some(id("s_catalog")));
    let shown = c.surface().last.as_ref().unwrap();
    assert_eq!(
        shown.visual(id("s_catalog")).unwrap().title_state(),
        bp_render::TitleState::Visible
    );
}

// ─── Overrides ──────────────────────────────────────────────────────────

#[test]
fn restyle_notifies_and_redraws() {
    let mut c = on_product();
    let patch = StyleOverride {
        fill: Some("#FF0000".into()),
        ..StyleOverride::default()
    };
    assert!(c.restyle(id("s_catalog"), &patch));
    assert_eq!(
        c.sink().as_slice(),
        &[
            Notification::NodeStyleChanged {
                id: id("s_catalog"),
                style: patch.clone(),
            },
            Notification::DataChanged,
        ]
    );
    let frame = &c.scene().visual(id("s_catalog")).unwrap().frame;
    assert_eq!(frame.fill.to_hex(), "#FF0000");
    assert!(c.export_svg().contains("#FF0000"));

    assert!(!c.restyle(id("no_such_node"), &patch));
}

#[test]
fn inbound_style_only_reports_data_changed() {
    let mut c = on_product();
    assert!(c.apply_inbound(Inbound::StyleChanged {
        id: id("n1_auth"),
        style: StyleOverride {
            stroke_width: Some(3.0),
            ..StyleOverride::default()
        },
    }));
    assert_eq!(c.sink().as_slice(), &[Notification::DataChanged]);
    assert_eq!(c.scene().visual(id("n1_auth")).unwrap().frame.stroke_width, 3.0);
}

#[test]
fn substyle_is_inherited_by_rendered_children() {
    let mut c = on_product();
    assert!(c.set_substyle(
        id("p_product"),
        SubstyleOverride {
            grain: Some(Grain::Coarse),
            ..SubstyleOverride::default()
        },
    ));
    assert!(
        c.scene()
            .visuals
            .iter()
            .all(|v| v.frame.stroke_width == Grain::Coarse.stroke_width())
    );
    assert_eq!(c.sink().last(), Some(&Notification::DataChanged));
}

#[test]
fn overrides_survive_navigation() {
    let mut c = on_product();
    drag(&mut c, (132.0, 192.0), (145.0, 203.0));
    c.drill_into(id("s_catalog"));
    c.drill_out();
    let rect = c.scene().visual(id("n1_auth")).unwrap().rect;
    assert_eq!((rect.x, rect.y), (48.0, 120.0));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn committed_layout_is_on_grid(dx in -300.0f64..300.0, dy in -100.0f64..300.0) {
            prop_assume!(dx.abs() > 0.5 || dy.abs() > 0.5);
            let mut c = on_product();
            drag(&mut c, (132.0, 192.0), (132.0 + dx, 192.0 + dy));
            let committed = c.overlay().layout(id("n1_auth")).unwrap();
            prop_assert!(committed.w >= 40.0 && committed.h >= 20.0);
            for v in [committed.x, committed.y, committed.w, committed.h] {
                prop_assert_eq!(v % 8.0, 0.0);
            }
        }
    }
}
