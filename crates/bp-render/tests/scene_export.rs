//! Integration tests: fixture document → scene → SVG.

use bp_core::{Document, NodeId, Overlay, StyleOverride, layout_children};
use bp_render::{
    AtomKind, ContentKind, SceneRenderer, SvgOptions, TitleState, hit_node, render_svg,
};
use pretty_assertions::assert_eq;

fn product() -> Document {
    Document::from_json(include_str!("../../bp-core/tests/fixtures/product.json")).unwrap()
}

fn id(s: &str) -> NodeId {
    NodeId::intern(s)
}

fn scene_of(doc: &Document, overlay: &Overlay, parent: &str) -> bp_render::Scene {
    let proposal = layout_children(doc, id(parent), 1200.0, 800.0);
    SceneRenderer::default().build_scene(doc, overlay, id(parent), &proposal)
}

#[test]
fn overview_draws_one_glyph_per_phase() {
    let doc = product();
    let scene = scene_of(&doc, &Overlay::new(), bp_core::ROOT_ID);
    assert_eq!(scene.ids(), doc.phases());
    assert!(
        scene
            .visuals
            .iter()
            .all(|v| v.content_kind == ContentKind::Glyph && v.title_state() == TitleState::Hidden)
    );
}

#[test]
fn hinted_section_uses_the_library() {
    let doc = product();
    let scene = scene_of(&doc, &Overlay::new(), "p_product");
    let auth = scene.visual(id("n1_auth")).unwrap();
    assert_eq!(auth.content_kind, ContentKind::Wireframe("form".into()));
    assert_eq!(auth.title_state(), TitleState::Dimmed);

    let checkout = scene.visual(id("s_checkout")).unwrap();
    assert_eq!(checkout.content_kind, ContentKind::Preview);
}

#[test]
fn components_fall_back_to_atoms() {
    let doc = product();
    let scene = scene_of(&doc, &Overlay::new(), "f_login");
    let kind = |s: &str| scene.visual(id(s)).unwrap().content_kind.clone();
    assert_eq!(kind("c_email"), ContentKind::Atom(AtomKind::Form));
    assert_eq!(kind("c_signin"), ContentKind::Atom(AtomKind::Button));

    let browse = scene_of(&doc, &Overlay::new(), "f_browse");
    assert_eq!(
        browse.visual(id("c_results")).unwrap().content_kind,
        ContentKind::Wireframe("table".into())
    );
}

#[test]
fn style_override_reaches_the_export() {
    let doc = product();
    let mut overlay = Overlay::new();
    overlay.merge_style(
        id("s_catalog"),
        &StyleOverride {
            fill: Some("#FF0000".into()),
            ..StyleOverride::default()
        },
    );
    let scene = scene_of(&doc, &overlay, "p_product");
    let svg = render_svg(&scene, &SvgOptions::default());
    assert!(svg.contains("#FF0000"));
    assert!(svg.contains("id=\"s_catalog\""));
}

#[test]
fn hit_testing_matches_layout() {
    let doc = product();
    let scene = scene_of(&doc, &Overlay::new(), "p_product");
    let footer = scene.visual(id("s_footer")).unwrap().rect;
    let (cx, cy) = footer.center();
    assert_eq!(hit_node(&scene, cx, cy), Some(id("s_footer")));
}
