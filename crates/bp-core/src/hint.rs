//! Visual hint resolution.
//!
//! A node's hint picks the wireframe fragment it is drawn with. An explicit
//! `visual_hint` wins after alias normalization; otherwise the hint is
//! inferred from the node's id and name.

use crate::keywords::{Rule, first_match_where, search_text};
use crate::model::DesignNode;

/// Shorthand spellings accepted in `visual_hint`.
const ALIASES: &[(&str, &str)] = &[
    ("nav", "breadcrumb"),
    ("navigation", "breadcrumb"),
    ("btn", "button"),
    ("cta", "button"),
    ("grid", "table"),
    ("datatable", "table"),
    ("wizard", "stepper"),
    ("steps", "stepper"),
    ("dialog", "modal"),
    ("popup", "modal"),
    ("graph", "chart"),
    ("kpi", "dashboard"),
    ("code", "editor"),
    ("ide", "editor"),
    ("messages", "chat"),
    ("feed", "list"),
    ("file", "upload"),
    ("dropzone", "upload"),
    ("avatar", "profile"),
    ("config", "settings"),
    ("preferences", "settings"),
    ("menu", "sidebar"),
    ("topbar", "header"),
    ("images", "gallery"),
    ("schedule", "calendar"),
];

/// Canonical hints in priority order, with the keywords that imply them.
const INFERENCE: &[Rule<&str>] = &[
    ("stepper", &["step", "wizard", "onboard", "progress"]),
    ("breadcrumb", &["breadcrumb", "nav"]),
    ("table", &["table", "grid", "spreadsheet", "records"]),
    ("list", &["list", "feed", "inbox", "history"]),
    ("form", &["form", "auth", "login", "signup", "register", "input"]),
    ("upload", &["upload", "import", "dropzone", "attach"]),
    ("chart", &["chart", "graph", "analytics", "metric", "report"]),
    ("dashboard", &["dashboard", "overview", "kpi", "summary"]),
    ("editor", &["editor", "code", "script"]),
    ("chat", &["chat", "message", "conversation", "assistant"]),
    ("calendar", &["calendar", "schedule", "agenda", "event"]),
    ("timeline", &["timeline", "roadmap", "milestone"]),
    ("gallery", &["gallery", "image", "photo", "media"]),
    ("profile", &["profile", "account", "avatar", "user"]),
    ("settings", &["setting", "config", "preference"]),
    ("search", &["search", "filter", "query"]),
    ("modal", &["modal", "dialog", "popup", "confirm"]),
    ("tabs", &["tab"]),
    ("card", &["card", "tile", "preview"]),
    ("sidebar", &["sidebar"]),
    ("header", &["header"]),
    ("footer", &["footer"]),
];

/// Lowercase, trim and de-alias an explicit hint.
pub fn normalize(hint: &str) -> String {
    let hint = hint.trim().to_lowercase();
    match ALIASES.iter().find(|(alias, _)| *alias == hint) {
        Some((_, canonical)) => (*canonical).to_string(),
        None => hint,
    }
}

/// Infer a canonical hint from free text (id, name).
///
/// `leaf` enables the editor carve-out: a component only resolves to
/// `editor` when its text mentions `code`.
pub fn infer(text: &str, leaf: bool) -> Option<&'static str> {
    first_match_where(text, INFERENCE, |hint| {
        !(leaf && hint == "editor" && !text.contains("code"))
    })
}

/// Resolve the hint a node is drawn with, or `None` when nothing applies.
pub fn resolve(node: &DesignNode) -> Option<String> {
    if let Some(explicit) = node.visual_hint.as_deref() {
        let hint = normalize(explicit);
        if !hint.is_empty() {
            return Some(hint);
        }
    }
    let text = search_text([Some(node.id.as_str()), Some(node.name.as_str())]);
    let inferred = infer(&text, node.is_leaf());
    log::trace!("hint for {}: {inferred:?}", node.id);
    inferred.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use crate::model::{LeafAttrs, NodeKind};

    fn section(id: &str, name: &str, hint: Option<&str>) -> DesignNode {
        let mut node = DesignNode::new(NodeId::intern(id), NodeKind::Section, name);
        node.visual_hint = hint.map(str::to_string);
        node
    }

    fn component(id: &str, name: &str) -> DesignNode {
        DesignNode::new(
            NodeId::intern(id),
            NodeKind::Component(LeafAttrs::default()),
            name,
        )
    }

    #[test]
    fn explicit_alias_is_normalized() {
        let node = section("h_any", "Whatever", Some("  NAV "));
        assert_eq!(resolve(&node).as_deref(), Some("breadcrumb"));
        assert_eq!(normalize("btn"), "button");
        assert_eq!(normalize("wizard"), "stepper");
        assert_eq!(normalize("dialog"), "modal");
    }

    #[test]
    fn unknown_explicit_hint_passes_through() {
        let node = section("h_map", "Map", Some("Heatmap"));
        assert_eq!(resolve(&node).as_deref(), Some("heatmap"));
    }

    #[test]
    fn blank_explicit_hint_falls_back_to_inference() {
        let node = section("h_blank", "Login", Some("   "));
        assert_eq!(resolve(&node).as_deref(), Some("form"));
    }

    #[test]
    fn inference_uses_id_and_name_in_table_order() {
        assert_eq!(resolve(&section("n1_auth", "Access", None)).as_deref(), Some("form"));
        // "progress" (stepper) outranks "report" (chart)
        assert_eq!(
            resolve(&section("h_rep", "Progress report", None)).as_deref(),
            Some("stepper")
        );
        assert_eq!(resolve(&section("h_none", "Pricing", None)), None);
    }

    #[test]
    fn editor_carve_out_for_leaves() {
        // A leaf named "Script runner" skips editor and finds nothing else.
        assert_eq!(resolve(&component("h_leaf1", "Script runner")), None);
        // Mentioning code keeps the editor hint.
        assert_eq!(
            resolve(&component("h_leaf2", "Code editor")).as_deref(),
            Some("editor")
        );
        // Skipping editor continues down the table.
        assert_eq!(
            resolve(&component("h_leaf3", "Editor chat")).as_deref(),
            Some("chat")
        );
        // Non-leaves are not affected.
        assert_eq!(
            resolve(&section("h_sec", "Script runner", None)).as_deref(),
            Some("editor")
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let node = section("h_det", "User settings", None);
        let first = resolve(&node);
        for _ in 0..5 {
            assert_eq!(resolve(&node), first);
        }
    }
}
