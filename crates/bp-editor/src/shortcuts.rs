//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser host and native tests share it.

use crate::input::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── View ──
    ZoomIn,
    ZoomOut,
    /// Back to the default view box.
    ZoomReset,
    /// Space held: pointer drags pan the canvas.
    PanHold,

    // ── Edit ──
    /// Enter group edit on the selected node.
    EnterGroupEdit,
    Escape,
    ToggleSnap,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key press. `key` is the `KeyboardEvent.key` value.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        // Zoom keys work with or without the command modifier, so the
        // browser-style ⌘+ / ⌘- / ⌘0 behave the same as the bare keys.
        match key {
            "=" | "+" => return Some(ShortcutAction::ZoomIn),
            "-" | "_" => return Some(ShortcutAction::ZoomOut),
            "0" => return Some(ShortcutAction::ZoomReset),
            _ => {}
        }

        if modifiers.command() || modifiers.alt {
            return None;
        }

        match key {
            " " => Some(ShortcutAction::PanHold),
            "Enter" => Some(ShortcutAction::EnterGroupEdit),
            "Escape" => Some(ShortcutAction::Escape),
            "g" | "G" => Some(ShortcutAction::ToggleSnap),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd() -> Modifiers {
        Modifiers {
            meta: true,
            ..Modifiers::NONE
        }
    }

    #[test]
    fn zoom_keys() {
        assert_eq!(
            ShortcutMap::resolve("+", Modifiers::NONE),
            Some(ShortcutAction::ZoomIn)
        );
        assert_eq!(ShortcutMap::resolve("=", cmd()), Some(ShortcutAction::ZoomIn));
        assert_eq!(ShortcutMap::resolve("-", cmd()), Some(ShortcutAction::ZoomOut));
        assert_eq!(
            ShortcutMap::resolve("0", Modifiers::NONE),
            Some(ShortcutAction::ZoomReset)
        );
    }

    #[test]
    fn bare_keys() {
        assert_eq!(
            ShortcutMap::resolve(" ", Modifiers::NONE),
            Some(ShortcutAction::PanHold)
        );
        assert_eq!(
            ShortcutMap::resolve("Enter", Modifiers::NONE),
            Some(ShortcutAction::EnterGroupEdit)
        );
        assert_eq!(
            ShortcutMap::resolve("Escape", Modifiers::NONE),
            Some(ShortcutAction::Escape)
        );
        assert_eq!(
            ShortcutMap::resolve("G", Modifiers::NONE),
            Some(ShortcutAction::ToggleSnap)
        );
    }

    #[test]
    fn command_combos_do_not_trigger_bare_actions() {
        assert_eq!(ShortcutMap::resolve("g", cmd()), None);
        assert_eq!(ShortcutMap::resolve("Enter", cmd()), None);
        assert_eq!(ShortcutMap::resolve("x", Modifiers::NONE), None);
    }
}
