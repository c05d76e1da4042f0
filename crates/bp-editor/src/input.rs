//! Input events delivered by the host, in screen pixels.
//!
//! The controller converts positions to canvas space itself, using the live
//! surface size at the time the event is handled.

use serde::{Deserialize, Serialize};

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    DoubleClick {
        x: f64,
        y: f64,
    },
    /// Wheel or trackpad scroll. Positive `dy` scrolls down.
    Wheel {
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyUp {
        key: String,
    },
    /// The rename field was confirmed (Enter) or lost focus.
    RenameCommit {
        value: String,
    },
    /// Escape inside the rename field.
    RenameCancel,
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn key(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Screen position, for events that have one.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y }
            | Self::DoubleClick { x, y }
            | Self::Wheel { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }
}
