//! Resize handles around the selected node.

use bp_core::grid::snap;
use bp_core::overlay::{MIN_HEIGHT, MIN_WIDTH};
use bp_core::Rect;

/// Side length of a handle square, in canvas units.
pub const HANDLE_SIZE: f64 = 8.0;

/// Extra reach around a handle when hit-testing.
pub const HANDLE_SLOP: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

/// The edges of the rect a handle moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl HandleKind {
    pub const ALL: [HandleKind; 8] = [
        HandleKind::NorthWest,
        HandleKind::North,
        HandleKind::NorthEast,
        HandleKind::East,
        HandleKind::SouthEast,
        HandleKind::South,
        HandleKind::SouthWest,
        HandleKind::West,
    ];

    pub fn edges(self) -> Edges {
        use HandleKind::*;
        Edges {
            left: matches!(self, NorthWest | West | SouthWest),
            right: matches!(self, NorthEast | East | SouthEast),
            top: matches!(self, NorthWest | North | NorthEast),
            bottom: matches!(self, SouthWest | South | SouthEast),
        }
    }

    /// Handle center on `rect`.
    pub fn anchor(self, rect: Rect) -> (f64, f64) {
        let e = self.edges();
        let x = if e.left {
            rect.x
        } else if e.right {
            rect.right()
        } else {
            rect.x + rect.w / 2.0
        };
        let y = if e.top {
            rect.y
        } else if e.bottom {
            rect.bottom()
        } else {
            rect.y + rect.h / 2.0
        };
        (x, y)
    }

    /// CSS cursor name for hosts that show one.
    pub fn cursor(self) -> &'static str {
        use HandleKind::*;
        match self {
            NorthWest | SouthEast => "nwse-resize",
            NorthEast | SouthWest => "nesw-resize",
            North | South => "ns-resize",
            East | West => "ew-resize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    pub cx: f64,
    pub cy: f64,
}

impl Handle {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.cx - HANDLE_SIZE / 2.0,
            self.cy - HANDLE_SIZE / 2.0,
            HANDLE_SIZE,
            HANDLE_SIZE,
        )
    }

    pub fn hit(&self, px: f64, py: f64) -> bool {
        let reach = HANDLE_SIZE / 2.0 + HANDLE_SLOP;
        (px - self.cx).abs() <= reach && (py - self.cy).abs() <= reach
    }
}

/// The eight handles of `rect`, clockwise from the top-left corner.
pub fn handles_for(rect: Rect) -> Vec<Handle> {
    HandleKind::ALL
        .iter()
        .map(|&kind| {
            let (cx, cy) = kind.anchor(rect);
            Handle { kind, cx, cy }
        })
        .collect()
}

/// Apply a pointer delta to `start` through the edges `kind` moves.
///
/// The size is clamped to the minimum while the opposite edge stays put,
/// then all four values are snapped when `snap_to_grid` is set.
pub fn resize(start: Rect, kind: HandleKind, dx: f64, dy: f64, snap_to_grid: bool) -> Rect {
    let e = kind.edges();
    let mut left = start.x;
    let mut right = start.right();
    let mut top = start.y;
    let mut bottom = start.bottom();
    if e.left {
        left += dx;
    }
    if e.right {
        right += dx;
    }
    if e.top {
        top += dy;
    }
    if e.bottom {
        bottom += dy;
    }

    if right - left < MIN_WIDTH {
        if e.left {
            left = right - MIN_WIDTH;
        } else {
            right = left + MIN_WIDTH;
        }
    }
    if bottom - top < MIN_HEIGHT {
        if e.top {
            top = bottom - MIN_HEIGHT;
        } else {
            bottom = top + MIN_HEIGHT;
        }
    }

    let rect = Rect::new(left, top, right - left, bottom - top);
    if snap_to_grid {
        Rect::new(snap(rect.x), snap(rect.y), snap(rect.w), snap(rect.h))
    } else {
        rect
    }
}
