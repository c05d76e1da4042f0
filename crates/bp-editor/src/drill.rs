//! Navigation history below the opened phase.

use bp_core::{Level, NodeId};
use smallvec::SmallVec;

/// Deepest the stack can get: one frame per non-leaf level.
pub const MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillFrame {
    pub level: Level,
    pub id: NodeId,
}

/// Frames from the opened phase down to the node whose children are shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrillStack {
    frames: SmallVec<[DrillFrame; MAX_DEPTH]>,
}

impl DrillStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a frame. No-op when `frame` is already on top or the stack is full.
    pub fn push(&mut self, frame: DrillFrame) -> bool {
        if self.top().is_some_and(|top| top.id == frame.id) {
            return false;
        }
        if self.frames.len() >= MAX_DEPTH {
            log::debug!("drill stack full, ignoring {}", frame.id);
            return false;
        }
        self.frames.push(frame);
        true
    }

    /// Pop the top frame. `None` (and unchanged) when empty.
    pub fn pop(&mut self) -> Option<DrillFrame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&DrillFrame> {
        self.frames.last()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[DrillFrame] {
        &self.frames
    }
}
