//! Interaction engine for the blueprint canvas.
//!
//! [`CanvasController`] turns host input into navigation, selection and
//! override edits, repaints through a [`Surface`] and reports changes to a
//! [`NotificationSink`].

pub mod controller;
pub mod drill;
pub mod input;
pub mod notify;
pub mod shortcuts;
pub mod surface;
pub mod viewport;

pub use controller::{CanvasController, InteractionMode};
pub use drill::{DrillFrame, DrillStack};
pub use input::{InputEvent, Modifiers};
pub use notify::{Inbound, Notification, NotificationSink, NullSink};
pub use surface::{RecordingSurface, Surface, TextField};
pub use viewport::Viewport;
