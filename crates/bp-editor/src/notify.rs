//! Notifications exchanged with the rest of the application.
//!
//! Outbound [`Notification`]s report what the canvas did; inbound
//! [`Inbound`] messages come from property panels and the phase picker.
//! Both serialize as JSON objects tagged by `type`.

use bp_core::{LayoutOverride, Level, NodeId, StyleOverride};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Notification {
    /// The children of `parent` are now on the canvas. `level` is theirs.
    ChildSetRendered {
        level: Option<Level>,
        parent: NodeId,
    },
    NodeSelected {
        id: NodeId,
    },
    SelectionCleared,
    /// Live position during a drag or resize; `w`/`h` only while resizing.
    NodeMoved {
        id: NodeId,
        x: f64,
        y: f64,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        w: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        h: Option<f64>,
    },
    /// A layout override was committed.
    NodeLayoutChanged {
        id: NodeId,
        rect: LayoutOverride,
    },
    NodeStyleChanged {
        id: NodeId,
        style: StyleOverride,
    },
    /// The document or overlay changed and should be persisted.
    DataChanged,
    /// Drilled out past the top level.
    PhaseSelectionRequested,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Inbound {
    OpenPhase { id: NodeId },
    LayoutChanged { id: NodeId, rect: LayoutOverride },
    StyleChanged { id: NodeId, style: StyleOverride },
}

/// Receives outbound notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _: Notification) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn notifications_are_tagged() {
        let json = serde_json::to_string(&Notification::NodeMoved {
            id: NodeId::intern("nt_a"),
            x: 8.0,
            y: 16.0,
            w: None,
            h: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"nodeMoved","id":"nt_a","x":8.0,"y":16.0}"#);

        let json = serde_json::to_string(&Notification::ChildSetRendered {
            level: Some(Level::Section),
            parent: NodeId::intern("nt_p"),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"childSetRendered","level":"section","parent":"nt_p"}"#
        );
        assert_eq!(
            serde_json::to_string(&Notification::DataChanged).unwrap(),
            r#"{"type":"dataChanged"}"#
        );
    }

    #[test]
    fn inbound_decodes() {
        let msg: Inbound = serde_json::from_str(
            r#"{"type":"layoutChanged","id":"nt_b","rect":{"x":8,"y":8,"w":80,"h":40}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            Inbound::LayoutChanged {
                id: NodeId::intern("nt_b"),
                rect: LayoutOverride {
                    x: 8.0,
                    y: 8.0,
                    w: 80.0,
                    h: 40.0
                },
            }
        );
        let msg: Inbound =
            serde_json::from_str(r##"{"type":"styleChanged","id":"nt_b","style":{"fill":"#FFF"}}"##)
                .unwrap();
        assert!(matches!(msg, Inbound::StyleChanged { style, .. } if style.fill.as_deref() == Some("#FFF")));
    }
}
