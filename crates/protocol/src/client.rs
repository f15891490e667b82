//! Client → Gateway frames
//!
//! The notification socket is almost entirely one-way; the only frame a
//! client sends is the keep-alive ping that stops intermediaries from
//! idling the connection out. No reply is required for correctness.

use serde::{Deserialize, Serialize};

/// Frames sent from client to gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ClientFrame {
    Ping,
}

impl ClientFrame {
    /// Serialize to the wire text. Infallible for the frames we define.
    pub fn to_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"event_type":"ping"}"#.to_string())
    }
}
