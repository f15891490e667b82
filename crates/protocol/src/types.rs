//! Core types shared across the protocol

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sign of a friend-graph change carried by a friend-family event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendDelta {
    /// A friend was added (+1).
    Added,
    /// A friend was removed, including account deletion (-1).
    Removed,
    /// Metadata-only change: avatar, username, presence (0).
    Unchanged,
}

impl FriendDelta {
    /// Whether the change affects who is in the friend graph at all.
    pub fn affects_roster(self) -> bool {
        !matches!(self, FriendDelta::Unchanged)
    }
}

/// Game variant an invitation or match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Game {
    Pong,
    Chess,
}

impl Game {
    pub fn as_str(self) -> &'static str {
        match self {
            Game::Pong => "pong",
            Game::Chess => "chess",
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to decode an inbound frame. Always non-fatal to the channel:
/// callers log and drop the frame.
#[derive(Debug, Error)]
#[error("malformed gateway frame: {0}")]
pub struct DecodeError(#[from] pub serde_json::Error);
