//! Gateway → Client events
//!
//! Every inbound frame is one JSON object tagged by `event_type`. Unknown
//! tags decode to [`GatewayEvent::Unknown`] so the gateway can grow new
//! event types without breaking older clients.

use serde::{Deserialize, Serialize};

use crate::types::{DecodeError, FriendDelta};

/// Events pushed by the gateway over the notification socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GatewayEvent {
    // Friend graph changes
    FriendAdded {
        user: String,
    },
    FriendRemoved {
        user: String,
    },
    AvatarChanged {
        user: String,
    },
    FriendStatusUpdated {
        user: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        old_username: Option<String>,
    },
    UserDeleted {
        user: String,
    },
    UsernameChanged {
        user: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        old_username: Option<String>,
    },

    // Friend requests
    RequestSent {
        #[serde(skip_serializing_if = "Option::is_none")]
        user: Option<String>,
    },
    RequestDeclined {
        user: String,
    },
    RequestCancelled {
        #[serde(skip_serializing_if = "Option::is_none")]
        user: Option<String>,
    },

    // Pong match events
    MatchInvitation {
        #[serde(skip_serializing_if = "Option::is_none")]
        user: Option<String>,
    },
    TournamentEnd,
    PongMatchAccepted {
        game_key: String,
    },
    PongMatchDecline,
    PongMatchCancelled {
        invitation_token: String,
    },

    // Pong tournament events
    PongTournamentClosed,
    PongTournamentMatchReady {
        game_key: String,
    },
    PongTournamentPlayersUpdate,
    PongTournamentMatchFinished,
    PongTournamentRoundFinished,

    // Chess match events
    ChessMatchAccepted {
        game_key: String,
    },
    ChessMatchDecline,
    ChessMatchCancelled {
        invitation_token: String,
    },
    ChessMatchAcceptedRandom {
        game_key: String,
    },

    // Keep-alive echo from the gateway; never dispatched.
    Ping,

    /// Any event type this client does not know. Dispatch ignores it.
    #[serde(other)]
    Unknown,
}

impl GatewayEvent {
    /// Decode a raw text frame.
    pub fn decode(raw: &str) -> Result<GatewayEvent, DecodeError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The user this event originated from, where the gateway includes one.
    /// Used to suppress self-originated events.
    pub fn originating_user(&self) -> Option<&str> {
        match self {
            GatewayEvent::FriendAdded { user }
            | GatewayEvent::FriendRemoved { user }
            | GatewayEvent::AvatarChanged { user }
            | GatewayEvent::FriendStatusUpdated { user, .. }
            | GatewayEvent::UserDeleted { user }
            | GatewayEvent::UsernameChanged { user, .. }
            | GatewayEvent::RequestDeclined { user } => Some(user),
            GatewayEvent::RequestSent { user }
            | GatewayEvent::RequestCancelled { user }
            | GatewayEvent::MatchInvitation { user } => user.as_deref(),
            _ => None,
        }
    }

    /// The friend a friend-family event is about: the pre-rename username
    /// when one is carried, otherwise the originating user.
    pub fn subject(&self) -> Option<&str> {
        match self {
            GatewayEvent::FriendStatusUpdated { user, old_username }
            | GatewayEvent::UsernameChanged { user, old_username } => {
                Some(old_username.as_deref().unwrap_or(user))
            }
            other => other.originating_user(),
        }
    }

    /// Delta sign for friend-family events; `None` for everything else.
    pub fn friend_delta(&self) -> Option<FriendDelta> {
        match self {
            GatewayEvent::FriendAdded { .. } => Some(FriendDelta::Added),
            GatewayEvent::FriendRemoved { .. } | GatewayEvent::UserDeleted { .. } => {
                Some(FriendDelta::Removed)
            }
            GatewayEvent::AvatarChanged { .. }
            | GatewayEvent::FriendStatusUpdated { .. }
            | GatewayEvent::UsernameChanged { .. } => Some(FriendDelta::Unchanged),
            _ => None,
        }
    }

    pub fn is_keepalive(&self) -> bool {
        matches!(self, GatewayEvent::Ping)
    }
}
