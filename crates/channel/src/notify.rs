//! Toast and unread-badge surface for gateway events.

use courtside_protocol::GatewayEvent;

use crate::ui::NotifyUi;

/// Human-readable toast line for an event, or `None` when the event is
/// data-only and surfaces nowhere.
pub fn notification_text(event: &GatewayEvent) -> Option<String> {
    match event {
        GatewayEvent::FriendAdded { user } => Some(format!("{user} is now your friend")),
        GatewayEvent::RequestSent { .. } => Some("New friend request".to_string()),
        GatewayEvent::RequestDeclined { user } => {
            Some(format!("{user} declined your friend request"))
        }
        GatewayEvent::MatchInvitation { .. } => {
            Some("You have a new match invitation".to_string())
        }
        GatewayEvent::TournamentEnd => Some("Tournament finished".to_string()),
        GatewayEvent::PongTournamentMatchReady { .. } => {
            Some("Your tournament match is ready".to_string())
        }
        _ => None,
    }
}

/// Raise the toast and bump the unread badge when the event warrants one.
pub fn raise(notify: &dyn NotifyUi, event: &GatewayEvent) {
    if let Some(text) = notification_text(event) {
        notify.toast(&text);
        notify.set_unread();
    }
}
