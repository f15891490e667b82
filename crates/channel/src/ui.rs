//! External collaborator interfaces
//!
//! The channel drives the surrounding application exclusively through these
//! traits. Every refresh call is fire-and-forget and idempotent; nothing
//! here returns a value the channel inspects. Rendering lives entirely on
//! the other side of the seam.

use std::sync::Arc;

use courtside_protocol::FriendDelta;

/// Friends screen and home status panel refreshes.
pub trait FriendsUi: Send + Sync {
    /// Refresh one friend's row on the friends list, applying the delta.
    fn refresh_friend_row(&self, user: &str, delta: FriendDelta);
    /// Refresh the summary card for one friend (metadata-only changes).
    fn refresh_friend_summary(&self, user: &str);
    /// Re-render the pending friend-requests list from scratch.
    fn render_pending_requests(&self);
    /// Targeted refresh for a request the given user declined.
    fn refresh_declined_request(&self, user: &str);
    /// Bulk refresh of the friend status panel on the home screen.
    fn refresh_home_status(&self);
}

/// Chat sidebar collaborator.
pub trait ChatUi: Send + Sync {
    /// Additions/removals change who is chat-eligible everywhere.
    fn refresh_roster(&self);
    /// Mark an invitation bubble cancelled by its token.
    fn invitation_cancelled(&self, invitation_token: &str);
}

/// Tournament screens collaborator.
pub trait TournamentUi: Send + Sync {
    /// Refresh the invitable-friends list on the tournament setup screen.
    fn refresh_friend_list(&self);
    /// Reload the unstarted-tournament setup view.
    fn reload_unstarted(&self);
    /// Reload the started-tournament view; `full_reset` tears the bracket
    /// down instead of refreshing it in place.
    fn reload_started(&self, full_reset: bool);
    /// Navigate into a tournament match that became ready.
    fn join_match(&self, game_key: &str);
}

/// Match navigation collaborator.
pub trait GameLauncher: Send + Sync {
    /// An invitation we sent was accepted; enter the game.
    fn join_match(&self, game: courtside_protocol::Game, game_key: &str);
    /// A matchmaking opponent was found; enter the game.
    fn join_matchmaking_match(&self, game_key: &str);
    /// An invitation we sent was declined; dismiss the waiting dialog.
    fn invitation_declined(&self);
}

/// Toast / alert / unread-badge primitives.
pub trait NotifyUi: Send + Sync {
    fn toast(&self, text: &str);
    fn alert(&self, text: &str);
    fn set_unread(&self);
}

/// Bundle of collaborator handles threaded through dispatch and routing.
#[derive(Clone)]
pub struct Collaborators {
    pub friends: Arc<dyn FriendsUi>,
    pub chat: Arc<dyn ChatUi>,
    pub tournaments: Arc<dyn TournamentUi>,
    pub games: Arc<dyn GameLauncher>,
    pub notify: Arc<dyn NotifyUi>,
}
