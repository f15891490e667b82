//! Recording collaborator fakes shared by the channel/dispatch/router tests.

use std::sync::{Arc, Mutex};

use courtside_protocol::{FriendDelta, Game};

use crate::ui::{ChatUi, Collaborators, FriendsUi, GameLauncher, NotifyUi, TournamentUi};

/// Every observable side effect a test can assert on, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    FriendRow { user: String, delta: FriendDelta },
    FriendSummary { user: String },
    PendingRequests,
    DeclinedRequest { user: String },
    HomeStatus,
    ChatRoster,
    InvitationCancelled { token: String },
    TournamentFriends,
    ReloadUnstarted,
    ReloadStarted { full_reset: bool },
    JoinTournamentMatch { game_key: String },
    JoinMatch { game: Game, game_key: String },
    JoinMatchmaking { game_key: String },
    InvitationDeclined,
    Toast { text: String },
    Alert { text: String },
    SetUnread,
}

#[derive(Default)]
pub struct RecordingUi {
    calls: Mutex<Vec<UiCall>>,
}

impl RecordingUi {
    pub fn collaborators() -> (Arc<RecordingUi>, Collaborators) {
        let ui = Arc::new(RecordingUi::default());
        let collaborators = Collaborators {
            friends: ui.clone(),
            chat: ui.clone(),
            tournaments: ui.clone(),
            games: ui.clone(),
            notify: ui.clone(),
        };
        (ui, collaborators)
    }

    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: UiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl FriendsUi for RecordingUi {
    fn refresh_friend_row(&self, user: &str, delta: FriendDelta) {
        self.record(UiCall::FriendRow { user: user.into(), delta });
    }
    fn refresh_friend_summary(&self, user: &str) {
        self.record(UiCall::FriendSummary { user: user.into() });
    }
    fn render_pending_requests(&self) {
        self.record(UiCall::PendingRequests);
    }
    fn refresh_declined_request(&self, user: &str) {
        self.record(UiCall::DeclinedRequest { user: user.into() });
    }
    fn refresh_home_status(&self) {
        self.record(UiCall::HomeStatus);
    }
}

impl ChatUi for RecordingUi {
    fn refresh_roster(&self) {
        self.record(UiCall::ChatRoster);
    }
    fn invitation_cancelled(&self, invitation_token: &str) {
        self.record(UiCall::InvitationCancelled { token: invitation_token.into() });
    }
}

impl TournamentUi for RecordingUi {
    fn refresh_friend_list(&self) {
        self.record(UiCall::TournamentFriends);
    }
    fn reload_unstarted(&self) {
        self.record(UiCall::ReloadUnstarted);
    }
    fn reload_started(&self, full_reset: bool) {
        self.record(UiCall::ReloadStarted { full_reset });
    }
    fn join_match(&self, game_key: &str) {
        self.record(UiCall::JoinTournamentMatch { game_key: game_key.into() });
    }
}

impl GameLauncher for RecordingUi {
    fn join_match(&self, game: Game, game_key: &str) {
        self.record(UiCall::JoinMatch { game, game_key: game_key.into() });
    }
    fn join_matchmaking_match(&self, game_key: &str) {
        self.record(UiCall::JoinMatchmaking { game_key: game_key.into() });
    }
    fn invitation_declined(&self) {
        self.record(UiCall::InvitationDeclined);
    }
}

impl NotifyUi for RecordingUi {
    fn toast(&self, text: &str) {
        self.record(UiCall::Toast { text: text.into() });
    }
    fn alert(&self, text: &str) {
        self.record(UiCall::Alert { text: text.into() });
    }
    fn set_unread(&self) {
        self.record(UiCall::SetUnread);
    }
}
