//! Context-sensitive refresh routing
//!
//! All screen-gating decisions live in pure functions from (event data,
//! active screen) to a list of [`RefreshAction`]s: no IO, no async, fully
//! unit-testable. The async part is confined to [`RefreshRouter`], which
//! executes actions against the collaborators and owns the single debounce
//! slot for the high-frequency status-update family.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use courtside_protocol::FriendDelta;

use crate::screen::{ActiveScreen, Screen};
use crate::ui::Collaborators;

/// A friend-family change, reduced to what routing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendChange {
    /// Username keying row/summary refreshes (pre-rename name when renamed).
    pub subject: String,
    pub delta: FriendDelta,
}

/// A friend-request change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestChange {
    Sent,
    Cancelled,
    Declined { user: String },
}

/// Tournament lifecycle signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentPhase {
    PlayersUpdate,
    MatchFinished,
    RoundFinished,
    Closed,
}

/// One UI refresh to perform. Values, not calls, so routing stays pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshAction {
    FriendRow { user: String, delta: FriendDelta },
    FriendSummary { user: String },
    ChatRoster,
    TournamentFriends,
    HomeStatus,
    PendingRequests,
    DeclinedRequest { user: String },
    ReloadUnstarted,
    ReloadStarted { full_reset: bool },
}

// ---------------------------------------------------------------------------
// Pure routing core
// ---------------------------------------------------------------------------

/// Route a non-status friend change. Status updates never come through
/// here; they are only ever routed via [`route_status_fire`] after the
/// debounce window elapses.
pub fn route_friend_change(change: &FriendChange, screen: Screen) -> Vec<RefreshAction> {
    let mut actions = Vec::new();

    if screen == Screen::Friends {
        actions.push(RefreshAction::FriendRow {
            user: change.subject.clone(),
            delta: change.delta,
        });
        if change.delta == FriendDelta::Unchanged {
            actions.push(RefreshAction::FriendSummary { user: change.subject.clone() });
        }
    }

    // Additions and removals change chat eligibility on every screen;
    // metadata-only changes are invisible outside the friends screen.
    if change.delta.affects_roster() {
        actions.push(RefreshAction::ChatRoster);
        if screen == Screen::UnstartedTournaments {
            actions.push(RefreshAction::TournamentFriends);
        }
    }

    actions
}

/// Route the coalesced status update once the debounce timer fires. The
/// screen is the one active *now*, not when the burst started.
pub fn route_status_fire(change: &FriendChange, screen: Screen) -> Vec<RefreshAction> {
    match screen {
        Screen::Home => vec![RefreshAction::HomeStatus],
        Screen::Friends => vec![
            RefreshAction::FriendRow {
                user: change.subject.clone(),
                delta: change.delta,
            },
            RefreshAction::FriendSummary { user: change.subject.clone() },
        ],
        _ => Vec::new(),
    }
}

/// Friend-request changes only matter while the friends screen is up.
pub fn route_friend_request(change: &RequestChange, screen: Screen) -> Vec<RefreshAction> {
    if screen != Screen::Friends {
        return Vec::new();
    }
    match change {
        RequestChange::Sent | RequestChange::Cancelled => vec![RefreshAction::PendingRequests],
        RequestChange::Declined { user } => {
            vec![RefreshAction::DeclinedRequest { user: user.clone() }]
        }
    }
}

/// Tournament events are gated to the screen that displays them.
pub fn route_tournament(phase: TournamentPhase, screen: Screen) -> Vec<RefreshAction> {
    match (phase, screen) {
        (TournamentPhase::PlayersUpdate, Screen::UnstartedTournaments) => {
            vec![RefreshAction::ReloadUnstarted]
        }
        (TournamentPhase::MatchFinished | TournamentPhase::RoundFinished, Screen::StartedTournaments) => {
            vec![RefreshAction::ReloadStarted { full_reset: false }]
        }
        (TournamentPhase::Closed, Screen::StartedTournaments) => {
            vec![RefreshAction::ReloadStarted { full_reset: true }]
        }
        _ => Vec::new(),
    }
}

/// Execute routed actions against the collaborators.
pub fn apply_actions(ui: &Collaborators, actions: &[RefreshAction]) {
    for action in actions {
        match action {
            RefreshAction::FriendRow { user, delta } => ui.friends.refresh_friend_row(user, *delta),
            RefreshAction::FriendSummary { user } => ui.friends.refresh_friend_summary(user),
            RefreshAction::ChatRoster => ui.chat.refresh_roster(),
            RefreshAction::TournamentFriends => ui.tournaments.refresh_friend_list(),
            RefreshAction::HomeStatus => ui.friends.refresh_home_status(),
            RefreshAction::PendingRequests => ui.friends.render_pending_requests(),
            RefreshAction::DeclinedRequest { user } => ui.friends.refresh_declined_request(user),
            RefreshAction::ReloadUnstarted => ui.tournaments.reload_unstarted(),
            RefreshAction::ReloadStarted { full_reset } => {
                ui.tournaments.reload_started(*full_reset)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// RefreshRouter: debounce runtime around the pure core
// ---------------------------------------------------------------------------

/// Executes routing decisions. Owns at most one in-flight debounce task
/// for the status-update family; scheduling a new one always aborts the
/// previous handle first, so a burst collapses to exactly one firing with
/// the newest event's data.
pub struct RefreshRouter {
    screen: ActiveScreen,
    ui: Collaborators,
    debounce_window: Duration,
    status_slot: Option<JoinHandle<()>>,
}

impl RefreshRouter {
    pub fn new(screen: ActiveScreen, ui: Collaborators, debounce_window: Duration) -> Self {
        Self {
            screen,
            ui,
            debounce_window,
            status_slot: None,
        }
    }

    /// Immediate path for non-status friend changes.
    pub fn friend_changed(&self, change: FriendChange) {
        let actions = route_friend_change(&change, self.screen.get());
        apply_actions(&self.ui, &actions);
    }

    /// Debounced path for status updates: (re)start the family timer,
    /// discarding whatever was pending. The screen is read when the timer
    /// fires, not now.
    pub fn status_updated(&mut self, change: FriendChange) {
        if let Some(handle) = self.status_slot.take() {
            handle.abort();
        }

        debug!(
            component = "router",
            event = "router.status.debounced",
            subject = %change.subject,
            window_ms = self.debounce_window.as_millis() as u64,
            "Status update coalesced"
        );

        let ui = self.ui.clone();
        let screen = self.screen.clone();
        let window = self.debounce_window;
        self.status_slot = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let actions = route_status_fire(&change, screen.get());
            apply_actions(&ui, &actions);
        }));
    }

    pub fn request_changed(&self, change: RequestChange) {
        let actions = route_friend_request(&change, self.screen.get());
        apply_actions(&self.ui, &actions);
    }

    pub fn tournament_changed(&self, phase: TournamentPhase) {
        let actions = route_tournament(phase, self.screen.get());
        apply_actions(&self.ui, &actions);
    }
}

impl Drop for RefreshRouter {
    fn drop(&mut self) {
        // A pending status fire must not outlive the channel that owns us.
        if let Some(handle) = self.status_slot.take() {
            handle.abort();
        }
    }
}
