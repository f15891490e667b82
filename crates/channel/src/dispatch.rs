//! Frame dispatch
//!
//! One entry point, [`Dispatcher::handle_frame`], takes a raw text frame
//! and drives everything downstream: decode, admission filtering, typed
//! fan-out to the router and collaborators, then the toast surface. A bad
//! frame is logged and dropped; it never tears the channel down.

use tracing::{debug, warn};

use courtside_protocol::{Game, GatewayEvent};

use crate::notify;
use crate::router::{FriendChange, RefreshRouter, RequestChange, TournamentPhase};
use crate::ui::Collaborators;

pub struct Dispatcher {
    local_user: String,
    ui: Collaborators,
    router: RefreshRouter,
}

impl Dispatcher {
    pub fn new(local_user: String, ui: Collaborators, router: RefreshRouter) -> Self {
        Self { local_user, ui, router }
    }

    /// Process one inbound text frame end to end.
    pub fn handle_frame(&mut self, raw: &str) {
        let event = match GatewayEvent::decode(raw) {
            Ok(event) => event,
            Err(err) => {
                warn!(
                    component = "dispatch",
                    event = "dispatch.frame.malformed",
                    error = %err,
                    "Dropping malformed gateway frame"
                );
                return;
            }
        };

        if !self.admit(&event) {
            return;
        }

        self.dispatch(&event);
        notify::raise(self.ui.notify.as_ref(), &event);
    }

    /// Keep-alive echoes and self-originated events go no further.
    fn admit(&self, event: &GatewayEvent) -> bool {
        if event.is_keepalive() {
            return false;
        }
        if event.originating_user() == Some(self.local_user.as_str()) {
            debug!(
                component = "dispatch",
                event = "dispatch.frame.self_suppressed",
                "Suppressing self-originated event"
            );
            return false;
        }
        true
    }

    fn dispatch(&mut self, event: &GatewayEvent) {
        match event {
            // Friend-family events carry a subject and a delta; status
            // updates alone take the debounced path.
            GatewayEvent::FriendStatusUpdated { .. } => {
                if let (Some(subject), Some(delta)) = (event.subject(), event.friend_delta()) {
                    self.router
                        .status_updated(FriendChange { subject: subject.to_string(), delta });
                }
            }
            GatewayEvent::FriendAdded { .. }
            | GatewayEvent::FriendRemoved { .. }
            | GatewayEvent::AvatarChanged { .. }
            | GatewayEvent::UserDeleted { .. }
            | GatewayEvent::UsernameChanged { .. } => {
                if let (Some(subject), Some(delta)) = (event.subject(), event.friend_delta()) {
                    self.router
                        .friend_changed(FriendChange { subject: subject.to_string(), delta });
                }
            }

            GatewayEvent::RequestSent { .. } => self.router.request_changed(RequestChange::Sent),
            GatewayEvent::RequestCancelled { .. } => {
                self.router.request_changed(RequestChange::Cancelled)
            }
            GatewayEvent::RequestDeclined { user } => self
                .router
                .request_changed(RequestChange::Declined { user: user.clone() }),

            // Toast-only events; no refresh side.
            GatewayEvent::MatchInvitation { .. } | GatewayEvent::TournamentEnd => {}

            GatewayEvent::PongMatchAccepted { game_key } => {
                self.ui.games.join_match(Game::Pong, game_key)
            }
            GatewayEvent::ChessMatchAccepted { game_key } => {
                self.ui.games.join_match(Game::Chess, game_key)
            }
            GatewayEvent::ChessMatchAcceptedRandom { game_key } => {
                self.ui.games.join_matchmaking_match(game_key)
            }
            GatewayEvent::PongMatchDecline | GatewayEvent::ChessMatchDecline => {
                self.ui.games.invitation_declined()
            }
            GatewayEvent::PongMatchCancelled { invitation_token }
            | GatewayEvent::ChessMatchCancelled { invitation_token } => {
                self.ui.chat.invitation_cancelled(invitation_token)
            }

            GatewayEvent::PongTournamentPlayersUpdate => {
                self.router.tournament_changed(TournamentPhase::PlayersUpdate)
            }
            GatewayEvent::PongTournamentMatchFinished => {
                self.router.tournament_changed(TournamentPhase::MatchFinished)
            }
            GatewayEvent::PongTournamentRoundFinished => {
                self.router.tournament_changed(TournamentPhase::RoundFinished)
            }
            GatewayEvent::PongTournamentClosed => {
                self.router.tournament_changed(TournamentPhase::Closed)
            }
            GatewayEvent::PongTournamentMatchReady { game_key } => {
                self.ui.tournaments.join_match(game_key)
            }

            GatewayEvent::Ping => {}
            GatewayEvent::Unknown => {
                debug!(
                    component = "dispatch",
                    event = "dispatch.frame.unknown",
                    "Ignoring unknown event type"
                );
            }
        }
    }
}
