//! Courtside channel runner
//!
//! Connects to a notification gateway and logs everything the channel
//! would hand to a real UI. Useful against a live gateway for watching
//! event flow and reconnect behavior.

use std::sync::Arc;

use tracing::info;

use courtside::channel::EventChannel;
use courtside::config::ChannelConfig;
use courtside::logging::init_logging;
use courtside::screen::{ActiveScreen, Screen};
use courtside::transport::WsConnector;
use courtside::ui::{ChatUi, Collaborators, FriendsUi, GameLauncher, NotifyUi, TournamentUi};
use courtside_protocol::{FriendDelta, Game};

/// Collaborator that logs every call instead of rendering.
struct LoggingUi;

impl FriendsUi for LoggingUi {
    fn refresh_friend_row(&self, user: &str, delta: FriendDelta) {
        info!(component = "ui", event = "ui.friend_row", user, delta = ?delta);
    }
    fn refresh_friend_summary(&self, user: &str) {
        info!(component = "ui", event = "ui.friend_summary", user);
    }
    fn render_pending_requests(&self) {
        info!(component = "ui", event = "ui.pending_requests");
    }
    fn refresh_declined_request(&self, user: &str) {
        info!(component = "ui", event = "ui.declined_request", user);
    }
    fn refresh_home_status(&self) {
        info!(component = "ui", event = "ui.home_status");
    }
}

impl ChatUi for LoggingUi {
    fn refresh_roster(&self) {
        info!(component = "ui", event = "ui.chat_roster");
    }
    fn invitation_cancelled(&self, invitation_token: &str) {
        info!(component = "ui", event = "ui.invitation_cancelled", invitation_token);
    }
}

impl TournamentUi for LoggingUi {
    fn refresh_friend_list(&self) {
        info!(component = "ui", event = "ui.tournament_friends");
    }
    fn reload_unstarted(&self) {
        info!(component = "ui", event = "ui.reload_unstarted");
    }
    fn reload_started(&self, full_reset: bool) {
        info!(component = "ui", event = "ui.reload_started", full_reset);
    }
    fn join_match(&self, game_key: &str) {
        info!(component = "ui", event = "ui.join_tournament_match", game_key);
    }
}

impl GameLauncher for LoggingUi {
    fn join_match(&self, game: Game, game_key: &str) {
        info!(component = "ui", event = "ui.join_match", game = %game, game_key);
    }
    fn join_matchmaking_match(&self, game_key: &str) {
        info!(component = "ui", event = "ui.join_matchmaking", game_key);
    }
    fn invitation_declined(&self) {
        info!(component = "ui", event = "ui.invitation_declined");
    }
}

impl NotifyUi for LoggingUi {
    fn toast(&self, text: &str) {
        info!(component = "ui", event = "ui.toast", text);
    }
    fn alert(&self, text: &str) {
        info!(component = "ui", event = "ui.alert", text);
    }
    fn set_unread(&self) {
        info!(component = "ui", event = "ui.unread_badge");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logging = init_logging()?;
    let config = ChannelConfig::from_env();

    info!(
        component = "main",
        event = "main.starting",
        run_id = %logging.run_id,
        gateway_url = %config.gateway_url,
        local_user = %config.local_user,
        "Starting courtside channel"
    );

    let ui = Arc::new(LoggingUi);
    let collaborators = Collaborators {
        friends: ui.clone(),
        chat: ui.clone(),
        tournaments: ui.clone(),
        games: ui.clone(),
        notify: ui,
    };

    let handle = EventChannel::spawn(
        config,
        Arc::new(WsConnector),
        collaborators,
        ActiveScreen::new(Screen::Home),
    );

    tokio::signal::ctrl_c().await?;
    info!(component = "main", event = "main.shutdown", "Shutting down");
    handle.close().await;

    Ok(())
}
