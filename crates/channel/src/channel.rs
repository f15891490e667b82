//! Event channel lifecycle
//!
//! [`EventChannel::spawn`] starts one background task that owns the gateway
//! connection for the lifetime of a sign-in: dial, drive, and redial with
//! exponential backoff until told to close. Callers interact through a
//! cheaply clonable [`ChannelHandle`]; state reads are lock-free via
//! `ArcSwap`, commands go over an mpsc channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use courtside_protocol::ClientFrame;

use crate::config::ChannelConfig;
use crate::dispatch::Dispatcher;
use crate::router::RefreshRouter;
use crate::screen::ActiveScreen;
use crate::transport::{Connection, Connector};
use crate::ui::Collaborators;

static CONNECTION_SEQ: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Dial in progress.
    Connecting,
    /// Connection established and being driven.
    Open,
    /// Connection lost or dial failed; a redial is scheduled.
    ClosedUnintentional,
    /// Closed on request. Terminal; never redialed.
    ClosedIntentional,
}

/// Point-in-time view of the channel, published on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub state: ChannelState,
    /// Consecutive failed dials since the last successful open.
    pub reconnect_attempts: u32,
}

enum ChannelCommand {
    Close,
}

/// Clonable handle to a running channel task.
#[derive(Clone)]
pub struct ChannelHandle {
    command_tx: mpsc::Sender<ChannelCommand>,
    snapshot: Arc<ArcSwap<ChannelSnapshot>>,
}

impl ChannelHandle {
    pub fn snapshot(&self) -> ChannelSnapshot {
        **self.snapshot.load()
    }

    pub fn state(&self) -> ChannelState {
        self.snapshot().state
    }

    /// Request an intentional close. The task shuts the socket and exits
    /// without scheduling a redial.
    pub async fn close(&self) {
        let _ = self.command_tx.send(ChannelCommand::Close).await;
    }
}

/// Delay before the `attempt`th consecutive redial, doubling from the base
/// and saturating at the cap. `attempt` starts at 1.
pub fn reconnect_delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    let exp = attempt.saturating_sub(1).min(16);
    base.saturating_mul(1 << exp).min(max)
}

pub struct EventChannel;

impl EventChannel {
    /// Start the channel task. Dispatch state (including the status
    /// debounce slot) survives reconnections; only the socket is replaced.
    pub fn spawn(
        config: ChannelConfig,
        connector: Arc<dyn Connector>,
        ui: Collaborators,
        screen: ActiveScreen,
    ) -> ChannelHandle {
        let (command_tx, command_rx) = mpsc::channel(8);
        let snapshot = Arc::new(ArcSwap::from_pointee(ChannelSnapshot {
            state: ChannelState::Connecting,
            reconnect_attempts: 0,
        }));

        let router = RefreshRouter::new(screen, ui.clone(), config.debounce_window);
        let dispatcher = Dispatcher::new(config.local_user.clone(), ui, router);

        tokio::spawn(run_channel(
            config,
            connector,
            dispatcher,
            command_rx,
            snapshot.clone(),
        ));

        ChannelHandle { command_tx, snapshot }
    }
}

fn publish(snapshot: &ArcSwap<ChannelSnapshot>, state: ChannelState, reconnect_attempts: u32) {
    snapshot.store(Arc::new(ChannelSnapshot { state, reconnect_attempts }));
}

/// Why a driven connection ended.
enum LinkOutcome {
    /// Close was requested; do not redial.
    Intentional,
    /// The transport failed or the gateway hung up; redial.
    Lost,
}

async fn run_channel(
    config: ChannelConfig,
    connector: Arc<dyn Connector>,
    mut dispatcher: Dispatcher,
    mut command_rx: mpsc::Receiver<ChannelCommand>,
    snapshot: Arc<ArcSwap<ChannelSnapshot>>,
) {
    let mut attempts: u32 = 0;

    loop {
        publish(&snapshot, ChannelState::Connecting, attempts);

        match connector.connect(&config.gateway_url).await {
            Ok(connection) => {
                let connection_id = CONNECTION_SEQ.fetch_add(1, Ordering::Relaxed);
                info!(
                    component = "channel",
                    event = "channel.open",
                    connection_id,
                    url = %config.gateway_url,
                    "Notification channel open"
                );
                attempts = 0;
                publish(&snapshot, ChannelState::Open, 0);

                match drive_connection(
                    connection,
                    &mut dispatcher,
                    &mut command_rx,
                    config.keepalive_interval,
                    connection_id,
                )
                .await
                {
                    LinkOutcome::Intentional => {
                        info!(
                            component = "channel",
                            event = "channel.closed",
                            connection_id,
                            "Notification channel closed on request"
                        );
                        publish(&snapshot, ChannelState::ClosedIntentional, 0);
                        return;
                    }
                    LinkOutcome::Lost => {
                        warn!(
                            component = "channel",
                            event = "channel.lost",
                            connection_id,
                            "Notification channel lost"
                        );
                    }
                }
            }
            Err(err) => {
                warn!(
                    component = "channel",
                    event = "channel.dial_failed",
                    url = %config.gateway_url,
                    error = %err,
                    "Failed to dial gateway"
                );
            }
        }

        attempts += 1;
        let delay = reconnect_delay(attempts, config.base_delay, config.max_delay);
        publish(&snapshot, ChannelState::ClosedUnintentional, attempts);
        debug!(
            component = "channel",
            event = "channel.redial_scheduled",
            attempt = attempts,
            delay_ms = delay.as_millis() as u64,
            "Redial scheduled"
        );

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            command = command_rx.recv() => match command {
                Some(ChannelCommand::Close) | None => {
                    publish(&snapshot, ChannelState::ClosedIntentional, attempts);
                    return;
                }
            }
        }
    }
}

/// Drive one established connection until it ends. Keep-alive timing is
/// created here so timers never accumulate across reconnections.
async fn drive_connection(
    mut connection: Connection,
    dispatcher: &mut Dispatcher,
    command_rx: &mut mpsc::Receiver<ChannelCommand>,
    keepalive_interval: Duration,
    connection_id: u64,
) -> LinkOutcome {
    let mut keepalive = tokio::time::interval(keepalive_interval);
    // The first tick completes immediately; the socket just opened, so
    // swallow it and ping on the cadence only.
    keepalive.tick().await;

    loop {
        tokio::select! {
            frame = connection.stream.next_frame() => match frame {
                Some(Ok(text)) => dispatcher.handle_frame(&text),
                Some(Err(err)) => {
                    error!(
                        component = "channel",
                        event = "channel.transport_error",
                        connection_id,
                        error = %err,
                        "Transport error on notification channel"
                    );
                    return LinkOutcome::Lost;
                }
                None => {
                    debug!(
                        component = "channel",
                        event = "channel.remote_close",
                        connection_id,
                        "Gateway closed the connection"
                    );
                    return LinkOutcome::Lost;
                }
            },
            _ = keepalive.tick() => {
                if let Err(err) = connection.sink.send(ClientFrame::Ping.to_text()).await {
                    warn!(
                        component = "channel",
                        event = "channel.keepalive_failed",
                        connection_id,
                        error = %err,
                        "Keep-alive send failed"
                    );
                    return LinkOutcome::Lost;
                }
            }
            command = command_rx.recv() => match command {
                Some(ChannelCommand::Close) | None => {
                    if let Err(err) = connection.sink.close().await {
                        debug!(
                            component = "channel",
                            event = "channel.close_failed",
                            connection_id,
                            error = %err,
                            "Error closing socket"
                        );
                    }
                    return LinkOutcome::Intentional;
                }
            }
        }
    }
}
