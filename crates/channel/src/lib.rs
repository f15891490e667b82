//! Courtside notification channel
//!
//! Keeps one persistent WebSocket to the gateway for the lifetime of a
//! sign-in and turns its pushed events into UI refreshes, navigation, and
//! toasts. Reconnects with exponential backoff, suppresses self-originated
//! and keep-alive traffic, and coalesces status-update bursts.

pub mod channel;
pub mod config;
pub mod dispatch;
pub mod invitations;
pub mod logging;
pub mod notify;
pub mod router;
pub mod screen;
pub mod transport;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use channel::{ChannelHandle, ChannelSnapshot, ChannelState, EventChannel};
pub use config::ChannelConfig;
pub use screen::{ActiveScreen, Screen};
pub use transport::{Connector, WsConnector};
pub use ui::Collaborators;
