//! Channel configuration.

use std::time::Duration;

/// Tunables for one [`crate::channel::EventChannel`].
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// WebSocket URL of the notification gateway.
    pub gateway_url: String,
    /// Username of the signed-in user; own events are suppressed.
    pub local_user: String,
    /// First reconnect delay; doubles per consecutive failure.
    pub base_delay: Duration,
    /// Reconnect delay cap.
    pub max_delay: Duration,
    /// Outbound keep-alive ping period.
    pub keepalive_interval: Duration,
    /// Status-update coalescing window.
    pub debounce_window: Duration,
}

impl ChannelConfig {
    pub fn new(gateway_url: impl Into<String>, local_user: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into(),
            local_user: local_user.into(),
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
            keepalive_interval: Duration::from_secs(30),
            debounce_window: Duration::from_millis(1000),
        }
    }

    /// Build from `COURTSIDE_GATEWAY_URL` and `COURTSIDE_USER`, falling back
    /// to a localhost gateway. Timing knobs keep their defaults.
    pub fn from_env() -> Self {
        let gateway_url = std::env::var("COURTSIDE_GATEWAY_URL")
            .unwrap_or_else(|_| "ws://127.0.0.1:8080/ws/notifications".into());
        let local_user = std::env::var("COURTSIDE_USER").unwrap_or_default();
        Self::new(gateway_url, local_user)
    }
}
