//! Connection settings for the remote authority.
use std::env;
use std::time::Duration;

use url::Url;

const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:5000/ws";

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    /// WebSocket endpoint; always a parsed [`Url`] rendered back to text.
    pub url: String,
    /// Outbound intent queue size.
    pub intent_buffer: usize,
    /// Capacity of the link event broadcast.
    pub event_buffer: usize,
    pub reconnect_delay: Duration,
    pub reconnect_max_delay: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            intent_buffer: 32,
            event_buffer: 256,
            reconnect_delay: Duration::from_millis(500),
            reconnect_max_delay: Duration::from_millis(8000),
        }
    }
}

impl RemoteConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BORDERLINE_SERVER_URL` - WebSocket endpoint (default: ws://127.0.0.1:5000/ws)
    /// - `INTENT_BUFFER` - Outbound queue size (default: 32)
    /// - `EVENT_BUFFER` - Link event buffer (default: 256)
    /// - `RECONNECT_DELAY_MS` - First retry delay (default: 500)
    /// - `RECONNECT_MAX_DELAY_MS` - Retry delay ceiling (default: 8000)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = read_env::<Url>("BORDERLINE_SERVER_URL") {
            config.url = url.into();
        }
        if let Some(capacity) = read_env::<usize>("INTENT_BUFFER") {
            config.intent_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }
        if let Some(ms) = read_env::<u64>("RECONNECT_DELAY_MS") {
            config.reconnect_delay = Duration::from_millis(ms.max(1));
        }
        if let Some(ms) = read_env::<u64>("RECONNECT_MAX_DELAY_MS") {
            config.reconnect_max_delay = Duration::from_millis(ms);
        }
        config.reconnect_max_delay = config.reconnect_max_delay.max(config.reconnect_delay);

        config
    }

    /// Delay before the retry that follows one waiting `current`.
    pub(crate) fn next_delay(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.reconnect_max_delay)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
