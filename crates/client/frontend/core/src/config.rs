//! Frontend configuration structures and loaders.
//!
//! This module contains interaction settings shared across frontend
//! implementations (CLI, GUI, etc.).

use std::env;
use std::time::Duration;

/// Frontend-specific configuration.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub messages: MessageConfig,
    pub replay: ReplayConfig,
}

impl FrontendConfig {
    pub const fn new(messages: MessageConfig, replay: ReplayConfig) -> Self {
        Self { messages, replay }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MESSAGE_CAPACITY` - Notification log capacity (default: 20)
    /// - `REPLAY_BASE_INTERVAL_MS` - Autoplay interval at speed 1.0 (default: 1000)
    /// - `REPLAY_SPEED` - Initial playback speed multiplier (default: 1.0)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }

        if let Some(ms) = read_env::<u64>("REPLAY_BASE_INTERVAL_MS") {
            config.replay.base_interval =
                Duration::from_millis(ms.max(1)).min(ReplayConfig::MAX_PERIOD);
        }
        if let Some(speed) = read_env::<f64>("REPLAY_SPEED")
            && ReplayConfig::accepts_speed(speed)
        {
            config.replay.speed = speed;
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self { capacity: 20 }
    }
}

#[derive(Clone, Debug)]
pub struct ReplayConfig {
    /// Autoplay period at speed 1.0; the effective period is `base_interval / speed`.
    pub base_interval: Duration,
    pub speed: f64,
}

impl ReplayConfig {
    /// Slowest accepted playback multiplier.
    pub const MIN_SPEED: f64 = 0.01;
    /// Longest autoplay period, whatever the speed.
    pub const MAX_PERIOD: Duration = Duration::from_secs(3600);

    pub fn accepts_speed(speed: f64) -> bool {
        speed.is_finite() && speed >= Self::MIN_SPEED
    }

    /// `base_interval / speed`, capped at [`Self::MAX_PERIOD`].
    pub fn period_at(base_interval: Duration, speed: f64) -> Duration {
        Duration::try_from_secs_f64(base_interval.as_secs_f64() / speed)
            .map_or(Self::MAX_PERIOD, |period| period.min(Self::MAX_PERIOD))
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_millis(1000),
            speed: 1.0,
        }
    }
}

pub(crate) fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}


#[cfg(test)]
mod replay_tests {
    use super::*;

    #[test]
    fn speed_floor_rejects_vanishing_multipliers() {
        assert!(ReplayConfig::accepts_speed(ReplayConfig::MIN_SPEED));
        assert!(ReplayConfig::accepts_speed(8.0));
        assert!(!ReplayConfig::accepts_speed(1e-20));
        assert!(!ReplayConfig::accepts_speed(0.0));
        assert!(!ReplayConfig::accepts_speed(f64::INFINITY));
    }

    #[test]
    fn period_is_capped_instead_of_overflowing() {
        let base = Duration::from_millis(1000);
        assert_eq!(ReplayConfig::period_at(base, 4.0), Duration::from_millis(250));
        assert_eq!(ReplayConfig::period_at(base, 1e-20), ReplayConfig::MAX_PERIOD);
        assert_eq!(
            ReplayConfig::period_at(Duration::MAX, 1.0),
            ReplayConfig::MAX_PERIOD
        );
    }
}
