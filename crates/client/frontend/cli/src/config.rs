//! CLI-specific configuration for the terminal UI.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use game_core::GameMode;

/// CLI terminal UI configuration.
///
/// This contains settings specific to the terminal interface,
/// separate from cross-frontend client configuration.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub ui: UiConfig,
    pub game: GameConfig,
    /// Log directory name; a timestamp is used when unset.
    pub session_id: Option<String>,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLI_MESSAGE_PANEL_HEIGHT` - Message panel height in lines (default: 8, min: 3)
    /// - `CLI_ANIMATION_MS` - Placement animation length (default: 350)
    /// - `GAME_MODE` - `human_vs_human` | `human_vs_ai` | `ai_vs_ai`
    /// - `GAME_SESSION_ID` - Log directory name
    /// - `REPLAY_FILE` - Move log opened with `o` in replay mode
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(height) = read_env::<u16>("CLI_MESSAGE_PANEL_HEIGHT") {
            config.ui.message_panel_height = height.max(3);
        }
        if let Some(ms) = read_env::<u64>("CLI_ANIMATION_MS") {
            config.ui.animation = Duration::from_millis(ms);
        }

        if let Ok(raw) = env::var("GAME_MODE") {
            match raw.trim().parse::<GameMode>() {
                Ok(mode) => config.game.mode = mode,
                Err(_) => tracing::warn!(%raw, "unknown GAME_MODE, using default"),
            }
        }

        config.session_id = env::var("GAME_SESSION_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());
        config.game.replay_file = env::var_os("REPLAY_FILE").map(PathBuf::from);

        config
    }

    /// Overrides the replay file, e.g. from a command-line argument.
    pub fn with_replay_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.game.replay_file = Some(path.into());
        self
    }
}

/// UI layout and display configuration.
#[derive(Clone, Debug)]
pub struct UiConfig {
    /// Height of message panel in lines (including borders).
    pub message_panel_height: u16,
    /// How long a freshly placed piece stays highlighted.
    pub animation: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_panel_height: 8,
            animation: Duration::from_millis(350),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GameConfig {
    /// Mode sent with `n` (new game).
    pub mode: GameMode,
    pub replay_file: Option<PathBuf>,
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
