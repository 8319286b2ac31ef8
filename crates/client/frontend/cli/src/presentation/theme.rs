//! Ratatui styling for the terminal UI.

use client_frontend_core::MessageLevel;
use game_core::Color as PlayerColor;
use ratatui::style::{Color, Modifier, Style};

pub const PIP_MARKED: &str = "●";
pub const PIP_EMPTY: &str = "·";

/// Consistent color scheme and styling rules for the CLI.
#[derive(Clone, Copy, Debug, Default)]
pub struct RatatuiTheme;

impl RatatuiTheme {
    pub fn new() -> Self {
        Self
    }

    pub fn player(&self, color: PlayerColor) -> Style {
        match color {
            PlayerColor::Red => Style::default().fg(Color::LightRed),
            PlayerColor::Blue => Style::default().fg(Color::LightBlue),
        }
    }

    pub fn player_label(&self, color: PlayerColor) -> Style {
        self.player(color).add_modifier(Modifier::BOLD)
    }

    pub fn empty_pip(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }

    /// Not-yet-committed piece drawn over the board.
    pub fn pending(&self, base: Style) -> Style {
        base.bg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    /// Piece that was just placed.
    pub fn placed(&self, base: Style) -> Style {
        base.bg(Color::Green).add_modifier(Modifier::BOLD)
    }

    pub fn cursor(&self, base: Style) -> Style {
        base.add_modifier(Modifier::REVERSED)
    }

    /// Checkerboard background so adjacent cells stay distinguishable.
    pub fn cell_background(&self, row: usize, col: usize) -> Style {
        if (row + col) % 2 == 0 {
            Style::default().bg(Color::Black)
        } else {
            Style::default().bg(Color::Rgb(30, 30, 30))
        }
    }

    pub fn message(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Info => Style::default().fg(Color::White),
            MessageLevel::Warning => Style::default().fg(Color::Yellow),
            MessageLevel::Error => Style::default().fg(Color::LightRed),
        }
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    }
}
