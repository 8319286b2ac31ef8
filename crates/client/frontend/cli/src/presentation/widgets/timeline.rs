//! Replay timeline: position gauge, playback state, and speed.

use client_frontend_core::{PlaybackStatus, ReplayController};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    replay: &ReplayController,
    theme: &RatatuiTheme,
) {
    let block = Block::default().borders(Borders::ALL).title("Replay");

    if replay.is_loading() {
        let paragraph = Paragraph::new("Loading replay...")
            .style(theme.muted())
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let timeline = replay.timeline();

    let state = match timeline.status {
        PlaybackStatus::Unloaded => {
            let paragraph = Paragraph::new("No replay loaded - press o to open")
                .style(theme.muted())
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
        PlaybackStatus::Paused => "paused",
        PlaybackStatus::Playing => "playing",
    };

    let ratio = if timeline.total_moves == 0 {
        0.0
    } else {
        f64::from(timeline.current_move) / f64::from(timeline.total_moves)
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!(
            "Move {} / {}  {}  {}x",
            timeline.current_move, timeline.total_moves, state, timeline.speed
        ));

    frame.render_widget(gauge, area);
}
