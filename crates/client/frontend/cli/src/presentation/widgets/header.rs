//! Header widget displaying turn information, link status, and mode.

use client_frontend_core::ViewModel;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{presentation::theme::RatatuiTheme, state::AppState};

/// Render the header panel with turn info, link status, and current mode.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    view_model: &ViewModel,
    app_state: &AppState,
    theme: &RatatuiTheme,
) {
    let mut spans = Vec::new();

    match view_model.hud.as_ref() {
        Some(hud) => {
            spans.push(Span::raw("Turn: "));
            spans.push(Span::styled(
                hud.turn_count().to_string(),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::raw(" | To move: "));
            spans.push(Span::styled(
                hud.current_player().label(),
                theme.player_label(hud.current_player()),
            ));
        }
        None => spans.push(Span::styled("No game", theme.muted())),
    }

    if let Some(overlay) = view_model.overlay.as_ref() {
        spans.push(Span::raw(" | Pending: "));
        spans.push(Span::styled(
            format!("{} {}", overlay.cell, overlay.rotation),
            theme.pending(Style::default().fg(Color::Black)),
        ));
    }

    spans.push(Span::raw(" | "));
    if app_state.connected {
        spans.push(Span::styled("online", Style::default().fg(Color::LightGreen)));
    } else {
        spans.push(Span::styled("offline", Style::default().fg(Color::LightRed)));
    }

    spans.push(Span::styled(
        format!(" [{}]", app_state.mode.label()),
        theme.accent(),
    ));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Borderline"));

    frame.render_widget(paragraph, area);
}
