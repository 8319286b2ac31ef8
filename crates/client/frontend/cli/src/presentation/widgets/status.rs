//! Status panel: last combat rolls and the winner.

use client_frontend_core::ViewModel;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

pub fn render(frame: &mut Frame, area: Rect, view_model: &ViewModel, theme: &RatatuiTheme) {
    let mut lines = Vec::new();

    if let Some(winner) = view_model.winner {
        lines.push(Line::from(vec![
            Span::styled("GAME OVER ", theme.accent()),
            Span::styled(format!("{} wins!", winner.label()), theme.player_label(winner)),
        ]));
    }

    match view_model.combat {
        Some(rolls) => lines.push(Line::raw(format!(
            "Combat: {} vs {}",
            rolls.attacker, rolls.defender
        ))),
        None if lines.is_empty() => lines.push(Line::styled("No combat", theme.muted())),
        None => {}
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(paragraph, area);
}
