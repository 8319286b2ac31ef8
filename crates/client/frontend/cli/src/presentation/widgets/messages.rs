//! Notification log and the blocking notice popup.

use client_frontend_core::{MessageEntry, MessageLog};
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::presentation::theme::RatatuiTheme;

pub fn render(frame: &mut Frame, area: Rect, messages: &MessageLog, theme: &RatatuiTheme) {
    let visible = usize::from(area.height.saturating_sub(2));
    // `recent` yields newest first; draw oldest at the top.
    let mut lines: Vec<Line> = messages
        .recent(visible)
        .map(|entry| Line::styled(entry.text.clone(), theme.message(entry.level)))
        .collect();
    lines.reverse();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Messages"));
    frame.render_widget(paragraph, area);
}

/// Notice that stays on screen until the player presses `Esc`.
pub fn render_blocking(frame: &mut Frame, area: Rect, entry: &MessageEntry, theme: &RatatuiTheme) {
    let paragraph = Paragraph::new(Line::styled(entry.text.clone(), theme.message(entry.level)))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Notice (Esc to dismiss) "),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
