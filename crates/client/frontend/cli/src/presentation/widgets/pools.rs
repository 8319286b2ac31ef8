//! Pool widget: each color's unplaced pieces, grouped by pip pattern.
//!
//! Groups of the player to move are numbered; pressing the number selects
//! the group's first piece.

use client_frontend_core::{HudView, ViewModel};
use game_core::{Color, Piece, group_pool};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme::{PIP_EMPTY, PIP_MARKED, RatatuiTheme};

/// Number keys available for selection.
const SELECTABLE_GROUPS: usize = 9;

pub fn render(frame: &mut Frame, area: Rect, view_model: &ViewModel, theme: &RatatuiTheme) {
    let block = Block::default().borders(Borders::ALL).title("Pools");

    let lines = match view_model.hud.as_ref() {
        Some(hud) => Color::ALL
            .into_iter()
            .flat_map(|color| pool_lines(hud, color, theme))
            .collect(),
        None => vec![Line::styled("-", theme.muted())],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn pool_lines(hud: &HudView, color: Color, theme: &RatatuiTheme) -> Vec<Line<'static>> {
    let to_move = hud.current_player() == color;
    let pool = hud.snapshot.pool(color);

    let marker = if to_move { "▶ " } else { "  " };
    let mut lines = vec![Line::from(vec![
        Span::styled(marker, theme.accent()),
        Span::styled(color.label(), theme.player_label(color)),
        Span::styled(format!(" ({} left)", hud.remaining(color)), theme.muted()),
    ])];

    for (position, group) in group_pool(pool).into_iter().enumerate() {
        let key = if to_move && position < SELECTABLE_GROUPS {
            format!("[{}]", position + 1)
        } else {
            "   ".to_string()
        };
        let selected = to_move
            && hud
                .selection
                .is_some_and(|selection| group.contains(selection));

        let mut spans = vec![Span::raw(format!("  {key} "))];
        spans.extend(pip_signature(group.piece, theme));
        spans.push(Span::raw(format!(
            " x{} P{}",
            group.count(),
            group.piece.power
        )));

        let line = Line::from(spans);
        lines.push(if selected {
            line.style(theme.selected())
        } else {
            line
        });
    }

    lines
}

/// The 3×3 pattern on one line, rows separated by `|`.
fn pip_signature(piece: &Piece, theme: &RatatuiTheme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (index, row) in piece.pips.rows().enumerate() {
        if index > 0 {
            spans.push(Span::styled("|", theme.muted()));
        }
        for pip in row {
            spans.push(match pip {
                Some(owner) => Span::styled(PIP_MARKED, theme.player(*owner)),
                None => Span::styled(PIP_EMPTY, theme.empty_pip()),
            });
        }
    }
    spans
}
