//! Board widget: the grid with pip glyphs, pending overlay, and cursor.
//!
//! Each cell is drawn as its 3×3 pip pattern when the panel is large enough,
//! otherwise as a single power digit.

use client_frontend_core::ViewModel;
use game_core::{Board, Cell, PIP_GRID, Piece};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    presentation::theme::{PIP_EMPTY, PIP_MARKED, RatatuiTheme},
    state::{AppMode, AppState},
};

/// Characters per cell in detailed mode: one pad on each side of the pips.
const CELL_WIDTH: u16 = PIP_GRID as u16 + 2;
/// Row label column.
const LABEL_WIDTH: u16 = 3;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    view_model: &ViewModel,
    app_state: &AppState,
    theme: &RatatuiTheme,
) {
    let title = match view_model.winner {
        Some(winner) => format!("Board - {} wins", winner.label()),
        None => "Board".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let Some(snapshot) = view_model.board.as_ref() else {
        let hint = Paragraph::new(Line::styled("Waiting for the server...", theme.muted()))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let inner = block.inner(area);
    let painter = CellPainter {
        board: snapshot.board(),
        view_model,
        cursor: (app_state.mode == AppMode::Game).then(|| app_state.cursor.cell()),
        theme,
    };

    let lines = if painter.fits_detailed(inner) {
        painter.detailed_lines()
    } else {
        painter.compact_lines()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

struct CellPainter<'a> {
    board: &'a Board,
    view_model: &'a ViewModel,
    cursor: Option<Cell>,
    theme: &'a RatatuiTheme,
}

impl<'a> CellPainter<'a> {
    fn fits_detailed(&self, inner: Rect) -> bool {
        let width = LABEL_WIDTH + CELL_WIDTH * self.board.width() as u16;
        let height = 1 + PIP_GRID as u16 * self.board.height() as u16;
        inner.width >= width && inner.height >= height
    }

    /// Piece shown at `cell`: the pending overlay wins over the board.
    fn piece_at(&self, cell: Cell) -> Option<&'a Piece> {
        match self.view_model.overlay.as_ref() {
            Some(overlay) if overlay.cell == cell => Some(&overlay.piece),
            _ => self.board.piece_at(cell),
        }
    }

    fn cell_style(&self, cell: Cell, base: Style) -> Style {
        let mut style = self.theme.cell_background(cell.row, cell.col).patch(base);
        if self
            .view_model
            .overlay
            .as_ref()
            .is_some_and(|overlay| overlay.cell == cell)
        {
            style = self.theme.pending(style);
        } else if self
            .view_model
            .animation
            .as_ref()
            .is_some_and(|animation| animation.cell == cell)
        {
            style = self.theme.placed(style);
        }
        if self.cursor == Some(cell) {
            style = self.theme.cursor(style);
        }
        style
    }

    fn column_header(&self, width: usize) -> Line<'static> {
        let mut header = " ".repeat(LABEL_WIDTH as usize);
        for col in 0..self.board.width() {
            header.push_str(&format!("{col:^width$}"));
        }
        Line::styled(header, self.theme.muted())
    }

    fn detailed_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![self.column_header(CELL_WIDTH as usize)];

        for row in 0..self.board.height() {
            for pip_row in 0..PIP_GRID {
                let label = if pip_row == PIP_GRID / 2 {
                    format!("{row:>2} ")
                } else {
                    " ".repeat(LABEL_WIDTH as usize)
                };
                let mut spans = vec![Span::styled(label, self.theme.muted())];

                for col in 0..self.board.width() {
                    let cell = Cell::new(row, col);
                    spans.push(Span::styled(" ", self.cell_style(cell, Style::default())));
                    for pip_col in 0..PIP_GRID {
                        spans.push(self.pip_span(cell, pip_row, pip_col));
                    }
                    spans.push(Span::styled(" ", self.cell_style(cell, Style::default())));
                }
                lines.push(Line::from(spans));
            }
        }

        lines
    }

    fn pip_span(&self, cell: Cell, pip_row: usize, pip_col: usize) -> Span<'static> {
        let centre = pip_row == PIP_GRID / 2 && pip_col == PIP_GRID / 2;
        match self.piece_at(cell) {
            Some(piece) => match piece.pips.0[pip_row][pip_col] {
                Some(owner) => Span::styled(PIP_MARKED, self.cell_style(cell, self.theme.player(owner))),
                None => Span::styled(PIP_EMPTY, self.cell_style(cell, self.theme.player(piece.color))),
            },
            None if centre => Span::styled(PIP_EMPTY, self.cell_style(cell, self.theme.empty_pip())),
            None => Span::styled(" ", self.cell_style(cell, Style::default())),
        }
    }

    fn compact_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![self.column_header(3)];

        for row in 0..self.board.height() {
            let mut spans = vec![Span::styled(format!("{row:>2} "), self.theme.muted())];
            for col in 0..self.board.width() {
                let cell = Cell::new(row, col);
                let span = match self.piece_at(cell) {
                    Some(piece) => Span::styled(
                        format!(" {} ", piece.power),
                        self.cell_style(cell, self.theme.player_label(piece.color)),
                    ),
                    None => Span::styled(
                        format!(" {PIP_EMPTY} "),
                        self.cell_style(cell, self.theme.empty_pip()),
                    ),
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }

        lines
    }
}
