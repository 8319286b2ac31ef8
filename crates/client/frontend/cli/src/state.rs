//! Application state for mode management and the board cursor.

use game_core::Cell;

/// Top-level application mode determining input handling and UI layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppMode {
    /// Live game: place and rotate pieces.
    #[default]
    Game,
    /// Replay timeline: step, seek, autoplay.
    Replay,
}

impl AppMode {
    pub fn toggled(self) -> Self {
        match self {
            AppMode::Game => AppMode::Replay,
            AppMode::Replay => AppMode::Game,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AppMode::Game => "GAME",
            AppMode::Replay => "REPLAY",
        }
    }
}

/// Cell cursor moved with the arrow keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorState {
    pub row: usize,
    pub col: usize,
}

impl CursorState {
    /// Moves the cursor by the given delta, clamped to the board.
    pub fn move_by(&mut self, d_row: i32, d_col: i32, width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        self.row = step(self.row, d_row, height);
        self.col = step(self.col, d_col, width);
    }

    /// Pulls the cursor back inside a (possibly smaller) board.
    pub fn clamp_to(&mut self, width: usize, height: usize) {
        self.row = self.row.min(height.saturating_sub(1));
        self.col = self.col.min(width.saturating_sub(1));
    }

    pub fn cell(self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

fn step(value: usize, delta: i32, len: usize) -> usize {
    let max = len.saturating_sub(1);
    let moved = i64::try_from(value).unwrap_or(i64::MAX) + i64::from(delta);
    usize::try_from(moved.max(0)).map_or(max, |moved| moved.min(max))
}

/// Mutable application state tracking current mode and cursor.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub mode: AppMode,
    pub cursor: CursorState,
    /// Current link status, shown in the header.
    pub connected: bool,
    /// Set once the first connection has been synchronised.
    pub synced_once: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_on_board() {
        let mut cursor = CursorState::default();
        cursor.move_by(-1, -1, 6, 8);
        assert_eq!(cursor, CursorState { row: 0, col: 0 });

        cursor.move_by(20, 20, 6, 8);
        assert_eq!(cursor, CursorState { row: 7, col: 5 });

        cursor.move_by(-2, 0, 6, 8);
        assert_eq!(cursor.cell(), Cell::new(5, 5));
    }

    #[test]
    fn clamp_after_board_shrinks() {
        let mut cursor = CursorState { row: 7, col: 5 };
        cursor.clamp_to(4, 4);
        assert_eq!(cursor, CursorState { row: 3, col: 3 });
    }

    #[test]
    fn tab_toggles_mode() {
        let mut state = AppState::new();
        state.toggle_mode();
        assert_eq!(state.mode, AppMode::Replay);
        state.toggle_mode();
        assert_eq!(state.mode, AppMode::Game);
    }
}
