//! Input processing for the CLI client.
//!
//! This module owns the keyboard-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::state::AppMode;

/// Speed multipliers cycled with `+` / `-`.
pub const SPEED_STEPS: [f64; 6] = [0.25, 0.5, 1.0, 2.0, 4.0, 8.0];

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Switch between game and replay mode.
    ToggleMode,
    MoveCursor { d_row: i32, d_col: i32 },
    /// Propose at the cursor, rotate there, or re-propose elsewhere.
    Activate,
    Confirm,
    /// Cancel a pending placement; also dismisses a blocking notice.
    Cancel,
    /// Select the nth pool group (0-based).
    SelectGroup(usize),
    NewGame,
    StepForward,
    StepBack,
    FirstMove,
    LastMove,
    TogglePlay,
    SpeedUp,
    SpeedDown,
    LoadReplay,
    /// No meaningful command was produced.
    None,
}

/// Translates `KeyEvent`s into commands for the current mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Converts a raw key event into a higher-level command.
    pub fn handle_key(&self, key: KeyEvent, mode: AppMode) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        match key.code {
            KeyCode::Tab => return KeyAction::ToggleMode,
            KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Quit,
            _ => {}
        }

        match mode {
            AppMode::Game => self.game_key(key.code),
            AppMode::Replay => self.replay_key(key.code),
        }
    }

    fn game_key(&self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Up => KeyAction::MoveCursor { d_row: -1, d_col: 0 },
            KeyCode::Down => KeyAction::MoveCursor { d_row: 1, d_col: 0 },
            KeyCode::Left => KeyAction::MoveCursor { d_row: 0, d_col: -1 },
            KeyCode::Right => KeyAction::MoveCursor { d_row: 0, d_col: 1 },
            KeyCode::Enter => KeyAction::Activate,
            KeyCode::Esc => KeyAction::Cancel,
            KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
                'c' => KeyAction::Confirm,
                'n' => KeyAction::NewGame,
                digit @ '1'..='9' => {
                    KeyAction::SelectGroup(usize::from(digit as u8 - b'1'))
                }
                _ => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }

    fn replay_key(&self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Right => KeyAction::StepForward,
            KeyCode::Left => KeyAction::StepBack,
            KeyCode::Home => KeyAction::FirstMove,
            KeyCode::End => KeyAction::LastMove,
            KeyCode::Esc => KeyAction::Cancel,
            KeyCode::Char(' ') => KeyAction::TogglePlay,
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::SpeedUp,
            KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::SpeedDown,
            KeyCode::Char('o') | KeyCode::Char('O') => KeyAction::LoadReplay,
            _ => KeyAction::None,
        }
    }
}

/// Next speed step above or below `current`, if any.
pub fn next_speed(current: f64, faster: bool) -> Option<f64> {
    if faster {
        SPEED_STEPS.iter().copied().find(|step| *step > current)
    } else {
        SPEED_STEPS.iter().rev().copied().find(|step| *step < current)
    }
}
