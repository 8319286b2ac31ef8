//! Keyboard input handling.

use anyhow::Result;
use client_frontend_core::{
    EventConsumer, MessageEntry, MessageLevel, Presenter, ReplaySource, UpdateScope,
};
use crossterm::event::{self as term_event, Event as TermEvent, KeyEvent};
use game_core::group_pool;
use tokio::time::Duration;

use super::super::EventLoop;
use crate::{
    input::{KeyAction, next_speed},
    state::AppMode,
};

impl EventLoop {
    /// Poll for keyboard input without blocking the loop.
    pub(in crate::event) fn handle_input_tick(&mut self) -> Result<()> {
        while term_event::poll(Duration::from_millis(0))? {
            match term_event::read()? {
                TermEvent::Key(key) => self.handle_key_press(key),
                TermEvent::Resize(_, _) => self.session.presenter_mut().mark(UpdateScope::ALL),
                _ => {}
            }
            if self.app_state.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub(in crate::event) fn handle_key_press(&mut self, key: KeyEvent) {
        let action = self.input.handle_key(key, self.app_state.mode);
        if action != KeyAction::None {
            tracing::debug!(?action, mode = self.app_state.mode.label(), "key");
        }

        match action {
            KeyAction::Quit => self.app_state.should_quit = true,
            KeyAction::ToggleMode => {
                self.app_state.toggle_mode();
                self.session.presenter_mut().mark(UpdateScope::ALL);
            }
            KeyAction::MoveCursor { d_row, d_col } => self.move_cursor(d_row, d_col),
            KeyAction::Activate => {
                let cursor = self.app_state.cursor;
                self.session.click_cell(cursor.row as i64, cursor.col as i64);
            }
            KeyAction::Confirm => self.session.confirm(),
            KeyAction::Cancel => self.dismiss_or_cancel(),
            KeyAction::SelectGroup(group) => self.select_group(group),
            KeyAction::NewGame => self.session.start_game(self.cli_config.game.mode),
            KeyAction::StepForward => self.session.step_forward(),
            KeyAction::StepBack => self.session.step_back(),
            KeyAction::FirstMove => self.session.first_move(),
            KeyAction::LastMove => self.session.last_move(),
            KeyAction::TogglePlay => self.session.toggle_play(),
            KeyAction::SpeedUp | KeyAction::SpeedDown => {
                let faster = action == KeyAction::SpeedUp;
                match next_speed(self.session.replay().speed(), faster) {
                    Some(speed) => self.session.set_speed(speed),
                    None => self.local_notice("Playback speed already at its limit"),
                }
            }
            KeyAction::LoadReplay => self.load_replay(),
            KeyAction::None => {}
        }
    }

    fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let Some(snapshot) = self.session.presenter().board.as_ref() else {
            return;
        };
        let board = snapshot.board();
        self.app_state
            .cursor
            .move_by(d_row, d_col, board.width(), board.height());
        self.session.presenter_mut().mark(UpdateScope::BOARD);
    }

    /// `Esc` first clears a blocking notice or combat banner; only then does
    /// it cancel the pending placement.
    fn dismiss_or_cancel(&mut self) {
        let view = self.session.presenter();
        if view.blocking.is_some() || view.combat.is_some() {
            self.session.presenter_mut().acknowledge();
            return;
        }
        if self.app_state.mode == AppMode::Game {
            self.session.cancel();
        }
    }

    /// Number keys pick a pool group of the player to move; the group's
    /// first piece is the one submitted.
    fn select_group(&mut self, group: usize) {
        let Some(hud) = self.session.presenter().hud.as_ref() else {
            return;
        };
        let color = hud.current_player();
        let index = group_pool(hud.snapshot.pool(color))
            .get(group)
            .map(|group| group.first_index());

        match index {
            Some(index) => self.session.select_piece(index, color),
            None => self.local_notice(format!("{} has no piece group {}", color.label(), group + 1)),
        }
    }

    fn load_replay(&mut self) {
        match self.cli_config.game.replay_file.clone() {
            Some(path) => self.session.load_replay(ReplaySource::File(path)),
            None => self.local_notice("No replay file: pass a path or set REPLAY_FILE"),
        }
    }

    /// Input feedback that never involves the remote authority.
    fn local_notice(&mut self, text: impl Into<String>) {
        let entry = MessageEntry::new(text, MessageLevel::Warning);
        self.session.presenter_mut().notify(&entry);
        self.session.message_log_mut().push(entry);
    }
}
