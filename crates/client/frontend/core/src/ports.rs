//! Seams between the controllers and the outside world.
//!
//! The controllers never touch a terminal, a socket, or a clock directly.
//! They talk to a [`Presenter`] for output, an [`IntentSink`] for messages to
//! the remote authority, and a [`PlaybackScheduler`] for the autoplay timer.
//! All three are injected at construction, so a missing renderer is a type
//! error rather than a runtime check.
use std::time::Duration;

use game_core::{Cell, ClientIntent, Color, ErrorSeverity, GameSnapshot, Piece, Rotation};
use thiserror::Error;

use crate::message::{MessageEntry, MessageLevel, MessageLog};
use crate::replay::PlaybackStatus;

/// Identifies one placement animation; echoed back through
/// [`Session::animation_finished`](crate::Session::animation_finished).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(pub u64);

/// Identifies one autoplay timer; echoed back through
/// [`Session::playback_tick`](crate::Session::playback_tick).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Replay position and playback state as shown by a timeline widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineView {
    pub current_move: u32,
    pub total_moves: u32,
    pub status: PlaybackStatus,
    pub speed: f64,
}

/// Output side of the controllers.
///
/// Snapshots are passed by reference; a presenter that needs to keep one
/// clones it.
pub trait Presenter {
    /// Draws the board of `snapshot`, dropping any pending overlay.
    fn present(&mut self, snapshot: &GameSnapshot);

    /// Updates turn indicator, pools, and counters.
    fn present_hud(&mut self, snapshot: &GameSnapshot, selection: Option<usize>);

    /// Draws a not-yet-committed piece on top of the current board.
    fn present_pending_overlay(&mut self, piece: &Piece, cell: Cell, rotation: Rotation);

    /// Starts a placement animation. The frontend must report completion
    /// with the same `animation` id.
    fn animate_placement(&mut self, piece: &Piece, cell: Cell, animation: AnimationId);

    fn animate_combat(&mut self, attacker_roll: u32, defender_roll: u32);

    fn notify(&mut self, entry: &MessageEntry);

    fn present_victory(&mut self, winner: Color);

    fn present_timeline(&mut self, timeline: &TimelineView);
}

/// Failure to hand an intent to the remote link.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("remote link unavailable: {0}")]
pub struct SendError(pub String);

/// Outbound side of the controllers.
pub trait IntentSink {
    fn send(&mut self, intent: ClientIntent) -> Result<(), SendError>;
}

/// Local repeating timer used by replay autoplay.
pub trait PlaybackScheduler {
    /// Starts a repeating timer and returns its id.
    fn start(&mut self, period: Duration) -> TimerId;

    fn cancel(&mut self, timer: TimerId);
}

/// Borrowed view over the seams, handed to a controller for one operation.
pub struct Ports<'a> {
    pub presenter: &'a mut dyn Presenter,
    pub remote: &'a mut dyn IntentSink,
    pub scheduler: &'a mut dyn PlaybackScheduler,
    pub messages: &'a mut MessageLog,
}

impl Ports<'_> {
    /// Sends `intent`, reporting a failure to the user. Returns whether the
    /// intent left the client; callers transition only on `true`.
    pub fn send(&mut self, intent: ClientIntent) -> bool {
        match self.remote.send(intent) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("dropping intent: {err}");
                self.notify(MessageEntry::for_error(
                    format!("Not connected to the server ({err})"),
                    ErrorSeverity::Transport,
                ));
                false
            }
        }
    }

    pub fn notify(&mut self, entry: MessageEntry) {
        self.presenter.notify(&entry);
        self.messages.push(entry);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notify(MessageEntry::info(text));
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.notify(MessageEntry::new(text, MessageLevel::Warning));
    }

    pub fn error(&mut self, text: impl Into<String>, severity: ErrorSeverity) {
        self.notify(MessageEntry::for_error(text, severity));
    }
}
