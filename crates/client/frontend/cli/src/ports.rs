//! Terminal implementations of the session's outbound seams.
use std::time::Duration;

use client_frontend_core::{IntentSink, PlaybackScheduler, SendError, TimerId};
use client_remote::RemoteHandle;
use game_core::ClientIntent;
use tokio::sync::mpsc;

/// Forwards intents to the remote link without blocking the UI.
pub struct LinkSink {
    handle: RemoteHandle,
}

impl LinkSink {
    pub fn new(handle: RemoteHandle) -> Self {
        Self { handle }
    }
}

impl IntentSink for LinkSink {
    fn send(&mut self, intent: ClientIntent) -> Result<(), SendError> {
        self.handle
            .try_send(intent)
            .map_err(|err| SendError(err.to_string()))
    }
}

/// Instruction for the event loop's autoplay interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    Start { timer: TimerId, period: Duration },
    Cancel(TimerId),
}

/// Hands timer requests to the event loop, which owns the one live
/// `tokio::time::Interval`.
pub struct CliScheduler {
    next_id: u64,
    commands: mpsc::UnboundedSender<TimerCommand>,
}

impl CliScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerCommand>) {
        let (commands, rx) = mpsc::unbounded_channel();
        (
            Self {
                next_id: 0,
                commands,
            },
            rx,
        )
    }

    fn submit(&self, command: TimerCommand) {
        if self.commands.send(command).is_err() {
            tracing::debug!(?command, "event loop gone, timer command dropped");
        }
    }
}

impl PlaybackScheduler for CliScheduler {
    fn start(&mut self, period: Duration) -> TimerId {
        self.next_id += 1;
        let timer = TimerId(self.next_id);
        self.submit(TimerCommand::Start { timer, period });
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        self.submit(TimerCommand::Cancel(timer));
    }
}
