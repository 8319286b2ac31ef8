//! Event loop orchestrating link events, user input, timers, and rendering.
//!
//! The loop owns the [`Session`] and is the only place that mutates it, so
//! the controllers never see concurrent calls. Every branch of the select
//! feeds the session and returns; the frame is redrawn afterwards when the
//! view model reports a dirty scope.

use anyhow::Result;
use client_frontend_core::{AnimationId, Session, TimerId, ViewModel};
use client_remote::{LinkEvent, RemoteHandle};
use tokio::{
    sync::{broadcast, mpsc},
    time::{self, Duration, Interval},
};

use crate::{
    config::CliConfig,
    input::InputHandler,
    ports::{CliScheduler, LinkSink, TimerCommand},
    presentation::terminal::Tui,
    state::AppState,
};

const FRAME_INTERVAL_MS: u64 = 16;

pub type CliSession = Session<ViewModel, LinkSink, CliScheduler>;

/// Active autoplay interval, tagged with the id the session handed out.
pub(crate) type Autoplay = Option<(TimerId, Interval)>;

pub struct EventLoop {
    pub(crate) session: CliSession,
    pub(crate) handle: RemoteHandle,
    pub(crate) link_events: broadcast::Receiver<LinkEvent>,
    pub(crate) timer_rx: mpsc::UnboundedReceiver<TimerCommand>,
    pub(crate) animation_tx: mpsc::UnboundedSender<AnimationId>,
    pub(crate) animation_rx: mpsc::UnboundedReceiver<AnimationId>,
    pub(crate) input: InputHandler,
    pub(crate) app_state: AppState,
    pub(crate) cli_config: CliConfig,
}

impl EventLoop {
    pub fn new(
        session: CliSession,
        handle: RemoteHandle,
        timer_rx: mpsc::UnboundedReceiver<TimerCommand>,
        cli_config: CliConfig,
    ) -> Self {
        let link_events = handle.subscribe();
        let (animation_tx, animation_rx) = mpsc::unbounded_channel();

        Self {
            session,
            handle,
            link_events,
            timer_rx,
            animation_tx,
            animation_rx,
            input: InputHandler::new(),
            app_state: AppState::new(),
            cli_config,
        }
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<CliSession> {
        // The first Connected may have fired before we subscribed.
        if self.handle.is_connected() {
            self.on_first_connection();
        }
        self.render(terminal)?;

        let mut autoplay: Autoplay = None;
        let mut frame = time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
        frame.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                result = self.link_events.recv() => {
                    self.handle_link_event(result);
                }
                Some(command) = self.timer_rx.recv() => {
                    apply_timer_command(&mut autoplay, command);
                }
                timer = next_tick(&mut autoplay) => {
                    self.session.playback_tick(timer);
                }
                Some(animation) = self.animation_rx.recv() => {
                    self.finish_animation(animation);
                }
                _ = frame.tick() => {
                    self.handle_input_tick()?;
                }
            }

            if self.app_state.should_quit {
                break;
            }

            self.schedule_animations();
            self.render_if_dirty(terminal)?;
        }

        Ok(self.session)
    }
}

/// Keeps at most one live interval. A start replaces whatever was running;
/// a cancel for a timer that is no longer current is ignored.
pub(crate) fn apply_timer_command(autoplay: &mut Autoplay, command: TimerCommand) {
    match command {
        TimerCommand::Start { timer, period } => {
            // `interval_at` rejects a zero period.
            let period = period.max(Duration::from_millis(1));
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
            *autoplay = Some((timer, interval));
        }
        TimerCommand::Cancel(timer) => {
            if autoplay.as_ref().is_some_and(|(current, _)| *current == timer) {
                *autoplay = None;
            }
        }
    }
}

async fn next_tick(autoplay: &mut Autoplay) -> TimerId {
    match autoplay {
        Some((timer, interval)) => {
            interval.tick().await;
            *timer
        }
        None => std::future::pending().await,
    }
}
