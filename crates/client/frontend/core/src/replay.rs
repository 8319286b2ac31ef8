//! Replay timeline navigation and autoplay.
//!
//! Every position change is a round trip: the controller sends a navigation
//! intent and moves only when the remote authority answers with the
//! snapshot for that move. At most one navigation is outstanding at a time,
//! and at most one autoplay timer exists.
use std::path::PathBuf;
use std::time::Duration;

use game_core::{
    ClientIntent, ErrorSeverity, GameSnapshot, MoveLog, ReplayLoaded, ReplayPosition,
};
use tracing::{debug, info};

use crate::config::ReplayConfig;
use crate::message::MessageEntry;
use crate::ports::{Ports, TimelineView, TimerId};

// Boundary refusals from the remote authority; anything else is a fault.
const AT_END: &str = "Already at end of replay";
const AT_START: &str = "Already at start of replay";
const INVALID_MOVE: &str = "Invalid move number";

/// Where a replay comes from.
#[derive(Clone, Debug)]
pub enum ReplaySource {
    /// Raw JSON move-log document.
    Document(String),
    /// A `.json` move-log file on disk.
    File(PathBuf),
    /// An already parsed move log.
    Log(MoveLog),
    /// A recording held by the remote authority, by name.
    Recorded(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Unloaded,
    Paused,
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    StepForward,
    StepBack,
    Goto(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Playback {
    Paused,
    Playing { timer: TimerId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplaySession {
    total_moves: u32,
    current_move: u32,
    playback: Playback,
}

impl ReplaySession {
    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    pub fn current_move(&self) -> u32 {
        self.current_move
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.playback, Playback::Playing { .. })
    }

    pub fn at_end(&self) -> bool {
        self.current_move >= self.total_moves
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReplayPhase {
    Unloaded,
    Loading,
    Loaded(ReplaySession),
}

#[derive(Debug)]
pub struct ReplayController {
    phase: ReplayPhase,
    in_flight: Option<Navigation>,
    speed: f64,
    base_interval: Duration,
    snapshot: Option<GameSnapshot>,
}

impl ReplayController {
    pub fn new(config: &ReplayConfig) -> Self {
        Self {
            phase: ReplayPhase::Unloaded,
            in_flight: None,
            speed: config.speed,
            base_interval: config.base_interval,
            snapshot: None,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        match self.phase {
            ReplayPhase::Loaded(session) if session.is_playing() => PlaybackStatus::Playing,
            ReplayPhase::Loaded(_) => PlaybackStatus::Paused,
            ReplayPhase::Unloaded | ReplayPhase::Loading => PlaybackStatus::Unloaded,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ReplayPhase::Loading
    }

    pub fn session(&self) -> Option<&ReplaySession> {
        match &self.phase {
            ReplayPhase::Loaded(session) => Some(session),
            _ => None,
        }
    }

    pub fn current_move(&self) -> Option<u32> {
        self.session().map(ReplaySession::current_move)
    }

    pub fn total_moves(&self) -> Option<u32> {
        self.session().map(ReplaySession::total_moves)
    }

    pub fn in_flight(&self) -> Option<Navigation> {
        self.in_flight
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Autoplay period at the current speed.
    pub fn period(&self) -> Duration {
        ReplayConfig::period_at(self.base_interval, self.speed)
    }

    /// Snapshot of the current replay position.
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn timeline(&self) -> TimelineView {
        let (current_move, total_moves) = self
            .session()
            .map_or((0, 0), |session| (session.current_move, session.total_moves));
        TimelineView {
            current_move,
            total_moves,
            status: self.status(),
            speed: self.speed,
        }
    }

    // ------------------------------------------------------------------
    // User operations
    // ------------------------------------------------------------------

    /// Validates `source` locally and asks the remote authority to load it.
    /// A loaded session is discarded once the request is sent.
    pub fn load(&mut self, source: ReplaySource, ports: &mut Ports<'_>) {
        if self.is_loading() {
            debug!("load ignored while another load is outstanding");
            return;
        }

        let validated = match source {
            ReplaySource::Document(document) => MoveLog::parse(&document),
            ReplaySource::File(path) => MoveLog::from_path(&path),
            ReplaySource::Log(log) => log.validate().map(|()| log),
            ReplaySource::Recorded(filename) => {
                return self.dispatch_load(ClientIntent::LoadReplay { filename }, ports);
            }
        };
        match validated {
            Ok(game_data) => self.dispatch_load(ClientIntent::LoadReplayData { game_data }, ports),
            Err(err) => ports.notify(MessageEntry::for_error(
                format!("Invalid replay: {err}"),
                err.severity(),
            )),
        }
    }

    pub fn goto_move(&mut self, move_number: i64, ports: &mut Ports<'_>) {
        let Some(session) = self.require_session(ports) else {
            return;
        };
        let total = session.total_moves;
        match u32::try_from(move_number) {
            Ok(target) if target <= total => self.navigate(Navigation::Goto(target), ports),
            _ => ports.warning(format!("Move {move_number} is out of range (0-{total})")),
        }
    }

    pub fn first_move(&mut self, ports: &mut Ports<'_>) {
        self.goto_move(0, ports);
    }

    pub fn last_move(&mut self, ports: &mut Ports<'_>) {
        if let Some(total) = self.total_moves() {
            self.goto_move(i64::from(total), ports);
        }
    }

    pub fn step_forward(&mut self, ports: &mut Ports<'_>) {
        let Some(session) = self.require_session(ports) else {
            return;
        };
        if session.at_end() {
            ports.warning("Already at the last move");
            return;
        }
        self.navigate(Navigation::StepForward, ports);
    }

    pub fn step_back(&mut self, ports: &mut Ports<'_>) {
        let Some(session) = self.require_session(ports) else {
            return;
        };
        if session.current_move == 0 {
            ports.warning("Already at the first move");
            return;
        }
        self.navigate(Navigation::StepBack, ports);
    }

    /// Starts autoplay. Calling it while playing does nothing.
    pub fn play(&mut self, ports: &mut Ports<'_>) {
        let period = self.period();
        let ReplayPhase::Loaded(session) = &mut self.phase else {
            ports.warning("Load a replay first");
            return;
        };
        if session.is_playing() {
            debug!("play ignored, already playing");
            return;
        }
        if !ports.send(ClientIntent::ReplayPlay) {
            return;
        }
        let timer = ports.scheduler.start(period);
        session.playback = Playback::Playing { timer };
        self.present_timeline(ports);
    }

    /// Stops autoplay. Calling it while paused does nothing.
    pub fn pause(&mut self, ports: &mut Ports<'_>) {
        let ReplayPhase::Loaded(session) = &mut self.phase else {
            return;
        };
        let Playback::Playing { timer } = session.playback else {
            debug!("pause ignored, not playing");
            return;
        };
        session.playback = Playback::Paused;
        ports.scheduler.cancel(timer);
        ports.send(ClientIntent::ReplayPause);
        self.present_timeline(ports);
    }

    pub fn toggle_play(&mut self, ports: &mut Ports<'_>) {
        if self.status() == PlaybackStatus::Playing {
            self.pause(ports);
        } else {
            self.play(ports);
        }
    }

    /// Changes the speed multiplier; a running timer is replaced so the new
    /// period applies immediately.
    pub fn set_speed(&mut self, speed: f64, ports: &mut Ports<'_>) {
        if !ReplayConfig::accepts_speed(speed) {
            ports.warning(format!("Invalid playback speed {speed}"));
            return;
        }
        self.speed = speed;
        if self.status() == PlaybackStatus::Playing {
            self.pause(ports);
            self.play(ports);
        } else {
            self.present_timeline(ports);
        }
        ports.info(format!("Playback speed {speed}x"));
    }

    /// One autoplay tick from the scheduler.
    pub fn tick(&mut self, timer: TimerId, ports: &mut Ports<'_>) {
        let ReplayPhase::Loaded(session) = self.phase else {
            return;
        };
        match session.playback {
            Playback::Playing { timer: active } if active == timer => {}
            _ => {
                debug!(?timer, "stale autoplay tick");
                return;
            }
        }
        if session.at_end() {
            self.pause(ports);
            return;
        }
        if self.in_flight.is_some() {
            debug!("autoplay tick skipped, navigation outstanding");
            return;
        }
        self.navigate(Navigation::StepForward, ports);
    }

    // ------------------------------------------------------------------
    // Remote results
    // ------------------------------------------------------------------

    pub fn on_loaded(&mut self, loaded: ReplayLoaded, ports: &mut Ports<'_>) {
        if !self.is_loading() {
            debug!("unexpected replay_loaded");
            return;
        }
        self.phase = ReplayPhase::Loaded(ReplaySession {
            total_moves: loaded.total_moves,
            current_move: 0,
            playback: Playback::Paused,
        });
        self.in_flight = None;
        info!(total_moves = loaded.total_moves, "replay loaded");

        self.show(loaded.snapshot, ports);
        self.present_timeline(ports);
        match loaded.message {
            Some(message) => ports.info(message),
            None => ports.info(format!("Replay loaded: {} moves", loaded.total_moves)),
        }
    }

    /// `replay_step`, `replay_step_back`, and `replay_goto`.
    pub fn on_position(&mut self, position: ReplayPosition, ports: &mut Ports<'_>) {
        let ReplayPhase::Loaded(session) = &mut self.phase else {
            debug!("replay position without a loaded replay");
            return;
        };
        if self.in_flight.take().is_none() {
            debug!(move_number = position.move_number, "unsolicited replay position");
        }
        session.current_move = position.move_number;
        let reached_end = session.is_playing() && session.at_end();

        self.show(position.snapshot, ports);
        self.present_timeline(ports);
        if reached_end {
            self.pause(ports);
        }
    }

    pub fn on_playback_ack(&mut self, playing: bool) {
        debug!(playing, status = ?self.status(), "playback acknowledged");
    }

    pub fn on_error(&mut self, message: &str, ports: &mut Ports<'_>) {
        if self.is_loading() {
            self.phase = ReplayPhase::Unloaded;
            ports.error(format!("Replay load failed: {message}"), ErrorSeverity::Fault);
            return;
        }
        self.in_flight = None;

        match message.trim() {
            AT_END => {
                ports.error(format!("Replay: {message}"), ErrorSeverity::Recoverable);
                self.pause(ports);
            }
            AT_START | INVALID_MOVE => {
                ports.error(format!("Replay: {message}"), ErrorSeverity::Recoverable);
            }
            _ => {
                ports.error(format!("Replay error: {message}"), ErrorSeverity::Fault);
                self.pause(ports);
            }
        }
    }

    /// Clears waiting states after the link dropped. The timer is cancelled
    /// locally; no intent is sent.
    pub fn reset_after_disconnect(&mut self, ports: &mut Ports<'_>) {
        self.in_flight = None;
        match self.phase {
            ReplayPhase::Unloaded => return,
            ReplayPhase::Loading => self.phase = ReplayPhase::Unloaded,
            ReplayPhase::Loaded(mut session) => {
                if let Playback::Playing { timer } = session.playback {
                    ports.scheduler.cancel(timer);
                    session.playback = Playback::Paused;
                    self.phase = ReplayPhase::Loaded(session);
                }
            }
        }
        self.present_timeline(ports);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// The loaded session survives, paused, when the intent cannot be sent.
    fn dispatch_load(&mut self, intent: ClientIntent, ports: &mut Ports<'_>) {
        self.pause(ports);
        if !ports.send(intent) {
            return;
        }
        self.phase = ReplayPhase::Loading;
        self.in_flight = None;
        self.snapshot = None;
        ports.info("Loading replay...");
        self.present_timeline(ports);
    }

    fn require_session(&self, ports: &mut Ports<'_>) -> Option<ReplaySession> {
        let session = self.session().copied();
        if session.is_none() {
            ports.warning("Load a replay first");
        }
        session
    }

    fn navigate(&mut self, navigation: Navigation, ports: &mut Ports<'_>) {
        if let Some(outstanding) = self.in_flight {
            debug!(?navigation, ?outstanding, "navigation ignored, one already outstanding");
            return;
        }
        let intent = match navigation {
            Navigation::StepForward => ClientIntent::ReplayStepForward,
            Navigation::StepBack => ClientIntent::ReplayStepBack,
            Navigation::Goto(move_number) => ClientIntent::ReplayGoto { move_number },
        };
        if ports.send(intent) {
            self.in_flight = Some(navigation);
        }
    }

    fn show(&mut self, snapshot: GameSnapshot, ports: &mut Ports<'_>) {
        ports.presenter.present(&snapshot);
        ports.presenter.present_hud(&snapshot, None);
        if let Some(winner) = snapshot.winner() {
            ports.presenter.present_victory(winner);
        }
        self.snapshot = Some(snapshot);
    }

    fn present_timeline(&self, ports: &mut Ports<'_>) {
        ports.presenter.present_timeline(&self.timeline());
    }
}
