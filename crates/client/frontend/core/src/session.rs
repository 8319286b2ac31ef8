//! One game session: both controllers, the notification log, and the
//! injected seams, behind a single dispatcher.
//!
//! Frontends hold a [`Session`] and feed it user operations, decoded server
//! messages, link status changes, animation completions, and autoplay ticks.
//! Nothing here blocks; every call returns after updating state and calling
//! into the seams.
use std::time::Duration;

use game_core::{ClientIntent, Color, ErrorSeverity, GameMode, GameSetup, ServerMessage};
use tracing::{debug, info, warn};

use crate::config::FrontendConfig;
use crate::event::{EventConsumer, EventImpact};
use crate::message::MessageLog;
use crate::placement::PlacementController;
use crate::ports::{AnimationId, IntentSink, PlaybackScheduler, Ports, Presenter, TimerId};
use crate::replay::{ReplayController, ReplaySource};

pub struct Session<P, R, S> {
    presenter: P,
    remote: R,
    scheduler: S,
    messages: MessageLog,
    placement: PlacementController,
    replay: ReplayController,
    link_lost: bool,
}

impl<P, R, S> Session<P, R, S>
where
    P: Presenter,
    R: IntentSink,
    S: PlaybackScheduler,
{
    pub fn new(config: &FrontendConfig, presenter: P, remote: R, scheduler: S) -> Self {
        Self {
            presenter,
            remote,
            scheduler,
            messages: MessageLog::new(config.messages.capacity),
            placement: PlacementController::new(),
            replay: ReplayController::new(&config.replay),
            link_lost: false,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn remote_mut(&mut self) -> &mut R {
        &mut self.remote
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn placement(&self) -> &PlacementController {
        &self.placement
    }

    pub fn replay(&self) -> &ReplayController {
        &self.replay
    }

    pub fn is_link_lost(&self) -> bool {
        self.link_lost
    }

    fn split(&mut self) -> (Ports<'_>, &mut PlacementController, &mut ReplayController) {
        let ports = Ports {
            presenter: &mut self.presenter,
            remote: &mut self.remote,
            scheduler: &mut self.scheduler,
            messages: &mut self.messages,
        };
        (ports, &mut self.placement, &mut self.replay)
    }

    // ------------------------------------------------------------------
    // Game
    // ------------------------------------------------------------------

    pub fn select_piece(&mut self, index: usize, color: Color) {
        let (mut ports, placement, _) = self.split();
        placement.select_piece(index, color, &mut ports);
    }

    pub fn propose_cell(&mut self, row: i64, col: i64) {
        let (mut ports, placement, _) = self.split();
        placement.propose_cell(row, col, &mut ports);
    }

    pub fn click_cell(&mut self, row: i64, col: i64) {
        let (mut ports, placement, _) = self.split();
        placement.click_cell(row, col, &mut ports);
    }

    /// Rotates the pending piece; `row`/`col` is where the input landed.
    pub fn request_rotate(&mut self, row: i64, col: i64) {
        let (mut ports, placement, _) = self.split();
        let target = placement
            .snapshot()
            .and_then(|snapshot| snapshot.board().locate(row, col));
        match target {
            Some(cell) => placement.request_rotate(cell, &mut ports),
            None => debug!(row, col, "rotate outside the board"),
        }
    }

    pub fn confirm(&mut self) {
        let (mut ports, placement, _) = self.split();
        placement.confirm(&mut ports);
    }

    pub fn cancel(&mut self) {
        let (mut ports, placement, _) = self.split();
        placement.cancel(&mut ports);
    }

    pub fn start_game(&mut self, mode: GameMode) {
        let (mut ports, _, _) = self.split();
        info!(%mode, "starting game");
        ports.send(ClientIntent::StartGame(GameSetup::for_mode(mode)));
    }

    pub fn stop_game(&mut self) {
        let (mut ports, _, _) = self.split();
        ports.send(ClientIntent::StopGame);
    }

    pub fn request_state(&mut self) {
        let (mut ports, _, _) = self.split();
        ports.send(ClientIntent::GetState);
    }

    pub fn animation_finished(&mut self, animation: AnimationId) {
        let (mut ports, placement, _) = self.split();
        placement.animation_finished(animation, &mut ports);
    }

    // ------------------------------------------------------------------
    // Replay
    // ------------------------------------------------------------------

    pub fn load_replay(&mut self, source: ReplaySource) {
        let (mut ports, _, replay) = self.split();
        replay.load(source, &mut ports);
    }

    pub fn goto_move(&mut self, move_number: i64) {
        let (mut ports, _, replay) = self.split();
        replay.goto_move(move_number, &mut ports);
    }

    pub fn first_move(&mut self) {
        let (mut ports, _, replay) = self.split();
        replay.first_move(&mut ports);
    }

    pub fn last_move(&mut self) {
        let (mut ports, _, replay) = self.split();
        replay.last_move(&mut ports);
    }

    pub fn step_forward(&mut self) {
        let (mut ports, _, replay) = self.split();
        replay.step_forward(&mut ports);
    }

    pub fn step_back(&mut self) {
        let (mut ports, _, replay) = self.split();
        replay.step_back(&mut ports);
    }

    pub fn play(&mut self) {
        let (mut ports, _, replay) = self.split();
        replay.play(&mut ports);
    }

    pub fn pause(&mut self) {
        let (mut ports, _, replay) = self.split();
        replay.pause(&mut ports);
    }

    pub fn toggle_play(&mut self) {
        let (mut ports, _, replay) = self.split();
        replay.toggle_play(&mut ports);
    }

    pub fn set_speed(&mut self, speed: f64) {
        let (mut ports, _, replay) = self.split();
        replay.set_speed(speed, &mut ports);
    }

    pub fn playback_tick(&mut self, timer: TimerId) {
        let (mut ports, _, replay) = self.split();
        replay.tick(timer, &mut ports);
    }

    /// Autoplay period at the current speed.
    pub fn playback_period(&self) -> Duration {
        self.replay.period()
    }

    // ------------------------------------------------------------------
    // Link
    // ------------------------------------------------------------------

    pub fn link_connected(&mut self) {
        if !self.link_lost {
            return;
        }
        self.link_lost = false;
        info!("link restored, resynchronising");
        let (mut ports, _, _) = self.split();
        ports.info("Reconnected to server");
        ports.send(ClientIntent::GetState);
    }

    /// Recovers from lost link events while the link stays up. Replies may
    /// have been among them, so waiting states are cleared before fresh
    /// state is requested.
    pub fn resync(&mut self) {
        warn!("link events lost, resynchronising");
        let (mut ports, placement, replay) = self.split();
        placement.reset_after_disconnect(&mut ports);
        replay.reset_after_disconnect(&mut ports);
        ports.warning("Missed server updates - resynchronising");
        ports.send(ClientIntent::GetState);
    }

    /// Resets every waiting state so nothing stays stuck on a reply that
    /// will never come.
    pub fn link_lost(&mut self) {
        if self.link_lost {
            return;
        }
        self.link_lost = true;
        warn!("link lost");
        let (mut ports, placement, replay) = self.split();
        placement.reset_after_disconnect(&mut ports);
        replay.reset_after_disconnect(&mut ports);
        ports.error("Connection lost - reconnecting", ErrorSeverity::Transport);
    }
}

impl<P, R, S> EventConsumer for Session<P, R, S>
where
    P: Presenter,
    R: IntentSink,
    S: PlaybackScheduler,
{
    fn on_message(&mut self, message: ServerMessage) -> EventImpact {
        debug!(kind = message.kind(), "server message");
        let (mut ports, placement, replay) = self.split();
        let ports = &mut ports;

        match message {
            ServerMessage::ConnectionEstablished(status) => {
                match status.status {
                    Some(status) => ports.info(format!("Connected ({status})")),
                    None => ports.info("Connected"),
                }
            }
            ServerMessage::GameStarted(snapshot) => placement.on_game_started(snapshot, ports),
            ServerMessage::GameState(snapshot) => placement.on_game_state(snapshot, ports),
            ServerMessage::GameStopped(status) => placement.on_game_stopped(status, ports),
            ServerMessage::PiecePendingRotation(pending) => {
                placement.on_pending_rotation(pending, ports)
            }
            ServerMessage::PieceRotated(pending) => placement.on_rotated(pending, ports),
            ServerMessage::PiecePlaced(outcome) | ServerMessage::AiMoved(outcome) => {
                placement.on_placed(outcome, ports)
            }
            ServerMessage::AiThinking(payload) => placement.on_ai_thinking(payload, ports),
            ServerMessage::AiNoMoves(payload) => placement.on_ai_no_moves(payload, ports),
            ServerMessage::PlacementInvalid(payload) => {
                placement.on_invalid(&payload.message, ports)
            }
            ServerMessage::PlacementError(payload) | ServerMessage::GenericError(payload) => {
                warn!(message = %payload.message, "remote fault");
                placement.on_fault(&payload.message, ports)
            }
            ServerMessage::ReplayLoaded(loaded) => replay.on_loaded(loaded, ports),
            ServerMessage::ReplayStep(position)
            | ServerMessage::ReplayStepBack(position)
            | ServerMessage::ReplayGoto(position) => replay.on_position(position, ports),
            ServerMessage::ReplayPlaying(_) => {
                replay.on_playback_ack(true);
                return EventImpact::none();
            }
            ServerMessage::ReplayPaused(_) => {
                replay.on_playback_ack(false);
                return EventImpact::none();
            }
            ServerMessage::ReplayError(payload) => {
                warn!(message = %payload.message, "replay error");
                replay.on_error(&payload.message, ports)
            }
        }

        EventImpact::redraw()
    }

    fn message_log(&self) -> &MessageLog {
        &self.messages
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    fn take_message_log(self) -> MessageLog {
        self.messages
    }
}
