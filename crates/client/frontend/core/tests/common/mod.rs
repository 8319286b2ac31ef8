//! Recording fakes and fixtures shared by the session tests.
#![allow(dead_code)]

use std::time::Duration;

use client_frontend_core::{
    AnimationId, FrontendConfig, IntentSink, MessageEntry, PlaybackScheduler, Presenter,
    SendError, Session, TimelineView, TimerId,
};
use game_core::{
    Board, Cell, ClientIntent, Color, GameSnapshot, Piece, Pips, Pools, Rotation,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Present(GameSnapshot),
    Hud {
        turn: u32,
        player: Color,
        selection: Option<usize>,
    },
    Overlay {
        cell: Cell,
        rotation: Rotation,
    },
    AnimatePlacement(Cell, AnimationId),
    AnimateCombat(u32, u32),
    Notify(String),
    Victory(Color),
    Timeline(TimelineView),
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub calls: Vec<Call>,
}

impl RecordingPresenter {
    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.iter().position(predicate)
    }

    pub fn last_present(&self) -> Option<&GameSnapshot> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Present(snapshot) => Some(snapshot),
            _ => None,
        })
    }

    pub fn last_animation(&self) -> Option<AnimationId> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::AnimatePlacement(_, id) => Some(*id),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, snapshot: &GameSnapshot) {
        self.calls.push(Call::Present(snapshot.clone()));
    }

    fn present_hud(&mut self, snapshot: &GameSnapshot, selection: Option<usize>) {
        self.calls.push(Call::Hud {
            turn: snapshot.turn_count(),
            player: snapshot.current_player(),
            selection,
        });
    }

    fn present_pending_overlay(&mut self, _piece: &Piece, cell: Cell, rotation: Rotation) {
        self.calls.push(Call::Overlay { cell, rotation });
    }

    fn animate_placement(&mut self, _piece: &Piece, cell: Cell, animation: AnimationId) {
        self.calls.push(Call::AnimatePlacement(cell, animation));
    }

    fn animate_combat(&mut self, attacker_roll: u32, defender_roll: u32) {
        self.calls
            .push(Call::AnimateCombat(attacker_roll, defender_roll));
    }

    fn notify(&mut self, entry: &MessageEntry) {
        self.calls.push(Call::Notify(entry.text.clone()));
    }

    fn present_victory(&mut self, winner: Color) {
        self.calls.push(Call::Victory(winner));
    }

    fn present_timeline(&mut self, timeline: &TimelineView) {
        self.calls.push(Call::Timeline(*timeline));
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub sent: Vec<ClientIntent>,
    pub offline: bool,
}

impl IntentSink for RecordingSink {
    fn send(&mut self, intent: ClientIntent) -> Result<(), SendError> {
        if self.offline {
            return Err(SendError("offline".into()));
        }
        self.sent.push(intent);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeScheduler {
    next: u64,
    pub started: Vec<(TimerId, Duration)>,
    pub cancelled: Vec<TimerId>,
}

impl FakeScheduler {
    /// Timers started and not yet cancelled.
    pub fn active(&self) -> Vec<TimerId> {
        self.started
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !self.cancelled.contains(id))
            .collect()
    }
}

impl PlaybackScheduler for FakeScheduler {
    fn start(&mut self, period: Duration) -> TimerId {
        self.next += 1;
        let id = TimerId(self.next);
        self.started.push((id, period));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.cancelled.push(timer);
    }
}

pub type TestSession = Session<RecordingPresenter, RecordingSink, FakeScheduler>;

pub fn session() -> TestSession {
    Session::new(
        &FrontendConfig::default(),
        RecordingPresenter::default(),
        RecordingSink::default(),
        FakeScheduler::default(),
    )
}

pub fn sent(session: &TestSession) -> &[ClientIntent] {
    &session.remote().sent
}

pub fn calls(session: &TestSession) -> &[Call] {
    &session.presenter().calls
}

// ----------------------------------------------------------------------------
// Fixtures
// ----------------------------------------------------------------------------

pub const WIDTH: usize = 6;
pub const HEIGHT: usize = 8;

pub fn piece(color: Color, power: u32) -> Piece {
    let mut pips = [[None; 3]; 3];
    pips[1][1] = Some(color);
    for (slot, cell) in pips.iter_mut().flatten().enumerate().take(power as usize) {
        if slot != 4 {
            *cell = Some(color);
        }
    }
    Piece::new(color, Pips(pips), power)
}

pub fn pools() -> Pools {
    Pools {
        red: (1..=5).map(|power| piece(Color::Red, power)).collect(),
        blue: (1..=5).map(|power| piece(Color::Blue, power)).collect(),
    }
}

pub fn snapshot(current: Color, turn: u32) -> GameSnapshot {
    GameSnapshot::in_progress(Board::empty(WIDTH, HEIGHT), current, pools(), turn)
}

pub fn snapshot_with(board: Board, current: Color, turn: u32) -> GameSnapshot {
    GameSnapshot::in_progress(board, current, pools(), turn)
}
