//! Retained presentation state that a frontend renders from.
//!
//! [`ViewModel`] implements [`Presenter`] by recording what the controllers
//! asked for and marking the affected [`UpdateScope`]. A frontend drains the
//! scope on each frame and redraws only the sections that changed.
use bitflags::bitflags;
use game_core::{Cell, Color, GameSnapshot, Piece, Rotation};

use crate::message::MessageEntry;
use crate::ports::{AnimationId, Presenter, TimelineView};

bitflags! {
    /// Tracks which parts of the [`ViewModel`] have been updated.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct UpdateScope: u32 {
        /// Board cells changed.
        const BOARD     = 0b0000_0001;

        /// Pending placement overlay appeared, rotated, or vanished.
        const OVERLAY   = 0b0000_0010;

        /// Turn indicator, counters, or pools changed.
        const HUD       = 0b0000_0100;

        /// Placement or combat animation started or finished.
        const ANIMATION = 0b0000_1000;

        const MESSAGES  = 0b0001_0000;

        const TIMELINE  = 0b0010_0000;

        const VICTORY   = 0b0100_0000;

        const ALL = Self::BOARD.bits()
                  | Self::OVERLAY.bits()
                  | Self::HUD.bits()
                  | Self::ANIMATION.bits()
                  | Self::MESSAGES.bits()
                  | Self::TIMELINE.bits()
                  | Self::VICTORY.bits();
    }
}

impl Default for UpdateScope {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayView {
    pub piece: Piece,
    pub cell: Cell,
    pub rotation: Rotation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementAnimation {
    pub id: AnimationId,
    pub piece: Piece,
    pub cell: Cell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatRolls {
    pub attacker: u32,
    pub defender: u32,
}

/// Turn indicator and counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudView {
    pub snapshot: GameSnapshot,
    pub selection: Option<usize>,
}

impl HudView {
    pub fn current_player(&self) -> Color {
        self.snapshot.current_player()
    }

    pub fn turn_count(&self) -> u32 {
        self.snapshot.turn_count()
    }

    pub fn remaining(&self, color: Color) -> usize {
        self.snapshot.pieces_remaining(color)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ViewModel {
    pub board: Option<GameSnapshot>,
    pub hud: Option<HudView>,
    pub overlay: Option<OverlayView>,
    pub animation: Option<PlacementAnimation>,
    pub combat: Option<CombatRolls>,
    pub winner: Option<Color>,
    pub timeline: Option<TimelineView>,
    /// Last notification that must stay visible until acknowledged.
    pub blocking: Option<MessageEntry>,
    scope: UpdateScope,
    started: Vec<AnimationId>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self {
            scope: UpdateScope::ALL,
            ..Self::default()
        }
    }

    pub fn scope(&self) -> UpdateScope {
        self.scope
    }

    /// Returns and clears the accumulated dirty scope.
    pub fn take_scope(&mut self) -> UpdateScope {
        std::mem::take(&mut self.scope)
    }

    pub fn mark(&mut self, scope: UpdateScope) {
        self.scope |= scope;
    }

    /// Animations started since the last call; the frontend schedules their
    /// completion.
    pub fn take_started_animations(&mut self) -> Vec<AnimationId> {
        std::mem::take(&mut self.started)
    }

    /// Frontend-side end of a placement animation.
    pub fn finish_animation(&mut self, id: AnimationId) {
        if self.animation.as_ref().is_some_and(|animation| animation.id == id) {
            self.animation = None;
            self.mark(UpdateScope::ANIMATION | UpdateScope::BOARD);
        }
    }

    pub fn acknowledge(&mut self) {
        if self.blocking.take().is_some() {
            self.mark(UpdateScope::MESSAGES);
        }
        if self.combat.take().is_some() {
            self.mark(UpdateScope::ANIMATION);
        }
    }
}

impl Presenter for ViewModel {
    fn present(&mut self, snapshot: &GameSnapshot) {
        self.board = Some(snapshot.clone());
        if self.overlay.take().is_some() {
            self.mark(UpdateScope::OVERLAY);
        }
        if snapshot.winner().is_none() && self.winner.take().is_some() {
            self.mark(UpdateScope::VICTORY);
        }
        self.mark(UpdateScope::BOARD);
    }

    fn present_hud(&mut self, snapshot: &GameSnapshot, selection: Option<usize>) {
        self.hud = Some(HudView {
            snapshot: snapshot.clone(),
            selection,
        });
        self.mark(UpdateScope::HUD);
    }

    fn present_pending_overlay(&mut self, piece: &Piece, cell: Cell, rotation: Rotation) {
        self.overlay = Some(OverlayView {
            piece: piece.clone(),
            cell,
            rotation,
        });
        self.mark(UpdateScope::OVERLAY);
    }

    fn animate_placement(&mut self, piece: &Piece, cell: Cell, animation: AnimationId) {
        self.animation = Some(PlacementAnimation {
            id: animation,
            piece: piece.clone(),
            cell,
        });
        self.combat = None;
        self.started.push(animation);
        self.mark(UpdateScope::ANIMATION);
    }

    fn animate_combat(&mut self, attacker_roll: u32, defender_roll: u32) {
        self.combat = Some(CombatRolls {
            attacker: attacker_roll,
            defender: defender_roll,
        });
        self.mark(UpdateScope::ANIMATION);
    }

    fn notify(&mut self, entry: &MessageEntry) {
        if entry.blocking {
            self.blocking = Some(entry.clone());
        }
        self.mark(UpdateScope::MESSAGES);
    }

    fn present_victory(&mut self, winner: Color) {
        self.winner = Some(winner);
        self.mark(UpdateScope::VICTORY);
    }

    fn present_timeline(&mut self, timeline: &TimelineView) {
        self.timeline = Some(*timeline);
        self.mark(UpdateScope::TIMELINE);
    }
}

#[cfg(test)]
mod tests {
    use game_core::{Board, Pips, Pools};

    use super::*;
    use crate::message::MessageLevel;

    fn snapshot() -> GameSnapshot {
        GameSnapshot::in_progress(Board::empty(6, 8), Color::Red, Pools::default(), 0)
    }

    fn piece() -> Piece {
        Piece::new(Color::Red, Pips::default(), 3)
    }

    #[test]
    fn present_drops_overlay() {
        let mut view = ViewModel::new();
        view.take_scope();

        view.present_pending_overlay(&piece(), Cell::new(1, 1), Rotation::Deg90);
        assert!(view.overlay.is_some());

        view.present(&snapshot());
        assert!(view.overlay.is_none());
        assert!(view.take_scope().contains(UpdateScope::BOARD | UpdateScope::OVERLAY));
        assert!(view.take_scope().is_empty());
    }

    #[test]
    fn animation_lifecycle() {
        let mut view = ViewModel::new();
        view.animate_placement(&piece(), Cell::new(2, 3), AnimationId(7));
        assert_eq!(view.take_started_animations(), vec![AnimationId(7)]);
        assert!(view.take_started_animations().is_empty());

        view.finish_animation(AnimationId(6));
        assert!(view.animation.is_some());
        view.finish_animation(AnimationId(7));
        assert!(view.animation.is_none());
    }

    #[test]
    fn blocking_notice_until_acknowledged() {
        let mut view = ViewModel::new();
        view.notify(&MessageEntry::new("fine", MessageLevel::Info));
        assert!(view.blocking.is_none());

        let fault = MessageEntry::for_error("boom", game_core::ErrorSeverity::Fault);
        view.notify(&fault);
        assert_eq!(view.blocking.as_ref(), Some(&fault));

        view.acknowledge();
        assert!(view.blocking.is_none());
    }
}
