//! Placement and rotation interaction.
//!
//! A placement is a short conversation with the remote authority:
//! propose a cell, receive a pending placement with an assigned rotation,
//! rotate it any number of times, then confirm (or cancel locally). The
//! controller gates every user operation on its current [`PlacementPhase`]
//! so that input arriving during a round trip or an animation is dropped
//! instead of producing a second in-flight placement.
//!
//! Committed placements follow a fixed sequence: the new snapshot is
//! adopted (HUD updated) before the animation starts, and the board is
//! redrawn only once the animation reports completion. See
//! [`PlacementController::on_placed`].
use game_core::{
    AiTurnPayload, Cell, ClientIntent, Color, ErrorSeverity, GameSnapshot, PendingPayload, Piece,
    PlacementOutcome, RemovalReason, Rotation, StatusPayload,
};
use tracing::debug;

use crate::ports::{AnimationId, Ports};

/// A proposed placement the remote authority has accepted but not committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingPlacement {
    pub cell: Cell,
    pub piece: Piece,
    pub rotation: Rotation,
    /// Pool index the proposal was made with.
    pub piece_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementPhase {
    Idle,
    PiecePicked { index: usize },
    AwaitingProposal { cell: Cell, piece_index: usize },
    Rotating { pending: PendingPlacement },
    AwaitingCommit { pending: PendingPlacement },
    GameOver { winner: Color },
}

impl PlacementPhase {
    pub fn pending(&self) -> Option<&PendingPlacement> {
        match self {
            Self::Rotating { pending } | Self::AwaitingCommit { pending } => Some(pending),
            _ => None,
        }
    }

    /// True while an intent is outstanding or a pending placement exists.
    pub fn is_engaged(&self) -> bool {
        matches!(
            self,
            Self::AwaitingProposal { .. } | Self::Rotating { .. } | Self::AwaitingCommit { .. }
        )
    }
}

/// Committed placement whose board redraw waits for its animation.
#[derive(Debug)]
struct Reveal {
    animation: AnimationId,
    outcome: PlacementOutcome,
}

#[derive(Debug)]
pub struct PlacementController {
    phase: PlacementPhase,
    snapshot: Option<GameSnapshot>,
    reveal: Option<Reveal>,
    victory_shown: bool,
    next_animation: u64,
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementController {
    pub fn new() -> Self {
        Self {
            phase: PlacementPhase::Idle,
            snapshot: None,
            reveal: None,
            victory_shown: false,
            next_animation: 0,
        }
    }

    pub fn phase(&self) -> &PlacementPhase {
        &self.phase
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingPlacement> {
        self.phase.pending()
    }

    pub fn selection(&self) -> Option<usize> {
        match self.phase {
            PlacementPhase::PiecePicked { index } => Some(index),
            _ => None,
        }
    }

    /// Id of the placement animation the board redraw is waiting on.
    pub fn animation_in_progress(&self) -> Option<AnimationId> {
        self.reveal.as_ref().map(|reveal| reveal.animation)
    }

    // ------------------------------------------------------------------
    // User operations
    // ------------------------------------------------------------------

    /// Chooses `index` from `color`'s pool. Ignored unless `color` is the
    /// player to move.
    pub fn select_piece(&mut self, index: usize, color: Color, ports: &mut Ports<'_>) {
        if !matches!(
            self.phase,
            PlacementPhase::Idle | PlacementPhase::PiecePicked { .. }
        ) {
            debug!(?self.phase, "select_piece ignored");
            return;
        }
        let Some(snapshot) = &self.snapshot else {
            debug!("select_piece before any snapshot");
            return;
        };
        if color != snapshot.current_player() {
            debug!(%color, current = %snapshot.current_player(), "not this color's turn");
            return;
        }
        let Some(piece) = snapshot.pool(color).get(index) else {
            ports.warning(format!("{color} has no piece {}", index + 1));
            return;
        };

        let power = piece.power;
        self.phase = PlacementPhase::PiecePicked { index };
        ports.presenter.present_hud(snapshot, Some(index));
        ports.info(format!("Selected piece {} (Power: {power})", index + 1));
    }

    /// Proposes the cell at board coordinates `(row, col)`. Coordinates come
    /// straight from user input and may lie outside the board.
    pub fn propose_cell(&mut self, row: i64, col: i64, ports: &mut Ports<'_>) {
        if self.reveal.is_some() {
            debug!("propose_cell during placement animation");
            return;
        }
        let piece_index = match self.phase {
            PlacementPhase::Idle => 0,
            PlacementPhase::PiecePicked { index } => index,
            _ => {
                debug!(?self.phase, "propose_cell ignored");
                return;
            }
        };
        let Some(snapshot) = &self.snapshot else {
            debug!("propose_cell before any snapshot");
            return;
        };
        let Some(cell) = snapshot.board().locate(row, col) else {
            ports.warning(format!("({row},{col}) is outside the board"));
            return;
        };

        if ports.send(ClientIntent::PlacePiece {
            row: cell.row,
            col: cell.col,
            piece_index,
        }) {
            self.phase = PlacementPhase::AwaitingProposal { cell, piece_index };
        }
    }

    /// Board click. While rotating, a click on the pending cell rotates; a
    /// click anywhere else cancels and proposes the new cell with the same
    /// piece.
    pub fn click_cell(&mut self, row: i64, col: i64, ports: &mut Ports<'_>) {
        let PlacementPhase::Rotating { pending } = &self.phase else {
            self.propose_cell(row, col, ports);
            return;
        };

        let target = self
            .snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.board().locate(row, col));
        if target == Some(pending.cell) {
            let cell = pending.cell;
            self.request_rotate(cell, ports);
            return;
        }

        let index = pending.piece_index;
        self.cancel(ports);
        self.phase = PlacementPhase::PiecePicked { index };
        self.propose_cell(row, col, ports);
    }

    /// Asks the remote authority for the next rotation of the pending piece.
    /// `at` is the cell the triggering input targeted.
    pub fn request_rotate(&mut self, at: Cell, ports: &mut Ports<'_>) {
        match &self.phase {
            PlacementPhase::Rotating { pending } if pending.cell == at => {
                ports.send(ClientIntent::RotatePiece);
            }
            _ => debug!(%at, ?self.phase, "request_rotate ignored"),
        }
    }

    pub fn confirm(&mut self, ports: &mut Ports<'_>) {
        let PlacementPhase::Rotating { pending } = &self.phase else {
            debug!(?self.phase, "confirm ignored");
            return;
        };
        let pending = pending.clone();
        if ports.send(ClientIntent::ConfirmPlacement) {
            self.phase = PlacementPhase::AwaitingCommit { pending };
        }
    }

    /// Drops the pending placement. Purely local: nothing is sent.
    pub fn cancel(&mut self, ports: &mut Ports<'_>) {
        if !matches!(self.phase, PlacementPhase::Rotating { .. }) {
            debug!(?self.phase, "cancel ignored");
            return;
        }
        self.phase = PlacementPhase::Idle;
        if let Some(snapshot) = &self.snapshot {
            ports.presenter.present(snapshot);
            ports.presenter.present_hud(snapshot, None);
        }
        ports.info("Placement cancelled");
    }

    /// Completion callback for a placement animation.
    pub fn animation_finished(&mut self, animation: AnimationId, ports: &mut Ports<'_>) {
        match self.reveal.take() {
            Some(reveal) if reveal.animation == animation => self.reveal_outcome(reveal.outcome, ports),
            other => {
                debug!(?animation, "stale animation completion");
                self.reveal = other;
            }
        }
    }

    // ------------------------------------------------------------------
    // Remote results
    // ------------------------------------------------------------------

    pub fn on_game_started(&mut self, snapshot: GameSnapshot, ports: &mut Ports<'_>) {
        self.reset();
        let starter = snapshot.current_player();
        self.adopt(snapshot, ports);
        self.redraw(ports);
        ports.info("Game started!");
        ports.info(format!("{} player starts", starter.label()));
        self.announce_victory(ports);
    }

    pub fn on_game_state(&mut self, snapshot: GameSnapshot, ports: &mut Ports<'_>) {
        self.adopt(snapshot, ports);
        if self.reveal.is_none() {
            self.redraw(ports);
            self.announce_victory(ports);
        }
    }

    pub fn on_game_stopped(&mut self, status: StatusPayload, ports: &mut Ports<'_>) {
        self.reset();
        self.snapshot = None;
        match status.status {
            Some(status) => ports.info(format!("Game stopped ({status})")),
            None => ports.info("Game stopped"),
        }
    }

    pub fn on_pending_rotation(&mut self, payload: PendingPayload, ports: &mut Ports<'_>) {
        let PlacementPhase::AwaitingProposal { piece_index, .. } = self.phase else {
            debug!(?self.phase, "unexpected piece_pending_rotation");
            return;
        };
        self.phase = PlacementPhase::Rotating {
            pending: PendingPlacement {
                cell: payload.cell(),
                piece: payload.piece,
                rotation: payload.rotation,
                piece_index,
            },
        };
        self.redraw(ports);
    }

    pub fn on_rotated(&mut self, payload: PendingPayload, ports: &mut Ports<'_>) {
        let pending = match &mut self.phase {
            PlacementPhase::Rotating { pending } | PlacementPhase::AwaitingCommit { pending }
                if pending.cell == payload.cell() =>
            {
                pending
            }
            _ => {
                debug!(at = %payload.cell(), "unexpected piece_rotated");
                return;
            }
        };
        pending.rotation = payload.rotation;
        pending.piece = payload.piece;
        ports
            .presenter
            .present_pending_overlay(&pending.piece, pending.cell, pending.rotation);
    }

    /// `piece_placed` and `ai_moved`: adopt, animate, then reveal.
    pub fn on_placed(&mut self, outcome: PlacementOutcome, ports: &mut Ports<'_>) {
        if let Some(previous) = self.reveal.take() {
            debug!(animation = ?previous.animation, "flushing unfinished reveal");
            self.reveal_outcome(previous.outcome, ports);
        }

        self.phase = PlacementPhase::Idle;
        self.adopt(outcome.snapshot.clone(), ports);

        match &outcome.piece {
            Some(piece) => {
                let animation = self.next_animation_id();
                ports
                    .presenter
                    .animate_placement(piece, outcome.cell(), animation);
                self.reveal = Some(Reveal { animation, outcome });
            }
            None => self.reveal_outcome(outcome, ports),
        }
    }

    pub fn on_invalid(&mut self, message: &str, ports: &mut Ports<'_>) {
        match std::mem::replace(&mut self.phase, PlacementPhase::Idle) {
            PlacementPhase::AwaitingCommit { pending } => {
                self.phase = PlacementPhase::Rotating { pending };
                self.redraw(ports);
            }
            PlacementPhase::AwaitingProposal { .. } => {
                if let Some(snapshot) = &self.snapshot {
                    ports.presenter.present_hud(snapshot, None);
                }
            }
            other => self.phase = other,
        }
        ports.error(format!("Invalid move: {message}"), ErrorSeverity::Recoverable);
    }

    /// `placement_error` and the generic `error`: abort the interaction.
    pub fn on_fault(&mut self, message: &str, ports: &mut Ports<'_>) {
        ports.error(format!("Error: {message}"), ErrorSeverity::Fault);
        if matches!(self.phase, PlacementPhase::GameOver { .. }) {
            return;
        }
        let had_pending = self.phase.pending().is_some();
        self.phase = PlacementPhase::Idle;
        if let Some(snapshot) = &self.snapshot {
            ports.presenter.present_hud(snapshot, None);
            if had_pending && self.reveal.is_none() {
                ports.presenter.present(snapshot);
            }
        }
    }

    pub fn on_ai_thinking(&mut self, payload: AiTurnPayload, ports: &mut Ports<'_>) {
        ports.info(format!("{} AI is thinking...", payload.player.label()));
    }

    pub fn on_ai_no_moves(&mut self, payload: AiTurnPayload, ports: &mut Ports<'_>) {
        ports.info(format!(
            "{} has no valid moves - turn skipped",
            payload.player.label()
        ));
    }

    /// Returns any waiting state to `Idle` after the link dropped.
    pub fn reset_after_disconnect(&mut self, ports: &mut Ports<'_>) {
        if !self.phase.is_engaged() {
            return;
        }
        let had_pending = self.phase.pending().is_some();
        self.phase = PlacementPhase::Idle;
        if had_pending
            && self.reveal.is_none()
            && let Some(snapshot) = &self.snapshot
        {
            ports.presenter.present(snapshot);
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn reset(&mut self) {
        self.phase = PlacementPhase::Idle;
        self.reveal = None;
        self.victory_shown = false;
    }

    fn next_animation_id(&mut self) -> AnimationId {
        self.next_animation += 1;
        AnimationId(self.next_animation)
    }

    /// Stores `snapshot` and refreshes everything but the board.
    fn adopt(&mut self, snapshot: GameSnapshot, ports: &mut Ports<'_>) {
        let turn_changed = self.snapshot.as_ref().is_none_or(|previous| {
            previous.current_player() != snapshot.current_player()
                || previous.turn_count() != snapshot.turn_count()
        });
        if turn_changed && matches!(self.phase, PlacementPhase::PiecePicked { .. }) {
            self.phase = PlacementPhase::Idle;
        }
        if let Some(winner) = snapshot.winner() {
            self.phase = PlacementPhase::GameOver { winner };
        } else if matches!(self.phase, PlacementPhase::GameOver { .. }) {
            self.phase = PlacementPhase::Idle;
            self.victory_shown = false;
        }

        ports.presenter.present_hud(&snapshot, self.selection());
        self.snapshot = Some(snapshot);
    }

    /// Board from the adopted snapshot plus the pending overlay, if any.
    fn redraw(&self, ports: &mut Ports<'_>) {
        if let Some(snapshot) = &self.snapshot {
            ports.presenter.present(snapshot);
        }
        if let Some(pending) = self.phase.pending() {
            ports
                .presenter
                .present_pending_overlay(&pending.piece, pending.cell, pending.rotation);
        }
    }

    fn reveal_outcome(&mut self, outcome: PlacementOutcome, ports: &mut Ports<'_>) {
        let combat = outcome.combat();
        if let Some(combat) = combat {
            ports
                .presenter
                .animate_combat(combat.attacker_roll, combat.defender_roll);
        }
        self.redraw(ports);

        let lost_in_combat = count_removed(&outcome, RemovalReason::CombatLoss);
        let disconnected = count_removed(&outcome, RemovalReason::Disconnected);
        let cell = outcome.cell();

        if combat.is_some() || lost_in_combat > 0 {
            let mut text = match combat {
                Some(combat) => format!("Combat at {cell}: {}", combat.summary()),
                None => format!("Combat at {cell}"),
            };
            if lost_in_combat > 0 {
                text.push_str(&format!("; {} lost in combat", pieces(lost_in_combat)));
            }
            ports.info(text);
        }
        if disconnected > 0 {
            ports.info(format!(
                "{} removed: disconnected from their color",
                pieces(disconnected)
            ));
        }
        if combat.is_none() && lost_in_combat == 0 && disconnected == 0 {
            match &outcome.piece {
                Some(piece) => ports.info(format!("{} placed piece at {cell}", piece.color.label())),
                None => ports.info(format!("Piece placed at {cell}")),
            }
        }

        self.announce_victory(ports);
    }

    fn announce_victory(&mut self, ports: &mut Ports<'_>) {
        let PlacementPhase::GameOver { winner } = self.phase else {
            return;
        };
        if self.victory_shown {
            return;
        }
        self.victory_shown = true;
        ports.presenter.present_victory(winner);
        ports.info(format!("Game Over! {} wins!", winner.label()));
    }
}

fn count_removed(outcome: &PlacementOutcome, reason: RemovalReason) -> usize {
    outcome
        .removed_pieces
        .iter()
        .filter(|removed| removed.reason == reason)
        .count()
}

fn pieces(count: usize) -> String {
    if count == 1 {
        "1 piece".to_string()
    } else {
        format!("{count} pieces")
    }
}
