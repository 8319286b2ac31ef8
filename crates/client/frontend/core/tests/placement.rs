mod common;

use client_frontend_core::{EventConsumer, PendingPlacement, PlacementPhase};
use common::*;
use game_core::{
    Board, Cell, ClientIntent, Color, CombatReport, MessagePayload, PendingPayload,
    PlacementOutcome, RemovalReason, RemovedPiece, Rotation, ServerMessage,
};

fn started() -> TestSession {
    let mut session = session();
    session.on_message(ServerMessage::GameStarted(snapshot(Color::Red, 0)));
    session
}

fn pending_payload(row: usize, col: usize, rotation: Rotation) -> PendingPayload {
    PendingPayload {
        row,
        col,
        piece: piece(Color::Red, 3),
        rotation,
    }
}

fn placed(row: usize, col: usize, next: Color, turn: u32) -> PlacementOutcome {
    let placed_piece = piece(Color::Red, 3);
    let board = Board::empty(WIDTH, HEIGHT).with_piece(Cell::new(row, col), placed_piece.clone());
    PlacementOutcome {
        row,
        col,
        piece: Some(placed_piece),
        combat: None,
        removed_pieces: Vec::new(),
        snapshot: snapshot_with(board, next, turn),
    }
}

/// Drives a fresh game into `Rotating` at (3,1) with piece 2.
fn rotating() -> TestSession {
    let mut session = started();
    session.select_piece(2, Color::Red);
    session.propose_cell(3, 1);
    session.on_message(ServerMessage::PiecePendingRotation(pending_payload(
        3,
        1,
        Rotation::Deg0,
    )));
    session
}

#[test]
fn scenario_select_propose_rotate_confirm() {
    let mut session = started();

    session.select_piece(2, Color::Red);
    assert_eq!(session.placement().selection(), Some(2));

    session.propose_cell(3, 1);
    assert_eq!(
        sent(&session).last(),
        Some(&ClientIntent::PlacePiece {
            row: 3,
            col: 1,
            piece_index: 2
        })
    );

    session.on_message(ServerMessage::PiecePendingRotation(pending_payload(
        3,
        1,
        Rotation::Deg0,
    )));
    assert_eq!(
        session.placement().phase(),
        &PlacementPhase::Rotating {
            pending: PendingPlacement {
                cell: Cell::new(3, 1),
                piece: piece(Color::Red, 3),
                rotation: Rotation::Deg0,
                piece_index: 2,
            }
        }
    );

    session.request_rotate(3, 1);
    assert_eq!(sent(&session).last(), Some(&ClientIntent::RotatePiece));
    session.on_message(ServerMessage::PieceRotated(pending_payload(
        3,
        1,
        Rotation::Deg90,
    )));
    assert_eq!(
        session.placement().pending().map(|pending| pending.rotation),
        Some(Rotation::Deg90)
    );

    session.confirm();
    assert_eq!(sent(&session).last(), Some(&ClientIntent::ConfirmPlacement));
    assert!(matches!(
        session.placement().phase(),
        PlacementPhase::AwaitingCommit { .. }
    ));

    let outcome = placed(3, 1, Color::Blue, 1);
    let adopted = outcome.snapshot.clone();
    session.on_message(ServerMessage::PiecePlaced(outcome));
    assert_eq!(session.placement().phase(), &PlacementPhase::Idle);
    assert_eq!(session.placement().snapshot(), Some(&adopted));
}

#[test]
fn committed_snapshot_is_adopted_before_animation_and_drawn_after() {
    let mut session = rotating();
    session.confirm();
    let before = calls(&session).len();

    let outcome = placed(3, 1, Color::Blue, 1);
    let adopted = outcome.snapshot.clone();
    session.on_message(ServerMessage::PiecePlaced(outcome));

    let after_commit = &calls(&session)[before..];
    let hud = after_commit
        .iter()
        .position(|call| matches!(call, Call::Hud { turn: 1, player: Color::Blue, .. }))
        .expect("hud updated");
    let animation = after_commit
        .iter()
        .position(|call| matches!(call, Call::AnimatePlacement(cell, _) if *cell == Cell::new(3, 1)))
        .expect("animation started");
    assert!(hud < animation);
    assert!(
        !after_commit.contains(&Call::Present(adopted.clone())),
        "board must wait for the animation"
    );

    let id = session.presenter().last_animation().expect("animation id");
    session.animation_finished(id);
    assert_eq!(session.presenter().last_present(), Some(&adopted));
    assert_eq!(session.placement().animation_in_progress(), None);
}

#[test]
fn cancel_is_local_and_clears_pending() {
    let mut session = rotating();
    let sent_before = sent(&session).len();

    session.cancel();

    assert_eq!(sent(&session).len(), sent_before);
    assert!(!sent(&session).contains(&ClientIntent::ConfirmPlacement));
    assert_eq!(session.placement().phase(), &PlacementPhase::Idle);
    assert_eq!(session.placement().pending(), None);

    let board = session.presenter().last_present().expect("board redrawn");
    assert!(board.board().piece_at(Cell::new(3, 1)).is_none());
    assert!(!matches!(calls(&session).last(), Some(Call::Overlay { .. })));
}

#[test]
fn cancel_outside_rotating_does_nothing() {
    let mut session = started();
    session.select_piece(1, Color::Red);
    session.cancel();
    assert_eq!(session.placement().selection(), Some(1));
}

#[test]
fn second_proposal_is_refused_while_one_is_outstanding() {
    let mut session = started();
    session.propose_cell(3, 1);
    session.propose_cell(4, 2);

    let proposals = sent(&session)
        .iter()
        .filter(|intent| matches!(intent, ClientIntent::PlacePiece { .. }))
        .count();
    assert_eq!(proposals, 1);

    session.on_message(ServerMessage::PiecePendingRotation(pending_payload(
        3,
        1,
        Rotation::Deg0,
    )));
    session.propose_cell(4, 2);
    let proposals = sent(&session)
        .iter()
        .filter(|intent| matches!(intent, ClientIntent::PlacePiece { .. }))
        .count();
    assert_eq!(proposals, 1);
}

#[test]
fn proposal_refused_while_commit_outstanding() {
    let mut session = rotating();
    session.confirm();
    let sent_before = sent(&session).len();

    session.propose_cell(0, 0);
    session.click_cell(0, 0);

    assert_eq!(sent(&session).len(), sent_before);
}

#[test]
fn select_piece_requires_current_player() {
    let mut session = started();

    session.select_piece(0, Color::Blue);
    assert_eq!(session.placement().selection(), None);

    session.select_piece(4, Color::Red);
    assert_eq!(session.placement().selection(), Some(4));

    session.on_message(ServerMessage::GameState(snapshot(Color::Blue, 1)));
    assert_eq!(session.placement().selection(), None, "turn change clears selection");

    session.select_piece(0, Color::Red);
    assert_eq!(session.placement().selection(), None);
    session.select_piece(0, Color::Blue);
    assert_eq!(session.placement().selection(), Some(0));
}

#[test]
fn select_piece_out_of_pool_warns() {
    let mut session = started();
    let log_before = session.message_log().len();

    session.select_piece(9, Color::Red);

    assert_eq!(session.placement().selection(), None);
    assert_eq!(session.message_log().len(), log_before + 1);
}

#[test]
fn out_of_bounds_proposal_is_rejected_locally() {
    let mut session = started();
    session.propose_cell(8, 0);
    session.propose_cell(-1, 2);
    session.propose_cell(0, 6);

    assert!(sent(&session).is_empty());
    assert_eq!(session.placement().phase(), &PlacementPhase::Idle);
    assert!(
        session
            .message_log()
            .last()
            .is_some_and(|entry| entry.text.contains("outside the board"))
    );
}

#[test]
fn proposal_without_selection_uses_first_piece() {
    let mut session = started();
    session.propose_cell(0, 0);
    assert_eq!(
        sent(&session),
        [ClientIntent::PlacePiece {
            row: 0,
            col: 0,
            piece_index: 0
        }]
    );
}

#[test]
fn click_on_pending_cell_rotates_and_elsewhere_reproposes() {
    let mut session = rotating();

    session.click_cell(3, 1);
    assert_eq!(sent(&session).last(), Some(&ClientIntent::RotatePiece));

    session.click_cell(5, 4);
    assert_eq!(
        sent(&session).last(),
        Some(&ClientIntent::PlacePiece {
            row: 5,
            col: 4,
            piece_index: 2
        })
    );
    assert!(matches!(
        session.placement().phase(),
        PlacementPhase::AwaitingProposal { .. }
    ));
}

#[test]
fn rotate_on_other_cell_is_ignored() {
    let mut session = rotating();
    let sent_before = sent(&session).len();
    session.request_rotate(0, 0);
    assert_eq!(sent(&session).len(), sent_before);
}

#[test]
fn invalid_placement_keeps_pending_for_retry() {
    let mut session = rotating();
    session.on_message(ServerMessage::PieceRotated(pending_payload(
        3,
        1,
        Rotation::Deg180,
    )));
    session.confirm();

    session.on_message(ServerMessage::PlacementInvalid(MessagePayload::new(
        "piece would be isolated",
    )));

    let pending = session.placement().pending().cloned().expect("pending kept");
    assert!(matches!(
        session.placement().phase(),
        PlacementPhase::Rotating { .. }
    ));
    assert_eq!(pending.cell, Cell::new(3, 1));
    assert_eq!(pending.rotation, Rotation::Deg180);
    assert_eq!(
        session.message_log().last().map(|entry| entry.text.as_str()),
        Some("Invalid move: piece would be isolated")
    );

    session.confirm();
    assert_eq!(sent(&session).last(), Some(&ClientIntent::ConfirmPlacement));
}

#[test]
fn placement_error_aborts_to_idle() {
    let mut session = rotating();
    session.confirm();

    session.on_message(ServerMessage::PlacementError(MessagePayload::new("boom")));

    assert_eq!(session.placement().phase(), &PlacementPhase::Idle);
    assert_eq!(session.placement().pending(), None);
    let entry = session.message_log().last().expect("notified");
    assert_eq!(entry.text, "Error: boom");
    assert!(entry.blocking);
}

#[test]
fn combat_reveal_notifies_losses_then_disconnections() {
    let mut session = rotating();
    session.confirm();

    let mut outcome = placed(3, 1, Color::Blue, 1);
    outcome.combat = Some(CombatReport::new(4, 2, Color::Blue));
    outcome.removed_pieces = vec![
        RemovedPiece::new(RemovalReason::CombatLoss),
        RemovedPiece::new(RemovalReason::Disconnected),
    ];
    let adopted = outcome.snapshot.clone();
    session.on_message(ServerMessage::PiecePlaced(outcome));

    let log_before = session.message_log().len();
    let calls_before = calls(&session).len();
    let id = session.presenter().last_animation().expect("animation id");
    session.animation_finished(id);

    let appended: Vec<_> = session
        .message_log()
        .iter()
        .skip(log_before)
        .map(|entry| entry.text.clone())
        .collect();
    assert_eq!(appended.len(), 2);
    assert!(appended[0].contains("lost in combat"), "{appended:?}");
    assert!(appended[1].contains("disconnected"), "{appended:?}");

    let reveal = &calls(&session)[calls_before..];
    let combat = reveal
        .iter()
        .position(|call| *call == Call::AnimateCombat(4, 2))
        .expect("combat animated");
    let redraw = reveal
        .iter()
        .position(|call| *call == Call::Present(adopted.clone()))
        .expect("board redrawn");
    assert!(combat < redraw);
}

#[test]
fn stale_animation_completion_is_ignored() {
    let mut session = rotating();
    session.confirm();
    session.on_message(ServerMessage::PiecePlaced(placed(3, 1, Color::Blue, 1)));
    let id = session.presenter().last_animation().expect("animation id");

    session.animation_finished(client_frontend_core::AnimationId(id.0 + 100));
    assert_eq!(session.placement().animation_in_progress(), Some(id));
}

#[test]
fn ai_move_is_revealed_like_a_placement() {
    let mut session = started();
    session.on_message(ServerMessage::AiThinking(game_core::AiTurnPayload {
        player: Color::Red,
    }));
    session.on_message(ServerMessage::AiMoved(placed(2, 2, Color::Blue, 1)));

    let id = session.presenter().last_animation().expect("ai move animated");
    session.animation_finished(id);
    assert_eq!(
        session.message_log().last().map(|entry| entry.text.as_str()),
        Some("RED placed piece at (2,2)")
    );
}

#[test]
fn winning_placement_enters_game_over_after_animation() {
    let mut session = rotating();
    session.confirm();

    let mut outcome = placed(3, 1, Color::Blue, 1);
    outcome.snapshot = outcome.snapshot.clone().finished(Color::Red);
    session.on_message(ServerMessage::PiecePlaced(outcome));

    assert_eq!(
        session.placement().phase(),
        &PlacementPhase::GameOver { winner: Color::Red }
    );
    assert!(!calls(&session).contains(&Call::Victory(Color::Red)));

    let id = session.presenter().last_animation().expect("animation id");
    session.animation_finished(id);
    assert!(calls(&session).contains(&Call::Victory(Color::Red)));
    assert_eq!(
        session.message_log().last().map(|entry| entry.text.as_str()),
        Some("Game Over! RED wins!")
    );

    let sent_before = sent(&session).len();
    session.select_piece(0, Color::Blue);
    session.propose_cell(0, 0);
    assert_eq!(sent(&session).len(), sent_before);
}

#[test]
fn game_stopped_returns_to_idle() {
    let mut session = rotating();
    session.on_message(ServerMessage::GameStopped(Default::default()));

    assert_eq!(session.placement().phase(), &PlacementPhase::Idle);
    assert!(session.placement().snapshot().is_none());
}

#[test]
fn decodes_and_dispatches_wire_frames() {
    let mut session = started();
    session.propose_cell(3, 1);

    let frame = serde_json::json!({
        "event": "piece_pending_rotation",
        "data": {
            "row": 3,
            "col": 1,
            "rotation": 270,
            "piece": {
                "color": "R",
                "power": 1,
                "pips": [[null, null, null], [null, "R", null], [null, null, null]]
            }
        }
    })
    .to_string();
    let message = ServerMessage::decode(&frame).expect("valid frame");
    session.on_message(message);

    assert_eq!(
        session.placement().pending().map(|pending| pending.rotation),
        Some(Rotation::Deg270)
    );
}
