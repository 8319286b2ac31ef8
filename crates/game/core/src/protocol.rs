//! Messages exchanged with the remote authority.
//!
//! Every frame is a JSON object `{"event": <kind>, "data": <payload>}`.
//! The transport carries no request/response correlation; callers decide
//! from their own state which request an inbound [`ServerMessage`] answers.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::board::Cell;
use crate::color::Color;
use crate::combat::{CombatReport, RemovedPiece};
use crate::error::ProtocolError;
use crate::piece::{Piece, Rotation};
use crate::replay_log::MoveLog;
use crate::snapshot::GameSnapshot;

// ============================================================================
// Inbound
// ============================================================================

/// Result or notification received from the remote authority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    ConnectionEstablished(StatusPayload),
    GameStarted(GameSnapshot),
    GameState(GameSnapshot),
    GameStopped(StatusPayload),
    PiecePendingRotation(PendingPayload),
    PieceRotated(PendingPayload),
    PiecePlaced(PlacementOutcome),
    AiThinking(AiTurnPayload),
    AiMoved(PlacementOutcome),
    AiNoMoves(AiTurnPayload),
    PlacementInvalid(MessagePayload),
    PlacementError(MessagePayload),
    #[serde(rename = "error", alias = "generic_error")]
    GenericError(MessagePayload),
    ReplayLoaded(ReplayLoaded),
    ReplayStep(ReplayPosition),
    ReplayStepBack(ReplayPosition),
    ReplayGoto(ReplayPosition),
    ReplayPlaying(PlaybackAck),
    ReplayPaused(PlaybackAck),
    ReplayError(MessagePayload),
}

impl ServerMessage {
    /// Decodes one text frame.
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(frame).map_err(ProtocolError::Decode)
    }

    /// Wire name of this message kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionEstablished(_) => "connection_established",
            Self::GameStarted(_) => "game_started",
            Self::GameState(_) => "game_state",
            Self::GameStopped(_) => "game_stopped",
            Self::PiecePendingRotation(_) => "piece_pending_rotation",
            Self::PieceRotated(_) => "piece_rotated",
            Self::PiecePlaced(_) => "piece_placed",
            Self::AiThinking(_) => "ai_thinking",
            Self::AiMoved(_) => "ai_moved",
            Self::AiNoMoves(_) => "ai_no_moves",
            Self::PlacementInvalid(_) => "placement_invalid",
            Self::PlacementError(_) => "placement_error",
            Self::GenericError(_) => "error",
            Self::ReplayLoaded(_) => "replay_loaded",
            Self::ReplayStep(_) => "replay_step",
            Self::ReplayStepBack(_) => "replay_step_back",
            Self::ReplayGoto(_) => "replay_goto",
            Self::ReplayPlaying(_) => "replay_playing",
            Self::ReplayPaused(_) => "replay_paused",
            Self::ReplayError(_) => "replay_error",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub message: String,
}

impl MessagePayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A proposed placement awaiting rotation or confirmation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPayload {
    pub row: usize,
    pub col: usize,
    pub piece: Piece,
    pub rotation: Rotation,
}

impl PendingPayload {
    pub const fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

/// Authoritative result of a committed placement (human or AI).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub piece: Option<Piece>,
    #[serde(default)]
    pub combat: Option<CombatReport>,
    #[serde(default, alias = "removedPieces")]
    pub removed_pieces: Vec<RemovedPiece>,
    #[serde(rename = "game_state", alias = "snapshot")]
    pub snapshot: GameSnapshot,
}

impl PlacementOutcome {
    pub const fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }

    /// Combat report, if combat actually happened.
    pub fn combat(&self) -> Option<&CombatReport> {
        self.combat.as_ref().filter(|combat| combat.combat_occurred)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiTurnPayload {
    pub player: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayLoaded {
    pub total_moves: u32,
    #[serde(rename = "game_state", alias = "snapshot")]
    pub snapshot: GameSnapshot,
    #[serde(default)]
    pub message: Option<String>,
}

/// Snapshot at a replay position after a navigation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayPosition {
    pub move_number: u32,
    #[serde(rename = "game_state", alias = "snapshot")]
    pub snapshot: GameSnapshot,
    #[serde(default)]
    pub total_moves: Option<u32>,
}

/// Acknowledgement of a play/pause notification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackAck {
    #[serde(default)]
    pub is_playing: Option<bool>,
}

// ============================================================================
// Outbound
// ============================================================================

/// Intent sent to the remote authority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientIntent {
    StartGame(GameSetup),
    StopGame,
    GetState,
    PlacePiece {
        row: usize,
        col: usize,
        piece_index: usize,
    },
    RotatePiece,
    ConfirmPlacement,
    LoadReplay {
        filename: String,
    },
    LoadReplayData {
        game_data: MoveLog,
    },
    ReplayStepForward,
    ReplayStepBack,
    ReplayGoto {
        move_number: u32,
    },
    ReplayPlay,
    ReplayPause,
}

impl ClientIntent {
    /// Encodes this intent as one text frame.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}

/// Who controls a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Ai,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    Aggressive,
    Defensive,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameMode {
    #[default]
    HumanVsHuman,
    HumanVsAi,
    AiVsAi,
}

/// Payload of `start_game`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    pub mode: GameMode,
    pub red_type: PlayerKind,
    pub blue_type: PlayerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_strategy: Option<Strategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue_strategy: Option<Strategy>,
}

impl GameSetup {
    /// Player assignment for a mode. AI colors use the remote authority's
    /// default pairing (red aggressive, blue defensive).
    pub fn for_mode(mode: GameMode) -> Self {
        let (red_type, blue_type) = match mode {
            GameMode::HumanVsHuman => (PlayerKind::Human, PlayerKind::Human),
            GameMode::HumanVsAi => (PlayerKind::Human, PlayerKind::Ai),
            GameMode::AiVsAi => (PlayerKind::Ai, PlayerKind::Ai),
        };
        let pick = |kind: PlayerKind, strategy: Strategy| {
            (kind == PlayerKind::Ai).then_some(strategy)
        };

        Self {
            mode,
            red_type,
            blue_type,
            red_strategy: pick(red_type, Strategy::Aggressive),
            blue_strategy: pick(blue_type, Strategy::Defensive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::RemovalReason;

    const STATE: &str = r#"{
        "board": {"width": 2, "height": 1, "grid": [[null, null]]},
        "current_player": "B",
        "turn_count": 1,
        "game_over": false,
        "winner": null,
        "red_pieces": [],
        "blue_pieces": []
    }"#;

    #[test]
    fn decodes_piece_placed_with_combat_and_removals() {
        let frame = format!(
            r#"{{"event": "piece_placed", "data": {{
                "row": 0, "col": 1,
                "piece": {{"color": "R", "pips": [[null,null,null],[null,"R",null],[null,null,null]], "power": 1}},
                "combat": {{"combat_occurred": true, "winner": "B", "attacker_roll": 4, "defender_roll": 2}},
                "removed_pieces": [{{"reason": "combat_loss"}}, {{"row": 0, "col": 0, "reason": "disconnected"}}],
                "game_state": {STATE}
            }}}}"#
        );

        let ServerMessage::PiecePlaced(outcome) = ServerMessage::decode(&frame).unwrap() else {
            panic!("expected piece_placed");
        };
        assert_eq!(outcome.cell(), Cell::new(0, 1));
        assert_eq!(outcome.combat().map(|c| c.winner), Some(Color::Blue));
        assert_eq!(outcome.removed_pieces[0].reason, RemovalReason::CombatLoss);
        assert_eq!(outcome.removed_pieces[1].row, Some(0));
        assert_eq!(outcome.snapshot.current_player(), Color::Blue);
    }

    #[test]
    fn null_combat_is_absent() {
        let frame = format!(
            r#"{{"event": "ai_moved", "data": {{"row": 0, "col": 0, "piece": null, "combat": null, "removed_pieces": [], "game_state": {STATE}}}}}"#
        );
        let ServerMessage::AiMoved(outcome) = ServerMessage::decode(&frame).unwrap() else {
            panic!("expected ai_moved");
        };
        assert!(outcome.combat().is_none());
    }

    #[test]
    fn generic_error_uses_plain_error_event() {
        let message = ServerMessage::decode(r#"{"event": "error", "data": {"message": "No active game"}}"#)
            .unwrap();
        assert_eq!(
            message,
            ServerMessage::GenericError(MessagePayload::new("No active game"))
        );
        assert_eq!(message.kind(), "error");
    }

    #[test]
    fn replay_messages_use_move_number() {
        let frame = format!(
            r#"{{"event": "replay_goto", "data": {{"move_number": 4, "total_moves": 9, "game_state": {STATE}}}}}"#
        );
        let ServerMessage::ReplayGoto(position) = ServerMessage::decode(&frame).unwrap() else {
            panic!("expected replay_goto");
        };
        assert_eq!(position.move_number, 4);

        let ack = ServerMessage::decode(r#"{"event": "replay_playing", "data": {"is_playing": true}}"#)
            .unwrap();
        assert_eq!(
            ack,
            ServerMessage::ReplayPlaying(PlaybackAck {
                is_playing: Some(true)
            })
        );
    }

    #[test]
    fn unknown_event_is_a_decode_error() {
        let err = ServerMessage::decode(r#"{"event": "teleport", "data": {}}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
    }

    #[test]
    fn intents_encode_in_wire_shape() {
        let place = ClientIntent::PlacePiece {
            row: 3,
            col: 1,
            piece_index: 2,
        };
        let value: serde_json::Value = serde_json::from_str(&place.encode().unwrap()).unwrap();
        assert_eq!(value["event"], "place_piece");
        assert_eq!(value["data"]["piece_index"], 2);

        let rotate: serde_json::Value =
            serde_json::from_str(&ClientIntent::RotatePiece.encode().unwrap()).unwrap();
        assert_eq!(rotate["event"], "rotate_piece");
        assert!(rotate.get("data").is_none());
    }

    #[test]
    fn setup_for_mode_assigns_strategies_to_ai_only() {
        let setup = GameSetup::for_mode(GameMode::HumanVsAi);
        assert_eq!(setup.red_type, PlayerKind::Human);
        assert_eq!(setup.red_strategy, None);
        assert_eq!(setup.blue_strategy, Some(Strategy::Defensive));
        assert_eq!("ai_vs_ai".parse::<GameMode>().unwrap(), GameMode::AiVsAi);
    }
}
