//! Shared data model for the Borderline client.
//!
//! `game-core` defines the authoritative snapshot the remote authority sends
//! after every change, the messages exchanged with it, and the move-log
//! format used by replays. Nothing here computes game outcomes: the remote
//! authority owns the rules, and these types only describe what it reports.
pub mod board;
pub mod color;
pub mod combat;
pub mod error;
pub mod piece;
pub mod protocol;
pub mod replay_log;
pub mod snapshot;

pub use board::{Board, Cell};
pub use color::Color;
pub use combat::{CombatReport, DefenderView, RemovalReason, RemovedPiece};
pub use error::{ErrorSeverity, ProtocolError};
pub use piece::{PIP_GRID, Piece, Pips, PlacedPiece, PoolGroup, Rotation, group_pool};
pub use protocol::{
    AiTurnPayload, ClientIntent, GameMode, GameSetup, MessagePayload, PendingPayload,
    PlacementOutcome, PlaybackAck, PlayerKind, ReplayLoaded, ReplayPosition, ServerMessage,
    StatusPayload, Strategy,
};
pub use replay_log::{MoveLog, MoveRecord, ReplayLoadError};
pub use snapshot::{GameSnapshot, Pools, SnapshotError};
