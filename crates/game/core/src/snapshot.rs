//! Authoritative game-state snapshots.
//!
//! A [`GameSnapshot`] is replaced wholesale on every update and never
//! mutated in place. Deserialization enforces the structural invariants so
//! downstream code can rely on them without re-checking.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::color::Color;
use crate::piece::Piece;

/// Structural violations detected while decoding a snapshot.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("board grid does not match declared size {width}x{height}")]
    GridShape { width: usize, height: usize },

    #[error("snapshot names a winner but the game is not over")]
    WinnerWithoutGameOver,

    #[error("snapshot reports game over without a winner")]
    GameOverWithoutWinner,
}

/// Unplaced pieces per color, in hand order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pools {
    pub red: Vec<Piece>,
    pub blue: Vec<Piece>,
}

impl Pools {
    pub fn of(&self, color: Color) -> &[Piece] {
        match color {
            Color::Red => &self.red,
            Color::Blue => &self.blue,
        }
    }
}

/// Complete description of board, turn, pools, and outcome at one point in
/// game history.
///
/// Invariant: `winner.is_some() == game_over`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot", into = "RawSnapshot")]
pub struct GameSnapshot {
    board: Board,
    current_player: Color,
    pools: Pools,
    turn_count: u32,
    winner: Option<Color>,
}

impl GameSnapshot {
    /// Builds an in-progress snapshot (no winner).
    pub fn in_progress(board: Board, current_player: Color, pools: Pools, turn_count: u32) -> Self {
        Self {
            board,
            current_player,
            pools,
            turn_count,
            winner: None,
        }
    }

    /// Returns this snapshot marked as finished with `winner`.
    pub fn finished(mut self, winner: Color) -> Self {
        self.winner = Some(winner);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    pub fn pool(&self, color: Color) -> &[Piece] {
        self.pools.of(color)
    }

    pub fn pieces_remaining(&self, color: Color) -> usize {
        self.pools.of(color).len()
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawSnapshot {
    board: Board,
    current_player: Color,
    turn_count: u32,
    game_over: bool,
    winner: Option<Color>,
    #[serde(default)]
    red_pieces: Vec<Piece>,
    #[serde(default)]
    blue_pieces: Vec<Piece>,
    #[serde(default)]
    red_pieces_remaining: Option<usize>,
    #[serde(default)]
    blue_pieces_remaining: Option<usize>,
}

impl TryFrom<RawSnapshot> for GameSnapshot {
    type Error = SnapshotError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        match (raw.game_over, raw.winner) {
            (false, Some(_)) => return Err(SnapshotError::WinnerWithoutGameOver),
            (true, None) => return Err(SnapshotError::GameOverWithoutWinner),
            _ => {}
        }

        for (color, declared, pool) in [
            (Color::Red, raw.red_pieces_remaining, &raw.red_pieces),
            (Color::Blue, raw.blue_pieces_remaining, &raw.blue_pieces),
        ] {
            if let Some(declared) = declared
                && declared != pool.len()
            {
                tracing::debug!(
                    "{} pool count {} disagrees with {} listed pieces; using the list",
                    color,
                    declared,
                    pool.len()
                );
            }
        }

        Ok(Self {
            board: raw.board,
            current_player: raw.current_player,
            pools: Pools {
                red: raw.red_pieces,
                blue: raw.blue_pieces,
            },
            turn_count: raw.turn_count,
            winner: raw.winner,
        })
    }
}

impl From<GameSnapshot> for RawSnapshot {
    fn from(snapshot: GameSnapshot) -> Self {
        Self {
            board: snapshot.board,
            current_player: snapshot.current_player,
            turn_count: snapshot.turn_count,
            game_over: snapshot.winner.is_some(),
            winner: snapshot.winner,
            red_pieces_remaining: Some(snapshot.pools.red.len()),
            blue_pieces_remaining: Some(snapshot.pools.blue.len()),
            red_pieces: snapshot.pools.red,
            blue_pieces: snapshot.pools.blue,
        }
    }
}
