//! Board grid as reported by the remote authority.
use serde::{Deserialize, Serialize};

use crate::piece::{Piece, PlacedPiece};
use crate::snapshot::SnapshotError;

/// Board coordinates. Row 0 is the top edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Fixed-size grid of optional placed pieces.
///
/// Invariant: `grid.len() == height` and every row has `width` entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    width: usize,
    height: usize,
    grid: Vec<Vec<Option<Piece>>>,
}

#[derive(Deserialize)]
struct RawBoard {
    width: usize,
    height: usize,
    grid: Vec<Vec<Option<Piece>>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = SnapshotError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        Board::from_grid(raw.width, raw.height, raw.grid)
    }
}

impl Board {
    /// Creates an empty board.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![None; width]; height],
        }
    }

    pub fn from_grid(
        width: usize,
        height: usize,
        grid: Vec<Vec<Option<Piece>>>,
    ) -> Result<Self, SnapshotError> {
        if grid.len() != height || grid.iter().any(|row| row.len() != width) {
            return Err(SnapshotError::GridShape { width, height });
        }
        Ok(Self {
            width,
            height,
            grid,
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Converts raw (possibly negative) input coordinates into a cell, or
    /// `None` when they fall outside the board.
    pub fn locate(&self, row: i64, col: i64) -> Option<Cell> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.height && col < self.width).then_some(Cell::new(row, col))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    pub fn piece_at(&self, cell: Cell) -> Option<&Piece> {
        self.grid.get(cell.row)?.get(cell.col)?.as_ref()
    }

    /// Returns a copy of this board with `piece` at `cell`.
    ///
    /// Only used by tests and local previews; the authoritative board always
    /// comes from the remote authority.
    pub fn with_piece(mut self, cell: Cell, piece: Piece) -> Self {
        if let Some(slot) = self
            .grid
            .get_mut(cell.row)
            .and_then(|row| row.get_mut(cell.col))
        {
            *slot = Some(piece);
        }
        self
    }

    /// Iterates over every occupied cell in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = PlacedPiece<'_>> {
        self.grid.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, slot)| {
                slot.as_ref().map(|piece| PlacedPiece {
                    cell: Cell::new(row, col),
                    piece,
                })
            })
        })
    }
}
