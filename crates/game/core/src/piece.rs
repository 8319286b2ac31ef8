//! Pieces, pip patterns, and rotation angles.
use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::color::Color;

/// Edge length of a piece's pip grid.
pub const PIP_GRID: usize = 3;

/// 3×3 pip pattern; each cell is empty or marked with its owner's color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pips(pub [[Option<Color>; PIP_GRID]; PIP_GRID]);

impl Pips {
    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        self.0
            .get(row)
            .and_then(|cells| cells.get(col))
            .is_some_and(Option::is_some)
    }

    /// Number of marked pips.
    pub fn count(&self) -> usize {
        self.0.iter().flatten().filter(|pip| pip.is_some()).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Color>; PIP_GRID]> {
        self.0.iter()
    }
}

/// An unplaced piece held in a player's pool.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(alias = "player_color")]
    pub color: Color,
    pub pips: Pips,
    pub power: u32,
}

impl Piece {
    pub fn new(color: Color, pips: Pips, power: u32) -> Self {
        Self { color, pips, power }
    }
}

/// A piece on the board, viewed together with its cell.
///
/// The owning color is the piece's own color; the board never stores a
/// separate owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedPiece<'a> {
    pub cell: Cell,
    pub piece: &'a Piece,
}

impl PlacedPiece<'_> {
    pub fn owner(&self) -> Color {
        self.piece.color
    }
}

/// Discrete rotation angle assigned by the remote authority.
///
/// The client never advances the angle itself; it only echoes what the
/// authority reports. Serialized as degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Quarter turns clockwise (0..=3), the form used in move logs.
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(format!("unsupported rotation angle {other}")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Pieces in a pool that share an identical pip pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolGroup<'a> {
    /// Representative piece (the first occurrence).
    pub piece: &'a Piece,
    /// Pool indices of every member, ascending.
    pub indices: Vec<usize>,
}

impl PoolGroup<'_> {
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    /// Index submitted when the group is selected.
    pub fn first_index(&self) -> usize {
        self.indices[0]
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}

/// Groups pool pieces by pip pattern, preserving first-occurrence order.
pub fn group_pool(pieces: &[Piece]) -> Vec<PoolGroup<'_>> {
    let mut groups: Vec<PoolGroup<'_>> = Vec::new();

    for (index, piece) in pieces.iter().enumerate() {
        match groups.iter_mut().find(|group| group.piece.pips == piece.pips) {
            Some(group) => group.indices.push(index),
            None => groups.push(PoolGroup {
                piece,
                indices: vec![index],
            }),
        }
    }

    groups
}
