//! Combat outcomes and piece removals reported alongside a placement.
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::piece::Piece;

/// Dice-roll combat resolved by the remote authority.
///
/// Only the rolls and the winner are guaranteed; the remaining fields are
/// filled when the authority reports them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    #[serde(default = "default_true")]
    pub combat_occurred: bool,
    pub attacker_roll: u32,
    pub defender_roll: u32,
    pub winner: Color,
    #[serde(default)]
    pub attacker_color: Option<Color>,
    #[serde(default)]
    pub defender_color: Option<Color>,
    #[serde(default)]
    pub attacker_power: Option<u32>,
    #[serde(default)]
    pub defender_power: Option<u32>,
    #[serde(default)]
    pub attacker_total: Option<u32>,
    #[serde(default)]
    pub defender_total: Option<u32>,
    #[serde(default)]
    pub defenders: Vec<DefenderView>,
}

fn default_true() -> bool {
    true
}

impl CombatReport {
    pub fn new(attacker_roll: u32, defender_roll: u32, winner: Color) -> Self {
        Self {
            combat_occurred: true,
            attacker_roll,
            defender_roll,
            winner,
            attacker_color: None,
            defender_color: None,
            attacker_power: None,
            defender_power: None,
            attacker_total: None,
            defender_total: None,
            defenders: Vec::new(),
        }
    }

    /// One-line summary, e.g. `RED 4 vs BLUE 2 - BLUE wins`.
    pub fn summary(&self) -> String {
        let attacker = self
            .attacker_color
            .map_or_else(|| "attacker".to_string(), |c| c.to_string());
        let defender = self
            .defender_color
            .map_or_else(|| "defender".to_string(), |c| c.to_string());
        format!(
            "{} {} vs {} {} - {} wins",
            attacker, self.attacker_roll, defender, self.defender_roll, self.winner
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenderView {
    pub row: usize,
    pub col: usize,
    pub power: u32,
}

/// Why a piece left the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    CombatLoss,
    Disconnected,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedPiece {
    pub reason: RemovalReason,
    #[serde(default)]
    pub row: Option<usize>,
    #[serde(default)]
    pub col: Option<usize>,
    #[serde(default)]
    pub piece: Option<Piece>,
}

impl RemovedPiece {
    pub fn new(reason: RemovalReason) -> Self {
        Self {
            reason,
            row: None,
            col: None,
            piece: None,
        }
    }
}
