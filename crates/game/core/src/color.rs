//! The two player colors.
use serde::{Deserialize, Serialize};

/// Player color. Red always moves first.
///
/// On the wire colors are single letters (`"R"` / `"B"`), matching the pip
/// markings inside pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "B")]
    Blue,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Red, Color::Blue];

    pub const fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    /// Single-letter code used on the wire and in compact logs.
    pub const fn code(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
        }
    }

    /// Upper-case label shown to players ("RED", "BLUE").
    pub const fn label(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Blue => "BLUE",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
