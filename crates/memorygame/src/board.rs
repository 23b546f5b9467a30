//! Difficulty tiers and their grid geometry.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A difficulty tier, fixing the board's card count and grid width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardSize {
    /// 8 cards on a 2-wide grid.
    Easy,
    /// 18 cards on a 3-wide grid.
    #[default]
    Medium,
    /// 24 cards on a 4-wide grid.
    Hard,
}

impl BoardSize {
    const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// All tiers, easiest first.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// Total number of cards on the board.
    #[must_use]
    pub const fn num_cards(self) -> usize {
        match self {
            Self::Easy => 8,
            Self::Medium => 18,
            Self::Hard => 24,
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Easy => 2,
            Self::Medium => 3,
            Self::Hard => 4,
        }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(self) -> usize {
        self.num_cards() / self.width()
    }

    /// Number of pairs to find.
    #[must_use]
    pub const fn num_pairs(self) -> usize {
        self.num_cards() / 2
    }

    /// Find the tier holding exactly `num_cards` cards.
    #[must_use]
    pub fn from_num_cards(num_cards: usize) -> Option<Self> {
        Self::all().find(|size| size.num_cards() == num_cards)
    }

    /// Label shown when a board is set up, e.g. `Easy: 4 x 2`.
    #[must_use]
    pub fn description(self) -> String {
        let name = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        format!("{name}: {} x {}", self.height(), self.width())
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Error returned when a string names no difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBoardSizeError(String);

impl std::fmt::Display for ParseBoardSizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown difficulty '{}' (expected easy, medium or hard)",
            self.0
        )
    }
}

impl std::error::Error for ParseBoardSizeError {}

impl FromStr for BoardSize {
    type Err = ParseBoardSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseBoardSizeError(s.to_string())),
        }
    }
}
