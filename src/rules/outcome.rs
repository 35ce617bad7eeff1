//! Lifecycle state and final result of a game.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Lifecycle of one engine: `NotStarted → Playing → GameOver`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    NotStarted,
    Playing,
    GameOver,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Strictly more books than the opponent.
    Winner(PlayerId),
    /// Equal book counts.
    Tie,
}

impl GameResult {
    /// Decide the result from final book counts.
    #[must_use]
    pub fn from_books(books_one: u32, books_two: u32) -> Self {
        match books_one.cmp(&books_two) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::One),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::Two),
            std::cmp::Ordering::Equal => GameResult::Tie,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(player) => write!(f, "{} wins", player),
            GameResult::Tie => f.write_str("Tie"),
        }
    }
}
