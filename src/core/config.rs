//! Game configuration.
//!
//! `GameConfig` fixes everything an engine needs before the first deal:
//! - `seed`: seed of the shuffle stream
//! - `hand_size`: cards dealt to each player (7 in standard two-player play)
//! - `first_player`: who moves first in every game
//!
//! ```
//! use go_fish::core::{GameConfig, PlayerId};
//!
//! let config = GameConfig::new(42)
//!     .with_hand_size(5)
//!     .with_first_player(PlayerId::Two)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.hand_size, 5);
//! ```

use serde::{Deserialize, Serialize};

use super::card::DECK_SIZE;
use super::PlayerId;
use crate::error::FishError;

/// Cards dealt to each player by default.
pub const DEFAULT_HAND_SIZE: usize = 7;

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the deck shuffle stream.
    pub seed: u64,

    /// Cards dealt to each player at game start.
    pub hand_size: usize,

    /// Player who takes the first turn.
    pub first_player: PlayerId,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameConfig {
    /// Create a configuration with standard rules and the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            hand_size: DEFAULT_HAND_SIZE,
            first_player: PlayerId::One,
        }
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    /// Check the configuration can be dealt from a single deck.
    pub fn validate(&self) -> Result<(), FishError> {
        if self.hand_size == 0 || self.hand_size > DECK_SIZE / 2 {
            return Err(FishError::InvalidHandSize {
                hand_size: self.hand_size,
            });
        }
        Ok(())
    }

    /// Validate and return the finished configuration.
    pub fn build(self) -> Result<Self, FishError> {
        self.validate()?;
        Ok(self)
    }
}
