//! Core game types: cards, hands, players, RNG, configuration.
//!
//! Everything here is plain data with no knowledge of turn order or events;
//! the rules live in `rules`.

pub mod card;
pub mod config;
pub mod hand;
pub mod player;
pub mod rng;

pub use card::{full_deck, Card, Rank, RankSet, Suit, DECK_SIZE};
pub use config::{GameConfig, DEFAULT_HAND_SIZE};
pub use hand::{Hand, RankBatch, BOOK_SIZE};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
