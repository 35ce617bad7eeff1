//! # go-fish
//!
//! A deterministic two-player Go Fish rule engine.
//!
//! ## Design Principles
//!
//! 1. **Single-Step Driver**: `GameEngine::step_game` performs at most one
//!    request/response cycle, so any presenter can pace the game (one step
//!    per frame, or as fast as possible).
//!
//! 2. **Reproducible**: the only randomness is the deck shuffle, drawn from a
//!    seeded ChaCha8 stream; the AI always asks for its lowest eligible rank.
//!
//! 3. **Events As Transcript**: every transition is recorded as a
//!    `GameEvent` and handed synchronously to one registered callback.
//!
//! ## Modules
//!
//! - `core`: Cards, hands, players, RNG, configuration
//! - `events`: Event records and the append-only event log
//! - `rules`: The game engine, its lifecycle state and results
//! - `session`: Headless presenter and event-to-cue notifier
//! - `error`: Construction-time errors

pub mod core;
pub mod error;
pub mod events;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Card, GameConfig, GameRng, GameRngState, Hand, PlayerId, PlayerMap, Rank, RankSet, Suit,
};

pub use crate::error::FishError;

pub use crate::events::{EventCallback, EventKind, EventLog, GameEvent};

pub use crate::rules::{GameEngine, GameResult, GameState};

pub use crate::session::{Command, Cue, CuePlayer, MessageLog, Notifier, Session, UiState};
