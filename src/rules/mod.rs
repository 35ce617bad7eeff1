//! Go Fish rules.
//!
//! - [`GameEngine`]: the turn-by-turn state machine
//! - [`GameState`]: `NotStarted`, `Playing`, `GameOver`
//! - [`GameResult`]: winner or tie, decided on book counts

pub mod engine;
pub mod outcome;

pub use engine::GameEngine;
pub use outcome::{GameResult, GameState};
