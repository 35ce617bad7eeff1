//! Collaborators that sit on either side of the engine.
//!
//! - [`Session`]: headless presenter that drives `step_game` once per frame
//! - [`Notifier`]: turns event kinds into cues for an audio or log backend

mod notifier;
mod presenter;

pub use notifier::{Cue, CuePlayer, Notifier};
pub use presenter::{Command, MessageLog, Session, UiState, DEFAULT_MAX_LOG_LINES};
