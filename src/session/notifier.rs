//! Event-to-cue dispatch.
//!
//! The notifier listens to the engine's event stream and turns selected event
//! kinds into cues. How a cue is played (a sound, a log line, nothing) is up
//! to the [`CuePlayer`] it wraps.
//!
//! ```
//! use go_fish::events::GameEvent;
//! use go_fish::rules::GameResult;
//! use go_fish::session::{Cue, Notifier};
//!
//! let mut notifier = Notifier::new(|_cue: Cue, _volume: f32| {});
//! let cue = notifier.notify(&GameEvent::game_ended(GameResult::Tie));
//! assert_eq!(cue, Some(Cue::Victory));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::events::{EventCallback, EventKind, GameEvent};

/// A named side effect triggered by an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Cards changed hands.
    CardMove,
    /// The game finished.
    Victory,
}

impl Cue {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Cue::CardMove => "card_move",
            Cue::Victory => "victory",
        }
    }
}

/// Plays cues. Implementations must not block if the caller needs the engine
/// step to stay fast; the notifier calls this inline.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue, volume: f32);
}

impl<F> CuePlayer for F
where
    F: FnMut(Cue, f32),
{
    fn play(&mut self, cue: Cue, volume: f32) {
        self(cue, volume)
    }
}

/// Maps event kinds to cues and forwards them to a [`CuePlayer`].
pub struct Notifier<P> {
    player: P,
    cues: FxHashMap<EventKind, Cue>,
    enabled: bool,
    volume: f32,
}

impl<P: CuePlayer> Notifier<P> {
    /// Create a notifier with the default cue table: `GameEnded` plays
    /// `Victory`, `CardsTransferred` plays `CardMove`.
    pub fn new(player: P) -> Self {
        let mut cues = FxHashMap::default();
        cues.insert(EventKind::GameEnded, Cue::Victory);
        cues.insert(EventKind::CardsTransferred, Cue::CardMove);
        Self {
            player,
            cues,
            enabled: true,
            volume: 1.0,
        }
    }

    /// Map another event kind to a cue (builder pattern).
    #[must_use]
    pub fn with_cue(mut self, kind: EventKind, cue: Cue) -> Self {
        self.cues.insert(kind, cue);
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the volume, clamped to 0.0..=1.0.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play the cue for `event`, if any. Returns the cue that was played.
    pub fn notify(&mut self, event: &GameEvent) -> Option<Cue> {
        if !self.enabled {
            return None;
        }
        let cue = *self.cues.get(&event.kind)?;
        self.player.play(cue, self.volume);
        Some(cue)
    }
}

impl<P: CuePlayer + 'static> Notifier<P> {
    /// Box this notifier as an engine event callback.
    pub fn into_callback(mut self) -> EventCallback {
        Box::new(move |event: &GameEvent| {
            self.notify(event);
        })
    }
}

impl<P> std::fmt::Debug for Notifier<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("cues", &self.cues)
            .field("enabled", &self.enabled)
            .field("volume", &self.volume)
            .finish()
    }
}
