//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Go Fish here is strictly two-player: `PlayerId` is a two-valued enum and
//! every "player vs. opponent" branch is expressed through `opponent()`.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by a two-element array. Indexing by
//! `PlayerId` replaces swapping references between "my" and "their" state.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two automated players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    #[default]
    One,
    Two,
}

impl PlayerId {
    /// Both players, in seating order.
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// The other player.
    ///
    /// ```
    /// use go_fish::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
    /// assert_eq!(PlayerId::Two.opponent(), PlayerId::One);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlayerId::One => "AI1",
            PlayerId::Two => "AI2",
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use go_fish::core::{PlayerId, PlayerMap};
///
/// let mut books: PlayerMap<u32> = PlayerMap::default();
/// books[PlayerId::Two] += 1;
///
/// assert_eq!(books[PlayerId::One], 0);
/// assert_eq!(books[PlayerId::Two], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::ALL.map(factory),
        }
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
