//! Playing cards: ranks, suits, and the standard 52-card deck.
//!
//! ## Ordering
//!
//! `Card` orders by rank first, then by suit. Hands are kept sorted by this
//! ordering so that their contents have one canonical layout.
//!
//! ## Names
//!
//! ```
//! use go_fish::core::{Card, Rank, Suit};
//!
//! assert_eq!(Rank::ACE.name(), "Ace");
//! assert_eq!(Rank::QUEEN.plural(), "Queens");
//! assert_eq!(Card::new(Rank::KING, Suit::Spades).to_string(), "King of Spades");
//! ```

use serde::{Deserialize, Serialize};

/// Card rank, 1 (Ace) through 13 (King).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);

    /// Lowest and highest raw rank values.
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 13;

    /// Create a rank, returning `None` outside 1..=13.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw rank value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Iterate over all ranks in increasing order.
    pub fn all() -> impl Iterator<Item = Rank> {
        (Self::MIN..=Self::MAX).map(Rank)
    }

    /// Singular display name: "Ace", "7", "Jack", ...
    #[must_use]
    pub fn name(self) -> String {
        match self.0 {
            1 => "Ace".to_string(),
            11 => "Jack".to_string(),
            12 => "Queen".to_string(),
            13 => "King".to_string(),
            n => n.to_string(),
        }
    }

    /// Plural display name: "Aces", "7s", "Jacks", ...
    #[must_use]
    pub fn plural(self) -> String {
        match self.0 {
            1 => "Aces".to_string(),
            11 => "Jacks".to_string(),
            12 => "Queens".to_string(),
            13 => "Kings".to_string(),
            n => format!("{}s", n),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Card suit. Declaration order is the tie-break order within a rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Suit from its index 0..=3.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Suit::Hearts),
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Clubs),
            3 => Some(Suit::Spades),
            _ => None,
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single playing card.
///
/// Field order matters: the derived `Ord` compares rank before suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Build the unshuffled 52-card deck, suit by suit, Ace to King.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::all().map(move |rank| Card::new(rank, suit)))
        .collect()
}

/// Compact set of ranks backed by a bitmask.
///
/// Bit `n` is set when rank `n` is present; iteration is in increasing rank
/// order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankSet(u16);

impl RankSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Insert a rank. Returns true if it was not already present.
    pub fn insert(&mut self, rank: Rank) -> bool {
        let bit = 1u16 << rank.value();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    #[must_use]
    pub fn contains(&self, rank: Rank) -> bool {
        self.0 & (1u16 << rank.value()) != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Rank> + '_ {
        Rank::all().filter(move |&rank| self.contains(rank))
    }
}

impl FromIterator<Rank> for RankSet {
    fn from_iter<I: IntoIterator<Item = Rank>>(iter: I) -> Self {
        let mut set = RankSet::new();
        for rank in iter {
            set.insert(rank);
        }
        set
    }
}
