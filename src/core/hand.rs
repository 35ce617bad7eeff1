//! A player's hand.
//!
//! The hand is always sorted by `Card` ordering. Every mutating method
//! restores that order before returning, so callers never sort by hand.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, Rank, RankSet};

/// Cards of a single rank moved as one batch (at most four exist).
pub type RankBatch = SmallVec<[Card; 4]>;

/// Number of cards of one rank that make a book.
pub const BOOK_SIZE: usize = 4;

/// Sorted collection of cards held by one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand from arbitrary cards, sorting them.
    #[must_use]
    pub fn from_cards(mut cards: Vec<Card>) -> Self {
        cards.sort();
        Self { cards }
    }

    /// Cards in canonical (rank, suit) order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards of `rank` held.
    #[must_use]
    pub fn count(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank == rank).count()
    }

    #[must_use]
    pub fn holds(&self, rank: Rank) -> bool {
        self.cards.iter().any(|c| c.rank == rank)
    }

    /// Insert one card at its sorted position.
    pub fn insert(&mut self, card: Card) {
        let pos = self.cards.partition_point(|c| *c < card);
        self.cards.insert(pos, card);
    }

    /// Add several cards, then re-sort.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
        self.cards.sort();
    }

    /// Remove and return every card of `rank`.
    pub fn take_rank(&mut self, rank: Rank) -> RankBatch {
        let taken: RankBatch = self.cards.iter().copied().filter(|c| c.rank == rank).collect();
        self.cards.retain(|c| c.rank != rank);
        taken
    }

    /// Lowest rank held that is not in `denied`.
    ///
    /// This is the whole AI: always ask for the smallest eligible rank, which
    /// keeps play reproducible for a given shuffle.
    #[must_use]
    pub fn lowest_rank_excluding(&self, denied: RankSet) -> Option<Rank> {
        // Sorted by rank, so the first eligible card carries the answer.
        self.cards
            .iter()
            .map(|c| c.rank)
            .find(|&rank| !denied.contains(rank))
    }

    /// Remove every complete book, returning the book ranks in increasing
    /// order.
    pub fn extract_books(&mut self) -> SmallVec<[Rank; 4]> {
        let mut books = SmallVec::new();
        for rank in Rank::all() {
            if self.count(rank) == BOOK_SIZE {
                self.cards.retain(|c| c.rank != rank);
                books.push(rank);
            }
        }
        self.cards.sort();
        books
    }
}
