//! Game event records.
//!
//! One `GameEvent` is produced per state transition. Events are immutable
//! once emitted; the ordered sequence of them is the game transcript.

use serde::{Deserialize, Serialize};

use crate::core::{Card, PlayerId, Rank};
use crate::rules::GameResult;

/// What kind of transition an event records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    GameStarted,
    TurnStarted,
    RequestMade,
    CardsTransferred,
    GoFish,
    CardDrawn,
    BookFormed,
    TurnEnded,
    GameEnded,
}

impl EventKind {
    /// Stable upper-case tag, e.g. `"CARDS_TRANSFERRED"`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            EventKind::GameStarted => "GAME_STARTED",
            EventKind::TurnStarted => "TURN_STARTED",
            EventKind::RequestMade => "REQUEST_MADE",
            EventKind::CardsTransferred => "CARDS_TRANSFERRED",
            EventKind::GoFish => "GO_FISH",
            EventKind::CardDrawn => "CARD_DRAWN",
            EventKind::BookFormed => "BOOK_FORMED",
            EventKind::TurnEnded => "TURN_ENDED",
            EventKind::GameEnded => "GAME_ENDED",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single recorded transition.
///
/// Which optional fields are set depends on `kind`:
///
/// | kind                | player | opponent | rank | count | card | result |
/// |---------------------|--------|----------|------|-------|------|--------|
/// | `TurnStarted`       | yes    |          |      |       |      |        |
/// | `RequestMade`       | yes    | yes      | yes  |       |      |        |
/// | `CardsTransferred`  | yes    | yes      | yes  | yes   |      |        |
/// | `GoFish`            | yes    | yes      | yes  |       |      |        |
/// | `CardDrawn`         | yes    |          |      |       | yes  |        |
/// | `BookFormed`        | yes    |          | yes  |       |      |        |
/// | `TurnEnded`         | yes    | yes      |      |       |      |        |
/// | `GameEnded`         |        |          |      |       |      | yes    |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub player: Option<PlayerId>,
    pub opponent: Option<PlayerId>,
    pub rank: Option<Rank>,
    pub count: Option<u32>,
    pub card: Option<Card>,
    pub result: Option<GameResult>,
    /// Human-readable description for logs and on-screen transcripts.
    pub message: String,
}

impl GameEvent {
    /// Create a new event with just a kind and message.
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            player: None,
            opponent: None,
            rank: None,
            count: None,
            card: None,
            result: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    #[must_use]
    pub fn with_opponent(mut self, opponent: PlayerId) -> Self {
        self.opponent = Some(opponent);
        self
    }

    #[must_use]
    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = Some(rank);
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    #[must_use]
    pub fn with_result(mut self, result: GameResult) -> Self {
        self.result = Some(result);
        self
    }
}

/// Constructors for every event the engine emits.
impl GameEvent {
    pub fn game_started() -> Self {
        Self::new(EventKind::GameStarted, "New game started!")
    }

    pub fn turn_started(player: PlayerId) -> Self {
        Self::new(EventKind::TurnStarted, format!("{}'s turn", player)).with_player(player)
    }

    pub fn request_made(player: PlayerId, rank: Rank) -> Self {
        let opponent = player.opponent();
        Self::new(
            EventKind::RequestMade,
            format!("{} asks {} for {}", player, opponent, rank.plural()),
        )
        .with_player(player)
        .with_opponent(opponent)
        .with_rank(rank)
    }

    pub fn cards_transferred(player: PlayerId, rank: Rank, count: u32) -> Self {
        let opponent = player.opponent();
        Self::new(
            EventKind::CardsTransferred,
            format!("{} gives {} {} to {}", opponent, count, rank.plural(), player),
        )
        .with_player(player)
        .with_opponent(opponent)
        .with_rank(rank)
        .with_count(count)
    }

    pub fn go_fish(player: PlayerId, rank: Rank) -> Self {
        let opponent = player.opponent();
        Self::new(EventKind::GoFish, format!("{} says: Go Fish!", opponent))
            .with_player(player)
            .with_opponent(opponent)
            .with_rank(rank)
    }

    pub fn card_drawn(player: PlayerId, card: Card) -> Self {
        Self::new(EventKind::CardDrawn, format!("{} draws: {}", player, card))
            .with_player(player)
            .with_card(card)
    }

    pub fn book_formed(player: PlayerId, rank: Rank) -> Self {
        Self::new(
            EventKind::BookFormed,
            format!("{} forms a book of {}!", player, rank.plural()),
        )
        .with_player(player)
        .with_rank(rank)
    }

    pub fn turn_ended(player: PlayerId) -> Self {
        let opponent = player.opponent();
        Self::new(
            EventKind::TurnEnded,
            format!("{}'s turn ends, {} plays next", player, opponent),
        )
        .with_player(player)
        .with_opponent(opponent)
    }

    pub fn game_ended(result: GameResult) -> Self {
        let winner = match result {
            GameResult::Winner(player) => player.to_string(),
            GameResult::Tie => "Tie".to_string(),
        };
        Self::new(EventKind::GameEnded, format!("Game Over! Winner: {}", winner)).with_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Suit;

    fn rank(n: u8) -> Rank {
        Rank::new(n).unwrap()
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(EventKind::CardsTransferred.tag(), "CARDS_TRANSFERRED");
        assert_eq!(format!("{}", EventKind::GoFish), "GO_FISH");
    }

    #[test]
    fn test_builder() {
        let event = GameEvent::new(EventKind::CardsTransferred, "x")
            .with_player(PlayerId::One)
            .with_opponent(PlayerId::Two)
            .with_rank(rank(7))
            .with_count(3);

        assert_eq!(event.kind, EventKind::CardsTransferred);
        assert_eq!(event.player, Some(PlayerId::One));
        assert_eq!(event.opponent, Some(PlayerId::Two));
        assert_eq!(event.rank, Some(rank(7)));
        assert_eq!(event.count, Some(3));
        assert_eq!(event.card, None);
        assert_eq!(event.result, None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(GameEvent::turn_started(PlayerId::Two).message, "AI2's turn");
        assert_eq!(
            GameEvent::request_made(PlayerId::One, Rank::QUEEN).message,
            "AI1 asks AI2 for Queens"
        );
        assert_eq!(
            GameEvent::cards_transferred(PlayerId::One, rank(7), 3).message,
            "AI2 gives 3 7s to AI1"
        );
        assert_eq!(GameEvent::go_fish(PlayerId::Two, rank(4)).message, "AI1 says: Go Fish!");
        assert_eq!(
            GameEvent::card_drawn(PlayerId::One, Card::new(Rank::ACE, Suit::Spades)).message,
            "AI1 draws: Ace of Spades"
        );
        assert_eq!(
            GameEvent::game_ended(GameResult::Winner(PlayerId::Two)).message,
            "Game Over! Winner: AI2"
        );
        assert_eq!(GameEvent::game_ended(GameResult::Tie).message, "Game Over! Winner: Tie");
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::book_formed(PlayerId::Two, Rank::KING);
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
