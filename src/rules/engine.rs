//! The Go Fish rule engine.
//!
//! `GameEngine` owns every piece of game state and advances it one atomic
//! action per [`GameEngine::step_game`] call:
//!
//! 1. End check: pile empty with an empty hand, both hands empty, or pile
//!    empty with no legal request for either player.
//! 2. The player to move asks for the lowest rank it holds that it has not
//!    already been refused.
//! 3. The opponent hands over every card of that rank, or says "Go Fish" and
//!    the asker draws from the front of the pile.
//! 4. Books are extracted after every hand mutation.
//!
//! Each transition is appended to the event history and handed to the
//! registered callback before the call returns.
//!
//! ```
//! use go_fish::core::GameConfig;
//! use go_fish::rules::{GameEngine, GameState};
//!
//! let mut engine = GameEngine::new(GameConfig::new(42)).unwrap();
//! engine.start_new_game();
//!
//! while engine.step_game() {}
//!
//! assert_eq!(engine.state(), GameState::GameOver);
//! assert!(engine.result().is_some());
//! ```

use std::collections::VecDeque;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::outcome::{GameResult, GameState};
use crate::core::{
    full_deck, Card, GameConfig, GameRng, GameRngState, Hand, PlayerId, PlayerMap, Rank, RankSet, BOOK_SIZE,
    DECK_SIZE,
};
use crate::error::FishError;
use crate::events::{EventLog, GameEvent};

/// Everything one player owns during a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Seat {
    hand: Hand,
    books: u32,
    /// Ranks asked for and refused since this player last gained cards.
    denied: RankSet,
}

/// Deterministic two-player Go Fish state machine.
///
/// Not thread-safe by construction: the event callback is a non-`Send`
/// closure, so an engine stays on the thread that created it.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    rng: GameRng,
    state: GameState,
    seats: PlayerMap<Seat>,
    /// Front of the deque is the top of the pile.
    draw_pile: VecDeque<Card>,
    turn: PlayerId,
    result: Option<GameResult>,
    events: EventLog,
}

impl GameEngine {
    /// Create an engine in `NotStarted` state.
    ///
    /// Fails if `config` does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self, FishError> {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Create an engine that continues the shuffle stream captured by
    /// [`GameEngine::rng_state`] on another engine.
    pub fn from_rng_state(config: GameConfig, state: &GameRngState) -> Result<Self, FishError> {
        Self::with_rng(config, GameRng::from_state(state))
    }

    fn with_rng(config: GameConfig, rng: GameRng) -> Result<Self, FishError> {
        config.validate()?;
        let turn = config.first_player;
        Ok(Self {
            config,
            rng,
            state: GameState::NotStarted,
            seats: PlayerMap::default(),
            draw_pile: VecDeque::new(),
            turn,
            result: None,
            events: EventLog::new(),
        })
    }

    // === Lifecycle ===

    /// Reset, shuffle a fresh deck, deal and emit `GameStarted`.
    pub fn start_new_game(&mut self) {
        let mut deck = full_deck();
        self.rng.shuffle(&mut deck);
        self.begin(deck);
    }

    /// Like [`GameEngine::start_new_game`], but deal from `deck` as given.
    ///
    /// The first `hand_size` cards go to player One, the next `hand_size` to
    /// player Two, and the rest form the pile, front first. Returns an error
    /// and leaves the engine untouched unless `deck` is exactly the 52
    /// distinct cards.
    pub fn start_new_game_with_deck(&mut self, deck: Vec<Card>) -> Result<(), FishError> {
        validate_deck(&deck)?;
        self.begin(deck);
        Ok(())
    }

    fn begin(&mut self, deck: Vec<Card>) {
        self.reset();
        self.draw_pile = deck.into();

        let hand_size = self.config.hand_size;
        for player in PlayerId::ALL {
            let dealt: Vec<Card> = self.draw_pile.drain(..hand_size).collect();
            self.seats[player].hand = Hand::from_cards(dealt);
        }
        for player in PlayerId::ALL {
            self.collect_books(player);
        }

        self.state = GameState::Playing;
        self.turn = self.config.first_player;
        debug!(
            seed = self.rng.seed(),
            first = %self.turn,
            pile = self.draw_pile.len(),
            "game started"
        );
        self.events.emit(GameEvent::game_started());
    }

    /// Clear all game state and return to `NotStarted`.
    ///
    /// Emits nothing. The event callback and RNG position are kept.
    pub fn reset(&mut self) {
        self.seats = PlayerMap::default();
        self.draw_pile.clear();
        self.turn = self.config.first_player;
        self.result = None;
        self.state = GameState::NotStarted;
        self.events.clear();
    }

    // === Turn driver ===

    /// Perform at most one atomic action.
    ///
    /// Every time the turn passes, including the pass of a player with an
    /// empty hand, a `TurnEnded` event is emitted for the player giving it up.
    ///
    /// Returns `true` while the game continues and `false` once it is over.
    /// Outside `Playing` this does nothing and returns `false`.
    pub fn step_game(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }

        if self.is_game_over() {
            self.finish();
            return false;
        }

        let player = self.turn;
        let opponent = player.opponent();
        self.events.emit(GameEvent::turn_started(player));

        if self.seats[player].hand.is_empty() {
            self.pass_turn(player);
            return true;
        }

        let seat = &self.seats[player];
        let Some(rank) = seat.hand.lowest_rank_excluding(seat.denied) else {
            // Every held rank was refused. With cards still to draw the
            // refusals are stale, so forget them before handing over.
            if !self.draw_pile.is_empty() {
                self.seats[player].denied.clear();
            }
            self.pass_turn(player);
            return true;
        };

        if !self.seats[player].hand.holds(rank) {
            debug!(%player, %rank, "requested rank not in hand");
            self.pass_turn(player);
            return true;
        }

        self.events.emit(GameEvent::request_made(player, rank));

        if self.seats[opponent].hand.holds(rank) {
            self.transfer(player, rank);
        } else {
            self.go_fish(player, rank);
        }
        true
    }

    /// Opponent hands over every card of `rank`; `player` keeps the turn.
    fn transfer(&mut self, player: PlayerId, rank: Rank) {
        let opponent = player.opponent();
        let count = self.seats[opponent].hand.count(rank) as u32;
        self.events.emit(GameEvent::cards_transferred(player, rank, count));

        let taken = self.seats[opponent].hand.take_rank(rank);
        self.seats[player].hand.extend(taken);
        self.collect_books(player);
        self.seats[player].denied.clear();
    }

    /// Opponent has none: remember the refusal and draw from the pile.
    fn go_fish(&mut self, player: PlayerId, rank: Rank) {
        self.events.emit(GameEvent::go_fish(player, rank));
        self.seats[player].denied.insert(rank);

        let Some(card) = self.draw_pile.pop_front() else {
            self.pass_turn(player);
            return;
        };

        self.seats[player].hand.insert(card);
        self.events.emit(GameEvent::card_drawn(player, card));
        self.collect_books(player);

        if card.rank == rank {
            self.seats[player].denied.clear();
        } else {
            self.pass_turn(player);
        }
    }

    fn pass_turn(&mut self, player: PlayerId) {
        self.turn = player.opponent();
        self.events.emit(GameEvent::turn_ended(player));
    }

    /// Remove complete books from `player`'s hand, one event per book.
    fn collect_books(&mut self, player: PlayerId) {
        let books = self.seats[player].hand.extract_books();
        for rank in books {
            self.seats[player].books += 1;
            self.events.emit(GameEvent::book_formed(player, rank));
        }
    }

    fn finish(&mut self) {
        let result = GameResult::from_books(self.seats[PlayerId::One].books, self.seats[PlayerId::Two].books);
        self.result = Some(result);
        self.state = GameState::GameOver;
        debug!(
            %result,
            books_one = self.seats[PlayerId::One].books,
            books_two = self.seats[PlayerId::Two].books,
            events = self.events.len(),
            "game over"
        );
        self.events.emit(GameEvent::game_ended(result));
    }

    // === Queries ===

    /// Whether the end condition holds for the current cards.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        let pile_empty = self.draw_pile.is_empty();
        let one_empty = self.seats[PlayerId::One].hand.is_empty();
        let two_empty = self.seats[PlayerId::Two].hand.is_empty();

        (pile_empty && (one_empty || two_empty)) || (one_empty && two_empty) || (pile_empty && self.no_valid_moves())
    }

    /// Neither player has a rank left that it has not been refused.
    fn no_valid_moves(&self) -> bool {
        self.seats
            .iter()
            .all(|(_, seat)| seat.hand.lowest_rank_excluding(seat.denied).is_none())
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A player's hand in (rank, suit) order.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        self.seats[player].hand.cards()
    }

    /// Remaining pile, front first.
    #[must_use]
    pub fn draw_pile(&self) -> &VecDeque<Card> {
        &self.draw_pile
    }

    #[must_use]
    pub fn books(&self, player: PlayerId) -> u32 {
        self.seats[player].books
    }

    #[must_use]
    pub fn denied_ranks(&self, player: PlayerId) -> RankSet {
        self.seats[player].denied
    }

    #[must_use]
    pub fn current_turn(&self) -> PlayerId {
        self.turn
    }

    /// Final result; `None` until the game reaches `GameOver`.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        self.events.history()
    }

    #[must_use]
    pub fn last_event(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    /// Cards in hands, in the pile, and locked in books.
    #[must_use]
    pub fn accounted_cards(&self) -> usize {
        let held: usize = self.seats.iter().map(|(_, seat)| seat.hand.len()).sum();
        let booked: usize = self.seats.iter().map(|(_, seat)| seat.books as usize * BOOK_SIZE).sum();
        held + self.draw_pile.len() + booked
    }

    /// Position of the shuffle stream, for resuming it elsewhere.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Subscription ===

    /// Register the single event subscriber, replacing any previous one.
    ///
    /// The callback runs synchronously inside the engine call that emits the
    /// event. It receives only the event and cannot touch engine state.
    pub fn set_event_callback(&mut self, callback: impl FnMut(&GameEvent) + 'static) {
        self.events.set_callback(Box::new(callback));
    }

    pub fn clear_event_callback(&mut self) {
        self.events.clear_callback();
    }
}

fn validate_deck(deck: &[Card]) -> Result<(), FishError> {
    if deck.len() != DECK_SIZE {
        return Err(FishError::InvalidDeck {
            reason: format!("expected {} cards, got {}", DECK_SIZE, deck.len()),
        });
    }
    let mut sorted = deck.to_vec();
    sorted.sort();
    sorted.dedup();
    if sorted.len() != DECK_SIZE {
        return Err(FishError::InvalidDeck {
            reason: format!("{} duplicate cards", DECK_SIZE - sorted.len()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Suit;
    use crate::events::EventKind;

    fn engine(seed: u64) -> GameEngine {
        GameEngine::new(GameConfig::new(seed)).unwrap()
    }

    #[test]
    fn test_new_engine_not_started() {
        let engine = engine(1);
        assert_eq!(engine.state(), GameState::NotStarted);
        assert!(engine.history().is_empty());
        assert!(engine.last_event().is_none());
        assert!(engine.result().is_none());
        assert_eq!(engine.current_turn(), PlayerId::One);
    }

    #[test]
    fn test_new_rejects_unplayable_hand_size() {
        let err = GameEngine::new(GameConfig::new(1).with_hand_size(30)).unwrap_err();
        assert_eq!(err, FishError::InvalidHandSize { hand_size: 30 });

        let err = GameEngine::new(GameConfig::new(1).with_hand_size(0)).unwrap_err();
        assert_eq!(err, FishError::InvalidHandSize { hand_size: 0 });

        let state = GameRng::new(1).state();
        let err = GameEngine::from_rng_state(GameConfig::new(1).with_hand_size(usize::MAX), &state).unwrap_err();
        assert_eq!(err, FishError::InvalidHandSize { hand_size: usize::MAX });
    }

    #[test]
    fn test_largest_hand_size_deals_whole_deck() {
        let mut engine = GameEngine::new(GameConfig::new(1).with_hand_size(26)).unwrap();
        engine.start_new_game();

        assert!(engine.draw_pile().is_empty());
        assert_eq!(engine.accounted_cards(), DECK_SIZE);
    }

    #[test]
    fn test_step_before_start_is_noop() {
        let mut engine = engine(1);
        assert!(!engine.step_game());
        assert_eq!(engine.state(), GameState::NotStarted);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_start_deals_and_emits() {
        let mut engine = engine(7);
        engine.start_new_game();

        assert_eq!(engine.state(), GameState::Playing);
        assert_eq!(engine.accounted_cards(), DECK_SIZE);
        assert_eq!(engine.last_event().map(|e| e.kind), Some(EventKind::GameStarted));
        assert_eq!(engine.current_turn(), PlayerId::One);
    }

    #[test]
    fn test_first_player_from_config() {
        let mut engine = GameEngine::new(GameConfig::new(7).with_first_player(PlayerId::Two)).unwrap();
        engine.start_new_game();
        assert_eq!(engine.current_turn(), PlayerId::Two);

        assert!(engine.step_game());
        let first_turn = engine
            .history()
            .iter()
            .find(|e| e.kind == EventKind::TurnStarted)
            .and_then(|e| e.player);
        assert_eq!(first_turn, Some(PlayerId::Two));
    }

    #[test]
    fn test_reset_clears_without_events() {
        let mut engine = engine(3);
        engine.start_new_game();
        for _ in 0..5 {
            engine.step_game();
        }

        engine.reset();

        assert_eq!(engine.state(), GameState::NotStarted);
        assert!(engine.history().is_empty());
        assert!(engine.draw_pile().is_empty());
        for player in PlayerId::ALL {
            assert!(engine.hand(player).is_empty());
            assert_eq!(engine.books(player), 0);
            assert!(engine.denied_ranks(player).is_empty());
        }
        assert!(!engine.step_game());
    }

    #[test]
    fn test_step_after_game_over_is_noop() {
        let mut engine = engine(11);
        engine.start_new_game();
        while engine.step_game() {}

        let len = engine.history().len();
        assert!(!engine.step_game());
        assert_eq!(engine.history().len(), len);
        assert_eq!(engine.last_event().map(|e| e.kind), Some(EventKind::GameEnded));
    }

    #[test]
    fn test_validate_deck() {
        assert!(validate_deck(&full_deck()).is_ok());

        let short = &full_deck()[..51];
        assert_eq!(
            validate_deck(short),
            Err(FishError::InvalidDeck {
                reason: "expected 52 cards, got 51".to_string()
            })
        );

        let mut duplicated = full_deck();
        duplicated[1] = duplicated[0];
        assert_eq!(
            validate_deck(&duplicated),
            Err(FishError::InvalidDeck {
                reason: "1 duplicate cards".to_string()
            })
        );
    }

    fn card(rank: u8, suit: Suit) -> Card {
        Card::new(Rank::new(rank).unwrap(), suit)
    }

    fn ranks(values: &[u8]) -> RankSet {
        values.iter().map(|&v| Rank::new(v).unwrap()).collect()
    }

    /// Engine mid-game with hand-placed cards.
    fn rigged(one: Vec<Card>, two: Vec<Card>, pile: Vec<Card>) -> GameEngine {
        let mut engine = engine(0);
        engine.seats[PlayerId::One].hand = Hand::from_cards(one);
        engine.seats[PlayerId::Two].hand = Hand::from_cards(two);
        engine.draw_pile = pile.into();
        engine.state = GameState::Playing;
        engine
    }

    fn kinds(engine: &GameEngine) -> Vec<EventKind> {
        engine.history().iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_no_requests_left_ends_game() {
        let mut engine = rigged(vec![card(2, Suit::Hearts)], vec![card(2, Suit::Diamonds)], vec![]);
        engine.seats[PlayerId::One].denied = ranks(&[2]);
        engine.seats[PlayerId::Two].denied = ranks(&[2]);
        engine.seats[PlayerId::One].books = 2;
        engine.seats[PlayerId::Two].books = 5;

        assert!(engine.is_game_over());
        assert!(!engine.step_game());
        assert_eq!(engine.state(), GameState::GameOver);
        assert_eq!(engine.result(), Some(GameResult::Winner(PlayerId::Two)));
        assert_eq!(kinds(&engine), vec![EventKind::GameEnded]);
        assert_eq!(
            engine.last_event().and_then(|e| e.result),
            Some(GameResult::Winner(PlayerId::Two))
        );
    }

    #[test]
    fn test_no_requests_left_equal_books_is_tie() {
        let mut engine = rigged(vec![card(4, Suit::Clubs)], vec![card(9, Suit::Spades)], vec![]);
        engine.seats[PlayerId::One].denied = ranks(&[4]);
        engine.seats[PlayerId::Two].denied = ranks(&[9]);
        engine.seats[PlayerId::One].books = 6;
        engine.seats[PlayerId::Two].books = 6;

        assert!(!engine.step_game());
        assert_eq!(engine.result(), Some(GameResult::Tie));
    }

    #[test]
    fn test_refusals_run_out_with_empty_pile() {
        let mut engine = rigged(vec![card(2, Suit::Hearts)], vec![card(3, Suit::Hearts)], vec![]);
        engine.seats[PlayerId::One].denied = ranks(&[2]);
        assert!(!engine.is_game_over());

        // One has nothing left to ask for and the pile is empty: refusals stay.
        assert!(engine.step_game());
        assert_eq!(engine.current_turn(), PlayerId::Two);
        assert_eq!(engine.denied_ranks(PlayerId::One), ranks(&[2]));

        // Two asks for 3s, is refused, and cannot draw.
        assert!(engine.step_game());
        assert_eq!(engine.denied_ranks(PlayerId::Two), ranks(&[3]));
        assert_eq!(engine.hand(PlayerId::Two), &[card(3, Suit::Hearts)]);

        assert!(engine.is_game_over());
        assert!(!engine.step_game());
        assert_eq!(engine.result(), Some(GameResult::Tie));
        assert_eq!(
            kinds(&engine),
            vec![
                EventKind::TurnStarted,
                EventKind::TurnEnded,
                EventKind::TurnStarted,
                EventKind::RequestMade,
                EventKind::GoFish,
                EventKind::TurnEnded,
                EventKind::GameEnded,
            ]
        );
    }

    #[test]
    fn test_stuck_player_with_cards_to_draw_forgets_refusals() {
        let mut engine = rigged(
            vec![card(2, Suit::Hearts)],
            vec![card(3, Suit::Hearts)],
            vec![card(5, Suit::Clubs)],
        );
        engine.seats[PlayerId::One].denied = ranks(&[2]);

        assert!(engine.step_game());
        assert_eq!(engine.current_turn(), PlayerId::Two);
        assert!(engine.denied_ranks(PlayerId::One).is_empty());
        assert_eq!(kinds(&engine), vec![EventKind::TurnStarted, EventKind::TurnEnded]);
    }

    #[test]
    fn test_empty_pile_and_empty_hand_ends_game() {
        let mut engine = rigged(vec![], vec![card(8, Suit::Diamonds)], vec![]);
        assert!(engine.is_game_over());
        assert!(!engine.step_game());
        assert_eq!(engine.result(), Some(GameResult::Tie));
    }

    #[test]
    fn test_empty_hand_with_pile_passes() {
        let mut engine = rigged(vec![], vec![card(8, Suit::Diamonds)], vec![card(1, Suit::Clubs)]);
        assert!(!engine.is_game_over());

        assert!(engine.step_game());
        assert_eq!(engine.current_turn(), PlayerId::Two);
        assert_eq!(engine.draw_pile().len(), 1);
    }

    #[test]
    fn test_rng_state_resumes_shuffle_stream() {
        let mut source = engine(99);
        source.start_new_game();
        let state = source.rng_state();
        source.start_new_game();

        let mut resumed = GameEngine::from_rng_state(GameConfig::new(99), &state).unwrap();
        resumed.start_new_game();

        assert_eq!(resumed.hand(PlayerId::One), source.hand(PlayerId::One));
        assert_eq!(resumed.draw_pile(), source.draw_pile());
    }
}
