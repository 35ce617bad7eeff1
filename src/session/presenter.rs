//! Headless presenter: screen state, frame pacing and the game log.
//!
//! A `Session` is what a UI loop talks to. It owns the engine, tracks which
//! screen is showing, advances the game one step per `update` while on the
//! gameplay screen, and mirrors event messages into a bounded log.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::rules::{GameEngine, GameResult, GameState};

/// Lines kept in the game log by default.
pub const DEFAULT_MAX_LOG_LINES: usize = 50;

/// Which screen the presenter is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UiState {
    #[default]
    Welcome,
    Gameplay,
    EndGame,
}

/// User-level commands (the "NEW GAME" and "EXIT" buttons).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    NewGame,
    Exit,
}

/// Bounded log of transcript lines, oldest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a line, dropping the oldest when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Engine plus presenter state.
#[derive(Debug)]
pub struct Session {
    engine: GameEngine,
    ui: UiState,
    running: bool,
    log: MessageLog,
    /// Number of engine events already copied into `log`.
    seen_events: usize,
}

impl Session {
    #[must_use]
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            ui: UiState::Welcome,
            running: true,
            log: MessageLog::new(DEFAULT_MAX_LOG_LINES),
            seen_events: 0,
        }
    }

    #[must_use]
    pub fn with_max_log_lines(mut self, lines: usize) -> Self {
        self.log = MessageLog::new(lines);
        self
    }

    /// React to a button press. `NewGame` always deals a fresh game, even
    /// over one in progress.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::NewGame => {
                if self.ui == UiState::Gameplay {
                    debug!("restarting a game in progress");
                }
                self.log.clear();
                self.seen_events = 0;
                self.engine.start_new_game();
                self.ui = UiState::Gameplay;
                self.sync_log();
            }
            Command::Exit => {
                info!("exit requested");
                self.running = false;
            }
        }
    }

    /// One frame: step the engine once if a game is in progress.
    ///
    /// Returns true if the engine was stepped.
    ///
    /// A game reset or finished behind the session's back moves it to the
    /// matching screen instead.
    pub fn update(&mut self) -> bool {
        if !self.running || self.ui != UiState::Gameplay {
            return false;
        }
        match self.engine.state() {
            GameState::Playing => {}
            GameState::NotStarted => {
                debug!("engine was reset, back to welcome screen");
                self.ui = UiState::Welcome;
                self.log.clear();
                self.seen_events = 0;
                return false;
            }
            GameState::GameOver => {
                self.ui = UiState::EndGame;
                self.sync_log();
                return false;
            }
        }
        if !self.engine.step_game() {
            self.ui = UiState::EndGame;
        }
        self.sync_log();
        true
    }

    /// Drive frames until the end screen is reached or `max_frames` pass.
    pub fn run_to_end(&mut self, max_frames: usize) -> Option<GameResult> {
        for _ in 0..max_frames {
            if !self.update() {
                break;
            }
        }
        self.engine.result()
    }

    fn sync_log(&mut self) {
        let history = self.engine.history();
        for event in history.iter().skip(self.seen_events) {
            self.log.push(event.message.clone());
        }
        self.seen_events = history.len();
    }

    #[must_use]
    pub fn ui_state(&self) -> UiState {
        self.ui
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Mutable engine access, for registering the event callback.
    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }
}
