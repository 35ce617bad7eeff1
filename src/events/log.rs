//! Append-only event history with a single synchronous subscriber.

use im::Vector;
use tracing::trace;

use super::event::GameEvent;

/// Subscriber invoked once per emitted event, on the emitting thread.
///
/// The callback only sees `&GameEvent`; it cannot reach back into the engine
/// that owns the log.
pub type EventCallback = Box<dyn FnMut(&GameEvent)>;

/// Ordered event history plus an optional subscriber slot.
///
/// `im::Vector` makes cloning the history O(1), so presenters can take a
/// snapshot of the transcript without copying it.
#[derive(Default)]
pub struct EventLog {
    history: Vector<GameEvent>,
    callback: Option<EventCallback>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and deliver it to the subscriber, in that order.
    pub fn emit(&mut self, event: GameEvent) {
        trace!(kind = %event.kind, "{}", event.message);
        self.history.push_back(event.clone());
        if let Some(callback) = self.callback.as_mut() {
            callback(&event);
        }
    }

    /// Install the subscriber, dropping any previous one.
    pub fn set_callback(&mut self, callback: EventCallback) {
        self.callback = Some(callback);
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    #[must_use]
    pub fn last(&self) -> Option<&GameEvent> {
        self.history.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drop the history. The subscriber stays registered.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("history", &self.history.len())
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::events::EventKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_appends_in_order() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        assert!(log.last().is_none());

        log.emit(GameEvent::game_started());
        log.emit(GameEvent::turn_started(PlayerId::One));

        assert_eq!(log.len(), 2);
        assert_eq!(log.history()[0].kind, EventKind::GameStarted);
        assert_eq!(log.last().map(|e| e.kind), Some(EventKind::TurnStarted));
    }

    #[test]
    fn test_callback_sees_every_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut log = EventLog::new();
        log.set_callback(Box::new(move |e: &GameEvent| sink.borrow_mut().push(e.kind)));

        log.emit(GameEvent::game_started());
        log.emit(GameEvent::turn_started(PlayerId::Two));

        assert_eq!(*seen.borrow(), vec![EventKind::GameStarted, EventKind::TurnStarted]);
    }

    #[test]
    fn test_replacing_callback_discards_previous() {
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));

        let mut log = EventLog::new();
        let sink = Rc::clone(&first);
        log.set_callback(Box::new(move |_: &GameEvent| *sink.borrow_mut() += 1));
        log.emit(GameEvent::game_started());

        let sink = Rc::clone(&second);
        log.set_callback(Box::new(move |_: &GameEvent| *sink.borrow_mut() += 1));
        log.emit(GameEvent::game_started());

        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 1);

        log.clear_callback();
        log.emit(GameEvent::game_started());
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn test_clear_keeps_callback() {
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let mut log = EventLog::new();
        log.set_callback(Box::new(move |_: &GameEvent| *sink.borrow_mut() += 1));
        log.emit(GameEvent::game_started());

        log.clear();
        assert!(log.is_empty());

        log.emit(GameEvent::game_started());
        assert_eq!(*calls.borrow(), 2);
    }
}
