//! Event stream emitted by the engine.
//!
//! ## Key Components
//!
//! - [`EventKind`]: tag for each kind of transition
//! - [`GameEvent`]: one immutable transition record
//! - [`EventLog`]: append-only history plus a single callback slot
//!
//! Delivery is synchronous: an event is appended to the history and handed
//! to the subscriber before the emitting engine call returns.

mod event;
mod log;

pub use event::{EventKind, GameEvent};
pub use log::{EventCallback, EventLog};
