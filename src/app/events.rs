//! Outbound application events.
//!
//! The services emit these through the [`EventSink`](super::ports::EventSink)
//! port. Adapters on the other side decide what to do with them — today,
//! one tagged log line each.

use crate::config::Variant;
use crate::control::StatusRecord;
use crate::error::Error;
use crate::sequencer::Message;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A service has started (carries the variant it implements).
    Started(Variant),

    /// The beacon finished a message and is now playing `to`.
    MessageChanged { from: Message, to: Message },

    /// One thermostat cycle completed.
    Status(StatusRecord),

    /// The sensor read failed; the previous temperature was reused.
    SensorReadFailed { held_c: i16 },

    /// A peripheral call in the tick path failed and was skipped.
    PeripheralFault(Error),
}
