//! Interrupt-to-main-loop shared state.
//!
//! These are the only variables touched from both contexts. Each one has a
//! single kind of writer on one side and a single reader on the other:
//!
//! ```text
//! ┌──────────────┐  raise()            ┌──────────────┐
//! │ Timer ISR    │────▶ TickFlag ─────▶│              │ take()
//! │              │                     │              │
//! │ Button ISR   │────▶ MessageRequest▶│  Main Loop   │ load()
//! │ (beacon)     │  toggle()           │  (consumer)  │
//! │              │                     │              │
//! │ Button ISRs  │────▶ SetPointCell ─▶│              │ load()
//! │ (thermostat) │  raise()/lower()    │              │
//! └──────────────┘                     └──────────────┘
//! ```
//!
//! Everything is a plain atomic so the ISR side is wait-free. Handlers are
//! registered with a `&'static` reference to the one field they may
//! mutate, never to [`Signals`] as a whole.

use core::sync::atomic::{AtomicBool, AtomicI16, AtomicU8, AtomicU32, Ordering};

use crate::sequencer::Message;

// ── Tick flag ─────────────────────────────────────────────────

/// Single-bit tick signal raised by the timer and consumed by the main loop.
///
/// This is a flag, not a counter: if the timer fires twice before the main
/// loop services it, only one tick action runs. The lost raises are counted
/// separately in [`TickFlag::coalesced`] so the loop can report them.
#[derive(Debug)]
pub struct TickFlag {
    pending: AtomicBool,
    coalesced: AtomicU32,
}

impl TickFlag {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            coalesced: AtomicU32::new(0),
        }
    }

    /// Timer-context half. Sets the flag and returns immediately.
    pub fn raise(&self) {
        if self.pending.swap(true, Ordering::Release) {
            self.coalesced.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Main-loop half. Returns `true` exactly once per serviced tick and
    /// clears the flag in the same atomic step.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::Acquire)
    }

    /// Whether a tick is waiting to be serviced.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Total raises that landed on an already-set flag since boot.
    pub fn coalesced(&self) -> u32 {
        self.coalesced.load(Ordering::Relaxed)
    }
}

impl Default for TickFlag {
    fn default() -> Self {
        Self::new()
    }
}

// ── Requested message ─────────────────────────────────────────

/// The message the user has asked for. Written by button interrupts, read
/// by the sequencer only when it reaches a message boundary.
#[derive(Debug)]
pub struct MessageRequest(AtomicU8);

impl MessageRequest {
    pub const fn new(initial: Message) -> Self {
        Self(AtomicU8::new(initial as u8))
    }

    /// Flip between the two messages. Interrupt-safe.
    pub fn toggle(&self) {
        self.0.fetch_xor(1, Ordering::AcqRel);
    }

    pub fn load(&self) -> Message {
        Message::from_bits(self.0.load(Ordering::Acquire))
    }
}

// ── Set-point ─────────────────────────────────────────────────

/// Thermostat set-point in whole degrees Celsius.
///
/// Adjusted by exactly one per button edge with no clamping. At the `i16`
/// limits the value wraps, which is what the atomic add does natively.
#[derive(Debug)]
pub struct SetPointCell(AtomicI16);

impl SetPointCell {
    pub const fn new(initial: i16) -> Self {
        Self(AtomicI16::new(initial))
    }

    /// Interrupt-safe increment.
    pub fn raise(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    /// Interrupt-safe decrement.
    pub fn lower(&self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }

    pub fn load(&self) -> i16 {
        self.0.load(Ordering::Acquire)
    }
}

// ── Aggregate ─────────────────────────────────────────────────

/// All cross-context state for one firmware image, meant to live in a
/// single `static` owned by `main`.
#[derive(Debug)]
pub struct Signals {
    pub tick: TickFlag,
    pub requested_message: MessageRequest,
    pub set_point: SetPointCell,
}

impl Signals {
    pub const fn new(initial_message: Message, initial_set_point: i16) -> Self {
        Self {
            tick: TickFlag::new(),
            requested_message: MessageRequest::new(initial_message),
            set_point: SetPointCell::new(initial_set_point),
        }
    }
}
