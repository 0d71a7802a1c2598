//! Morse output sequencer.
//!
//! Walks a precomputed table of [`OutputState`]s, one entry per tick:
//!
//! ```text
//!   tick ──▶ table[playing][position] ──▶ LEDs
//!                      │
//!            position += 1
//!                      │
//!        position == len? ──yes──▶ position = 0
//!                                  playing  = requested   (boundary)
//! ```
//!
//! The requested message is only consulted at the boundary, so a button
//! press mid-message never cuts the in-flight pattern short.

pub mod tables;

use log::info;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

/// Instantaneous state of the two-colour signal LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    /// LED 0 on, LED 1 off.
    Dot,
    /// LED 0 off, LED 1 on.
    Dash,
    /// Both off.
    Off,
}

/// The two messages the beacon can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Message {
    Sos = 0,
    Ok = 1,
}

impl Message {
    /// Decode the low bit of an atomic cell.
    pub const fn from_bits(bits: u8) -> Self {
        if bits & 1 == 0 { Self::Sos } else { Self::Ok }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Sos => Self::Ok,
            Self::Ok => Self::Sos,
        }
    }

    /// Tick-by-tick output table for this message.
    pub fn table(self) -> &'static [OutputState] {
        match self {
            Self::Sos => &tables::SOS,
            Self::Ok => &tables::OK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sos => "SOS",
            Self::Ok => "OK",
        }
    }
}

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

/// Result of one [`Sequencer::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// State to drive the LEDs to for this tick.
    pub output: OutputState,
    /// Table index `output` was read from.
    pub position: usize,
    /// `true` when this tick finished the message and the counter wrapped.
    pub wrapped: bool,
}

pub struct Sequencer {
    playing: Message,
    position: usize,
    cycles: u32,
}

impl Sequencer {
    pub fn new(initial: Message) -> Self {
        Self {
            playing: initial,
            position: 0,
            cycles: 0,
        }
    }

    /// Advance by one tick.
    ///
    /// `requested` is only adopted if this tick completes the message.
    pub fn advance(&mut self, requested: Message) -> Step {
        let table = self.playing.table();
        let position = self.position;
        let output = table[position];

        self.position += 1;
        let wrapped = self.position == table.len();
        if wrapped {
            self.position = 0;
            self.cycles = self.cycles.wrapping_add(1);
            if requested != self.playing {
                info!(
                    "Sequencer: {} -> {} at message boundary",
                    self.playing.name(),
                    requested.name()
                );
            }
            self.playing = requested;
        }

        Step {
            output,
            position,
            wrapped,
        }
    }

    /// Message currently being played.
    pub fn playing(&self) -> Message {
        self.playing
    }

    /// Index of the entry the next tick will read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Completed messages since construction.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}
