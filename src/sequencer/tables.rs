//! Precomputed Morse tables, one entry per tick.
//!
//! Timing is encoded by repetition only:
//!
//! | Element          | Entries          |
//! |------------------|------------------|
//! | dot              | 1 × `Dot`        |
//! | dash             | 3 × `Dash`       |
//! | element gap      | 1 × `Off`        |
//! | character gap    | 3 × `Off`        |
//! | word gap         | 7 × `Off`        |
//!
//! The last character of each message ends without its own gap; the word
//! gap follows directly.

use super::OutputState::{self, Dash, Dot, Off};

/// "SOS" — 34 ticks.
#[rustfmt::skip]
pub static SOS: [OutputState; 34] = [
    // S
    Dot, Off,
    Dot, Off,
    Dot, Off, Off, Off,
    // O
    Dash, Dash, Dash, Off,
    Dash, Dash, Dash, Off,
    Dash, Dash, Dash, Off, Off, Off,
    // S
    Dot, Off,
    Dot, Off,
    Dot,
    // word gap
    Off, Off, Off, Off, Off, Off, Off,
];

/// "OK" — 30 ticks.
#[rustfmt::skip]
pub static OK: [OutputState; 30] = [
    // O
    Dash, Dash, Dash, Off,
    Dash, Dash, Dash, Off,
    Dash, Dash, Dash, Off, Off, Off,
    // K
    Dash, Dash, Dash, Off,
    Dot, Off,
    Dash, Dash, Dash,
    // word gap
    Off, Off, Off, Off, Off, Off, Off,
];
