//! Bang-bang thermostat.
//!
//! Heater on iff the room is strictly colder than the set-point. No
//! hysteresis, no rate limiting: the decision is re-made from scratch on
//! every 1 Hz cycle.

use core::fmt::{self, Write as _};

use crate::error::{CommsError, SensorError};
use crate::sensors::Temperature;

/// Strict comparison; equal means off.
pub const fn heater_should_run(room: i16, set_point: i16) -> bool {
    room < set_point
}

// ---------------------------------------------------------------------------
// Status record
// ---------------------------------------------------------------------------

/// One cycle's worth of telemetry.
///
/// Serialised as `<RR,SS,H,TTTT>`: room and set-point as at-least-two-digit
/// signed decimal, heater as `0`/`1`, seconds as at-least-four-digit
/// decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRecord {
    pub room: i16,
    pub set_point: i16,
    pub heater_on: bool,
    pub seconds: u32,
}

/// Longest possible line: `<-32768,-32768,1,4294967295>\r\n` is 30 bytes.
pub const STATUS_LINE_CAPACITY: usize = 32;

impl StatusRecord {
    /// Record plus the CRLF terminator, ready for the UART.
    pub fn to_line(&self) -> Result<heapless::String<STATUS_LINE_CAPACITY>, CommsError> {
        let mut line = heapless::String::new();
        write!(line, "{self}\r\n").map_err(|_| CommsError::RecordOverflow)?;
        Ok(line)
    }
}

impl fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{:02},{:02},{},{:04}>",
            self.room,
            self.set_point,
            u8::from(self.heater_on),
            self.seconds
        )
    }
}

// ---------------------------------------------------------------------------
// Controller state
// ---------------------------------------------------------------------------

pub struct Thermostat {
    /// Last good reading, whole degrees Celsius.
    room: i16,
    seconds_since_reset: u32,
    sensor_failures: u32,
}

impl Thermostat {
    pub fn new(initial_room: i16) -> Self {
        Self {
            room: initial_room,
            seconds_since_reset: 0,
            sensor_failures: 0,
        }
    }

    /// Fold one sensor result into the controller and produce this
    /// cycle's record.
    ///
    /// A failed read keeps the previous room temperature. The seconds
    /// counter advances either way.
    pub fn cycle(&mut self, reading: Result<Temperature, SensorError>, set_point: i16) -> StatusRecord {
        match reading {
            Ok(t) => self.room = t.whole_degrees(),
            Err(_) => self.sensor_failures = self.sensor_failures.wrapping_add(1),
        }

        let record = StatusRecord {
            room: self.room,
            set_point,
            heater_on: heater_should_run(self.room, set_point),
            seconds: self.seconds_since_reset,
        };
        self.seconds_since_reset = self.seconds_since_reset.wrapping_add(1);
        record
    }

    pub fn room(&self) -> i16 {
        self.room
    }

    pub fn seconds_since_reset(&self) -> u32 {
        self.seconds_since_reset
    }

    /// Failed sensor reads since reset.
    pub fn sensor_failures(&self) -> u32 {
        self.sensor_failures
    }
}
