//! System configuration parameters.
//!
//! Compiled-in defaults only — there is no persistent store and no
//! runtime override. The full config is dumped as JSON to the boot log.

use serde::{Deserialize, Serialize};

use crate::sequencer::Message;

/// Message played (and requested) at reset.
pub const INITIAL_MESSAGE: Message = Message::Sos;
/// Room temperature assumed until the first good sensor read (°C).
pub const INITIAL_ROOM_C: i16 = 25;
/// Set-point at reset (°C).
pub const INITIAL_SET_POINT_C: i16 = 22;

/// Which tick action the firmware image runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// Two-colour Morse beacon, 2 Hz.
    Beacon,
    /// I²C thermostat with serial telemetry, 1 Hz.
    Thermostat,
}

impl Variant {
    /// Variant selected by the `beacon` cargo feature.
    pub const fn from_features() -> Self {
        if cfg!(feature = "beacon") { Self::Beacon } else { Self::Thermostat }
    }
}

/// Sub-task intervals the board support package advertises.
///
/// These are informational. All work runs on every tick; nothing here
/// staggers the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskIntervals {
    pub check_buttons_us: u32,
    pub check_temperature_us: u32,
    pub update_led_us: u32,
}

impl Default for TaskIntervals {
    fn default() -> Self {
        Self {
            check_buttons_us: 200_000,
            check_temperature_us: 500_000,
            update_led_us: 1_000_000,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    pub variant: Variant,

    // --- Timing ---
    /// Hardware timer period (microseconds).
    pub tick_period_us: u64,
    pub task_intervals: TaskIntervals,

    // --- Beacon ---
    /// Message played (and requested) at reset.
    pub initial_message: Message,

    // --- Thermostat ---
    /// Room temperature assumed until the first good sensor read (°C).
    pub initial_room_c: i16,
    /// Set-point at reset (°C).
    pub initial_set_point_c: i16,

    // --- Peripherals ---
    pub uart_baud_rate: u32,
    pub i2c_bus_hz: u32,
}

impl SystemConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let tick_period_us = match variant {
            Variant::Beacon => 500_000,
            Variant::Thermostat => 1_000_000,
        };
        Self {
            variant,
            tick_period_us,
            task_intervals: TaskIntervals::default(),
            initial_message: INITIAL_MESSAGE,
            initial_room_c: INITIAL_ROOM_C,
            initial_set_point_c: INITIAL_SET_POINT_C,
            uart_baud_rate: 115_200,
            i2c_bus_hz: 400_000,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::for_variant(Variant::from_features())
    }
}
