//! GPIO / peripheral pin assignments for the tickloop board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// LEDs (push-pull, active HIGH, start LOW)
// ---------------------------------------------------------------------------

/// LED 0: Morse dot in the beacon, heater indicator in the thermostat.
pub const LED_0_GPIO: i32 = 11;
/// LED 1: Morse dash in the beacon. Unused by the thermostat.
pub const LED_1_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Buttons (active-low, internal pull-up, falling-edge interrupt)
// ---------------------------------------------------------------------------

/// Beacon: toggle message. Thermostat: raise set-point.
pub const BUTTON_0_GPIO: i32 = 16;
/// Beacon: toggle message. Thermostat: lower set-point.
///
/// Boards with a single button map this to `BUTTON_0_GPIO`; the beacon
/// then registers only one interrupt.
pub const BUTTON_1_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// I²C bus (temperature sensor)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// UART telemetry
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
