//! Board LED drivers.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives plain GPIO outputs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::sequencer::OutputState;

/// Two-colour Morse LED: one GPIO lights for a dot, the other for a dash.
pub struct SignalLed {
    dot_gpio: i32,
    dash_gpio: i32,
    current: OutputState,
}

impl SignalLed {
    pub fn new(dot_gpio: i32, dash_gpio: i32) -> Self {
        Self {
            dot_gpio,
            dash_gpio,
            current: OutputState::Off,
        }
    }

    /// Drive both pins so exactly the LED for `state` is lit (none for `Off`).
    pub fn show(&mut self, state: OutputState) -> Result<(), ActuatorError> {
        let (dot, dash) = Self::levels(state);
        hw_init::gpio_write(self.dot_gpio, dot)?;
        hw_init::gpio_write(self.dash_gpio, dash)?;
        self.current = state;
        Ok(())
    }

    /// `(dot, dash)` pin levels for `state`.
    pub const fn levels(state: OutputState) -> (bool, bool) {
        match state {
            OutputState::Dot => (true, false),
            OutputState::Dash => (false, true),
            OutputState::Off => (false, false),
        }
    }

    pub fn current(&self) -> OutputState {
        self.current
    }
}

/// Single indicator LED standing in for the heater relay.
pub struct HeaterLed {
    gpio: i32,
    on: bool,
}

impl HeaterLed {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        hw_init::gpio_write(self.gpio, on)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
