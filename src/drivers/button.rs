//! Edge-triggered push buttons.
//!
//! ## Hardware
//!
//! Active-low momentary switch with internal pull-up. The GPIO fires on
//! the falling edge and the ISR runs [`ButtonBinding::on_edge`] directly.
//!
//! There is no debounce. Every edge, including contact bounce, is one
//! press.
//!
//! | Variant    | Button 0          | Button 1          |
//! |------------|-------------------|-------------------|
//! | Beacon     | `ToggleMessage`   | `ToggleMessage`   |
//! | Thermostat | `RaiseSetPoint`   | `LowerSetPoint`   |

use crate::signals::{MessageRequest, SetPointCell};

/// What a falling edge does. Each variant borrows the one cell it writes.
#[derive(Debug, Clone, Copy)]
pub enum ButtonAction<'a> {
    /// Flip the message the beacon plays next.
    ToggleMessage(&'a MessageRequest),
    /// Set-point +1 °C (wrapping).
    RaiseSetPoint(&'a SetPointCell),
    /// Set-point −1 °C (wrapping).
    LowerSetPoint(&'a SetPointCell),
}

impl ButtonAction<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleMessage(_) => "toggle-message",
            Self::RaiseSetPoint(_) => "set-point+1",
            Self::LowerSetPoint(_) => "set-point-1",
        }
    }
}

/// A button pin and the action its interrupt performs.
#[derive(Debug, Clone, Copy)]
pub struct ButtonBinding<'a> {
    pub gpio: i32,
    pub action: ButtonAction<'a>,
}

impl<'a> ButtonBinding<'a> {
    pub const fn new(gpio: i32, action: ButtonAction<'a>) -> Self {
        Self { gpio, action }
    }

    /// Interrupt-context handler. One atomic RMW, no branching on state.
    pub fn on_edge(&self) {
        match self.action {
            ButtonAction::ToggleMessage(req) => req.toggle(),
            ButtonAction::RaiseSetPoint(sp) => sp.raise(),
            ButtonAction::LowerSetPoint(sp) => sp.lower(),
        }
    }
}
