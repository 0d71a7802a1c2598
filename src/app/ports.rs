//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BeaconService / ThermostatService
//! ```
//!
//! Driven adapters (LEDs, sensor, UART, event sinks) implement these
//! traits. The services consume them via generics, so the domain core
//! never touches hardware directly.

use crate::error::{ActuatorError, CommsError, SensorError};
use crate::sensors::Temperature;
use crate::sequencer::OutputState;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one blocking temperature sample per call.
pub trait SensorPort {
    fn read_temperature(&mut self) -> Result<Temperature, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (driven adapters: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Two-colour signal LED driven by the Morse sequencer.
pub trait LampPort {
    fn show(&mut self, state: OutputState) -> Result<(), ActuatorError>;
}

/// Binary heater actuator (an indicator LED on the dev board).
pub trait HeaterPort {
    fn set_heater(&mut self, on: bool) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → serial line)
// ───────────────────────────────────────────────────────────────

/// Line-oriented serial output. `line` already carries its terminator.
pub trait TelemetryPort {
    fn send_line(&mut self, line: &str) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Tick task (decouples the main loop from what a tick does)
// ───────────────────────────────────────────────────────────────

/// The one action the [`MainLoop`](crate::scheduler::MainLoop) runs per
/// serviced tick.
///
/// Runs in main-loop context and may block (I²C, UART), but must finish
/// well inside one timer period or the next tick is coalesced.
pub trait TickTask {
    fn on_tick(&mut self);
}

impl<T: TickTask + ?Sized> TickTask for &mut T {
    fn on_tick(&mut self) {
        (**self).on_tick();
    }
}
