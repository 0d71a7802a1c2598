//! Control laws driven from the main loop.

pub mod thermostat;

pub use thermostat::{StatusRecord, Thermostat, heater_should_run};
