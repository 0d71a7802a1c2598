//! Sensor drivers.
//!
//! Only the thermostat samples anything: one I²C temperature sensor read
//! once per tick from the main loop.

pub mod temperature;

pub use temperature::{KNOWN_SENSORS, SensorDescriptor, Temperature, TemperatureSensor};
