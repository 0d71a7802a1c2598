//! Hardware adapters — bridge real peripherals to domain port traits.
//!
//! The only modules in the system that touch actual hardware. On
//! non-espidf targets the underlying drivers use cfg-gated simulation
//! stubs, and the I²C bus is whatever `embedded_hal::i2c::I2c` the caller
//! hands in.

use embedded_hal::i2c::I2c;

use crate::app::ports::{HeaterPort, LampPort, SensorPort};
use crate::drivers::status_led::{HeaterLed, SignalLed};
use crate::error::{ActuatorError, SensorError};
use crate::sensors::{Temperature, TemperatureSensor};
use crate::sequencer::OutputState;

// ── Beacon ────────────────────────────────────────────────────

/// The beacon's only peripheral: the two-colour LED.
pub struct BeaconHardware {
    led: SignalLed,
}

impl BeaconHardware {
    pub fn new(led: SignalLed) -> Self {
        Self { led }
    }

    pub fn led(&self) -> &SignalLed {
        &self.led
    }
}

impl LampPort for BeaconHardware {
    fn show(&mut self, state: OutputState) -> Result<(), ActuatorError> {
        self.led.show(state)
    }
}

// ── Thermostat ────────────────────────────────────────────────

/// Temperature sensor plus heater indicator.
pub struct ThermostatHardware<I> {
    sensor: TemperatureSensor<I>,
    heater: HeaterLed,
}

impl<I: I2c> ThermostatHardware<I> {
    pub fn new(sensor: TemperatureSensor<I>, heater: HeaterLed) -> Self {
        Self { sensor, heater }
    }

    pub fn sensor(&self) -> &TemperatureSensor<I> {
        &self.sensor
    }

    pub fn heater(&self) -> &HeaterLed {
        &self.heater
    }
}

impl<I: I2c> SensorPort for ThermostatHardware<I> {
    fn read_temperature(&mut self) -> Result<Temperature, SensorError> {
        self.sensor.read()
    }
}

impl<I: I2c> HeaterPort for ThermostatHardware<I> {
    fn set_heater(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.heater.set(on)
    }
}
