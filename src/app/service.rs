//! Application services — the hexagonal core.
//!
//! Each service owns one state machine plus the adapters it drives and
//! exposes it to the main loop as a [`TickTask`]. Services hold a
//! reference to exactly the shared cell they read; the interrupt side owns
//! the write half.
//!
//! ```text
//!  MessageRequest ─▶ ┌──────────────────┐ ──▶ LampPort
//!                    │  BeaconService   │
//!                    │  Sequencer       │ ──▶ EventSink
//!                    └──────────────────┘
//!
//!    SensorPort ───▶ ┌──────────────────┐ ──▶ HeaterPort
//!  SetPointCell ───▶ │ ThermostatService│ ──▶ TelemetryPort
//!                    │  Thermostat      │ ──▶ EventSink
//!                    └──────────────────┘
//! ```

use log::info;

use crate::config::Variant;
use crate::control::{StatusRecord, Thermostat};
use crate::error::Error;
use crate::sequencer::{Message, OutputState, Sequencer, Step};
use crate::signals::{MessageRequest, SetPointCell};

use super::events::AppEvent;
use super::ports::{EventSink, HeaterPort, LampPort, SensorPort, TelemetryPort, TickTask};

// ───────────────────────────────────────────────────────────────
// Beacon
// ───────────────────────────────────────────────────────────────

/// Plays the requested Morse message on the two-colour LED, one table
/// entry per tick.
pub struct BeaconService<'a, L, S> {
    sequencer: Sequencer,
    requested: &'a MessageRequest,
    lamp: L,
    sink: S,
}

impl<'a, L: LampPort, S: EventSink> BeaconService<'a, L, S> {
    /// The sequencer starts on `initial` at position 0.
    pub fn new(initial: Message, requested: &'a MessageRequest, lamp: L, sink: S) -> Self {
        Self {
            sequencer: Sequencer::new(initial),
            requested,
            lamp,
            sink,
        }
    }

    /// Blank the LEDs and announce the service.
    pub fn start(&mut self) {
        if let Err(e) = self.lamp.show(OutputState::Off) {
            self.sink.emit(&AppEvent::PeripheralFault(e.into()));
        }
        self.sink.emit(&AppEvent::Started(Variant::Beacon));
        info!("BeaconService started playing {}", self.sequencer.playing().name());
    }

    /// Advance one symbol and drive the LEDs to it.
    pub fn tick(&mut self) -> Step {
        let before = self.sequencer.playing();
        let step = self.sequencer.advance(self.requested.load());

        if let Err(e) = self.lamp.show(step.output) {
            self.sink.emit(&AppEvent::PeripheralFault(e.into()));
        }

        let after = self.sequencer.playing();
        if after != before {
            self.sink.emit(&AppEvent::MessageChanged {
                from: before,
                to: after,
            });
        }
        step
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn lamp(&self) -> &L {
        &self.lamp
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<L: LampPort, S: EventSink> TickTask for BeaconService<'_, L, S> {
    fn on_tick(&mut self) {
        self.tick();
    }
}

// ───────────────────────────────────────────────────────────────
// Thermostat
// ───────────────────────────────────────────────────────────────

/// Samples the sensor, drives the heater and reports one status line per
/// tick.
pub struct ThermostatService<'a, H, T, S> {
    thermostat: Thermostat,
    set_point: &'a SetPointCell,
    hw: H,
    telemetry: T,
    sink: S,
    last_record: Option<StatusRecord>,
}

impl<'a, H, T, S> ThermostatService<'a, H, T, S>
where
    H: SensorPort + HeaterPort,
    T: TelemetryPort,
    S: EventSink,
{
    pub fn new(initial_room_c: i16, set_point: &'a SetPointCell, hw: H, telemetry: T, sink: S) -> Self {
        Self {
            thermostat: Thermostat::new(initial_room_c),
            set_point,
            hw,
            telemetry,
            sink,
            last_record: None,
        }
    }

    /// Heater off and announce the service.
    pub fn start(&mut self) {
        if let Err(e) = self.hw.set_heater(false) {
            self.sink.emit(&AppEvent::PeripheralFault(e.into()));
        }
        self.sink.emit(&AppEvent::Started(Variant::Thermostat));
        info!(
            "ThermostatService started (room={}°C, set-point={}°C)",
            self.thermostat.room(),
            self.set_point.load()
        );
    }

    /// Run one full cycle: sample → decide → actuate → report.
    ///
    /// Every peripheral failure is reported through the sink and the cycle
    /// carries on; nothing here can stop the loop.
    pub fn tick(&mut self) -> StatusRecord {
        // Sampled once so the decision and the record agree even if a
        // button fires mid-cycle.
        let set_point = self.set_point.load();

        // 1. Sensor
        let reading = self.hw.read_temperature();
        let failed = reading.is_err();

        // 2. Control law (4. seconds counter advances inside)
        let record = self.thermostat.cycle(reading, set_point);
        if failed {
            self.sink.emit(&AppEvent::SensorReadFailed { held_c: record.room });
        }

        // 3. Heater
        if let Err(e) = self.hw.set_heater(record.heater_on) {
            self.sink.emit(&AppEvent::PeripheralFault(e.into()));
        }

        // 4. Serial status line
        let sent = record
            .to_line()
            .map_err(Error::from)
            .and_then(|line| self.telemetry.send_line(&line).map_err(Error::from));
        if let Err(e) = sent {
            self.sink.emit(&AppEvent::PeripheralFault(e));
        }

        self.sink.emit(&AppEvent::Status(record));
        self.last_record = Some(record);
        record
    }

    pub fn thermostat(&self) -> &Thermostat {
        &self.thermostat
    }

    /// Record produced by the most recent cycle.
    pub fn last_record(&self) -> Option<StatusRecord> {
        self.last_record
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<H, T, S> TickTask for ThermostatService<'_, H, T, S>
where
    H: SensorPort + HeaterPort,
    T: TelemetryPort,
    S: EventSink,
{
    fn on_tick(&mut self) {
        self.tick();
    }
}
