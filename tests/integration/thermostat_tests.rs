//! Thermostat pipeline: I²C sensor → ThermostatService → heater + UART.

use tickloop::adapters::hardware::ThermostatHardware;
use tickloop::adapters::serial::SerialTelemetry;
use tickloop::app::events::AppEvent;
use tickloop::app::service::ThermostatService;
use tickloop::config::Variant;
use tickloop::drivers::button::{ButtonAction, ButtonBinding};
use tickloop::drivers::status_led::HeaterLed;
use tickloop::error::SensorError;
use tickloop::sensors::temperature::SCAN_CAPACITY;
use tickloop::sensors::{KNOWN_SENSORS, TemperatureSensor};
use tickloop::signals::SetPointCell;

use crate::mock_hw::{MockI2c, RecordingSink};

type Service<'a> = ThermostatService<'a, ThermostatHardware<MockI2c>, SerialTelemetry<String>, RecordingSink>;

fn make_thermostat<'a>(bus: &MockI2c, sp: &'a SetPointCell) -> Service<'a> {
    let mut sensor = TemperatureSensor::new(bus.clone());
    let _ = sensor.detect();
    let hw = ThermostatHardware::new(sensor, HeaterLed::new(11));
    let mut svc = ThermostatService::new(25, sp, hw, SerialTelemetry::new(String::new()), RecordingSink::new());
    svc.start();
    svc
}

fn lines(svc: &Service<'_>) -> Vec<String> {
    svc.telemetry()
        .port()
        .split_inclusive("\r\n")
        .map(str::to_owned)
        .collect()
}

#[test]
fn start_turns_heater_off_and_announces() {
    let bus = MockI2c::with_sensor(0x48, 25 * 128);
    let sp = SetPointCell::new(22);
    let svc = make_thermostat(&bus, &sp);
    assert!(!svc.hw().heater().is_on());
    assert!(matches!(svc.sink().events[0], AppEvent::Started(Variant::Thermostat)));
    assert!(svc.telemetry().port().is_empty());
}

#[test]
fn warm_room_keeps_heater_off() {
    let bus = MockI2c::with_sensor(0x48, 25 * 128);
    let sp = SetPointCell::new(22);
    let mut svc = make_thermostat(&bus, &sp);

    let r = svc.tick();
    assert_eq!((r.room, r.set_point, r.heater_on, r.seconds), (25, 22, false, 0));
    assert_eq!(lines(&svc), vec!["<25,22,0,0000>\r\n"]);
    assert!(!svc.hw().heater().is_on());
}

#[test]
fn cold_room_turns_heater_on() {
    let bus = MockI2c::with_sensor(0x48, 19 * 128);
    let sp = SetPointCell::new(22);
    let mut svc = make_thermostat(&bus, &sp);

    assert!(svc.tick().heater_on);
    assert!(svc.hw().heater().is_on());
    assert_eq!(lines(&svc), vec!["<19,22,1,0000>\r\n"]);
}

#[test]
fn equality_is_off() {
    let bus = MockI2c::with_sensor(0x48, 22 * 128);
    let sp = SetPointCell::new(22);
    let mut svc = make_thermostat(&bus, &sp);
    assert!(!svc.tick().heater_on);
}

#[test]
fn seconds_count_every_cycle() {
    let bus = MockI2c::with_sensor(0x48, 25 * 128);
    let sp = SetPointCell::new(22);
    let mut svc = make_thermostat(&bus, &sp);
    for _ in 0..12 {
        svc.tick();
    }
    let out = lines(&svc);
    assert_eq!(out.len(), 12);
    assert_eq!(out[11], "<25,22,0,0011>\r\n");
    assert_eq!(svc.thermostat().seconds_since_reset(), 12);
}

#[test]
fn failed_read_holds_previous_room() {
    let bus = MockI2c::with_sensor(0x48, 21 * 128);
    let sp = SetPointCell::new(22);
    let mut svc = make_thermostat(&bus, &sp);

    assert_eq!(svc.tick().room, 21);
    bus.set_celsius(30);
    bus.fail_next(1);
    let held = svc.tick();
    assert_eq!(held.room, 21);
    assert_eq!(held.seconds, 1);
    assert!(held.heater_on);

    assert_eq!(svc.tick().room, 30);
    assert_eq!(svc.thermostat().sensor_failures(), 1);
    assert_eq!(
        svc.sink().count(|e| matches!(e, AppEvent::SensorReadFailed { held_c: 21 })),
        1
    );
}

#[test]
fn failure_before_first_read_reports_initial_room() {
    let bus = MockI2c::with_sensor(0x48, 10 * 128);
    let sp = SetPointCell::new(22);
    let mut svc = make_thermostat(&bus, &sp);
    bus.fail_next(1);
    let r = svc.tick();
    assert_eq!(r.room, 25);
    assert!(!r.heater_on);
}

#[test]
fn buttons_between_ticks_apply_next_cycle() {
    let bus = MockI2c::with_sensor(0x48, 20 * 128);
    let sp = SetPointCell::new(22);
    let up = ButtonBinding::new(16, ButtonAction::RaiseSetPoint(&sp));
    let down = ButtonBinding::new(21, ButtonAction::LowerSetPoint(&sp));
    let mut svc = make_thermostat(&bus, &sp);

    assert!(svc.tick().heater_on);
    for _ in 0..4 {
        down.on_edge();
    }
    let r = svc.tick();
    assert_eq!(r.set_point, 18);
    assert!(!r.heater_on);

    up.on_edge();
    up.on_edge();
    up.on_edge();
    let r = svc.tick();
    assert_eq!(r.set_point, 21);
    assert!(r.heater_on);
    assert_eq!(lines(&svc)[2], "<20,21,1,0002>\r\n");
}

#[test]
fn negative_temperatures_truncate_toward_zero() {
    // -5.5 °C
    let bus = MockI2c::with_sensor(0x48, -5 * 128 - 64);
    let sp = SetPointCell::new(-5);
    let mut svc = make_thermostat(&bus, &sp);
    let r = svc.tick();
    assert_eq!(r.room, -5);
    assert!(!r.heater_on);
    assert_eq!(lines(&svc), vec!["<-5,-5,0,0000>\r\n"]);
}

#[test]
fn detect_prefers_table_order() {
    let bus = MockI2c::with_sensor(0x41, 0);
    let mut sensor = TemperatureSensor::new(bus.clone());
    let found = sensor.detect().unwrap();
    assert_eq!(found.address, 0x41);
    assert_eq!(found.id, "006");

    sensor.read().unwrap();
    let state = bus.state();
    let last = state.writes.last().unwrap();
    assert_eq!(last, &(0x41, vec![0x01]));
}

#[test]
fn missing_sensor_falls_back_to_first_entry_and_fails_softly() {
    let bus = MockI2c::default();
    let mut sensor = TemperatureSensor::new(bus.clone());
    assert_eq!(sensor.detect(), Err(SensorError::NotDetected));
    assert_eq!(sensor.sensor().address, KNOWN_SENSORS[0].address);
    assert_eq!(sensor.read().unwrap_err(), SensorError::TransferFailed);
}

#[test]
fn bus_scan_lists_responders() {
    let bus = MockI2c::with_sensor(0x49, 0);
    let mut sensor = TemperatureSensor::new(bus.clone());
    let found = sensor.scan_bus();
    assert_eq!(found.as_slice(), &[0x49]);
}

#[test]
fn bus_scan_keeps_every_responder_on_a_crowded_bus() {
    let crowded: Vec<u8> = (0x10..0x40).collect();
    let bus = MockI2c::with_devices(crowded.iter().copied());
    let mut sensor = TemperatureSensor::new(bus.clone());
    let found = sensor.scan_bus();
    assert_eq!(found.len(), 48);
    assert_eq!(found.as_slice(), crowded.as_slice());
}

#[test]
fn bus_scan_with_every_address_answering() {
    let bus = MockI2c::with_devices(0x03..=0x77);
    let mut sensor = TemperatureSensor::new(bus.clone());
    let found = sensor.scan_bus();
    assert_eq!(found.len(), SCAN_CAPACITY);
    assert_eq!(found.first(), Some(&0x03));
    assert_eq!(found.last(), Some(&0x77));
}
