//! Tickloop Firmware — Main Entry Point
//!
//! Timer interrupt + button interrupts feed one busy-polling main loop.
//! The image is either the Morse beacon (`--features beacon`) or the I²C
//! thermostat.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  BeaconHardware     ThermostatHardware    SerialTelemetry      │
//! │  (LampPort)         (Sensor+HeaterPort)   (TelemetryPort)      │
//! │  LogEventSink (EventSink)                                      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │   BeaconService (Sequencer)                            │    │
//! │  │   ThermostatService (Thermostat)                       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  MainLoop ◀── TickFlag ◀── esp_timer    Signals ◀── GPIO ISRs  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use log::{error, info, warn};

use tickloop::adapters::hardware::{BeaconHardware, ThermostatHardware};
use tickloop::adapters::log_sink::LogEventSink;
use tickloop::adapters::serial::SerialTelemetry;
use tickloop::app::service::{BeaconService, ThermostatService};
use tickloop::config::{INITIAL_MESSAGE, INITIAL_SET_POINT_C, SystemConfig, Variant};
use tickloop::drivers::button::{ButtonAction, ButtonBinding};
use tickloop::drivers::hw_init::{self, HwInitError};
use tickloop::drivers::hw_timer::start_tick_timer;
use tickloop::drivers::status_led::{HeaterLed, SignalLed};
use tickloop::drivers::watchdog::Watchdog;
use tickloop::error::Error;
use tickloop::pins;
use tickloop::scheduler::MainLoop;
use tickloop::sensors::TemperatureSensor;
use tickloop::signals::Signals;

// ── Interrupt-shared state ────────────────────────────────────

static SIGNALS: Signals = Signals::new(INITIAL_MESSAGE, INITIAL_SET_POINT_C);

static BEACON_BUTTONS: [ButtonBinding<'static>; 2] = [
    ButtonBinding::new(pins::BUTTON_0_GPIO, ButtonAction::ToggleMessage(&SIGNALS.requested_message)),
    ButtonBinding::new(pins::BUTTON_1_GPIO, ButtonAction::ToggleMessage(&SIGNALS.requested_message)),
];

static THERMOSTAT_BUTTONS: [ButtonBinding<'static>; 2] = [
    ButtonBinding::new(pins::BUTTON_0_GPIO, ButtonAction::RaiseSetPoint(&SIGNALS.set_point)),
    ButtonBinding::new(pins::BUTTON_1_GPIO, ButtonAction::LowerSetPoint(&SIGNALS.set_point)),
];

// The thermostat claims these through `peripherals.pins.gpioN`, which
// only takes literal pin numbers.
const _: () = assert!(
    pins::I2C_SDA_GPIO == 14
        && pins::I2C_SCL_GPIO == 15
        && pins::UART_TX_GPIO == 17
        && pins::UART_RX_GPIO == 18
);

/// Fatal init failure: log and stop here. The LEDs stay off and nothing is
/// written to the telemetry UART.
fn halt(err: Error) -> ! {
    error!("{}; halting", err);
    loop {}
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Tickloop v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config dump failed: {}", e),
    }

    // ── 2. Shared GPIO setup ──────────────────────────────────
    if let Err(e) = hw_init::init_outputs(&[pins::LED_0_GPIO, pins::LED_1_GPIO]) {
        halt(e.into());
    }
    if let Err(e) = hw_init::init_isr_service() {
        halt(e.into());
    }

    match config.variant {
        Variant::Beacon => run_beacon(&config),
        Variant::Thermostat => run_thermostat(&config),
    }
}

// ── Beacon ────────────────────────────────────────────────────

fn run_beacon(config: &SystemConfig) -> ! {
    // One interrupt per physical button; a single-button board maps both
    // constants to the same pin.
    let buttons = if pins::BUTTON_0_GPIO == pins::BUTTON_1_GPIO {
        &BEACON_BUTTONS[..1]
    } else {
        &BEACON_BUTTONS[..]
    };
    for binding in buttons {
        if let Err(e) = hw_init::register_button(binding) {
            halt(e.into());
        }
    }

    let hw = BeaconHardware::new(SignalLed::new(pins::LED_0_GPIO, pins::LED_1_GPIO));
    let mut service = BeaconService::new(
        config.initial_message,
        &SIGNALS.requested_message,
        hw,
        LogEventSink::new(),
    );

    // Timer last: the first tick must find the service ready.
    let _timer = match start_tick_timer(config.tick_period_us, &SIGNALS.tick) {
        Ok(t) => t,
        Err(e) => halt(e.into()),
    };

    service.start();
    MainLoop::new(&SIGNALS.tick, service)
        .with_watchdog(Watchdog::for_config(config))
        .run()
}

// ── Thermostat ────────────────────────────────────────────────

fn run_thermostat(config: &SystemConfig) -> ! {
    let peripherals = match Peripherals::take() {
        Ok(p) => p,
        Err(e) => halt(HwInitError::PeripheralsTaken(e.code()).into()),
    };

    // I²C: SDA=gpio14, SCL=gpio15.
    let i2c_cfg = I2cConfig::new().baudrate(Hertz(config.i2c_bus_hz));
    let i2c = match I2cDriver::new(peripherals.i2c0, peripherals.pins.gpio14, peripherals.pins.gpio15, &i2c_cfg) {
        Ok(d) => d,
        Err(e) => halt(HwInitError::I2cInitFailed(e.code()).into()),
    };

    // UART: TX=gpio17, RX=gpio18.
    let uart_cfg = UartConfig::default().baudrate(Hertz(config.uart_baud_rate));
    let uart = match UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_cfg,
    ) {
        Ok(u) => u,
        Err(e) => halt(HwInitError::UartInitFailed(e.code()).into()),
    };

    for binding in &THERMOSTAT_BUTTONS {
        if let Err(e) = hw_init::register_button(binding) {
            halt(e.into());
        }
    }

    let mut sensor = TemperatureSensor::new(i2c);
    let found = sensor.scan_bus();
    info!("I2C scan: {} device(s) {:02x?}", found.len(), found.as_slice());
    match sensor.detect() {
        Ok(d) => info!("Found TMP{} at 0x{:02x}", d.id, d.address),
        Err(e) => warn!("{}; polling 0x{:02x} anyway", e, sensor.sensor().address),
    }

    let hw = ThermostatHardware::new(sensor, HeaterLed::new(pins::LED_0_GPIO));
    let mut service = ThermostatService::new(
        config.initial_room_c,
        &SIGNALS.set_point,
        hw,
        SerialTelemetry::new(uart),
        LogEventSink::new(),
    );

    let _timer = match start_tick_timer(config.tick_period_us, &SIGNALS.tick) {
        Ok(t) => t,
        Err(e) => halt(e.into()),
    };

    service.start();
    MainLoop::new(&SIGNALS.tick, service)
        .with_watchdog(Watchdog::for_config(config))
        .run()
}
