//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART0 / USB-CDC console). The thermostat's status
//! records additionally go out on their own UART via
//! [`SerialTelemetry`](super::serial::SerialTelemetry).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as one tagged line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(variant) => {
                info!("START | variant={:?}", variant);
            }
            AppEvent::MessageChanged { from, to } => {
                info!("MSG | {} -> {}", from.name(), to.name());
            }
            AppEvent::Status(r) => {
                info!(
                    "STATUS | room={}\u{00b0}C set={}\u{00b0}C heater={} t={}s",
                    r.room,
                    r.set_point,
                    if r.heater_on { "ON" } else { "OFF" },
                    r.seconds,
                );
            }
            AppEvent::SensorReadFailed { held_c } => {
                warn!("SENSOR | read failed, holding {}\u{00b0}C", held_c);
            }
            AppEvent::PeripheralFault(e) => {
                warn!("FAULT | {}", e);
            }
        }
    }
}
