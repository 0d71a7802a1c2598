//! Mock hardware adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO or I²C registers.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::i2c::{self, ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
use tickloop::app::events::AppEvent;
use tickloop::app::ports::{EventSink, LampPort};
use tickloop::error::ActuatorError;
use tickloop::sequencer::OutputState;

// ── MockLamp ──────────────────────────────────────────────────

pub struct MockLamp {
    pub shown: Vec<OutputState>,
    pub fail: bool,
}

#[allow(dead_code)]
impl MockLamp {
    pub fn new() -> Self {
        Self { shown: Vec::new(), fail: false }
    }

    /// Render the history as Morse: `.` `-` and `/` for off.
    pub fn as_morse(&self) -> String {
        self.shown
            .iter()
            .map(|s| match s {
                OutputState::Dot => '.',
                OutputState::Dash => '-',
                OutputState::Off => '/',
            })
            .collect()
    }
}

impl Default for MockLamp {
    fn default() -> Self {
        Self::new()
    }
}

impl LampPort for MockLamp {
    fn show(&mut self, state: OutputState) -> Result<(), ActuatorError> {
        if self.fail {
            return Err(ActuatorError::GpioWriteFailed);
        }
        self.shown.push(state);
        Ok(())
    }
}

// ── MockI2c ───────────────────────────────────────────────────

/// State behind a [`MockI2c`]. Shared so the test keeps a handle after the
/// bus moves into the driver.
#[derive(Debug, Default)]
pub struct BusState {
    /// Addresses that acknowledge.
    pub devices: Vec<u8>,
    /// Big-endian payload returned by every read.
    pub value: [u8; 2],
    /// Transactions to fail before answering again.
    pub fail_next: u32,
    /// `(address, bytes written)` for every write, including scan probes.
    pub writes: Vec<(u8, Vec<u8>)>,
}

#[derive(Clone, Default)]
pub struct MockI2c {
    state: Rc<RefCell<BusState>>,
}

#[allow(dead_code)]
impl MockI2c {
    /// A bus with one sensor at `address` reading `raw` (1/128 °C units).
    pub fn with_sensor(address: u8, raw: i16) -> Self {
        let bus = Self::default();
        {
            let mut s = bus.state.borrow_mut();
            s.devices.push(address);
            s.value = raw.to_be_bytes();
        }
        bus
    }

    /// A bus where every address in `addresses` acknowledges.
    pub fn with_devices(addresses: impl IntoIterator<Item = u8>) -> Self {
        let bus = Self::default();
        bus.state.borrow_mut().devices.extend(addresses);
        bus
    }

    pub fn set_celsius(&self, whole: i16) {
        self.state.borrow_mut().value = (whole * 128).to_be_bytes();
    }

    pub fn set_raw(&self, raw: i16) {
        self.state.borrow_mut().value = raw.to_be_bytes();
    }

    pub fn fail_next(&self, n: u32) {
        self.state.borrow_mut().fail_next = n;
    }

    pub fn state(&self) -> std::cell::Ref<'_, BusState> {
        self.state.borrow()
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl i2c::I2c for MockI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        let mut s = self.state.borrow_mut();
        if !s.devices.contains(&address) {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        if s.fail_next > 0 {
            s.fail_next -= 1;
            return Err(ErrorKind::Bus);
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => s.writes.push((address, bytes.to_vec())),
                Operation::Read(buf) => {
                    let value = s.value;
                    for (dst, src) in buf.iter_mut().zip(value.iter()) {
                        *dst = *src;
                    }
                }
            }
        }
        Ok(())
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
