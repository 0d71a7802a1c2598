//! I²C digital temperature sensor (TMP1xx / TMP006 family).
//!
//! The result register holds a big-endian two's-complement value in
//! 1/128 °C steps. A reading is a single blocking write-then-read:
//!
//! ```text
//!   START addr+W  [result_reg]  RESTART addr+R  [msb] [lsb]  STOP
//! ```
//!
//! ## Dual-target design
//!
//! The driver is generic over [`embedded_hal::i2c::I2c`]. On ESP-IDF it
//! wraps `esp_idf_hal::i2c::I2cDriver`; in host tests a mock bus is
//! injected.

use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::error::SensorError;

// ---------------------------------------------------------------------------
// Known parts
// ---------------------------------------------------------------------------

/// One supported sensor: where it lives and which register holds the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorDescriptor {
    /// 7-bit bus address.
    pub address: u8,
    /// Register holding the temperature result.
    pub result_register: u8,
    /// Part identifier, for the boot log.
    pub id: &'static str,
}

/// Probed in order; the first address that answers wins.
pub static KNOWN_SENSORS: [SensorDescriptor; 3] = [
    SensorDescriptor { address: 0x48, result_register: 0x00, id: "11X" },
    SensorDescriptor { address: 0x49, result_register: 0x00, id: "116" },
    SensorDescriptor { address: 0x41, result_register: 0x01, id: "006" },
];

/// First and last non-reserved 7-bit addresses.
const SCAN_FIRST: u8 = 0x03;
const SCAN_LAST: u8 = 0x77;

/// Room for every scannable address answering at once.
pub const SCAN_CAPACITY: usize = (SCAN_LAST - SCAN_FIRST + 1) as usize;

// ---------------------------------------------------------------------------
// Fixed-point temperature
// ---------------------------------------------------------------------------

/// Raw sensor value, 1/128 °C per LSB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Temperature(i16);

impl Temperature {
    pub const LSB_PER_DEGREE: i16 = 128;

    /// Decode the two result bytes as they come off the wire.
    /// The sign lives in bit 15, so `i16` gives sign extension for free.
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(i16::from_be_bytes(bytes))
    }

    pub const fn from_raw(raw: i16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Whole degrees Celsius, truncated toward zero.
    pub const fn whole_degrees(self) -> i16 {
        self.0 / Self::LSB_PER_DEGREE
    }

    pub fn celsius(self) -> f32 {
        f32::from(self.0) / f32::from(Self::LSB_PER_DEGREE)
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// One write-then-read exchange. Built per call, never kept across ticks.
#[derive(Debug)]
struct SensorTransaction {
    address: u8,
    write_buf: [u8; 1],
    read_buf: [u8; 2],
}

impl SensorTransaction {
    fn result_read(sensor: &SensorDescriptor) -> Self {
        Self {
            address: sensor.address,
            write_buf: [sensor.result_register],
            read_buf: [0; 2],
        }
    }

    fn execute<I: I2c>(mut self, bus: &mut I) -> Result<[u8; 2], SensorError> {
        bus.write_read(self.address, &self.write_buf, &mut self.read_buf)
            .map_err(|_| SensorError::TransferFailed)?;
        Ok(self.read_buf)
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

pub struct TemperatureSensor<I> {
    bus: I,
    sensor: &'static SensorDescriptor,
}

impl<I: I2c> TemperatureSensor<I> {
    /// Wrap the bus, targeting the first known sensor until [`detect`]
    /// says otherwise.
    ///
    /// [`detect`]: Self::detect
    pub fn new(bus: I) -> Self {
        Self {
            bus,
            sensor: &KNOWN_SENSORS[0],
        }
    }

    /// Log every address on the bus that acknowledges an empty write.
    /// Returns every responder, in address order.
    pub fn scan_bus(&mut self) -> heapless::Vec<u8, SCAN_CAPACITY> {
        info!("I2C: scanning 0x{:02X}..=0x{:02X}", SCAN_FIRST, SCAN_LAST);
        let mut found = heapless::Vec::new();
        for address in SCAN_FIRST..=SCAN_LAST {
            if self.bus.write(address, &[]).is_ok() {
                info!("I2C: device found at 0x{:02X}", address);
                if found.push(address).is_err() {
                    warn!("I2C: scan list full, dropping 0x{:02X}", address);
                }
            }
        }
        info!("I2C: scan complete ({} found)", found.len());
        found
    }

    /// Probe [`KNOWN_SENSORS`] in order and lock onto the first responder.
    ///
    /// On failure the driver keeps targeting the first table entry, so
    /// later reads fail softly rather than the firmware refusing to run.
    pub fn detect(&mut self) -> Result<&'static SensorDescriptor, SensorError> {
        for sensor in &KNOWN_SENSORS {
            if SensorTransaction::result_read(sensor)
                .execute(&mut self.bus)
                .is_ok()
            {
                info!(
                    "I2C: temperature sensor TMP{} at 0x{:02X} (reg 0x{:02X})",
                    sensor.id, sensor.address, sensor.result_register
                );
                self.sensor = sensor;
                return Ok(sensor);
            }
        }
        warn!("I2C: no known temperature sensor responded");
        Err(SensorError::NotDetected)
    }

    /// One blocking read of the result register.
    pub fn read(&mut self) -> Result<Temperature, SensorError> {
        let bytes = SensorTransaction::result_read(self.sensor).execute(&mut self.bus)?;
        Ok(Temperature::from_be_bytes(bytes))
    }

    /// Sensor the driver is currently addressing.
    pub fn sensor(&self) -> &'static SensorDescriptor {
        self.sensor
    }

    /// Give the bus back (test inspection).
    pub fn release(self) -> I {
        self.bus
    }
}
