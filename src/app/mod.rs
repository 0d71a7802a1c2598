//! Application core — pure domain logic, zero direct I/O.
//!
//! The beacon and thermostat services, and the port traits through which
//! they reach hardware. Everything here is testable on the host with mock
//! adapters.

pub mod events;
pub mod ports;
pub mod service;
