//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements             | Connects to              |
//! |------------|------------------------|--------------------------|
//! | `hardware` | LampPort               | Dot/dash GPIO LEDs       |
//! |            | SensorPort, HeaterPort | I²C sensor, heater LED   |
//! | `log_sink` | EventSink              | Serial log output        |
//! | `serial`   | TelemetryPort          | Telemetry UART           |

pub mod hardware;
pub mod log_sink;
pub mod serial;
