//! Serial telemetry adapter.
//!
//! Writes each status line to any [`core::fmt::Write`] sink. On target
//! that is the UART driver; on the host it is usually a `String`.

use crate::app::ports::TelemetryPort;
use crate::error::CommsError;

pub struct SerialTelemetry<W> {
    port: W,
    lines_sent: u32,
}

impl<W: core::fmt::Write> SerialTelemetry<W> {
    pub fn new(port: W) -> Self {
        Self { port, lines_sent: 0 }
    }

    pub fn lines_sent(&self) -> u32 {
        self.lines_sent
    }

    pub fn port(&self) -> &W {
        &self.port
    }
}

impl<W: core::fmt::Write> TelemetryPort for SerialTelemetry<W> {
    fn send_line(&mut self, line: &str) -> Result<(), CommsError> {
        self.port.write_str(line).map_err(|_| CommsError::UartWriteFailed)?;
        self.lines_sent = self.lines_sent.wrapping_add(1);
        Ok(())
    }
}
