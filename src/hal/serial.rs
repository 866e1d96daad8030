//! Serial echo sink.
//!
//! On ESP-IDF stdout is routed to the UART console, so the same sink
//! serves as the serial mirror on the device and as a terminal mirror on
//! the host.

use std::io::Write;

use super::EchoSink;

/// Unbuffered echo to stdout.
#[derive(Default)]
pub struct SerialEcho;

impl EchoSink for SerialEcho {
    fn write(&mut self, bytes: &[u8]) {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(bytes);
        let _ = out.flush();
    }
}
