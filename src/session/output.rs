//! Log output path: decorate, buffer, filter, send.

use super::Session;
use crate::output::{Chunk, Decoration};

impl Session {
    /// Feed one byte of log output.
    pub fn write_byte(&mut self, byte: u8) {
        if self.line.at_line_start() {
            let now = self.clock.now_ms();
            let decoration = Decoration::capture(&mut self.state, now);
            let prefix = if self.state.connected || self.state.serial_echo() {
                decoration.render(self.state.show_colors())
            } else {
                String::new()
            };
            self.line.start(prefix.as_bytes(), decoration.gap_ms);
        }

        if let Some(chunk) = self.line.push(byte) {
            self.send_chunk(chunk);
        }
    }

    /// Feed a run of log output.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    /// Write `args` if `level` passes the gate.
    pub fn log(&mut self, level: crate::level::Level, args: core::fmt::Arguments<'_>) {
        if self.is_active(level) {
            let _ = core::fmt::Write::write_fmt(self, args);
        }
    }

    fn send_chunk(&mut self, chunk: Chunk) {
        if self.state.suppresses(&chunk.bytes, chunk.gap_ms) {
            return;
        }

        if self.state.connected {
            let now = self.clock.now_ms();
            match (self.coalescer.as_mut(), self.client.as_mut()) {
                (Some(coalescer), Some(client)) => {
                    coalescer.push(&chunk.bytes, now, &mut |b| client.write(b));
                }
                (None, Some(client)) => client.write(&chunk.bytes),
                (_, None) => {}
            }
        }

        if self.state.serial_echo() {
            self.echo.write(&chunk.bytes);
        }
    }

    pub(super) fn poll_coalescer(&mut self) {
        let now = self.clock.now_ms();
        if let (Some(coalescer), Some(client)) = (self.coalescer.as_mut(), self.client.as_mut()) {
            coalescer.poll(now, &mut |b| client.write(b));
        }
    }

    pub(super) fn flush_coalescer(&mut self) {
        let now = self.clock.now_ms();
        if let (Some(coalescer), Some(client)) = (self.coalescer.as_mut(), self.client.as_mut()) {
            coalescer.flush(now, &mut |b| client.write(b));
        }
    }
}

impl core::fmt::Write for Session {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

impl std::io::Write for Session {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_coalescer();
        Ok(())
    }
}
