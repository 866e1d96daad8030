//! Output line buffer.
//!
//! `LINE_START -> ACCUMULATING -> flushed`. A `\n` is sent as `\r\n` and
//! ends the line. A full buffer is flushed without a terminator and the
//! line continues undecorated in the next chunk; no byte is dropped.

/// A flushed piece of output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub bytes: Vec<u8>,
    /// Profiler gap measured when the line started
    pub gap_ms: Option<u64>,
    /// True when the chunk ends the line
    pub complete: bool,
}

/// Line under construction
pub struct OutputLine {
    buf: Vec<u8>,
    capacity: usize,
    at_line_start: bool,
    gap_ms: Option<u64>,
}

impl OutputLine {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: Vec::with_capacity(capacity + 2),
            capacity,
            at_line_start: true,
            gap_ms: None,
        }
    }

    /// Is the next byte the first of a new line?
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Open a line with its rendered prefix.
    pub fn start(&mut self, prefix: &[u8], gap_ms: Option<u64>) {
        self.buf.clear();
        self.buf.extend_from_slice(prefix);
        self.gap_ms = gap_ms;
        self.at_line_start = false;
    }

    /// Append one byte; returns a chunk when the buffer must be flushed.
    pub fn push(&mut self, byte: u8) -> Option<Chunk> {
        self.at_line_start = false;

        if byte == b'\n' {
            self.buf.extend_from_slice(b"\r\n");
            self.at_line_start = true;
            return Some(self.take(true));
        }

        self.buf.push(byte);
        if self.buf.len() >= self.capacity {
            return Some(self.take(false));
        }
        None
    }

    /// Forget the current line; the next byte starts a new one.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.gap_ms = None;
        self.at_line_start = true;
    }

    fn take(&mut self, complete: bool) -> Chunk {
        let bytes = core::mem::replace(&mut self.buf, Vec::with_capacity(self.capacity + 2));
        Chunk {
            bytes,
            gap_ms: self.gap_ms,
            complete,
        }
    }
}
