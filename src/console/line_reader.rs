//! Line reader for console input
//!
//! Turns the raw byte stream from the client into command lines.
//! CR, LF and CRLF all end a line; a terminator directly after another
//! terminator is ignored, so `\r\n` yields one boundary.
//!
//! Lines are never truncated. A line longer than the reader's limit is
//! consumed up to its terminator and reported as [`LineTooLong`].

use thiserror::Error;

use crate::config::MAX_COMMAND_LEN;

/// A line that went past the limit; its content has been discarded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("command line of {len} bytes exceeds the {limit} byte limit")]
pub struct LineTooLong {
    pub len: usize,
    pub limit: usize,
}

/// Command line accumulator
pub struct LineReader {
    line: String,
    limit: usize,
    /// Printable bytes seen on the current line, kept or not
    seen: usize,
    last_was_terminator: bool,
}

impl LineReader {
    /// Reader with the default limit
    pub fn new() -> Self {
        Self::with_limit(MAX_COMMAND_LEN)
    }

    /// Reader that rejects lines longer than `limit` bytes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            line: String::new(),
            limit: limit.max(1),
            seen: 0,
            last_was_terminator: false,
        }
    }

    /// Feed one byte.
    ///
    /// Returns the completed command when `byte` ends a non-empty line,
    /// or the rejection when that line was too long.
    pub fn push(&mut self, byte: u8) -> Option<Result<String, LineTooLong>> {
        if is_terminator(byte) {
            let repeated = self.last_was_terminator;
            self.last_was_terminator = true;
            if repeated {
                return None;
            }
            let seen = core::mem::take(&mut self.seen);
            let line = core::mem::take(&mut self.line);
            if seen > self.limit {
                return Some(Err(LineTooLong {
                    len: seen,
                    limit: self.limit,
                }));
            }
            return if line.is_empty() { None } else { Some(Ok(line)) };
        }

        self.last_was_terminator = false;
        if is_printable(byte) {
            self.seen += 1;
            if self.seen <= self.limit {
                self.line.push(byte as char);
            } else if !self.line.is_empty() {
                self.line = String::new();
            }
        }
        None
    }

    /// Command typed so far (empty once the line went past the limit)
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Drop partial input and terminator history
    pub fn clear(&mut self) {
        self.line.clear();
        self.seen = 0;
        self.last_was_terminator = false;
    }

    pub fn is_empty(&self) -> bool {
        self.seen == 0
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_terminator(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}

fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}
