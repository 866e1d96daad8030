//! Output pipeline pieces
//!
//! Per line: decorate at line start, accumulate, flush on newline or when
//! the line buffer is full. Flushed chunks optionally pass through a
//! coalescing buffer before reaching the client.

pub mod coalesce;
pub mod decoration;
pub mod line;

pub use coalesce::Coalescer;
pub use decoration::{pad_number, Decoration};
pub use line::{Chunk, OutputLine};

/// Render CR and LF as visible `\r` and `\n`.
pub fn expand(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}
