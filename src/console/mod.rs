//! Telnet console input side
//!
//! Byte stream to command lines, command lines to [`Command`]s.
//! Executing them is the session's job.

pub mod commands;
pub mod line_reader;
pub mod parser;

pub use commands::{Command, CommandDescriptor, ProjectCommands, COMMANDS};
pub use line_reader::{LineReader, LineTooLong};
pub use parser::{parse_int, parse_line, ParsedCommand};
