//! # RustRemoteDebug
//!
//! Remote debug console for embedded devices, served over telnet.
//!
//! ## Architecture
//!
//! One client attaches, types short commands, and receives the firmware's
//! leveled log output, optionally tagged with level, time and profiler gap.
//! Everything runs from a single cooperative [`Session::service`] call in
//! the main loop; no threads, no locks.
//!
//! - [`console`]: byte stream to command lines to [`Command`]s
//! - [`output`]: line decoration, buffering and write coalescing
//! - [`session`]: admission, dispatch and the log output path
//! - [`hal`]: transport, clock and device capabilities
//!
//! Log with the `debug_*!` macros:
//!
//! ```ignore
//! debug_i!(console, "wifi up, rssi {}\n", rssi);
//! ```

pub mod ansi;
pub mod config;
pub mod console;
pub mod error;
pub mod hal;
pub mod level;
pub mod logging;
pub mod output;
pub mod session;
pub mod state;

pub use config::{CoalesceConfig, ConsoleConfig};
pub use console::{Command, ParsedCommand, ProjectCommands};
pub use error::ConsoleError;
pub use level::Level;
pub use output::expand;
pub use session::Session;
pub use state::SessionState;
