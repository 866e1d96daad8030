//! Debug levels and their wire tags.
//!
//! Ordering is total: `Profiler < Verbose < Debug < Info < Warning < Error < Any`.
//! A message at level `x` passes the session gate when `x >= client level`.
//! `Any` is a sentinel that always passes and is never stored as a level.

use crate::ansi;

/// Severity of a debug message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Time of execution of pieces of code.
    Profiler = 0,
    Verbose = 1,
    Debug = 2,
    Info = 3,
    Warning = 4,
    Error = 5,
    /// Matches every client level. Never an active level.
    Any = 6,
}

impl Level {
    /// The six levels a session may be set to.
    pub const CONCRETE: [Level; 6] = [
        Level::Profiler,
        Level::Verbose,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
    ];

    /// Single character shown in the level tag.
    ///
    /// `Any` has no tag of its own; it renders as the empty string.
    pub fn tag(self) -> &'static str {
        match self {
            Level::Profiler => "P",
            Level::Verbose => "v",
            Level::Debug => "d",
            Level::Info => "i",
            Level::Warning => "w",
            Level::Error => "e",
            Level::Any => "",
        }
    }

    /// Name used in acknowledgments.
    pub fn name(self) -> &'static str {
        match self {
            Level::Profiler => "Profiler",
            Level::Verbose => "Verbose",
            Level::Debug => "Debug",
            Level::Info => "Info",
            Level::Warning => "Warning",
            Level::Error => "Error",
            Level::Any => "Any",
        }
    }

    /// Background used behind the tag when colors are on.
    pub fn background(self) -> Option<&'static str> {
        match self {
            Level::Debug => Some(ansi::BACKGROUND_GREEN),
            Level::Info => Some(ansi::BACKGROUND_WHITE),
            Level::Warning => Some(ansi::BACKGROUND_YELLOW),
            Level::Error => Some(ansi::BACKGROUND_RED),
            Level::Profiler | Level::Verbose | Level::Any => None,
        }
    }

    /// False only for the `Any` sentinel.
    pub fn is_concrete(self) -> bool {
        self != Level::Any
    }
}

impl core::fmt::Display for Level {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
