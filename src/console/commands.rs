//! Command table
//!
//! Maps a parsed line to a [`Command`]. Verbs are case-sensitive and are
//! tried in table order; anything unmatched becomes [`Command::Project`].

use core::fmt::Write;

use super::parser::ParsedCommand;
use crate::level::Level;

/// A recognized console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    Quit,
    Memory,
    CpuFrequency(u32),
    SetLevel(Level),
    ToggleLevelTag,
    ToggleTime,
    ToggleProfiler,
    /// `p <n>`; `None` when `<n>` is not a positive integer
    ProfilerMinGap(Option<u64>),
    /// `P [<n>]`
    ProfilerLevel(Option<u64>),
    /// `A [<n>]`
    AutoProfiler(Option<u64>),
    ToggleColors,
    Filter(&'a str),
    NoFilter,
    Reset,
    /// Not one of ours, hand it to the project handler
    Project,
}

impl<'a> Command<'a> {
    /// Classify a parsed command line
    pub fn parse(cmd: &ParsedCommand<'a>) -> Self {
        // Plain verbs match the whole line; no argument allowed.
        if cmd.arg.is_none() {
            match cmd.verb {
                "h" | "?" | "help" => return Command::Help,
                "q" => return Command::Quit,
                "m" => return Command::Memory,
                "cpu80" => return Command::CpuFrequency(80),
                "cpu160" => return Command::CpuFrequency(160),
                "v" => return Command::SetLevel(Level::Verbose),
                "d" => return Command::SetLevel(Level::Debug),
                "i" => return Command::SetLevel(Level::Info),
                "w" => return Command::SetLevel(Level::Warning),
                "e" => return Command::SetLevel(Level::Error),
                "l" => return Command::ToggleLevelTag,
                "t" => return Command::ToggleTime,
                "p" => return Command::ToggleProfiler,
                "c" => return Command::ToggleColors,
                "nofilter" => return Command::NoFilter,
                "reset" => return Command::Reset,
                _ => {}
            }
        }

        match cmd.verb {
            "p" => Command::ProfilerMinGap(cmd.positive_arg()),
            "P" => Command::ProfilerLevel(cmd.positive_arg()),
            "A" => Command::AutoProfiler(cmd.positive_arg()),
            "filter" => match cmd.non_empty_arg() {
                Some(text) => Command::Filter(text),
                None => Command::Project,
            },
            _ => Command::Project,
        }
    }
}

/// Help entry
pub struct CommandDescriptor {
    pub usage: &'static str,
    pub brief: &'static str,
}

/// Built-in commands, in banner order
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { usage: "? or help", brief: "display these help commands" },
    CommandDescriptor { usage: "q", brief: "quit (close this connection)" },
    CommandDescriptor { usage: "m", brief: "display available memory" },
    CommandDescriptor { usage: "v", brief: "set debug level to verbose" },
    CommandDescriptor { usage: "d", brief: "set debug level to debug" },
    CommandDescriptor { usage: "i", brief: "set debug level to info" },
    CommandDescriptor { usage: "w", brief: "set debug level to warning" },
    CommandDescriptor { usage: "e", brief: "set debug level to errors" },
    CommandDescriptor { usage: "l", brief: "show debug level" },
    CommandDescriptor { usage: "t", brief: "show time in milliseconds" },
    CommandDescriptor { usage: "p", brief: "show time between actual and last message (in millis)" },
    CommandDescriptor { usage: "p min", brief: "show only if time is this minimal" },
    CommandDescriptor { usage: "P time", brief: "set debug level to profiler" },
    CommandDescriptor { usage: "A time", brief: "set auto debug level to profiler" },
    CommandDescriptor { usage: "c", brief: "show colors" },
    CommandDescriptor { usage: "filter <string>", brief: "show only debug messages containing this value" },
    CommandDescriptor { usage: "nofilter", brief: "disable the filter" },
    CommandDescriptor { usage: "cpu80", brief: "set the CPU to 80 MHz" },
    CommandDescriptor { usage: "cpu160", brief: "set the CPU to 160 MHz" },
];

/// Help entry for `reset`, listed only when the command is enabled
pub static RESET_COMMAND: CommandDescriptor = CommandDescriptor {
    usage: "reset",
    brief: "reset the device",
};

/// Write one help line
pub fn write_help_line(out: &mut dyn Write, c: &CommandDescriptor) {
    let _ = write!(out, "    {:<15} -> {}\r\n", c.usage, c.brief);
}

/// Handler for commands the console does not know.
///
/// Receives the parsed line and a writer to the client. The line is also
/// available afterwards through `Session::last_command`.
pub trait ProjectCommands {
    fn execute(&mut self, cmd: &ParsedCommand<'_>, out: &mut dyn Write);
}

impl<F> ProjectCommands for F
where
    F: FnMut(&ParsedCommand<'_>, &mut dyn Write),
{
    fn execute(&mut self, cmd: &ParsedCommand<'_>, out: &mut dyn Write) {
        self(cmd, out)
    }
}
