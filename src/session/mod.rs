//! Console session engine.
//!
//! One [`Session`] per device. It owns the transport and the single client
//! connection, the shared [`SessionState`], the input line reader and the
//! output line buffer. The firmware calls [`Session::service`] from its
//! main loop and writes log output through `core::fmt::Write` /
//! `std::io::Write` (usually via the `debug_*!` macros).
//!
//! # Service tick
//!
//! ```text
//! service()
//!   1. admission      accept / replace / reject pending connection
//!   2. housekeeping   profiler level revert, auto profiler trigger
//!   3. input          drain client bytes -> lines -> dispatch
//!   4. coalescing     send due client output
//!   5. idle timeout   close an inactive session
//! ```
//!
//! Nothing here returns an error to the caller. Transport trouble shows up
//! as a dead connection and is handled on the next tick.

mod admission;
mod banner;
mod dispatch;
mod output;

use core::fmt::Write;

use log::info;

use crate::config::ConsoleConfig;
use crate::console::{LineReader, ParsedCommand, ProjectCommands};
use crate::hal::{Clock, Connection, EchoSink, Hardware, SerialEcho, Transport};
use crate::level::Level;
use crate::output::{Coalescer, OutputLine};
use crate::state::SessionState;

/// Version shown in the banner (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Remote debug console session
pub struct Session {
    hostname: String,
    config: ConsoleConfig,
    state: SessionState,

    transport: Box<dyn Transport>,
    client: Option<Box<dyn Connection>>,
    hardware: Box<dyn Hardware>,
    clock: Box<dyn Clock>,
    echo: Box<dyn EchoSink>,

    project_help: String,
    project: Option<Box<dyn ProjectCommands>>,

    reader: LineReader,
    last_command: String,
    line: OutputLine,
    coalescer: Option<Coalescer>,
    last_service_ms: u64,
}

impl Session {
    /// Build a session. Nothing is sent until a client connects.
    pub fn new(
        hostname: impl Into<String>,
        config: ConsoleConfig,
        transport: impl Transport + 'static,
        hardware: impl Hardware + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let now = clock.now_ms();
        let state = SessionState::new(&config, now);
        let coalescer = config.coalesce.map(|c| Coalescer::new(c, now));
        let hostname = hostname.into();

        info!(
            "debug console '{}' ready (level {}, port {})",
            hostname, state.client_level(), config.port
        );

        Self {
            hostname,
            line: OutputLine::new(config.line_capacity),
            reader: LineReader::with_limit(config.max_command_len),
            config,
            state,
            transport: Box::new(transport),
            client: None,
            hardware: Box::new(hardware),
            clock: Box::new(clock),
            echo: Box::new(SerialEcho),
            project_help: String::new(),
            project: None,
            last_command: String::new(),
            coalescer,
            last_service_ms: now,
        }
    }

    /// Replace the serial echo sink.
    pub fn with_echo(mut self, echo: impl EchoSink + 'static) -> Self {
        self.echo = Box::new(echo);
        self
    }

    /// Run one service tick. Call this from the main loop.
    pub fn service(&mut self) {
        let now = self.clock.now_ms();

        self.admit(now);
        self.refresh_connected();

        self.profiler_housekeeping(now);

        if self.state.connected {
            self.drain_input();
            self.poll_coalescer();
            self.check_idle();
        }

        self.last_service_ms = self.clock.now_ms();
    }

    /// Close the client and stop listening.
    pub fn stop(&mut self) {
        self.disconnect();
        self.transport.stop();
        info!("debug console stopped");
    }

    /// Gate for a message at `level`; see [`SessionState::is_active`].
    pub fn is_active(&mut self, level: Level) -> bool {
        self.state.is_active(level)
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Most recently completed command line.
    pub fn last_command(&self) -> &str {
        &self.last_command
    }

    pub fn clear_last_command(&mut self) {
        self.last_command.clear();
    }

    /// Mirror output to the serial echo sink. Turns colors off.
    pub fn set_serial_enabled(&mut self, enable: bool) {
        self.state.set_serial_echo(enable);
    }

    pub fn set_reset_cmd_enabled(&mut self, enable: bool) {
        self.state.reset_enabled = enable;
    }

    /// Help text for the project commands, shown in the banner.
    pub fn set_help_project_cmds(&mut self, help: impl Into<String>) {
        self.project_help = help.into();
    }

    /// Register a handler for commands the console does not know.
    pub fn set_project_commands<F>(&mut self, handler: F)
    where
        F: FnMut(&ParsedCommand<'_>, &mut dyn Write) + 'static,
    {
        self.project = Some(Box::new(handler));
    }

    /// Register a handler that takes no arguments; it reads the command
    /// through [`Session::last_command`] if it needs it.
    pub fn set_project_callback<F>(&mut self, mut callback: F)
    where
        F: FnMut() + 'static,
    {
        self.project = Some(Box::new(
            move |_: &ParsedCommand<'_>, _: &mut dyn Write| callback(),
        ));
    }

    /// Register a [`ProjectCommands`] implementation.
    pub fn set_project_handler(&mut self, handler: impl ProjectCommands + 'static) {
        self.project = Some(Box::new(handler));
    }

    pub fn show_time(&mut self, show: bool) {
        self.state.show_time = show;
    }

    /// Show the gap between lines, hiding lines closer than `min_gap_ms`.
    pub fn show_profiler(&mut self, show: bool, min_gap_ms: u64) {
        self.state.set_profiler(show, min_gap_ms);
    }

    pub fn show_debug_level(&mut self, show: bool) {
        self.state.show_level_tag = show;
    }

    /// Colored tags. Refused while serial echo is on.
    pub fn show_colors(&mut self, show: bool) -> bool {
        self.state.set_colors(show)
    }

    /// Switch to the profiler level when two ticks are at least
    /// `gap_ms` apart. 0 disables.
    pub fn auto_profiler_level(&mut self, gap_ms: u64) {
        self.state.auto_profiler_gap_ms = gap_ms;
    }

    /// Set the client level. `Level::Any` is ignored.
    pub fn set_level(&mut self, level: Level) -> bool {
        self.state.set_level(level)
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.state.set_filter(filter);
        if let Some(active) = self.state.filter().map(str::to_owned) {
            self.reply(format_args!("* Debug: Filter active: {}", active));
        }
    }

    pub fn set_no_filter(&mut self) {
        self.state.clear_filter();
        self.reply(format_args!("* Debug: Filter disabled"));
    }

    fn profiler_housekeeping(&mut self, now: u64) {
        if self.state.expire_profiler(now) {
            info!("profiler level expired, back to {}", self.state.client_level());
            self.reply(format_args!("* Debug level profile is now inactive."));
        }

        let trigger = self.state.auto_profiler_gap_ms;
        if trigger > 0 && self.state.client_level() != Level::Profiler {
            let gap = now.saturating_sub(self.last_service_ms);
            if gap >= trigger {
                self.state
                    .enter_profiler(now + self.config.profiler_revert_default_ms);
                info!("auto profiler level: {} ms between ticks", gap);
                self.reply(format_args!(
                    "* Debug level profile is now active - time between handles: {}",
                    gap
                ));
            }
        }
    }

    fn check_idle(&mut self) {
        let Some(limit) = self.config.idle_timeout_ms else {
            return;
        };
        let now = self.clock.now_ms();
        if now.saturating_sub(self.state.last_command_ms) > limit {
            info!("closing debug session after {} ms without commands", limit);
            self.reply(format_args!("* Closing session due to inactivity."));
            self.disconnect();
        }
    }

    /// Write one CRLF-terminated line straight to the client.
    fn reply(&mut self, args: core::fmt::Arguments<'_>) {
        if let Some(client) = self.client.as_mut() {
            let mut text = args.to_string();
            text.push_str("\r\n");
            client.write(text.as_bytes());
        }
    }
}
