//! Command dispatch: input bytes to commands, commands to state changes
//! and acknowledgments.

use core::fmt::Write;

use log::{info, warn};

use super::Session;
use crate::console::{parse_line, Command, ParsedCommand};
use crate::hal::Connection;

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// `core::fmt::Write` over the client connection, if any.
struct ClientWriter<'a> {
    client: Option<&'a mut Box<dyn Connection>>,
}

impl Write for ClientWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if let Some(client) = self.client.as_mut() {
            client.write(s.as_bytes());
        }
        Ok(())
    }
}

impl Session {
    /// Read everything the client has sent and run completed lines.
    pub(super) fn drain_input(&mut self) {
        loop {
            let Some(byte) = self.client.as_mut().and_then(|c| c.read_byte()) else {
                break;
            };
            match self.reader.push(byte) {
                Some(Ok(line)) => self.run_command(&line),
                Some(Err(e)) => warn!("debug client input dropped: {}", e),
                None => {}
            }
        }
    }

    /// Execute one complete command line.
    pub fn run_command(&mut self, line: &str) {
        let now = self.clock.now_ms();
        self.last_command.clear();
        self.last_command.push_str(line);
        self.state.last_command_ms = now;

        self.reply(format_args!("* Debug: Command received: {}", line));

        let parsed = parse_line(line);
        let command = Command::parse(&parsed);
        self.execute(command, &parsed, now);
    }

    fn execute(&mut self, command: Command<'_>, parsed: &ParsedCommand<'_>, now: u64) {
        match command {
            Command::Help => self.show_help(),

            Command::Quit => {
                self.reply(format_args!("* Closing telnet connection ..."));
                info!("debug client quit");
                self.disconnect();
            }

            Command::Memory => {
                let free = self.hardware.free_heap();
                self.reply(format_args!("* Free heap RAM: {}", free));
            }

            Command::CpuFrequency(mhz) => {
                self.hardware.set_cpu_frequency(mhz);
                self.reply(format_args!("* CPU changed to {} MHz", mhz));
            }

            Command::SetLevel(level) => {
                if self.state.set_level(level) {
                    self.reply(format_args!("* Debug level set to {}", level));
                }
            }

            Command::ToggleLevelTag => {
                self.state.show_level_tag = !self.state.show_level_tag;
                let shown = self.state.show_level_tag;
                self.reply(format_args!("* Show debug level: {}", on_off(shown)));
            }

            Command::ToggleTime => {
                self.state.show_time = !self.state.show_time;
                let shown = self.state.show_time;
                self.reply(format_args!("* Show time: {}", on_off(shown)));
            }

            Command::ToggleProfiler => {
                let show = !self.state.show_profiler;
                self.state.set_profiler(show, 0);
                self.reply(format_args!("* Show profiler: {}", on_off(show)));
            }

            Command::ProfilerMinGap(Some(min_gap)) => {
                self.state.set_profiler(true, min_gap);
                self.reply(format_args!(
                    "* Show profiler: on (with minimal time: {})",
                    min_gap
                ));
            }

            Command::ProfilerMinGap(None) => {}

            Command::ProfilerLevel(duration) => {
                let duration = duration.unwrap_or(self.config.profiler_revert_default_ms);
                self.state.enter_profiler(now + duration);
                self.state.show_profiler = true;
                self.reply(format_args!(
                    "* Debug level set to Profiler (disable in {} millis)",
                    duration
                ));
            }

            Command::AutoProfiler(gap) => {
                let gap = gap.unwrap_or(self.config.auto_profiler_default_ms);
                self.state.auto_profiler_gap_ms = gap;
                self.reply(format_args!(
                    "* Auto profiler debug level active (time >= {} millis)",
                    gap
                ));
            }

            Command::ToggleColors => {
                let wanted = !self.state.show_colors();
                let shown = self.state.set_colors(wanted);
                self.reply(format_args!("* Show colors: {}", on_off(shown)));
            }

            Command::Filter(text) => self.set_filter(text),

            Command::NoFilter => self.set_no_filter(),

            Command::Reset if self.state.reset_enabled => self.reset_device(),

            Command::Reset | Command::Project => self.run_project_command(parsed),
        }
    }

    fn run_project_command(&mut self, parsed: &ParsedCommand<'_>) {
        if let Some(handler) = self.project.as_mut() {
            let mut out = ClientWriter {
                client: self.client.as_mut(),
            };
            handler.execute(parsed, &mut out);
        }
    }

    fn reset_device(&mut self) {
        self.reply(format_args!("* Reset..."));
        self.reply(format_args!("* Closing telnet connection..."));
        self.reply(format_args!("* Resetting the device..."));
        warn!("debug console: device reset requested by client");

        self.disconnect();
        self.transport.stop();

        self.clock.delay_ms(self.config.restart_delay_ms);
        self.hardware.restart();
    }
}
