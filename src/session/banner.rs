//! Welcome banner and help text.

use core::fmt::Write;

use super::{Session, VERSION};
use crate::console::commands::{write_help_line, COMMANDS, RESET_COMMAND};

impl Session {
    /// Send the banner to the client.
    pub(super) fn show_help(&mut self) {
        let help = self.help_text();
        if let Some(client) = self.client.as_mut() {
            client.write(help.as_bytes());
        }
    }

    /// Banner text, CRLF line endings.
    pub fn help_text(&self) -> String {
        let mut help = String::with_capacity(1024);

        let _ = write!(help, "*** Remote debug console, version {}.\r\n", VERSION);
        let _ = write!(help, "* Hostname: {}\r\n", self.hostname);
        if let Some(ip) = self.hardware.local_ip() {
            let _ = write!(help, "* IP: {}\r\n", ip);
        }
        if let Some(mac) = self.hardware.mac_address() {
            let _ = write!(help, "* MAC address: {}\r\n", mac);
        }
        let _ = write!(help, "* Free heap RAM: {}\r\n", self.hardware.free_heap());
        help.push_str("******************************************************\r\n");
        help.push_str("* Commands:\r\n");

        for c in COMMANDS {
            write_help_line(&mut help, c);
        }
        if self.state.reset_enabled {
            write_help_line(&mut help, &RESET_COMMAND);
        }

        if !self.project_help.is_empty() && self.project.is_some() {
            help.push_str("\r\n");
            help.push_str("    * Project commands:\r\n");
            let section = format!("\r\n{}", self.project_help);
            help.push_str(&section.replace('\n', "\n    "));
        }

        help.push_str("\r\n");
        help.push_str("* Please type the command and press enter to execute.(? or h for this help)\r\n");
        help.push_str("***\r\n");
        help
    }
}
