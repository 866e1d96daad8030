//! RustRemoteDebug - demo firmware loop
//!
//! Serves the debug console on the telnet port and emits a heartbeat at
//! every level so the level, filter and profiler commands have something
//! to act on. Connect with `telnet <device> 23` (or the port given in
//! `DEBUG_CONSOLE_PORT` on the host).

use core::fmt::Write;
use std::time::Duration;

use log::{error, info};
use rust_remote_debug::hal::{Clock, TcpTransport};
use rust_remote_debug::{debug_d, debug_e, debug_i, debug_p, debug_v, debug_w};
use rust_remote_debug::{ConsoleConfig, Level, ParsedCommand, Session};

/// Heartbeat period in milliseconds.
const HEARTBEAT_MS: u64 = 1000;

#[cfg(target_os = "espidf")]
fn platform() -> (rust_remote_debug::hal::EspHardware, rust_remote_debug::hal::EspClock, u16) {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    // Wi-Fi bring-up belongs to the application; the console only needs
    // the network stack to be up before the first service() call.
    (
        rust_remote_debug::hal::EspHardware::new(),
        rust_remote_debug::hal::EspClock,
        rust_remote_debug::config::TELNET_PORT,
    )
}

#[cfg(not(target_os = "espidf"))]
fn platform() -> (rust_remote_debug::hal::HostHardware, rust_remote_debug::hal::SystemClock, u16) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let port = std::env::var("DEBUG_CONSOLE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(2323);
    (
        rust_remote_debug::hal::HostHardware::new(),
        rust_remote_debug::hal::SystemClock::new(),
        port,
    )
}

fn main() {
    let (hardware, clock, port) = platform();

    let transport = match TcpTransport::bind(port) {
        Ok(t) => t,
        Err(e) => {
            error!("debug console unavailable: {}", e);
            return;
        }
    };
    info!("debug console listening on port {}", port);

    let config = ConsoleConfig::with_level(Level::Debug).with_port(port);
    let mut console = Session::new("demo-device", config, transport, hardware, clock);
    console.set_help_project_cmds("hello -> say hello\nwho   -> show the last command");
    console.set_project_commands(|cmd: &ParsedCommand<'_>, out: &mut dyn Write| match cmd.verb {
        "hello" => {
            let _ = write!(out, "* Hello from the demo device\r\n");
        }
        "who" => {
            let _ = write!(out, "* You typed: {}\r\n", cmd.line);
        }
        _ => {}
    });

    let ticker = rust_remote_debug::hal::SystemClock::new();
    let mut next_beat = 0u64;
    let mut beat = 0u32;

    loop {
        console.service();

        let now = ticker.now_ms();
        if now >= next_beat {
            next_beat = now + HEARTBEAT_MS;
            beat = beat.wrapping_add(1);

            debug_p!(console, "profiler beat {}\n", beat);
            debug_v!(console, "verbose beat {}\n", beat);
            debug_d!(console, "debug beat {}\n", beat);
            debug_i!(console, "info beat {}\n", beat);
            if beat % 5 == 0 {
                debug_w!(console, "warning every 5 beats ({})\n", beat);
            }
            if beat % 20 == 0 {
                debug_e!(console, "error every 20 beats ({})\n", beat);
            }
        }

        std::thread::sleep(Duration::from_millis(10));
    }
}
