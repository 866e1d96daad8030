//! Host stand-ins for the device capabilities.
//!
//! Used by the demo binary when running on a workstation.

use std::time::{Duration, Instant};

use log::{info, warn};

use super::{Clock, Hardware};

/// Milliseconds since construction.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn delay_ms(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Workstation "device".
///
/// There is no heap figure to report; restart exits the process.
#[derive(Default)]
pub struct HostHardware {
    cpu_mhz: u32,
}

impl HostHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last frequency requested through `set_cpu_frequency`.
    pub fn cpu_mhz(&self) -> u32 {
        self.cpu_mhz
    }
}

impl Hardware for HostHardware {
    fn free_heap(&self) -> u32 {
        0
    }

    fn set_cpu_frequency(&mut self, mhz: u32) {
        info!("host: cpu frequency request {} MHz ignored", mhz);
        self.cpu_mhz = mhz;
    }

    fn restart(&mut self) {
        warn!("host: restart requested, exiting");
        std::process::exit(0);
    }

    fn local_ip(&self) -> Option<String> {
        Some("127.0.0.1".to_string())
    }
}
