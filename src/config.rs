//! Module: config
//!
//! Purpose: Construction-time configuration for the debug console.
//!
//! Options that firmware builds usually toggle with preprocessor switches
//! (idle timeout, coalesced client writes) are plain fields here and are
//! resolved once when the session is built.

use crate::level::Level;

/// Default telnet port.
pub const TELNET_PORT: u16 = 23;

/// Output line buffer capacity in bytes.
pub const LINE_CAPACITY: usize = 150;

/// Default inactivity limit: 10 minutes.
pub const IDLE_TIMEOUT_MS: u64 = 600_000;

/// Longest command line accepted; a longer line is discarded whole.
pub const MAX_COMMAND_LEN: usize = 4096;

/// Settings for the optional client-side write coalescing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoalesceConfig {
    /// Flush when the oldest pending byte is at least this old.
    pub delay_ms: u64,
    /// Flush when this many bytes are pending.
    pub max_size: usize,
}

impl Default for CoalesceConfig {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            max_size: 255,
        }
    }
}

/// Console configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub port: u16,
    /// Capacity of the per-line output buffer.
    pub line_capacity: usize,
    /// Input lines longer than this are rejected, never truncated.
    pub max_command_len: usize,
    /// `None` disables the inactivity disconnect.
    pub idle_timeout_ms: Option<u64>,
    /// `None` writes every flushed line straight to the client.
    pub coalesce: Option<CoalesceConfig>,
    /// Input received this soon after accept is discarded.
    pub settle_ms: u64,
    /// Pause between closing the session and restarting the device.
    pub restart_delay_ms: u64,
    /// Revert delay for `P` without a usable argument.
    pub profiler_revert_default_ms: u64,
    /// Trigger gap for `A` without a usable argument.
    pub auto_profiler_default_ms: u64,
    pub initial_level: Level,
    pub show_level_tag: bool,
    pub reset_command_enabled: bool,
    pub serial_echo: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            port: TELNET_PORT,
            line_capacity: LINE_CAPACITY,
            max_command_len: MAX_COMMAND_LEN,
            idle_timeout_ms: Some(IDLE_TIMEOUT_MS),
            coalesce: None,
            settle_ms: 100,
            restart_delay_ms: 500,
            profiler_revert_default_ms: 1000,
            auto_profiler_default_ms: 1000,
            initial_level: Level::Debug,
            show_level_tag: true,
            reset_command_enabled: false,
            serial_echo: false,
        }
    }
}

impl ConsoleConfig {
    /// Default configuration starting at `level`.
    ///
    /// `Level::Any` is not a valid starting level and falls back to `Debug`.
    pub fn with_level(level: Level) -> Self {
        let initial_level = if level.is_concrete() { level } else { Level::Debug };
        Self {
            initial_level,
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_line_capacity(mut self, capacity: usize) -> Self {
        self.line_capacity = capacity.max(1);
        self
    }

    pub fn with_max_command_len(mut self, len: usize) -> Self {
        self.max_command_len = len.max(1);
        self
    }

    pub fn with_idle_timeout(mut self, timeout_ms: Option<u64>) -> Self {
        self.idle_timeout_ms = timeout_ms;
        self
    }

    pub fn with_coalesce(mut self, coalesce: Option<CoalesceConfig>) -> Self {
        self.coalesce = coalesce;
        self
    }

    pub fn with_settle_ms(mut self, settle_ms: u64) -> Self {
        self.settle_ms = settle_ms;
        self
    }

    pub fn with_reset_command(mut self, enabled: bool) -> Self {
        self.reset_command_enabled = enabled;
        self
    }

    pub fn with_serial_echo(mut self, enabled: bool) -> Self {
        self.serial_echo = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ConsoleConfig::default();
        assert_eq!(cfg.port, 23);
        assert_eq!(cfg.line_capacity, 150);
        assert_eq!(cfg.max_command_len, 4096);
        assert_eq!(cfg.idle_timeout_ms, Some(600_000));
        assert_eq!(cfg.coalesce, None);
        assert_eq!(cfg.initial_level, Level::Debug);
        assert!(cfg.show_level_tag);
    }

    #[test]
    fn test_with_level_rejects_sentinel() {
        assert_eq!(ConsoleConfig::with_level(Level::Any).initial_level, Level::Debug);
        assert_eq!(ConsoleConfig::with_level(Level::Warning).initial_level, Level::Warning);
    }

    #[test]
    fn test_line_capacity_never_zero() {
        assert_eq!(ConsoleConfig::default().with_line_capacity(0).line_capacity, 1);
    }
}
