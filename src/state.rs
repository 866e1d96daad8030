//! Shared session state.
//!
//! Everything the line reader, dispatcher and output formatter agree on:
//! levels, display toggles, profiler timers and the filter. Setters keep
//! the invariants: the active and saved levels are never `Level::Any`, an
//! empty filter means no filter, and colors stay off while serial echo is on.

use crate::config::ConsoleConfig;
use crate::level::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    client_level: Level,
    last_level: Level,
    pub(crate) connected: bool,
    serial_echo: bool,

    pub show_time: bool,
    pub show_profiler: bool,
    pub(crate) show_level_tag: bool,
    show_colors: bool,

    pub profiler_min_gap_ms: u64,
    level_before_profiler: Level,
    profiler_disable_at_ms: u64,
    pub auto_profiler_gap_ms: u64,

    filter: Option<String>,

    pub(crate) last_print_ms: u64,
    pub last_command_ms: u64,
    pub(crate) reset_enabled: bool,
}

impl SessionState {
    pub fn new(config: &ConsoleConfig, now_ms: u64) -> Self {
        let level = if config.initial_level.is_concrete() {
            config.initial_level
        } else {
            Level::Debug
        };
        Self {
            client_level: level,
            last_level: level,
            connected: false,
            serial_echo: config.serial_echo,
            show_time: false,
            show_profiler: false,
            show_level_tag: config.show_level_tag,
            show_colors: false,
            profiler_min_gap_ms: 0,
            level_before_profiler: level,
            profiler_disable_at_ms: 0,
            auto_profiler_gap_ms: 0,
            filter: None,
            last_print_ms: now_ms,
            last_command_ms: now_ms,
            reset_enabled: config.reset_command_enabled,
        }
    }

    /// Gate for a message at `level`.
    ///
    /// Passes when `level` is at or above the client level and someone is
    /// listening (a client or the serial echo). A pass records `level` for
    /// the next line's tag.
    pub fn is_active(&mut self, level: Level) -> bool {
        let active = level >= self.client_level && (self.connected || self.serial_echo);
        if active {
            self.last_level = level;
        }
        active
    }

    pub fn client_level(&self) -> Level {
        self.client_level
    }

    pub fn last_level(&self) -> Level {
        self.last_level
    }

    pub fn level_before_profiler(&self) -> Level {
        self.level_before_profiler
    }

    pub fn profiler_disable_at_ms(&self) -> u64 {
        self.profiler_disable_at_ms
    }

    /// Set the client level. `Level::Any` is refused.
    pub fn set_level(&mut self, level: Level) -> bool {
        if !level.is_concrete() {
            return false;
        }
        self.client_level = level;
        true
    }

    /// Switch to the profiler level until `disable_at_ms`.
    ///
    /// The current level is saved for the revert unless the profiler level
    /// is already active, so re-entering never saves `Profiler` over the
    /// real level.
    pub fn enter_profiler(&mut self, disable_at_ms: u64) {
        if self.client_level != Level::Profiler {
            self.level_before_profiler = self.client_level;
        }
        self.client_level = Level::Profiler;
        self.profiler_disable_at_ms = disable_at_ms;
    }

    /// Restore the saved level once the profiler window has passed.
    ///
    /// Returns true when a revert happened.
    pub fn expire_profiler(&mut self, now_ms: u64) -> bool {
        if self.client_level == Level::Profiler && now_ms >= self.profiler_disable_at_ms {
            self.client_level = self.level_before_profiler;
            return true;
        }
        false
    }

    pub fn show_colors(&self) -> bool {
        self.show_colors
    }

    /// Request colored output. Refused while serial echo is on.
    pub fn set_colors(&mut self, show: bool) -> bool {
        self.show_colors = show && !self.serial_echo;
        self.show_colors
    }

    pub fn serial_echo(&self) -> bool {
        self.serial_echo
    }

    /// Enable or disable the serial mirror. Always turns colors off.
    pub fn set_serial_echo(&mut self, enable: bool) {
        self.serial_echo = enable;
        self.show_colors = false;
    }

    /// Profiler display with an optional minimum gap.
    pub fn set_profiler(&mut self, show: bool, min_gap_ms: u64) {
        self.show_profiler = show;
        self.profiler_min_gap_ms = min_gap_ms;
    }

    /// Activate the filter with `text`, compared case-insensitively.
    ///
    /// Empty text clears the filter.
    pub fn set_filter(&mut self, text: &str) {
        if text.is_empty() {
            self.filter = None;
        } else {
            self.filter = Some(text.to_lowercase());
        }
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Should a flushed chunk be dropped?
    ///
    /// `gap_ms` is the profiler gap measured when the line started, if
    /// the profiler display was on at that point.
    pub fn suppresses(&self, chunk: &[u8], gap_ms: Option<u64>) -> bool {
        if self.show_profiler {
            if let Some(gap) = gap_ms {
                if gap < self.profiler_min_gap_ms {
                    return true;
                }
            }
        }
        match &self.filter {
            Some(filter) => !contains_ignore_case(chunk, filter),
            None => false,
        }
    }
}

/// Does `haystack` contain `needle` (already lower-case), ignoring ASCII case?
fn contains_ignore_case(haystack: &[u8], needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    let lowered = haystack.to_ascii_lowercase();
    lowered.windows(needle.len()).any(|w| w == needle)
}
