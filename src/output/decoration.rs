//! Line prefix: level tag, time tag, profiler tag.
//!
//! Captured once at the start of a line, then rendered with or without
//! ANSI colors. A line with every display toggle off gets no prefix.

use crate::ansi;
use crate::level::Level;
use crate::state::SessionState;

/// Width the profiler gap is zero-padded to.
const GAP_WIDTH: usize = 4;

/// Tags for one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoration {
    pub level: Option<Level>,
    pub time_ms: Option<u64>,
    pub gap_ms: Option<u64>,
}

impl Decoration {
    /// Capture the tags for a line starting at `now_ms`.
    ///
    /// With the profiler display on, this measures the gap since the last
    /// decorated line and restarts the gap timer, whether or not the line
    /// is later suppressed.
    pub fn capture(state: &mut SessionState, now_ms: u64) -> Self {
        let level = Some(state.last_level())
            .filter(|l| state.show_level_tag && !l.tag().is_empty());
        let time_ms = state.show_time.then_some(now_ms);
        let gap_ms = if state.show_profiler {
            let gap = now_ms.saturating_sub(state.last_print_ms);
            state.last_print_ms = now_ms;
            Some(gap)
        } else {
            None
        };

        Self {
            level,
            time_ms,
            gap_ms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.time_ms.is_none() && self.gap_ms.is_none()
    }

    /// `(<tags>) ` or an empty string.
    pub fn render(&self, colors: bool) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut tags: Vec<String> = Vec::with_capacity(3);

        if let Some(level) = self.level {
            match level.background().filter(|_| colors) {
                Some(bg) => tags.push(format!("{}{}{}", bg, level.tag(), ansi::RESET)),
                None => tags.push(level.tag().to_string()),
            }
        }

        if let Some(time) = self.time_ms {
            tags.push(format!("t:{}ms", time));
        }

        if let Some(gap) = self.gap_ms {
            let body = format!("p:^{}ms", pad_number(gap, GAP_WIDTH));
            match gap_background(gap).filter(|_| colors) {
                Some(bg) => tags.push(format!("{}{}{}", bg, body, ansi::RESET)),
                None => tags.push(body),
            }
        }

        format!("({}) ", tags.join(" "))
    }
}

/// Background for a profiler gap.
///
/// Bands: under 250 ms plain, then cyan, yellow from 1 s, red from 3 s.
/// There is no magenta band between yellow and red.
fn gap_background(gap_ms: u64) -> Option<&'static str> {
    match gap_ms {
        0..=249 => None,
        250..=999 => Some(ansi::BACKGROUND_CYAN),
        1000..=2999 => Some(ansi::BACKGROUND_YELLOW),
        _ => Some(ansi::BACKGROUND_RED),
    }
}

/// Left-pad `value` with zeros to `width` digits.
///
/// Values wider than `width` keep their natural digits.
pub fn pad_number(value: u64, width: usize) -> String {
    format!("{:0width$}", value, width = width)
}
