//! ANSI escape sequences used by the decorated output.

pub const RESET: &str = "\x1B[0m";

pub const BACKGROUND_RED: &str = "\x1B[41m";
pub const BACKGROUND_GREEN: &str = "\x1B[42m";
pub const BACKGROUND_YELLOW: &str = "\x1B[43m";
pub const BACKGROUND_CYAN: &str = "\x1B[46m";
pub const BACKGROUND_WHITE: &str = "\x1B[47m";
