//! Logging macros for firmware code.
//!
//! Each macro goes through `Session::log`, which checks the level gate
//! before formatting, so nothing is rendered when nobody would see it.
//!
//! # Example
//!
//! ```ignore
//! debug_w!(console, "battery low: {} mV\n", millivolts);
//! ```

/// Log at an explicit level.
#[macro_export]
macro_rules! debug_log {
    ($session:expr, $level:expr, $($arg:tt)*) => {
        $session.log($level, format_args!($($arg)*))
    };
}

/// Log regardless of the client level.
#[macro_export]
macro_rules! debug_any {
    ($session:expr, $($arg:tt)*) => {
        $crate::debug_log!($session, $crate::level::Level::Any, $($arg)*)
    };
}

/// Profiler log.
#[macro_export]
macro_rules! debug_p {
    ($session:expr, $($arg:tt)*) => {
        $crate::debug_log!($session, $crate::level::Level::Profiler, $($arg)*)
    };
}

/// Verbose log.
#[macro_export]
macro_rules! debug_v {
    ($session:expr, $($arg:tt)*) => {
        $crate::debug_log!($session, $crate::level::Level::Verbose, $($arg)*)
    };
}

/// Debug log.
#[macro_export]
macro_rules! debug_d {
    ($session:expr, $($arg:tt)*) => {
        $crate::debug_log!($session, $crate::level::Level::Debug, $($arg)*)
    };
}

/// Info log.
#[macro_export]
macro_rules! debug_i {
    ($session:expr, $($arg:tt)*) => {
        $crate::debug_log!($session, $crate::level::Level::Info, $($arg)*)
    };
}

/// Warning log.
#[macro_export]
macro_rules! debug_w {
    ($session:expr, $($arg:tt)*) => {
        $crate::debug_log!($session, $crate::level::Level::Warning, $($arg)*)
    };
}

/// Error log.
#[macro_export]
macro_rules! debug_e {
    ($session:expr, $($arg:tt)*) => {
        $crate::debug_log!($session, $crate::level::Level::Error, $($arg)*)
    };
}
