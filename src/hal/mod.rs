//! Hardware Abstraction Layer for RustRemoteDebug.
//!
//! Capabilities the console engine needs from the outside world.
//! Business logic stays in the session, HAL is just I/O.
//!
//! None of these calls report failure to the engine. Implementations log
//! and absorb their own errors; a dead connection reports `is_alive() == false`.

pub mod host;
pub mod net;
pub mod serial;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use host::{HostHardware, SystemClock};
pub use net::{TcpConnection, TcpTransport};
pub use serial::SerialEcho;

#[cfg(target_os = "espidf")]
pub use esp::{EspClock, EspHardware};

/// Listening side of the telnet transport.
pub trait Transport {
    /// Is an incoming connection waiting to be accepted?
    fn has_pending(&mut self) -> bool;

    /// Take the pending connection, if any.
    fn accept(&mut self) -> Option<Box<dyn Connection>>;

    /// Stop listening.
    fn stop(&mut self);
}

/// One accepted client connection.
pub trait Connection {
    fn is_alive(&self) -> bool;

    /// Remote address as text. Only compared for equality.
    fn remote_addr(&self) -> String;

    /// Next available input byte, `None` when nothing is buffered.
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue `bytes` for the client. Never blocks; a client that cannot
    /// keep up is reported through `is_alive()`.
    fn write(&mut self, bytes: &[u8]);

    /// Move queued output along. Called once per service tick.
    fn poll(&mut self) {}

    /// Disable send coalescing (Nagle) on this connection.
    fn set_no_delay(&mut self);

    /// Drop any input already received.
    fn discard_input(&mut self) {
        while self.read_byte().is_some() {}
    }

    fn close(&mut self);
}

/// Device-level operations.
pub trait Hardware {
    fn free_heap(&self) -> u32;

    fn set_cpu_frequency(&mut self, mhz: u32);

    /// Restart the device. Does not return on real hardware.
    fn restart(&mut self);

    /// Station IP shown in the banner.
    fn local_ip(&self) -> Option<String> {
        None
    }

    /// MAC address shown in the banner.
    fn mac_address(&self) -> Option<String> {
        None
    }
}

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;

    /// Block for `ms` milliseconds.
    fn delay_ms(&self, ms: u64);
}

/// Always-available secondary output (usually a UART).
pub trait EchoSink {
    fn write(&mut self, bytes: &[u8]);
}
