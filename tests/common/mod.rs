//! Mock capabilities shared by the session tests.
//!
//! Everything is single-threaded, so state is shared through
//! `Rc<RefCell<..>>` and inspected from the test after `service()`.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use rust_remote_debug::hal::{Clock, Connection, EchoSink, Hardware, Transport};
use rust_remote_debug::{ConsoleConfig, Session};

/// What one mock connection has seen.
#[derive(Default)]
pub struct ConnState {
    pub addr: String,
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
    pub closed: bool,
    pub no_delay: bool,
}

#[derive(Clone)]
pub struct ConnHandle(pub Rc<RefCell<ConnState>>);

impl ConnHandle {
    pub fn new(addr: &str) -> Self {
        Self(Rc::new(RefCell::new(ConnState {
            addr: addr.to_string(),
            ..ConnState::default()
        })))
    }

    /// Queue bytes as if the client typed them.
    pub fn send(&self, bytes: &[u8]) {
        self.0.borrow_mut().input.extend(bytes.iter().copied());
    }

    /// Everything written to this client so far.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow().output).into_owned()
    }

    pub fn clear_output(&self) {
        self.0.borrow_mut().output.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.0.borrow().closed
    }

    /// Simulate the peer dropping the connection.
    pub fn hang_up(&self) {
        self.0.borrow_mut().closed = true;
    }
}

pub struct MockConnection(ConnHandle);

impl Connection for MockConnection {
    fn is_alive(&self) -> bool {
        !self.0 .0.borrow().closed
    }

    fn remote_addr(&self) -> String {
        self.0 .0.borrow().addr.clone()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.0 .0.borrow_mut().input.pop_front()
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut state = self.0 .0.borrow_mut();
        if !state.closed {
            state.output.extend_from_slice(bytes);
        }
    }

    fn set_no_delay(&mut self) {
        self.0 .0.borrow_mut().no_delay = true;
    }

    fn close(&mut self) {
        self.0 .0.borrow_mut().closed = true;
    }
}

#[derive(Default)]
pub struct TransportState {
    pub pending: VecDeque<ConnHandle>,
    pub stopped: bool,
}

#[derive(Clone, Default)]
pub struct MockTransport(pub Rc<RefCell<TransportState>>);

impl MockTransport {
    /// Queue a connection attempt from `addr`.
    pub fn connect(&self, addr: &str) -> ConnHandle {
        let handle = ConnHandle::new(addr);
        self.0.borrow_mut().pending.push_back(handle.clone());
        handle
    }

    pub fn is_stopped(&self) -> bool {
        self.0.borrow().stopped
    }
}

impl Transport for MockTransport {
    fn has_pending(&mut self) -> bool {
        let state = self.0.borrow();
        !state.stopped && !state.pending.is_empty()
    }

    fn accept(&mut self) -> Option<Box<dyn Connection>> {
        let handle = self.0.borrow_mut().pending.pop_front()?;
        Some(Box::new(MockConnection(handle)))
    }

    fn stop(&mut self) {
        let mut state = self.0.borrow_mut();
        state.stopped = true;
        state.pending.clear();
    }
}

/// Manual clock. `delay_ms` advances time instead of sleeping.
#[derive(Clone, Default)]
pub struct ManualClock(pub Rc<Cell<u64>>);

impl ManualClock {
    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }

    fn delay_ms(&self, ms: u64) {
        self.advance(ms);
    }
}

#[derive(Default)]
pub struct HardwareState {
    pub cpu_mhz: Vec<u32>,
    pub restarts: u32,
}

#[derive(Clone, Default)]
pub struct MockHardware(pub Rc<RefCell<HardwareState>>);

impl Hardware for MockHardware {
    fn free_heap(&self) -> u32 {
        40_960
    }

    fn set_cpu_frequency(&mut self, mhz: u32) {
        self.0.borrow_mut().cpu_mhz.push(mhz);
    }

    fn restart(&mut self) {
        self.0.borrow_mut().restarts += 1;
    }

    fn local_ip(&self) -> Option<String> {
        Some("192.168.4.1".to_string())
    }
}

#[derive(Clone, Default)]
pub struct MockEcho(pub Rc<RefCell<Vec<u8>>>);

impl MockEcho {
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl EchoSink for MockEcho {
    fn write(&mut self, bytes: &[u8]) {
        self.0.borrow_mut().extend_from_slice(bytes);
    }
}

/// A session wired to mocks, with handles to all of them.
pub struct Harness {
    pub session: Session,
    pub transport: MockTransport,
    pub clock: ManualClock,
    pub hardware: MockHardware,
    pub echo: MockEcho,
}

impl Harness {
    pub fn new(config: ConsoleConfig) -> Self {
        let transport = MockTransport::default();
        let clock = ManualClock::default();
        clock.set(1_000);
        let hardware = MockHardware::default();
        let echo = MockEcho::default();
        let session = Session::new(
            "test-device",
            config,
            transport.clone(),
            hardware.clone(),
            clock.clone(),
        )
        .with_echo(echo.clone());
        Self {
            session,
            transport,
            clock,
            hardware,
            echo,
        }
    }

    /// Default config without the level tag, so output is easy to compare.
    pub fn plain() -> Self {
        let mut config = ConsoleConfig::default();
        config.show_level_tag = false;
        Self::new(config)
    }

    /// Connect a client from `addr`, run a tick and drop the banner.
    pub fn attach(&mut self, addr: &str) -> ConnHandle {
        let conn = self.transport.connect(addr);
        self.session.service();
        conn.clear_output();
        conn
    }

    /// Type a command line and run a tick.
    pub fn command(&mut self, conn: &ConnHandle, line: &str) {
        conn.send(line.as_bytes());
        conn.send(b"\r\n");
        self.session.service();
    }
}
