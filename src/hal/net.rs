//! Telnet transport over `std::net`.
//!
//! Works on the host and on ESP-IDF, which provides the std socket API on
//! top of lwIP. Sockets are non-blocking so `service()` never stalls.
//! Bytes the socket will not take yet wait in a per-connection outbox that
//! is drained on every poll; a peer that lets the outbox grow past its
//! limit is treated as gone.

use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};

use log::{debug, warn};

use super::{Connection, Transport};
use crate::error::ConsoleError;

/// Bytes pulled from the socket per read.
const READ_CHUNK: usize = 64;

/// Unsent bytes a connection may hold before the peer counts as stalled.
pub const OUTBOX_LIMIT: usize = 32 * 1024;

/// Non-blocking TCP listener.
pub struct TcpTransport {
    listener: Option<TcpListener>,
    pending: Option<TcpStream>,
}

impl TcpTransport {
    /// Bind `0.0.0.0:port`.
    pub fn bind(port: u16) -> Result<Self, ConsoleError> {
        let listener = TcpListener::bind(("0.0.0.0", port))
            .map_err(|source| ConsoleError::Bind { port, source })?;
        listener.set_nonblocking(true)?;
        Ok(Self {
            listener: Some(listener),
            pending: None,
        })
    }

    /// Port actually bound (useful with port 0).
    pub fn local_port(&self) -> Option<u16> {
        self.listener
            .as_ref()
            .and_then(|l| l.local_addr().ok())
            .map(|a| a.port())
    }
}

impl Transport for TcpTransport {
    fn has_pending(&mut self) -> bool {
        if self.pending.is_some() {
            return true;
        }
        let Some(listener) = self.listener.as_ref() else {
            return false;
        };
        match listener.accept() {
            Ok((stream, addr)) => {
                debug!("telnet: incoming connection from {}", addr);
                self.pending = Some(stream);
                true
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => false,
            Err(e) => {
                warn!("telnet: accept failed: {}", e);
                false
            }
        }
    }

    fn accept(&mut self) -> Option<Box<dyn Connection>> {
        if !self.has_pending() {
            return None;
        }
        let stream = self.pending.take()?;
        match TcpConnection::new(stream) {
            Ok(conn) => Some(Box::new(conn)),
            Err(e) => {
                warn!("telnet: could not configure client socket: {}", e);
                None
            }
        }
    }

    fn stop(&mut self) {
        self.pending = None;
        self.listener = None;
    }
}

/// Accepted TCP client.
pub struct TcpConnection {
    stream: TcpStream,
    peer: String,
    input: VecDeque<u8>,
    outbox: VecDeque<u8>,
    alive: bool,
}

impl TcpConnection {
    fn new(stream: TcpStream) -> std::io::Result<Self> {
        stream.set_nonblocking(true)?;
        let peer = stream.peer_addr()?.ip().to_string();
        Ok(Self {
            stream,
            peer,
            input: VecDeque::with_capacity(READ_CHUNK),
            outbox: VecDeque::new(),
            alive: true,
        })
    }

    fn fill(&mut self) {
        let mut chunk = [0u8; READ_CHUNK];
        match self.stream.read(&mut chunk) {
            Ok(0) => self.alive = false,
            Ok(n) => self.input.extend(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                debug!("telnet: read from {} failed: {}", self.peer, e);
                self.alive = false;
            }
        }
    }

    /// Push queued output into the socket until it would block.
    fn drain_outbox(&mut self) {
        while self.alive && !self.outbox.is_empty() {
            let (head, _) = self.outbox.as_slices();
            match self.stream.write(head) {
                Ok(0) => self.alive = false,
                Ok(n) => {
                    self.outbox.drain(..n);
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    debug!("telnet: write to {} failed: {}", self.peer, e);
                    self.alive = false;
                }
            }
        }
        if !self.alive {
            self.outbox.clear();
        }
    }

    /// Bytes accepted by `write` but not yet taken by the socket.
    pub fn pending_output(&self) -> usize {
        self.outbox.len()
    }
}

impl Connection for TcpConnection {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn remote_addr(&self) -> String {
        self.peer.clone()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.drain_outbox();
        if self.input.is_empty() && self.alive {
            self.fill();
        }
        self.input.pop_front()
    }

    fn write(&mut self, bytes: &[u8]) {
        if !self.alive {
            return;
        }
        self.outbox.extend(bytes);
        self.drain_outbox();
        if self.outbox.len() > OUTBOX_LIMIT {
            warn!(
                "telnet: {} stopped reading ({} bytes unsent), dropping client",
                self.peer,
                self.outbox.len()
            );
            self.outbox.clear();
            self.alive = false;
        }
    }

    fn poll(&mut self) {
        self.drain_outbox();
    }

    fn set_no_delay(&mut self) {
        if let Err(e) = self.stream.set_nodelay(true) {
            debug!("telnet: set_nodelay failed: {}", e);
        }
    }

    fn discard_input(&mut self) {
        self.input.clear();
        loop {
            self.fill();
            if self.input.is_empty() {
                break;
            }
            self.input.clear();
        }
    }

    fn close(&mut self) {
        self.drain_outbox();
        if !self.outbox.is_empty() {
            debug!("telnet: closing {} with {} bytes unsent", self.peer, self.outbox.len());
        }
        let _ = self.stream.shutdown(Shutdown::Both);
        self.alive = false;
        self.input.clear();
    }
}
