//! Connection admission.
//!
//! At most one client, pinned to its address. A pending connection from
//! the same address replaces the current client (recovers half-open
//! sessions); one from any other address is closed on the spot.

use log::{info, warn};

use super::Session;

impl Session {
    pub(super) fn admit(&mut self, now: u64) {
        if !self.transport.has_pending() {
            return;
        }

        let current = self
            .client
            .as_ref()
            .filter(|c| c.is_alive())
            .map(|c| c.remote_addr());

        let Some(mut incoming) = self.transport.accept() else {
            return;
        };
        let addr = incoming.remote_addr();

        match current {
            Some(existing) if existing == addr => {
                info!("debug client {} reconnected, replacing old session", addr);
                self.flush_coalescer();
                if let Some(mut old) = self.client.take() {
                    old.close();
                }
            }
            Some(existing) => {
                warn!(
                    "rejecting debug client {}: session held by {}",
                    addr, existing
                );
                incoming.close();
                return;
            }
            None => {
                if let Some(mut stale) = self.client.take() {
                    stale.close();
                }
                info!("debug client {} connected", addr);
            }
        }

        self.client = Some(incoming);
        self.on_connect(now);
    }

    fn on_connect(&mut self, now: u64) {
        if let Some(client) = self.client.as_mut() {
            client.set_no_delay();
            client.discard_input();
        }

        self.line.reset();
        self.reader.clear();
        self.last_command.clear();
        self.state.last_command_ms = now;
        self.state.last_print_ms = now;
        self.state.connected = true;
        if let Some(coalescer) = self.coalescer.as_mut() {
            coalescer.reset(now);
        }

        self.show_help();

        // Some clients echo what they were sent; drop that echo.
        self.clock.delay_ms(self.config.settle_ms);
        if let Some(client) = self.client.as_mut() {
            client.discard_input();
        }
    }

    /// Drop the client if the peer went away.
    pub(super) fn refresh_connected(&mut self) {
        if let Some(client) = self.client.as_mut() {
            client.poll();
        }
        let alive = self.client.as_ref().is_some_and(|c| c.is_alive());
        if !alive {
            if let Some(mut client) = self.client.take() {
                info!("debug client {} disconnected", client.remote_addr());
                client.close();
                if let Some(coalescer) = self.coalescer.as_mut() {
                    coalescer.reset(self.clock.now_ms());
                }
            }
        }
        self.state.connected = alive;
    }

    /// Close the client after sending anything still queued for it.
    pub(super) fn disconnect(&mut self) {
        self.flush_coalescer();
        if let Some(mut client) = self.client.take() {
            client.close();
        }
        self.state.connected = false;
    }
}
