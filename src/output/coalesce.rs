//! Client write coalescing.
//!
//! Small frequent lines are gathered and sent together once the oldest
//! send is older than the configured delay or the pending size reaches the
//! limit. Flushing is opportunistic: on every push and on every service
//! tick, never on a timer of its own.

use crate::config::CoalesceConfig;

pub struct Coalescer {
    pending: Vec<u8>,
    last_send_ms: u64,
    config: CoalesceConfig,
}

impl Coalescer {
    pub fn new(config: CoalesceConfig, now_ms: u64) -> Self {
        Self {
            pending: Vec::with_capacity(config.max_size),
            last_send_ms: now_ms,
            config,
        }
    }

    /// Queue `bytes`, sending through `send` whatever is due.
    pub fn push(&mut self, bytes: &[u8], now_ms: u64, send: &mut dyn FnMut(&[u8])) {
        if !self.pending.is_empty() && self.pending.len() + bytes.len() >= self.config.max_size {
            self.flush(now_ms, send);
        }
        self.pending.extend_from_slice(bytes);
        self.poll(now_ms, send);
    }

    /// Send pending bytes if the delay has passed or the buffer is full.
    pub fn poll(&mut self, now_ms: u64, send: &mut dyn FnMut(&[u8])) {
        let due = now_ms.saturating_sub(self.last_send_ms) >= self.config.delay_ms;
        if due || self.pending.len() >= self.config.max_size {
            self.flush(now_ms, send);
        }
    }

    /// Send everything pending now.
    pub fn flush(&mut self, now_ms: u64, send: &mut dyn FnMut(&[u8])) {
        if !self.pending.is_empty() {
            send(&self.pending);
            self.pending.clear();
        }
        self.last_send_ms = now_ms;
    }

    /// Drop pending bytes and restart the delay.
    pub fn reset(&mut self, now_ms: u64) {
        self.pending.clear();
        self.last_send_ms = now_ms;
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coalescer() -> Coalescer {
        Coalescer::new(
            CoalesceConfig {
                delay_ms: 100,
                max_size: 10,
            },
            0,
        )
    }

    #[test]
    fn test_holds_until_delay() {
        let mut c = coalescer();
        let mut sent: Vec<Vec<u8>> = Vec::new();
        c.push(b"ab", 10, &mut |b| sent.push(b.to_vec()));
        c.push(b"cd", 20, &mut |b| sent.push(b.to_vec()));
        assert!(sent.is_empty());
        assert_eq!(c.pending(), 4);

        c.poll(100, &mut |b| sent.push(b.to_vec()));
        assert_eq!(sent, vec![b"abcd".to_vec()]);
        assert_eq!(c.pending(), 0);
    }

    #[test]
    fn test_size_limit_sends_older_bytes_first() {
        let mut c = coalescer();
        let mut sent: Vec<Vec<u8>> = Vec::new();
        c.push(b"123456", 1, &mut |b| sent.push(b.to_vec()));
        c.push(b"7890", 2, &mut |b| sent.push(b.to_vec()));
        assert_eq!(sent, vec![b"123456".to_vec()]);
        assert_eq!(c.pending(), 4);
    }

    #[test]
    fn test_oversized_push_goes_out_at_once() {
        let mut c = coalescer();
        let mut sent: Vec<Vec<u8>> = Vec::new();
        c.push(b"0123456789abc", 1, &mut |b| sent.push(b.to_vec()));
        assert_eq!(sent, vec![b"0123456789abc".to_vec()]);
    }
}
