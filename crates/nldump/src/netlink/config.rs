//! Client configuration.

use super::request::REQUEST_LEN;
use super::socket::BindMode;

/// Per-receive buffer capacity used unless configured otherwise.
pub const DEFAULT_RECV_CAPACITY: usize = 4096;

/// How the client decides a dump is complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Termination {
    /// Stop at the first datagram that is exactly
    /// [`SENTINEL_LEN`](super::SENTINEL_LEN) bytes long, whatever it holds.
    #[default]
    SentinelLength,
    /// Walk every message header and stop at `NLMSG_DONE`. A nonzero
    /// `NLMSG_ERROR` ends the dump with [`Error::Kernel`](super::Error::Kernel).
    Done,
}

/// Settings for a [`DumpClient`](super::DumpClient).
///
/// # Example
///
/// ```ignore
/// use nldump::netlink::{BindMode, ClientConfig, Termination};
///
/// let config = ClientConfig::new()
///     .bind(BindMode::Kernel)
///     .recv_capacity(32 * 1024)
///     .termination(Termination::Done);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    bind: BindMode,
    recv_capacity: usize,
    termination: Termination,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bind: BindMode::Auto,
            recv_capacity: DEFAULT_RECV_CAPACITY,
            termination: Termination::SentinelLength,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how the socket obtains its port ID.
    pub fn bind(mut self, bind: BindMode) -> Self {
        self.bind = bind;
        self
    }

    /// Set the per-receive buffer capacity.
    ///
    /// Values below one request frame are raised to it; a smaller buffer
    /// could never hold the terminating datagram.
    pub fn recv_capacity(mut self, capacity: usize) -> Self {
        self.recv_capacity = capacity.max(REQUEST_LEN);
        self
    }

    /// Set the end-of-dump policy.
    pub fn termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    pub fn bind_mode(&self) -> BindMode {
        self.bind
    }

    pub fn capacity(&self) -> usize {
        self.recv_capacity
    }

    pub fn termination_policy(&self) -> Termination {
        self.termination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.bind_mode(), BindMode::Auto);
        assert_eq!(config.capacity(), 4096);
        assert_eq!(config.termination_policy(), Termination::SentinelLength);
    }

    #[test]
    fn test_capacity_floor() {
        assert_eq!(ClientConfig::new().recv_capacity(0).capacity(), 20);
        assert_eq!(ClientConfig::new().recv_capacity(8192).capacity(), 8192);
    }
}
