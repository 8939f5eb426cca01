//! Blocking dump client: one request, one fully drained reply at a time.

use std::io;

use bytes::BytesMut;
use tracing::{debug, trace, warn};

use super::config::{ClientConfig, Termination};
use super::error::{Error, Result};
use super::message::{MessageIter, NlMsgError};
use super::request::{DumpKind, DumpRequest};
use super::response::{ResponseBuffer, SENTINEL_LEN};
use super::socket::{BindMode, NetlinkSocket, Transport};

/// Netlink dump client over the kernel routing socket.
///
/// The client owns its transport exclusively. Every I/O call blocks the
/// calling thread, and a dump must be drained with
/// [`receive_all`](Self::receive_all) before the next request is sent.
///
/// Any send or receive failure is fatal: the socket is released before the
/// error is returned and every later call fails with [`Error::Closed`].
pub struct DumpClient<T: Transport = NetlinkSocket> {
    transport: Option<T>,
    config: ClientConfig,
    pid: u32,
    seq: u32,
}

impl DumpClient<NetlinkSocket> {
    /// Open a routing socket with the default configuration.
    pub fn open() -> Result<Self> {
        Self::open_with(ClientConfig::default())
    }

    /// Open a routing socket with the given configuration.
    pub fn open_with(config: ClientConfig) -> Result<Self> {
        Self::open_transport(config, NetlinkSocket::new)
    }
}

impl<T: Transport> DumpClient<T> {
    /// Open a client over a transport produced by `open`.
    ///
    /// A failure from `open` surfaces as [`Error::Socket`].
    pub fn open_transport<F>(config: ClientConfig, open: F) -> Result<Self>
    where
        F: FnOnce(BindMode) -> io::Result<T>,
    {
        let transport = open(config.bind_mode()).map_err(Error::Socket)?;
        debug!(
            bind = ?config.bind_mode(),
            pid = transport.port_id(),
            "opened netlink route socket"
        );
        Ok(Self::with_transport(transport, config))
    }

    /// Wrap an already open transport.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        let pid = transport.port_id();
        Self {
            transport: Some(transport),
            config,
            pid,
            seq: 1,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sender pid stamped on outgoing requests.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Get the next sequence number for [`dump`](Self::dump).
    pub fn next_seq(&mut self) -> u32 {
        let seq = self.seq;
        self.seq = self.seq.wrapping_add(1);
        seq
    }

    /// Build and send a dump request for `kind`.
    pub fn send_dump_request(&mut self, kind: DumpKind, seq: u32) -> Result<DumpRequest> {
        let request = DumpRequest::new(kind, seq, self.pid);
        self.send_request(&request)?;
        Ok(request)
    }

    /// Send a prepared request.
    pub fn send_request(&mut self, request: &DumpRequest) -> Result<()> {
        let frame = request.encode();
        let transport = self.transport.as_mut().ok_or(Error::Closed)?;

        match transport.send(&frame) {
            Ok(n) if n == frame.len() => {
                debug!(
                    kind = %request.kind(),
                    seq = request.seq(),
                    pid = request.pid(),
                    family = request.family(),
                    "sent dump request"
                );
                Ok(())
            }
            Ok(n) => Err(self.fail(Error::ShortSend {
                expected: frame.len(),
                actual: n,
            })),
            Err(e) => Err(self.fail(Error::Send(e))),
        }
    }

    /// Receive datagrams until the dump ends.
    ///
    /// Blocks on every receive with no timeout. If the end-of-dump datagram
    /// never arrives the call never returns.
    ///
    /// A datagram longer than the configured receive capacity fails with
    /// [`Error::Truncated`] instead of being cut down, which could otherwise
    /// pass for the 20-byte end marker.
    pub fn receive_all(&mut self) -> Result<ResponseBuffer> {
        let capacity = self.config.capacity();
        let termination = self.config.termination_policy();
        let mut response = ResponseBuffer::new();

        loop {
            let transport = self.transport.as_mut().ok_or(Error::Closed)?;

            let mut buf = BytesMut::with_capacity(capacity);
            let n = match transport.recv(&mut buf) {
                Ok(n) => n,
                Err(e) => return Err(self.fail(Error::Receive(e))),
            };
            if n > buf.len() {
                // The tail of the datagram is gone and the rest of the dump
                // is still queued, so the session cannot be resynchronized.
                return Err(self.fail(Error::Truncated {
                    expected: n,
                    actual: buf.len(),
                }));
            }
            let chunk = buf.freeze();

            let done = match termination {
                Termination::SentinelLength => chunk.len() == SENTINEL_LEN,
                Termination::Done => match scan_for_done(&chunk) {
                    Ok(done) => done,
                    Err(e) => return Err(self.fail(e)),
                },
            };

            response.push(chunk);
            trace!(
                len = n,
                total = response.total_len(),
                chunks = response.len(),
                "received datagram"
            );

            if done {
                debug!(
                    chunks = response.len(),
                    total = response.total_len(),
                    "dump complete"
                );
                return Ok(response);
            }
        }
    }

    /// Send a dump request with the next sequence number and drain the reply.
    pub fn dump(&mut self, kind: DumpKind) -> Result<ResponseBuffer> {
        let seq = self.next_seq();
        self.send_dump_request(kind, seq)?;
        self.receive_all()
    }

    /// Release the socket. Calling this more than once is a no-op.
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            debug!("closed netlink route socket");
        }
    }

    /// Tear the session down and hand back the error.
    fn fail(&mut self, err: Error) -> Error {
        warn!(error = &err as &dyn std::error::Error, "closing netlink session");
        self.close();
        err
    }
}

impl<T: Transport> std::fmt::Debug for DumpClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DumpClient")
            .field("open", &self.is_open())
            .field("pid", &self.pid)
            .field("config", &self.config)
            .finish()
    }
}

/// Look for `NLMSG_DONE` among the messages of one datagram.
fn scan_for_done(chunk: &[u8]) -> Result<bool> {
    for msg in MessageIter::new(chunk) {
        let (header, payload) = msg?;

        if header.is_error() {
            let err = NlMsgError::from_bytes(payload)?;
            if !err.is_ack() {
                return Err(Error::from_errno(err.error));
            }
        }

        if header.is_done() {
            return Ok(true);
        }
    }
    Ok(false)
}
