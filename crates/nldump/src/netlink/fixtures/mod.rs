//! Test fixtures: synthetic datagrams and a scripted transport.

use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};

use bytes::{BufMut, BytesMut};

use super::message::{NlMsgHdr, nlmsg_align};
use super::socket::Transport;

/// Build one netlink message of `len` bytes (padded to alignment) whose
/// header declares `len`. The payload is zeroed.
pub fn datagram(msg_type: u16, flags: u16, seq: u32, len: usize) -> Vec<u8> {
    let header = NlMsgHdr {
        nlmsg_len: len as u32,
        nlmsg_type: msg_type,
        nlmsg_flags: flags,
        nlmsg_seq: seq,
        nlmsg_pid: 0,
    };
    let mut buf = vec![0u8; nlmsg_align(len)];
    buf[..header.as_bytes().len()].copy_from_slice(header.as_bytes());
    buf
}

/// Opaque bytes of the given length, as a kernel reply the client never decodes.
pub fn opaque(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

/// What a scripted receive should yield.
#[derive(Debug)]
pub enum Reply {
    Data(Vec<u8>),
    Fail(io::ErrorKind),
}

/// A transport that replays a fixed script and records every frame sent.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    pub replies: VecDeque<Reply>,
    pub sent: Arc<Mutex<Vec<Vec<u8>>>>,
    pub send_error: Option<io::ErrorKind>,
    pub send_limit: Option<usize>,
    pub pid: u32,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            replies: replies.into_iter().map(Reply::Data).collect(),
            pid: 4242,
            ..Self::default()
        }
    }

    pub fn then_fail(mut self, kind: io::ErrorKind) -> Self {
        self.replies.push_back(Reply::Fail(kind));
        self
    }

    pub fn failing_send(mut self, kind: io::ErrorKind) -> Self {
        self.send_error = Some(kind);
        self
    }

    pub fn short_send(mut self, limit: usize) -> Self {
        self.send_limit = Some(limit);
        self
    }

    pub fn sent_log(&self) -> Arc<Mutex<Vec<Vec<u8>>>> {
        Arc::clone(&self.sent)
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, frame: &[u8]) -> io::Result<usize> {
        if let Some(kind) = self.send_error {
            return Err(io::Error::from(kind));
        }
        self.sent.lock().unwrap().push(frame.to_vec());
        Ok(self.send_limit.map_or(frame.len(), |l| l.min(frame.len())))
    }

    fn recv(&mut self, buf: &mut BytesMut) -> io::Result<usize> {
        match self.replies.pop_front() {
            Some(Reply::Data(data)) => Ok(fill(buf, &data)),
            Some(Reply::Fail(kind)) => Err(io::Error::from(kind)),
            // Script exhausted: behave like a socket with nothing left to read.
            None => Err(io::Error::from(io::ErrorKind::WouldBlock)),
        }
    }

    fn port_id(&self) -> u32 {
        self.pid
    }
}

/// A transport fed from a channel; `recv` blocks until the test pushes a
/// datagram and fails once every sender is gone.
#[derive(Debug)]
pub struct ChannelTransport {
    rx: Receiver<Vec<u8>>,
}

impl ChannelTransport {
    pub fn new() -> (Sender<Vec<u8>>, Self) {
        let (tx, rx) = channel();
        (tx, Self { rx })
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, frame: &[u8]) -> io::Result<usize> {
        Ok(frame.len())
    }

    fn recv(&mut self, buf: &mut BytesMut) -> io::Result<usize> {
        let data = self
            .rx
            .recv()
            .map_err(|_| io::Error::from(io::ErrorKind::BrokenPipe))?;
        Ok(fill(buf, &data))
    }

    fn port_id(&self) -> u32 {
        7
    }
}

/// Copy as much of `data` as the buffer's spare capacity allows and report
/// the full datagram length, the way a socket read with MSG_TRUNC does.
fn fill(buf: &mut BytesMut, data: &[u8]) -> usize {
    let n = data.len().min(buf.capacity() - buf.len());
    buf.put_slice(&data[..n]);
    data.len()
}
