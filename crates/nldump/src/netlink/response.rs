//! Collected dump replies.

use bytes::Bytes;

use super::error::Result;
use super::message::{MessageIter, NlMsgHdr};

/// Datagram length that ends a dump under
/// [`Termination::SentinelLength`](super::Termination::SentinelLength).
///
/// It is the size of a lone `NLMSG_DONE`: a header plus its 4-byte status.
pub const SENTINEL_LEN: usize = 20;

/// Raw datagrams received for one dump, in arrival order.
///
/// Each chunk is exactly one datagram as the kernel sent it (or as much of
/// it as fit in the receive buffer).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBuffer {
    chunks: Vec<Bytes>,
    total: usize,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, chunk: Bytes) {
        self.total += chunk.len();
        self.chunks.push(chunk);
    }

    /// Number of datagrams received.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total bytes across all datagrams, terminal one included.
    pub fn total_len(&self) -> usize {
        self.total
    }

    pub fn chunks(&self) -> &[Bytes] {
        &self.chunks
    }

    /// The datagram that ended the dump.
    pub fn last(&self) -> Option<&Bytes> {
        self.chunks.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bytes> {
        self.chunks.iter()
    }

    /// Every netlink message across all datagrams, in order.
    ///
    /// A framing error in one datagram ends iteration of that datagram only.
    pub fn messages(&self) -> impl Iterator<Item = Result<(&NlMsgHdr, &[u8])>> {
        self.chunks.iter().flat_map(|chunk| MessageIter::new(chunk))
    }

    /// Concatenate all datagrams into one contiguous buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total);
        for chunk in &self.chunks {
            out.extend_from_slice(chunk);
        }
        out
    }
}

impl<'a> IntoIterator for &'a ResponseBuffer {
    type Item = &'a Bytes;
    type IntoIter = std::slice::Iter<'a, Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}
