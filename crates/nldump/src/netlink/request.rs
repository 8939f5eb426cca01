//! Dump request frames.
//!
//! A dump request is a netlink header followed by a zeroed 4-byte
//! `rtgenmsg` (family plus padding), 20 bytes in total. A zero family asks
//! the kernel for every address family.

use std::fmt;

use zerocopy::{Immutable, IntoBytes};

use super::builder::MessageBuilder;
use super::message::{NLM_F_REQUEST, NLM_F_ROOT, NLMSG_HDRLEN, NlMsgType};

/// Flags carried by every dump request (`0x0101`).
///
/// The kernel starts a dump when either bit of `NLM_F_DUMP` is set, so the
/// root bit alone is enough.
pub const DUMP_FLAGS: u16 = NLM_F_REQUEST | NLM_F_ROOT;

/// Length of an encoded dump request.
pub const REQUEST_LEN: usize = NLMSG_HDRLEN + std::mem::size_of::<RtGenMsg>();

/// General rtnetlink request payload (mirrors struct rtgenmsg, padded).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoBytes, Immutable)]
pub struct RtGenMsg {
    /// Address family filter (AF_UNSPEC for all).
    pub rtgen_family: u8,
    _pad: [u8; 3],
}

impl RtGenMsg {
    pub fn new(family: u8) -> Self {
        Self {
            rtgen_family: family,
            _pad: [0; 3],
        }
    }
}

/// Which table to dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
#[cfg_attr(feature = "output", serde(rename_all = "lowercase"))]
pub enum DumpKind {
    /// Network interfaces (`RTM_GETLINK`).
    Link,
    /// Interface addresses (`RTM_GETADDR`).
    Address,
}

impl DumpKind {
    /// Both kinds, in the order a full dump walks them.
    pub const ALL: [DumpKind; 2] = [DumpKind::Link, DumpKind::Address];

    /// The rtnetlink message type requesting this dump.
    pub const fn msg_type(self) -> u16 {
        match self {
            DumpKind::Link => NlMsgType::RTM_GETLINK,
            DumpKind::Address => NlMsgType::RTM_GETADDR,
        }
    }

    /// Short protocol name, e.g. `GETLINK`.
    pub const fn name(self) -> &'static str {
        match self {
            DumpKind::Link => "GETLINK",
            DumpKind::Address => "GETADDR",
        }
    }
}

impl fmt::Display for DumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single dump request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpRequest {
    kind: DumpKind,
    seq: u32,
    pid: u32,
    family: u8,
}

impl DumpRequest {
    /// Create a request for every address family.
    pub fn new(kind: DumpKind, seq: u32, pid: u32) -> Self {
        Self {
            kind,
            seq,
            pid,
            family: 0,
        }
    }

    /// Restrict the dump to one address family (e.g. `libc::AF_INET`).
    pub fn with_family(mut self, family: u8) -> Self {
        self.family = family;
        self
    }

    pub fn kind(&self) -> DumpKind {
        self.kind
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn family(&self) -> u8 {
        self.family
    }

    /// Encode the wire frame.
    pub fn encode(&self) -> Vec<u8> {
        let mut builder = MessageBuilder::new(self.kind.msg_type(), DUMP_FLAGS);
        builder.append_bytes(RtGenMsg::new(self.family).as_bytes());
        builder.set_seq(self.seq);
        builder.set_pid(self.pid);
        builder.finish()
    }
}
