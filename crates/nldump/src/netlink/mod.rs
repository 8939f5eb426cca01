//! Netlink dump plumbing for the kernel routing socket.
//!
//! # Quick Start
//!
//! ```ignore
//! use nldump::netlink::{ClientConfig, DumpClient, DumpKind, Termination};
//!
//! let config = ClientConfig::new().termination(Termination::Done);
//! let mut client = DumpClient::open_with(config)?;
//!
//! let links = client.dump(DumpKind::Link)?;
//! for msg in links.messages() {
//!     let (header, payload) = msg?;
//!     println!("type {} ({} payload bytes)", header.nlmsg_type, payload.len());
//! }
//! ```
//!
//! # Termination
//!
//! By default a dump ends at the first datagram that is exactly
//! [`SENTINEL_LEN`] bytes long, whatever its message type. This matches the
//! kernel's habit of sending `NLMSG_DONE` in a datagram of its own, but it is
//! a length heuristic and not a protocol guarantee. [`Termination::Done`]
//! walks every header instead and stops on a real `NLMSG_DONE`.

mod builder;
mod client;
mod config;
mod error;
#[cfg(test)]
mod fixtures;
pub mod message;
mod request;
mod response;
mod socket;

pub use builder::MessageBuilder;
pub use client::DumpClient;
pub use config::{ClientConfig, DEFAULT_RECV_CAPACITY, Termination};
pub use error::{Error, Result};
pub use message::{MessageIter, NLMSG_HDRLEN, NlMsgHdr, NlMsgType};
pub use request::{DUMP_FLAGS, DumpKind, DumpRequest, REQUEST_LEN, RtGenMsg};
pub use response::{ResponseBuffer, SENTINEL_LEN};
pub use socket::{BindMode, NetlinkSocket, Transport};
