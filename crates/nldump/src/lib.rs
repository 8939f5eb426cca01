//! Blocking rtnetlink dump client.
//!
//! This crate sends `RTM_GETLINK` / `RTM_GETADDR` dump requests to the
//! kernel over a `NETLINK_ROUTE` socket and collects the reply datagrams
//! as raw, undecoded byte chunks. Decoding the attributes inside those
//! chunks is left to the caller.
//!
//! # Features
//!
//! - `output` - text/JSON rendering of dump results
//! - `integration` - enables tests that talk to the running kernel
//!
//! # Example
//!
//! ```ignore
//! use nldump::netlink::{DumpClient, DumpKind};
//!
//! fn main() -> nldump::Result<()> {
//!     let mut client = DumpClient::open()?;
//!
//!     client.send_dump_request(DumpKind::Link, 1)?;
//!     let links = client.receive_all()?;
//!     println!("{} datagrams, {} bytes", links.len(), links.total_len());
//!
//!     client.send_dump_request(DumpKind::Address, 1)?;
//!     let addrs = client.receive_all()?;
//!     println!("{} datagrams, {} bytes", addrs.len(), addrs.total_len());
//!
//!     Ok(())
//! }
//! ```

pub mod netlink;

#[cfg(feature = "output")]
pub mod output;

// Re-export common types at crate root for convenience
pub use netlink::{ClientConfig, DumpClient, DumpKind, Error, ResponseBuffer, Result};
