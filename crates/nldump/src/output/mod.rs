//! Text and JSON rendering of dump results.
//!
//! # Example
//!
//! ```ignore
//! use nldump::netlink::{DumpClient, DumpKind};
//! use nldump::output::{DumpReport, OutputFormat, OutputOptions, print_all};
//!
//! let mut client = DumpClient::open()?;
//! let links = client.dump(DumpKind::Link)?;
//!
//! let report = DumpReport::new(DumpKind::Link, 1, &links);
//! print_all(&mut std::io::stdout(), &[report], OutputFormat::Text, &OutputOptions::default())?;
//! ```

pub mod formatting;
mod report;

use std::io::{self, Write};

pub use formatting::{format_bytes, hex_block, hex_line};
pub use report::{ChunkReport, DumpReport};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bracketed hex listing, one datagram per line.
    #[default]
    Text,
    /// JSON document.
    Json,
}

/// Output options.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Pretty print JSON.
    pub pretty: bool,
    /// Bytes per hex line; 0 prints each datagram on one line.
    pub wrap: usize,
}

/// Something that can be printed in either output format.
pub trait Printable {
    /// Print in text format.
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> io::Result<()>;

    /// Convert to a JSON value.
    fn to_json(&self) -> serde_json::Value;
}

/// Print a list of items in the given format.
///
/// Text output prints each item in turn; JSON output prints one array.
pub fn print_all<W, P>(
    w: &mut W,
    items: &[P],
    format: OutputFormat,
    opts: &OutputOptions,
) -> io::Result<()>
where
    W: Write,
    P: Printable,
{
    match format {
        OutputFormat::Text => {
            for item in items {
                item.print_text(w, opts)?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::Value::Array(items.iter().map(Printable::to_json).collect());
            let text = if opts.pretty {
                serde_json::to_string_pretty(&json)
            } else {
                serde_json::to_string(&json)
            }
            .map_err(io::Error::other)?;
            writeln!(w, "{}", text)?;
        }
    }

    w.flush()
}
