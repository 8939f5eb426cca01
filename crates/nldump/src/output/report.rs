//! Printable summary of one dump.

use std::io::{self, Write};

use serde::Serialize;

use super::formatting::{hex_block, serialize_hex};
use super::{OutputOptions, Printable};
use crate::netlink::{DumpKind, ResponseBuffer};

/// One received datagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkReport {
    pub len: usize,
    /// Serialized as a lowercase hex string.
    #[serde(serialize_with = "serialize_hex")]
    pub data: Vec<u8>,
}

/// Everything received for one dump request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpReport {
    pub kind: DumpKind,
    pub seq: u32,
    pub chunks: Vec<ChunkReport>,
    pub total_bytes: usize,
}

impl DumpReport {
    pub fn new(kind: DumpKind, seq: u32, response: &ResponseBuffer) -> Self {
        let chunks = response
            .iter()
            .map(|chunk| ChunkReport {
                len: chunk.len(),
                data: chunk.to_vec(),
            })
            .collect();

        Self {
            kind,
            seq,
            chunks,
            total_bytes: response.total_len(),
        }
    }
}

impl Printable for DumpReport {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> io::Result<()> {
        writeln!(w, "Received {} packets in u8 format:", self.kind)?;
        for chunk in &self.chunks {
            writeln!(w, "{}", hex_block(&chunk.data, opts.wrap))?;
        }
        writeln!(w)?;
        writeln!(w, "Received {} len {}", self.kind, self.total_bytes)?;
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "kind": self.kind,
            "seq": self.seq,
            "chunks": self.chunks,
            "total_bytes": self.total_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::output::{OutputFormat, print_all};

    fn report() -> DumpReport {
        DumpReport {
            kind: DumpKind::Address,
            seq: 1,
            chunks: vec![
                ChunkReport {
                    len: 2,
                    data: vec![0x01, 0xff],
                },
                ChunkReport {
                    len: 1,
                    data: vec![0x14],
                },
            ],
            total_bytes: 3,
        }
    }

    #[test]
    fn test_text_matches_listing() {
        let mut out = Vec::new();
        report()
            .print_text(&mut out, &OutputOptions::default())
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Received GETADDR packets in u8 format:\n\
             [0x01, 0xff, ]\n\
             [0x14, ]\n\
             \n\
             Received GETADDR len 3\n"
        );
    }

    #[test]
    fn test_json_array() {
        let mut out = Vec::new();
        print_all(
            &mut out,
            &[report()],
            OutputFormat::Json,
            &OutputOptions::default(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["kind"], "address");
        assert_eq!(value[0]["total_bytes"], 3);
        assert_eq!(value[0]["chunks"][0]["len"], 2);
        assert_eq!(value[0]["chunks"][0]["data"], "01ff");
        assert_eq!(value[0]["chunks"][1]["data"], "14");
    }

    #[test]
    fn test_from_response() {
        let mut response = ResponseBuffer::new();
        response.push(Bytes::from_static(&[0u8; 64]));
        response.push(Bytes::from_static(&[0u8; 20]));

        let report = DumpReport::new(DumpKind::Link, 7, &response);
        assert_eq!(report.chunks.len(), 2);
        assert_eq!(report.chunks[1].len, 20);
        assert_eq!(report.total_bytes, 84);
    }
}
