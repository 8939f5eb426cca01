//! Byte formatting helpers.
//!
//! # Example
//!
//! ```
//! use nldump::output::formatting::{format_bytes, hex_line};
//!
//! assert_eq!(hex_line(&[0x14, 0x00]), "[0x14, 0x00, ]");
//! assert_eq!(format_bytes(84), "84 B");
//! ```

use std::fmt::Write;

/// Format a datagram as a bracketed list of hex bytes.
///
/// Every byte is followed by `", "`, including the last one.
///
/// ```
/// use nldump::output::formatting::hex_line;
///
/// assert_eq!(hex_line(&[]), "[]");
/// assert_eq!(hex_line(&[0xab]), "[0xab, ]");
/// ```
pub fn hex_line(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 6 + 2);
    out.push('[');
    push_hex(&mut out, bytes);
    out.push(']');
    out
}

/// Like [`hex_line`] but breaks the list every `width` bytes.
///
/// A `width` of 0 is the same as [`hex_line`].
pub fn hex_block(bytes: &[u8], width: usize) -> String {
    if width == 0 || bytes.len() <= width {
        return hex_line(bytes);
    }

    let mut out = String::with_capacity(bytes.len() * 6 + bytes.len() / width + 2);
    out.push('[');
    for (i, row) in bytes.chunks(width).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        push_hex(&mut out, row);
    }
    out.push(']');
    out
}

fn push_hex(out: &mut String, bytes: &[u8]) {
    for b in bytes {
        // Writing to a String cannot fail.
        let _ = write!(out, "0x{:02x}, ", b);
    }
}

/// Format bytes as one continuous lowercase hex string, two digits per byte.
///
/// ```
/// use nldump::output::formatting::hex_string;
///
/// assert_eq!(hex_string(&[0x01, 0xff]), "01ff");
/// ```
pub fn hex_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

/// Serialize a byte slice as [`hex_string`].
pub(crate) fn serialize_hex<S: serde::Serializer>(
    bytes: &[u8],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex_string(bytes))
}

/// Format a byte count in human-readable format (KiB, MiB).
///
/// Uses binary units (1 KiB = 1024 bytes).
///
/// ```
/// use nldump::output::formatting::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(4096), "4.00 KiB");
/// assert_eq!(format_bytes(3 * 1_048_576 / 2), "1.50 MiB");
/// ```
pub fn format_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    let bytes_f = bytes as f64;

    if bytes_f >= MIB {
        format!("{:.2} MiB", bytes_f / MIB)
    } else if bytes_f >= KIB {
        format!("{:.2} KiB", bytes_f / KIB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_line() {
        assert_eq!(
            hex_line(&[0x14, 0, 0, 0, 0x12]),
            "[0x14, 0x00, 0x00, 0x00, 0x12, ]"
        );
    }

    #[test]
    fn test_hex_block_wraps() {
        let bytes: Vec<u8> = (0..5).collect();
        assert_eq!(
            hex_block(&bytes, 2),
            "[0x00, 0x01, \n0x02, 0x03, \n0x04, ]"
        );
        assert_eq!(hex_block(&bytes, 0), hex_line(&bytes));
        assert_eq!(hex_block(&bytes, 16), hex_line(&bytes));
    }

    #[test]
    fn test_hex_string() {
        assert_eq!(hex_string(&[]), "");
        assert_eq!(hex_string(&[0x14, 0x00, 0x0a, 0xff]), "14000aff");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(84), "84 B");
        assert_eq!(format_bytes(1024), "1.00 KiB");
        assert_eq!(format_bytes(1_048_576), "1.00 MiB");
    }
}
