//! Fixed-width field encoding helpers.
//!
//! Record files are flat arrays of fixed-size records with no header and no
//! padding between fields. These helpers encode the three field kinds used
//! by FerryDB record layouts:
//!
//! - identifier fields: fixed-width ASCII, NUL-terminated and NUL-padded
//! - numeric fields: IEEE-754 binary64, little-endian
//! - flag fields: a single byte, `0` = false, nonzero = true

/// Writes `value` into a fixed-width identifier field.
///
/// The field is zero-filled first, then the string bytes are copied in.
/// If `value` is longer than `buf.len() - 1` it is cut off so that the
/// field always ends with at least one NUL byte. Callers validate
/// identifier lengths before records reach this layer.
pub fn write_str(buf: &mut [u8], value: &str) {
    buf.fill(0);
    let max = buf.len().saturating_sub(1);
    let bytes = value.as_bytes();
    let n = bytes.len().min(max);
    buf[..n].copy_from_slice(&bytes[..n]);
}

/// Reads a fixed-width identifier field up to its first NUL byte.
///
/// Non-UTF-8 bytes are replaced rather than failing; identifier fields are
/// validated as ASCII on the way in, so replacement only occurs when a file
/// was written by something else.
#[must_use]
pub fn read_str(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

/// Writes an `f64` as 8 little-endian bytes.
pub fn write_f64(buf: &mut [u8], value: f64) {
    buf[..8].copy_from_slice(&value.to_le_bytes());
}

/// Reads an `f64` from 8 little-endian bytes.
#[must_use]
pub fn read_f64(buf: &[u8]) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[..8]);
    f64::from_le_bytes(bytes)
}

/// Writes a boolean as a single byte.
pub fn write_bool(buf: &mut [u8], value: bool) {
    buf[0] = u8::from(value);
}

/// Reads a boolean from a single byte.
#[must_use]
pub fn read_bool(buf: &[u8]) -> bool {
    buf[0] != 0
}
