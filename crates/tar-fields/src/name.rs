//! NUL padded string fields: names, link targets, user and group names.
//!
//! A name shorter than its field is followed by NUL bytes. Readers treat a
//! name that fills the whole field as unterminated, but this module always
//! writes at least one NUL so the output reads the same everywhere.

use std::borrow::Cow;

use log::debug;

/// The bytes of a name field up to the first NUL.
///
/// If no NUL is present the whole field is returned.
///
/// # Example
///
/// ```
/// use tar_fields::name::decode_bytes;
///
/// assert_eq!(decode_bytes(b"hello\0world"), b"hello");
/// assert_eq!(decode_bytes(b"no null here"), b"no null here");
/// assert_eq!(decode_bytes(b"\0empty"), b"");
/// ```
#[must_use]
pub fn decode_bytes(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(pos) => &bytes[..pos],
        None => bytes,
    }
}

/// Decode a name field as text.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
#[must_use]
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(decode_bytes(bytes))
}

/// Write `name` into `dst`, returning the number of name bytes written.
///
/// At most `dst.len() - 1` bytes are copied and the rest of `dst` is filled
/// with NUL. Longer names are cut at the byte level, which may split a
/// multi-byte character. An empty `dst` is left as is.
pub fn encode(name: impl AsRef<[u8]>, dst: &mut [u8]) -> usize {
    let name = name.as_ref();
    let written = name.len().min(dst.len().saturating_sub(1));
    if written < name.len() {
        debug!(
            "truncating {}-byte name to {written} bytes to fit a {}-byte field",
            name.len(),
            dst.len()
        );
    }

    let (head, tail) = dst.split_at_mut(written);
    head.copy_from_slice(&name[..written]);
    tail.fill(0);
    written
}
