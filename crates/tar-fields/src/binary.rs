//! Binary overflow fields (GNU "base-256").
//!
//! When a value does not fit in the octal digits of a field, the field holds
//! a big-endian binary number instead and the high bit of its first byte is
//! set to mark it. This is how sizes of 8 GiB and beyond fit in the 12-byte
//! size field, and large IDs in the 8-byte uid/gid fields.

use crate::error::{FieldError, Result};
use crate::EncodingMode;

/// High bit of the first byte, marking a binary field.
pub const MARKER: u8 = 0x80;

/// Largest value a binary field may decode to.
///
/// Values are limited to the positive range of a signed 64-bit integer, the
/// widest type readers of the format are expected to hold.
pub const MAX_VALUE: u64 = i64::MAX as u64;

/// Whether `value` can be encoded in a binary field of `width` bytes.
#[must_use]
pub fn fits(value: u64, width: usize) -> bool {
    if width == 0 || value > MAX_VALUE {
        return false;
    }
    // one bit of the first byte is taken by the marker
    match width.saturating_mul(8) - 1 {
        bits if bits >= 63 => true,
        bits => value >> bits == 0,
    }
}

/// Decode a binary field.
///
/// The first byte contributes its low seven bits, every following byte all
/// eight, most significant first.
///
/// # Errors
///
/// - [`FieldError::NotBinary`] if the field is empty or its first byte lacks [`MARKER`].
/// - [`FieldError::ValueTooLarge`] if the value exceeds [`MAX_VALUE`].
pub fn decode(bytes: &[u8]) -> Result<u64> {
    let Some((&first, rest)) = bytes.split_first() else {
        return Err(FieldError::NotBinary { first: 0 });
    };
    if first & MARKER == 0 {
        return Err(FieldError::NotBinary { first });
    }

    let mut value = u64::from(first & !MARKER);
    for &byte in rest {
        if value > MAX_VALUE >> 8 {
            return Err(FieldError::ValueTooLarge { width: bytes.len() });
        }
        value = (value << 8) | u64::from(byte);
    }
    Ok(value)
}

/// Encode `value` as a binary field filling `dst`.
///
/// The value occupies the low-order bytes, the remaining bytes are zeroed and
/// [`MARKER`] is set on the first byte. `dst` is left untouched on error.
///
/// # Errors
///
/// Returns [`FieldError::Overflow`] if `value` does not fit, see [`fits`].
pub fn encode(value: u64, dst: &mut [u8]) -> Result<()> {
    if !fits(value, dst.len()) {
        return Err(FieldError::Overflow {
            value,
            width: dst.len(),
            mode: EncodingMode::BinaryOverflow,
        });
    }

    dst.fill(0);
    for (slot, byte) in dst.iter_mut().rev().zip(value.to_be_bytes().into_iter().rev()) {
        *slot = byte;
    }
    dst[0] |= MARKER;
    Ok(())
}
