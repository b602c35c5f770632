//! Octal text fields: the legacy numeric encoding of tar headers.
//!
//! A value is stored as zero-padded ASCII octal digits followed by one or two
//! terminator bytes. Writers disagree on padding and terminators, so parsing
//! accepts leading spaces or NULs and any mix of spaces and NULs after the
//! digits:
//!
//! - `"0000644\0"` -> 420
//! - `"     123 "` -> 83
//! - `"\0\0\0\0\0\0"` -> 0

use crate::error::{FieldError, Result};
use crate::{EncodingMode, ParseMode, Terminator};

/// Bytes that pad or terminate the digits of an octal field.
fn is_blank(byte: u8) -> bool {
    byte == b' ' || byte == b'\0'
}

/// Largest value that `digits` octal digits can hold.
///
/// Saturates at `u64::MAX` from 22 digits on.
#[must_use]
pub const fn capacity(digits: usize) -> u64 {
    if digits >= 22 {
        u64::MAX
    } else {
        (1u64 << (3 * digits)) - 1
    }
}

/// Parse an octal text field, requiring a terminator after the digits.
///
/// # Errors
///
/// See [`parse_with`].
pub fn parse(bytes: &[u8]) -> Result<u64> {
    parse_with(bytes, ParseMode::Strict)
}

/// Parse an octal text field, allowing the digits to fill the whole field.
///
/// # Errors
///
/// See [`parse_with`].
pub fn parse_lenient(bytes: &[u8]) -> Result<u64> {
    parse_with(bytes, ParseMode::Lenient)
}

/// Parse an octal text field.
///
/// Leading spaces and NULs are skipped, then digits are read up to the first
/// space or NUL. A field holding nothing but spaces and NULs is zero.
///
/// # Errors
///
/// - [`FieldError::InvalidDigit`] if the digits, or the bytes after them,
///   contain anything other than `'0'..='7'`, space or NUL.
/// - [`FieldError::MissingTerminator`] in strict mode if the digits run to the
///   end of the field.
/// - [`FieldError::FieldTooShort`] in strict mode for fields under 2 bytes.
/// - [`FieldError::ValueTooLarge`] if the value does not fit in a `u64`.
pub fn parse_with(bytes: &[u8], mode: ParseMode) -> Result<u64> {
    if mode == ParseMode::Strict && bytes.len() < 2 {
        return Err(FieldError::FieldTooShort {
            len: bytes.len(),
            min: 2,
        });
    }

    let Some(start) = bytes.iter().position(|&b| !is_blank(b)) else {
        return Ok(0);
    };
    let end = bytes[start..]
        .iter()
        .position(|&b| is_blank(b))
        .map_or(bytes.len(), |i| start + i);

    let mut value: u64 = 0;
    for (position, &byte) in bytes.iter().enumerate().take(end).skip(start) {
        if !(b'0'..=b'7').contains(&byte) {
            return Err(FieldError::InvalidDigit { byte, position });
        }
        value = value
            .checked_mul(8)
            .and_then(|v| v.checked_add(u64::from(byte - b'0')))
            .ok_or(FieldError::ValueTooLarge { width: bytes.len() })?;
    }

    if end == bytes.len() {
        if mode == ParseMode::Strict {
            return Err(FieldError::MissingTerminator { len: bytes.len() });
        }
    } else if let Some(i) = bytes[end..].iter().position(|&b| !is_blank(b)) {
        let position = end + i;
        return Err(FieldError::InvalidDigit {
            byte: bytes[position],
            position,
        });
    }

    Ok(value)
}

/// Write `value` as octal digits filling the whole of `dst`.
///
/// Digits are left-padded with `'0'` and no terminator is written. `dst` is
/// left untouched on error.
///
/// # Errors
///
/// Returns [`FieldError::Overflow`] if `value` needs more digits than `dst` holds.
pub fn format(value: u64, dst: &mut [u8]) -> Result<()> {
    if dst.is_empty() || value > capacity(dst.len()) {
        return Err(FieldError::Overflow {
            value,
            width: dst.len(),
            mode: EncodingMode::OctalText,
        });
    }

    let mut remaining = value;
    for slot in dst.iter_mut().rev() {
        *slot = b'0' + (remaining & 0o7) as u8;
        remaining >>= 3;
    }
    Ok(())
}

/// Write `value` as octal digits followed by `terminator`.
///
/// The digits take the first `dst.len() - terminator.width()` bytes. `dst` is
/// left untouched on error.
///
/// # Errors
///
/// - [`FieldError::FieldTooShort`] if `dst` cannot hold one digit plus the terminator.
/// - [`FieldError::Overflow`] if `value` needs more digits than remain.
pub fn format_terminated(value: u64, dst: &mut [u8], terminator: Terminator) -> Result<()> {
    let digits = terminator.digits(dst.len());
    if digits == 0 {
        return Err(FieldError::FieldTooShort {
            len: dst.len(),
            min: terminator.width() + 1,
        });
    }
    if value > capacity(digits) {
        return Err(FieldError::Overflow {
            value,
            width: dst.len(),
            mode: EncodingMode::OctalText,
        });
    }

    let (head, tail) = dst.split_at_mut(digits);
    format(value, head)?;
    tail.copy_from_slice(terminator.bytes());
    Ok(())
}
