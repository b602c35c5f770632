//! The header checksum.
//!
//! The checksum is the sum of every byte of the header block, computed as if
//! the checksum field itself held eight spaces. It is stored as six octal
//! digits followed by a NUL and a space.

use log::debug;

use crate::error::{FieldError, Result};
use crate::{octal, Field, Terminator};

const BLANK: u8 = b' ';

/// Unsigned sum of `buf`, counting every byte inside `field` as a space.
///
/// Parts of `field` beyond the end of `buf` are ignored.
///
/// # Example
///
/// ```
/// use tar_fields::{checksum, Field};
///
/// assert_eq!(checksum::compute(b"test", Field::new(0, 0)), 448);
/// assert_eq!(checksum::compute(b"test", Field::new(1, 2)), 116 + 32 + 32 + 116);
/// ```
#[must_use]
pub fn compute(buf: &[u8], field: Field) -> u64 {
    let blank = field.range();
    buf.iter()
        .enumerate()
        .map(|(i, &byte)| {
            if blank.contains(&i) {
                u64::from(BLANK)
            } else {
                u64::from(byte)
            }
        })
        .sum()
}

/// Write a checksum value into its field: digits, then NUL, then space.
///
/// # Errors
///
/// - [`FieldError::FieldTooShort`] if `dst` is under 3 bytes.
/// - [`FieldError::Overflow`] if `value` needs more than `dst.len() - 2` digits.
pub fn format(value: u64, dst: &mut [u8]) -> Result<()> {
    octal::format_terminated(value, dst, Terminator::NulSpace)
}

/// Read a stored checksum value.
///
/// Accepts the digits followed by any of NUL then space, a single space, or a
/// single NUL, and digits that fill the whole field.
///
/// # Errors
///
/// Returns [`FieldError::InvalidDigit`] or [`FieldError::ValueTooLarge`] as
/// [`octal::parse_lenient`] does.
pub fn parse(bytes: &[u8]) -> Result<u64> {
    octal::parse_lenient(bytes)
}

/// Compute the checksum of `buf` and store it in `field`.
///
/// Returns the stored value.
///
/// # Errors
///
/// - [`FieldError::OutOfBounds`] if `field` lies outside `buf`.
/// - Any error of [`format`].
pub fn seal(buf: &mut [u8], field: Field) -> Result<u64> {
    let value = compute(buf, field);
    format(value, field.slice_mut(buf)?)?;
    Ok(value)
}

/// Check the checksum stored in `field` against the contents of `buf`.
///
/// # Errors
///
/// - [`FieldError::ChecksumMismatch`] if the stored value differs from [`compute`].
/// - [`FieldError::OutOfBounds`] if `field` lies outside `buf`.
/// - Any error of [`parse`] if the stored value is unreadable.
pub fn verify(buf: &[u8], field: Field) -> Result<()> {
    let expected = parse(field.slice(buf)?)?;
    let computed = compute(buf, field);
    if expected == computed {
        return Ok(());
    }
    debug!("header checksum mismatch: stored {expected:o}, computed {computed:o}");
    Err(FieldError::ChecksumMismatch { expected, computed })
}
