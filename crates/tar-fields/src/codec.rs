//! Numeric field dispatch between octal text and binary overflow.
//!
//! Readers look at the first byte of a field to tell the two encodings apart.
//! Writers use octal text while the value fits the field's digits and switch
//! to binary overflow beyond that, if allowed.

use std::fmt;

use log::trace;

use crate::error::Result;
use crate::{binary, octal, Options, Terminator};

/// The encoding of a numeric field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodingMode {
    /// Zero-padded ASCII octal digits and a terminator.
    OctalText,
    /// Big-endian binary with the high bit of the first byte set.
    BinaryOverflow,
}

impl EncodingMode {
    /// The encoding a stored field uses, judged by its first byte.
    ///
    /// An empty field counts as octal text.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes.first() {
            Some(&first) if first & binary::MARKER != 0 => EncodingMode::BinaryOverflow,
            _ => EncodingMode::OctalText,
        }
    }

    /// The encoding a writer should pick for `value` in a `width`-byte field.
    ///
    /// Octal text is preferred. Returns `None` if the value fits neither.
    #[must_use]
    pub fn for_value(value: u64, width: usize, terminator: Terminator) -> Option<Self> {
        let digits = terminator.digits(width);
        if digits > 0 && value <= octal::capacity(digits) {
            Some(EncodingMode::OctalText)
        } else if binary::fits(value, width) {
            Some(EncodingMode::BinaryOverflow)
        } else {
            None
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EncodingMode::OctalText => "octal",
            EncodingMode::BinaryOverflow => "binary",
        })
    }
}

/// Reads and writes numeric fields under a fixed set of [`Options`].
///
/// # Example
///
/// ```
/// use tar_fields::{EncodingMode, FieldCodec, Options};
///
/// let codec = FieldCodec::new(Options::default());
/// let mut size = [0u8; 12];
///
/// assert_eq!(codec.format_number(1024, &mut size).unwrap(), EncodingMode::OctalText);
/// assert_eq!(&size, b"00000002000 ");
///
/// // 8 GiB needs more than 11 octal digits
/// assert_eq!(codec.format_number(8 << 30, &mut size).unwrap(), EncodingMode::BinaryOverflow);
/// assert_eq!(codec.parse_number(&size).unwrap(), 8 << 30);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCodec {
    options: Options,
}

impl FieldCodec {
    /// Create a codec with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// The options this codec applies.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse a numeric field in whichever encoding it holds.
    ///
    /// # Errors
    ///
    /// Any error of [`octal::parse_with`] or [`binary::decode`].
    pub fn parse_number(&self, bytes: &[u8]) -> Result<u64> {
        match EncodingMode::detect(bytes) {
            EncodingMode::OctalText => octal::parse_with(bytes, self.options.parse_mode),
            EncodingMode::BinaryOverflow => binary::decode(bytes),
        }
    }

    /// Write `value` into the numeric field `dst`, returning the encoding used.
    ///
    /// Octal text with the configured terminator is written when the value
    /// fits the digits. Otherwise, with [`Options::binary_fallback`] set, the
    /// value is written in binary over the whole field. `dst` is left
    /// untouched on error.
    ///
    /// # Errors
    ///
    /// - [`FieldError::Overflow`](crate::FieldError::Overflow) if the value
    ///   fits no permitted encoding. Its mode is the encoding tried last.
    /// - [`FieldError::FieldTooShort`](crate::FieldError::FieldTooShort) if
    ///   `dst` cannot hold a single digit and fallback is off.
    pub fn format_number(&self, value: u64, dst: &mut [u8]) -> Result<EncodingMode> {
        let terminator = self.options.terminator;
        let mode = EncodingMode::for_value(value, dst.len(), terminator);
        if mode != Some(EncodingMode::OctalText) && self.options.binary_fallback {
            trace!(
                "{value} exceeds {} octal digits, writing a {}-byte binary field",
                terminator.digits(dst.len()),
                dst.len()
            );
            binary::encode(value, dst)?;
            return Ok(EncodingMode::BinaryOverflow);
        }

        octal::format_terminated(value, dst, terminator)?;
        Ok(EncodingMode::OctalText)
    }
}

/// Parse a numeric field with the default [`Options`].
///
/// # Errors
///
/// See [`FieldCodec::parse_number`].
pub fn parse_number(bytes: &[u8]) -> Result<u64> {
    FieldCodec::default().parse_number(bytes)
}

/// Write a numeric field with the default [`Options`], choosing whether
/// values too large for octal may fall back to binary.
///
/// # Errors
///
/// See [`FieldCodec::format_number`].
pub fn format_number(value: u64, dst: &mut [u8], allow_binary_fallback: bool) -> Result<EncodingMode> {
    let options = Options {
        binary_fallback: allow_binary_fallback,
        ..Options::default()
    };
    FieldCodec::new(options).format_number(value, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldError, ParseMode};
    use proptest::prelude::*;

    #[test]
    fn test_detect() {
        assert_eq!(EncodingMode::detect(b"0000644\0"), EncodingMode::OctalText);
        assert_eq!(EncodingMode::detect(&[0x80, 0, 0, 1]), EncodingMode::BinaryOverflow);
        assert_eq!(EncodingMode::detect(&[0xFF]), EncodingMode::BinaryOverflow);
        assert_eq!(EncodingMode::detect(&[]), EncodingMode::OctalText);
        assert_eq!(EncodingMode::detect(&[0; 8]), EncodingMode::OctalText);
    }

    #[test]
    fn test_for_value() {
        let space = Terminator::Space;
        assert_eq!(EncodingMode::for_value(0o7777777, 8, space), Some(EncodingMode::OctalText));
        assert_eq!(
            EncodingMode::for_value(0o10000000, 8, space),
            Some(EncodingMode::BinaryOverflow)
        );
        assert_eq!(
            EncodingMode::for_value(0o7777777, 8, Terminator::SpaceNul),
            Some(EncodingMode::BinaryOverflow)
        );
        assert_eq!(EncodingMode::for_value(u64::MAX, 12, space), None);
        assert_eq!(EncodingMode::for_value(1, 1, space), Some(EncodingMode::BinaryOverflow));
    }

    #[test]
    fn test_display() {
        assert_eq!(EncodingMode::OctalText.to_string(), "octal");
        assert_eq!(EncodingMode::BinaryOverflow.to_string(), "binary");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(b"0000644\0").unwrap(), 0o644);
        assert_eq!(parse_number(b"\0\0\0\0\0\0\0\0").unwrap(), 0);
        assert_eq!(parse_number(&[0x80, 0, 0, 0, 0, 0, 0x10, 0]).unwrap(), 0x1000);
        assert_eq!(
            parse_number(b"0000644"),
            Err(FieldError::MissingTerminator { len: 7 })
        );

        let lenient = FieldCodec::new(Options::permissive());
        assert_eq!(lenient.parse_number(b"0000644").unwrap(), 0o644);
        assert_eq!(lenient.options().parse_mode, ParseMode::Lenient);
    }

    #[test]
    fn test_format_number_octal() {
        let mut buf = [0u8; 8];
        assert_eq!(format_number(0o644, &mut buf, true).unwrap(), EncodingMode::OctalText);
        assert_eq!(&buf, b"0000644 ");

        let gnu = FieldCodec::new(Options {
            terminator: Terminator::Nul,
            ..Options::default()
        });
        assert_eq!(gnu.format_number(0o644, &mut buf).unwrap(), EncodingMode::OctalText);
        assert_eq!(&buf, b"0000644\0");
    }

    #[test]
    fn test_format_number_fallback() {
        let mut buf = [0u8; 8];
        let value = 0o10000000;
        assert_eq!(
            format_number(value, &mut buf, true).unwrap(),
            EncodingMode::BinaryOverflow
        );
        assert_ne!(buf[0] & 0x80, 0);
        assert_eq!(parse_number(&buf).unwrap(), value);
    }

    #[test]
    fn test_format_number_no_fallback() {
        let mut buf = [b'x'; 8];
        assert_eq!(
            format_number(0o10000000, &mut buf, false),
            Err(FieldError::Overflow {
                value: 0o10000000,
                width: 8,
                mode: EncodingMode::OctalText
            })
        );
        assert_eq!(&buf, b"xxxxxxxx");

        let legacy = FieldCodec::new(Options::legacy());
        assert!(legacy.format_number(8 << 30, &mut [0u8; 12]).is_err());
    }

    #[test]
    fn test_format_number_too_large() {
        let mut buf = [0u8; 8];
        assert_eq!(
            format_number(u64::MAX, &mut buf, true),
            Err(FieldError::Overflow {
                value: u64::MAX,
                width: 8,
                mode: EncodingMode::BinaryOverflow
            })
        );
        assert_eq!(
            format_number(0, &mut [0u8; 1], false),
            Err(FieldError::FieldTooShort { len: 1, min: 2 })
        );
    }

    proptest! {
        #[test]
        fn test_roundtrip_any_mode(value in 0..=binary::MAX_VALUE, len in 8usize..=16) {
            let mut buf = vec![0u8; len];
            let mode = format_number(value, &mut buf, true).unwrap();
            prop_assert_eq!(EncodingMode::detect(&buf), mode);
            prop_assert_eq!(parse_number(&buf).unwrap(), value);
        }
    }
}
