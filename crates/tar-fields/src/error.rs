//! Error types for field encoding and decoding.

use thiserror::Error;

use crate::{EncodingMode, Field, HEADER_SIZE};

/// Errors that can occur when reading or writing header fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A byte other than `'0'..='7'`, space or NUL was found in an octal field.
    #[error("invalid octal digit {byte:#04x} at position {position}")]
    InvalidDigit {
        /// The offending byte.
        byte: u8,
        /// Its index within the field.
        position: usize,
    },

    /// Strict octal parsing found digits running to the end of the field.
    #[error("octal field of {len} bytes has no trailing space or NUL")]
    MissingTerminator {
        /// Width of the field.
        len: usize,
    },

    /// A value does not fit in the field under the requested encoding.
    #[error("value {value} does not fit in a {width}-byte {mode} field")]
    Overflow {
        /// The value that was being written.
        value: u64,
        /// Width of the field.
        width: usize,
        /// The encoding that was attempted last.
        mode: EncodingMode,
    },

    /// A field decodes to a value beyond what the host numeric type holds.
    #[error("{width}-byte field holds a value too large to represent")]
    ValueTooLarge {
        /// Width of the field.
        width: usize,
    },

    /// The field is too narrow to hold any value in the requested layout.
    #[error("field of {len} bytes is too short, at least {min} are required")]
    FieldTooShort {
        /// Width of the field.
        len: usize,
        /// Minimum width for the layout.
        min: usize,
    },

    /// Binary decoding was requested on a field without the binary marker bit.
    #[error("field is not binary encoded (first byte {first:#04x})")]
    NotBinary {
        /// First byte of the field, or 0 for an empty field.
        first: u8,
    },

    /// A field range reaches past the end of the buffer it was applied to.
    #[error("field at {}..{} lies outside a buffer of {len} bytes", .field.offset, .field.end())]
    OutOfBounds {
        /// The field that was requested.
        field: Field,
        /// Length of the buffer.
        len: usize,
    },

    /// The stored header checksum does not match the computed value.
    #[error("checksum mismatch: expected {expected}, computed {computed}")]
    ChecksumMismatch {
        /// The checksum value stored in the header.
        expected: u64,
        /// The checksum computed from the header bytes.
        computed: u64,
    },

    /// The provided data is too short to contain a header.
    #[error("insufficient data: expected {HEADER_SIZE} bytes, got {0}")]
    InsufficientData(usize),
}

impl FieldError {
    /// Whether retrying with [`ParseMode::Lenient`](crate::ParseMode::Lenient) may succeed.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FieldError::MissingTerminator { .. })
    }
}

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;
