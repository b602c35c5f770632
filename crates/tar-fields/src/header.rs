//! An owned or borrowed 512-byte header block with typed field access.

use std::borrow::Cow;
use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::{FieldError, Result};
use crate::layout::{CHECKSUM, MAGIC, MODE, NAME, SIZE, VERSION};
use crate::{boolean, checksum, name, EncodingMode, Field, FieldCodec, Options, HEADER_SIZE};

/// Magic string for UStar format headers ("ustar\0").
pub const USTAR_MAGIC: &[u8; 6] = b"ustar\0";

/// Version field for UStar format headers ("00").
pub const USTAR_VERSION: &[u8; 2] = b"00";

/// Magic string for GNU tar format headers ("ustar ").
pub const GNU_MAGIC: &[u8; 6] = b"ustar ";

/// Version field for GNU tar format headers (" \0").
pub const GNU_VERSION: &[u8; 2] = b" \0";

/// A tar header block.
///
/// Fields are addressed with the [`Field`] constants of [`layout`](crate::layout)
/// and read or written through the codec for their kind. The block can be
/// borrowed in place from any buffer holding at least [`HEADER_SIZE`] bytes.
///
/// # Example
///
/// ```
/// use tar_fields::layout::{NAME, SIZE};
/// use tar_fields::{HeaderBuffer, Options};
///
/// let mut header = HeaderBuffer::new_ustar();
/// header.set_name(NAME, "hello.txt").unwrap();
/// header.set_number(SIZE, 1024, &Options::default()).unwrap();
/// header.seal().unwrap();
///
/// let parsed = HeaderBuffer::from_bytes(header.as_bytes()).unwrap();
/// parsed.verify_checksum().unwrap();
/// assert_eq!(parsed.name(NAME).unwrap(), "hello.txt");
/// assert_eq!(parsed.number(SIZE, &Options::default()).unwrap(), 1024);
/// ```
#[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct HeaderBuffer {
    bytes: [u8; HEADER_SIZE],
}

impl HeaderBuffer {
    /// Create an all-zero header block.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: [0u8; HEADER_SIZE],
        }
    }

    /// Create a header block with UStar magic and version.
    #[must_use]
    pub fn new_ustar() -> Self {
        let mut header = Self::new();
        header.bytes[MAGIC.range()].copy_from_slice(USTAR_MAGIC);
        header.bytes[VERSION.range()].copy_from_slice(USTAR_VERSION);
        header
    }

    /// Create a header block with GNU magic and version.
    #[must_use]
    pub fn new_gnu() -> Self {
        let mut header = Self::new();
        header.bytes[MAGIC.range()].copy_from_slice(GNU_MAGIC);
        header.bytes[VERSION.range()].copy_from_slice(GNU_VERSION);
        header
    }

    /// Borrow the first [`HEADER_SIZE`] bytes of `bytes` as a header.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InsufficientData`] if the slice is too short.
    pub fn from_bytes(bytes: &[u8]) -> Result<&HeaderBuffer> {
        let block = bytes
            .get(..HEADER_SIZE)
            .ok_or(FieldError::InsufficientData(bytes.len()))?;
        HeaderBuffer::ref_from_bytes(block).map_err(|_| FieldError::InsufficientData(bytes.len()))
    }

    /// Mutably borrow the first [`HEADER_SIZE`] bytes of `bytes` as a header.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InsufficientData`] if the slice is too short.
    pub fn from_bytes_mut(bytes: &mut [u8]) -> Result<&mut HeaderBuffer> {
        let len = bytes.len();
        let block = bytes
            .get_mut(..HEADER_SIZE)
            .ok_or(FieldError::InsufficientData(len))?;
        HeaderBuffer::mut_from_bytes(block).map_err(|_| FieldError::InsufficientData(len))
    }

    /// The raw header bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.bytes
    }

    /// The raw header bytes, mutably.
    pub fn as_mut_bytes(&mut self) -> &mut [u8; HEADER_SIZE] {
        &mut self.bytes
    }

    /// The bytes of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::OutOfBounds`] for a field reaching past the block.
    pub fn field(&self, field: Field) -> Result<&[u8]> {
        field.slice(&self.bytes)
    }

    /// The bytes of `field`, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::OutOfBounds`] for a field reaching past the block.
    pub fn field_mut(&mut self, field: Field) -> Result<&mut [u8]> {
        field.slice_mut(&mut self.bytes)
    }

    /// Read a numeric field in whichever encoding it holds.
    ///
    /// # Errors
    ///
    /// See [`FieldCodec::parse_number`].
    pub fn number(&self, field: Field, options: &Options) -> Result<u64> {
        FieldCodec::new(options.clone()).parse_number(self.field(field)?)
    }

    /// Write a numeric field, returning the encoding used.
    ///
    /// # Errors
    ///
    /// See [`FieldCodec::format_number`].
    pub fn set_number(&mut self, field: Field, value: u64, options: &Options) -> Result<EncodingMode> {
        FieldCodec::new(options.clone()).format_number(value, self.field_mut(field)?)
    }

    /// Read a string field as text, see [`name::decode`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::OutOfBounds`] for a field reaching past the block.
    pub fn name(&self, field: Field) -> Result<Cow<'_, str>> {
        Ok(name::decode(self.field(field)?))
    }

    /// Read the raw bytes of a string field, see [`name::decode_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::OutOfBounds`] for a field reaching past the block.
    pub fn name_bytes(&self, field: Field) -> Result<&[u8]> {
        Ok(name::decode_bytes(self.field(field)?))
    }

    /// Write a string field, returning the number of bytes kept.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::OutOfBounds`] for a field reaching past the block.
    pub fn set_name(&mut self, field: Field, value: impl AsRef<[u8]>) -> Result<usize> {
        Ok(name::encode(value, self.field_mut(field)?))
    }

    /// Read a flag field. An empty field reads as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::OutOfBounds`] for a field reaching past the block.
    pub fn flag(&self, field: Field) -> Result<bool> {
        Ok(self.field(field)?.first().is_some_and(|&b| boolean::decode(b)))
    }

    /// Write a flag field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::OutOfBounds`] for a field reaching past the block.
    pub fn set_flag(&mut self, field: Field, value: bool) -> Result<()> {
        if let Some(byte) = self.field_mut(field)?.first_mut() {
            *byte = boolean::encode(value);
        }
        Ok(())
    }

    /// Compute the checksum of the block as it currently stands.
    #[must_use]
    pub fn compute_checksum(&self) -> u64 {
        checksum::compute(&self.bytes, CHECKSUM)
    }

    /// The checksum value stored in the block.
    ///
    /// # Errors
    ///
    /// See [`checksum::parse`].
    pub fn stored_checksum(&self) -> Result<u64> {
        checksum::parse(self.field(CHECKSUM)?)
    }

    /// Compute and store the checksum. Call this after every other field is set.
    ///
    /// # Errors
    ///
    /// See [`checksum::seal`].
    pub fn seal(&mut self) -> Result<u64> {
        checksum::seal(&mut self.bytes, CHECKSUM)
    }

    /// Verify the stored checksum.
    ///
    /// # Errors
    ///
    /// See [`checksum::verify`].
    pub fn verify_checksum(&self) -> Result<()> {
        checksum::verify(&self.bytes, CHECKSUM)
    }

    /// Check if this header uses UStar format.
    #[must_use]
    pub fn is_ustar(&self) -> bool {
        self.bytes[MAGIC.range()] == *USTAR_MAGIC && self.bytes[VERSION.range()] == *USTAR_VERSION
    }

    /// Check if this header uses GNU tar format.
    #[must_use]
    pub fn is_gnu(&self) -> bool {
        self.bytes[MAGIC.range()] == *GNU_MAGIC && self.bytes[VERSION.range()] == *GNU_VERSION
    }
}

impl Default for HeaderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HeaderBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = Options::permissive();
        f.debug_struct("HeaderBuffer")
            .field("name", &self.name(NAME).ok())
            .field("size", &self.number(SIZE, &options).ok())
            .field(
                "mode",
                &self.number(MODE, &options).ok().map(|m| format!("{m:04o}")),
            )
            .field("is_ustar", &self.is_ustar())
            .field("is_gnu", &self.is_gnu())
            .finish_non_exhaustive()
    }
}
