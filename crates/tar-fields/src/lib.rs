//! Byte-exact codec for the fixed-width fields of tar headers.
//!
//! A tar header is a 512-byte block of fixed-size fields. This crate converts
//! between those fields and integers, flags and strings, and computes the
//! header checksum. It does not read or write archives: callers hand it a
//! buffer and a [`Field`] and get a value back, or the reverse.
//!
//! # Field Encodings
//!
//! - **Numeric** fields hold zero-padded octal ASCII digits and a terminator
//!   ([`octal`]), or, for values too large for the digits, a big-endian binary
//!   number flagged by the high bit of the first byte ([`binary`]). The
//!   [`FieldCodec`] picks between the two.
//! - **Name** fields hold NUL padded bytes ([`name`]).
//! - **Flag** fields hold a single byte ([`boolean`]).
//! - The **checksum** is the sum of the block with its own field read as
//!   spaces ([`checksum`]).
//!
//! # Header Field Layout
//!
//! | Offset | Size | Field     | Kind      |
//! |--------|------|-----------|-----------|
//! | 0      | 100  | name      | name      |
//! | 100    | 8    | mode      | numeric   |
//! | 108    | 8    | uid       | numeric   |
//! | 116    | 8    | gid       | numeric   |
//! | 124    | 12   | size      | numeric   |
//! | 136    | 12   | mtime     | numeric   |
//! | 148    | 8    | checksum  | checksum  |
//! | 156    | 1    | typeflag  | raw byte  |
//! | 157    | 100  | linkname  | name      |
//! | 257    | 6    | magic     | raw bytes |
//! | 263    | 2    | version   | raw bytes |
//! | 265    | 32   | uname     | name      |
//! | 297    | 32   | gname     | name      |
//! | 329    | 8    | devmajor  | numeric   |
//! | 337    | 8    | devminor  | numeric   |
//! | 345    | 155  | prefix    | name      |
//!
//! GNU headers reuse the prefix area, among others for `atime` (345, 12),
//! `ctime` (357, 12), `isextended` (482, 1) and `realsize` (483, 12). See
//! [`layout`] for the full table.
//!
//! # Example
//!
//! ```
//! use tar_fields::layout::{MODE, SIZE};
//! use tar_fields::{format_number, parse_number, EncodingMode, HeaderBuffer};
//!
//! let mut header = HeaderBuffer::new_ustar();
//! format_number(0o644, header.field_mut(MODE).unwrap(), true).unwrap();
//! assert_eq!(header.field(MODE).unwrap(), b"0000644 ");
//!
//! // Sizes from 8 GiB on switch to binary
//! let mode = format_number(8 << 30, header.field_mut(SIZE).unwrap(), true).unwrap();
//! assert_eq!(mode, EncodingMode::BinaryOverflow);
//! assert_eq!(parse_number(header.field(SIZE).unwrap()).unwrap(), 8 << 30);
//!
//! header.seal().unwrap();
//! header.verify_checksum().unwrap();
//! ```

#![deny(missing_debug_implementations)]

pub mod binary;
pub mod boolean;
pub mod checksum;
mod codec;
mod error;
mod header;
pub mod layout;
pub mod name;
pub mod octal;
mod options;

pub use codec::{format_number, parse_number, EncodingMode, FieldCodec};
pub use error::{FieldError, Result};
pub use header::{HeaderBuffer, GNU_MAGIC, GNU_VERSION, USTAR_MAGIC, USTAR_VERSION};
pub use layout::{Field, Terminator};
pub use options::{Options, ParseMode};

/// Size of a tar header block in bytes.
pub const HEADER_SIZE: usize = 512;
