//! Field positions within a tar header block.
//!
//! Every field is a constant `(offset, length)` pair. The codec never infers
//! offsets: callers pick a [`Field`] and hand the resulting slice to the
//! encoder or decoder for that field's kind.

use std::ops::Range;

use crate::error::{FieldError, Result};

/// A fixed `(offset, length)` byte range within a header buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    /// Byte offset of the first byte of the field.
    pub offset: usize,
    /// Width of the field in bytes.
    pub len: usize,
}

impl Field {
    /// Create a field descriptor.
    #[must_use]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// One past the last byte of the field, saturating at `usize::MAX`.
    #[must_use]
    pub const fn end(self) -> usize {
        self.offset.saturating_add(self.len)
    }

    /// The field as a range of buffer indices.
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.offset..self.end()
    }

    /// The exact range of the field, or `None` if it does not fit in `usize`.
    fn checked_range(self) -> Option<Range<usize>> {
        Some(self.offset..self.offset.checked_add(self.len)?)
    }

    /// Borrow this field out of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::OutOfBounds`] if the field reaches past the end of `buf`.
    pub fn slice(self, buf: &[u8]) -> Result<&[u8]> {
        let range = self.checked_range();
        range.and_then(|r| buf.get(r)).ok_or(FieldError::OutOfBounds {
            field: self,
            len: buf.len(),
        })
    }

    /// Mutably borrow this field out of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::OutOfBounds`] if the field reaches past the end of `buf`.
    pub fn slice_mut(self, buf: &mut [u8]) -> Result<&mut [u8]> {
        let len = buf.len();
        self.checked_range()
            .and_then(|r| buf.get_mut(r))
            .ok_or(FieldError::OutOfBounds { field: self, len })
    }
}

/// Trailing bytes reserved at the end of an octal text field.
///
/// The number and order of terminator bytes is a property of the field kind,
/// not of the value: ordinary numeric fields written by POSIX tools end in a
/// single space, GNU tar ends them in a NUL, and the checksum field always
/// ends in NUL then space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// Digits followed by one space.
    #[default]
    Space,
    /// Digits followed by one NUL.
    Nul,
    /// Digits followed by a space and a NUL.
    SpaceNul,
    /// Digits followed by a NUL and a space (the checksum layout).
    NulSpace,
}

impl Terminator {
    /// The terminator bytes, in field order.
    #[must_use]
    pub const fn bytes(self) -> &'static [u8] {
        match self {
            Terminator::Space => b" ",
            Terminator::Nul => b"\0",
            Terminator::SpaceNul => b" \0",
            Terminator::NulSpace => b"\0 ",
        }
    }

    /// Number of bytes the terminator takes from the end of the field.
    #[must_use]
    pub const fn width(self) -> usize {
        self.bytes().len()
    }

    /// Number of digits a field of `width` bytes can carry with this terminator.
    #[must_use]
    pub const fn digits(self, width: usize) -> usize {
        width.saturating_sub(self.width())
    }
}

// ============================================================================
// POSIX ustar fields
// ============================================================================

/// File path name, NUL terminated when shorter than the field.
pub const NAME: Field = Field::new(0, 100);
/// File mode.
pub const MODE: Field = Field::new(100, 8);
/// Owner user ID.
pub const UID: Field = Field::new(108, 8);
/// Owner group ID.
pub const GID: Field = Field::new(116, 8);
/// Entry size in bytes.
pub const SIZE: Field = Field::new(124, 12);
/// Modification time, seconds since the Unix epoch.
pub const MTIME: Field = Field::new(136, 12);
/// Header checksum.
pub const CHECKSUM: Field = Field::new(148, 8);
/// Entry type flag.
pub const TYPEFLAG: Field = Field::new(156, 1);
/// Link target for hard and symbolic links.
pub const LINKNAME: Field = Field::new(157, 100);
/// Format magic.
pub const MAGIC: Field = Field::new(257, 6);
/// Format version.
pub const VERSION: Field = Field::new(263, 2);
/// Owner user name.
pub const UNAME: Field = Field::new(265, 32);
/// Owner group name.
pub const GNAME: Field = Field::new(297, 32);
/// Device major number.
pub const DEVMAJOR: Field = Field::new(329, 8);
/// Device minor number.
pub const DEVMINOR: Field = Field::new(337, 8);
/// Path prefix for names longer than [`NAME`].
pub const PREFIX: Field = Field::new(345, 155);

// ============================================================================
// GNU fields (overlap PREFIX)
// ============================================================================

/// Access time.
pub const GNU_ATIME: Field = Field::new(345, 12);
/// Change time.
pub const GNU_CTIME: Field = Field::new(357, 12);
/// Set when extended sparse headers follow.
pub const GNU_IS_EXTENDED: Field = Field::new(482, 1);
/// Real size of a sparse file.
pub const GNU_REAL_SIZE: Field = Field::new(483, 12);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HEADER_SIZE;

    #[test]
    fn test_ustar_fields_are_contiguous() {
        let fields = [
            NAME, MODE, UID, GID, SIZE, MTIME, CHECKSUM, TYPEFLAG, LINKNAME, MAGIC, VERSION,
            UNAME, GNAME, DEVMAJOR, DEVMINOR, PREFIX,
        ];
        let mut offset = 0;
        for field in fields {
            assert_eq!(field.offset, offset, "{field:?}");
            offset = field.end();
        }
        // 12 bytes of padding complete the block
        assert_eq!(offset + 12, HEADER_SIZE);
    }

    #[test]
    fn test_gnu_fields_in_bounds() {
        for field in [GNU_ATIME, GNU_CTIME, GNU_IS_EXTENDED, GNU_REAL_SIZE] {
            assert!(field.end() <= HEADER_SIZE, "{field:?}");
        }
        assert!(GNU_CTIME.end() <= GNU_IS_EXTENDED.offset);
    }

    #[test]
    fn test_slice_bounds() {
        let buf = [0u8; 16];
        assert_eq!(Field::new(8, 8).slice(&buf).unwrap().len(), 8);
        assert_eq!(
            Field::new(10, 8).slice(&buf),
            Err(FieldError::OutOfBounds {
                field: Field::new(10, 8),
                len: 16
            })
        );

        let mut buf = [0u8; 4];
        Field::new(1, 2).slice_mut(&mut buf).unwrap().fill(7);
        assert_eq!(buf, [0, 7, 7, 0]);
        assert!(Field::new(3, 2).slice_mut(&mut buf).is_err());
    }

    #[test]
    fn test_slice_offset_overflow() {
        let field = Field::new(usize::MAX, 2);
        assert_eq!(field.end(), usize::MAX);
        assert_eq!(
            field.slice(&[0u8; HEADER_SIZE]),
            Err(FieldError::OutOfBounds {
                field,
                len: HEADER_SIZE
            })
        );

        let mut buf = [0u8; HEADER_SIZE];
        assert!(Field::new(usize::MAX - 1, 8).slice_mut(&mut buf).is_err());
        assert!(Field::new(1, usize::MAX).slice(&buf).is_err());
    }

    #[test]
    fn test_terminator_digits() {
        assert_eq!(Terminator::Space.digits(12), 11);
        assert_eq!(Terminator::Nul.digits(8), 7);
        assert_eq!(Terminator::SpaceNul.digits(8), 6);
        assert_eq!(Terminator::NulSpace.digits(8), 6);
        assert_eq!(Terminator::NulSpace.digits(1), 0);
        assert_eq!(Terminator::default(), Terminator::Space);
    }
}
