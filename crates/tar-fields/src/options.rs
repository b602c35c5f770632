//! Reader and writer settings for numeric fields.

use crate::Terminator;

/// How strictly octal text fields are parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParseMode {
    /// Digits must be followed by at least one space or NUL inside the field.
    #[default]
    Strict,
    /// Digits may run to the end of the field, as some legacy writers produce.
    Lenient,
}

/// Settings for reading and writing numeric header fields.
///
/// # Example
///
/// ```
/// use tar_fields::{Options, ParseMode, Terminator};
///
/// // Use defaults
/// let options = Options::default();
/// assert!(options.binary_fallback);
///
/// // Customize
/// let gnu = Options {
///     terminator: Terminator::Nul,
///     ..Default::default()
/// };
/// assert_eq!(gnu.parse_mode, ParseMode::Strict);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Parse mode applied to octal text fields.
    ///
    /// Default: [`ParseMode::Strict`].
    pub parse_mode: ParseMode,

    /// Terminator written after the digits of ordinary numeric fields.
    ///
    /// The checksum field ignores this and always uses [`Terminator::NulSpace`].
    ///
    /// Default: [`Terminator::Space`].
    pub terminator: Terminator,

    /// Whether values too large for octal text are written in binary overflow form.
    ///
    /// Readers predating the binary extension cannot decode such fields, so
    /// writers targeting them must turn this off and accept
    /// [`FieldError::Overflow`](crate::FieldError::Overflow) instead.
    ///
    /// Default: `true`.
    pub binary_fallback: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::Strict,
            terminator: Terminator::Space,
            binary_fallback: true,
        }
    }
}

impl Options {
    /// Create `Options` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings that only produce output readable by pre-extension tools.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            binary_fallback: false,
            ..Self::default()
        }
    }

    /// Settings that accept as many real-world archives as possible.
    ///
    /// Octal fields whose digits fill the whole field are accepted.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            parse_mode: ParseMode::Lenient,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.parse_mode, ParseMode::Strict);
        assert_eq!(options.terminator, Terminator::Space);
        assert!(options.binary_fallback);
        assert_eq!(options, Options::new());
    }

    #[test]
    fn test_legacy_options() {
        let options = Options::legacy();
        assert!(!options.binary_fallback);
        assert_eq!(options.parse_mode, ParseMode::Strict);
    }

    #[test]
    fn test_permissive_options() {
        let options = Options::permissive();
        assert_eq!(options.parse_mode, ParseMode::Lenient);
        assert!(options.binary_fallback);
    }
}
