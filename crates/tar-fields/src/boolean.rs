//! Single-byte flag fields, such as the GNU `isextended` marker.

/// Decode a flag byte. Any non-zero byte is `true`.
#[must_use]
pub fn decode(byte: u8) -> bool {
    byte != 0
}

/// Encode a flag as `1` or `0`.
#[must_use]
pub fn encode(value: bool) -> u8 {
    u8::from(value)
}
