//! The digit tables shared by the encoder and decoder.
//!
//! Both tables hold 36 characters, where the character at index `i`
//! represents the numeral value `i`. They only differ in the case of the
//! letter digits `10..=35`.

/// Digits with lowercase letters.
pub const LOWER: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Digits with uppercase letters.
pub const UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The character used to left-pad fixed-width blocks.
///
/// This is the same in both tables.
pub const ZERO: u8 = LOWER[0];

/// Gets the numeral value of a digit character, in either case.
///
/// Returns [`None`] if the byte is in neither table.
#[must_use]
pub const fn digit_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'z' => Some(c - b'a' + 10),
        b'A'..=b'Z' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_agree_with_digit_value() {
        for (index, (&lower, &upper)) in LOWER.iter().zip(UPPER).enumerate() {
            assert_eq!(digit_value(lower), Some(index as u8), "lower {lower}");
            assert_eq!(digit_value(upper), Some(index as u8), "upper {upper}");
        }
    }

    #[test]
    fn rejects_non_alphanumeric() {
        for c in [b'#', b' ', b'\n', b'-', b'_', 0x80, 0xFF] {
            assert_eq!(digit_value(c), None, "byte {c:#x}");
        }
    }
}
