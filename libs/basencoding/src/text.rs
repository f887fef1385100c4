//! Text encodings used to recognize plausible candidates during base
//! inference.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A text encoding that decoded bytes are checked against.
///
/// Every supported encoding maps valid bytes to text and back without
/// changing them, so a successful check can return the bytes as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
    /// ISO-8859-1. Every byte sequence is valid.
    Latin1,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    /// The canonical name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin-1",
            Self::Utf16Le => "utf-16-le",
            Self::Utf16Be => "utf-16-be",
        }
    }

    /// Whether `bytes` is valid text in this encoding.
    #[must_use]
    pub fn accepts(self, bytes: &[u8]) -> bool {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).is_ok(),
            Self::Ascii => bytes.is_ascii(),
            Self::Latin1 => true,
            Self::Utf16Le => utf16_valid(bytes, u16::from_le_bytes),
            Self::Utf16Be => utf16_valid(bytes, u16::from_be_bytes),
        }
    }
}

fn utf16_valid(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> bool {
    let (units, rest) = bytes.as_chunks::<2>();
    rest.is_empty() && char::decode_utf16(units.iter().copied().map(unit)).all(|c| c.is_ok())
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    /// Parses an encoding name, ignoring case and treating `_` like `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");
        match name.as_str() {
            "utf-8" | "utf8" | "u8" => Ok(Self::Utf8),
            "ascii" | "us-ascii" | "646" => Ok(Self::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" | "l1" => Ok(Self::Latin1),
            "utf-16-le" | "utf-16le" | "utf16le" => Ok(Self::Utf16Le),
            "utf-16-be" | "utf-16be" | "utf16be" => Ok(Self::Utf16Be),
            _ => Err(Error::UnknownEncoding(s.to_owned())),
        }
    }
}
