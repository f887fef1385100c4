//! Converts byte sequences to integers written in any base from 2 to 36, and
//! back.
//!
//! The bytes are treated as one big-endian base-256 number. That number is
//! then written with the digits `0-9a-z`, followed by a newline. Decoding
//! accepts either letter case.
//!
//! Bases that are powers of two are converted in fixed-size blocks instead,
//! see [`Base::is_power_of_two`]. Because the output is a number, leading zero
//! bytes are only kept where they fall inside such a block.
//!
//! # Base specifiers
//!
//! The base is given as a [`BaseSpec`]:
//!
//! - A single character is read as a base-36 digit and its case decides the
//!   case of the output. `'g'` means base 16 with lowercase letters, `'G'`
//!   base 16 with uppercase letters. `'0'` and `'1'` both mean base 36, in
//!   lowercase and uppercase respectively.
//! - Two or more decimal digits, such as `"16"`, give the base directly. Each
//!   letter of the output gets a random case.
//! - Without a base, [`encode`] picks one at random and [`decode`] tries every
//!   base, accepting the only one that produces valid text.
//!
//! # Example
//!
//! ```
//! use basencoding::{BaseSpec, TextEncoding, decode, encode};
//!
//! let hex: BaseSpec = "g".parse()?;
//! let encoded = encode(b"hi", hex)?;
//! assert_eq!(encoded, b"6869\n");
//!
//! let decoded = decode(&encoded, hex, TextEncoding::Utf8)?;
//! assert_eq!(decoded, b"hi");
//! # Ok::<(), basencoding::Error>(())
//! ```

use std::fmt;

use rand::Rng;

// for benchmarks
#[cfg(test)]
use criterion as _;

pub mod alphabet;
mod base;
mod decode;
mod encode;
mod pow2;
mod text;

pub use base::{Base, BaseSpec, CasePolicy, Resolved};
pub use text::TextEncoding;

/// Error encoding or decoding basencoded data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The base specifier isn't a number between 2 and 36.
    #[error("base doesn't represent a number between 2 and 36")]
    InvalidBase,
    /// The input contained a byte outside of `0-9a-zA-Z`.
    #[error("data hasn't been encoded using basencoding: unexpected byte {0:#04x}")]
    InvalidInput(u8),
    /// A digit was too large for the requested base.
    #[error("digit `{digit}` is out of range for base {base}")]
    DigitOutOfRange { digit: char, base: Base },
    /// No base decodes the input to valid text.
    #[error("data hasn't been encoded using basencoding")]
    NotBasencoded,
    /// More than one base decodes the input to valid text.
    #[error("data could be decodable by base {}", BaseList(.0))]
    Ambiguous(Vec<Base>),
    /// The text encoding name isn't supported.
    #[error("unknown text encoding `{0}`")]
    UnknownEncoding(String),
}

struct BaseList<'a>(&'a [Base]);

impl fmt::Display for BaseList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, base) in self.0.iter().enumerate() {
            if index != 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(base, f)?;
        }
        Ok(())
    }
}

/// Basencodes `data`, returning the digits and a trailing newline.
///
/// Random choices are made with [`rand::rng`]. Use [`encode_with_rng`] to
/// provide a different source.
///
/// # Errors
///
/// Returns [`Error::InvalidBase`] if `spec` doesn't name a base in `2..=36`.
pub fn encode(data: &[u8], spec: BaseSpec) -> Result<Vec<u8>, Error> {
    encode_with_rng(data, spec, &mut rand::rng())
}

/// Basencodes `data`, using `rng` to pick a base if none is specified and to
/// pick the case of each letter if the specifier carries none.
///
/// # Errors
///
/// Returns [`Error::InvalidBase`] if `spec` doesn't name a base in `2..=36`.
pub fn encode_with_rng<R: Rng + ?Sized>(
    data: &[u8],
    spec: BaseSpec,
    rng: &mut R,
) -> Result<Vec<u8>, Error> {
    encode::encode_with_rng(data, spec, rng)
}

/// Decodes basencoded `data` back into bytes.
///
/// Trailing white-space is ignored. If `spec` is [`BaseSpec::Absent`], every
/// base that can hold the digits is tried and the output must be valid text
/// in `encoding` for exactly one of them.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `data` contains a character that isn't a
///   digit in any base.
/// - [`Error::InvalidBase`] if `spec` doesn't name a base in `2..=36`.
/// - [`Error::DigitOutOfRange`] if a digit doesn't fit the specified base.
/// - [`Error::NotBasencoded`] or [`Error::Ambiguous`] if no base was specified
///   and zero or multiple bases produce valid text.
pub fn decode(data: &[u8], spec: BaseSpec, encoding: TextEncoding) -> Result<Vec<u8>, Error> {
    decode::decode(data, spec, encoding)
}
