//! Block-wise conversion for bases that are powers of two.
//!
//! A base `2^p` packs exactly `p` bits into each digit. After `lcm(p, 8)` bits
//! both the byte and the digit stream end on a boundary, so the data can be
//! cut into blocks of that size and each block converted on its own. No block
//! is larger than 40 bits, so a [`u64`] holds any of them.
//!
//! The encoded form is:
//!
//! - The leading `len % block_bytes` bytes, as their minimal digits.
//! - Every following block of `block_bytes` bytes, as exactly `block_digits`
//!   digits, left-padded with `'0'`.
//!
//! Decoding splits the digits at `len % block_digits` and applies this in
//! reverse. Full blocks always produce exactly `block_bytes` bytes.

use num_integer::lcm;
use rand::Rng;

use crate::Base;
use crate::alphabet::ZERO;
use crate::encode::DigitSink;

/// The block geometry of a power-of-two base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Blocks {
    /// Bits per digit.
    bits: u32,
    /// Bytes per full block.
    bytes: usize,
    /// Digits per full block.
    digits: usize,
}

impl Blocks {
    /// Gets the geometry for `base`, or [`None`] if it isn't a power of two.
    pub fn for_base(base: Base) -> Option<Self> {
        if !base.is_power_of_two() {
            return None;
        }

        let bits = base.get().trailing_zeros();
        let block_bits = lcm(bits, 8);
        Some(Self {
            bits,
            bytes: (block_bits / 8) as usize,
            digits: (block_bits / bits) as usize,
        })
    }

    fn mask(self) -> u64 {
        (1 << self.bits) - 1
    }

    /// Encodes `data`, pushing the digits into `sink`.
    pub fn encode<R: Rng + ?Sized>(self, sink: &mut DigitSink<'_, R>, data: &[u8]) {
        let (head, body) = data.split_at(data.len() % self.bytes);

        self.encode_block(sink, head, 0);
        for block in body.chunks_exact(self.bytes) {
            self.encode_block(sink, block, self.digits);
        }
    }

    fn encode_block<R: Rng + ?Sized>(self, sink: &mut DigitSink<'_, R>, block: &[u8], width: usize) {
        let value = block
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));

        let significant = (u64::BITS - value.leading_zeros()).div_ceil(self.bits);
        for _ in (significant as usize)..width {
            sink.push_raw(ZERO);
        }

        for index in (0..significant).rev() {
            #[expect(clippy::cast_possible_truncation, reason = "masked to at most 5 bits")]
            let digit = ((value >> (index * self.bits)) & self.mask()) as u8;
            sink.push(digit);
        }
    }

    /// Decodes digit values that were already checked against the base.
    pub fn decode(self, digits: &[u8]) -> Vec<u8> {
        let (head, body) = digits.split_at(digits.len() % self.digits);
        let mut out = Vec::with_capacity(body.len() / self.digits * self.bytes + self.bytes);

        let head = self.decode_block(head).to_be_bytes();
        let first = head.iter().position(|&b| b != 0).unwrap_or(head.len());
        out.extend_from_slice(&head[first..]);

        for block in body.chunks_exact(self.digits) {
            let value = self.decode_block(block).to_be_bytes();
            out.extend_from_slice(&value[value.len() - self.bytes..]);
        }

        out
    }

    fn decode_block(self, digits: &[u8]) -> u64 {
        digits
            .iter()
            .fold(0u64, |acc, &d| (acc << self.bits) | u64::from(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(base: u32) -> Option<Blocks> {
        Blocks::for_base(Base::new(base).expect("valid base"))
    }

    #[test]
    fn geometry() {
        let expected = [(2, 1, 1, 8), (4, 2, 1, 4), (8, 3, 3, 8), (16, 4, 1, 2), (32, 5, 5, 8)];
        for (base, bits, bytes, digits) in expected {
            assert_eq!(blocks(base), Some(Blocks { bits, bytes, digits }), "base {base}");
        }
    }

    #[test]
    fn not_power_of_two() {
        for base in [3, 10, 12, 24, 36] {
            assert_eq!(blocks(base), None, "base {base}");
        }
    }

    #[test]
    fn zero_blocks_keep_their_width() {
        let b32 = blocks(32).expect("power of two");
        assert_eq!(b32.decode(&[0; 16]), vec![0; 10]);

        let b8 = blocks(8).expect("power of two");
        assert_eq!(b8.decode(&[1, 0, 0, 0, 0, 0, 0, 0, 0]), vec![1, 0, 0, 0]);
    }
}
