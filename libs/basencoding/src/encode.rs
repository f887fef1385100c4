use num_bigint::BigUint;
use num_traits::Zero as _;
use rand::Rng;

use crate::alphabet::{LOWER, UPPER};
use crate::base::{BaseSpec, CasePolicy, Resolved};
use crate::pow2::Blocks;
use crate::{Base, Error};

/// Collects digit characters, choosing the letter case per [`CasePolicy`].
pub(crate) struct DigitSink<'a, R: ?Sized> {
    out: Vec<u8>,
    case: CasePolicy,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> DigitSink<'a, R> {
    fn new(capacity: usize, case: CasePolicy, rng: &'a mut R) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            case,
            rng,
        }
    }

    /// Pushes the character for a digit value in `0..36`.
    pub fn push(&mut self, digit: u8) {
        let table = match self.case {
            CasePolicy::Lower => LOWER,
            CasePolicy::Upper => UPPER,
            CasePolicy::RandomPerDigit if self.rng.random_bool(0.5) => UPPER,
            CasePolicy::RandomPerDigit => LOWER,
        };

        self.out.push(table[usize::from(digit)]);
    }

    /// Pushes a character as-is.
    pub fn push_raw(&mut self, c: u8) {
        self.out.push(c);
    }

    fn finish(mut self) -> Vec<u8> {
        self.out.push(b'\n');
        self.out
    }
}

/// See [`crate::encode_with_rng`].
pub(crate) fn encode_with_rng<R: Rng + ?Sized>(
    data: &[u8],
    spec: BaseSpec,
    rng: &mut R,
) -> Result<Vec<u8>, Error> {
    let Resolved { base, case } = spec.resolve(rng)?;
    log::debug!("encoding {} bytes in base {base} ({case:?})", data.len());

    let mut sink = DigitSink::new(max_digit_len(data.len(), base) + 1, case, rng);
    match Blocks::for_base(base) {
        Some(blocks) => blocks.encode(&mut sink, data),
        None => encode_general(&mut sink, data, base),
    }

    Ok(sink.finish())
}

/// Treats all of `data` as a single big-endian integer.
fn encode_general<R: Rng + ?Sized>(sink: &mut DigitSink<'_, R>, data: &[u8], base: Base) {
    let value = BigUint::from_bytes_be(data);
    if value.is_zero() {
        return;
    }

    for digit in value.to_radix_be(u32::from(base.get())) {
        sink.push(digit);
    }
}

/// An upper bound for the digits `byte_len` bytes need in `base`.
fn max_digit_len(byte_len: usize, base: Base) -> usize {
    // floor(log2(base)) bits per digit at least
    let bits = base.get().ilog2() as usize;
    (byte_len * 8).div_ceil(bits)
}
