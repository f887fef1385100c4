use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::Zero as _;

use crate::alphabet::{LOWER, digit_value};
use crate::base::BaseSpec;
use crate::pow2::Blocks;
use crate::{Base, Error, TextEncoding};

/// See [`crate::decode`].
pub(crate) fn decode(data: &[u8], spec: BaseSpec, encoding: TextEncoding) -> Result<Vec<u8>, Error> {
    let digits = digit_values(data.trim_ascii_end())?;

    match spec.resolve_fixed()? {
        Some(resolved) => decode_in(&digits, resolved.base),
        None => infer(&digits, encoding),
    }
}

/// Maps each character to its numeral value.
fn digit_values(text: &[u8]) -> Result<Vec<u8>, Error> {
    text.iter()
        .map(|&c| digit_value(c).ok_or(Error::InvalidInput(c)))
        .collect()
}

fn decode_in(digits: &[u8], base: Base) -> Result<Vec<u8>, Error> {
    if let Some(&digit) = digits.iter().find(|&&d| d >= base.get()) {
        return Err(Error::DigitOutOfRange {
            digit: char::from(LOWER[usize::from(digit)]),
            base,
        });
    }

    Ok(match Blocks::for_base(base) {
        Some(blocks) => blocks.decode(digits),
        None => decode_general(digits, base),
    })
}

/// Parses all of `digits` as a single integer.
fn decode_general(digits: &[u8], base: Base) -> Vec<u8> {
    match BigUint::from_radix_be(digits, u32::from(base.get())) {
        Some(value) if !value.is_zero() => value.to_bytes_be(),
        // empty or zero
        _ => Vec::new(),
    }
}

/// Tries every base that can hold the digits and keeps the one whose output
/// is valid text.
fn infer(digits: &[u8], encoding: TextEncoding) -> Result<Vec<u8>, Error> {
    let Some(&max) = digits.iter().max() else {
        return Ok(Vec::new());
    };

    let mut found = BTreeMap::new();
    for base in Base::from_up(max + 1) {
        let bytes = match decode_in(digits, base) {
            Ok(bytes) => bytes,
            Err(why) => {
                log::trace!("base {base} rejected: {why}");
                continue;
            },
        };

        if encoding.accepts(&bytes) {
            found.insert(base, bytes);
        } else {
            log::trace!("base {base} rejected: output is not valid {encoding}");
        }
    }

    if found.len() > 1 {
        return Err(Error::Ambiguous(found.into_keys().collect()));
    }

    let (base, bytes) = found.pop_first().ok_or(Error::NotBasencoded)?;
    log::debug!("inferred base {base}");
    Ok(bytes)
}
