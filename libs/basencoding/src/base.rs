//! Base specifiers and their resolution into a [`Base`] and [`CasePolicy`].

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::Error;
use crate::alphabet::digit_value;

/// A numeral base between 2 and 36, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Base(u8);

impl Base {
    /// The smallest supported base.
    pub const MIN: Self = Self(2);
    /// The largest supported base.
    pub const MAX: Self = Self(36);

    /// Creates a new base, checking that it is in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBase`] if `base` is not in `2..=36`.
    pub fn new(base: u32) -> Result<Self, Error> {
        u8::try_from(base)
            .ok()
            .filter(|b| (Self::MIN.0..=Self::MAX.0).contains(b))
            .map(Self)
            .ok_or(Error::InvalidBase)
    }

    /// Gets the numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether this base is handled block-wise.
    #[must_use]
    pub const fn is_power_of_two(self) -> bool {
        self.0.is_power_of_two()
    }

    /// Iterates every supported base in ascending order, starting at `start`.
    pub(crate) fn from_up(start: u8) -> impl Iterator<Item = Self> {
        (start.max(Self::MIN.0)..=Self::MAX.0).map(Self)
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Which letter case is used for digits `10..=35` when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    /// Always use lowercase letters.
    Lower,
    /// Always use uppercase letters.
    Upper,
    /// Flip a coin for every single digit.
    RandomPerDigit,
}

/// A [`Base`] together with the [`CasePolicy`] its specifier implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub base: Base,
    pub case: CasePolicy,
}

/// The base requested by the caller, before validation.
///
/// A single character carries its own case policy: lowercase letters and `'0'`
/// mean lowercase output, uppercase letters and `'1'` mean uppercase output.
/// `'0'` and `'1'` both stand for base 36. A decimal string carries no case
/// information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseSpec {
    /// No base was given.
    #[default]
    Absent,
    /// A single character, such as `b'g'` or `b'Z'`.
    Char(u8),
    /// A decimal number of at least two digits, such as `16`.
    Decimal(u32),
}

impl BaseSpec {
    /// Parses a raw base specifier.
    ///
    /// [`None`] is [`BaseSpec::Absent`], one byte is [`BaseSpec::Char`] and
    /// two or more ASCII digits are [`BaseSpec::Decimal`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBase`] for anything else, including empty input
    /// and decimals that overflow.
    pub fn from_bytes(raw: Option<&[u8]>) -> Result<Self, Error> {
        match raw {
            None => Ok(Self::Absent),
            Some(&[c]) => Ok(Self::Char(c)),
            Some(digits) if !digits.is_empty() && digits.iter().all(u8::is_ascii_digit) => {
                digits
                    .iter()
                    .try_fold(0u32, |acc, d| {
                        acc.checked_mul(10)?.checked_add(u32::from(d - b'0'))
                    })
                    .map(Self::Decimal)
                    .ok_or(Error::InvalidBase)
            },
            Some(_) => Err(Error::InvalidBase),
        }
    }

    /// Resolves the specifier, unless it is [`BaseSpec::Absent`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBase`] if the specifier doesn't name a base in
    /// `2..=36`.
    pub fn resolve_fixed(self) -> Result<Option<Resolved>, Error> {
        let (base, case) = match self {
            Self::Absent => return Ok(None),
            Self::Char(b'0') => (36, CasePolicy::Lower),
            Self::Char(b'1') => (36, CasePolicy::Upper),
            Self::Char(c) => {
                let value = digit_value(c).ok_or(Error::InvalidBase)?;
                let case = if c.is_ascii_uppercase() {
                    CasePolicy::Upper
                } else {
                    CasePolicy::Lower
                };
                (u32::from(value), case)
            },
            Self::Decimal(n) => (n, CasePolicy::RandomPerDigit),
        };

        let base = Base::new(base)?;
        Ok(Some(Resolved { base, case }))
    }

    /// Resolves the specifier, picking a random base if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBase`] if the specifier doesn't name a base in
    /// `2..=36`.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Resolved, Error> {
        if let Some(resolved) = self.resolve_fixed()? {
            return Ok(resolved);
        }

        let base = rng.random_range(Base::MIN.0..=Base::MAX.0);
        Ok(Resolved {
            base: Base(base),
            case: CasePolicy::RandomPerDigit,
        })
    }
}

impl FromStr for BaseSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(Some(s.as_bytes()))
    }
}
