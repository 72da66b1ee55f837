/*
 * Copyright (C) 2026 The Base262144 developers
 *
 * This file is part of Base262144.
 *
 * Base262144 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Base262144 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Base262144. If not, see <https://www.gnu.org/licenses/>.
 */

//! Mapping between 18-bit digit values and the characters that represent
//! them.

use super::BITS_PER_DIGIT;
use thiserror::Error;

/// Number of distinct symbols (and digit values).
pub const BASE: u32 = 1 << BITS_PER_DIGIT;

/// The symbol for digit value 0.
pub const FIRST_SYMBOL: char = '\u{10000}';

/// The symbol for digit value [`BASE`] − 1.
pub const LAST_SYMBOL: char = '\u{4ffff}';

const FIRST_CODE_POINT: u32 = FIRST_SYMBOL as u32;
pub(crate) const DIGIT_MASK: u32 = BASE - 1;

/// A digit value was too large to be represented by a symbol.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error(
    "digit value {0} is out of range (expected at most {max})",
    max = DIGIT_MASK
)]
pub struct OutOfRange(pub u32);

/// A character is not one of the [`BASE`] symbols.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("invalid symbol U+{:04X}", u32::from(*.0))]
pub struct InvalidSymbol(pub char);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Digit(u32);

impl Digit {
    pub fn new(x: u32) -> Option<Self> {
        (x < BASE).then(|| Self(x))
    }

    /// Keeps only the low 18 bits of `x`.
    pub fn from_masked(x: u32) -> Self {
        Self(x & DIGIT_MASK)
    }

    pub fn from_symbol(c: char) -> Result<Self, InvalidSymbol> {
        u32::from(c)
            .checked_sub(FIRST_CODE_POINT)
            .and_then(Self::new)
            .ok_or(InvalidSymbol(c))
    }

    pub fn to_symbol(self) -> char {
        let n = FIRST_CODE_POINT + self.0;
        debug_assert!(char::from_u32(n).is_some());
        // SAFETY: `self.0` is less than `BASE`, so `n` lies within
        // U+10000..=U+4FFFF, which contains no surrogates and does not
        // exceed `char::MAX`.
        unsafe { char::from_u32_unchecked(n) }
    }
}

impl From<Digit> for u32 {
    fn from(d: Digit) -> u32 {
        d.0
    }
}

/// Returns the symbol for digit value `v`.
///
/// # Errors
///
/// Returns [`OutOfRange`] if `v` is not less than [`BASE`].
pub fn value_to_symbol(v: u32) -> Result<char, OutOfRange> {
    Digit::new(v).map(Digit::to_symbol).ok_or(OutOfRange(v))
}

/// Returns the digit value represented by `c`.
///
/// # Errors
///
/// Returns [`InvalidSymbol`] if `c` is outside U+10000..=U+4FFFF.
pub fn symbol_to_value(c: char) -> Result<u32, InvalidSymbol> {
    Digit::from_symbol(c).map(u32::from)
}
