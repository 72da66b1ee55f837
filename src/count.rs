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

//! Length arithmetic over encoded texts.

use super::BITS_PER_DIGIT;

// Four digits hold exactly nine bytes.
const DIGITS_PER_GROUP: usize = 4;
const BYTES_PER_GROUP: usize = 9;

/// Counts the Unicode scalar values in `text`.
///
/// Every symbol is four bytes of UTF-8 (two UTF-16 code units), so this is
/// not the same as the length of the text in storage units.
pub fn count_scalars(text: &str) -> usize {
    text.chars().count()
}

/// Returns the number of bytes carried by `payload_symbols` symbols whose
/// last `padding` bits are filler.
///
/// For a text of `n` symbols, `payload_symbols` is `n - 1` (the header
/// carries no payload). A header-only text carries no bytes whatever its
/// padding.
pub fn payload_len(payload_symbols: usize, padding: u32) -> usize {
    let whole = (payload_symbols / DIGITS_PER_GROUP)
        .saturating_mul(BYTES_PER_GROUP);
    let rest = (payload_symbols % DIGITS_PER_GROUP) as u32 * BITS_PER_DIGIT;
    if rest >= padding {
        whole.saturating_add(((rest - padding) / 8) as usize)
    } else {
        // `rest` is 0 here: `padding` never exceeds a single digit.
        whole.saturating_sub(((padding - rest + 7) / 8) as usize)
    }
}
