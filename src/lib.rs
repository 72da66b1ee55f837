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

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]
#![deny(unsafe_op_in_unsafe_fn)]

//! Encodes arbitrary bytes as text made of the 262,144 Unicode scalar values
//! from U+10000 to U+4FFFF. Each character carries 18 bits; the first
//! character of every encoded text holds the number of zero bits used to pad
//! the last one.
//!
//! ```
//! let text = base262144::encode_to_string(*b"hi");
//! assert_eq!(text.chars().count(), 2);
//! let bytes = base262144::decode_to_vec(base262144::decode_str(&text));
//! assert_eq!(bytes.unwrap(), b"hi");
//! ```

pub mod count;
pub mod decode;
pub mod encode;
mod iter;
pub mod symbol;

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

const BITS_PER_DIGIT: u32 = 18;
const MAX_PADDING: u32 = BITS_PER_DIGIT - 1;

use symbol::Digit;

pub use count::count_scalars;
pub use count::payload_len;

pub use decode::decode_bytes;
pub use decode::decode_chars;
pub use decode::decode_str;
#[cfg(feature = "alloc")]
pub use decode::decode_to_vec;
pub use decode::{DecodeError, DecodeResult};

pub use encode::encode_to_bytes;
pub use encode::encode_to_chars;
#[cfg(feature = "alloc")]
pub use encode::encode_to_string;

pub use symbol::{symbol_to_value, value_to_symbol};
pub use symbol::{InvalidSymbol, OutOfRange};

/// Encodes a byte slice.
///
/// Shorthand for <code>[encode_to_string]\(bytes.iter().copied())</code>.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode(bytes: &[u8]) -> String {
    encode_to_string(bytes.iter().copied())
}

/// Decodes a base-262144 `str`.
///
/// Either the whole text is decoded or an error is returned; partial output
/// is never exposed.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode(text: &str) -> DecodeResult<Vec<u8>> {
    let capacity = count_scalars(text)
        .checked_sub(1)
        .map_or(0, |payload| payload_len(payload, 0));
    let mut bytes = Vec::with_capacity(capacity);
    for byte in decode_str(text) {
        bytes.push(byte?);
    }
    Ok(bytes)
}
