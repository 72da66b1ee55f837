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

//! Functions and types for encoding data as base-262144.

use super::iter::Pending;
use super::BITS_PER_DIGIT;
use super::Digit;

use core::iter::FusedIterator;

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Returns the number of zero bits appended to `byte_len` bytes to fill the
/// last digit. This is the value of the header digit.
pub fn padding_bits(byte_len: usize) -> u32 {
    // 8 * 9 bytes is a whole number of digits.
    let rem = (byte_len % 9) as u32 * 8 % BITS_PER_DIGIT;
    (BITS_PER_DIGIT - rem) % BITS_PER_DIGIT
}

/// Returns the number of symbols (header included) that `byte_len` bytes
/// encode to, or [`None`] if that would overflow a [`usize`].
pub fn encoded_len(byte_len: usize) -> Option<usize> {
    payload_digits(0, byte_len)?.checked_add(1)
}

/// Digits still to come from `bits` held bits and `bytes` unread bytes.
fn payload_digits(bits: u32, bytes: usize) -> Option<usize> {
    let d = BITS_PER_DIGIT as usize;
    bytes
        .checked_mul(8)?
        .checked_add(bits as usize)?
        .checked_add(d - 1)
        .map(|n| n / d)
}

enum BytesToDigitsState {
    Header,
    Running,
    Done,
}

struct BytesToDigits<I> {
    iter: I,
    state: BytesToDigitsState,
    padding: u32,
    acc: u32,
    bits: u32,
}

impl<I: ExactSizeIterator> BytesToDigits<I> {
    pub fn new(iter: I) -> Self {
        Self {
            padding: padding_bits(iter.len()),
            iter,
            state: BytesToDigitsState::Header,
            acc: 0,
            bits: 0,
        }
    }
}

impl<I> Iterator for BytesToDigits<I>
where
    I: ExactSizeIterator<Item = u8>,
{
    type Item = Digit;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            BytesToDigitsState::Header => {
                self.state = BytesToDigitsState::Running;
                Some(Digit::from_masked(self.padding))
            }
            BytesToDigitsState::Running => loop {
                if self.bits >= BITS_PER_DIGIT {
                    self.bits -= BITS_PER_DIGIT;
                    let digit = Digit::from_masked(self.acc >> self.bits);
                    self.acc &= (1 << self.bits) - 1;
                    break Some(digit);
                }
                if let Some(b) = self.iter.next() {
                    self.acc = (self.acc << 8) | u32::from(b);
                    self.bits += 8;
                    continue;
                }
                self.state = BytesToDigitsState::Done;
                if self.bits == 0 {
                    break None;
                }
                debug_assert_eq!(BITS_PER_DIGIT - self.bits, self.padding);
                // Left-align the leftover bits; the padding is zero.
                break Some(Digit::from_masked(
                    self.acc << (BITS_PER_DIGIT - self.bits),
                ));
            },
            BytesToDigitsState::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.state {
            BytesToDigitsState::Header => payload_digits(0, self.iter.len())
                .and_then(|n| n.checked_add(1)),
            BytesToDigitsState::Running => {
                payload_digits(self.bits, self.iter.len())
            }
            BytesToDigitsState::Done => Some(0),
        };
        remaining.map_or((usize::MAX, None), |n| (n, Some(n)))
    }
}

impl<I: ExactSizeIterator<Item = u8>> FusedIterator for BytesToDigits<I> {}

/// Iterator returned by [`encode_to_chars`].
pub struct CharEncoder<I>(BytesToDigits<I>);

impl<I: ExactSizeIterator> CharEncoder<I> {
    pub(crate) fn new(iter: I) -> Self {
        Self(BytesToDigits::new(iter))
    }
}

impl<I> Iterator for CharEncoder<I>
where
    I: ExactSizeIterator<Item = u8>,
{
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Digit::to_symbol)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<I: ExactSizeIterator<Item = u8>> ExactSizeIterator for CharEncoder<I> {}

impl<I: ExactSizeIterator<Item = u8>> FusedIterator for CharEncoder<I> {}

/// Iterator returned by [`encode_to_bytes`].
pub struct Utf8Encoder<I> {
    chars: CharEncoder<I>,
    pending: Pending<u8, 4>,
}

impl<I: ExactSizeIterator> Utf8Encoder<I> {
    pub(crate) fn new(iter: I) -> Self {
        Self {
            chars: CharEncoder::new(iter),
            pending: Pending::new(),
        }
    }
}

impl<I> Iterator for Utf8Encoder<I>
where
    I: ExactSizeIterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(b) = self.pending.next() {
            return Some(b);
        }
        let mut buf = [0; 4];
        let utf8 = self.chars.next()?.encode_utf8(&mut buf);
        self.pending.fill(utf8.as_bytes());
        self.pending.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every symbol is a four-byte UTF-8 sequence.
        self.chars
            .size_hint()
            .1
            .and_then(|n| n.checked_mul(4))
            .and_then(|n| n.checked_add(self.pending.len()))
            .map_or((usize::MAX, None), |n| (n, Some(n)))
    }
}

impl<I: ExactSizeIterator<Item = u8>> ExactSizeIterator for Utf8Encoder<I> {}

impl<I: ExactSizeIterator<Item = u8>> FusedIterator for Utf8Encoder<I> {}

/// Encodes bytes as a sequence of base-262144 chars.
///
/// The header depends on the total input length, so the input must report
/// its length accurately through [`ExactSizeIterator`].
pub fn encode_to_chars<I>(bytes: I) -> CharEncoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
    I::IntoIter: ExactSizeIterator,
{
    CharEncoder::new(bytes.into_iter())
}

/// Encodes bytes as UTF-8 base-262144 text.
///
/// This function is like [`encode_to_chars`], but yields the UTF-8 encoding
/// of each char.
pub fn encode_to_bytes<I>(bytes: I) -> Utf8Encoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
    I::IntoIter: ExactSizeIterator,
{
    Utf8Encoder::new(bytes.into_iter())
}

/// Encodes bytes as a base-262144 [`String`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string<I>(bytes: I) -> String
where
    I: IntoIterator<Item = u8>,
    I::IntoIter: ExactSizeIterator,
{
    let chars = encode_to_chars(bytes);
    let mut s = String::with_capacity(chars.len().saturating_mul(4));
    s.extend(chars);
    s
}
