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

//! Functions and types for decoding base-262144 data.

use super::count::payload_len;
use super::iter::{ErrAdapter, Pending};
use super::symbol::InvalidSymbol;
use super::Digit;
use super::{BITS_PER_DIGIT, MAX_PADDING};

use core::fmt::{self, Debug, Display, Formatter};
use core::iter::FusedIterator;
use core::str::Chars;
use thiserror::Error;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An error encountered while decoding a [`str`] or sequence of [`char`]s.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Encountered a character that is not a base-262144 symbol.
    #[error(
        "invalid symbol U+{:04X} at position {position}",
        u32::from(*.symbol)
    )]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// Index of the character, counted in chars from the start of the
        /// input.
        position: usize,
    },
    /// The first symbol holds a padding count greater than 17.
    #[error(
        "malformed header: padding of {padding} bits (expected at most {max})",
        max = MAX_PADDING
    )]
    MalformedHeader {
        /// The value of the header digit.
        padding: u32,
    },
}

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Error information for [`DecodeBytesError::InvalidUtf8`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InvalidUtf8 {
    bytes: [u8; 4],
    len: u8,
}

impl InvalidUtf8 {
    /// The bytes that were invalid UTF-8.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

impl Debug for InvalidUtf8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_tuple("InvalidUtf8").field(&self.bytes()).finish()
    }
}

impl Display for InvalidUtf8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "invalid UTF-8: {:?}", self.bytes())
    }
}

impl core::error::Error for InvalidUtf8 {}

/// An error encountered while decoding a sequence of bytes.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeBytesError {
    /// The provided bytes were not valid UTF-8.
    #[error(transparent)]
    InvalidUtf8(#[from] InvalidUtf8),
    /// A different decoding error occurred.
    #[error(transparent)]
    DecodeError(#[from] DecodeError),
}

/// Alias of <code>[Result]\<T, [DecodeBytesError]></code>.
pub type DecodeBytesResult<T> = Result<T, DecodeBytesError>;

/// Used by the `decode_*_with` functions to configure the decoding process.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub struct DecodeConfig {
    /// If true, ASCII whitespace anywhere in the input is skipped instead of
    /// causing [`DecodeError::InvalidSymbol`]. This allows decoding text that
    /// has been wrapped into lines or that ends with a newline. Skipped
    /// characters still count towards the `position` reported in errors.
    /// [default: false]
    pub relaxed: bool,
}

impl DecodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            relaxed: false,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

struct CharsToDigits<I> {
    iter: I,
    config: DecodeConfig,
    position: usize,
    done: bool,
}

impl<I> CharsToDigits<I> {
    pub fn new(iter: I, config: DecodeConfig) -> Self {
        Self {
            iter,
            config,
            position: 0,
            done: false,
        }
    }
}

impl<I> Iterator for CharsToDigits<I>
where
    I: Iterator<Item = char>,
{
    type Item = DecodeResult<Digit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (position, c) = loop {
            let c = self.iter.next()?;
            let position = self.position;
            self.position += 1;
            if !(self.config.relaxed && c.is_ascii_whitespace()) {
                break (position, c);
            }
        };
        Some(Digit::from_symbol(c).map_err(|InvalidSymbol(symbol)| {
            self.done = true;
            DecodeError::InvalidSymbol {
                symbol,
                position,
            }
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.iter.size_hint().1)
        }
    }
}

enum DigitsToBytesState {
    Header,
    Running {
        padding: u32,
    },
    Done,
}

struct DigitsToBytes<I: Iterator> {
    iter: I,
    lookahead: Option<Option<I::Item>>,
    state: DigitsToBytesState,
    acc: u32,
    bits: u32,
    /// Payload symbols unpacked so far.
    symbols: usize,
    /// Bytes produced so far.
    emitted: usize,
    pending: Pending<u8, 3>,
}

impl<I: Iterator> DigitsToBytes<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            lookahead: None,
            state: DigitsToBytesState::Header,
            acc: 0,
            bits: 0,
            symbols: 0,
            emitted: 0,
            pending: Pending::new(),
        }
    }

    fn next_item(&mut self) -> Option<I::Item> {
        match self.lookahead.take() {
            Some(item) => item,
            None => self.iter.next(),
        }
    }

    fn at_end(&mut self) -> bool {
        let iter = &mut self.iter;
        self.lookahead.get_or_insert_with(|| iter.next()).is_none()
    }
}

impl<I> DigitsToBytes<I>
where
    I: Iterator<Item = DecodeResult<Digit>>,
{
    fn unpack(&mut self, digit: Digit, padding: u32) {
        self.acc = (self.acc << BITS_PER_DIGIT) | u32::from(digit);
        self.bits += BITS_PER_DIGIT;
        self.symbols += 1;

        let mut count = (self.bits / 8) as usize;
        if self.at_end() {
            // Every symbol has now been validated, so the total count is
            // known and the filler bits of this last digit can be dropped.
            let total = payload_len(self.symbols, padding);
            count = count.min(total.saturating_sub(self.emitted));
        }
        for _ in 0..count {
            self.bits -= 8;
            self.pending.push((self.acc >> self.bits) as u8);
        }
        self.emitted += count;
        self.acc &= (1 << self.bits) - 1;
    }
}

impl<I> Iterator for DigitsToBytes<I>
where
    I: Iterator<Item = DecodeResult<Digit>>,
{
    type Item = DecodeResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(b) = self.pending.next() {
                return Some(Ok(b));
            }
            let padding = match self.state {
                DigitsToBytesState::Header => None,
                DigitsToBytesState::Running {
                    padding,
                } => Some(padding),
                DigitsToBytesState::Done => return None,
            };
            let digit = match self.next_item() {
                Some(Ok(d)) => d,
                Some(Err(e)) => {
                    self.state = DigitsToBytesState::Done;
                    return Some(Err(e));
                }
                None => {
                    self.state = DigitsToBytesState::Done;
                    return None;
                }
            };
            if let Some(padding) = padding {
                self.unpack(digit, padding);
                continue;
            }
            let padding = u32::from(digit);
            if padding > MAX_PADDING {
                self.state = DigitsToBytesState::Done;
                return Some(Err(DecodeError::MalformedHeader {
                    padding,
                }));
            }
            self.state = DigitsToBytesState::Running {
                padding,
            };
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.pending.len();
        let peeked = match (&self.state, &self.lookahead) {
            (DigitsToBytesState::Done, _) | (_, Some(None)) => {
                return (pending, Some(pending));
            }
            (_, Some(Some(_))) => 1,
            (_, None) => 0,
        };
        (
            pending,
            self.iter
                .size_hint()
                .1
                .and_then(|n| n.checked_add(peeked))
                .and_then(|n| {
                    // Each symbol carries 18 bits, or 9/4 bytes, and up to
                    // 7 bits may already be held, so we add 1 here.
                    n.checked_mul(9)
                })
                .map(|n| n / 4 + 1)
                .and_then(|n| n.checked_add(pending)),
        )
    }
}

impl<I> FusedIterator for DigitsToBytes<I> where
    I: Iterator<Item = DecodeResult<Digit>>
{
}

/// Iterator returned by [`decode_chars`].
pub struct CharDecoder<I>(DigitsToBytes<CharsToDigits<I>>)
where
    I: Iterator<Item = char>;

impl<I: Iterator<Item = char>> CharDecoder<I> {
    pub(crate) fn new(iter: I, config: DecodeConfig) -> Self {
        Self(DigitsToBytes::new(CharsToDigits::new(iter, config)))
    }

    pub(crate) fn get_ref(&self) -> &I {
        &self.0.iter.iter
    }

    /// Number of symbols read from `I` ahead of the bytes yielded so far.
    pub(crate) fn peeked(&self) -> usize {
        matches!(self.0.lookahead, Some(Some(_))) as usize
    }
}

impl<I> Iterator for CharDecoder<I>
where
    I: Iterator<Item = char>,
{
    type Item = DecodeResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

// `DigitsToBytes` stops for good once it returns `None`, so `CharDecoder`
// is fused even if `I` isn't.
impl<I: Iterator<Item = char>> FusedIterator for CharDecoder<I> {}

struct Utf8ToChars<I>(I);

impl<I> Utf8ToChars<I> {
    pub fn new(iter: I) -> Self {
        Self(iter)
    }
}

impl<I> Iterator for Utf8ToChars<I>
where
    I: Iterator<Item = u8>,
{
    type Item = Result<char, InvalidUtf8>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut bytes = [self.0.next()?, 0, 0, 0];
        let mut len = 1;
        loop {
            match core::str::from_utf8(&bytes[..len]) {
                Ok(s) => {
                    if let Some(c) = s.chars().next() {
                        return Some(Ok(c));
                    }
                }
                Err(e) if e.error_len().is_none() && len < bytes.len() => {
                    if let Some(b) = self.0.next() {
                        bytes[len] = b;
                        len += 1;
                        continue;
                    }
                }
                Err(_) => {}
            }
            return Some(Err(InvalidUtf8 {
                bytes,
                len: len as u8,
            }));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.0.size_hint();
        ((lower + 3) / 4, upper)
    }
}

/// Iterator returned by [`decode_bytes`].
pub struct BytesDecoder<I>(CharDecoder<ErrAdapter<Utf8ToChars<I>, InvalidUtf8>>)
where
    I: Iterator<Item = u8>;

impl<I: Iterator<Item = u8>> BytesDecoder<I> {
    pub(crate) fn new(iter: I, config: DecodeConfig) -> Self {
        Self(CharDecoder::new(
            ErrAdapter::new(Utf8ToChars::new(iter)),
            config,
        ))
    }
}

impl<I> Iterator for BytesDecoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = DecodeBytesResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.0.next();
        if !matches!(item, Some(Ok(_))) {
            if let Some(e) = self.0.get_ref().take_err() {
                return Some(Err(e.into()));
            }
        }
        Some(item?.map_err(DecodeBytesError::from))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.0.size_hint();
        // A pending UTF-8 error adds one item.
        (lower, upper.and_then(|n| n.checked_add(1)))
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for BytesDecoder<I> {}

/// Iterator returned by [`decode_str`].
pub struct StrDecoder<'a>(CharDecoder<Chars<'a>>);

impl<'a> StrDecoder<'a> {
    pub(crate) fn new(s: &'a str, config: DecodeConfig) -> Self {
        Self(CharDecoder::new(s.chars(), config))
    }
}

impl<'a> Iterator for StrDecoder<'a> {
    type Item = DecodeResult<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.0.size_hint();
        // Symbols are four bytes long, so no more than a quarter of the
        // remaining text can be payload, plus the symbol held in lookahead.
        let symbols = self.0.get_ref().as_str().len() / 4 + self.0.peeked();
        let bound = symbols.checked_mul(9).map(|n| n / 4 + 1 + lower);
        (lower, bound.into_iter().chain(upper).min())
    }
}

impl<'a> FusedIterator for StrDecoder<'a> {}

/// Decodes a sequence of base-262144 chars.
pub fn decode_chars<I>(chars: I) -> CharDecoder<I::IntoIter>
where
    I: IntoIterator<Item = char>,
{
    decode_chars_with(chars, DecodeConfig::new())
}

/// Decodes UTF-8 base-262144 data.
pub fn decode_bytes<I>(bytes: I) -> BytesDecoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    decode_bytes_with(bytes, DecodeConfig::new())
}

/// Decodes a base-262144 `str`.
pub fn decode_str(s: &str) -> StrDecoder<'_> {
    decode_str_with(s, DecodeConfig::new())
}

/// Decodes a sequence of base-262144 chars with the given config.
///
/// This function is like [`decode_chars`], but takes a configuration object.
pub fn decode_chars_with<I>(
    chars: I,
    config: DecodeConfig,
) -> CharDecoder<I::IntoIter>
where
    I: IntoIterator<Item = char>,
{
    CharDecoder::new(chars.into_iter(), config)
}

/// Decodes UTF-8 base-262144 data with the given config.
///
/// This function is like [`decode_bytes`], but takes a configuration object.
pub fn decode_bytes_with<I>(
    bytes: I,
    config: DecodeConfig,
) -> BytesDecoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    BytesDecoder::new(bytes.into_iter(), config)
}

/// Decodes a base-262144 `str` with the given config.
///
/// This function is like [`decode_str`], but takes a configuration object.
pub fn decode_str_with(s: &str, config: DecodeConfig) -> StrDecoder<'_> {
    StrDecoder::new(s, config)
}

/// Takes a decoder and stores the contents in a [`Vec`].
///
/// This is equivalent to calling [`decoder.collect()`](Iterator::collect).
/// If the decoder reports an error, the bytes decoded before it are
/// discarded.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec<D, E>(decoder: D) -> Result<Vec<u8>, E>
where
    D: Iterator<Item = Result<u8, E>>,
{
    decoder.collect()
}
