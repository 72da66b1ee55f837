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

use core::cell::Cell;
use core::iter::FusedIterator;

/// A fixed-capacity FIFO of items that have been produced but not yet
/// yielded.
#[derive(Clone, Copy)]
pub struct Pending<T, const N: usize> {
    items: [T; N],
    start: usize,
    end: usize,
}

impl<T: Copy + Default, const N: usize> Pending<T, N> {
    pub fn new() -> Self {
        Self {
            items: [T::default(); N],
            start: 0,
            end: 0,
        }
    }

    /// Replaces the contents with `items`.
    pub fn fill(&mut self, items: &[T]) {
        self.items[..items.len()].copy_from_slice(items);
        self.start = 0;
        self.end = items.len();
    }

    /// # Panics
    ///
    /// Panics if `N` items have been pushed since the buffer was last empty.
    pub fn push(&mut self, item: T) {
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
        self.items[self.end] = item;
        self.end += 1;
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T: Copy, const N: usize> Iterator for Pending<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        (self.start < self.end).then(|| {
            self.start += 1;
            self.items[self.start - 1]
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

/// Turns an iterator of `Result<T, E>` into an iterator of `T` while allowing
/// the error that ended it to be fetched with [`Self::take_err`].
pub struct ErrAdapter<I, Err> {
    iter: I,
    err: Cell<Option<Err>>,
    done: bool,
}

impl<I, Err> ErrAdapter<I, Err> {
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            err: Cell::new(None),
            done: false,
        }
    }

    pub fn take_err(&self) -> Option<Err> {
        self.err.take()
    }
}

impl<I, Err, T> Iterator for ErrAdapter<I, Err>
where
    I: Iterator<Item = Result<T, Err>>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.iter.next() {
            Some(Ok(item)) => Some(item),
            Some(Err(e)) => {
                self.done = true;
                self.err.set(Some(e));
                None
            }
            None => {
                self.done = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.iter.size_hint().1)
        }
    }
}

impl<I, Err, T> FusedIterator for ErrAdapter<I, Err> where
    I: Iterator<Item = Result<T, Err>>
{
}
