// This file is part of the kif library.
// Copyright (C) 2024 The kif developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Character cursor over a single line.
//!
//! A [`Cursor`] hands out one `char` at a time and can step back. Every
//! failed read reports a [`Scan`] signal that tells apart running out of
//! input from finding something unexpected, which is what alternation
//! needs: on [`Scan::Mismatch`] the next alternative is tried, on
//! [`Scan::EndOfInput`] there is nothing left to try.
//!
//! # Examples
//!
//! ```
//! use kif::cursor::{Cursor, Scan};
//!
//! let mut cursor = Cursor::new("歩");
//! assert_eq!(cursor.peek(), Ok('歩'));
//! assert_eq!(cursor.advance(), Ok('歩'));
//! assert_eq!(cursor.advance(), Err(Scan::EndOfInput));
//!
//! cursor.pushback();
//! assert_eq!(cursor.offset(), 0);
//! ```

use std::{error, fmt};

/// Why a read did not produce a token.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Scan {
    /// The cursor is exhausted.
    EndOfInput,
    /// Input remains, but it does not match what was expected.
    Mismatch,
}

impl fmt::Display for Scan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Scan::EndOfInput => "unexpected end of input",
            Scan::Mismatch => "mismatch",
        })
    }
}

impl error::Error for Scan {}

/// Saved cursor offset, see [`Cursor::snapshot()`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[must_use]
pub struct Snapshot(usize);

/// Random-access view over the characters of a line.
#[derive(Clone, Debug)]
pub struct Cursor {
    chars: Vec<char>,
    offset: usize,
}

impl Cursor {
    pub fn new(line: &str) -> Cursor {
        Cursor {
            chars: line.chars().collect(),
            offset: 0,
        }
    }

    /// Number of characters consumed so far.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Characters not consumed yet.
    #[inline]
    pub fn remaining(&self) -> &[char] {
        &self.chars[self.offset..]
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.chars.len()
    }

    /// Returns the next character without consuming it.
    ///
    /// # Errors
    ///
    /// [`Scan::EndOfInput`] if the cursor is exhausted.
    #[inline]
    pub fn peek(&self) -> Result<char, Scan> {
        self.chars.get(self.offset).copied().ok_or(Scan::EndOfInput)
    }

    /// Consumes and returns the next character.
    ///
    /// # Errors
    ///
    /// [`Scan::EndOfInput`] if the cursor is exhausted.
    #[inline]
    pub fn advance(&mut self) -> Result<char, Scan> {
        let ch = self.peek()?;
        self.offset += 1;
        Ok(ch)
    }

    /// Steps back over the last consumed character. Does nothing at the
    /// start of the line.
    #[inline]
    pub fn pushback(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.offset)
    }

    /// Rewinds (or fast-forwards) to a previously taken snapshot.
    #[inline]
    pub fn restore(&mut self, Snapshot(offset): Snapshot) {
        debug_assert!(offset <= self.chars.len());
        self.offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_until_end() {
        let mut cursor = Cursor::new("７六");
        assert_eq!(cursor.advance(), Ok('７'));
        assert_eq!(cursor.advance(), Ok('六'));
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), Err(Scan::EndOfInput));
        assert_eq!(cursor.advance(), Err(Scan::EndOfInput));
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn test_pushback_at_start_is_noop() {
        let mut cursor = Cursor::new("abc");
        cursor.pushback();
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.advance(), Ok('a'));
        cursor.pushback();
        cursor.pushback();
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.peek(), Ok('a'));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut cursor = Cursor::new("すもも");
        let start = cursor.snapshot();
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert_eq!(cursor.remaining(), &['も']);
        cursor.restore(start);
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.remaining().len(), 3);
    }

    #[test]
    fn test_empty() {
        let cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), Err(Scan::EndOfInput));
    }
}
