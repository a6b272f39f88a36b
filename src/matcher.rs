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

//! Token matchers built on [`Cursor`].
//!
//! Every matcher either consumes exactly the token it recognized or leaves
//! the cursor where it was. Alternatives are tried in order and the first
//! match wins, so vocabularies must not list an entry after another entry
//! that is a prefix of it.

use std::{error, fmt};

use arrayvec::ArrayVec;

use crate::{
    cursor::{Cursor, Scan},
    util::is_kif_space,
};

/// One accepted spelling of a vocabulary word.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Spelling<T> {
    pub text: &'static str,
    pub value: T,
}

impl<T> Spelling<T> {
    pub const fn new(text: &'static str, value: T) -> Spelling<T> {
        Spelling { text, value }
    }
}

impl<T> AsRef<str> for Spelling<T> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

/// Error when reading a run of digits.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReadNumberError {
    /// No digit at the cursor.
    Scan(Scan),
    /// A numeric character that is not a decimal digit, or a value that
    /// does not fit.
    Invalid,
}

impl From<Scan> for ReadNumberError {
    fn from(scan: Scan) -> ReadNumberError {
        ReadNumberError::Scan(scan)
    }
}

impl fmt::Display for ReadNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ReadNumberError::Scan(scan) => fmt::Display::fmt(&scan, f),
            ReadNumberError::Invalid => f.write_str("invalid number"),
        }
    }
}

impl error::Error for ReadNumberError {}

fn ascii_digit(ch: char) -> Option<u8> {
    match ch {
        '0'..='9' => Some(ch as u8),
        '０'..='９' => Some(b'0' + (u32::from(ch) - u32::from('０')) as u8),
        _ => None,
    }
}

impl Cursor {
    /// Consumes `expected` if it is the next character.
    ///
    /// # Errors
    ///
    /// [`Scan::Mismatch`] leaves the cursor unchanged. [`Scan::EndOfInput`]
    /// if there is nothing left.
    pub fn eat_char(&mut self, expected: char) -> Result<(), Scan> {
        if self.advance()? == expected {
            Ok(())
        } else {
            self.pushback();
            Err(Scan::Mismatch)
        }
    }

    /// Consumes the literal `expected`, all or nothing.
    ///
    /// Running out of input part way through is a [`Scan::Mismatch`]:
    /// [`Scan::EndOfInput`] is only reported when the cursor was already
    /// exhausted.
    ///
    /// # Examples
    ///
    /// ```
    /// use kif::cursor::{Cursor, Scan};
    ///
    /// let mut cursor = Cursor::new("すもももももももものうち");
    /// assert_eq!(cursor.eat_str("すもも"), Ok(()));
    /// assert_eq!(cursor.eat_str("ももい"), Err(Scan::Mismatch));
    /// assert_eq!(cursor.offset(), 3);
    /// ```
    pub fn eat_str(&mut self, expected: &str) -> Result<(), Scan> {
        self.peek()?;
        let start = self.snapshot();
        for ch in expected.chars() {
            match self.advance() {
                Ok(actual) if actual == ch => (),
                _ => {
                    self.restore(start);
                    return Err(Scan::Mismatch);
                }
            }
        }
        Ok(())
    }

    /// Tries each candidate in order and returns the index of the first
    /// that matches.
    ///
    /// # Errors
    ///
    /// [`Scan::Mismatch`] if no candidate matches, [`Scan::EndOfInput`] if
    /// the cursor is exhausted.
    pub fn eat_first_of<S: AsRef<str>>(&mut self, candidates: &[S]) -> Result<usize, Scan> {
        self.peek()?;
        candidates
            .iter()
            .position(|candidate| self.eat_str(candidate.as_ref()).is_ok())
            .ok_or(Scan::Mismatch)
    }

    /// Consumes one character from `alphabet` and returns its index.
    pub fn eat_first_of_chars(&mut self, alphabet: &[char]) -> Result<usize, Scan> {
        let ch = self.advance()?;
        match alphabet.iter().position(|&c| c == ch) {
            Some(index) => Ok(index),
            None => {
                self.pushback();
                Err(Scan::Mismatch)
            }
        }
    }

    pub(crate) fn eat_spelling<T: Copy>(&mut self, spellings: &[Spelling<T>]) -> Result<T, Scan> {
        self.eat_first_of(spellings).map(|index| spellings[index].value)
    }

    /// Consumes the longest run of numeric characters and reads it as a
    /// decimal number. Full-width digits are accepted.
    ///
    /// # Errors
    ///
    /// [`ReadNumberError::Scan`] if the next character is not numeric (zero
    /// digits is not zero). [`ReadNumberError::Invalid`] if the run
    /// contains a numeric character other than a decimal digit, or does not
    /// fit into `u32`. The cursor is left unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use kif::cursor::{Cursor, Scan};
    /// use kif::matcher::ReadNumberError;
    ///
    /// let mut cursor = Cursor::new("45abc");
    /// assert_eq!(cursor.read_digits(), Ok(45));
    /// assert_eq!(cursor.offset(), 2);
    ///
    /// let mut cursor = Cursor::new("abc");
    /// assert_eq!(cursor.read_digits(), Err(ReadNumberError::Scan(Scan::Mismatch)));
    /// ```
    pub fn read_digits(&mut self) -> Result<u32, ReadNumberError> {
        let start = self.snapshot();
        let mut buf = ArrayVec::<u8, 20>::new();

        while let Ok(ch) = self.peek() {
            if !ch.is_numeric() {
                break;
            }
            let digit = match ascii_digit(ch) {
                Some(digit) => digit,
                None => {
                    self.restore(start);
                    return Err(ReadNumberError::Invalid);
                }
            };
            if buf.try_push(digit).is_err() {
                self.restore(start);
                return Err(ReadNumberError::Invalid);
            }
            self.advance()?;
        }

        if buf.is_empty() {
            return Err(ReadNumberError::Scan(match self.peek() {
                Ok(_) => Scan::Mismatch,
                Err(scan) => scan,
            }));
        }

        btoi::btou(&buf).map_err(|_| {
            self.restore(start);
            ReadNumberError::Invalid
        })
    }

    /// Skips spaces, full-width spaces and tabs.
    pub fn skip_spaces(&mut self) {
        while self.peek().is_ok_and(is_kif_space) {
            let _ = self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eat_str_rewinds() {
        let mut cursor = Cursor::new("すもももももももものうち");
        assert_eq!(cursor.eat_str("すもも"), Ok(()));
        assert_eq!(cursor.eat_str("ももい"), Err(Scan::Mismatch));
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.eat_str("もももももものうちだ"), Err(Scan::Mismatch));
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.eat_str("もももももものうち"), Ok(()));
        assert_eq!(cursor.eat_str("も"), Err(Scan::EndOfInput));
    }

    #[test]
    fn test_eat_char() {
        let mut cursor = Cursor::new("▲７");
        assert_eq!(cursor.eat_char('△'), Err(Scan::Mismatch));
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.eat_char('▲'), Ok(()));
        assert_eq!(cursor.eat_char('７'), Ok(()));
        assert_eq!(cursor.eat_char('７'), Err(Scan::EndOfInput));
    }

    #[test]
    fn test_eat_first_of_order() {
        let mut cursor = Cursor::new("成銀");
        assert_eq!(cursor.eat_first_of(&["銀", "成銀", "成"]), Ok(1));
        assert!(cursor.is_at_end());

        let mut cursor = Cursor::new("成銀");
        assert_eq!(cursor.eat_first_of(&["成", "成銀"]), Ok(0));
        assert_eq!(cursor.offset(), 1);

        let mut cursor = Cursor::new("金");
        assert_eq!(cursor.eat_first_of(&["銀", "成銀"]), Err(Scan::Mismatch));
        assert_eq!(cursor.offset(), 0);

        let mut cursor = Cursor::new("");
        assert_eq!(cursor.eat_first_of(&["銀"]), Err(Scan::EndOfInput));
    }

    #[test]
    fn test_eat_first_of_chars() {
        let mut cursor = Cursor::new("8x");
        assert_eq!(cursor.eat_first_of_chars(&['1', '2', '8']), Ok(2));
        assert_eq!(cursor.eat_first_of_chars(&['1', '2', '8']), Err(Scan::Mismatch));
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn test_read_digits() {
        let mut cursor = Cursor::new("45abc");
        assert_eq!(cursor.read_digits(), Ok(45));
        assert_eq!(cursor.peek(), Ok('a'));

        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.read_digits(), Err(ReadNumberError::Scan(Scan::Mismatch)));
        assert_eq!(cursor.offset(), 0);

        let mut cursor = Cursor::new("");
        assert_eq!(cursor.read_digits(), Err(ReadNumberError::Scan(Scan::EndOfInput)));

        let mut cursor = Cursor::new("１２3");
        assert_eq!(cursor.read_digits(), Ok(123));
        assert!(cursor.is_at_end());

        let mut cursor = Cursor::new("007");
        assert_eq!(cursor.read_digits(), Ok(7));
    }

    #[test]
    fn test_read_digits_invalid() {
        let mut cursor = Cursor::new("1②");
        assert_eq!(cursor.read_digits(), Err(ReadNumberError::Invalid));
        assert_eq!(cursor.offset(), 0);

        let mut cursor = Cursor::new("99999999999");
        assert_eq!(cursor.read_digits(), Err(ReadNumberError::Invalid));
        assert_eq!(cursor.offset(), 0);

        let mut cursor = Cursor::new("1".repeat(21).as_str());
        assert_eq!(cursor.read_digits(), Err(ReadNumberError::Invalid));
    }

    #[test]
    fn test_skip_spaces() {
        let mut cursor = Cursor::new(" 　\t７");
        cursor.skip_spaces();
        assert_eq!(cursor.peek(), Ok('７'));
        cursor.skip_spaces();
        assert_eq!(cursor.offset(), 3);
    }
}
