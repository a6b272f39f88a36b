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

use std::{convert::Infallible, fmt};

use arrayvec::{ArrayString, CapacityError};

/// Sink for rendered notation. Lets the same rendering code target a
/// `String`, a `fmt::Formatter` or a fixed-size `ArrayString`.
pub(crate) trait AppendText {
    type Error;

    fn append_char(&mut self, ch: char) -> Result<(), Self::Error>;

    fn append_str(&mut self, s: &str) -> Result<(), Self::Error>;
}

impl AppendText for String {
    type Error = Infallible;

    #[inline]
    fn append_char(&mut self, ch: char) -> Result<(), Self::Error> {
        self.push(ch);
        Ok(())
    }

    #[inline]
    fn append_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.push_str(s);
        Ok(())
    }
}

impl AppendText for fmt::Formatter<'_> {
    type Error = fmt::Error;

    #[inline]
    fn append_char(&mut self, ch: char) -> Result<(), Self::Error> {
        fmt::Write::write_char(self, ch)
    }

    #[inline]
    fn append_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_str(s)
    }
}

impl<const CAP: usize> AppendText for ArrayString<CAP> {
    type Error = CapacityError;

    #[inline]
    fn append_char(&mut self, ch: char) -> Result<(), Self::Error> {
        self.try_push(ch).map_err(CapacityError::simplify)
    }

    #[inline]
    fn append_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.try_push_str(s).map_err(CapacityError::simplify)
    }
}

/// Whitespace between KIF tokens: ASCII space, full-width space and tab.
#[inline]
pub(crate) const fn is_kif_space(ch: char) -> bool {
    matches!(ch, ' ' | '\u{3000}' | '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_array_string_capacity() {
        let mut s = ArrayString::<2>::new();
        assert!(s.append_str("7g").is_ok());
        assert!(s.append_char('+').is_err());
        assert_eq!(s.as_str(), "7g");
    }

    #[test]
    fn test_kif_space() {
        assert!(is_kif_space(' '));
        assert!(is_kif_space('　'));
        assert!(is_kif_space('\t'));
        assert!(!is_kif_space('\n'));
        assert!(!is_kif_space('７'));
    }
}
