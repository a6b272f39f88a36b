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

use std::{error, fmt, str::FromStr};

use crate::util::AppendText;

/// Full-width file digits, `１` to `９`.
pub(crate) const FILE_GLYPHS: [char; 9] = ['１', '２', '３', '４', '５', '６', '７', '８', '９'];

/// Kanji rank numerals, `一` to `九`.
pub(crate) const RANK_GLYPHS: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Error when parsing an invalid square.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square")
    }
}

impl error::Error for ParseSquareError {}

/// A square of the 9x9 shogi board.
///
/// Files (`x`) are counted from the right edge as seen by black, ranks (`y`)
/// from the top. Both are in `1..=9`, so there is no "empty" square value:
/// an unset position is `None`.
///
/// # Examples
///
/// ```
/// use kif::Square;
///
/// let sq = Square::new(7, 6).expect("on the board");
/// assert_eq!(sq.to_string(), "７六");
/// assert_eq!("７六".parse::<Square>(), Ok(sq));
///
/// assert_eq!(Square::new(0, 0), None);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SquareRepr", into = "SquareRepr"))]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Gets the square at `file`, `rank`. Returns `None` unless both
    /// coordinates are in `1..=9`.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        if 1 <= file && file <= 9 && 1 <= rank && rank <= 9 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// The file (`x`), `1..=9`.
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// The rank (`y`), `1..=9`.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// All 81 squares, file-major.
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=9).flat_map(|file| (1..=9).map(move |rank| Square { file, rank }))
    }

    /// The full-width digit for the file, like `７`.
    #[inline]
    pub const fn file_glyph(self) -> char {
        FILE_GLYPHS[self.file as usize - 1]
    }

    /// The kanji numeral for the rank, like `六`.
    #[inline]
    pub const fn rank_glyph(self) -> char {
        RANK_GLYPHS[self.rank as usize - 1]
    }

    /// Parses the two-glyph KIF form, like `７六`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] unless `s` is exactly one file glyph
    /// followed by one rank glyph.
    pub fn from_kif(s: &str) -> Result<Square, ParseSquareError> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseSquareError);
        };
        let file = FILE_GLYPHS.iter().position(|&g| g == file).ok_or(ParseSquareError)?;
        let rank = RANK_GLYPHS.iter().position(|&g| g == rank).ok_or(ParseSquareError)?;
        Square::new(file as u8 + 1, rank as u8 + 1).ok_or(ParseSquareError)
    }

    /// Parses the USI form: a file digit and a rank letter `a` to `i`,
    /// like `7f`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if `ascii` is not a USI square.
    pub fn from_usi(ascii: &[u8]) -> Result<Square, ParseSquareError> {
        match *ascii {
            [file @ b'1'..=b'9', rank @ b'a'..=b'i'] => {
                Square::new(file - b'0', rank - b'a' + 1).ok_or(ParseSquareError)
            }
            _ => Err(ParseSquareError),
        }
    }

    /// The USI rank letter, `a` for rank 1 through `i` for rank 9.
    #[inline]
    pub const fn usi_rank_char(self) -> char {
        (b'a' + self.rank - 1) as char
    }

    pub(crate) fn append_kif_to<W: AppendText>(self, f: &mut W) -> Result<(), W::Error> {
        f.append_char(self.file_glyph())?;
        f.append_char(self.rank_glyph())
    }

    pub(crate) fn append_usi_to<W: AppendText>(self, f: &mut W) -> Result<(), W::Error> {
        f.append_char((b'0' + self.file) as char)?;
        f.append_char(self.usi_rank_char())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_kif_to(f)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_kif(s)
    }
}

/// Interchange shape of a square, `{x, y}`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SquareRepr {
    x: u8,
    y: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<SquareRepr> for Square {
    type Error = ParseSquareError;

    fn try_from(repr: SquareRepr) -> Result<Square, ParseSquareError> {
        Square::new(repr.x, repr.y).ok_or(ParseSquareError)
    }
}

#[cfg(feature = "serde")]
impl From<Square> for SquareRepr {
    fn from(sq: Square) -> SquareRepr {
        SquareRepr {
            x: sq.file,
            y: sq.rank,
        }
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Square> {
        Ok(Square {
            file: u.int_in_range(1..=9)?,
            rank: u.int_in_range(1..=9)?,
        })
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (2, Some(2))
    }
}
