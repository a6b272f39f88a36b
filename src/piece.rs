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

use crate::matcher::Spelling;

/// Error when a piece name or piece id is not known.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePieceError;

impl fmt::Display for ParsePieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid piece")
    }
}

impl error::Error for ParsePieceError {}

/// Piece kinds, unpromoted and promoted.
///
/// # Examples
///
/// ```
/// use kif::PieceKind;
///
/// // Piece kinds are indexed from 1 to 14.
/// assert_eq!(u32::from(PieceKind::King), 1);
/// assert_eq!(u32::from(PieceKind::Tokin), 14);
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum PieceKind {
    King = 1,
    Rook = 2,
    /// Promoted rook.
    Ryu = 3,
    Bishop = 4,
    /// Promoted bishop.
    Uma = 5,
    Gold = 6,
    Silver = 7,
    NariGin = 8,
    Knight = 9,
    NariKei = 10,
    Lance = 11,
    NariKyou = 12,
    Pawn = 13,
    /// Promoted pawn.
    Tokin = 14,
}

/// Every spelling accepted when reading, primary spellings first and then
/// synonyms. Matching is first-wins, so no entry may be a prefix of a later
/// entry that should also match.
pub(crate) const PIECE_SPELLINGS: [Spelling<PieceKind>; 19] = [
    Spelling::new("玉", PieceKind::King),
    Spelling::new("飛", PieceKind::Rook),
    Spelling::new("龍", PieceKind::Ryu),
    Spelling::new("角", PieceKind::Bishop),
    Spelling::new("馬", PieceKind::Uma),
    Spelling::new("金", PieceKind::Gold),
    Spelling::new("銀", PieceKind::Silver),
    Spelling::new("成銀", PieceKind::NariGin),
    Spelling::new("桂", PieceKind::Knight),
    Spelling::new("成桂", PieceKind::NariKei),
    Spelling::new("香", PieceKind::Lance),
    Spelling::new("成香", PieceKind::NariKyou),
    Spelling::new("歩", PieceKind::Pawn),
    Spelling::new("と", PieceKind::Tokin),
    // synonyms
    Spelling::new("王", PieceKind::King),
    Spelling::new("竜", PieceKind::Ryu),
    Spelling::new("全", PieceKind::NariGin),
    Spelling::new("圭", PieceKind::NariKei),
    Spelling::new("杏", PieceKind::NariKyou),
];

impl PieceKind {
    /// Gets the piece kind from any accepted KIF spelling, including
    /// synonyms like `全` for `成銀`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kif::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_kif_name("成銀"), Some(PieceKind::NariGin));
    /// assert_eq!(PieceKind::from_kif_name("全"), Some(PieceKind::NariGin));
    /// assert_eq!(PieceKind::from_kif_name("X"), None);
    /// ```
    pub fn from_kif_name(name: &str) -> Option<PieceKind> {
        PIECE_SPELLINGS
            .iter()
            .find(|spelling| spelling.text == name)
            .map(|spelling| spelling.value)
    }

    /// Gets the primary KIF spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use kif::PieceKind;
    ///
    /// assert_eq!(PieceKind::NariGin.kif_name(), "成銀");
    /// assert_eq!(PieceKind::Ryu.kif_name(), "龍");
    /// ```
    pub const fn kif_name(self) -> &'static str {
        match self {
            PieceKind::King => "玉",
            PieceKind::Rook => "飛",
            PieceKind::Ryu => "龍",
            PieceKind::Bishop => "角",
            PieceKind::Uma => "馬",
            PieceKind::Gold => "金",
            PieceKind::Silver => "銀",
            PieceKind::NariGin => "成銀",
            PieceKind::Knight => "桂",
            PieceKind::NariKei => "成桂",
            PieceKind::Lance => "香",
            PieceKind::NariKyou => "成香",
            PieceKind::Pawn => "歩",
            PieceKind::Tokin => "と",
        }
    }

    /// Gets the USI piece letter, prefixed with `+` for promoted kinds.
    /// Used in front of `*` for drops.
    pub const fn usi_letter(self) -> &'static str {
        match self {
            PieceKind::King => "K",
            PieceKind::Rook => "R",
            PieceKind::Ryu => "+R",
            PieceKind::Bishop => "B",
            PieceKind::Uma => "+B",
            PieceKind::Gold => "G",
            PieceKind::Silver => "S",
            PieceKind::NariGin => "+S",
            PieceKind::Knight => "N",
            PieceKind::NariKei => "+N",
            PieceKind::Lance => "L",
            PieceKind::NariKyou => "+L",
            PieceKind::Pawn => "P",
            PieceKind::Tokin => "+P",
        }
    }

    /// Gets the piece kind from a USI piece letter (uppercase, with an
    /// optional `+` prefix).
    pub fn from_usi_letter(letter: &[u8]) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.usi_letter().as_bytes() == letter)
    }

    /// Whether this is a promoted kind.
    pub const fn is_promoted(self) -> bool {
        matches!(
            self,
            PieceKind::Ryu
                | PieceKind::Uma
                | PieceKind::NariGin
                | PieceKind::NariKei
                | PieceKind::NariKyou
                | PieceKind::Tokin
        )
    }

    /// All piece kinds, in id order.
    pub const ALL: [PieceKind; 14] = [
        PieceKind::King,
        PieceKind::Rook,
        PieceKind::Ryu,
        PieceKind::Bishop,
        PieceKind::Uma,
        PieceKind::Gold,
        PieceKind::Silver,
        PieceKind::NariGin,
        PieceKind::Knight,
        PieceKind::NariKei,
        PieceKind::Lance,
        PieceKind::NariKyou,
        PieceKind::Pawn,
        PieceKind::Tokin,
    ];
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kif_name())
    }
}

impl FromStr for PieceKind {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<PieceKind, ParsePieceError> {
        PieceKind::from_kif_name(s).ok_or(ParsePieceError)
    }
}

macro_rules! int_from_piece_kind_impl {
    ($($t:ty)+) => {
        $(impl From<PieceKind> for $t {
            #[inline]
            fn from(kind: PieceKind) -> $t {
                kind as $t
            }
        })+
    }
}

int_from_piece_kind_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

macro_rules! try_piece_kind_from_int_impl {
    ($($t:ty)+) => {
        $(impl TryFrom<$t> for PieceKind {
            type Error = ParsePieceError;

            #[inline]
            fn try_from(value: $t) -> Result<PieceKind, ParsePieceError> {
                Ok(match value {
                    1 => PieceKind::King,
                    2 => PieceKind::Rook,
                    3 => PieceKind::Ryu,
                    4 => PieceKind::Bishop,
                    5 => PieceKind::Uma,
                    6 => PieceKind::Gold,
                    7 => PieceKind::Silver,
                    8 => PieceKind::NariGin,
                    9 => PieceKind::Knight,
                    10 => PieceKind::NariKei,
                    11 => PieceKind::Lance,
                    12 => PieceKind::NariKyou,
                    13 => PieceKind::Pawn,
                    14 => PieceKind::Tokin,
                    _ => return Err(ParsePieceError),
                })
            }
        })+
    }
}

try_piece_kind_from_int_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }
