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

//! Parse and write moves in the Universal Shogi Interface representation,
//! as used in SFEN move lists.
//!
//! # Examples
//!
//! ```
//! use kif::{usi::UsiMove, PieceKind, Square, Step};
//!
//! let step = Step {
//!     seq: 1,
//!     src: Square::new(7, 7),
//!     dst: Square::new(7, 6),
//!     piece: Some(PieceKind::Pawn),
//!     ..Step::default()
//! };
//! let usi = UsiMove::from(&step);
//! assert_eq!(usi.to_string(), "7g7f");
//! assert_eq!("7g7f".parse::<UsiMove>(), Ok(usi));
//! ```
//!
//! Drops name the piece in front of `*`:
//!
//! ```
//! use kif::usi::UsiMove;
//!
//! let usi: UsiMove = "P*5e".parse()?;
//! assert!(matches!(usi, UsiMove::Put { .. }));
//! # Ok::<_, kif::usi::ParseUsiError>(())
//! ```

use std::{error, fmt, str::FromStr};

use crate::{util::AppendText, Modifier, PieceKind, Square, Step};

/// Error when parsing an invalid USI move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUsiError;

impl fmt::Display for ParseUsiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid usi")
    }
}

impl error::Error for ParseUsiError {}

/// A move as represented in USI. A missing square is written as `*`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum UsiMove {
    /// A piece moving on the board, like `7g7f` or `8h2b+`.
    Normal {
        from: Option<Square>,
        to: Option<Square>,
        promotion: bool,
    },
    /// A piece dropped from the hand, like `P*5e`.
    Put {
        piece: PieceKind,
        to: Option<Square>,
    },
}

fn append_square_to<W: AppendText>(sq: Option<Square>, f: &mut W) -> Result<(), W::Error> {
    match sq {
        Some(sq) => sq.append_usi_to(f),
        None => f.append_char('*'),
    }
}

fn split_square(s: &[u8]) -> Result<(Option<Square>, &[u8]), ParseUsiError> {
    match s {
        [b'*', rest @ ..] => Ok((None, rest)),
        [file, rank, rest @ ..] => {
            let sq = Square::from_usi(&[*file, *rank]).map_err(|_| ParseUsiError)?;
            Ok((Some(sq), rest))
        }
        _ => Err(ParseUsiError),
    }
}

impl UsiMove {
    /// Parses a USI move from ASCII.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUsiError`] if `usi` is not a syntactically valid move.
    pub fn from_ascii(usi: &[u8]) -> Result<UsiMove, ParseUsiError> {
        let letter_len = match usi {
            [b'+', letter, ..] if letter.is_ascii_uppercase() => 2,
            [letter, ..] if letter.is_ascii_uppercase() => 1,
            _ => 0,
        };
        if letter_len > 0 {
            let piece = PieceKind::from_usi_letter(&usi[..letter_len]).ok_or(ParseUsiError)?;
            let (to, rest) = match &usi[letter_len..] {
                [b'*', square @ ..] => split_square(square)?,
                _ => return Err(ParseUsiError),
            };
            return if rest.is_empty() {
                Ok(UsiMove::Put { piece, to })
            } else {
                Err(ParseUsiError)
            };
        }

        let (body, promotion) = match usi.split_last() {
            Some((b'+', body)) => (body, true),
            _ => (usi, false),
        };
        let (from, rest) = split_square(body)?;
        let (to, rest) = split_square(rest)?;
        if !rest.is_empty() {
            return Err(ParseUsiError);
        }
        Ok(UsiMove::Normal {
            from,
            to,
            promotion,
        })
    }

    pub(crate) fn append_to<W: AppendText>(self, f: &mut W) -> Result<(), W::Error> {
        match self {
            UsiMove::Normal {
                from,
                to,
                promotion,
            } => {
                append_square_to(from, f)?;
                append_square_to(to, f)?;
                if promotion {
                    f.append_char('+')?;
                }
                Ok(())
            }
            UsiMove::Put { piece, to } => {
                f.append_str(piece.usi_letter())?;
                f.append_char('*')?;
                append_square_to(to, f)
            }
        }
    }
}

impl From<&Step> for UsiMove {
    fn from(step: &Step) -> UsiMove {
        match (step.modifier, step.piece) {
            (Some(Modifier::Dropped), Some(piece)) => UsiMove::Put {
                piece,
                to: step.dst,
            },
            _ => UsiMove::Normal {
                from: step.src,
                to: step.dst,
                promotion: step.modifier == Some(Modifier::Promote),
            },
        }
    }
}

impl FromStr for UsiMove {
    type Err = ParseUsiError;

    fn from_str(usi: &str) -> Result<UsiMove, ParseUsiError> {
        UsiMove::from_ascii(usi.as_bytes())
    }
}

impl fmt::Display for UsiMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}
