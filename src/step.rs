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

use std::fmt;

use arrayvec::ArrayString;

use crate::{util::AppendText, FinishedStatus, PieceKind, Square, Timestamp};

/// The side that made a step.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Phase {
    /// Sente, moves on odd steps.
    Black,
    /// Gote, moves on even steps.
    White,
}

/// Phase glyphs accepted in front of a move, black first.
pub(crate) const PHASE_GLYPHS: [char; 2] = ['▲', '△'];

impl Phase {
    /// Infers the side to move from the step number. Step 0 is the initial
    /// position and has no phase.
    ///
    /// # Examples
    ///
    /// ```
    /// use kif::Phase;
    ///
    /// assert_eq!(Phase::from_seq(0), None);
    /// assert_eq!(Phase::from_seq(1), Some(Phase::Black));
    /// assert_eq!(Phase::from_seq(2), Some(Phase::White));
    /// ```
    pub const fn from_seq(seq: u32) -> Option<Phase> {
        if seq == 0 {
            None
        } else if seq % 2 == 0 {
            Some(Phase::White)
        } else {
            Some(Phase::Black)
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Phase::Black => '▲',
            Phase::White => '△',
        }
    }
}

/// Promotion or drop marker after the piece name.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Modifier {
    /// `成`
    Promote,
    /// `打`, the piece comes from the hand.
    Dropped,
}

impl Modifier {
    pub const fn glyph(self) -> char {
        match self {
            Modifier::Promote => '成',
            Modifier::Dropped => '打',
        }
    }
}

/// One ply of a game record.
///
/// A step is either an ordinary move (`finished_status` is
/// [`FinishedStatus::NotFinished`]) or a game-end entry like `投了`, in which
/// case the positional fields are unset.
///
/// # Examples
///
/// ```
/// use kif::{PieceKind, Square, Step};
///
/// let step = Step {
///     seq: 1,
///     src: Square::new(7, 7),
///     dst: Square::new(7, 6),
///     piece: Some(PieceKind::Pawn),
///     ..Step::default()
/// };
/// assert_eq!(step.kif_move().to_string(), "▲７六歩(77)");
/// ```
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Step {
    pub seq: u32,
    /// Where the piece came from. `None` for drops.
    pub src: Option<Square>,
    pub dst: Option<Square>,
    pub piece: Option<PieceKind>,
    pub modifier: Option<Modifier>,
    pub finished_status: FinishedStatus,
    /// Time spent on this step.
    pub thinking_sec: u32,
    /// Total time used by both sides so far.
    pub elapsed_sec: u32,
    /// Annotation lines, verbatim and without the leading `*`.
    pub notes: Vec<String>,
}

impl Step {
    #[inline]
    pub fn phase(&self) -> Option<Phase> {
        Phase::from_seq(self.seq)
    }

    /// Whether this step ends the game.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished_status.is_finished()
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        Timestamp {
            thinking_sec: self.thinking_sec,
            elapsed_sec: self.elapsed_sec,
        }
    }

    /// Checks the structural constraints of a step: an ordinary move has a
    /// destination and a piece, a drop has no source, and a game-end entry
    /// carries no move at all.
    pub fn is_well_formed(&self) -> bool {
        if self.is_finished() {
            self.src.is_none()
                && self.dst.is_none()
                && self.piece.is_none()
                && self.modifier.is_none()
        } else {
            self.dst.is_some()
                && self.piece.is_some()
                && !(self.modifier == Some(Modifier::Dropped) && self.src.is_some())
        }
    }

    pub(crate) fn append_kif_move_to<W: AppendText>(&self, f: &mut W) -> Result<(), W::Error> {
        if let Some(phase) = self.phase() {
            f.append_char(phase.glyph())?;
        }

        if self.is_finished() {
            return f.append_str(self.finished_status.kif_word());
        }

        if let Some(dst) = self.dst {
            dst.append_kif_to(f)?;
        }
        if let Some(piece) = self.piece {
            f.append_str(piece.kif_name())?;
        }
        if let Some(modifier) = self.modifier {
            f.append_char(modifier.glyph())?;
        }
        if let Some(src) = self.src {
            f.append_char('(')?;
            f.append_char(char::from(b'0' + src.file()))?;
            f.append_char(char::from(b'0' + src.rank()))?;
            f.append_char(')')?;
        }
        Ok(())
    }

    /// The move column of a KIF step line, like `▲７六歩(77)` or `△投了`.
    /// Honors width and alignment flags.
    pub fn kif_move(&self) -> impl fmt::Display + '_ {
        KifMove(self)
    }
}

struct KifMove<'a>(&'a Step);

impl fmt::Display for KifMove<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = ArrayString::<32>::new();
        self.0.append_kif_move_to(&mut buf).map_err(|_| fmt::Error)?;
        f.pad(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Option<Square> {
        Square::new(file, rank)
    }

    #[test]
    fn test_phase() {
        assert_eq!(Phase::from_seq(73), Some(Phase::Black));
        assert_eq!(Phase::from_seq(74), Some(Phase::White));
        assert_eq!(Phase::Black.glyph(), PHASE_GLYPHS[0]);
        assert_eq!(Phase::White.glyph(), PHASE_GLYPHS[1]);
    }

    #[test]
    fn test_kif_move() {
        let step = Step {
            seq: 73,
            dst: sq(7, 8),
            piece: Some(PieceKind::Gold),
            modifier: Some(Modifier::Dropped),
            ..Step::default()
        };
        assert_eq!(step.kif_move().to_string(), "▲７八金打");

        let step = Step {
            seq: 2,
            src: sq(6, 9),
            dst: sq(7, 8),
            piece: Some(PieceKind::NariGin),
            ..Step::default()
        };
        assert_eq!(step.kif_move().to_string(), "△７八成銀(69)");

        let step = Step {
            seq: 5,
            src: sq(8, 8),
            dst: sq(2, 2),
            piece: Some(PieceKind::Bishop),
            modifier: Some(Modifier::Promote),
            ..Step::default()
        };
        assert_eq!(step.kif_move().to_string(), "▲２二角成(88)");
    }

    #[test]
    fn test_kif_move_finished() {
        let step = Step {
            seq: 4,
            finished_status: FinishedStatus::Surrender,
            ..Step::default()
        };
        assert_eq!(step.kif_move().to_string(), "△投了");

        // positional fields are ignored once the game ended
        let step = Step {
            seq: 0,
            dst: sq(5, 5),
            piece: Some(PieceKind::King),
            finished_status: FinishedStatus::Abort,
            ..Step::default()
        };
        assert_eq!(step.kif_move().to_string(), "中断");
    }

    #[test]
    fn test_kif_move_padding() {
        let step = Step {
            seq: 1,
            src: sq(7, 7),
            dst: sq(7, 6),
            piece: Some(PieceKind::Pawn),
            ..Step::default()
        };
        assert_eq!(format!("{:<12}|", step.kif_move()), "▲７六歩(77)    |");
    }

    #[test]
    fn test_well_formed() {
        let mut step = Step {
            seq: 1,
            dst: sq(5, 5),
            piece: Some(PieceKind::Pawn),
            modifier: Some(Modifier::Dropped),
            ..Step::default()
        };
        assert!(step.is_well_formed());
        step.src = sq(5, 6);
        assert!(!step.is_well_formed());
        step.modifier = None;
        assert!(step.is_well_formed());
        step.dst = None;
        assert!(!step.is_well_formed());

        let step = Step {
            finished_status: FinishedStatus::Checkmate,
            ..Step::default()
        };
        assert!(step.is_well_formed());
    }
}
