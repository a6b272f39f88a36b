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

//! Parse a single KIF step line.
//!
//! A step line reads, left to right:
//!
//! ```text
//!   73 ▲７八金打   ( 0:00/00:00:00)
//!   ^^ ^ ^^^^^^^   ^^^^^^^^^^^^^^^^
//!   |  | |         thinking / elapsed time
//!   |  | move: destination, piece, modifier, source, or a game-end word
//!   |  optional phase marker
//!   step number
//! ```

use std::{error, fmt};

use crate::{
    cursor::{Cursor, Scan},
    matcher::{ReadNumberError, Spelling},
    piece::PIECE_SPELLINGS,
    square::{FILE_GLYPHS, RANK_GLYPHS},
    status::STATUS_SPELLINGS,
    step::{Modifier, PHASE_GLYPHS},
    Square, Step, Timestamp,
};

/// Error when parsing a step line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParseStepError {
    /// Missing step number.
    Seq,
    /// Missing move.
    Move,
    /// Unknown piece name.
    Piece,
    /// Malformed destination square.
    Square,
    /// Source square on a drop.
    Source,
    /// Malformed time group.
    Timestamp,
    /// Numeric text that is not a decimal number, or out of range.
    InvalidNumber,
    /// `同` on the first step.
    SameSquareWithoutPrevious,
}

impl fmt::Display for ParseStepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseStepError::Seq => "expected step number",
            ParseStepError::Move => "expected move",
            ParseStepError::Piece => "unknown piece",
            ParseStepError::Square => "invalid destination square",
            ParseStepError::Source => "source square on a drop",
            ParseStepError::Timestamp => "invalid time group",
            ParseStepError::InvalidNumber => "invalid number",
            ParseStepError::SameSquareWithoutPrevious => "same square without a previous step",
        })
    }
}

impl error::Error for ParseStepError {}

/// Spellings of "same square as the previous step", longest first.
const SAME_SQUARE: [&str; 3] = ["同　", "同 ", "同"];

const MODIFIER_SPELLINGS: [Spelling<Option<Modifier>>; 3] = [
    Spelling::new("成", Some(Modifier::Promote)),
    Spelling::new("打", Some(Modifier::Dropped)),
    Spelling::new("不成", None),
];

const SOURCE_DIGITS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

struct StepParser {
    cursor: Cursor,
    prev_dst: Option<Square>,
}

impl StepParser {
    fn new(line: &str, prev_dst: Option<Square>) -> StepParser {
        StepParser {
            cursor: Cursor::new(line),
            prev_dst,
        }
    }

    fn parse(mut self) -> Result<Step, ParseStepError> {
        let mut step = Step::default();

        self.cursor.skip_spaces();
        step.seq = self.read_seq()?;
        self.cursor.skip_spaces();
        self.skip_phase();
        self.read_move(&mut step)?;
        self.cursor.skip_spaces();
        self.read_timestamp(&mut step)?;

        if !self.cursor.is_at_end() {
            let trailing: String = self.cursor.remaining().iter().collect();
            tracing::warn!(seq = step.seq, %trailing, "ignoring text after step");
        }

        Ok(step)
    }

    fn read_seq(&mut self) -> Result<u32, ParseStepError> {
        self.cursor.read_digits().map_err(|err| match err {
            ReadNumberError::Invalid => ParseStepError::InvalidNumber,
            ReadNumberError::Scan(_) => ParseStepError::Seq,
        })
    }

    fn skip_phase(&mut self) {
        // the side to move follows from the step number
        let _ = self.cursor.eat_first_of_chars(&PHASE_GLYPHS);
    }

    fn read_move(&mut self, step: &mut Step) -> Result<(), ParseStepError> {
        match self.cursor.eat_spelling(&STATUS_SPELLINGS) {
            Ok(status) => {
                step.finished_status = status;
                return Ok(());
            }
            Err(Scan::Mismatch) => (),
            Err(Scan::EndOfInput) => return Err(ParseStepError::Move),
        }

        step.dst = Some(self.read_dst()?);
        step.piece = Some(
            self.cursor
                .eat_spelling(&PIECE_SPELLINGS)
                .map_err(|_| ParseStepError::Piece)?,
        );
        step.modifier = self.cursor.eat_spelling(&MODIFIER_SPELLINGS).ok().flatten();
        step.src = self.read_src();

        if step.modifier == Some(Modifier::Dropped) && step.src.is_some() {
            return Err(ParseStepError::Source);
        }
        Ok(())
    }

    fn read_dst(&mut self) -> Result<Square, ParseStepError> {
        if self.cursor.eat_first_of(&SAME_SQUARE).is_ok() {
            return self.prev_dst.ok_or(ParseStepError::SameSquareWithoutPrevious);
        }

        let file = self
            .cursor
            .eat_first_of_chars(&FILE_GLYPHS)
            .map_err(|_| ParseStepError::Square)?;
        let rank = self
            .cursor
            .eat_first_of_chars(&RANK_GLYPHS)
            .map_err(|_| ParseStepError::Square)?;
        Square::new(file as u8 + 1, rank as u8 + 1).ok_or(ParseStepError::Square)
    }

    /// Reads `(XY)`. Anything else is left for the time group.
    fn read_src(&mut self) -> Option<Square> {
        let start = self.cursor.snapshot();
        let src = self.try_read_src();
        if src.is_none() {
            self.cursor.restore(start);
        }
        src
    }

    fn try_read_src(&mut self) -> Option<Square> {
        self.cursor.eat_char('(').ok()?;
        let file = self.cursor.eat_first_of_chars(&SOURCE_DIGITS).ok()?;
        let rank = self.cursor.eat_first_of_chars(&SOURCE_DIGITS).ok()?;
        self.cursor.eat_char(')').ok()?;
        Square::new(file as u8 + 1, rank as u8 + 1)
    }

    fn read_timestamp(&mut self, step: &mut Step) -> Result<(), ParseStepError> {
        if self.cursor.is_at_end() {
            return Ok(());
        }

        let Timestamp {
            thinking_sec,
            elapsed_sec,
        } = Timestamp::read(&mut self.cursor).map_err(|err| match err {
            ReadNumberError::Invalid => ParseStepError::InvalidNumber,
            ReadNumberError::Scan(_) => ParseStepError::Timestamp,
        })?;

        step.thinking_sec = thinking_sec;
        step.elapsed_sec = elapsed_sec;
        Ok(())
    }
}

impl Step {
    /// Parses one step line.
    ///
    /// `prev_dst` is the destination of the previous step, which a `同`
    /// destination refers to.
    ///
    /// # Errors
    ///
    /// Returns [`ParseStepError`] if the line is not a valid step.
    ///
    /// # Examples
    ///
    /// ```
    /// use kif::{Modifier, PieceKind, Square, Step};
    ///
    /// let step = Step::from_kif_line("  73 ７八金打   ( 0:00/00:00:00)", None)?;
    /// assert_eq!(step.seq, 73);
    /// assert_eq!(step.dst, Square::new(7, 8));
    /// assert_eq!(step.piece, Some(PieceKind::Gold));
    /// assert_eq!(step.modifier, Some(Modifier::Dropped));
    /// assert_eq!(step.src, None);
    /// # Ok::<_, kif::ParseStepError>(())
    /// ```
    pub fn from_kif_line(line: &str, prev_dst: Option<Square>) -> Result<Step, ParseStepError> {
        StepParser::new(line, prev_dst).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FinishedStatus, PieceKind};

    fn sq(file: u8, rank: u8) -> Option<Square> {
        Square::new(file, rank)
    }

    #[test]
    fn test_drop() {
        let step = Step::from_kif_line("  73 ７八金打   ( 0:00/00:00:00)", None).unwrap();
        assert_eq!(
            step,
            Step {
                seq: 73,
                dst: sq(7, 8),
                piece: Some(PieceKind::Gold),
                modifier: Some(Modifier::Dropped),
                ..Step::default()
            }
        );
    }

    #[test]
    fn test_synonym_with_source() {
        let step = Step::from_kif_line("  1 ７八成銀(69)   ( 0:10/00:00:00)", None).unwrap();
        assert_eq!(step.seq, 1);
        assert_eq!(step.dst, sq(7, 8));
        assert_eq!(step.piece, Some(PieceKind::NariGin));
        assert_eq!(step.src, sq(6, 9));
        assert_eq!(step.modifier, None);
        assert_eq!(step.thinking_sec, 10);
        assert_eq!(step.elapsed_sec, 0);

        let step = Step::from_kif_line("  1 ７八全(69)   ( 0:10/00:00:00)", None).unwrap();
        assert_eq!(step.piece, Some(PieceKind::NariGin));
    }

    #[test]
    fn test_move_without_timestamp() {
        let step = Step::from_kif_line("1 ７六歩(77)", None).unwrap();
        assert_eq!(step.src, sq(7, 7));
        assert_eq!(step.dst, sq(7, 6));
        assert_eq!(step.piece, Some(PieceKind::Pawn));
        assert_eq!(step.thinking_sec, 0);
    }

    #[test]
    fn test_phase_marker() {
        let step = Step::from_kif_line("2 △３四歩(33)", None).unwrap();
        assert_eq!(step.dst, sq(3, 4));
        let step = Step::from_kif_line("3 ▲２二角成(88)", None).unwrap();
        assert_eq!(step.piece, Some(PieceKind::Bishop));
        assert_eq!(step.modifier, Some(Modifier::Promote));
        assert_eq!(step.src, sq(8, 8));
    }

    #[test]
    fn test_not_promote() {
        let step = Step::from_kif_line("23 ２三銀不成(34)", None).unwrap();
        assert_eq!(step.piece, Some(PieceKind::Silver));
        assert_eq!(step.modifier, None);
        assert_eq!(step.src, sq(3, 4));
    }

    #[test]
    fn test_finished() {
        let step = Step::from_kif_line("投了", None);
        assert_eq!(step, Err(ParseStepError::Seq));

        let step = Step::from_kif_line("  97 投了", None).unwrap();
        assert_eq!(step.finished_status, FinishedStatus::Surrender);
        assert_eq!(step.src, None);
        assert_eq!(step.dst, None);
        assert_eq!(step.piece, None);
        assert_eq!(step.modifier, None);

        let step = Step::from_kif_line("  98 △詰み   ( 0:03/00:10:08)", None).unwrap();
        assert_eq!(step.finished_status, FinishedStatus::Checkmate);
        assert_eq!(step.thinking_sec, 3);
        assert_eq!(step.elapsed_sec, 608);
    }

    #[test]
    fn test_same_square() {
        let prev = sq(7, 6);
        for line in ["  3 同　歩(77)", "  3 同 歩(77)", "  3 同歩(77)"] {
            let step = Step::from_kif_line(line, prev).unwrap();
            assert_eq!(step.dst, prev, "{line:?}");
            assert_eq!(step.piece, Some(PieceKind::Pawn));
            assert_eq!(step.src, sq(7, 7));
        }

        assert_eq!(
            Step::from_kif_line("  1 同　歩(77)", None),
            Err(ParseStepError::SameSquareWithoutPrevious)
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(Step::from_kif_line("", None), Err(ParseStepError::Seq));
        assert_eq!(Step::from_kif_line("   ", None), Err(ParseStepError::Seq));
        assert_eq!(Step::from_kif_line("12", None), Err(ParseStepError::Move));
        assert_eq!(Step::from_kif_line("12 ", None), Err(ParseStepError::Move));
        assert_eq!(Step::from_kif_line("1 ７六", None), Err(ParseStepError::Piece));
        assert_eq!(Step::from_kif_line("1 ７六X", None), Err(ParseStepError::Piece));
        assert_eq!(Step::from_kif_line("1 76歩", None), Err(ParseStepError::Square));
        assert_eq!(Step::from_kif_line("1 ７歩", None), Err(ParseStepError::Square));
        assert_eq!(Step::from_kif_line("1 ５五歩打(56)", None), Err(ParseStepError::Source));
        assert_eq!(
            Step::from_kif_line("1 ７六歩(77) ( 0:1x/00:00:00)", None),
            Err(ParseStepError::Timestamp)
        );
        assert_eq!(
            Step::from_kif_line("1 ７六歩(77) ( 0:01/00:00:00", None),
            Err(ParseStepError::Timestamp)
        );
        assert_eq!(
            Step::from_kif_line("1 ７六歩(7x)", None),
            Err(ParseStepError::Timestamp)
        );
        assert_eq!(Step::from_kif_line("1② ７六歩(77)", None), Err(ParseStepError::InvalidNumber));
    }

    #[test]
    fn test_trailing_text_ignored() {
        let step = Step::from_kif_line("  5 ５五角打   ( 0:02/00:00:05)+", None).unwrap();
        assert_eq!(step.dst, sq(5, 5));
        assert_eq!(step.elapsed_sec, 5);
    }

    #[test]
    fn test_render_then_parse() {
        let steps = [
            Step {
                seq: 1,
                src: sq(7, 7),
                dst: sq(7, 6),
                piece: Some(PieceKind::Pawn),
                thinking_sec: 5,
                elapsed_sec: 5,
                ..Step::default()
            },
            Step {
                seq: 40,
                dst: sq(1, 9),
                piece: Some(PieceKind::NariKyou),
                src: sq(1, 8),
                thinking_sec: 754,
                elapsed_sec: 7384,
                ..Step::default()
            },
            Step {
                seq: 41,
                finished_status: FinishedStatus::Sennichite,
                ..Step::default()
            },
        ];
        for step in steps {
            let line = format!("{:>4} {:<12} {}", step.seq, step.kif_move(), step.timestamp());
            assert_eq!(Step::from_kif_line(&line, None), Ok(step), "{line:?}");
        }
    }
}
