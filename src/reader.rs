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

//! Assemble a [`Record`] from a whole KIF document.
//!
//! A document is a block of `name：value` header lines, then a block of step
//! lines. The header block ends at the first blank line, which is consumed,
//! or at the first line without a full-width colon, which becomes the first
//! line of the step block. Lines starting with `#` are comments anywhere.
//!
//! In the step block a line starting with `*` is a note for the preceding
//! step. Once a step has ended the game, every following line is a note.

use std::{error, fmt};

use crate::{parser::ParseStepError, util::is_kif_space, Header, Record, Step};

const BOM: char = '\u{feff}';

/// The column banner written above the steps.
pub(crate) const BANNER: &str = "手数----指手---------消費時間--";

/// What went wrong on a line, see [`ParseKifError`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseKifErrorKind {
    /// The line is not a valid step.
    Step(ParseStepError),
    /// A `*` note before the first step.
    DanglingNote,
}

/// Error when reading a KIF document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseKifError {
    /// 1-based line number.
    pub line: usize,
    /// The offending line.
    pub text: String,
    pub kind: ParseKifErrorKind,
}

impl fmt::Display for ParseKifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseKifErrorKind::Step(ref err) => {
                write!(f, "line {}: {}: {:?}", self.line, err, self.text)
            }
            ParseKifErrorKind::DanglingNote => {
                write!(f, "line {}: note before first step: {:?}", self.line, self.text)
            }
        }
    }
}

impl error::Error for ParseKifError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind {
            ParseKifErrorKind::Step(ref err) => Some(err),
            ParseKifErrorKind::DanglingNote => None,
        }
    }
}

/// Lines of a document with one line of lookahead.
#[derive(Debug)]
struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    pushed_back: Option<&'a str>,
    line_no: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> LineReader<'a> {
        LineReader {
            lines: text.strip_prefix(BOM).unwrap_or(text).lines(),
            pushed_back: None,
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.pushed_back.take().or_else(|| self.lines.next())?;
        self.line_no += 1;
        Some(line)
    }

    /// Returns the last line to the reader. Holds at most one line.
    fn push_back(&mut self, line: &'a str) {
        debug_assert!(self.pushed_back.is_none());
        self.pushed_back = Some(line);
        self.line_no -= 1;
    }
}

fn is_blank(line: &str) -> bool {
    line.chars().all(is_kif_space)
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

fn read_headers(lines: &mut LineReader<'_>) -> Vec<Header> {
    let mut headers = Vec::new();

    while let Some(line) = lines.next_line() {
        if is_blank(line) {
            break;
        }
        if is_comment(line) {
            continue;
        }
        match line.split_once('：') {
            Some((name, value)) => headers.push(Header::new(name, value)),
            None => {
                lines.push_back(line);
                break;
            }
        }
    }

    tracing::debug!(headers = headers.len(), line = lines.line_no, "end of header block");
    headers
}

fn read_steps(lines: &mut LineReader<'_>) -> Result<Vec<Step>, ParseKifError> {
    let mut steps: Vec<Step> = Vec::new();

    while let Some(line) = lines.next_line() {
        if is_blank(line) || is_comment(line) || line.starts_with(BANNER) {
            continue;
        }

        let error = |kind| ParseKifError {
            line: lines.line_no,
            text: line.to_owned(),
            kind,
        };

        if let Some(note) = line.strip_prefix('*') {
            steps
                .last_mut()
                .ok_or_else(|| error(ParseKifErrorKind::DanglingNote))?
                .notes
                .push(note.to_owned());
            continue;
        }

        let prev_dst = match steps.last_mut() {
            Some(prev) if prev.is_finished() => {
                prev.notes.push(line.to_owned());
                continue;
            }
            Some(prev) => prev.dst,
            None => None,
        };

        let step = Step::from_kif_line(line, prev_dst)
            .map_err(|err| error(ParseKifErrorKind::Step(err)))?;
        tracing::trace!(line = lines.line_no, seq = step.seq, "step");
        steps.push(step);
    }

    Ok(steps)
}

/// Reads a whole document. A leading byte order mark is skipped.
///
/// # Errors
///
/// Returns [`ParseKifError`] for the first line that is neither a header,
/// a comment, a note nor a valid step.
pub fn read_str(text: &str) -> Result<Record, ParseKifError> {
    let mut lines = LineReader::new(text);
    let headers = read_headers(&mut lines);
    let steps = read_steps(&mut lines)?;
    tracing::debug!(headers = headers.len(), steps = steps.len(), "read record");
    Ok(Record { headers, steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FinishedStatus, PieceKind, Square};

    #[test]
    fn test_line_reader() {
        let mut lines = LineReader::new("\u{feff}a\r\nb\n\nc");
        assert_eq!(lines.next_line(), Some("a"));
        assert_eq!(lines.line_no, 1);
        assert_eq!(lines.next_line(), Some("b"));
        lines.push_back("b");
        assert_eq!(lines.line_no, 1);
        assert_eq!(lines.next_line(), Some("b"));
        assert_eq!(lines.next_line(), Some(""));
        assert_eq!(lines.next_line(), Some("c"));
        assert_eq!(lines.line_no, 4);
        assert_eq!(lines.next_line(), None);
    }

    #[test]
    fn test_headers_end_at_blank_line() {
        let record = read_str("# comment\n先手：A\n後手：B：C\n\n1 ７六歩(77)\n").unwrap();
        assert_eq!(
            record.headers,
            [Header::new("先手", "A"), Header::new("後手", "B：C")]
        );
        assert_eq!(record.steps.len(), 1);
    }

    #[test]
    fn test_headers_end_at_banner() {
        let text = "先手：A\n手数----指手---------消費時間--\n   1 ７六歩(77)   ( 0:01/00:00:01)\n";
        let record = read_str(text).unwrap();
        assert_eq!(record.headers.len(), 1);
        assert_eq!(record.steps.len(), 1);
        assert_eq!(record.steps[0].dst, Square::new(7, 6));
    }

    #[test]
    fn test_headers_end_at_step() {
        let record = read_str("先手：A\n1 ７六歩(77)\n2 同　歩(73)\n").unwrap();
        assert_eq!(record.headers.len(), 1);
        assert_eq!(record.steps.len(), 2);
        assert_eq!(record.steps[1].dst, Square::new(7, 6));
    }

    #[test]
    fn test_notes() {
        let text = "\n1 ７六歩(77)\n*good move\n*\n2 投了\nafter the game\n*starred\n";
        let record = read_str(text).unwrap();
        assert!(record.headers.is_empty());
        assert_eq!(record.steps[0].notes, ["good move", ""]);
        assert_eq!(record.steps[1].finished_status, FinishedStatus::Surrender);
        assert_eq!(record.steps[1].notes, ["after the game", "starred"]);
    }

    #[test]
    fn test_dangling_note() {
        let err = read_str("\n*hello\n1 ７六歩(77)\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.text, "*hello");
        assert_eq!(err.kind, ParseKifErrorKind::DanglingNote);
    }

    #[test]
    fn test_step_error_line_number() {
        let text = "先手：A\n後手：B\n\n# comment\n1 ７六歩(77)\n2 ３四X(33)\n";
        let err = read_str(text).unwrap_err();
        assert_eq!(err.line, 6);
        assert_eq!(err.text, "2 ３四X(33)");
        assert_eq!(err.kind, ParseKifErrorKind::Step(ParseStepError::Piece));
        assert!(err.to_string().starts_with("line 6: unknown piece"));
    }

    #[test]
    fn test_same_square_on_first_step() {
        let err = read_str("\n1 同　歩(77)\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(
            err.kind,
            ParseKifErrorKind::Step(ParseStepError::SameSquareWithoutPrevious)
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(read_str("").unwrap(), Record::default());
        assert_eq!(read_str("\u{feff}").unwrap(), Record::default());
    }

    #[test]
    fn test_drop_and_promotion() {
        let record = read_str("\n1 ５五角打\n2 ２二角成(88)\n").unwrap();
        assert_eq!(record.steps[0].piece, Some(PieceKind::Bishop));
        assert_eq!(record.steps[0].src, None);
        assert_eq!(record.steps[1].src, Square::new(8, 8));
    }
}
