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

use crate::{
    cursor::{Cursor, Scan},
    matcher::ReadNumberError,
};

/// Error when parsing a `( M:SS/HH:MM:SS)` time group.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseTimestampError;

impl fmt::Display for ParseTimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid timestamp")
    }
}

impl error::Error for ParseTimestampError {}

/// Thinking time of one step and total elapsed time, in seconds.
///
/// # Examples
///
/// ```
/// use kif::Timestamp;
///
/// let ts: Timestamp = "( 1:23/01:23:45)".parse()?;
/// assert_eq!(ts.thinking_sec, 83);
/// assert_eq!(ts.elapsed_sec, 5025);
/// assert_eq!(ts.to_string(), "( 1:23/01:23:45)");
/// # Ok::<_, kif::ParseTimestampError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Timestamp {
    pub thinking_sec: u32,
    pub elapsed_sec: u32,
}

fn minutes_seconds(minutes: u32, seconds: u32) -> Option<u32> {
    minutes.checked_mul(60)?.checked_add(seconds)
}

impl Timestamp {
    /// Reads a time group at the cursor.
    pub(crate) fn read(cursor: &mut Cursor) -> Result<Timestamp, ReadNumberError> {
        cursor.eat_char('(')?;
        cursor.skip_spaces();

        let think_min = cursor.read_digits()?;
        cursor.eat_char(':')?;
        let think_sec = cursor.read_digits()?;
        cursor.eat_char('/')?;

        let hours = cursor.read_digits()?;
        cursor.eat_char(':')?;
        let minutes = cursor.read_digits()?;
        cursor.eat_char(':')?;
        let seconds = cursor.read_digits()?;
        cursor.eat_char(')')?;

        let thinking_sec = minutes_seconds(think_min, think_sec).ok_or(ReadNumberError::Invalid)?;
        let elapsed_sec = hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .and_then(|m| minutes_seconds(m, seconds))
            .ok_or(ReadNumberError::Invalid)?;

        Ok(Timestamp {
            thinking_sec,
            elapsed_sec,
        })
    }

    /// Thinking time rendered as `" M:SS"`.
    pub fn thinking(self) -> impl fmt::Display {
        Thinking(self.thinking_sec)
    }

    /// Elapsed time rendered as `HH:MM:SS`.
    pub fn elapsed(self) -> impl fmt::Display {
        Elapsed(self.elapsed_sec)
    }
}

struct Thinking(u32);

impl fmt::Display for Thinking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2}:{:02}", self.0 / 60, self.0 % 60)
    }
}

struct Elapsed(u32);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0 / 3600,
            self.0 / 60 % 60,
            self.0 % 60
        )
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{})", self.thinking(), self.elapsed())
    }
}

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Timestamp, ParseTimestampError> {
        let mut cursor = Cursor::new(s);
        let ts = Timestamp::read(&mut cursor).map_err(|_| ParseTimestampError)?;
        match cursor.peek() {
            Err(Scan::EndOfInput) => Ok(ts),
            _ => Err(ParseTimestampError),
        }
    }
}
