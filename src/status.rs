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

/// Error when parsing an unknown game-end word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseStatusError;

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid finished status")
    }
}

impl error::Error for ParseStatusError {}

/// Whether a step is an ordinary move or one of the game-ending entries.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Default)]
pub enum FinishedStatus {
    /// An ordinary move.
    #[default]
    NotFinished = 0,
    /// `中断`
    Abort = 1,
    /// `投了`
    Surrender = 2,
    /// `持将棋`
    Jishogi = 3,
    /// `千日手`
    Sennichite = 4,
    /// `詰み`
    Checkmate = 5,
    /// `切れ負け`
    TimeUp = 6,
    /// `反則勝ち`
    IllegalWin = 7,
    /// `反則負け`
    IllegalLose = 8,
    /// `入玉勝ち`
    Nyugyoku = 9,
}

/// Game-end words in match order.
pub(crate) const STATUS_SPELLINGS: [Spelling<FinishedStatus>; 9] = [
    Spelling::new("中断", FinishedStatus::Abort),
    Spelling::new("投了", FinishedStatus::Surrender),
    Spelling::new("持将棋", FinishedStatus::Jishogi),
    Spelling::new("千日手", FinishedStatus::Sennichite),
    Spelling::new("詰み", FinishedStatus::Checkmate),
    Spelling::new("切れ負け", FinishedStatus::TimeUp),
    Spelling::new("反則勝ち", FinishedStatus::IllegalWin),
    Spelling::new("反則負け", FinishedStatus::IllegalLose),
    Spelling::new("入玉勝ち", FinishedStatus::Nyugyoku),
];

impl FinishedStatus {
    /// Whether the game ended with this step.
    #[inline]
    pub const fn is_finished(self) -> bool {
        !matches!(self, FinishedStatus::NotFinished)
    }

    /// The KIF word for the status. Empty for
    /// [`FinishedStatus::NotFinished`].
    pub const fn kif_word(self) -> &'static str {
        match self {
            FinishedStatus::NotFinished => "",
            FinishedStatus::Abort => "中断",
            FinishedStatus::Surrender => "投了",
            FinishedStatus::Jishogi => "持将棋",
            FinishedStatus::Sennichite => "千日手",
            FinishedStatus::Checkmate => "詰み",
            FinishedStatus::TimeUp => "切れ負け",
            FinishedStatus::IllegalWin => "反則勝ち",
            FinishedStatus::IllegalLose => "反則負け",
            FinishedStatus::Nyugyoku => "入玉勝ち",
        }
    }

    /// Gets the status for a KIF word like `投了`.
    pub fn from_kif_word(word: &str) -> Option<FinishedStatus> {
        STATUS_SPELLINGS
            .iter()
            .find(|spelling| spelling.text == word)
            .map(|spelling| spelling.value)
    }
}

impl fmt::Display for FinishedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kif_word())
    }
}

impl FromStr for FinishedStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<FinishedStatus, ParseStatusError> {
        FinishedStatus::from_kif_word(s).ok_or(ParseStatusError)
    }
}
