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

use std::{fmt, str::FromStr};

use crate::{
    reader::{read_str, ParseKifError},
    writer::{Config, Writer},
    Step,
};

/// Header names with a fixed position in written records, in that order.
/// Other names follow them.
pub const KNOWN_HEADERS: [&str; 16] = [
    "対局日",
    "開始日時",
    "終了日時",
    "棋戦",
    "手合割",
    "先手",
    "後手",
    "戦型",
    "表題",
    "持ち時間",
    "消費時間",
    "場所",
    "掲載",
    "備考",
    "先手省略名",
    "後手省略名",
];

#[cfg(feature = "chrono")]
const START_TIME: &str = "開始日時";
#[cfg(feature = "chrono")]
const END_TIME: &str = "終了日時";
#[cfg(feature = "chrono")]
const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// A `name：value` line from the head of a record.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Header {
        Header {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Position among [`KNOWN_HEADERS`], or past the end for other names.
    fn priority(&self) -> usize {
        KNOWN_HEADERS
            .iter()
            .position(|&known| known == self.name)
            .unwrap_or(KNOWN_HEADERS.len())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}：{}", self.name, self.value)
    }
}

/// A game record: headers and steps.
///
/// Headers keep the order they were read in and may repeat. Writing puts
/// them in canonical order, see [`Record::normalize()`].
///
/// # Examples
///
/// ```
/// use kif::Record;
///
/// let record: Record = "先手：羽生\n\n1 ７六歩(77)\n2 ３四歩(33)\n3 投了\n".parse()?;
/// assert_eq!(record.header("先手"), Some("羽生"));
/// assert_eq!(record.steps.len(), 3);
/// assert_eq!(record.to_sfen(), "position startpos moves 7g7f 3c3d");
/// # Ok::<_, kif::ParseKifError>(())
/// ```
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Record {
    pub headers: Vec<Header>,
    pub steps: Vec<Step>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    /// Parses a whole KIF document.
    ///
    /// # Errors
    ///
    /// Returns [`ParseKifError`] with the line number of the first line that
    /// could not be read.
    pub fn from_kif_str(text: &str) -> Result<Record, ParseKifError> {
        read_str(text)
    }

    /// The value of the first header called `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }

    pub fn push_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push(Header::new(name, value));
    }

    /// Puts headers in canonical order and steps in step number order.
    ///
    /// Both sorts are stable: headers with the same priority and steps with
    /// the same number keep their relative order.
    pub fn normalize(&mut self) {
        self.headers.sort_by_key(Header::priority);
        self.steps.sort_by_key(|step| step.seq);
    }

    /// Like [`Record::normalize()`], without touching the record.
    pub fn normalized_headers(&self) -> Vec<&Header> {
        let mut headers: Vec<&Header> = self.headers.iter().collect();
        headers.sort_by_key(|h| h.priority());
        headers
    }

    /// Steps in step number order, without touching the record.
    pub fn normalized_steps(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|step| step.seq);
        steps
    }

    /// Renders the record as a KIF document.
    pub fn to_kif_string(&self) -> String {
        render(self, Config::default())
    }

    /// Renders the steps as an SFEN move list, like
    /// `position startpos moves 7g7f 3c3d`.
    pub fn to_sfen(&self) -> String {
        render(self, Config::sfen())
    }

    #[cfg(feature = "chrono")]
    fn set_header_last(&mut self, name: &str, value: String) {
        self.headers.retain(|h| h.name != name);
        self.headers.push(Header::new(name, value));
    }

    /// Replaces the `開始日時` header.
    #[cfg(feature = "chrono")]
    pub fn set_start_time(&mut self, time: chrono::NaiveDateTime) {
        self.set_header_last(START_TIME, time.format(TIME_FORMAT).to_string());
    }

    /// Replaces the `終了日時` header.
    #[cfg(feature = "chrono")]
    pub fn set_end_time(&mut self, time: chrono::NaiveDateTime) {
        self.set_header_last(END_TIME, time.format(TIME_FORMAT).to_string());
    }

    /// The `開始日時` header, if it is present and well-formed.
    #[cfg(feature = "chrono")]
    pub fn start_time(&self) -> Option<chrono::NaiveDateTime> {
        self.header_time(START_TIME)
    }

    /// The `終了日時` header, if it is present and well-formed.
    #[cfg(feature = "chrono")]
    pub fn end_time(&self) -> Option<chrono::NaiveDateTime> {
        self.header_time(END_TIME)
    }

    #[cfg(feature = "chrono")]
    fn header_time(&self, name: &str) -> Option<chrono::NaiveDateTime> {
        chrono::NaiveDateTime::parse_from_str(self.header(name)?.trim(), TIME_FORMAT).ok()
    }
}

fn render(record: &Record, config: Config) -> String {
    let mut writer = Writer::with_config(Vec::new(), config);
    match writer.write_record(record) {
        // writing to a Vec<u8> does not fail, and all output is UTF-8
        Ok(()) => String::from_utf8(writer.writer).unwrap_or_default(),
        Err(_) => String::new(),
    }
}

impl FromStr for Record {
    type Err = ParseKifError;

    fn from_str(s: &str) -> Result<Record, ParseKifError> {
        Record::from_kif_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_headers() {
        let mut record = Record::new();
        record.push_header("備考", "a");
        record.push_header("独自", "1");
        record.push_header("先手", "b");
        record.push_header("追加", "2");
        record.push_header("開始日時", "c");
        record.push_header("先手", "d");
        record.normalize();

        let order: Vec<(&str, &str)> = record
            .headers
            .iter()
            .map(|h| (h.name.as_str(), h.value.as_str()))
            .collect();
        assert_eq!(
            order,
            [
                ("開始日時", "c"),
                ("先手", "b"),
                ("先手", "d"),
                ("備考", "a"),
                ("独自", "1"),
                ("追加", "2"),
            ]
        );
    }

    #[test]
    fn test_normalize_steps() {
        let mut record = Record::new();
        for seq in [3, 1, 2] {
            record.steps.push(Step {
                seq,
                ..Step::default()
            });
        }
        let view: Vec<u32> = record.normalized_steps().iter().map(|s| s.seq).collect();
        assert_eq!(view, [1, 2, 3]);
        assert_eq!(record.steps[0].seq, 3);

        record.normalize();
        let seqs: Vec<u32> = record.steps.iter().map(|s| s.seq).collect();
        assert_eq!(seqs, [1, 2, 3]);
    }

    #[test]
    fn test_normalize_idempotent() {
        let mut record = Record::new();
        record.push_header("後手", "x");
        record.push_header("場所", "y");
        record.push_header("対局日", "z");
        record.normalize();
        let once = record.clone();
        record.normalize();
        assert_eq!(record, once);

        let view: Vec<&Header> = record.normalized_headers();
        assert!(view.iter().copied().eq(record.headers.iter()));
    }

    #[test]
    fn test_header() {
        let mut record = Record::new();
        assert_eq!(record.header("先手"), None);
        record.push_header("先手", "one");
        record.push_header("先手", "two");
        assert_eq!(record.header("先手"), Some("one"));
        assert_eq!(Header::new("棋戦", "竜王戦").to_string(), "棋戦：竜王戦");
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_start_end_time() {
        use chrono::NaiveDate;

        let start = NaiveDate::from_ymd_opt(2006, 1, 2)
            .and_then(|d| d.and_hms_opt(15, 4, 5))
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2006, 1, 2)
            .and_then(|d| d.and_hms_opt(18, 30, 0))
            .unwrap();

        let mut record = Record::new();
        record.push_header("開始日時", "昔");
        record.push_header("先手", "a");
        record.set_start_time(start);
        record.set_end_time(end);

        assert_eq!(record.headers.len(), 3);
        assert_eq!(record.headers[0].name, "先手");
        assert_eq!(record.header("開始日時"), Some("2006/01/02 15:04:05"));
        assert_eq!(record.header("終了日時"), Some("2006/01/02 18:30:00"));
        assert_eq!(record.start_time(), Some(start));
        assert_eq!(record.end_time(), Some(end));
    }
}
