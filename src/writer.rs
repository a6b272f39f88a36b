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

use std::{fmt::Write as _, io, io::Write};

use crate::{reader::BANNER, usi::UsiMove, Record, Step};

/// Output format of a [`Writer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// The fixed-column KIF table.
    #[default]
    Kif,
    /// A single `position startpos moves ...` line.
    Sfen,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    /// Defaults to [`Format::Kif`].
    pub format: Format,
    /// Written after every KIF line. Not used for SFEN.
    ///
    /// Defaults to `"\n"`.
    pub newline: &'static str,
}

impl Config {
    /// Writes SFEN move lists.
    pub const fn sfen() -> Config {
        Config {
            format: Format::Sfen,
            newline: "\n",
        }
    }

    /// KIF with Windows line endings, as written by most shogi software.
    pub const CRLF: Config = Config {
        format: Format::Kif,
        newline: "\r\n",
    };
}

impl Default for Config {
    fn default() -> Config {
        Config {
            format: Format::Kif,
            newline: "\n",
        }
    }
}

/// Writes records to an [`io::Write`].
///
/// Headers and steps are written in canonical order, see
/// [`Record::normalize()`]. The record itself is not modified.
///
/// # Examples
///
/// ```
/// use kif::{writer::Writer, PieceKind, Record, Square, Step};
///
/// let mut record = Record::new();
/// record.push_header("先手", "A");
/// record.steps.push(Step {
///     seq: 1,
///     src: Square::new(7, 7),
///     dst: Square::new(7, 6),
///     piece: Some(PieceKind::Pawn),
///     thinking_sec: 3,
///     elapsed_sec: 3,
///     ..Step::default()
/// });
///
/// let mut writer = Writer::new(Vec::new());
/// writer.write_record(&record)?;
/// assert_eq!(
///     String::from_utf8(writer.writer).unwrap(),
///     "先手：A\n\
///      手数----指手---------消費時間--\n   \
///      1 ▲７六歩(77)     ( 0:03/00:00:03)\n"
/// );
/// # Ok::<_, std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct Writer<W> {
    pub writer: W,
    config: Config,
    /// Scratch space for one line.
    buffer: String,
    total_bytes_written: usize,
}

impl<W> Writer<W> {
    pub fn new(writer: W) -> Writer<W> {
        Writer::with_config(writer, Config::default())
    }

    pub fn with_config(writer: W, config: Config) -> Writer<W> {
        Writer {
            writer,
            config,
            buffer: String::with_capacity(128),
            total_bytes_written: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn total_bytes_written(&self) -> usize {
        self.total_bytes_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Writer<W> {
    /// Writes a record in the configured format.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying writer fails.
    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        match self.config.format {
            Format::Kif => self.write_kif(record),
            Format::Sfen => self.write_sfen(record),
        }
    }

    fn write_kif(&mut self, record: &Record) -> io::Result<()> {
        for header in record.normalized_headers() {
            self.buffer.clear();
            let _ = write!(self.buffer, "{header}");
            self.flush_line()?;
        }

        self.buffer.clear();
        self.buffer.push_str(BANNER);
        self.flush_line()?;

        for step in record.normalized_steps() {
            self.buffer.clear();
            push_step_line(&mut self.buffer, step);
            self.flush_line()?;

            for note in &step.notes {
                self.buffer.clear();
                self.buffer.push('*');
                self.buffer.push_str(note);
                self.flush_line()?;
            }
        }

        Ok(())
    }

    fn write_sfen(&mut self, record: &Record) -> io::Result<()> {
        self.buffer.clear();
        self.buffer.push_str("position startpos moves");
        for step in record.normalized_steps() {
            if step.is_finished() {
                break;
            }
            self.buffer.push(' ');
            let _ = write!(self.buffer, "{}", UsiMove::from(step));
        }
        self.write_buffer()
    }

    fn flush_line(&mut self) -> io::Result<()> {
        self.buffer.push_str(self.config.newline);
        self.write_buffer()
    }

    fn write_buffer(&mut self) -> io::Result<()> {
        self.writer.write_all(self.buffer.as_bytes())?;
        self.total_bytes_written += self.buffer.len();
        Ok(())
    }
}

fn push_step_line(buffer: &mut String, step: &Step) {
    let _ = write!(
        buffer,
        "{:>4} {:<12} {}",
        step.seq,
        step.kif_move(),
        step.timestamp()
    );
}
