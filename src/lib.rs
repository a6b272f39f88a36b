//! A library for reading and writing shogi game records in KIF notation.
//!
//! # Examples
//!
//! Read a record:
//!
//! ```
//! use kif::{FinishedStatus, PieceKind, Record, Square};
//!
//! let record: Record = "\
//! 先手：羽生善治
//! 後手：谷川浩司
//! 手数----指手---------消費時間--
//!    1 ７六歩(77)   ( 0:01/00:00:01)
//!    2 ３四歩(33)   ( 0:02/00:00:02)
//!    3 ２二角成(88) ( 0:03/00:00:04)
//!    4 同　銀(31)   ( 0:01/00:00:03)
//! *角交換
//!    5 投了         ( 0:05/00:00:09)
//! ".parse()?;
//!
//! assert_eq!(record.header("後手"), Some("谷川浩司"));
//! assert_eq!(record.steps[3].dst, Square::new(2, 2));
//! assert_eq!(record.steps[3].piece, Some(PieceKind::Silver));
//! assert_eq!(record.steps[3].notes, ["角交換"]);
//! assert_eq!(record.steps[4].finished_status, FinishedStatus::Surrender);
//! # Ok::<_, kif::ParseKifError>(())
//! ```
//!
//! Write it back, or as an SFEN move list for an engine:
//!
//! ```
//! # let record: kif::Record = "\n1 ７六歩(77)\n2 ３四歩(33)\n".parse()?;
//! assert_eq!(record.to_sfen(), "position startpos moves 7g7f 3c3d");
//!
//! let kif = record.to_kif_string();
//! assert!(kif.starts_with("手数----指手---------消費時間--\n   1 ▲７六歩(77)"));
//! # Ok::<_, kif::ParseKifError>(())
//! ```
//!
//! Single step lines can be parsed with [`Step::from_kif_line()`].
//! Decoding Shift-JIS input is left to the caller.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   records and their parts.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for fuzzing.
//! * `chrono`: Enables [`Record::set_start_time()`] and friends.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod util;
mod piece;
mod record;
mod square;
mod status;
mod step;
mod timestamp;

pub mod cursor;
pub mod matcher;
pub mod parser;
pub mod reader;
pub mod usi;
pub mod writer;

pub use parser::ParseStepError;
pub use piece::{ParsePieceError, PieceKind};
pub use reader::{ParseKifError, ParseKifErrorKind};
pub use record::{Header, Record, KNOWN_HEADERS};
pub use square::{ParseSquareError, Square};
pub use status::{FinishedStatus, ParseStatusError};
pub use step::{Modifier, Phase, Step};
pub use timestamp::{ParseTimestampError, Timestamp};
