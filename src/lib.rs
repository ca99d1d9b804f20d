//! Reads and writes the binary record framing that Fortran 77's unformatted
//! sequential I/O produces: `| head:i32 | payload... | tail:i32 |`, where
//! `head`/`tail` give the payload length in bytes and should be equal.
//!
//! This is the framing used by reservoir-simulation output such as ECLIPSE's
//! restart and summary files. The crate only understands the record
//! envelope; it has no notion of what a restart or summary file actually
//! contains.

#![forbid(unsafe_code)]

mod array;
mod cursor;
mod endian;
pub mod error;
pub mod keywords;
pub mod options;
mod record;

pub use array::{array_get, array_put};
pub use cursor::Fortio;
pub use error::{FortioError, Result};
pub use keywords::KeywordList;
pub use options::{ElementKind, Options, TailPolicy};
pub use record::{get, put, skip, sizeof};
