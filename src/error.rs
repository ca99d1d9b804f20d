//! Stable error taxonomy for the record engine.
//!
//! Mirrors the integer error codes of the original C library so callers
//! porting code from it can still match on a stable discriminant via
//! [`FortioError::code`], while giving Rust callers a normal `std::error::Error`
//! to work with via `?`.

use std::fmt::{self, Display, Formatter};
use std::io;

pub type Result<T> = std::result::Result<T, FortioError>;

/// Everything that can go wrong reading or writing a record.
///
/// `#[non_exhaustive]` because new alignment/IO failure modes may be added
/// without that being a breaking change for callers who only match on the
/// variants they care about.
#[derive(Debug)]
#[non_exhaustive]
pub enum FortioError {
    /// The underlying stream failed while seeking.
    Seek(io::Error),
    /// The underlying stream failed while reading.
    Read(io::Error),
    /// The underlying stream failed while writing.
    Write(io::Error),
    /// A record's head/tail pair failed validation: negative, misaligned,
    /// or a mismatched tail under strict policy.
    InvalidRecord,
    /// A caller-supplied argument was invalid before any I/O happened
    /// (for example, a buffer too small for the size hint).
    Einval,
    /// A rollback seek itself failed; the stream's position is no longer
    /// trustworthy.
    InconsistentState,
    /// The stream ended in the middle of a record that had already begun.
    UnexpectedEof,
    /// The stream ended cleanly at a record boundary. Not an error condition;
    /// callers loop on this to detect the end of a record sequence.
    Eof,
    /// A physical block's element count did not match the array's declared
    /// blocksize.
    Unaligned,
    /// A logical array's blocks did not sum to the requested element count.
    Truncated,
}

impl FortioError {
    /// The code from the original library's `ecl_errno` enum, with the
    /// array-only additions appended after it in declaration order.
    pub fn code(&self) -> i32 {
        match self {
            Self::Seek(_) => 2,
            Self::Read(_) => 3,
            Self::Write(_) => 4,
            Self::InvalidRecord => 5,
            Self::Einval => 6,
            Self::InconsistentState => 7,
            Self::UnexpectedEof => 8,
            Self::Eof => 9,
            Self::Unaligned => 10,
            Self::Truncated => 11,
        }
    }
}

impl Display for FortioError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Seek(err) => write![f, "seek failed: {}", err],
            Self::Read(err) => write![f, "read failed: {}", err],
            Self::Write(err) => write![f, "write failed: {}", err],
            Self::InvalidRecord => write![f, "record head/tail failed validation"],
            Self::Einval => write![f, "invalid argument"],
            Self::InconsistentState => write![f, "rollback seek failed, stream position is unknown"],
            Self::UnexpectedEof => write![f, "stream ended in the middle of a record"],
            Self::Eof => write![f, "stream ended at a record boundary"],
            Self::Unaligned => write![f, "physical block did not match the array's blocksize"],
            Self::Truncated => write![f, "array blocks did not sum to the requested element count"],
        }
    }
}

impl std::error::Error for FortioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Seek(err) | Self::Read(err) | Self::Write(err) => Some(err),
            _ => None,
        }
    }
}
