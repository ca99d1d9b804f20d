//! Stream cursor with checkpointing (L1).
//!
//! [`Checkpoint`] captures a stream's position on entry to an operation and
//! restores it on failure. It does not hold the stream borrowed for its
//! whole lifetime — the guarded operation still needs `&mut` access to the
//! same stream to do its work — so rollback is an explicit call rather than
//! a `Drop` impl. This is a deliberate, smaller version of the "scoped guard"
//! idea: the type still centralizes the save/restore logic and the
//! `INCONSISTENT_STATE` conversion so call sites never restore a position by
//! hand.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{FortioError, Result};

pub(crate) struct Checkpoint {
    pos: u64,
}

impl Checkpoint {
    /// Records the current position of `stream`.
    pub(crate) fn capture<S: Seek>(stream: &mut S) -> Result<Self> {
        let pos = stream.stream_position().map_err(FortioError::Seek)?;
        Ok(Self { pos })
    }

    pub(crate) fn pos(&self) -> u64 {
        self.pos
    }

    /// Seeks `stream` back to the checkpointed position. Returns `err`
    /// unchanged if the rollback succeeds, or `INCONSISTENT_STATE` if the
    /// rollback seek itself fails.
    pub(crate) fn rollback<S: Seek>(&self, stream: &mut S, err: FortioError) -> FortioError {
        match stream.seek(SeekFrom::Start(self.pos)) {
            Ok(_) => err,
            Err(_) => FortioError::InconsistentState,
        }
    }
}

/// A convenience wrapper pairing a stream with the record/array operations
/// that act on it. Equivalent to calling the free functions in
/// [`crate::record`] and [`crate::array`] directly; provided so callers
/// working through a single file handle don't have to keep re-passing it.
pub struct Fortio<S> {
    stream: S,
}

impl<S> Fortio<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }
}

impl<S: Read + Write + Seek> Fortio<S> {
    pub fn sizeof(&mut self, opts: &crate::options::Options) -> Result<u64> {
        crate::record::sizeof(&mut self.stream, opts)
    }

    pub fn skip(&mut self, opts: &crate::options::Options, n: u32) -> Result<()> {
        crate::record::skip(&mut self.stream, opts, n)
    }

    pub fn get(&mut self, opts: &crate::options::Options, buf: Option<&mut [u8]>) -> Result<u64> {
        crate::record::get(&mut self.stream, opts, buf)
    }

    pub fn put(&mut self, opts: &crate::options::Options, buf: &[u8]) -> Result<()> {
        crate::record::put(&mut self.stream, opts, buf)
    }

    pub fn array_get(
        &mut self,
        opts: &crate::options::Options,
        len: usize,
        nmemb: u64,
        blocksize: u64,
        buf: &mut [u8],
    ) -> Result<u64> {
        crate::array::array_get(&mut self.stream, opts, len, nmemb, blocksize, buf)
    }

    pub fn array_put(
        &mut self,
        opts: &crate::options::Options,
        len: usize,
        nmemb: u64,
        blocksize: u64,
        buf: &[u8],
    ) -> Result<()> {
        crate::array::array_put(&mut self.stream, opts, len, nmemb, blocksize, buf)
    }
}
