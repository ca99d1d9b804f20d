//! Single-record operations (L3): `sizeof`, `skip`, `get`, `put`.
//!
//! Every entry point here captures a [`Checkpoint`] on entry and rolls the
//! stream back to it on any failure, per the checkpoint/rollback discipline.
//! The caller's output buffer is the one documented exception: it is written
//! to directly during a `get`, so on a failure partway through a read it must
//! be treated as dirty even though the stream position is restored.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::cursor::Checkpoint;
use crate::endian::{self, Endian};
use crate::error::{FortioError, Result};
use crate::options::{Options, TailPolicy};

/// Reads a record's head, validates it, and restores the cursor to its
/// pre-call position regardless of outcome. Returns the element count.
pub fn sizeof<S: Read + Seek>(stream: &mut S, opts: &Options) -> Result<u64> {
    let ckpt = Checkpoint::capture(stream)?;

    let outcome = (|| -> Result<u64> {
        let h = match read_head(stream, opts.endian)? {
            None => return Err(FortioError::Eof),
            Some(h) => h,
        };
        validate_head(h, opts)?;
        Ok(h as u64 / opts.kind.element_size() as u64)
    })();

    // sizeof restores the cursor on success too, not just on failure.
    match outcome {
        Ok(n) => match stream.seek(SeekFrom::Start(ckpt.pos())) {
            Ok(_) => Ok(n),
            Err(_) => Err(FortioError::InconsistentState),
        },
        Err(e) => Err(ckpt.rollback(stream, e)),
    }
}

/// Advances past `n` records. Restores the cursor to its entry position if
/// any of the `n` records fails; the caller cannot tell which one failed
/// from this call alone (skip records one at a time to diagnose).
pub fn skip<S: Read + Seek>(stream: &mut S, opts: &Options, n: u32) -> Result<()> {
    let ckpt = Checkpoint::capture(stream)?;

    let outcome = (|| -> Result<()> {
        for _ in 0..n {
            skip_one(stream, opts)?;
        }
        Ok(())
    })();

    match outcome {
        Ok(()) => Ok(()),
        Err(e) => Err(ckpt.rollback(stream, e)),
    }
}

fn skip_one<S: Read + Seek>(stream: &mut S, opts: &Options) -> Result<()> {
    let h = match read_head(stream, opts.endian)? {
        None => return Err(FortioError::Eof),
        Some(h) => h,
    };
    validate_head(h, opts)?;
    discard_bytes(stream, h as u64)?;
    consume_tail(stream, opts, h)?;
    Ok(())
}

/// Reads one record. `buf` is both the destination and, unless
/// `ignore_size_hint` is set, the capacity hint: its length in elements must
/// be at least the record's element count or the call fails with `Einval`
/// before anything is read. Pass `None` to validate and skip past a record
/// without copying its payload anywhere.
///
/// This collapses the original C contract's separate `size` in/out pointer
/// and `buf` pointer into one `Option<&mut [u8]>`, since a Rust slice already
/// carries its own length; the returned `u64` is the element count that the
/// C API would have written back through `size`.
pub fn get<S: Read + Seek>(
    stream: &mut S,
    opts: &Options,
    buf: Option<&mut [u8]>,
) -> Result<u64> {
    let ckpt = Checkpoint::capture(stream)?;

    match get_inner(stream, opts, buf) {
        Ok(n) => Ok(n),
        Err(e) => Err(ckpt.rollback(stream, e)),
    }
}

fn get_inner<S: Read + Seek>(
    stream: &mut S,
    opts: &Options,
    buf: Option<&mut [u8]>,
) -> Result<u64> {
    let h = match read_head(stream, opts.endian)? {
        None => return Err(FortioError::Eof),
        Some(h) => h,
    };
    validate_head(h, opts)?;

    let element_size = opts.kind.element_size();
    let n = h as u64 / element_size as u64;

    if let Some(buf) = buf.as_ref() {
        if !opts.ignore_size_hint {
            let capacity = (buf.len() / element_size) as u64;
            if n > capacity {
                return Err(FortioError::Einval);
            }
        }
    }

    let payload_len = h as usize;

    match buf {
        Some(buf) => {
            if buf.len() < payload_len {
                // Buffer too small to hold the record even with the hint
                // check skipped; there is no safe way to write past it.
                return Err(FortioError::Einval);
            }

            let target = &mut buf[..payload_len];
            read_exact_checked(stream, target)?;

            if endian::needs_transform(opts.endian, opts.transform) {
                endian::swap_in_place(target, element_size);
            }
        }
        None => discard_bytes(stream, h as u64)?,
    }

    consume_tail(stream, opts, h)?;

    Ok(n)
}

/// Writes one record containing the raw bytes of `buf`, which the caller has
/// already laid out according to `opts.kind`. `buf` is never mutated: when a
/// transform is needed, the swapped bytes are written from a scratch copy.
pub fn put<S: Write + Seek>(stream: &mut S, opts: &Options, buf: &[u8]) -> Result<()> {
    let ckpt = Checkpoint::capture(stream)?;

    match put_inner(stream, opts, buf) {
        Ok(()) => Ok(()),
        Err(e) => Err(ckpt.rollback(stream, e)),
    }
}

fn put_inner<S: Write + Seek>(stream: &mut S, opts: &Options, buf: &[u8]) -> Result<()> {
    if buf.len() > i32::MAX as usize {
        return Err(FortioError::Einval);
    }
    let h = buf.len() as i32;

    write_i32(stream, opts.endian, h).map_err(FortioError::Write)?;

    let element_size = opts.kind.element_size();
    if endian::needs_transform(opts.endian, opts.transform) && element_size > 1 {
        let mut scratch = buf.to_vec();
        endian::swap_in_place(&mut scratch, element_size);
        stream.write_all(&scratch).map_err(FortioError::Write)?;
    } else {
        stream.write_all(buf).map_err(FortioError::Write)?;
    }

    if !matches!(opts.tail_policy, TailPolicy::ForceMissing) {
        write_i32(stream, opts.endian, h).map_err(FortioError::Write)?;
    }

    Ok(())
}

/// Reads a record's tail according to `opts.tail_policy`. On entry the
/// cursor sits immediately after the payload.
pub(crate) fn consume_tail<S: Read + Seek>(stream: &mut S, opts: &Options, h: i32) -> Result<()> {
    match opts.tail_policy {
        TailPolicy::ForceMissing => Ok(()),

        TailPolicy::Strict => {
            let mut raw = [0u8; 4];
            let n = read_up_to(stream, &mut raw).map_err(FortioError::Read)?;
            if n < 4 {
                return Err(FortioError::UnexpectedEof);
            }
            if decode_i32(raw, opts.endian) != h {
                return Err(FortioError::InvalidRecord);
            }
            Ok(())
        }

        TailPolicy::AllowMissing => {
            let mut raw = [0u8; 4];
            let n = read_up_to(stream, &mut raw).map_err(FortioError::Read)?;
            if n == 4 && decode_i32(raw, opts.endian) == h {
                return Ok(());
            }
            // Missing or mismatched: rewind to where the tail would have
            // started so the next record can begin there.
            stream
                .seek(SeekFrom::Current(-(n as i64)))
                .map_err(FortioError::Seek)?;
            Ok(())
        }
    }
}

pub(crate) fn validate_head(h: i32, opts: &Options) -> Result<()> {
    if h < 0 {
        return Err(FortioError::InvalidRecord);
    }
    if (h as usize) % opts.kind.element_size() != 0 {
        return Err(FortioError::InvalidRecord);
    }
    Ok(())
}

/// Reads the 4-byte head. `Ok(None)` means a clean end-of-stream (no bytes
/// at all were available); any other short read is a truncation.
pub(crate) fn read_head<S: Read>(stream: &mut S, endian: Endian) -> Result<Option<i32>> {
    let mut raw = [0u8; 4];
    let n = read_up_to(stream, &mut raw).map_err(FortioError::Read)?;
    match n {
        0 => Ok(None),
        4 => Ok(Some(decode_i32(raw, endian))),
        _ => Err(FortioError::UnexpectedEof),
    }
}

fn decode_i32(raw: [u8; 4], endian: Endian) -> i32 {
    match endian {
        Endian::Big => i32::from_be_bytes(raw),
        Endian::Little => i32::from_le_bytes(raw),
    }
}

fn write_i32<S: Write>(stream: &mut S, endian: Endian, value: i32) -> std::io::Result<()> {
    let raw = match endian {
        Endian::Big => value.to_be_bytes(),
        Endian::Little => value.to_le_bytes(),
    };
    stream.write_all(&raw)
}

/// Reads into `buf` until it is full or the stream is exhausted, returning
/// the number of bytes actually read. Unlike `Read::read_exact`, a short
/// read is not an error here — callers decide what a shortfall means.
pub(crate) fn read_up_to<S: Read>(stream: &mut S, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match stream.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

fn read_exact_checked<S: Read>(stream: &mut S, buf: &mut [u8]) -> Result<()> {
    let n = read_up_to(stream, buf).map_err(FortioError::Read)?;
    if n < buf.len() {
        Err(FortioError::UnexpectedEof)
    } else {
        Ok(())
    }
}

/// Reads and discards `n` bytes, detecting truncation the same way a real
/// read into a caller buffer would.
pub(crate) fn discard_bytes<S: Read>(stream: &mut S, mut n: u64) -> Result<()> {
    let mut scratch = [0u8; 4096];
    while n > 0 {
        let chunk = std::cmp::min(n, scratch.len() as u64) as usize;
        let read = read_up_to(stream, &mut scratch[..chunk]).map_err(FortioError::Read)?;
        if (read as u64) < chunk as u64 {
            return Err(FortioError::UnexpectedEof);
        }
        n -= read as u64;
    }
    Ok(())
}
