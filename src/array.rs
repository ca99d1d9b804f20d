//! Multi-block array operations (L4): `array_get`, `array_put`.
//!
//! A logical array is a run of physical records sharing the same options.
//! Every physical record is driven through [`crate::record::get`] /
//! [`crate::record::put`], so each block gets its own rollback discipline;
//! what this module adds is the alignment bookkeeping across blocks and the
//! rule for rolling back only the failing block rather than the whole array.

use std::io::{Read, Seek, Write};

use crate::cursor::Checkpoint;
use crate::error::{FortioError, Result};
use crate::options::Options;
use crate::record;

/// `len` is the sub-unit count per logical element: `8` for `string8`
/// (an 8-character keyword counted as one logical element), `1` for every
/// numeric kind. This is purely a cross-check against `opts.kind` — the
/// byte arithmetic itself already comes from `opts.kind.element_size()`.
fn validate_len(len: usize, opts: &Options) -> Result<()> {
    let expected = if matches!(opts.kind, crate::options::ElementKind::String8) {
        8
    } else {
        1
    };
    if len != expected {
        return Err(FortioError::Einval);
    }
    Ok(())
}

/// Reads `nmemb` elements spread across one or more physical blocks.
///
/// Every block up to the last must contain exactly `blocksize` elements;
/// the last block must contain exactly the remainder — unless `blocksize`
/// is `0`, in which case no per-block size is enforced at all (any block
/// sizes are accepted as long as their total doesn't exceed `nmemb`).
///
/// On any alignment failure the stream is rolled back to the start of the
/// offending physical block only, not to the start of the whole array.
pub fn array_get<S: Read + Seek>(
    stream: &mut S,
    opts: &Options,
    len: usize,
    nmemb: u64,
    blocksize: u64,
    buf: &mut [u8],
) -> Result<u64> {
    validate_len(len, opts)?;

    let element_size = opts.kind.element_size() as u64;
    let capacity = buf.len() as u64 / element_size;
    if capacity < nmemb {
        return Err(FortioError::Einval);
    }

    let mut total: u64 = 0;

    while total < nmemb {
        let remaining = nmemb - total;
        let block_start = Checkpoint::capture(stream)?;
        let offset = (total * element_size) as usize;

        // Peek the block's declared element count via `sizeof` (which
        // restores the cursor) before touching `buf`, so an oversized block
        // is classified as Unaligned/Truncated here rather than rejected by
        // `get`'s own size-hint check against a destination slice that was
        // only ever sized for `remaining` elements.
        let declared = match record::sizeof(stream, opts) {
            Ok(n) => n,
            Err(e) => return Err(block_start.rollback(stream, e)),
        };

        if blocksize == 0 {
            if total + declared > nmemb {
                return Err(block_start.rollback(stream, FortioError::Truncated));
            }
        } else if remaining >= blocksize {
            if declared != blocksize {
                return Err(block_start.rollback(stream, FortioError::Truncated));
            }
        } else if declared != remaining {
            return Err(block_start.rollback(stream, FortioError::Unaligned));
        }

        let end = offset + (declared * element_size) as usize;
        let got = record::get(stream, opts, Some(&mut buf[offset..end]))?;
        total += got;
    }

    Ok(total)
}

/// Writes `nmemb` elements as `ceil(nmemb / blocksize)` physical blocks:
/// full blocks of `blocksize`, then a final possibly-short block.
/// `blocksize == 0` writes the whole array as a single block.
///
/// Each block is an independent `put`; a failure partway through does not
/// roll back blocks already written. The stream position after a failure
/// is wherever that block's own rollback left it (its start), not the
/// array's start.
pub fn array_put<S: Write + Seek>(
    stream: &mut S,
    opts: &Options,
    len: usize,
    nmemb: u64,
    blocksize: u64,
    buf: &[u8],
) -> Result<()> {
    validate_len(len, opts)?;

    let element_size = opts.kind.element_size() as u64;
    if buf.len() as u64 < nmemb * element_size {
        return Err(FortioError::Einval);
    }

    let chunk = if blocksize == 0 { nmemb } else { blocksize };
    let mut written: u64 = 0;

    while written < nmemb {
        let remaining = nmemb - written;
        let this_block = chunk.min(remaining);
        let start = (written * element_size) as usize;
        let end = ((written + this_block) * element_size) as usize;

        record::put(stream, opts, &buf[start..end])?;
        written += this_block;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use std::io::Cursor;

    fn write_record(out: &mut Vec<u8>, values: &[i32]) {
        let payload: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        out.extend_from_slice(&(payload.len() as i32).to_be_bytes());
        out.extend_from_slice(&payload);
        out.extend_from_slice(&(payload.len() as i32).to_be_bytes());
    }

    #[test]
    fn underflow_strict_vs_permissive() {
        let mut data = Vec::new();
        for _ in 0..4 {
            write_record(&mut data, &[1, 2, 3]);
        }

        let opts = Options::parse("e");

        let mut stream = Cursor::new(data.clone());
        let mut buf = vec![0u8; 10 * 4];
        let err = array_get(&mut stream, &opts, 1, 10, 3, &mut buf).unwrap_err();
        assert!(matches!(err, FortioError::Unaligned));
        // rolled back to the start of the fourth record: 3 records * (4 head + 12 payload + 4 tail) bytes each.
        assert_eq!(stream.stream_position().unwrap(), 3 * 20);

        let mut stream = Cursor::new(data);
        let mut buf = vec![0u8; 9 * 4];
        let n = array_get(&mut stream, &opts, 1, 9, 3, &mut buf).unwrap();
        assert_eq!(n, 9);
    }

    #[test]
    fn truncation_when_block_overshoots() {
        let mut data = Vec::new();
        write_record(&mut data, &[1, 2, 3]);
        write_record(&mut data, &[4, 5, 6, 7, 8]);

        let opts = Options::parse("e");
        let mut stream = Cursor::new(data);
        let mut buf = vec![0u8; 8 * 4];
        let err = array_get(&mut stream, &opts, 1, 8, 3, &mut buf).unwrap_err();
        assert!(matches!(err, FortioError::Truncated));
    }

    #[test]
    fn put_then_get_round_trip_across_blocks() {
        let opts = Options::parse("e");
        let values: Vec<i32> = (0..7).collect();
        let raw: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();

        let mut stream = Cursor::new(Vec::<u8>::new());
        array_put(&mut stream, &opts, 1, 7, 3, &raw).unwrap();

        stream.set_position(0);
        let mut out = vec![0u8; 7 * 4];
        let n = array_get(&mut stream, &opts, 1, 7, 3, &mut out).unwrap();
        assert_eq!(n, 7);
        assert_eq!(out, raw);
    }

    #[test]
    fn blocksize_zero_allows_any_block_sizes() {
        let mut data = Vec::new();
        write_record(&mut data, &[1]);
        write_record(&mut data, &[2, 3, 4]);
        write_record(&mut data, &[5, 6]);

        let opts = Options::parse("e");
        let mut stream = Cursor::new(data);
        let mut buf = vec![0u8; 6 * 4];
        let n = array_get(&mut stream, &opts, 1, 6, 0, &mut buf).unwrap();
        assert_eq!(n, 6);
    }
}
