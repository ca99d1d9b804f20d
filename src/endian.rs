//! Byte-order transform (L0).
//!
//! Pure, width-dispatched swap over contiguous buffers. Width 1 is a no-op;
//! widths 2/4/8 reverse each element's bytes in place.

/// The two endiannesses a stream can declare. Unrelated to host endianness,
/// which is detected once via [`host_is_little_endian`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Endian {
    Big,
    Little,
}

impl Default for Endian {
    fn default() -> Self {
        Self::Big
    }
}

/// Host endianness, computed once. Rust has no portable const-eval path to
/// this (`cfg(target_endian)` would require a build per target), so this
/// mirrors the "one-shot initialized value" fallback the design notes call
/// for: a `u16` probe evaluated lazily and cached.
pub fn host_is_little_endian() -> bool {
    use std::sync::OnceLock;
    static HOST_LE: OnceLock<bool> = OnceLock::new();
    *HOST_LE.get_or_init(|| 1u16.to_ne_bytes()[0] == 1)
}

fn host_endian() -> Endian {
    if host_is_little_endian() {
        Endian::Little
    } else {
        Endian::Big
    }
}

/// Swaps `buf` in place, treating it as `buf.len() / width` contiguous
/// elements of `width` bytes each. `width` must be one of 1, 2, 4, 8;
/// anything else is a no-op, since the options parser never produces any
/// other element width.
pub fn swap_in_place(buf: &mut [u8], width: usize) {
    if width <= 1 {
        return;
    }

    for chunk in buf.chunks_exact_mut(width) {
        chunk.reverse();
    }
}

/// Whether a transform is actually needed for a call with this stream
/// endianness and the caller's Options transform flag.
pub fn needs_transform(stream_endian: Endian, transform_enabled: bool) -> bool {
    transform_enabled && stream_endian != host_endian()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_one_is_noop() {
        let mut buf = [1u8, 2, 3, 4];
        swap_in_place(&mut buf, 1);
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn width_two_swaps_pairs() {
        let mut buf = [1u8, 2, 3, 4];
        swap_in_place(&mut buf, 2);
        assert_eq!(buf, [2, 1, 4, 3]);
    }

    #[test]
    fn width_four_swaps_each_element() {
        let mut buf = [0u8, 0, 0, 1, 0, 0, 0, 2];
        swap_in_place(&mut buf, 4);
        assert_eq!(buf, [1, 0, 0, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn width_eight_swaps_each_element() {
        let mut buf = [0u8, 0, 0, 0, 0, 0, 0, 1];
        swap_in_place(&mut buf, 8);
        assert_eq!(buf, [1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn needs_transform_matches_endianness_mismatch() {
        let opposite = if host_is_little_endian() {
            Endian::Big
        } else {
            Endian::Little
        };
        let same = if host_is_little_endian() {
            Endian::Little
        } else {
            Endian::Big
        };

        assert!(needs_transform(opposite, true));
        assert!(!needs_transform(same, true));
        assert!(!needs_transform(opposite, false));
    }
}
