//! Options parser (L2).
//!
//! Translates a compact, null-terminated option string into an [`Options`]
//! value. A single pass over the bytes, last occurrence of each key wins,
//! unknown bytes are ignored. `s` is the one key with a side effect beyond
//! its own field: it disables transform irrevocably for the call, the way
//! `string8` data is never byte-swapped regardless of what `t`/`T` say.

use crate::endian::Endian;

/// The element kind selected by an options string. `string8` is the fixed
/// 8-character ECLIPSE keyword type; everything else is a numeric scalar.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ElementKind {
    Byte,
    String8,
    I32,
    F32,
    F64,
}

impl ElementKind {
    /// Size in bytes of one element of this kind.
    pub fn element_size(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::String8 => 8,
            Self::I32 => 4,
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// The default blocksize (in elements) for array operations over this
    /// kind, per the two canonical values the format defines.
    pub fn default_blocksize(self) -> usize {
        match self {
            Self::String8 => 105,
            _ => 1000,
        }
    }
}

impl Default for ElementKind {
    fn default() -> Self {
        Self::I32
    }
}

/// How a record's trailing length marker is handled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TailPolicy {
    /// Tail must be present and equal to the head.
    Strict,
    /// A missing or mismatched tail is tolerated; the cursor is left where
    /// the tail would have started.
    AllowMissing,
    /// No tail is ever read.
    ForceMissing,
}

impl Default for TailPolicy {
    fn default() -> Self {
        Self::Strict
    }
}

/// A decoded options value. Immutable once parsed; a fresh `Options` is
/// produced per call, never cached across calls.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    pub kind: ElementKind,
    pub endian: Endian,
    pub transform: bool,
    pub tail_policy: TailPolicy,
    pub ignore_size_hint: bool,
    string_locked: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            kind: ElementKind::default(),
            endian: Endian::default(),
            transform: true,
            tail_policy: TailPolicy::default(),
            ignore_size_hint: false,
            string_locked: false,
        }
    }
}

impl Options {
    /// Parses an options string. Accepts anything that derefs to `&str`;
    /// bytes outside the known alphabet are simply skipped, matching the
    /// original "unknown characters are ignored" rule.
    pub fn parse(raw: &str) -> Self {
        let mut opts = Self::default();

        for byte in raw.bytes() {
            match byte {
                b'c' | b'b' => opts.kind = ElementKind::Byte,
                b's' => {
                    opts.kind = ElementKind::String8;
                    opts.transform = false;
                    opts.string_locked = true;
                }
                b'i' => opts.kind = ElementKind::I32,
                b'f' => opts.kind = ElementKind::F32,
                b'd' => opts.kind = ElementKind::F64,
                b'E' => opts.endian = Endian::Big,
                b'e' => opts.endian = Endian::Little,
                b't' => {
                    if !opts.string_locked {
                        opts.transform = true;
                    }
                }
                b'T' => {
                    if !opts.string_locked {
                        opts.transform = false;
                    }
                }
                b'#' => opts.ignore_size_hint = true,
                b'~' => opts.tail_policy = TailPolicy::ForceMissing,
                b'$' => opts.tail_policy = TailPolicy::AllowMissing,
                _ => {}
            }
        }

        opts
    }
}
