//! Keyword-order collaborator (§6.4).
//!
//! Preserves the order in which ECLIPSE keywords appear across a read/write
//! cycle. Not part of the record codec — it is an ordered sequence of short
//! strings a consumer keeps alongside the records it indexes, with a strict
//! write-then-read discipline.
//!
//! Grounded in the original `restart_kw_list` object: writing sets the mode
//! to `Writing` and forbids `next`; reading sets it to `Reading` and forbids
//! `append`; `reset` clears both the mode and the `modified` flag.

use std::io::{self, Read, Write};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Initialized,
    Writing,
    Reading,
}

/// An ordered, append-only-per-pass sequence of keywords.
pub struct KeywordList {
    keywords: Vec<String>,
    current_index: usize,
    active_elements: usize,
    modified: bool,
    mode: Mode,
}

impl Default for KeywordList {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordList {
    pub fn new() -> Self {
        Self {
            keywords: Vec::new(),
            current_index: 0,
            active_elements: 0,
            modified: false,
            mode: Mode::Initialized,
        }
    }

    /// Appends `kw` at the current write position, growing the list if
    /// needed. Sets `modified` only if this differs from whatever keyword
    /// previously occupied that slot.
    ///
    /// # Panics
    ///
    /// Panics if the list is currently in read mode (a `next()` happened
    /// since the last `reset()`) — call `reset()` first.
    pub fn append(&mut self, kw: &str) {
        if self.mode == Mode::Reading {
            panic!("KeywordList is in reading mode; call reset() before append()");
        }
        self.mode = Mode::Writing;

        if self.current_index == self.keywords.len() {
            self.keywords.push(kw.to_string());
            self.modified = true;
        } else if self.keywords[self.current_index] != kw {
            self.keywords[self.current_index] = kw.to_string();
            self.modified = true;
        }

        self.current_index += 1;
        self.active_elements = self.current_index;
    }

    /// Whether any `append` since the last `reset()` changed a keyword.
    pub fn modified(&self) -> bool {
        self.modified
    }

    /// Resets the read/write cursor to the start and clears `modified`.
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.mode = Mode::Initialized;
        self.modified = false;
    }

    /// Returns the next keyword in order, or `None` past the end.
    ///
    /// # Panics
    ///
    /// Panics if the list is currently in write mode — call `reset()` first.
    pub fn next(&mut self) -> Option<&str> {
        if self.mode == Mode::Writing {
            panic!("KeywordList is in writing mode; call reset() before next()");
        }
        self.mode = Mode::Reading;

        if self.current_index == self.active_elements {
            return None;
        }

        let kw = &self.keywords[self.current_index];
        self.current_index += 1;
        Some(kw)
    }

    /// Resets, then returns the first keyword (equivalent to `reset()`
    /// followed by `next()`).
    pub fn first(&mut self) -> Option<&str> {
        self.reset();
        self.next()
    }

    pub fn len(&self) -> usize {
        self.active_elements
    }

    pub fn is_empty(&self) -> bool {
        self.active_elements == 0
    }

    /// Writes the list as a big-endian element count followed by each
    /// keyword's big-endian byte length and UTF-8 bytes, sharing the same
    /// framing convention as the rest of this crate.
    pub fn persist<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&(self.active_elements as u32).to_be_bytes())?;
        for kw in &self.keywords[..self.active_elements] {
            let bytes = kw.as_bytes();
            out.write_all(&(bytes.len() as u32).to_be_bytes())?;
            out.write_all(bytes)?;
        }
        Ok(())
    }

    /// Loads a list previously written by `persist`, replacing this list's
    /// contents and resetting the cursor, matching
    /// `restart_kw_list_fread`'s behavior of resetting after loading.
    pub fn load<R: Read>(&mut self, input: &mut R) -> io::Result<()> {
        let count = read_u32(input)? as usize;
        let mut keywords = Vec::with_capacity(count);

        for _ in 0..count {
            let len = read_u32(input)? as usize;
            let mut bytes = vec![0u8; len];
            input.read_exact(&mut bytes)?;
            keywords.push(String::from_utf8_lossy(&bytes).into_owned());
        }

        self.keywords = keywords;
        self.active_elements = count;
        self.reset();

        Ok(())
    }
}

fn read_u32<R: Read>(input: &mut R) -> io::Result<u32> {
    let mut raw = [0u8; 4];
    input.read_exact(&mut raw)?;
    Ok(u32::from_be_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn append_sets_modified_only_on_change() {
        let mut list = KeywordList::new();
        assert!(!list.modified());

        list.append("SWAT");
        assert!(list.modified());

        list.reset();
        assert!(!list.modified());

        list.append("SWAT");
        assert!(!list.modified());

        list.append("PRESSURE");
        assert!(list.modified());
    }

    #[test]
    fn forward_only_iteration() {
        let mut list = KeywordList::new();
        list.append("SWAT");
        list.append("PRESSURE");
        list.reset();

        assert_eq!(list.first(), Some("SWAT"));
        assert_eq!(list.next(), Some("PRESSURE"));
        assert_eq!(list.next(), None);
    }

    #[test]
    #[should_panic(expected = "reading mode")]
    fn append_after_read_without_reset_panics() {
        let mut list = KeywordList::new();
        list.append("SWAT");
        list.reset();
        list.next();
        list.append("PRESSURE");
    }

    #[test]
    #[should_panic(expected = "writing mode")]
    fn next_after_write_without_reset_panics() {
        let mut list = KeywordList::new();
        list.append("SWAT");
        list.next();
    }

    #[test]
    fn persist_then_load_round_trips() {
        let mut list = KeywordList::new();
        list.append("SWAT");
        list.append("PRESSURE");
        list.append("RS");

        let mut buf = Vec::new();
        list.persist(&mut buf).unwrap();

        let mut loaded = KeywordList::new();
        loaded.load(&mut Cursor::new(buf)).unwrap();

        assert!(!loaded.modified());
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.first(), Some("SWAT"));
        assert_eq!(loaded.next(), Some("PRESSURE"));
        assert_eq!(loaded.next(), Some("RS"));
    }
}
