//! Header tokenization and the fixed-capacity header table.
//!
//! The tokenizer is a byte-at-a-time state machine that walks the buffer
//! from the resume offset the leading-line scanner returned. A `:` closes
//! the current key (overwritten with NUL in place), a line terminator closes
//! the current value (likewise), and a terminator where a key should start
//! is the blank-line boundary: whatever follows it is the message body,
//! recorded as a synthetic final table entry under the key `body`.
//!
//! # Capacity
//!
//! The table is a fixed inline array; nothing here allocates. Up to
//! [`MAX_HEADERS`] real headers fit, plus one reserved slot for the
//! synthetic body entry, so a full table can still carry a body. A message
//! with more headers than that fails with
//! [`ParseError::HeaderTableOverflow`] instead of spilling.
//!
//! # Lookup
//!
//! [`HeaderTable::find`] is a linear scan in insertion order, first exact
//! byte-for-byte match wins. Keys are compared case-sensitively; callers
//! that need `host` to match `Host` must canonicalize before parsing.

use crate::error::ParseError;
use crate::scan::{self, Span};

/// Maximum number of real headers the table can hold.
pub const MAX_HEADERS: usize = 16;

/// Key of the synthetic final entry that carries the body view.
pub const BODY_KEY: &[u8] = b"body";

// One slot is reserved beyond MAX_HEADERS so the body entry never competes
// with real headers for space.
const TABLE_SLOTS: usize = MAX_HEADERS + 1;

// ============================================================================
// Entries and table
// ============================================================================

/// One key/value pair borrowed from the parsed buffer.
#[derive(Debug, Clone, Copy)]
pub struct HeaderEntry<'a> {
    key: &'a [u8],
    value: &'a [u8],
}

impl<'a> HeaderEntry<'a> {
    const EMPTY: Self = Self { key: &[], value: &[] };

    /// Header key, exactly as it appeared.
    #[must_use]
    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    /// Header key as UTF-8, if it is valid UTF-8.
    #[must_use]
    pub fn key_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.key).ok()
    }

    /// Header value, exactly as it appeared.
    #[must_use]
    pub fn value(&self) -> &'a [u8] {
        self.value
    }

    /// Header value as UTF-8, if it is valid UTF-8.
    #[must_use]
    pub fn value_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.value).ok()
    }
}

/// Fixed-capacity table of header views into the parsed buffer.
#[derive(Debug, Clone)]
pub struct HeaderTable<'a> {
    entries: [HeaderEntry<'a>; TABLE_SLOTS],
    /// Populated slots, including the body slot when present.
    slots: usize,
    /// Real headers only.
    num_headers: usize,
}

impl<'a> HeaderTable<'a> {
    /// Materializes the recorded spans against the frozen buffer.
    pub(crate) fn from_raw(raw: &RawHeaderBlock, frozen: &'a [u8]) -> Self {
        let mut entries = [HeaderEntry::EMPTY; TABLE_SLOTS];
        for (slot, e) in raw.entries[..raw.count].iter().enumerate() {
            entries[slot] = HeaderEntry {
                key: e.key.slice(frozen),
                value: e.value.slice(frozen),
            };
        }
        let mut slots = raw.count;
        if let Some(body) = raw.body {
            entries[slots] = HeaderEntry {
                key: BODY_KEY,
                value: body.slice(frozen),
            };
            slots += 1;
        }
        Self { entries, slots, num_headers: raw.count }
    }

    /// Number of headers, excluding the synthetic body entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.num_headers
    }

    /// Whether the message carried no headers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_headers == 0
    }

    /// First entry whose key matches `key` byte for byte, in insertion
    /// order. Case-sensitive; the body slot is not scanned.
    #[must_use]
    pub fn find(&self, key: &[u8]) -> Option<&HeaderEntry<'a>> {
        self.headers().iter().find(|e| e.key == key)
    }

    /// Iterates the headers in insertion order, body slot excluded.
    /// Duplicate keys appear as separate entries.
    pub fn iter(&self) -> std::slice::Iter<'_, HeaderEntry<'a>> {
        self.headers().iter()
    }

    /// The message body view, if the message had one.
    ///
    /// The body slot, when present, is the last populated slot and carries
    /// the literal key [`BODY_KEY`]; that entry is the single source of
    /// truth here, not header-count arithmetic.
    #[must_use]
    pub fn body(&self) -> Option<&'a [u8]> {
        if self.slots > self.num_headers {
            let last = &self.entries[self.slots - 1];
            if last.key == BODY_KEY {
                return Some(last.value);
            }
        }
        None
    }

    fn headers(&self) -> &[HeaderEntry<'a>] {
        &self.entries[..self.num_headers]
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

/// Tokenizer states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// At the start of, or inside, a header key.
    Key,
    /// Past the `:` of the current header, inside its value.
    Value,
    /// Past the blank-line boundary; tokenization is done.
    Content,
}

/// Header spans recorded during tokenization, before the freeze.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RawEntry {
    pub key: Span,
    pub value: Span,
}

/// Tokenizer output: recorded header spans plus the optional body span.
#[derive(Debug)]
pub(crate) struct RawHeaderBlock {
    pub entries: [RawEntry; MAX_HEADERS],
    pub count: usize,
    pub body: Option<Span>,
}

/// Tokenizes the header block of `buf[resume..end]` in place.
///
/// Keys are NUL-terminated at their `:`, values at their line terminator.
/// Terminator units (`\r\n`, lone `\n`, lone `\r`) are consumed atomically;
/// a terminator seen where a key should start ends the block, and any bytes
/// after it become the body span. Reaching `end` before that boundary is
/// [`ParseError::UnterminatedHeaderBlock`].
pub(crate) fn tokenize(
    buf: &mut [u8],
    resume: usize,
    end: usize,
) -> Result<RawHeaderBlock, ParseError> {
    let mut entries = [RawEntry::default(); MAX_HEADERS];
    let mut count = 0usize;
    let mut body = None;

    let mut state = State::Key;
    // Start of the token being accumulated (key or value).
    let mut token_start = resume;
    // Completed key span waiting for its value.
    let mut key = Span::default();
    let mut i = resume;

    loop {
        match state {
            State::Key => {
                if i >= end {
                    return Err(ParseError::UnterminatedHeaderBlock { offset: end });
                }
                let byte = buf[i];
                if byte == b':' {
                    buf[i] = 0;
                    key = Span::new(token_start, i);
                    i += 1;
                    // Conventional `: ` separator; at most one space is
                    // eaten, a missing one means the value starts at once.
                    if i < end && buf[i] == b' ' {
                        i += 1;
                    }
                    token_start = i;
                    state = State::Value;
                } else if scan::is_line_break(byte) {
                    // Line ended before any `:`: this is the blank-line
                    // boundary. Text on a colon-less line is consumed by it,
                    // not recorded.
                    let after = scan::consume_line_break(buf, i, end);
                    if after < end {
                        body = Some(Span::new(after, end));
                    }
                    state = State::Content;
                } else {
                    i += 1;
                }
            }
            State::Value => {
                if i >= end {
                    return Err(ParseError::UnterminatedHeaderBlock { offset: end });
                }
                if scan::is_line_break(buf[i]) {
                    let after = scan::consume_line_break(buf, i, end);
                    buf[i] = 0;
                    if count == MAX_HEADERS {
                        return Err(ParseError::HeaderTableOverflow { capacity: MAX_HEADERS });
                    }
                    entries[count] = RawEntry { key, value: Span::new(token_start, i) };
                    count += 1;
                    i = after;
                    token_start = i;
                    state = State::Key;
                } else {
                    // Everything else, `:` included, is literal in a value.
                    i += 1;
                }
            }
            State::Content => break,
        }
    }

    Ok(RawHeaderBlock { entries, count, body })
}

// ============================================================================
// Tests
// ============================================================================
