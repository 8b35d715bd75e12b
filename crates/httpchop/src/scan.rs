//! Bounded byte scanning over the message buffer.
//!
//! Every scan in the parser goes through these helpers so that no code path
//! can read past the effective end of the buffer. Offsets are recorded as
//! [`Span`]s while the buffer is still borrowed mutably; the spans are turned
//! into slices only after all in-place rewriting is done.

/// Half-open byte range `[start, end)` into the parse buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Materialize the span against the frozen buffer.
    pub(crate) fn slice<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.start..self.end]
    }
}

/// Position of `needle` in `buf[from..end]`, if any.
pub(crate) fn find_byte(buf: &[u8], from: usize, end: usize, needle: u8) -> Option<usize> {
    if from >= end {
        return None;
    }
    memchr::memchr(needle, &buf[from..end]).map(|i| from + i)
}

/// Position of the first ASCII decimal digit in `buf[from..end]`, if any.
pub(crate) fn find_digit(buf: &[u8], from: usize, end: usize) -> Option<usize> {
    let mut i = from;
    while i < end {
        if buf[i].is_ascii_digit() {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Position of the first `\r` or `\n` in `buf[from..end]`, if any.
pub(crate) fn find_line_break(buf: &[u8], from: usize, end: usize) -> Option<usize> {
    if from >= end {
        return None;
    }
    memchr::memchr2(b'\r', b'\n', &buf[from..end]).map(|i| from + i)
}

/// Whether `byte` starts a line terminator unit.
pub(crate) fn is_line_break(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}

/// Offset just past the terminator unit starting at `i`.
///
/// A unit is `\r\n`, a lone `\n`, or a lone `\r`; consuming it atomically is
/// what keeps CRLF input from producing phantom empty lines. The caller must
/// have checked that `buf[i]` starts a unit.
pub(crate) fn consume_line_break(buf: &[u8], i: usize, end: usize) -> usize {
    debug_assert!(i < end && is_line_break(buf[i]));
    if buf[i] == b'\r' && i + 1 < end && buf[i + 1] == b'\n' {
        i + 2
    } else {
        i + 1
    }
}

// ============================================================================
// Tests
// ============================================================================
