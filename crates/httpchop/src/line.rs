//! Leading-line scanning: request lines and status lines.
//!
//! The first line of a message is chopped in place, like everything else:
//! the two spaces of a request line are overwritten with NUL so the method
//! and path become NUL-delimited views, and a status line's reason phrase is
//! NUL-terminated where its line ends. The only bytes ever copied out of the
//! buffer are the version digits and the three status-code digits, which are
//! too small and too scattered to be worth borrowing.
//!
//! Both scanners return the offset just past the line terminator; header
//! tokenization resumes exactly there. Scans never cross the effective end
//! of the buffer; a delimiter that fails to appear before it is
//! [`ParseError::MalformedLeadingLine`].

use crate::error::ParseError;
use crate::scan::{self, Span};

// ============================================================================
// Version
// ============================================================================

/// HTTP version digits copied out of a leading line.
///
/// Holds the version exactly as written: a major digit, optionally followed
/// by `.` and a minor digit. `HTTP/1.1` and `HTTP/2` both fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    bytes: [u8; 3],
    len: u8,
}

impl Version {
    fn single(major: u8) -> Self {
        Self { bytes: [major, 0, 0], len: 1 }
    }

    fn with_minor(major: u8, minor: u8) -> Self {
        Self { bytes: [major, b'.', minor], len: 3 }
    }

    /// Major version as a number (`1` for `HTTP/1.1`).
    #[must_use]
    pub fn major(&self) -> u8 {
        self.bytes[0] - b'0'
    }

    /// Minor version as a number, if the line carried one.
    #[must_use]
    pub fn minor(&self) -> Option<u8> {
        if self.len == 3 { Some(self.bytes[2] - b'0') } else { None }
    }

    /// The version exactly as written, e.g. `"1.1"` or `"2"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Construction only ever stores ASCII digits and '.'.
        std::str::from_utf8(&self.bytes[..usize::from(self.len)]).unwrap_or("")
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Status code
// ============================================================================

/// Three-digit status code copied out of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode {
    digits: [u8; 3],
}

impl StatusCode {
    fn from_digits(digits: [u8; 3]) -> Option<Self> {
        if digits.iter().all(u8::is_ascii_digit) {
            Some(Self { digits })
        } else {
            None
        }
    }

    /// The code exactly as written, e.g. `"404"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Construction only ever stores ASCII digits.
        std::str::from_utf8(&self.digits).unwrap_or("")
    }

    /// The code as a number.
    #[must_use]
    pub fn as_u16(&self) -> u16 {
        self.digits
            .iter()
            .fold(0u16, |acc, &d| acc * 10 + u16::from(d - b'0'))
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Request line
// ============================================================================

/// Request-line fields as recorded spans plus the copied version.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawRequestLine {
    pub method: Span,
    pub path: Span,
    pub version: Version,
}

/// Tokenizes `METHOD SP PATH SP VERSION` in place.
///
/// Overwrites both spaces with NUL, copies the version digits, and returns
/// the recorded fields together with the resume offset just past the line
/// terminator.
pub(crate) fn scan_request_line(
    buf: &mut [u8],
    end: usize,
) -> Result<(RawRequestLine, usize), ParseError> {
    let method_end = scan::find_byte(buf, 0, end, b' ')
        .ok_or(ParseError::MalformedLeadingLine { offset: end })?;
    buf[method_end] = 0;

    let path_start = method_end + 1;
    let path_end = scan::find_byte(buf, path_start, end, b' ')
        .ok_or(ParseError::MalformedLeadingLine { offset: end })?;
    buf[path_end] = 0;

    let (version, after_version) = scan_version(buf, path_end + 1, end)?;
    let resume = end_of_line(buf, after_version, end)?;

    Ok((
        RawRequestLine {
            method: Span::new(0, method_end),
            path: Span::new(path_start, path_end),
            version,
        },
        resume,
    ))
}

// ============================================================================
// Status line
// ============================================================================

/// Status-line fields: copied version and code, reason as a span.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawStatusLine {
    pub version: Version,
    pub code: StatusCode,
    pub reason: Span,
}

/// Tokenizes `VERSION SP CODE [SP REASON]` in place.
///
/// The version and the three code digits are copied; the reason phrase (if
/// any) is NUL-terminated where the line ends, at the `\r` when the line
/// ends `\r\n`, so the recorded span never carries a stray `\r`.
pub(crate) fn scan_status_line(
    buf: &mut [u8],
    end: usize,
) -> Result<(RawStatusLine, usize), ParseError> {
    let (version, after_version) = scan_version(buf, 0, end)?;

    let code_start = scan::find_digit(buf, after_version, end)
        .ok_or(ParseError::MalformedLeadingLine { offset: end })?;
    let code_end = code_start + 3;
    if code_end > end {
        return Err(ParseError::MalformedLeadingLine { offset: end });
    }
    let code = StatusCode::from_digits([buf[code_start], buf[code_start + 1], buf[code_start + 2]])
        .ok_or(ParseError::MalformedLeadingLine { offset: code_start })?;

    let brk = scan::find_line_break(buf, code_end, end)
        .ok_or(ParseError::MalformedLeadingLine { offset: end })?;
    let resume = scan::consume_line_break(buf, brk, end);

    // A space after the code starts the reason; anything else means there is
    // none. Checked before the NUL lands on the terminator.
    let reason = if buf[code_end] == b' ' {
        Span::new(code_end + 1, brk)
    } else {
        Span::new(brk, brk)
    };
    buf[brk] = 0;

    Ok((RawStatusLine { version, code, reason }, resume))
}

// ============================================================================
// Shared pieces
// ============================================================================

/// Copies the version starting at the first decimal digit at or after `from`.
///
/// Returns the version and the offset just past its last digit. A `.` after
/// the major digit must be followed by another digit.
fn scan_version(buf: &[u8], from: usize, end: usize) -> Result<(Version, usize), ParseError> {
    let major_at =
        scan::find_digit(buf, from, end).ok_or(ParseError::MalformedLeadingLine { offset: end })?;
    let major = buf[major_at];

    let dot_at = major_at + 1;
    if dot_at < end && buf[dot_at] == b'.' {
        let minor_at = dot_at + 1;
        if minor_at >= end || !buf[minor_at].is_ascii_digit() {
            return Err(ParseError::MalformedLeadingLine { offset: minor_at });
        }
        return Ok((Version::with_minor(major, buf[minor_at]), minor_at + 1));
    }
    Ok((Version::single(major), dot_at))
}

/// Offset just past the line terminator at or after `from`.
fn end_of_line(buf: &[u8], from: usize, end: usize) -> Result<usize, ParseError> {
    let brk = scan::find_line_break(buf, from, end)
        .ok_or(ParseError::MalformedLeadingLine { offset: end })?;
    Ok(scan::consume_line_break(buf, brk, end))
}

// ============================================================================
// Tests
// ============================================================================
