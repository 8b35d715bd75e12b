//! Message parsing entry points.
//!
//! Both entry points run the same pipeline: fix the effective end of the
//! buffer (first NUL or buffer length, decided before anything is
//! rewritten), chop the leading line in place, tokenize the header block in
//! place, then freeze the buffer and hand back a result made of views into
//! it. The result borrows the buffer for as long as it lives; the buffer is
//! no longer valid HTTP text afterwards.

use crate::error::ParseError;
use crate::headers::{self, HeaderTable};
use crate::line::{self, StatusCode, Version};

// ============================================================================
// Request
// ============================================================================

/// A parsed request: views into the caller's buffer plus copied digits.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    method: &'a [u8],
    path: &'a [u8],
    version: Version,
    headers: HeaderTable<'a>,
}

impl<'a> Request<'a> {
    /// Request method, exactly as it appeared (`b"GET"`, `b"POST"`, ...).
    #[must_use]
    pub fn method(&self) -> &'a [u8] {
        self.method
    }

    /// Request method as UTF-8, if it is valid UTF-8.
    #[must_use]
    pub fn method_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.method).ok()
    }

    /// Request path, exactly as it appeared, query string and all.
    #[must_use]
    pub fn path(&self) -> &'a [u8] {
        self.path
    }

    /// Request path as UTF-8, if it is valid UTF-8.
    #[must_use]
    pub fn path_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.path).ok()
    }

    /// HTTP version from the request line.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// The header table.
    #[must_use]
    pub fn headers(&self) -> &HeaderTable<'a> {
        &self.headers
    }

    /// The message body, if bytes followed the blank-line boundary.
    #[must_use]
    pub fn body(&self) -> Option<&'a [u8]> {
        self.headers.body()
    }
}

/// Parses a request in place.
///
/// Rewrites delimiter bytes inside `buf` to NUL and returns a [`Request`]
/// whose fields are views into `buf`. The parse is destructive: keep the
/// result, not the buffer.
///
/// # Example
///
/// ```
/// let mut buf = b"GET /items/42 HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n".to_vec();
/// let req = httpchop::parse_request(&mut buf).unwrap();
///
/// assert_eq!(req.method(), b"GET");
/// assert_eq!(req.path(), b"/items/42");
/// assert_eq!(req.version().as_str(), "1.1");
/// assert_eq!(req.headers().len(), 2);
/// assert_eq!(req.headers().find(b"Host").unwrap().value(), b"example.com");
/// assert_eq!(req.body(), None);
/// ```
///
/// # Errors
///
/// [`ParseError::MalformedLeadingLine`] if the request line is truncated or
/// missing its delimiters, [`ParseError::UnterminatedHeaderBlock`] if the
/// buffer ends before the blank line, [`ParseError::HeaderTableOverflow`]
/// if the message has more than [`MAX_HEADERS`](crate::MAX_HEADERS)
/// headers.
pub fn parse_request(buf: &mut [u8]) -> Result<Request<'_>, ParseError> {
    let end = effective_end(buf);
    let (leading, resume) = line::scan_request_line(buf, end)?;
    let block = headers::tokenize(buf, resume, end)?;

    // All rewriting is done; views can borrow now.
    let frozen: &[u8] = buf;
    Ok(Request {
        method: leading.method.slice(frozen),
        path: leading.path.slice(frozen),
        version: leading.version,
        headers: HeaderTable::from_raw(&block, frozen),
    })
}

// ============================================================================
// Response
// ============================================================================

/// A parsed response: views into the caller's buffer plus copied digits.
#[derive(Debug, Clone)]
pub struct Response<'a> {
    version: Version,
    code: StatusCode,
    reason: &'a [u8],
    headers: HeaderTable<'a>,
}

impl<'a> Response<'a> {
    /// HTTP version from the status line.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// The three-digit status code.
    #[must_use]
    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// Reason phrase, empty when the status line carried none.
    #[must_use]
    pub fn reason(&self) -> &'a [u8] {
        self.reason
    }

    /// Reason phrase as UTF-8, if it is valid UTF-8.
    #[must_use]
    pub fn reason_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.reason).ok()
    }

    /// The header table.
    #[must_use]
    pub fn headers(&self) -> &HeaderTable<'a> {
        &self.headers
    }

    /// The message body, if bytes followed the blank-line boundary.
    #[must_use]
    pub fn body(&self) -> Option<&'a [u8]> {
        self.headers.body()
    }
}

/// Parses a response in place.
///
/// Same contract as [`parse_request`], with a status line up front instead
/// of a request line.
///
/// # Example
///
/// ```
/// let mut buf =
///     b"HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\n\r\nmissing".to_vec();
/// let res = httpchop::parse_response(&mut buf).unwrap();
///
/// assert_eq!(res.code().as_u16(), 404);
/// assert_eq!(res.reason(), b"Not Found");
/// assert_eq!(res.body(), Some(&b"missing"[..]));
/// ```
///
/// # Errors
///
/// As for [`parse_request`].
pub fn parse_response(buf: &mut [u8]) -> Result<Response<'_>, ParseError> {
    let end = effective_end(buf);
    let (leading, resume) = line::scan_status_line(buf, end)?;
    let block = headers::tokenize(buf, resume, end)?;

    let frozen: &[u8] = buf;
    Ok(Response {
        version: leading.version,
        code: leading.code,
        reason: leading.reason.slice(frozen),
        headers: HeaderTable::from_raw(&block, frozen),
    })
}

/// Effective end of the buffer: the first NUL if the caller left one, the
/// buffer length otherwise. Fixed before any delimiter is rewritten, so the
/// NULs the parser writes never truncate its own scans.
fn effective_end(buf: &[u8]) -> usize {
    memchr::memchr(0, buf).unwrap_or(buf.len())
}

// ============================================================================
// Tests
// ============================================================================
