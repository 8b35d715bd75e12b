//! In-place, zero-copy HTTP/1.x message parsing.
//!
//! `httpchop` tokenizes a request or response destructively: delimiter
//! bytes inside the caller's mutable buffer are overwritten with NUL, and
//! the parsed result is a set of views (borrowed slices) into that same
//! buffer. Apart from a handful of copied version and status digits,
//! nothing is copied and nothing is allocated, on success or failure.
//!
//! # Features
//!
//! - Request and response parsing over one contiguous `&mut [u8]`
//! - Fixed-capacity header table, linear exact-match lookup
//! - Body capture as a view past the blank-line boundary
//! - `\r\n` and bare `\n` line terminators, including at the boundary
//! - Bounded scans with typed errors; no panics on truncated input
//!
//! # Example
//!
//! ```
//! let mut buf = b"GET /items/42 HTTP/1.1\r\nHost: example.com\r\n\r\n".to_vec();
//! let req = httpchop::parse_request(&mut buf).unwrap();
//!
//! assert_eq!(req.method(), b"GET");
//! assert_eq!(req.path(), b"/items/42");
//! assert_eq!(req.headers().find(b"Host").unwrap().value(), b"example.com");
//! ```
//!
//! # What this is not
//!
//! No chunked-transfer decoding, no `Content-Length` interpretation (the
//! body is whatever follows the blank line, verbatim), no header folding,
//! no streaming, no case-insensitive lookup, no I/O. The parse consumes one
//! complete buffered message per call, and the buffer is no longer valid
//! HTTP text afterwards.

#![deny(unsafe_code)]

mod error;
mod headers;
mod line;
mod message;
mod scan;

pub use error::ParseError;
pub use headers::{BODY_KEY, HeaderEntry, HeaderTable, MAX_HEADERS};
pub use line::{StatusCode, Version};
pub use message::{Request, Response, parse_request, parse_response};
