//! Hardening suite: malformed, truncated, and adversarial buffers.
//!
//! The parser's contract under bad input is narrow and testable: every call
//! returns `Ok` or a typed `ParseError`, never panics, and never reads or
//! writes outside the caller's buffer. These tests feed it the inputs that
//! historically break in-place parsers.

use httpchop::{MAX_HEADERS, ParseError, parse_request, parse_response};

const CANONICAL_REQUEST: &[u8] =
    b"POST /items HTTP/1.1\r\nHost: example.com\r\nContent-Type: application/json\r\n\r\n{\"id\":7}";

const CANONICAL_RESPONSE: &[u8] =
    b"HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nServer: t\r\n\r\nno such item";

// ============================================================================
// Truncation sweeps
// ============================================================================

#[test]
fn request_truncated_at_every_byte_never_panics() {
    for cut in 0..=CANONICAL_REQUEST.len() {
        let mut buf = CANONICAL_REQUEST[..cut].to_vec();
        // Ok or Err are both acceptable; reaching the next iteration is the
        // assertion.
        let _ = parse_request(&mut buf);
    }
}

#[test]
fn response_truncated_at_every_byte_never_panics() {
    for cut in 0..=CANONICAL_RESPONSE.len() {
        let mut buf = CANONICAL_RESPONSE[..cut].to_vec();
        let _ = parse_response(&mut buf);
    }
}

#[test]
fn truncation_before_the_boundary_is_typed() {
    // Everything from "headers look complete" up to the start of the final
    // terminator must be the unterminated-block error, not a success with
    // junk views.
    let full = b"GET / HTTP/1.1\r\nHost: a\r\nAccept: b\r\n\r\n";
    let boundary = full.len() - 4;
    for cut in boundary..full.len() - 1 {
        let mut buf = full[..cut].to_vec();
        assert!(
            matches!(
                parse_request(&mut buf),
                Err(ParseError::UnterminatedHeaderBlock { .. })
            ),
            "cut at {cut} should be unterminated"
        );
    }

    // One byte more and the lone \r is a complete terminator unit: the
    // boundary exists and the message parses, headerless body and all.
    let mut buf = full[..full.len() - 1].to_vec();
    let req = parse_request(&mut buf).unwrap();
    assert_eq!(req.headers().len(), 2);
    assert_eq!(req.body(), None);
}

// ============================================================================
// Degenerate buffers
// ============================================================================

#[test]
fn tiny_buffers_error_cleanly() {
    let cases: &[&[u8]] = &[b"", b"G", b" ", b"\r\n", b"\r\n\r\n", b"\0", b"GET"];
    for raw in cases {
        let mut buf = raw.to_vec();
        assert!(parse_request(&mut buf).is_err(), "{raw:?} should not parse");
        let mut buf = raw.to_vec();
        assert!(parse_response(&mut buf).is_err(), "{raw:?} should not parse");
    }
}

#[test]
fn leading_nul_hides_the_whole_buffer() {
    let mut buf = b"\0GET / HTTP/1.1\r\n\r\n".to_vec();
    assert!(matches!(
        parse_request(&mut buf),
        Err(ParseError::MalformedLeadingLine { .. })
    ));
}

// ============================================================================
// Terminator zoo
// ============================================================================

#[test]
fn mixed_terminators_within_one_message() {
    let mut buf = b"GET /m HTTP/1.1\nHost: a\r\nAccept: b\n\r\nbody".to_vec();
    let req = parse_request(&mut buf).unwrap();

    assert_eq!(req.headers().len(), 2);
    assert_eq!(req.headers().find(b"Host").unwrap().value(), b"a");
    assert_eq!(req.headers().find(b"Accept").unwrap().value(), b"b");
    assert_eq!(req.body(), Some(&b"body"[..]));
}

#[test]
fn lone_cr_terminators_parse() {
    let mut buf = b"GET / HTTP/1.1\rHost: a\r\rbody".to_vec();
    let req = parse_request(&mut buf).unwrap();

    assert_eq!(req.headers().len(), 1);
    assert_eq!(req.headers().find(b"Host").unwrap().value(), b"a");
    assert_eq!(req.body(), Some(&b"body"[..]));
}

#[test]
fn crlf_boundary_then_crlf_in_body_is_left_alone() {
    let mut buf = b"GET / HTTP/1.1\r\nHost: a\r\n\r\nline1\r\nline2\r\n".to_vec();
    let req = parse_request(&mut buf).unwrap();
    assert_eq!(req.body(), Some(&b"line1\r\nline2\r\n"[..]));
}

// ============================================================================
// Header table limits
// ============================================================================

fn request_with_headers(count: usize) -> Vec<u8> {
    let mut raw = String::from("GET / HTTP/1.1\r\n");
    for i in 0..count {
        use std::fmt::Write;
        write!(raw, "X-{i}: v{i}\r\n").unwrap();
    }
    raw.push_str("\r\n");
    raw.into_bytes()
}

#[test]
fn exactly_max_headers_parse() {
    let mut buf = request_with_headers(MAX_HEADERS);
    let req = parse_request(&mut buf).unwrap();
    assert_eq!(req.headers().len(), MAX_HEADERS);
}

#[test]
fn one_header_too_many_overflows() {
    let mut buf = request_with_headers(MAX_HEADERS + 1);
    assert!(matches!(
        parse_request(&mut buf),
        Err(ParseError::HeaderTableOverflow { capacity: MAX_HEADERS })
    ));
}

#[test]
fn far_too_many_headers_still_just_overflow() {
    let mut buf = request_with_headers(500);
    assert!(matches!(
        parse_request(&mut buf),
        Err(ParseError::HeaderTableOverflow { .. })
    ));
}

// ============================================================================
// Hostile values
// ============================================================================

#[test]
fn binary_junk_in_values_is_preserved() {
    let mut raw = b"GET / HTTP/1.1\r\nX-Bin: ".to_vec();
    raw.extend_from_slice(&[0x01, 0x02, 0xfe, 0xff, b'\t', 0x7f]);
    raw.extend_from_slice(b"\r\n\r\n");

    let mut buf = raw;
    let req = parse_request(&mut buf).unwrap();
    let entry = req.headers().find(b"X-Bin").unwrap();
    assert_eq!(entry.value(), &[0x01, 0x02, 0xfe, 0xff, b'\t', 0x7f]);
    assert_eq!(entry.value_str(), None);
}

#[test]
fn colon_heavy_values_survive() {
    let mut buf =
        b"GET / HTTP/1.1\r\nAuthorization: Basic dXNlcjpwYXNz\r\nX-Time: 12:34:56\r\n\r\n"
            .to_vec();
    let req = parse_request(&mut buf).unwrap();

    assert_eq!(
        req.headers().find(b"Authorization").unwrap().value(),
        b"Basic dXNlcjpwYXNz"
    );
    assert_eq!(req.headers().find(b"X-Time").unwrap().value(), b"12:34:56");
}

#[test]
fn multibyte_utf8_values_round_trip_through_str() {
    let mut buf = "GET / HTTP/1.1\r\nX-Greeting: こんにちは\r\n\r\n".as_bytes().to_vec();
    let req = parse_request(&mut buf).unwrap();

    let entry = req.headers().find(b"X-Greeting").unwrap();
    assert_eq!(entry.value_str(), Some("こんにちは"));
}

#[test]
fn very_long_path_and_value() {
    let path = "/".repeat(8 * 1024);
    let value = "v".repeat(16 * 1024);
    let mut buf = format!("GET {path} HTTP/1.1\r\nX-Long: {value}\r\n\r\n").into_bytes();
    let req = parse_request(&mut buf).unwrap();

    assert_eq!(req.path().len(), 8 * 1024);
    assert_eq!(req.headers().find(b"X-Long").unwrap().value().len(), 16 * 1024);
}

// ============================================================================
// Large bodies stay zero-copy
// ============================================================================

#[test]
fn large_body_is_a_view_not_a_copy() {
    let body: Vec<u8> = (0..64 * 1024u32).map(|i| (i % 251) as u8 + 1).collect();
    let mut raw = b"PUT /blob HTTP/1.1\r\nHost: a\r\n\r\n".to_vec();
    let header_len = raw.len();
    raw.extend_from_slice(&body);

    let range = raw.as_ptr_range();
    let req = parse_request(&mut raw).unwrap();

    let view = req.body().unwrap();
    assert_eq!(view, &body[..]);
    assert!(range.contains(&view.as_ptr()));
    // The view starts exactly where the boundary ended.
    assert_eq!(view.as_ptr() as usize - range.start as usize, header_len);
}
