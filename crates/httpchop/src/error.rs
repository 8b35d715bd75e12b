//! Parse failure types.
//!
//! Every failure the parser can report is a structural problem with the
//! buffer. A header key that is simply not present is `Option::None` from
//! [`HeaderTable::find`](crate::HeaderTable::find), never an error.

/// Error type for message parsing.
#[derive(Debug)]
pub enum ParseError {
    /// A leading-line scan reached the end of the buffer before finding its
    /// delimiter, or the version/status digits were missing or malformed.
    MalformedLeadingLine {
        /// Offset at which the scan gave up.
        offset: usize,
    },
    /// More headers than the fixed table can hold.
    HeaderTableOverflow {
        /// Number of header slots in the table.
        capacity: usize,
    },
    /// The buffer ended before a blank-line boundary closed the header block.
    UnterminatedHeaderBlock {
        /// Offset of the effective end of the buffer.
        offset: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedLeadingLine { offset } => {
                write!(f, "malformed leading line: missing delimiter at offset {offset}")
            }
            Self::HeaderTableOverflow { capacity } => {
                write!(f, "header table overflow: more than {capacity} headers")
            }
            Self::UnterminatedHeaderBlock { offset } => {
                write!(
                    f,
                    "unterminated header block: buffer ended at offset {offset} before a blank line"
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

// ============================================================================
// Tests
// ============================================================================
