/*!
error module defines the error types used in bird-parser.
*/
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    /// The column header of a `show protocols` table is not the one we know how to read.
    ///
    /// ## Occurs during:
    ///  - Reading the first (non-banner) line of a protocol table
    #[error("unexpected protocol table header {found:?}")]
    HeaderMismatch { found: String },
    /// A line in a route table matches neither the summary grammar nor an attribute block.
    ///
    /// ## Occurs during:
    ///  - Scanning a `show route` transcript
    #[error("line {line_no}: unrecognized route summary {line:?}")]
    UnmatchedRoute { line_no: usize, line: String },
    /// The line following a route summary is not a `via <addr> on <iface>` line.
    ///
    /// ## Occurs during:
    ///  - Scanning a `show route` transcript in the separate next-hop layout
    #[error("line {line_no}: expected next-hop line, found {line:?}")]
    UnmatchedVia { line_no: usize, line: String },
    /// A detail block contains a key with no registered decoder.
    #[error("line {line_no}: no decoder for field {key:?} in {line:?}")]
    UnknownField {
        key: String,
        line_no: usize,
        line: String,
    },
    /// A decoder was dispatched on a line it cannot read.
    #[error("line {line_no}: malformed {field} field {line:?}")]
    MalformedField {
        field: &'static str,
        line_no: usize,
        line: String,
    },
    /// The indentation of a block cannot be mapped onto the current frame stack.
    #[error("line {line_no}: inconsistent indentation {line:?}")]
    IndentInconsistency { line_no: usize, line: String },
    /// A line was pushed back before anything was read, or twice in a row.
    #[error("rewind requested with no line to replay")]
    InvalidRewind,
    /// A general IO error triggered by the underlying line stream.
    #[error(transparent)]
    IoError(#[from] io::Error),
    #[cfg(feature = "oneio")]
    #[error(transparent)]
    OneIoError(#[from] oneio::OneIoError),
}

impl ParserError {
    /// Line number of the offending input line, for errors tied to one.
    pub fn line_no(&self) -> Option<usize> {
        match self {
            ParserError::UnmatchedRoute { line_no, .. }
            | ParserError::UnmatchedVia { line_no, .. }
            | ParserError::UnknownField { line_no, .. }
            | ParserError::MalformedField { line_no, .. }
            | ParserError::IndentInconsistency { line_no, .. } => Some(*line_no),
            _ => None,
        }
    }
}
