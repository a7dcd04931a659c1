/*!
Small helpers shared by the line parsers.
*/
use crate::error::ParserError;
use crate::parser::reader::{Line, LineReader};
use std::io::BufRead;

/// Lazily compiled, process-wide [regex::Regex] for a literal pattern.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).expect("invalid built-in regex"))
    }};
}

/// Strip a field key the way BIRD prints it (`  Neighbor AS:` -> `Neighbor AS`).
pub fn normalize_key(key: &str) -> String {
    key.trim().to_string()
}

pub(crate) fn malformed(field: &'static str, line: &Line) -> ParserError {
    ParserError::MalformedField {
        field,
        line_no: line.number,
        line: line.text.clone(),
    }
}

/// Read the line a decoder expects to find; end of input is a malformed field.
pub(crate) fn expect_line<R: BufRead>(
    reader: &mut LineReader<R>,
    field: &'static str,
) -> Result<Line, ParserError> {
    match reader.read_line()? {
        Some(line) => Ok(line),
        None => Err(ParserError::MalformedField {
            field,
            line_no: reader.line_count() + 1,
            line: String::new(),
        }),
    }
}
