/*!
Reader for the indented `key: value` blocks that follow a summary line.
*/
use crate::error::ParserError;
use crate::parser::reader::{Line, LineReader};
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use std::io::BufRead;

/// Read one detail block into an ordered map.
///
/// `shape` decides which lines belong to the block and must capture the field name as `desc`.
/// The block ends, with the terminating line pushed back, at end of input, at a line matching
/// `stop`, or at the first line that does not match `shape`.
///
/// For every field line the line is pushed back and `decode` is called with the trimmed key.
/// The decoder reads the field itself and returns `Some((key, value))`, or returns `None`
/// without reading anything to end the block at that line.
pub fn read_detail_block<R, V, F>(
    reader: &mut LineReader<R>,
    shape: &Regex,
    stop: Option<&Regex>,
    mut decode: F,
) -> Result<IndexMap<String, V>, ParserError>
where
    R: BufRead,
    F: FnMut(&str, &Line, &mut LineReader<R>) -> Result<Option<(String, V)>, ParserError>,
{
    let mut result = IndexMap::new();
    loop {
        let line = match reader.read_line()? {
            Some(line) => line,
            None => {
                reader.rewind_line()?;
                break;
            }
        };
        if stop.is_some_and(|re| re.is_match(line.as_str())) {
            reader.rewind_line()?;
            break;
        }
        let key = match shape.captures(line.as_str()) {
            Some(caps) => caps["desc"].trim().to_string(),
            None => {
                reader.rewind_line()?;
                break;
            }
        };
        reader.rewind_line()?;
        match decode(&key, &line, reader)? {
            Some((k, v)) => {
                result.insert(k, v);
            }
            None => {
                debug!("line {}: field {:?} ends the block", line.number, key);
                break;
            }
        }
    }
    Ok(result)
}

/// Consume the indented lines following a summary line without decoding them.
///
/// Stops at end of input or at the first blank or unindented line, which is pushed back.
/// Returns the number of lines skipped.
pub fn skip_indented_block<R: BufRead>(reader: &mut LineReader<R>) -> Result<usize, ParserError> {
    let mut skipped = 0;
    loop {
        match reader.read_line()? {
            Some(line) if !line.is_blank() && line.indent() > 0 => skipped += 1,
            _ => {
                reader.rewind_line()?;
                return Ok(skipped);
            }
        }
    }
}
