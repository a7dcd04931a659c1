/*!
Line source with a single line of pushback.

All parsers read through [LineReader]: a decoder that reads one line too far hands it back with
[LineReader::rewind_line] and the next [LineReader::read_line] delivers the same line again.
Only one line can be pending at a time.
*/
use crate::error::ParserError;
use std::io::BufRead;

/// One physical input line, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based position in the input.
    pub number: usize,
    pub text: String,
}

impl Line {
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Number of leading whitespace characters.
    pub fn indent(&self) -> usize {
        self.text
            .chars()
            .take_while(|c| c.is_whitespace())
            .count()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Read position of a [LineReader]. `None` lines stand for end of input.
#[derive(Debug)]
enum Cursor {
    /// Nothing read yet.
    Start,
    /// Last line handed out, not pending.
    Fresh(Option<Line>),
    /// Last line handed out and pushed back; the next read replays it.
    Buffered(Option<Line>),
}

pub struct LineReader<R> {
    input: R,
    cursor: Cursor,
    line_count: usize,
    eof: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        LineReader {
            input,
            cursor: Cursor::Start,
            line_count: 0,
            eof: false,
        }
    }

    /// Returns the next line, or the pushed-back one if a rewind is pending.
    ///
    /// At end of input this returns `Ok(None)`, every time it is called.
    pub fn read_line(&mut self) -> Result<Option<Line>, ParserError> {
        match std::mem::replace(&mut self.cursor, Cursor::Start) {
            Cursor::Buffered(line) => {
                self.cursor = Cursor::Fresh(line.clone());
                Ok(line)
            }
            Cursor::Start | Cursor::Fresh(_) => {
                let line = self.next_physical_line()?;
                self.cursor = Cursor::Fresh(line.clone());
                Ok(line)
            }
        }
    }

    /// Push the last line returned by [LineReader::read_line] back.
    ///
    /// Fails with [ParserError::InvalidRewind] if nothing was read yet or the last line is
    /// already pending.
    pub fn rewind_line(&mut self) -> Result<(), ParserError> {
        match std::mem::replace(&mut self.cursor, Cursor::Start) {
            Cursor::Fresh(line) => {
                self.cursor = Cursor::Buffered(line);
                Ok(())
            }
            Cursor::Buffered(line) => {
                self.cursor = Cursor::Buffered(line);
                Err(ParserError::InvalidRewind)
            }
            Cursor::Start => Err(ParserError::InvalidRewind),
        }
    }

    /// Read the next line and push it back right away.
    pub fn peek_line(&mut self) -> Result<Option<Line>, ParserError> {
        let line = self.read_line()?;
        self.rewind_line()?;
        Ok(line)
    }

    /// Number of physical lines pulled from the input so far.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    fn next_physical_line(&mut self) -> Result<Option<Line>, ParserError> {
        if self.eof {
            return Ok(None);
        }
        let mut text = String::new();
        if self.input.read_line(&mut text)? == 0 {
            self.eof = true;
            return Ok(None);
        }
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        self.line_count += 1;
        Ok(Some(Line {
            number: self.line_count,
            text,
        }))
    }
}
