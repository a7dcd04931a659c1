/*!
Iterators over the records of a transcript.

Both iterators return `Result` items so parse errors reach the caller. A parse error ends the
table: the error is returned once and every later call returns `None`.
*/
use crate::error::ParserError;
use crate::models::{Protocol, Route};
use crate::parser::protocols::ProtocolTableParser;
use crate::parser::routes::RouteTableParser;
use crate::parser::BirdParser;
use std::io::BufRead;

impl<R: BufRead> BirdParser<R> {
    /// Read the input as a `show protocols` table.
    pub fn into_protocol_iter(self) -> ProtocolIterator<R> {
        ProtocolIterator::new(self)
    }

    /// Read the input as a `show route` table.
    pub fn into_route_iter(self) -> RouteIterator<R> {
        RouteIterator::new(self)
    }
}

pub struct ProtocolIterator<R> {
    parser: ProtocolTableParser<R>,
    finished: bool,
}

impl<R: BufRead> ProtocolIterator<R> {
    pub(crate) fn new(parser: BirdParser<R>) -> Self {
        let (reader, options) = parser.into_parts();
        ProtocolIterator {
            parser: ProtocolTableParser::new(reader, options),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for ProtocolIterator<R> {
    type Item = Result<Protocol, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.parser.next_protocol() {
            Ok(Some(protocol)) => Some(Ok(protocol)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for ProtocolIterator<R> {}

pub struct RouteIterator<R> {
    parser: RouteTableParser<R>,
    finished: bool,
}

impl<R: BufRead> RouteIterator<R> {
    pub(crate) fn new(parser: BirdParser<R>) -> Self {
        let (reader, options) = parser.into_parts();
        RouteIterator {
            parser: RouteTableParser::new(reader, options.route_format),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for RouteIterator<R> {
    type Item = Result<Route, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.parser.next_route() {
            Ok(Some(route)) => Some(Ok(route)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for RouteIterator<R> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_returned_once() {
        let input = "184.164.240.0/24   via 10.0.0.1 on eth1 [bgp1 20:07:01] * (100)\nnot a route\n184.164.241.0/24   via 10.0.0.1 on eth1 [bgp1 20:07:01] * (100)\n";
        let mut iter = BirdParser::from_reader(input.as_bytes()).into_route_iter();
        assert!(iter.next().unwrap().is_ok());
        assert!(matches!(
            iter.next(),
            Some(Err(ParserError::UnmatchedRoute { line_no: 2, .. }))
        ));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_protocol_iter_header_error() {
        let mut iter = BirdParser::from_reader("garbage\n".as_bytes()).into_protocol_iter();
        assert!(matches!(
            iter.next(),
            Some(Err(ParserError::HeaderMismatch { .. }))
        ));
        assert!(iter.next().is_none());
    }
}
