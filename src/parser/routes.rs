/*!
Parser for `show route [all]` tables.

Two summary layouts exist and are selected explicitly with [RouteFormat]; see
[Route](crate::models::Route) for examples of both.
*/
use crate::error::ParserError;
use crate::models::{AttrValue, Route};
use crate::parser::details::read_detail_block;
use crate::parser::fields::{parse_desc_colon_int, parse_desc_colon_str, parse_desc_int_list};
use crate::parser::reader::{Line, LineReader};
use log::debug;
use regex::{Captures, Regex};
use std::io::BufRead;

/// Layout of the route summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteFormat {
    /// BIRD 1.x: `<net> via <addr> on <iface> [<proto> <since>] * <info>`.
    #[default]
    InlineNextHop,
    /// BIRD 2.x: `<net> <type> [<proto> <since>] * <info>` followed by a `via <addr> on <iface>`
    /// line.
    SeparateNextHop,
}

impl RouteFormat {
    pub fn summary_regex(&self) -> &'static Regex {
        match self {
            RouteFormat::InlineNextHop => regex!(
                r"^(?P<net>\S+)?\s+(?P<via>\S.*?) \[(?P<proto>\w+) (?P<since>[0-9:.-]+(?: [0-9:.]+)?)(?: from (?P<from>\S+))?\](?: (?P<primary>[*!]))?(?:\s+(?P<info>.*?))?\s*$"
            ),
            RouteFormat::SeparateNextHop => regex!(
                r"^(?P<net>\S+)?\s+(?P<rtype>\w+) \[(?P<proto>\w+) (?P<since>[0-9:.-]+(?: [0-9:.]+)?)(?: from (?P<from>\S+))?\](?: (?P<primary>[*!]))?(?:\s+(?P<info>.*?))?\s*$"
            ),
        }
    }
}

fn via_re() -> &'static Regex {
    regex!(r"^\s+via (?P<via>\S+) on (?P<iface>\S+)\s*$")
}

/// An attribute line. The colon must be followed by whitespace or end the line, so an IPv6
/// `via fe80::1` line is not an attribute.
fn attribute_re() -> &'static Regex {
    regex!(r"^\s+(?P<desc>[^:]+):(?P<data>(?:\s.*)?)$")
}

/// Banner and table headlines BIRD may print around route rows.
fn preamble_re() -> &'static Regex {
    regex!(r"^(?:BIRD \S+ ready\.|Table \S+:)\s*$")
}

/// Route attributes with a dedicated decoder; everything else is a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAttribute {
    AsPath,
    Med,
    LocalPref,
    Other,
}

impl RouteAttribute {
    pub fn from_key(key: &str) -> RouteAttribute {
        match key {
            "BGP.as_path" => RouteAttribute::AsPath,
            "BGP.med" => RouteAttribute::Med,
            "BGP.local_pref" => RouteAttribute::LocalPref,
            _ => RouteAttribute::Other,
        }
    }

    pub fn decode<R: BufRead>(
        self,
        reader: &mut LineReader<R>,
    ) -> Result<(String, AttrValue), ParserError> {
        match self {
            RouteAttribute::AsPath => {
                let (key, path) = parse_desc_int_list(reader)?;
                Ok((key, path.map(AttrValue::IntList).unwrap_or(AttrValue::Null)))
            }
            RouteAttribute::Med | RouteAttribute::LocalPref => {
                parse_desc_colon_int(reader).map(|(k, v)| (k, AttrValue::Int(v)))
            }
            RouteAttribute::Other => {
                parse_desc_colon_str(reader).map(|(k, v)| (k, AttrValue::Str(v)))
            }
        }
    }
}

fn group(caps: &Captures, name: &str) -> Option<String> {
    caps.name(name)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Incremental `show route` parser; yields one [Route] per call.
///
/// Rows without a network inherit the most recent network seen by this parser.
pub struct RouteTableParser<R> {
    reader: LineReader<R>,
    format: RouteFormat,
    current_network: Option<String>,
}

impl<R: BufRead> RouteTableParser<R> {
    pub fn new(reader: LineReader<R>, format: RouteFormat) -> Self {
        RouteTableParser {
            reader,
            format,
            current_network: None,
        }
    }

    /// Next route, or `None` at end of input.
    pub fn next_route(&mut self) -> Result<Option<Route>, ParserError> {
        let summary_re = self.format.summary_regex();
        while let Some(line) = self.reader.read_line()? {
            if line.is_blank() {
                continue;
            }
            if preamble_re().is_match(line.as_str()) {
                debug!("line {}: skipping {:?}", line.number, line.text);
                continue;
            }
            let caps = summary_re
                .captures(line.as_str())
                .ok_or_else(|| ParserError::UnmatchedRoute {
                    line_no: line.number,
                    line: line.text.clone(),
                })?;

            if let Some(network) = group(&caps, "net") {
                self.current_network = Some(network);
            }
            let marker = caps.name("primary").map(|m| m.as_str());
            let mut route = Route {
                network: self.current_network.clone(),
                rtype: group(&caps, "rtype"),
                via: group(&caps, "via"),
                iface: None,
                proto: caps["proto"].to_string(),
                since: caps["since"].trim().to_string(),
                from: group(&caps, "from"),
                primary: marker == Some("*"),
                sync_error: marker == Some("!"),
                info: group(&caps, "info"),
                attributes: Default::default(),
            };

            if self.format == RouteFormat::SeparateNextHop {
                let (via, iface) = self.read_next_hop(&line)?;
                route.via = Some(via);
                route.iface = Some(iface);
            }

            route.attributes = read_detail_block(
                &mut self.reader,
                attribute_re(),
                Some(summary_re),
                |key, _, reader| RouteAttribute::from_key(key).decode(reader).map(Some),
            )?;
            return Ok(Some(route));
        }
        Ok(None)
    }

    fn read_next_hop(&mut self, summary: &Line) -> Result<(String, String), ParserError> {
        let line = match self.reader.read_line()? {
            Some(line) => line,
            None => {
                return Err(ParserError::UnmatchedVia {
                    line_no: summary.number + 1,
                    line: String::new(),
                })
            }
        };
        let caps = via_re()
            .captures(line.as_str())
            .ok_or_else(|| ParserError::UnmatchedVia {
                line_no: line.number,
                line: line.text.clone(),
            })?;
        Ok((caps["via"].to_string(), caps["iface"].to_string()))
    }
}
