/*!
Parser for `show protocols [all]` tables.

```text
BIRD 1.6.8 ready.
name     proto    table    state  since       info
device1  Device   master   up     20:06:57
up_2_65002 BGP      bt_up2   up     20:07:01    Established
  Description:    upstream2
  Preference:     100
  ...
  BGP state:          Established
    Neighbor address: 10.100.0.122
    Neighbor AS:      65002
```

Only rows of [SUPPORTED_PROTOCOLS](crate::models::SUPPORTED_PROTOCOLS) are emitted by default;
the detail lines of every other row are consumed and dropped.
*/
use crate::error::ParserError;
use crate::models::{is_supported_protocol, Protocol, Value, ValueMap};
use crate::parser::details::{read_detail_block, skip_indented_block};
use crate::parser::fields::{
    parse_desc_colon_int, parse_desc_colon_str, parse_route_change_stats, parse_route_counts,
};
use crate::parser::indent::TreeBuilder;
use crate::parser::reader::{Line, LineReader};
use crate::parser::utils::{expect_line, normalize_key};
use crate::parser::{DetailMode, ParserOptions};
use log::debug;
use regex::Regex;
use std::io::BufRead;

/// Expected columns of the table header, compared case-insensitively.
pub const HEADER_LINE_FIELDS: [&str; 6] = ["name", "proto", "table", "state", "since", "info"];

fn summary_re() -> &'static Regex {
    regex!(
        r"^(?P<name>\S+)\s+(?P<proto>\w+)\s+(?P<table>\S+)\s+(?P<state>\w+)\s+(?P<since>\d{4}-\d{2}-\d{2} [0-9:.]+|[0-9:.-]+)\s*(?P<info>.*)$"
    )
}

fn greeting_re() -> &'static Regex {
    regex!(r"^BIRD \S+ ready\.\s*$")
}

/// A protocol-level detail line: exactly two columns of indentation. The colon is optional so
/// BIRD 2 `Channel ipv4` headlines belong to the block.
fn details_re() -> &'static Regex {
    regex!(r"^\s{2}(?P<desc>\S[^:]*?)\s*(?::(?P<data>.*))?$")
}

/// A line inside the `BGP state` or a channel block: four columns of indentation.
fn nested_details_re() -> &'static Regex {
    regex!(r"^\s{4}(?P<desc>\S[^:]*):(?P<data>.*)$")
}

/// Fields of a protocol detail block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolField {
    Description,
    Preference,
    InputFilter,
    OutputFilter,
    Table,
    ImportLimit,
    ReceiveLimit,
    ExportLimit,
    Routes,
    RouteChangeStats,
    BgpState,
    /// BIRD 2 per-channel block (`Channel ipv4`), keyed by its headline.
    Channel,
}

impl ProtocolField {
    pub fn from_key(key: &str) -> Option<ProtocolField> {
        match key {
            "Description" => Some(ProtocolField::Description),
            "Preference" => Some(ProtocolField::Preference),
            "Input filter" => Some(ProtocolField::InputFilter),
            "Output filter" => Some(ProtocolField::OutputFilter),
            "Table" => Some(ProtocolField::Table),
            "Import limit" => Some(ProtocolField::ImportLimit),
            "Receive limit" => Some(ProtocolField::ReceiveLimit),
            "Export limit" => Some(ProtocolField::ExportLimit),
            "Routes" => Some(ProtocolField::Routes),
            "Route change stats" => Some(ProtocolField::RouteChangeStats),
            "BGP state" => Some(ProtocolField::BgpState),
            key if key.starts_with("Channel ") => Some(ProtocolField::Channel),
            _ => None,
        }
    }

    pub fn decode<R: BufRead>(
        self,
        reader: &mut LineReader<R>,
    ) -> Result<(String, Value), ParserError> {
        match self {
            ProtocolField::Preference => {
                parse_desc_colon_int(reader).map(|(k, v)| (k, Value::Int(v)))
            }
            ProtocolField::Routes => parse_route_counts(reader).map(|(k, v)| (k, Value::Map(v))),
            ProtocolField::RouteChangeStats => {
                parse_route_change_stats(reader).map(|(k, v)| (k, Value::Map(v)))
            }
            ProtocolField::BgpState => parse_bgp_state(reader),
            ProtocolField::Channel => parse_channel(reader),
            ProtocolField::Description
            | ProtocolField::InputFilter
            | ProtocolField::OutputFilter
            | ProtocolField::Table
            | ProtocolField::ImportLimit
            | ProtocolField::ReceiveLimit
            | ProtocolField::ExportLimit => {
                parse_desc_colon_str(reader).map(|(k, v)| (k, Value::Str(v)))
            }
        }
    }
}

/// Fields of the `BGP state` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BgpStateField {
    NeighborAddress,
    NeighborAs,
    LocalAs,
    NeighborId,
    NeighborCaps,
    Session,
    SourceAddress,
    HoldTimer,
    KeepaliveTimer,
    RouteLimit,
    LastError,
    ConnectDelay,
}

impl BgpStateField {
    pub fn from_key(key: &str) -> Option<BgpStateField> {
        match key {
            "Neighbor address" => Some(BgpStateField::NeighborAddress),
            "Neighbor AS" => Some(BgpStateField::NeighborAs),
            "Local AS" => Some(BgpStateField::LocalAs),
            "Neighbor ID" => Some(BgpStateField::NeighborId),
            "Neighbor caps" => Some(BgpStateField::NeighborCaps),
            "Session" => Some(BgpStateField::Session),
            "Source address" => Some(BgpStateField::SourceAddress),
            "Hold timer" => Some(BgpStateField::HoldTimer),
            "Keepalive timer" => Some(BgpStateField::KeepaliveTimer),
            "Route limit" => Some(BgpStateField::RouteLimit),
            "Last error" => Some(BgpStateField::LastError),
            "Connect delay" => Some(BgpStateField::ConnectDelay),
            _ => None,
        }
    }

    pub fn decode<R: BufRead>(
        self,
        reader: &mut LineReader<R>,
    ) -> Result<(String, Value), ParserError> {
        match self {
            BgpStateField::NeighborAs | BgpStateField::LocalAs => {
                parse_desc_colon_int(reader).map(|(k, v)| (k, Value::Int(v)))
            }
            _ => parse_desc_colon_str(reader).map(|(k, v)| (k, Value::Str(v))),
        }
    }
}

/// The `BGP state:` line and the known session fields below it.
///
/// Returns `("bgp", {"BGP state": <state>, "details": {...}})`. The sub-block ends at the first
/// line that is not a known session field.
pub fn parse_bgp_state<R: BufRead>(
    reader: &mut LineReader<R>,
) -> Result<(String, Value), ParserError> {
    let (key, state) = parse_desc_colon_str(reader)?;
    let details = read_detail_block(reader, nested_details_re(), None, |key, _, reader| {
        match BgpStateField::from_key(key) {
            Some(field) => field.decode(reader).map(Some),
            None => Ok(None),
        }
    })?;

    let mut result = ValueMap::new();
    result.insert(key, Value::Str(state));
    result.insert("details".to_string(), Value::Map(details));
    Ok(("bgp".to_string(), Value::Map(result)))
}

/// A BIRD 2 `Channel <name>` headline and the four-column fields below it.
///
/// Fields shared with the protocol level (`Preference`, `Routes`, `Route change stats`, ...)
/// use the same decoders; any other channel field is kept as a string.
pub fn parse_channel<R: BufRead>(
    reader: &mut LineReader<R>,
) -> Result<(String, Value), ParserError> {
    let headline = expect_line(reader, "channel")?;
    let fields = read_detail_block(reader, nested_details_re(), None, |key, _, reader| {
        match ProtocolField::from_key(key) {
            Some(ProtocolField::BgpState | ProtocolField::Channel) => Ok(None),
            Some(field) => field.decode(reader).map(Some),
            None => parse_desc_colon_str(reader).map(|(k, v)| Some((k, Value::Str(v)))),
        }
    })?;
    Ok((normalize_key(headline.as_str()), Value::Map(fields)))
}

fn decode_protocol_field<R: BufRead>(
    key: &str,
    line: &Line,
    reader: &mut LineReader<R>,
) -> Result<Option<(String, Value)>, ParserError> {
    match ProtocolField::from_key(key) {
        Some(field) => field.decode(reader).map(Some),
        None => Err(ParserError::UnknownField {
            key: key.to_string(),
            line_no: line.number,
            line: line.text.clone(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    AwaitHeader,
    Scanning,
    Done,
}

/// Incremental `show protocols` parser; yields one [Protocol] per call.
pub struct ProtocolTableParser<R> {
    reader: LineReader<R>,
    options: ParserOptions,
    state: TableState,
}

impl<R: BufRead> ProtocolTableParser<R> {
    pub fn new(reader: LineReader<R>, options: ParserOptions) -> Self {
        ProtocolTableParser {
            reader,
            options,
            state: TableState::AwaitHeader,
        }
    }

    /// Next emitted row, or `None` once the table is exhausted.
    pub fn next_protocol(&mut self) -> Result<Option<Protocol>, ParserError> {
        loop {
            match self.state {
                TableState::AwaitHeader => {
                    self.read_header()?;
                    self.state = TableState::Scanning;
                }
                TableState::Scanning => match self.scan_row()? {
                    Some(protocol) => return Ok(Some(protocol)),
                    None => self.state = TableState::Done,
                },
                TableState::Done => return Ok(None),
            }
        }
    }

    fn read_header(&mut self) -> Result<(), ParserError> {
        let mut header = self.reader.read_line()?;
        if let Some(line) = &header {
            if greeting_re().is_match(line.as_str()) {
                debug!("skipping greeting {:?}", line.text);
                header = self.reader.read_line()?;
            }
        }
        let text = header.map(|l| l.text).unwrap_or_default();
        let fields: Vec<String> = text
            .split_whitespace()
            .map(|f| f.to_lowercase())
            .collect();
        if fields != HEADER_LINE_FIELDS {
            return Err(ParserError::HeaderMismatch { found: text });
        }
        Ok(())
    }

    /// Scan forward to the next emitted row; `None` at end of input.
    fn scan_row(&mut self) -> Result<Option<Protocol>, ParserError> {
        while let Some(line) = self.reader.read_line()? {
            let caps = match summary_re().captures(line.as_str()) {
                Some(caps) => caps,
                None => {
                    debug!("line {}: no protocol summary in {:?}", line.number, line.text);
                    continue;
                }
            };
            let mut protocol = Protocol {
                name: caps["name"].trim().to_string(),
                proto: caps["proto"].trim().to_string(),
                table: caps["table"].trim().to_string(),
                state: caps["state"].trim().to_string(),
                since: caps["since"].trim().to_string(),
                info: caps["info"].trim().to_string(),
                details: ValueMap::new(),
            };

            if is_supported_protocol(&protocol.proto) {
                protocol.details = self.read_details()?;
                return Ok(Some(protocol));
            }

            let skipped = skip_indented_block(&mut self.reader)?;
            debug!(
                "line {}: protocol {} of kind {} not supported, {} detail lines dropped",
                line.number, protocol.name, protocol.proto, skipped
            );
            if self.options.include_unsupported {
                return Ok(Some(protocol));
            }
        }
        Ok(None)
    }

    fn read_details(&mut self) -> Result<ValueMap, ParserError> {
        match self.options.detail_mode {
            DetailMode::DispatchTable => read_detail_block(
                &mut self.reader,
                details_re(),
                None,
                decode_protocol_field,
            ),
            DetailMode::Indentation => TreeBuilder::new()
                .promotion(self.options.promotion)
                .parent_indent(0)
                .build(&mut self.reader),
        }
    }
}
