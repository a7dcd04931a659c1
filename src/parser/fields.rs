/*!
Decoders for single `key: value` fields of BIRD detail blocks.

Every decoder starts at the first line of its field (the block reader pushes that line back
before dispatching) and returns the normalized key together with the decoded value. A decoder
that reads past its field pushes the extra line back.
*/
use crate::error::ParserError;
use crate::models::{Value, ValueMap};
use crate::parser::reader::LineReader;
use crate::parser::utils::{expect_line, malformed, normalize_key};
use std::io::BufRead;

/// Lines starting with this marker continue the value of the previous field.
pub const CONTINUATION_MARKER: &str = "\t\t";

/// Column names of the `Route change stats` table.
pub const ROUTE_CHANGE_STATS_COLUMNS: [&str; 5] =
    ["received", "rejected", "filtered", "ignored", "accepted"];

/// Row labels of the `Route change stats` table, in print order.
pub const ROUTE_CHANGE_STATS_ROWS: [&str; 4] = [
    "Import updates",
    "Import withdraws",
    "Export updates",
    "Export withdraws",
];

/// `  Preference:     100`
pub fn parse_desc_colon_int<R: BufRead>(
    reader: &mut LineReader<R>,
) -> Result<(String, i64), ParserError> {
    let line = expect_line(reader, "integer")?;
    let caps = regex!(r"^\s+(?P<desc>[^:]+):\s+(?P<data>\d+)\s*$")
        .captures(line.as_str())
        .ok_or_else(|| malformed("integer", &line))?;
    let value = caps["data"]
        .parse::<i64>()
        .map_err(|_| malformed("integer", &line))?;
    Ok((normalize_key(&caps["desc"]), value))
}

/// `  Description:    upstream2`, with any `\t\t` continuation lines appended.
pub fn parse_desc_colon_str<R: BufRead>(
    reader: &mut LineReader<R>,
) -> Result<(String, String), ParserError> {
    let first = expect_line(reader, "string")?;
    let mut buf = first.text.trim_end().to_string();
    loop {
        match reader.read_line()? {
            Some(next) if next.text.starts_with(CONTINUATION_MARKER) => {
                buf.push_str(next.text.trim());
            }
            _ => {
                reader.rewind_line()?;
                break;
            }
        }
    }
    let caps = regex!(r"^\s+(?P<desc>[^:]+):(?P<data>.*)$")
        .captures(&buf)
        .ok_or_else(|| malformed("string", &first))?;
    Ok((normalize_key(&caps["desc"]), caps["data"].trim().to_string()))
}

/// `\tBGP.as_path: 65002 3356`
///
/// Returns `None` for values holding an AS-SET (`{...}`): set members are unordered and are
/// not decoded into the list.
pub fn parse_desc_int_list<R: BufRead>(
    reader: &mut LineReader<R>,
) -> Result<(String, Option<Vec<i64>>), ParserError> {
    let line = expect_line(reader, "integer list")?;
    let caps = regex!(r"^\s+(?P<desc>[^:]+):\s*(?P<data>.*)$")
        .captures(line.as_str())
        .ok_or_else(|| malformed("integer list", &line))?;
    let key = normalize_key(&caps["desc"]);
    let data = &caps["data"];
    if data.contains('{') {
        return Ok((key, None));
    }
    let values = data
        .split_whitespace()
        .map(|token| token.parse::<i64>())
        .collect::<Result<Vec<i64>, _>>()
        .map_err(|_| malformed("integer list", &line))?;
    Ok((key, Some(values)))
}

/// `  Routes:         5 imported, 2 filtered, 0 exported, 20 preferred`
pub fn parse_route_counts<R: BufRead>(
    reader: &mut LineReader<R>,
) -> Result<(String, ValueMap), ParserError> {
    let line = expect_line(reader, "route counts")?;
    let caps = regex!(r"^\s+(?P<desc>[^:]+):\s+(?P<data>.+?)\s*$")
        .captures(line.as_str())
        .ok_or_else(|| malformed("route counts", &line))?;
    let mut counts = ValueMap::new();
    for item in caps["data"].split(',') {
        let item_caps = regex!(r"^\s*(?P<count>\d+) (?P<name>\w+)\s*$")
            .captures(item)
            .ok_or_else(|| malformed("route counts", &line))?;
        let count = item_caps["count"]
            .parse::<i64>()
            .map_err(|_| malformed("route counts", &line))?;
        counts.insert(item_caps["name"].to_string(), Value::Int(count));
    }
    Ok((normalize_key(&caps["desc"]), counts))
}

/// The five-column `Route change stats` table:
///
/// ```text
///   Route change stats:     received   rejected   filtered    ignored   accepted
///     Import updates:              5          0          0          0          5
///     Import withdraws:            0          0        ---          0          0
///     Export updates:              5          5          0        ---          0
///     Export withdraws:            0        ---        ---        ---          0
/// ```
///
/// Dash cells mean "not applicable" and are kept as the dash string.
pub fn parse_route_change_stats<R: BufRead>(
    reader: &mut LineReader<R>,
) -> Result<(String, ValueMap), ParserError> {
    let header = expect_line(reader, "route change stats")?;
    if !regex!(r"^\s+Route change stats:\s+received\s+rejected\s+filtered\s+ignored\s+accepted\s*$")
        .is_match(header.as_str())
    {
        return Err(malformed("route change stats", &header));
    }

    let mut stats = ValueMap::new();
    for expected in ROUTE_CHANGE_STATS_ROWS {
        let line = expect_line(reader, "route change stats")?;
        let caps = regex!(
            r"^\s+(?P<desc>[\w ]+):\s+(?P<received>\d+|-+)\s+(?P<rejected>\d+|-+)\s+(?P<filtered>\d+|-+)\s+(?P<ignored>\d+|-+)\s+(?P<accepted>\d+|-+)\s*$"
        )
        .captures(line.as_str())
        .ok_or_else(|| malformed("route change stats", &line))?;
        let desc = normalize_key(&caps["desc"]);
        if desc != expected {
            return Err(malformed("route change stats", &line));
        }
        let mut row = ValueMap::new();
        for column in ROUTE_CHANGE_STATS_COLUMNS {
            let cell = &caps[column];
            let value = match cell.parse::<i64>() {
                Ok(v) => Value::Int(v),
                Err(_) => Value::Str(cell.to_string()),
            };
            row.insert(column.to_string(), value);
        }
        stats.insert(desc, Value::Map(row));
    }
    Ok(("route_change_stats".to_string(), stats))
}
