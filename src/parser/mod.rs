#[macro_use]
pub mod utils;
pub mod details;
pub mod fields;
pub mod indent;
pub mod iters;
pub mod protocols;
pub mod reader;
pub mod routes;

pub use crate::error::ParserError;
pub use indent::{Promotion, TreeBuilder};
pub use iters::{ProtocolIterator, RouteIterator};
pub use protocols::ProtocolTableParser;
pub use reader::{Line, LineReader};
pub use routes::{RouteFormat, RouteTableParser};

use crate::models::{Protocol, Route};
use std::io::BufRead;
#[cfg(feature = "oneio")]
use std::io::{BufReader, Read};

/// How the detail block of a protocol row is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailMode {
    /// Known fields only, each with its own decoder; unknown fields are an error.
    #[default]
    DispatchTable,
    /// Any field, nested by indentation with [TreeBuilder].
    Indentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    pub route_format: RouteFormat,
    pub detail_mode: DetailMode,
    /// Promotion policy of [DetailMode::Indentation].
    pub promotion: Promotion,
    /// Emit protocol rows of unsupported kinds, with empty details.
    pub include_unsupported: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            route_format: RouteFormat::default(),
            detail_mode: DetailMode::default(),
            promotion: Promotion::Preserve,
            include_unsupported: false,
        }
    }
}

/// Parser over one BIRD CLI transcript.
///
/// The same parser reads either table; pick one with [BirdParser::into_protocol_iter] or
/// [BirdParser::into_route_iter], or collect with [BirdParser::parse_protocols] /
/// [BirdParser::parse_routes].
pub struct BirdParser<R> {
    reader: LineReader<R>,
    options: ParserOptions,
}

#[cfg(feature = "oneio")]
impl BirdParser<BufReader<Box<dyn Read>>> {
    /// Open a transcript by path or URL; gzip and bzip2 files are decompressed on the fly.
    pub fn new(path: &str) -> Result<Self, ParserError> {
        let reader: Box<dyn Read> = oneio::get_reader(path)?;
        Ok(BirdParser::from_reader(BufReader::new(reader)))
    }
}

impl<R: BufRead> BirdParser<R> {
    pub fn from_reader(reader: R) -> Self {
        BirdParser {
            reader: LineReader::new(reader),
            options: ParserOptions::default(),
        }
    }

    pub fn with_options(self, options: ParserOptions) -> Self {
        BirdParser { options, ..self }
    }

    pub fn route_format(mut self, format: RouteFormat) -> Self {
        self.options.route_format = format;
        self
    }

    pub fn detail_mode(mut self, mode: DetailMode) -> Self {
        self.options.detail_mode = mode;
        self
    }

    pub fn promotion(mut self, promotion: Promotion) -> Self {
        self.options.promotion = promotion;
        self
    }

    pub fn include_unsupported(mut self) -> Self {
        self.options.include_unsupported = true;
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn parse_protocols(self) -> Result<Vec<Protocol>, ParserError> {
        self.into_protocol_iter().collect()
    }

    pub fn parse_routes(self) -> Result<Vec<Route>, ParserError> {
        self.into_route_iter().collect()
    }

    pub(crate) fn into_parts(self) -> (LineReader<R>, ParserOptions) {
        (self.reader, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_options() {
        let parser = BirdParser::from_reader("".as_bytes())
            .route_format(RouteFormat::SeparateNextHop)
            .detail_mode(DetailMode::Indentation)
            .promotion(Promotion::Replace)
            .include_unsupported();
        assert_eq!(
            parser.options(),
            &ParserOptions {
                route_format: RouteFormat::SeparateNextHop,
                detail_mode: DetailMode::Indentation,
                promotion: Promotion::Replace,
                include_unsupported: true,
            }
        );
    }

    #[test]
    fn test_collect_routes() {
        let input = "184.164.240.0/24   via 10.0.0.1 on eth1 [bgp1 20:07:01] * (100)\n                   via 10.0.0.2 on eth1 [bgp2 20:07:01] (100)\n";
        let routes = BirdParser::from_reader(input.as_bytes())
            .parse_routes()
            .unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].network.as_deref(), Some("184.164.240.0/24"));
    }

    #[cfg(feature = "oneio")]
    #[test]
    fn test_new_from_gzip_file() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("protocols.txt.gz");
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder
            .write_all(b"name proto table state since info\nbgp1 BGP master up 20:07:01 Established\n")
            .unwrap();
        encoder.finish().unwrap();

        let protocols = BirdParser::new(path.to_str().unwrap())
            .unwrap()
            .parse_protocols()
            .unwrap();
        assert_eq!(protocols.len(), 1);
        assert_eq!(protocols[0].name, "bgp1");
    }
}
