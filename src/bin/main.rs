use std::io::{BufRead, Write};

use bird_parser::{BirdParser, DetailMode, ParserError, Promotion, RouteFormat};
use clap::{ArgGroup, Parser, ValueEnum};
use log::info;

/// bird-parser converts the output of BIRD's `show protocols all` and `show route all`
/// commands into JSON.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(group(ArgGroup::new("table").required(true).args(["protocols", "route"])))]
struct Opts {
    /// Transcript file, local or remote; `-` reads standard input.
    #[clap(name = "FILE")]
    file_path: String,

    /// Input is a `show protocols` table; output is one JSON array
    #[clap(long)]
    protocols: bool,

    /// Input is a `show route` table; output is one JSON object per line
    #[clap(long)]
    route: bool,

    /// Route summary layout
    #[clap(long, value_enum, default_value_t = RouteLayout::Inline)]
    route_format: RouteLayout,

    /// How protocol detail blocks are decoded
    #[clap(long, value_enum, default_value_t = Details::Fields)]
    details: Details,

    /// What happens to a value that gains indented children (with `--details tree`)
    #[clap(long, value_enum, default_value_t = PromotionPolicy::Preserve)]
    promotion: PromotionPolicy,

    /// Also report protocols other than BGP, without details
    #[clap(long)]
    include_unsupported: bool,

    /// Pretty-print JSON output
    #[clap(long)]
    pretty: bool,

    /// Write output to this file instead of stdout; `.gz` and `.bz2` files are compressed
    #[clap(short, long)]
    output: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RouteLayout {
    /// BIRD 1.x: next hop inside the summary line
    Inline,
    /// BIRD 2.x: next hop on the line below the summary
    Separate,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Details {
    /// Known fields with typed decoders
    Fields,
    /// Any field, nested by indentation
    Tree,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PromotionPolicy {
    Replace,
    Preserve,
}

fn configure<R: BufRead>(parser: BirdParser<R>, opts: &Opts) -> BirdParser<R> {
    let parser = parser
        .route_format(match opts.route_format {
            RouteLayout::Inline => RouteFormat::InlineNextHop,
            RouteLayout::Separate => RouteFormat::SeparateNextHop,
        })
        .detail_mode(match opts.details {
            Details::Fields => DetailMode::DispatchTable,
            Details::Tree => DetailMode::Indentation,
        })
        .promotion(match opts.promotion {
            PromotionPolicy::Replace => Promotion::Replace,
            PromotionPolicy::Preserve => Promotion::Preserve,
        });
    match opts.include_unsupported {
        true => parser.include_unsupported(),
        false => parser,
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    match pretty {
        true => serde_json::to_string_pretty(value),
        false => serde_json::to_string(value),
    }
}

fn run<R: BufRead>(
    parser: BirdParser<R>,
    opts: &Opts,
    writer: &mut dyn Write,
) -> Result<usize, Box<dyn std::error::Error>> {
    let parser = configure(parser, opts);
    if opts.protocols {
        let protocols = parser.parse_protocols()?;
        writeln!(writer, "{}", to_json(&protocols, opts.pretty)?)?;
        return Ok(protocols.len());
    }

    let mut count = 0;
    for route in parser.into_route_iter() {
        writeln!(writer, "{}", to_json(&route?, opts.pretty)?)?;
        count += 1;
    }
    Ok(count)
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    let mut writer: Box<dyn Write> = match &opts.output {
        Some(path) => match oneio::get_writer(path) {
            Ok(w) => w,
            Err(err) => {
                eprintln!("{}", ParserError::from(err));
                std::process::exit(1);
            }
        },
        None => Box::new(std::io::stdout().lock()),
    };

    let result = match opts.file_path.as_str() {
        "-" => run(
            BirdParser::from_reader(std::io::stdin().lock()),
            &opts,
            &mut writer,
        ),
        path => match BirdParser::new(path) {
            Ok(parser) => run(parser, &opts, &mut writer),
            Err(err) => Err(err.into()),
        },
    };

    match result {
        Ok(count) => {
            info!("wrote {} records", count);
            if let Err(err) = writer.flush() {
                eprintln!("{}", err);
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
