/*!
bird-parser turns the text output of the BIRD routing daemon's `show protocols [all]` and
`show route [all]` commands into structured records.

# Examples

## Protocol sessions

```
use bird_parser::BirdParser;

let transcript = "\
name     proto    table    state  since       info
device1  Device   master   up     20:06:57
up_2_65002 BGP      bt_up2   up     20:07:01    Established
  Description:    upstream2
  Preference:     100
  BGP state:          Established
    Neighbor address: 10.100.0.122
    Neighbor AS:      65002
";

let protocols = BirdParser::from_reader(transcript.as_bytes())
    .parse_protocols()
    .unwrap();
// only BGP sessions are reported by default
assert_eq!(protocols.len(), 1);
assert_eq!(protocols[0].name, "up_2_65002");
assert_eq!(protocols[0].bgp_state(), Some("Established"));
```

## Routes

Routes are read one at a time; a row printed without a network belongs to the network of the
row above it.

```
use bird_parser::BirdParser;

let transcript = "\
184.164.240.0/24   via 10.100.0.122 on eth1 [up_2_65002 20:07:01] * (100) [AS65002i]
\tBGP.as_path: 65002 3356
                   via 10.100.0.121 on eth1 [up_1_65001 20:07:02] (100) [AS65001i]
\tBGP.as_path: 65001
";

for route in BirdParser::from_reader(transcript.as_bytes()).into_route_iter() {
    let route = route.unwrap();
    println!("{:?} via {:?} origin {:?}", route.network, route.via, route.origin_asn());
}
```

BIRD 2.x prints the next hop on its own line; select that layout with
[RouteFormat::SeparateNextHop].

## Files

With the default `local` feature, [BirdParser::new] opens local or remote transcripts and
decompresses `.gz` and `.bz2` files on the fly:

```no_run
use bird_parser::BirdParser;

for protocol in BirdParser::new("protocols.txt.gz").unwrap().into_protocol_iter() {
    println!("{:?}", protocol.unwrap());
}
```
*/

pub mod error;
pub mod models;
pub mod parser;

pub use error::ParserError;
pub use models::*;
pub use parser::{
    BirdParser, DetailMode, LineReader, ParserOptions, Promotion, ProtocolIterator,
    RouteFormat, RouteIterator, TreeBuilder,
};
