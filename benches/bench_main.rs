use bird_parser::{BirdParser, DetailMode, RouteFormat};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

const ROUTES: usize = 10_000;

/// A `show route all` table with two paths per prefix.
fn route_table() -> String {
    let mut table = String::new();
    for n in 0..ROUTES / 2 {
        let prefix = format!("10.{}.{}.0/24", n / 256, n % 256);
        table.push_str(&format!(
            "{:<18} via 10.100.0.122 on eth1 [up_2_65002 20:07:01] * (100) [AS65002i]\n",
            prefix
        ));
        table.push_str(
            "\tType: BGP unicast univ\n\tBGP.origin: IGP\n\tBGP.as_path: 65002 3356 15169\n\tBGP.next_hop: 10.100.0.122\n\tBGP.local_pref: 100\n",
        );
        table.push_str(
            "                   via 10.100.0.121 on eth1 [up_1_65001 20:07:02] (100) [AS65001i]\n",
        );
        table.push_str(
            "\tType: BGP unicast univ\n\tBGP.origin: IGP\n\tBGP.as_path: 65001 {64512 64513}\n\tBGP.next_hop: 10.100.0.121\n\tBGP.med: 10\n\tBGP.community: (65000,1) (65000,2)\n",
        );
    }
    table
}

/// A `show protocols all` table of BGP sessions.
fn protocol_table(sessions: usize) -> String {
    let mut table = String::from("name     proto    table    state  since       info\n");
    for n in 0..sessions {
        table.push_str(&format!(
            "peer_{n} BGP      t_{n}   up     20:07:01    Established
  Description:    peer {n}
  Preference:     100
  Input filter:   ACCEPT
  Output filter:  (unnamed)
  Routes:         {n} imported, 0 exported, {n} preferred
  Route change stats:     received   rejected   filtered    ignored   accepted
    Import updates:              5          0          0          0          5
    Import withdraws:            0          0        ---          0          0
    Export updates:              5          5          0        ---          0
    Export withdraws:            0        ---        ---        ---          0
  BGP state:          Established
    Neighbor address: 10.100.0.{n}
    Neighbor AS:      65{n:03}
    Session:          external AS4
    Hold timer:       148/240

"
        ));
    }
    table
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let routes = route_table();
    let protocols = protocol_table(200);

    let mut group = c.benchmark_group("show route");
    group.throughput(Throughput::Bytes(routes.len() as u64));
    group.bench_function("inline next hop", |b| {
        b.iter(|| {
            BirdParser::from_reader(black_box(routes.as_bytes()))
                .route_format(RouteFormat::InlineNextHop)
                .into_route_iter()
                .filter(|r| r.is_ok())
                .count()
        })
    });
    group.finish();

    let mut group = c.benchmark_group("show protocols");
    group.throughput(Throughput::Bytes(protocols.len() as u64));
    group.bench_function("dispatch table", |b| {
        b.iter(|| {
            BirdParser::from_reader(black_box(protocols.as_bytes()))
                .parse_protocols()
                .map(|p| p.len())
        })
    });
    group.bench_function("indentation tree", |b| {
        b.iter(|| {
            BirdParser::from_reader(black_box(protocols.as_bytes()))
                .detail_mode(DetailMode::Indentation)
                .parse_protocols()
                .map(|p| p.len())
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
