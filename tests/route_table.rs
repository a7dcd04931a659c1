//! Parses complete `show route all` transcripts in both summary layouts.
use bird_parser::{AttrValue, BirdParser, ParserError, Route, RouteFormat};

const BIRD1_ROUTES: &str = include_str!("data/show_route_all.txt");
const BIRD2_ROUTES: &str = include_str!("data/show_route_all_bird2.txt");

fn parse(input: &str, format: RouteFormat) -> Vec<Route> {
    BirdParser::from_reader(input.as_bytes())
        .route_format(format)
        .parse_routes()
        .unwrap()
}

#[test]
fn summary_only_routes() {
    let input = "184.164.240.0/24   via 10.100.0.122 on eth1 [up_2_65002 20:07:01] * (100) [AS65002i]
184.164.241.0/24   via 10.100.0.122 on eth1 [up_2_65002 20:07:01] * (100) [AS65002i]
184.164.242.0/24   via 10.100.0.122 on eth1 [up_2_65002 20:07:01] * (100) [AS65002i]
184.164.243.0/24   via 10.100.0.122 on eth1 [up_2_65002 20:07:01] * (100) [AS65002i]
184.164.246.0/24   via 10.100.0.122 on eth1 [up_2_65002 20:07:01] * (100) [AS65002i]
";
    let routes = parse(input, RouteFormat::InlineNextHop);
    assert_eq!(routes.len(), 5);
    for route in &routes {
        assert_eq!(route.via.as_deref(), Some("via 10.100.0.122 on eth1"));
        assert_eq!(route.proto, "up_2_65002");
        assert_eq!(route.since, "20:07:01");
        assert!(route.primary);
        assert_eq!(route.info.as_deref(), Some("(100) [AS65002i]"));
        assert!(route.attributes.is_empty());
    }
}

#[test]
fn bird1_attribute_blocks() {
    let routes = parse(BIRD1_ROUTES, RouteFormat::InlineNextHop);
    assert_eq!(routes.len(), 5);
    for route in &routes {
        assert_eq!(route.via.as_deref(), Some("via 10.100.0.122 on eth1"));
        assert!(route.primary);
        assert_eq!(route.info.as_deref(), Some("(100) [AS65002i]"));
        assert_eq!(route.attributes.len(), 5);
        assert_eq!(
            route.attribute("Type"),
            Some(&AttrValue::Str("BGP unicast univ".to_string()))
        );
        assert_eq!(route.attribute("BGP.local_pref"), Some(&AttrValue::Int(100)));
        assert_eq!(route.as_path(), Some(&[65002][..]));
        assert_eq!(route.origin_asn(), Some(65002));
    }

    // the second row is printed without a network
    assert_eq!(
        routes
            .iter()
            .map(|r| r.network.as_deref().unwrap())
            .collect::<Vec<_>>(),
        vec![
            "184.164.240.0/24",
            "184.164.240.0/24",
            "184.164.242.0/24",
            "184.164.243.0/24",
            "184.164.246.0/24"
        ]
    );
    assert_eq!(routes[1].prefix(), routes[0].prefix());
}

#[test]
fn same_prefix_rows() {
    let row = "        Type: BGP unicast univ
        BGP.origin: IGP
        BGP.as_path: 65002
        BGP.next_hop: 10.100.0.122
        BGP.local_pref: 100
";
    let mut input = format!(
        "184.164.240.0/24   via 10.100.0.122 on eth1 [up_2_65002 20:07:01] * (100) [AS65002i]\n{}",
        row
    );
    for _ in 0..4 {
        input.push_str(
            "                   via 10.100.0.122 on eth1 [up_2_65002 20:07:01] (100) [AS65002i]\n",
        );
        input.push_str(row);
    }
    let routes = parse(&input, RouteFormat::InlineNextHop);
    assert_eq!(routes.len(), 5);
    assert!(routes.iter().all(|r| r.attributes.len() == 5));
    assert!(routes
        .iter()
        .all(|r| r.network.as_deref() == Some("184.164.240.0/24")));
    assert_eq!(routes.iter().filter(|r| r.primary).count(), 1);
}

#[test]
fn bird2_separate_next_hop() {
    let routes = parse(BIRD2_ROUTES, RouteFormat::SeparateNextHop);
    assert_eq!(routes.len(), 3);

    let first = &routes[0];
    assert_eq!(first.rtype.as_deref(), Some("unicast"));
    assert_eq!(first.via.as_deref(), Some("10.100.0.122"));
    assert_eq!(first.iface.as_deref(), Some("eth1"));
    assert_eq!(first.since, "2024-03-05 10:00:05");
    assert_eq!(first.as_path(), Some(&[65002, 3356][..]));
    assert_eq!(first.origin_asn(), Some(3356));
    assert_eq!(first.attributes.len(), 6);
    assert_eq!(
        first.attribute("Internal route handling values"),
        Some(&AttrValue::Str("0L 3G 0S id 2".to_string()))
    );

    let second = &routes[1];
    assert_eq!(second.network.as_deref(), Some("184.164.240.0/24"));
    assert_eq!(second.from.as_deref(), Some("10.100.0.1"));
    assert!(!second.primary);
    assert_eq!(second.attribute("BGP.as_path"), Some(&AttrValue::Null));
    assert_eq!(second.origin_asn(), None);

    let third = &routes[2];
    assert_eq!(third.network.as_deref(), Some("184.164.241.0/24"));
    assert_eq!(third.attribute("BGP.med"), Some(&AttrValue::Int(20)));
    assert_eq!(
        third.attribute("BGP.community"),
        Some(&AttrValue::Str(
            "(65000,100) (65000,200)(65000,300)".to_string()
        ))
    );
    assert_eq!(third.attributes.len(), 7);
}

#[test]
fn wrong_layout_is_fatal() {
    // the inline grammar reads the route type as the next hop, then trips over the via line
    let mut iter = BirdParser::from_reader(BIRD2_ROUTES.as_bytes()).into_route_iter();
    let route = iter.next().unwrap().unwrap();
    assert_eq!(route.via.as_deref(), Some("unicast"));
    assert!(matches!(
        iter.next(),
        Some(Err(ParserError::UnmatchedRoute { line_no: 4, .. }))
    ));
    assert!(iter.next().is_none());

    let err = BirdParser::from_reader(BIRD1_ROUTES.as_bytes())
        .route_format(RouteFormat::SeparateNextHop)
        .parse_routes()
        .unwrap_err();
    assert_eq!(err.line_no(), Some(1));
}

#[test]
fn json_lines() {
    let routes = parse(BIRD2_ROUTES, RouteFormat::SeparateNextHop);
    let json = serde_json::to_value(&routes[1]).unwrap();
    assert_eq!(json["network"], "184.164.240.0/24");
    assert_eq!(json["from"], "10.100.0.1");
    assert_eq!(json["primary"], false);
    assert!(json["attributes"]["BGP.as_path"].is_null());
    assert_eq!(json["attributes"]["BGP.local_pref"], 100);

    let routes = parse(BIRD1_ROUTES, RouteFormat::InlineNextHop);
    let json = serde_json::to_value(&routes[0]).unwrap();
    assert!(json.get("rtype").is_none());
    assert!(json.get("iface").is_none());
    assert_eq!(json["attributes"]["BGP.as_path"], serde_json::json!([65002]));
}
