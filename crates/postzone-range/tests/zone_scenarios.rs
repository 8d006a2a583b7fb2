//! # Zone Scenarios
//!
//! End-to-end checks through the public API: the bundled catalog, the
//! factory, ranges built from raw strings, and zone coverage.

use std::sync::Arc;

use postzone_code::{PostalCode, PostalCodeFactory};
use postzone_core::{CountryCode, PostalCodeError, StaticFormatCatalog};
use postzone_range::{PostalCodeRange, ZoneCoverage};

fn factory() -> PostalCodeFactory {
    PostalCodeFactory::new(Arc::new(StaticFormatCatalog::bundled().unwrap()))
}

fn cc(s: &str) -> CountryCode {
    CountryCode::new(s).unwrap()
}

fn us_range(f: &PostalCodeFactory, start: &str, end: &str) -> PostalCodeRange {
    PostalCodeRange::parse(f, &cc("US"), Some(start), Some(end)).unwrap()
}

#[test]
fn test_us_end_to_end() {
    let f = factory();
    let us = cc("US");

    let full = f.create_full(&us, "12345-6789").unwrap();
    assert_eq!(full.as_str(), "123456789");
    let short = f.create(&us, "12345-6789").unwrap();
    assert_eq!(short.as_str(), "12345");

    let next = f.create(&us, "12346").unwrap().successor().unwrap();
    assert_eq!(next.as_str(), "12347");

    let all = us_range(&f, "00000", "99999");
    assert!(all.contains(&f.create(&us, "54321").unwrap()));

    let pieces = all.subtract(&us_range(&f, "50000", "59999")).unwrap();
    assert_eq!(
        pieces,
        vec![us_range(&f, "00000", "49999"), us_range(&f, "60000", "99999")]
    );
    assert_eq!(pieces[0].end().unwrap().as_str(), "499999999");
    assert_eq!(pieces[1].start().unwrap().as_str(), "600000000");
}

#[test]
fn test_short_code_contained_only_when_whole_block_is() {
    let f = factory();
    let us = cc("US");
    let r = PostalCodeRange::new(
        Some(f.create_full(&us, "12345-0000").unwrap()),
        Some(f.create_full(&us, "12345-4999").unwrap()),
    )
    .unwrap();
    assert!(r.contains(&f.create_full(&us, "12345-1234").unwrap()));
    assert!(!r.contains(&f.create(&us, "12345").unwrap()));
    assert!(us_range(&f, "12345", "12345").contains(&f.create(&us, "12345").unwrap()));
}

#[test]
fn test_gb_outward_code_ranges() {
    let f = factory();
    let gb = cc("GB");
    let r = PostalCodeRange::parse(&f, &gb, Some("A10"), Some("A19")).unwrap();
    assert_eq!(r.to_string(), "<A10AA-A19ZZ>");
    assert!(r.contains(&f.create(&gb, "A1 5BD").unwrap()));
    assert!(!r.contains(&f.create(&gb, "A2 0AA").unwrap()));
    // Other outward-code layouts never match.
    assert!(!r.contains(&f.create(&gb, "A15 3BD").unwrap()));
    assert!(!r.contains(&f.create(&gb, "AB1 2CD").unwrap()));
}

#[test]
fn test_mixed_countries_rejected() {
    let f = factory();
    let err = PostalCodeRange::new(
        Some(f.create(&cc("DE"), "10115").unwrap()),
        Some(f.create(&cc("PL"), "20115").unwrap()),
    )
    .unwrap_err();
    assert_eq!(
        err,
        PostalCodeError::IncompatibleBounds {
            start_table: "DE".into(),
            end_table: "PL".into(),
        }
    );
}

#[test]
fn test_shipping_zones() {
    let f = factory();
    let de = cc("DE");
    let r = |s: &str, e: &str| PostalCodeRange::parse(&f, &de, Some(s), Some(e)).unwrap();
    let code = |s: &str| f.create(&de, s).unwrap();

    let mut zones = ZoneCoverage::new();
    zones.assign(PostalCodeRange::DEFAULT, "zone-3").unwrap();
    zones.assign(r("10000", "19999"), "zone-1").unwrap();
    zones.assign(r("20000", "29999"), "zone-2").unwrap();
    zones.assign(r("20000", "24999"), "zone-1").unwrap();

    assert_eq!(zones.zone_for(&code("10115")), Some(&"zone-1"));
    assert_eq!(zones.zone_for(&code("24999")), Some(&"zone-1"));
    assert_eq!(zones.zone_for(&code("25000")), Some(&"zone-2"));
    assert_eq!(zones.zone_for(&code("80331")), Some(&"zone-3"));
    assert_eq!(zones.zone_for(&code("01067")), Some(&"zone-3"));

    assert_eq!(zones.ranges_for(&"zone-1"), vec![&r("10000", "24999")]);
    assert_eq!(zones.len(), 4);

    let json = serde_json::to_value(&zones).unwrap();
    assert_eq!(json["entries"][1]["zone"], "zone-1");
    assert_eq!(json["entries"][1]["range"]["start"]["code"], "10000");
}

#[test]
fn test_range_neighbours_through_factory() {
    let f = factory();
    let nl = cc("NL");
    let r = PostalCodeRange::parse(&f, &nl, Some("1000"), Some("1099")).unwrap();
    assert_eq!(r.start().unwrap().as_str(), "1000AA");
    assert_eq!(r.end().unwrap().as_str(), "1099ZZ");
    assert_eq!(r.predecessor_postal_code().unwrap().as_str(), "0999ZZ");
    assert_eq!(r.successor_postal_code().unwrap().as_str(), "1100AA");
    let open: Option<PostalCode> = PostalCodeRange::parse(&f, &nl, None, Some("1099"))
        .unwrap()
        .predecessor_postal_code();
    assert!(open.is_none());
}

#[test]
fn test_world_zone_keeps_other_countries() {
    let f = factory();
    let de = cc("DE");
    let pl = cc("PL");
    let code = |country: &CountryCode, s: &str| f.create(country, s).unwrap();

    let mut zones = ZoneCoverage::new();
    zones.assign(PostalCodeRange::DEFAULT, "world").unwrap();
    zones
        .assign(
            PostalCodeRange::parse(&f, &de, Some("10000"), Some("19999")).unwrap(),
            "de-local",
        )
        .unwrap();

    assert_eq!(zones.zone_for(&code(&pl, "50-000")), Some(&"world"));
    assert_eq!(zones.zone_for(&code(&pl, "15-000")), Some(&"world"));
    assert_eq!(zones.zone_for(&code(&cc("AD"), "AD500")), Some(&"world"));
    assert_eq!(zones.zone_for(&code(&de, "15000")), Some(&"de-local"));
    assert_eq!(zones.zone_for(&code(&de, "20000")), Some(&"world"));

    zones
        .assign(
            PostalCodeRange::parse(&f, &pl, Some("50-000"), Some("59-999")).unwrap(),
            "pl-local",
        )
        .unwrap();
    assert_eq!(zones.zone_for(&code(&pl, "55-555")), Some(&"pl-local"));
    assert_eq!(zones.zone_for(&code(&pl, "60-000")), Some(&"world"));
    assert_eq!(zones.zone_for(&code(&cc("US"), "10001")), Some(&"world"));
    assert_eq!(zones.zone_for(&code(&cc("GB"), "SW1A 1AA")), Some(&"world"));
    assert_eq!(zones.zone_for(&code(&de, "15000")), Some(&"de-local"));

    let world: Vec<String> = zones.ranges_for(&"world").iter().map(|r| r.to_string()).collect();
    assert_eq!(world, vec!["<*-09999>", "<DE:20000-PL:49999>", "<60000-*>"]);
}
