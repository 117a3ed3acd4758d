#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key: &str| map.get(key).cloned()
}

// =============================================================
// BoardConfig
// =============================================================

#[test]
fn board_defaults_to_square_mode_and_default_circle() {
    let cfg = BoardConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, BoardConfig::default());
    assert_eq!(cfg.half_size(), HalfSize::square(25.0));
    assert_eq!(cfg.boundary, Boundary::new(300.0, 300.0, 250.0));
}

#[test]
fn board_wide_mode_uses_100_by_50_box() {
    let cfg = BoardConfig::from_lookup(lookup_from(&[("PLACEBOARD_MODE", "wide")])).unwrap();
    assert_eq!(cfg.mode, BoardMode::Wide);
    assert_eq!(cfg.half_size(), HalfSize::new(50.0, 25.0));
}

#[test]
fn board_rejects_unknown_mode() {
    let err = BoardConfig::from_lookup(lookup_from(&[("PLACEBOARD_MODE", "hexagon")])).unwrap_err();
    assert_eq!(err, ConfigError::Parse("unknown PLACEBOARD_MODE: hexagon".into()));
}

#[test]
fn board_radius_override_recenters_circle() {
    let cfg = BoardConfig::from_lookup(lookup_from(&[("PLACEBOARD_BOUNDARY_RADIUS", "100")])).unwrap();
    assert_eq!(cfg.boundary, Boundary::new(150.0, 150.0, 100.0));
}

#[test]
fn board_invalid_radius_falls_back_to_default() {
    for raw in ["abc", "-5", "0", "NaN", "inf"] {
        let cfg = BoardConfig::from_lookup(lookup_from(&[("PLACEBOARD_BOUNDARY_RADIUS", raw)])).unwrap();
        assert_eq!(cfg.boundary.radius, 250.0, "radius {raw}");
    }
}

// =============================================================
// StoreConfig
// =============================================================

#[test]
fn store_defaults() {
    let cfg = StoreConfig::from_lookup(lookup_from(&[]));
    assert_eq!(cfg, StoreConfig::default());
    assert_eq!(cfg.base_url, "http://127.0.0.1:5000");
    assert_eq!(cfg.timeouts, StoreTimeouts { request_secs: 30, connect_secs: 10 });
}

#[test]
fn store_parses_overrides_and_trims_trailing_slash() {
    let cfg = StoreConfig::from_lookup(lookup_from(&[
        ("PLACEBOARD_BASE_URL", "https://study.example.test/"),
        ("PLACEBOARD_REQUEST_TIMEOUT_SECS", "42"),
        ("PLACEBOARD_CONNECT_TIMEOUT_SECS", " 7 "),
    ]));
    assert_eq!(cfg.base_url, "https://study.example.test");
    assert_eq!(cfg.timeouts, StoreTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn store_invalid_timeout_falls_back() {
    let cfg = StoreConfig::from_lookup(lookup_from(&[("PLACEBOARD_REQUEST_TIMEOUT_SECS", "soon")]));
    assert_eq!(cfg.timeouts.request_secs, 30);
}

#[test]
fn endpoints_select_by_layout() {
    let endpoints = Endpoints::default();
    assert_eq!(endpoints.save(Layout::Initial), "/save_admin_locations");
    assert_eq!(endpoints.save(Layout::Final), "/save_user_locations");
    assert_eq!(endpoints.load(Layout::Initial), "/load_admin_locations");
    assert_eq!(endpoints.load(Layout::Final), "/load_user_locations");
}
