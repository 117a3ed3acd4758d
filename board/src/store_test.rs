use super::*;
use serde_json::json;

const BASE: &str = "http://127.0.0.1:5000";

// =========================================================================
// join_url / resolve_location
// =========================================================================

#[test]
fn join_url_inserts_single_slash() {
    assert_eq!(join_url(BASE, "/load_admin_locations"), "http://127.0.0.1:5000/load_admin_locations");
    assert_eq!(join_url("http://host/", "/x"), "http://host/x");
    assert_eq!(join_url("http://host", "x"), "http://host/x");
}

#[test]
fn resolve_location_keeps_absolute_urls() {
    assert_eq!(resolve_location(BASE, "https://elsewhere/end"), "https://elsewhere/end");
}

#[test]
fn resolve_location_joins_relative_paths() {
    assert_eq!(resolve_location(BASE, "/end"), "http://127.0.0.1:5000/end");
}

// =========================================================================
// classify_save_response
// =========================================================================

#[test]
fn classify_json_success() {
    let outcome = classify_save_response(BASE, 200, None, r#"{"message":"Admin locations saved successfully"}"#).unwrap();
    assert_eq!(outcome.message(), Some("Admin locations saved successfully"));
}

#[test]
fn classify_empty_success_is_null() {
    assert_eq!(classify_save_response(BASE, 204, None, "  ").unwrap(), SaveOutcome::Json(Value::Null));
}

#[test]
fn classify_redirect_resolves_location() {
    let outcome = classify_save_response(BASE, 303, Some("/end"), "").unwrap();
    assert_eq!(outcome, SaveOutcome::Redirect("http://127.0.0.1:5000/end".into()));
    assert_eq!(outcome.message(), None);
}

#[test]
fn classify_redirect_without_location_fails() {
    let err = classify_save_response(BASE, 302, None, "").unwrap_err();
    assert!(matches!(err, TransportError::Response { status: 302, .. }));
}

#[test]
fn classify_error_status_keeps_body() {
    let err = classify_save_response(BASE, 400, None, r#"{"error":"missing src"}"#).unwrap_err();
    assert_eq!(err, TransportError::Response { status: 400, body: r#"{"error":"missing src"}"#.into() });
}

#[test]
fn classify_non_json_success_is_parse_error() {
    let err = classify_save_response(BASE, 200, None, "<html>ok</html>").unwrap_err();
    assert!(matches!(err, TransportError::Parse(_)));
}

// =========================================================================
// parse_load_response
// =========================================================================

#[test]
fn load_success_returns_value() {
    let value = parse_load_response(200, r#"{"locations":[]}"#).unwrap();
    assert_eq!(value, json!({"locations": []}));
}

#[test]
fn load_error_status_fails() {
    let err = parse_load_response(500, "boom").unwrap_err();
    assert_eq!(err, TransportError::Response { status: 500, body: "boom".into() });
}

#[test]
fn load_garbage_body_fails() {
    assert!(matches!(parse_load_response(200, "not json"), Err(TransportError::Parse(_))));
}

// =========================================================================
// HttpLocationStore
// =========================================================================

#[test]
fn http_store_builds_from_config() {
    let config = StoreConfig::from_lookup(|key: &str| match key {
        "PLACEBOARD_BASE_URL" => Some("http://board.test/".to_owned()),
        _ => None,
    });
    let store = HttpLocationStore::new(&config).unwrap();
    assert_eq!(store.base_url(), "http://board.test");
}

#[tokio::test]
async fn http_store_unreachable_backend_is_request_error() {
    let config = StoreConfig::from_lookup(|key: &str| match key {
        "PLACEBOARD_BASE_URL" => Some("http://127.0.0.1:1".to_owned()),
        "PLACEBOARD_CONNECT_TIMEOUT_SECS" => Some("1".to_owned()),
        _ => None,
    });
    let store = HttpLocationStore::new(&config).unwrap();
    let err = store.load("/load_admin_locations").await.unwrap_err();
    assert!(matches!(err, TransportError::Request(_)));
}
