use super::*;
use crate::state::test_helpers;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;
use serde_json::json;

// =============================================================================
// location_error_to_status
// =============================================================================

#[test]
fn location_error_to_status_maps_bad_payloads() {
    assert_eq!(location_error_to_status(LocationError::MissingSource(0)), StatusCode::BAD_REQUEST);
    assert_eq!(location_error_to_status(LocationError::Malformed("x".into())), StatusCode::BAD_REQUEST);
}

#[test]
fn location_error_to_status_maps_database() {
    let err = LocationError::Database(sqlx::Error::PoolClosed);
    assert_eq!(location_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// handlers (no rows reach the database)
// =============================================================================

#[tokio::test]
async fn save_admin_returns_message() {
    let state = test_helpers::test_app_state();
    let body = json!({"locations": [], "question": "Q"});
    let Json(reply) = save_admin_locations(State(state), Json(body)).await.unwrap();
    assert_eq!(reply, json!({"message": ADMIN_SAVED_MESSAGE}));
}

#[tokio::test]
async fn save_user_redirects_to_end_page() {
    let state = test_helpers::test_app_state();
    let body = json!({"locations": [], "question": "Q"});
    let response = save_user_locations(State(state), Json(body)).await.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap().to_str().unwrap(), END_PATH);
}

#[tokio::test]
async fn save_missing_src_is_bad_request() {
    let state = test_helpers::test_app_state();
    let body = json!({"locations": [{"initial_x": 1.0, "initial_y": 2.0}], "question": "Q"});
    let err = save_admin_locations(State(state), Json(body)).await.unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_without_locations_list_is_bad_request() {
    let state = test_helpers::test_app_state();
    let err = save_user_locations(State(state), Json(json!({"question": "Q"}))).await.unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);
}
