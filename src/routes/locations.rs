//! Layout save and load routes.

#[cfg(test)]
#[path = "locations_test.rs"]
mod locations_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Json, Redirect};
use board::persist::Layout;
use serde_json::Value;
use tracing::{error, warn};

use crate::routes::END_PATH;
use crate::services::locations::{self, LocationError};
use crate::state::AppState;

pub const ADMIN_SAVED_MESSAGE: &str = "Admin locations saved successfully";

/// `POST /save_admin_locations`: append the initial layout.
pub async fn save_admin_locations(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    save(&state, Layout::Initial, &body).await?;
    Ok(Json(serde_json::json!({ "message": ADMIN_SAVED_MESSAGE })))
}

/// `POST /save_user_locations`: append a participant's layout, then send
/// them to the end page.
pub async fn save_user_locations(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Redirect, StatusCode> {
    save(&state, Layout::Final, &body).await?;
    Ok(Redirect::to(END_PATH))
}

/// `GET /load_admin_locations`
pub async fn load_admin_locations(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    load(&state, Layout::Initial).await
}

/// `GET /load_user_locations`
pub async fn load_user_locations(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    load(&state, Layout::Final).await
}

async fn save(state: &AppState, layout: Layout, body: &Value) -> Result<u64, StatusCode> {
    let rows = locations::parse_save_body(body, layout.keys()).map_err(location_error_to_status)?;
    locations::insert_locations(&state.pool, layout, &rows)
        .await
        .map_err(location_error_to_status)
}

async fn load(state: &AppState, layout: Layout) -> Result<Json<Value>, StatusCode> {
    let rows = locations::list_locations(&state.pool, layout)
        .await
        .map_err(location_error_to_status)?;
    Ok(Json(locations::to_load_body(&rows, layout.keys())))
}

pub(crate) fn location_error_to_status(err: LocationError) -> StatusCode {
    match err {
        LocationError::Malformed(_) | LocationError::MissingSource(_) => {
            warn!(error = %err, "rejected location payload");
            StatusCode::BAD_REQUEST
        }
        LocationError::Database(_) => {
            error!(error = %err, "location query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
