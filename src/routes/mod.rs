//! Router assembly.
//!
//! Binds the four layout endpoints the board talks to, the end page a
//! participant lands on after a final save, and a health probe.


pub mod locations;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use board::consts::{LOAD_FINAL_ENDPOINT, LOAD_INITIAL_ENDPOINT, SAVE_FINAL_ENDPOINT, SAVE_INITIAL_ENDPOINT};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Path of the page a participant is redirected to after a final save.
pub const END_PATH: &str = "/end";

const END_PAGE: &str = "<!doctype html><html><head><title>Thank you</title></head>\
<body><h1>Thank you</h1><p>Your placement has been saved.</p></body></html>";

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(SAVE_INITIAL_ENDPOINT, post(locations::save_admin_locations))
        .route(SAVE_FINAL_ENDPOINT, post(locations::save_user_locations))
        .route(LOAD_INITIAL_ENDPOINT, get(locations::load_admin_locations))
        .route(LOAD_FINAL_ENDPOINT, get(locations::load_user_locations))
        .route(END_PATH, get(end))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn end() -> Html<&'static str> {
    Html(END_PAGE)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
