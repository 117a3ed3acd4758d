//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! backend keeps no placements in memory; every request goes to Postgres.

use sqlx::PgPool;

/// Clone is required by Axum; the pool is reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
