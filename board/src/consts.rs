//! Shared constants for the board crate.

// ── Geometry ────────────────────────────────────────────────────

/// Radius of the containment circle in board units.
pub const BOUNDARY_RADIUS: f64 = 250.0;

/// Margin between the circle and the edge of the board surface.
pub const BOUNDARY_PADDING: f64 = 50.0;

/// Half-extent of a clip in the square (50×50) board mode.
pub const SQUARE_HALF_SIZE: f64 = 25.0;

/// Half-width of a clip in the wide (100×50) board mode.
pub const WIDE_HALF_WIDTH: f64 = 50.0;

/// Half-height of a clip in the wide (100×50) board mode.
pub const WIDE_HALF_HEIGHT: f64 = 25.0;

// ── Display ─────────────────────────────────────────────────────

/// Scale factor applied to an enlarged clip.
pub const ENLARGED_SCALE: f64 = 2.0;

/// Stacking order of a clip at rest.
pub const BASE_Z_INDEX: i64 = 1;

/// Stacking order of an enlarged clip; drawn above every resting clip.
pub const ENLARGED_Z_INDEX: i64 = 10;

// ── Backend ─────────────────────────────────────────────────────

/// Saves the authoritative (initial) layout.
pub const SAVE_INITIAL_ENDPOINT: &str = "/save_admin_locations";

/// Saves the participant-adjusted (final) layout.
pub const SAVE_FINAL_ENDPOINT: &str = "/save_user_locations";

/// Loads the authoritative (initial) layout.
pub const LOAD_INITIAL_ENDPOINT: &str = "/load_admin_locations";

/// Loads the participant-adjusted (final) layout.
pub const LOAD_FINAL_ENDPOINT: &str = "/load_user_locations";

/// Backend used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Whole-request timeout for store calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connect timeout for store calls.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
