//! Board and store configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    BOUNDARY_PADDING, BOUNDARY_RADIUS, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    LOAD_FINAL_ENDPOINT, LOAD_INITIAL_ENDPOINT, SAVE_FINAL_ENDPOINT, SAVE_INITIAL_ENDPOINT, SQUARE_HALF_SIZE,
    WIDE_HALF_HEIGHT, WIDE_HALF_WIDTH,
};
use crate::geometry::{Boundary, HalfSize};
use crate::persist::Layout;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
}

// =============================================================================
// BOARD
// =============================================================================

/// Clip box shape used by a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardMode {
    /// 50×50 clips.
    #[default]
    Square,
    /// 100×50 clips.
    Wide,
}

impl BoardMode {
    #[must_use]
    pub fn half_size(self) -> HalfSize {
        match self {
            Self::Square => HalfSize::square(SQUARE_HALF_SIZE),
            Self::Wide => HalfSize::new(WIDE_HALF_WIDTH, WIDE_HALF_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardConfig {
    pub mode: BoardMode,
    pub boundary: Boundary,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { mode: BoardMode::default(), boundary: Boundary::default() }
    }
}

impl BoardConfig {
    #[must_use]
    pub fn half_size(&self) -> HalfSize {
        self.mode.half_size()
    }

    /// Build board config from environment variables.
    ///
    /// Optional:
    /// - `PLACEBOARD_MODE`: `square` (default) or `wide`
    /// - `PLACEBOARD_BOUNDARY_RADIUS`: default 250; the circle is centered on a
    ///   surface padded by 50 on every side
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for an unknown board mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Same as [`BoardConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for an unknown board mode.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = parse_mode(lookup("PLACEBOARD_MODE").as_deref())?;
        let radius = parse_positive_f64(lookup("PLACEBOARD_BOUNDARY_RADIUS").as_deref(), BOUNDARY_RADIUS);
        Ok(Self { mode, boundary: Boundary::with_padding(radius, BOUNDARY_PADDING) })
    }
}

fn parse_mode(raw: Option<&str>) -> Result<BoardMode, ConfigError> {
    match raw.unwrap_or("square") {
        "square" => Ok(BoardMode::Square),
        "wide" => Ok(BoardMode::Wide),
        other => Err(ConfigError::Parse(format!("unknown PLACEBOARD_MODE: {other}"))),
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Backend paths for each layout's save and load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub save_initial: String,
    pub save_final: String,
    pub load_initial: String,
    pub load_final: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            save_initial: SAVE_INITIAL_ENDPOINT.to_owned(),
            save_final: SAVE_FINAL_ENDPOINT.to_owned(),
            load_initial: LOAD_INITIAL_ENDPOINT.to_owned(),
            load_final: LOAD_FINAL_ENDPOINT.to_owned(),
        }
    }
}

impl Endpoints {
    #[must_use]
    pub fn save(&self, layout: Layout) -> &str {
        match layout {
            Layout::Initial => &self.save_initial,
            Layout::Final => &self.save_final,
        }
    }

    #[must_use]
    pub fn load(&self, layout: Layout) -> &str {
        match layout {
            Layout::Initial => &self.load_initial,
            Layout::Final => &self.load_final,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeouts: StoreTimeouts,
    pub endpoints: Endpoints,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), timeouts: StoreTimeouts::default(), endpoints: Endpoints::default() }
    }
}

impl StoreConfig {
    /// Build store config from environment variables.
    ///
    /// Optional:
    /// - `PLACEBOARD_BASE_URL`: default `http://127.0.0.1:5000`
    /// - `PLACEBOARD_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PLACEBOARD_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Same as [`StoreConfig::from_env`], reading values through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("PLACEBOARD_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let timeouts = StoreTimeouts {
            request_secs: parse_u64(lookup("PLACEBOARD_REQUEST_TIMEOUT_SECS").as_deref(), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("PLACEBOARD_CONNECT_TIMEOUT_SECS").as_deref(), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Self { base_url, timeouts, endpoints: Endpoints::default() }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

fn parse_u64(raw: Option<&str>, default: u64) -> u64 {
    match raw.map(|v| v.trim().parse::<u64>()) {
        Some(Ok(value)) => value,
        _ => default,
    }
}

fn parse_positive_f64(raw: Option<&str>, default: f64) -> f64 {
    match raw.map(|v| v.trim().parse::<f64>()) {
        Some(Ok(value)) if value.is_finite() && value > 0.0 => value,
        _ => default,
    }
}
