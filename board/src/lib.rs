//! Placement state engine for the clip board.
//!
//! The host page places media clips inside a circular boundary, drags them
//! around, and saves the resulting layout to the backend. This crate owns the
//! state behind that page: which clips are placed where, the gesture state
//! machine that moves them, the containment check that gates the final save,
//! and the conversion between the in-memory layout and the save/load payloads.
//! The host is responsible only for wiring DOM gestures into
//! [`engine::EngineCore`] and drawing what [`render::project`] returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine: gesture handlers, label, selection, [`engine::Action`]s |
//! | [`registry`] | Item registry, the single source of truth for placements |
//! | [`geometry`] | Points, half-sizes, the circular boundary |
//! | [`input`] | Gesture types and the drag state machine |
//! | [`validate`] | Containment validator and its diagnostic report |
//! | [`persist`] | Save payload serialization, load payload parsing and merge |
//! | [`render`] | Pure projection from engine state to view nodes |
//! | [`store`] | Async transport to the backend (`requestSave` / `requestLoad`) |
//! | [`session`] | Save/load orchestration with the in-flight save policy |
//! | [`config`] | Board mode, boundary and store settings |
//! | [`consts`] | Shared numeric constants and default endpoints |

pub mod config;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod persist;
pub mod registry;
pub mod render;
pub mod session;
pub mod store;
pub mod validate;
