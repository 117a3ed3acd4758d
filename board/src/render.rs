//! Rendering: projects engine state into view nodes for the host to draw.
//!
//! This module never mutates state and is never read back. The host calls
//! [`project`] after every [`crate::engine::Action::RenderNeeded`] and replaces
//! its DOM with the result, so the drawn board cannot drift from the registry.
//!
//! Clips are positioned by their top-left anchor, derived from the center by
//! the board's half-size. Enlarged clips keep the same anchor and are scaled
//! about their center by [`ENLARGED_SCALE`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::consts::{BASE_Z_INDEX, BOUNDARY_PADDING, ENLARGED_SCALE, ENLARGED_Z_INDEX};
use crate::engine::EngineCore;
use crate::geometry::{Point, center_to_anchor};
use crate::registry::ItemId;
use crate::validate;

/// One placed clip as the host should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    /// Top-left corner in surface coordinates.
    pub anchor: Point,
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub z_index: i64,
    pub in_bounds: bool,
    pub selected: bool,
    pub dragging: bool,
}

/// The drawing surface and the circle drawn on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceView {
    /// Side length of the square surface.
    pub side: f64,
    pub center: Point,
    pub radius: f64,
}

/// One line of the coordinate listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateRow {
    pub id: ItemId,
    pub x: f64,
    pub y: f64,
}

/// Everything the host needs for one redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub surface: SurfaceView,
    pub items: Vec<ItemView>,
    pub coordinates: Vec<CoordinateRow>,
    pub label: String,
    pub diagnostic: String,
    pub can_save_final: bool,
}

/// Project every placed clip, bottom of the stack first.
///
/// Enlarged clips draw above the rest; ties keep registry insertion order.
#[must_use]
pub fn project(core: &EngineCore) -> Vec<ItemView> {
    let half = core.half_size();
    let boundary = core.boundary();
    let selected = core.selection();
    let drag = core.drag_state();

    let mut views: Vec<ItemView> = core
        .registry()
        .all()
        .map(|item| {
            let (scale, z_index) = if item.enlarged { (ENLARGED_SCALE, ENLARGED_Z_INDEX) } else { (1.0, BASE_Z_INDEX) };
            ItemView {
                id: item.id.clone(),
                anchor: center_to_anchor(item.center, half),
                width: half.width(),
                height: half.height(),
                scale,
                z_index,
                in_bounds: validate::is_within_boundary(item, &boundary),
                selected: selected == Some(item.id.as_str()),
                dragging: drag.is_dragging(&item.id),
            }
        })
        .collect();
    // Stable sort keeps insertion order within a layer.
    views.sort_by_key(|view| view.z_index);
    views
}

/// The square surface around the boundary circle.
#[must_use]
pub fn surface(core: &EngineCore) -> SurfaceView {
    let boundary = core.boundary();
    SurfaceView { side: boundary.surface_side(BOUNDARY_PADDING), center: boundary.center(), radius: boundary.radius }
}

/// Clip centers in registry order, for the coordinate listing.
#[must_use]
pub fn coordinate_rows(core: &EngineCore) -> Vec<CoordinateRow> {
    core.registry()
        .all()
        .map(|item| CoordinateRow { id: item.id.clone(), x: item.center.x, y: item.center.y })
        .collect()
}

/// Build a full frame. Containment is checked against current positions, so
/// a clip dragged outside the circle shows up before the drag ends.
#[must_use]
pub fn frame(core: &EngineCore) -> Frame {
    let report = validate::validate_all(core.registry(), &core.boundary());
    Frame {
        surface: surface(core),
        items: project(core),
        coordinates: coordinate_rows(core),
        label: core.label().to_owned(),
        diagnostic: report.diagnostic(),
        can_save_final: report.is_valid(),
    }
}
