//! Containment validator.
//!
//! Checks every placed clip against the circular boundary. The result is
//! advisory while the user is editing and blocking when the final layout is
//! saved. The engine re-runs it at the end of every registry mutation.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use serde::Serialize;

use crate::geometry::Boundary;
use crate::registry::{Item, ItemId, Registry};

/// Whether `item`'s center lies within `boundary` (inclusive).
#[must_use]
pub fn is_within_boundary(item: &Item, boundary: &Boundary) -> bool {
    boundary.contains(item.center)
}

/// Outcome of checking the whole registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of clips checked.
    pub checked: usize,
    /// Clips whose center is outside the boundary, in registry order.
    pub out_of_bounds: Vec<ItemId>,
}

impl ValidationReport {
    /// All clips are inside. An empty board is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.out_of_bounds.is_empty()
    }

    /// Whether `id` was flagged.
    #[must_use]
    pub fn is_flagged(&self, id: &str) -> bool {
        self.out_of_bounds.iter().any(|flagged| flagged == id)
    }

    /// Human-readable status line for the host to show next to the save action.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        match self.out_of_bounds.len() {
            0 if self.checked == 0 => "No clips placed yet.".to_owned(),
            0 => "All clips are inside the circle.".to_owned(),
            1 => format!("1 clip is outside the circle: {}", self.out_of_bounds[0]),
            n => format!("{n} clips are outside the circle: {}", self.out_of_bounds.join(", ")),
        }
    }
}

/// Check every clip in `registry` against `boundary`.
#[must_use]
pub fn validate_all(registry: &Registry, boundary: &Boundary) -> ValidationReport {
    let mut report = ValidationReport::default();
    for item in registry.all() {
        report.checked += 1;
        if !is_within_boundary(item, boundary) {
            report.out_of_bounds.push(item.id.clone());
        }
    }
    report
}
