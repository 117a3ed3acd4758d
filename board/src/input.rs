//! Input model: host gestures and the drag state machine.
//!
//! `Gesture` is what the host reports from DOM events, already resolved to a
//! clip id. `DragState` is the gesture being tracked between drag-start and
//! drag-end. `UiState` carries the click-selection used by the coordinate
//! entry form; it lives here instead of in a free variable on the host.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;
use crate::registry::ItemId;

/// A user gesture reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Pointer went down on a placed clip and started dragging it.
    DragStart { id: ItemId },
    /// Pointer moved while dragging; `pointer` is in board coordinates.
    DragMove { id: ItemId, pointer: Point },
    /// Pointer released.
    DragEnd { id: ItemId },
    /// Secondary gesture on a clip (double-click) flips its enlarged state.
    ToggleEnlarge { id: ItemId },
    /// A clip was dropped onto the board from the gallery.
    DropNew { id: ItemId, pointer: Point },
    /// A clip was clicked; it becomes the target of the coordinate form.
    Select { id: ItemId },
    /// The coordinate form was submitted for the selected clip.
    ApplySelected { center: Point },
    /// The coordinate form was dismissed.
    CancelSelection,
}

/// Drag state machine: `Idle → Dragging → Idle`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A clip is being moved.
    Dragging {
        /// Clip being dragged.
        id: ItemId,
        /// Center of the clip when the drag started.
        origin: Point,
    },
}

impl DragState {
    /// Id of the clip being dragged, if any.
    #[must_use]
    pub fn dragging_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } => Some(id),
        }
    }

    /// Whether `id` is the clip being dragged.
    #[must_use]
    pub fn is_dragging(&self, id: &str) -> bool {
        self.dragging_id() == Some(id)
    }
}

/// Selection context for the coordinate entry form.
///
/// Set on click-select, cleared when the form is applied or cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Clip targeted by the coordinate form, if any.
    pub selected_id: Option<ItemId>,
}
