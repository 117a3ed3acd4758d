//! Engine: gesture handlers and board-level operations over the registry.
//!
//! DESIGN
//! ======
//! `EngineCore` owns the whole board: the registry, the label, the boundary,
//! the drag state machine and the selection context. Every operation returns
//! the [`Action`]s the host must react to. Operations that change the
//! registry finish by re-running the containment validator explicitly; the
//! host never has to observe its own DOM to learn about a change.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, warn};

use crate::config::BoardConfig;
use crate::geometry::{Boundary, HalfSize, Point, pointer_to_center};
use crate::input::{DragState, Gesture, UiState};
use crate::persist::{self, Layout, LoadedLayout, MergeReport, SavePayload};
use crate::registry::{Item, ItemId, Registry, RegistryError, Upsert};
use crate::validate::{self, ValidationReport};

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A clip was placed on the board for the first time.
    ItemInserted { id: ItemId, center: Point },
    /// A placed clip's center changed.
    ItemMoved { id: ItemId, center: Point },
    /// A clip's display transform changed (enlarged or back to baseline).
    DisplayChanged { id: ItemId, enlarged: bool },
    /// The coordinate form's target changed.
    SelectionChanged(Option<ItemId>),
    /// The board label changed.
    LabelChanged(String),
    /// The containment report changed; the host updates the save control.
    ValidationChanged(ValidationReport),
    /// The host should re-project and redraw.
    RenderNeeded,
}

/// Board state and the operations that mutate it.
#[derive(Debug)]
pub struct EngineCore {
    registry: Registry,
    label: String,
    boundary: Boundary,
    half_size: HalfSize,
    drag: DragState,
    ui: UiState,
    validation: ValidationReport,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(&BoardConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: &BoardConfig) -> Self {
        Self::with_geometry(config.boundary, config.half_size())
    }

    #[must_use]
    pub fn with_geometry(boundary: Boundary, half_size: HalfSize) -> Self {
        Self {
            registry: Registry::new(),
            label: String::new(),
            boundary,
            half_size,
            drag: DragState::Idle,
            ui: UiState::default(),
            validation: ValidationReport::default(),
        }
    }

    // --- Gestures ---

    /// Dispatch a host gesture to its handler.
    pub fn handle(&mut self, gesture: Gesture) -> Vec<Action> {
        match gesture {
            Gesture::DragStart { id } => self.on_drag_start(&id),
            Gesture::DragMove { id, pointer } => self.on_drag_move(&id, pointer),
            Gesture::DragEnd { id } => self.on_drag_end(&id),
            Gesture::ToggleEnlarge { id } => self.on_toggle_enlarge(&id),
            Gesture::DropNew { id, pointer } => self.on_drop_new(&id, pointer),
            Gesture::Select { id } => self.select(&id),
            Gesture::ApplySelected { center } => self.apply_selected(center),
            Gesture::CancelSelection => self.cancel_selection(),
        }
    }

    /// `Idle → Dragging`. Ignored for unknown or enlarged clips.
    pub fn on_drag_start(&mut self, id: &str) -> Vec<Action> {
        let Some(item) = self.registry.get(id) else {
            debug!(id, "drag start on unknown clip");
            return Vec::new();
        };
        if item.enlarged {
            debug!(id, "drag suppressed while enlarged");
            return Vec::new();
        }
        let origin = item.center;

        let mut actions = Vec::new();
        if self.drag.dragging_id().is_some_and(|current| current != id) {
            actions.extend(self.end_drag());
            actions.push(Action::RenderNeeded);
        }
        self.drag = DragState::Dragging { id: id.to_owned(), origin };
        actions
    }

    /// Move the dragged clip so its center is the pointer minus the half-size.
    /// Containment is not enforced here.
    pub fn on_drag_move(&mut self, id: &str, pointer: Point) -> Vec<Action> {
        if !self.drag.is_dragging(id) {
            return Vec::new();
        }
        let center = pointer_to_center(pointer, self.half_size);
        match self.registry.upsert(id, center) {
            Ok(Upsert::Unchanged) => Vec::new(),
            Ok(Upsert::Inserted | Upsert::Moved) => {
                vec![Action::ItemMoved { id: id.to_owned(), center }, Action::RenderNeeded]
            }
            Err(e) => {
                warn!(error = %e, "ignoring drag move");
                Vec::new()
            }
        }
    }

    /// `Dragging → Idle`, then re-sync and re-validate.
    pub fn on_drag_end(&mut self, id: &str) -> Vec<Action> {
        if !self.drag.is_dragging(id) {
            return Vec::new();
        }
        let mut actions = self.end_drag();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Flip a clip between enlarged and baseline display. The center is never
    /// touched. Enlarging the clip being dragged ends that drag.
    pub fn on_toggle_enlarge(&mut self, id: &str) -> Vec<Action> {
        let Some(item) = self.registry.get(id) else {
            debug!(id, "toggle enlarge on unknown clip");
            return Vec::new();
        };
        let enlarged = !item.enlarged;

        let mut actions = Vec::new();
        if enlarged && self.drag.is_dragging(id) {
            actions.extend(self.end_drag());
        }
        if let Err(e) = self.registry.set_enlarged(id, enlarged) {
            warn!(error = %e, "toggle enlarge failed");
            return actions;
        }
        actions.push(Action::DisplayChanged { id: id.to_owned(), enlarged });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// A clip dropped from the gallery. A clip already on the board moves to
    /// the drop point; a new one is inserted there. Enlarged clips stay put.
    pub fn on_drop_new(&mut self, id: &str, pointer: Point) -> Vec<Action> {
        if id.is_empty() {
            return Vec::new();
        }
        if self.registry.get(id).is_some_and(|item| item.enlarged) {
            debug!(id, "drop suppressed while enlarged");
            return Vec::new();
        }

        let center = pointer_to_center(pointer, self.half_size);
        let mut actions = match self.registry.upsert(id, center) {
            Ok(Upsert::Inserted) => vec![Action::ItemInserted { id: id.to_owned(), center }],
            Ok(Upsert::Moved) => vec![Action::ItemMoved { id: id.to_owned(), center }],
            Ok(Upsert::Unchanged) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "ignoring drop");
                return Vec::new();
            }
        };
        actions.extend(self.revalidate());
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Selection and typed coordinates ---

    /// Target a placed clip with the coordinate form.
    pub fn select(&mut self, id: &str) -> Vec<Action> {
        if !self.registry.has(id) || self.ui.selected_id.as_deref() == Some(id) {
            return Vec::new();
        }
        self.ui.selected_id = Some(id.to_owned());
        vec![Action::SelectionChanged(Some(id.to_owned()))]
    }

    /// Move the selected clip to `center` and clear the selection. The
    /// selection stays open when the coordinates are rejected.
    pub fn apply_selected(&mut self, center: Point) -> Vec<Action> {
        let Some(id) = self.ui.selected_id.clone() else {
            return Vec::new();
        };
        match self.set_coordinates(&id, center) {
            Ok(mut actions) => {
                self.ui.selected_id = None;
                actions.insert(0, Action::SelectionChanged(None));
                actions
            }
            Err(e) => {
                warn!(error = %e, "coordinate entry rejected");
                Vec::new()
            }
        }
    }

    /// Dismiss the coordinate form.
    pub fn cancel_selection(&mut self) -> Vec<Action> {
        if self.ui.selected_id.take().is_none() {
            return Vec::new();
        }
        vec![Action::SelectionChanged(None)]
    }

    /// Set a placed clip's center directly, as typed into the coordinate listing.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown clip and
    /// [`RegistryError::NonFiniteCoordinate`] for NaN or infinite input.
    pub fn set_coordinates(&mut self, id: &str, center: Point) -> Result<Vec<Action>, RegistryError> {
        self.registry.require(id)?;
        let mut actions = match self.registry.upsert(id, center)? {
            Upsert::Unchanged => return Ok(Vec::new()),
            Upsert::Inserted | Upsert::Moved => vec![Action::ItemMoved { id: id.to_owned(), center }],
        };
        actions.extend(self.revalidate());
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    // --- Label ---

    /// Replace the board label. Last writer wins.
    pub fn set_label(&mut self, label: impl Into<String>) -> Vec<Action> {
        let label = label.into();
        if label == self.label {
            return Vec::new();
        }
        self.label.clone_from(&label);
        vec![Action::LabelChanged(label)]
    }

    // --- Persistence ---

    /// Merge a loaded layout. Clips already on the board keep their position;
    /// the label is replaced when the payload carries one.
    pub fn merge_loaded(&mut self, loaded: &LoadedLayout) -> (MergeReport, Vec<Action>) {
        let report = persist::merge(&mut self.registry, loaded);

        let mut actions: Vec<Action> = report
            .inserted
            .iter()
            .filter_map(|id| self.registry.get(id))
            .map(|item| Action::ItemInserted { id: item.id.clone(), center: item.center })
            .collect();
        if let Some(label) = &loaded.label {
            actions.extend(self.set_label(label.clone()));
        }
        actions.extend(self.revalidate());
        actions.push(Action::RenderNeeded);

        debug!(inserted = report.inserted.len(), kept = report.kept.len(), skipped = loaded.skipped, "layout merged");
        (report, actions)
    }

    /// Serialize the board as it is right now.
    #[must_use]
    pub fn snapshot(&self, layout: Layout) -> SavePayload {
        persist::serialize(&self.registry, &self.label, layout.keys())
    }

    /// Whether `layout` may be saved. Computed fresh, so a save fired in the
    /// middle of a drag sees the current positions.
    ///
    /// # Errors
    ///
    /// Returns the failing report when `layout` requires containment and a
    /// clip is outside the boundary.
    pub fn check_save(&self, layout: Layout) -> Result<(), ValidationReport> {
        if !layout.requires_containment() {
            return Ok(());
        }
        let report = validate::validate_all(&self.registry, &self.boundary);
        if report.is_valid() { Ok(()) } else { Err(report) }
    }

    #[must_use]
    pub fn can_save(&self, layout: Layout) -> bool {
        self.check_save(layout).is_ok()
    }

    // --- Queries ---

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    #[must_use]
    pub fn half_size(&self) -> HalfSize {
        self.half_size
    }

    /// Containment report as of the last registry mutation.
    #[must_use]
    pub fn validation(&self) -> &ValidationReport {
        &self.validation
    }

    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Clip targeted by the coordinate form, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    // --- Internals ---

    fn end_drag(&mut self) -> Vec<Action> {
        let DragState::Dragging { id, origin } = std::mem::take(&mut self.drag) else {
            return Vec::new();
        };
        if let Some(item) = self.registry.get(&id) {
            debug!(id = %id, from = ?origin, to = ?item.center, "drag finished");
        }
        self.revalidate()
    }

    fn revalidate(&mut self) -> Vec<Action> {
        let report = validate::validate_all(&self.registry, &self.boundary);
        if report == self.validation {
            return Vec::new();
        }
        if !report.is_valid() {
            debug!(out_of_bounds = report.out_of_bounds.len(), "clips outside the boundary");
        }
        self.validation = report.clone();
        vec![Action::ValidationChanged(report)]
    }
}
