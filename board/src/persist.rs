//! Persistence adapter: save payload serialization, load payload parsing,
//! and the non-destructive merge of loaded clips into the registry.
//!
//! One registry shape serves two saved layouts. The caller picks the field
//! names for the coordinates with [`LayoutKeys`]: `initial_x`/`initial_y` for
//! the authoritative layout, `final_x`/`final_y` for the participant's.
//!
//! ERROR HANDLING
//! ==============
//! A record with a missing id or a missing, non-numeric or non-finite
//! coordinate is skipped on its own. Only a payload that is not an object with
//! a `locations` list fails, and then nothing is merged.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::geometry::Point;
use crate::registry::{ItemId, Registry, Upsert};

/// Field name of the clip locator in every record.
pub const SRC_KEY: &str = "src";

/// Field name of the label, at the payload root on save and per record on load.
pub const QUESTION_KEY: &str = "question";

/// Field name of the record list.
pub const LOCATIONS_KEY: &str = "locations";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

// =============================================================================
// LAYOUTS
// =============================================================================

/// Coordinate field names for one saved layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutKeys {
    pub x: &'static str,
    pub y: &'static str,
}

impl LayoutKeys {
    pub const INITIAL: Self = Self { x: "initial_x", y: "initial_y" };
    pub const FINAL: Self = Self { x: "final_x", y: "final_y" };
}

/// Which layout a save or load targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Authoritative placement prepared by the board's owner.
    Initial,
    /// Placement adjusted by a participant. Saving it requires containment.
    Final,
}

impl Layout {
    #[must_use]
    pub fn keys(self) -> LayoutKeys {
        match self {
            Self::Initial => LayoutKeys::INITIAL,
            Self::Final => LayoutKeys::FINAL,
        }
    }

    /// Whether every clip must be inside the boundary before this layout saves.
    #[must_use]
    pub fn requires_containment(self) -> bool {
        matches!(self, Self::Final)
    }
}

// =============================================================================
// SAVE
// =============================================================================

/// One saved clip: `{<x key>: x, <y key>: y, "src": id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedLocation {
    pub keys: LayoutKeys,
    pub x: f64,
    pub y: f64,
    pub src: ItemId,
}

impl Serialize for SavedLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(self.keys.x, &self.x)?;
        map.serialize_entry(self.keys.y, &self.y)?;
        map.serialize_entry(SRC_KEY, &self.src)?;
        map.end()
    }
}

/// Body of a save request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavePayload {
    pub locations: Vec<SavedLocation>,
    pub question: String,
}

/// Snapshot the registry and label into a save payload.
#[must_use]
pub fn serialize(registry: &Registry, label: &str, keys: LayoutKeys) -> SavePayload {
    let locations = registry
        .all()
        .map(|item| SavedLocation { keys, x: item.center.x, y: item.center.y, src: item.id.clone() })
        .collect();
    SavePayload { locations, question: label.to_owned() }
}

// =============================================================================
// LOAD
// =============================================================================

/// One clip read from a load payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLocation {
    pub id: ItemId,
    pub center: Point,
}

/// Parsed load payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedLayout {
    /// Well-formed records, in payload order.
    pub locations: Vec<LoadedLocation>,
    /// Board label taken from the first record, if it carries one.
    pub label: Option<String>,
    /// Number of records dropped as malformed.
    pub skipped: usize,
}

/// Parse a load payload of the shape `{locations: [{<x>, <y>, src, question}]}`.
///
/// # Errors
///
/// Returns [`PersistError::MalformedPayload`] when the payload is not an
/// object or its `locations` field is not a list.
pub fn deserialize(payload: &Value, keys: LayoutKeys) -> Result<LoadedLayout, PersistError> {
    let Some(root) = payload.as_object() else {
        return Err(PersistError::MalformedPayload("expected a JSON object".into()));
    };
    let Some(records) = root.get(LOCATIONS_KEY).and_then(Value::as_array) else {
        return Err(PersistError::MalformedPayload(format!("expected a `{LOCATIONS_KEY}` list")));
    };

    let label = records
        .first()
        .and_then(|first| first.get(QUESTION_KEY))
        .and_then(Value::as_str)
        .map(str::to_owned);

    let mut layout = LoadedLayout { label, ..LoadedLayout::default() };
    for (idx, record) in records.iter().enumerate() {
        match parse_record(record, keys) {
            Some(location) => layout.locations.push(location),
            None => {
                debug!(index = idx, "skipping malformed location record");
                layout.skipped += 1;
            }
        }
    }
    Ok(layout)
}

/// Parse a raw response body. Invalid JSON counts as a malformed payload.
///
/// # Errors
///
/// See [`deserialize`].
pub fn deserialize_str(body: &str, keys: LayoutKeys) -> Result<LoadedLayout, PersistError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| PersistError::MalformedPayload(format!("invalid JSON: {e}")))?;
    deserialize(&value, keys)
}

fn parse_record(record: &Value, keys: LayoutKeys) -> Option<LoadedLocation> {
    let id = record.get(SRC_KEY)?.as_str()?;
    if id.is_empty() {
        return None;
    }
    let x = record.get(keys.x)?.as_f64()?;
    let y = record.get(keys.y)?.as_f64()?;
    let center = Point::new(x, y);
    if !center.is_finite() {
        return None;
    }
    Some(LoadedLocation { id: id.to_owned(), center })
}

/// What a merge did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Clips added to the registry, in payload order.
    pub inserted: Vec<ItemId>,
    /// Clips already present whose in-memory center was kept.
    pub kept: Vec<ItemId>,
}

/// Merge loaded clips into `registry` without touching clips already present.
pub fn merge(registry: &mut Registry, loaded: &LoadedLayout) -> MergeReport {
    let mut report = MergeReport::default();
    for location in &loaded.locations {
        if registry.has(&location.id) {
            report.kept.push(location.id.clone());
            continue;
        }
        match registry.upsert(&location.id, location.center) {
            Ok(Upsert::Inserted) => report.inserted.push(location.id.clone()),
            Ok(Upsert::Moved | Upsert::Unchanged) => report.kept.push(location.id.clone()),
            Err(e) => debug!(error = %e, "skipping location rejected by registry"),
        }
    }
    report
}
