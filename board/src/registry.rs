//! Item registry: placed clips and their centers.
//!
//! The registry is the only place coordinates live. The engine mutates it in
//! response to gestures and merge-loads; the renderer and the serializer only
//! read from it. Entries are never removed.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use serde::Serialize;

use crate::geometry::Point;

/// Identifier of a placed clip: its media source locator.
pub type ItemId = String;

/// One placed clip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Media source locator; unique within the registry.
    pub id: ItemId,
    /// Center of the clip in board coordinates.
    pub center: Point,
    /// Display-only flag. Never persisted and never changes `center`.
    pub enlarged: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("item not found: {0}")]
    NotFound(ItemId),
    #[error("non-finite coordinate for {id}: ({x}, {y})")]
    NonFiniteCoordinate { id: ItemId, x: f64, y: f64 },
}

/// What an [`Registry::upsert`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new entry was created.
    Inserted,
    /// An existing entry's center changed.
    Moved,
    /// The entry already had this center.
    Unchanged,
}

/// In-memory store of placed clips, kept in insertion order.
#[derive(Debug, Default)]
pub struct Registry {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a clip, or overwrite the center of the clip with the same `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NonFiniteCoordinate`] when either coordinate is
    /// NaN or infinite; the registry is left untouched.
    pub fn upsert(&mut self, id: &str, center: Point) -> Result<Upsert, RegistryError> {
        if !center.is_finite() {
            return Err(RegistryError::NonFiniteCoordinate { id: id.to_owned(), x: center.x, y: center.y });
        }

        if let Some(&idx) = self.index.get(id) {
            let item = &mut self.items[idx];
            if item.center == center {
                return Ok(Upsert::Unchanged);
            }
            item.center = center;
            return Ok(Upsert::Moved);
        }

        self.index.insert(id.to_owned(), self.items.len());
        self.items.push(Item { id: id.to_owned(), center, enlarged: false });
        Ok(Upsert::Inserted)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|&idx| &self.items[idx])
    }

    /// Like [`Registry::get`], for callers that want an error value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no clip has this `id`.
    pub fn require(&self, id: &str) -> Result<&Item, RegistryError> {
        self.get(id).ok_or_else(|| RegistryError::NotFound(id.to_owned()))
    }

    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate every clip in insertion order. Each call walks the current
    /// state; nothing is copied.
    pub fn all(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter()
    }

    /// Set the display-only enlarged flag. Returns whether it changed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no clip has this `id`.
    pub fn set_enlarged(&mut self, id: &str, enlarged: bool) -> Result<bool, RegistryError> {
        let Some(&idx) = self.index.get(id) else {
            return Err(RegistryError::NotFound(id.to_owned()));
        };
        let item = &mut self.items[idx];
        let changed = item.enlarged != enlarged;
        item.enlarged = enlarged;
        Ok(changed)
    }

    /// Position of `id` in insertion order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
