//! Session: save and load orchestration between the engine and a store.
//!
//! DESIGN
//! ======
//! A save is split in two so the payload is fixed before anything suspends:
//! [`BoardSession::prepare_save`] gates and snapshots synchronously, the
//! returned [`PendingSave`] is sent, and [`BoardSession::complete_save`]
//! records the result. Drags that happen while the request is in flight do
//! not change what was sent. Only one save may be in flight at a time; a
//! second request is refused with [`SaveError::InFlight`].
//!
//! ERROR HANDLING
//! ==============
//! Neither a failed save nor a failed load touches the registry. Every
//! outcome leaves a user-facing status line behind.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Endpoints;
use crate::engine::{Action, EngineCore};
use crate::persist::{self, Layout, MergeReport, PersistError, SavePayload};
use crate::store::{LocationStore, SaveOutcome, TransportError};
use crate::validate::ValidationReport;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SaveError {
    #[error("a save is already in progress")]
    InFlight,

    #[error("{}", .0.diagnostic())]
    OutOfBounds(ValidationReport),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Payload(#[from] PersistError),
}

/// A save payload captured at the moment the save was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    pub layout: Layout,
    pub endpoint: String,
    pub payload: SavePayload,
}

impl PendingSave {
    /// Send the captured payload.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`TransportError`].
    pub async fn send(&self, store: &dyn LocationStore) -> Result<SaveOutcome, TransportError> {
        store.save(&self.endpoint, &self.payload).await
    }
}

/// Clears the in-flight flag when a save future is dropped before completing.
struct InFlightGuard<'a> {
    session: &'a mut BoardSession,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.session.save_in_flight {
            warn!("save cancelled before completion");
            self.session.save_in_flight = false;
            self.session.status = Some("Save cancelled.".to_owned());
        }
    }
}

pub struct BoardSession {
    engine: EngineCore,
    store: Arc<dyn LocationStore>,
    endpoints: Endpoints,
    save_in_flight: bool,
    status: Option<String>,
}

impl BoardSession {
    #[must_use]
    pub fn new(engine: EngineCore, store: Arc<dyn LocationStore>, endpoints: Endpoints) -> Self {
        Self { engine, store, endpoints, save_in_flight: false, status: None }
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EngineCore {
        &mut self.engine
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn LocationStore> {
        Arc::clone(&self.store)
    }

    /// Last user-facing status line.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub fn save_in_flight(&self) -> bool {
        self.save_in_flight
    }

    /// Whether the save control for `layout` should be enabled.
    #[must_use]
    pub fn can_save(&self, layout: Layout) -> bool {
        !self.save_in_flight && self.engine.can_save(layout)
    }

    // --- Save ---

    /// Gate and snapshot a save. On success the session is marked in flight
    /// until [`BoardSession::complete_save`] is called.
    ///
    /// # Errors
    ///
    /// [`SaveError::InFlight`] when another save has not completed, and
    /// [`SaveError::OutOfBounds`] when `layout` requires containment and a
    /// clip is outside the boundary.
    pub fn prepare_save(&mut self, layout: Layout) -> Result<PendingSave, SaveError> {
        if self.save_in_flight {
            return Err(SaveError::InFlight);
        }
        if let Err(report) = self.engine.check_save(layout) {
            self.status = Some(report.diagnostic());
            return Err(SaveError::OutOfBounds(report));
        }

        let pending = PendingSave {
            layout,
            endpoint: self.endpoints.save(layout).to_owned(),
            payload: self.engine.snapshot(layout),
        };
        self.save_in_flight = true;
        Ok(pending)
    }

    /// Record the result of a sent save and clear the in-flight flag.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Transport`] when the send failed.
    pub fn complete_save(&mut self, result: Result<SaveOutcome, TransportError>) -> Result<SaveOutcome, SaveError> {
        self.save_in_flight = false;
        match result {
            Ok(outcome) => {
                let status = outcome.message().unwrap_or("Locations saved.").to_owned();
                info!(%status, "save completed");
                self.status = Some(status);
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                self.status = Some(format!("Save failed: {e}"));
                Err(SaveError::Transport(e))
            }
        }
    }

    /// Prepare, send and complete a save. Dropping the returned future
    /// mid-request releases the in-flight flag, so the save can be retried.
    ///
    /// # Errors
    ///
    /// See [`BoardSession::prepare_save`] and [`BoardSession::complete_save`].
    pub async fn save(&mut self, layout: Layout) -> Result<SaveOutcome, SaveError> {
        let pending = self.prepare_save(layout)?;
        let store = Arc::clone(&self.store);
        let guard = InFlightGuard { session: self };
        let result = pending.send(store.as_ref()).await;
        guard.session.complete_save(result)
    }

    // --- Load ---

    /// Fetch `layout` from the store and merge it into the board. Clips
    /// already placed keep their position.
    ///
    /// # Errors
    ///
    /// [`LoadError::Transport`] when the fetch fails and [`LoadError::Payload`]
    /// when the body is not a layout. The registry is untouched in both cases.
    pub async fn load(&mut self, layout: Layout) -> Result<(MergeReport, Vec<Action>), LoadError> {
        let endpoint = self.endpoints.load(layout).to_owned();
        let store = Arc::clone(&self.store);

        let loaded = match store.load(&endpoint).await {
            Ok(value) => persist::deserialize(&value, layout.keys()),
            Err(e) => {
                warn!(error = %e, %endpoint, "load failed");
                self.status = Some(format!("Could not load saved clips: {e}"));
                return Err(LoadError::Transport(e));
            }
        };
        let loaded = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, %endpoint, "load payload rejected");
                self.status = Some(format!("Could not load saved clips: {e}"));
                return Err(LoadError::Payload(e));
            }
        };

        if loaded.skipped > 0 {
            warn!(skipped = loaded.skipped, %endpoint, "skipped malformed records");
        }
        let (report, actions) = self.engine.merge_loaded(&loaded);
        info!(inserted = report.inserted.len(), kept = report.kept.len(), %endpoint, "layout loaded");
        Ok((report, actions))
    }
}
