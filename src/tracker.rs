//! The tracker facade.
//!
//! `SessionTracker` plays the part of the hosting platform: it applies
//! client location writes to the store, then emits the change notification
//! that drives the reactor. Reads pass straight through to the stores.

use std::sync::Arc;

use crate::error::DistShareResult;
use crate::location::{LocationId, LocationRecord};
use crate::reactor::{
    DistanceReactor, LocationWrite, ReactorConfig, ReactorRuntime, UpdateStream, WriteKind,
};
use crate::session::{Session, SessionId};
use crate::storage::{InMemoryStores, LocationStore, SessionStore};

/// Embedded tracker wiring stores to the Distance Reactor.
///
/// The store handles are initialized once and shared with the reactor for the
/// life of the process. Every location write is followed by a change
/// notification; the reactor re-derives from the store, never from the write
/// that happens to have triggered it.
pub struct SessionTracker {
    sessions: Arc<dyn SessionStore>,
    locations: Arc<dyn LocationStore>,
    runtime: ReactorRuntime,
}

impl SessionTracker {
    /// Create a tracker over the given stores with the default config.
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionStore>, locations: Arc<dyn LocationStore>) -> Self {
        Self::with_config(ReactorConfig::default(), sessions, locations)
    }

    /// Create a tracker with an explicit reactor configuration.
    #[must_use]
    pub fn with_config(
        cfg: ReactorConfig,
        sessions: Arc<dyn SessionStore>,
        locations: Arc<dyn LocationStore>,
    ) -> Self {
        let reactor = DistanceReactor::new(Arc::clone(&sessions), Arc::clone(&locations));
        let runtime = ReactorRuntime::new(cfg, reactor);
        Self {
            sessions,
            locations,
            runtime,
        }
    }

    /// Create a tracker backed by fresh in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        let stores = InMemoryStores::default();
        Self::new(Arc::new(stores.sessions), Arc::new(stores.locations))
    }

    /// Apply a client location write and notify the reactor.
    ///
    /// Returns the kind of write that was observed (created vs. updated).
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn record_location(
        &self,
        session: SessionId,
        id: LocationId,
        record: LocationRecord,
    ) -> DistShareResult<WriteKind> {
        let created = self.locations.put(session, id, record)?;
        let kind = if created { WriteKind::Created } else { WriteKind::Updated };
        self.runtime.observe_write(LocationWrite::new(session, id, kind));
        Ok(kind)
    }

    /// Remove a client location record and notify the reactor.
    ///
    /// # Errors
    /// Propagates store failures, including deleting a record that does not
    /// exist.
    pub fn remove_location(&self, session: SessionId, id: LocationId) -> DistShareResult<()> {
        self.locations.delete(session, id)?;
        self.runtime
            .observe_write(LocationWrite::new(session, id, WriteKind::Deleted));
        Ok(())
    }

    /// Replace the client-owned metadata on a session document.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn put_session_metadata(
        &self,
        session: SessionId,
        metadata: serde_json::Value,
    ) -> DistShareResult<()> {
        self.sessions.put_metadata(session, metadata)?;
        Ok(())
    }

    /// Read the current session document.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn session(&self, id: SessionId) -> DistShareResult<Option<Session>> {
        Ok(self.sessions.get(id)?)
    }

    /// Read the current location records under a session.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn locations(&self, id: SessionId) -> DistShareResult<Vec<LocationRecord>> {
        Ok(self.locations.list(id)?)
    }

    /// Subscribe to distance updates.
    ///
    /// # Errors
    /// Returns a disconnection error if the reactor worker is gone.
    pub fn subscribe(&self) -> DistShareResult<UpdateStream> {
        self.runtime.subscribe()
    }

    /// The reactor runtime (queue counters, direct notification access).
    #[must_use]
    pub fn runtime(&self) -> &ReactorRuntime {
        &self.runtime
    }
}
