//! In-memory storage backend.
//!
//! Thread-safe in-memory implementations of the storage traits, intended for
//! embedded usage, tests, and as a reference implementation of the merge
//! semantics a managed backend must provide.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::location::{LocationId, LocationRecord};
use crate::session::{Session, SessionId};
use crate::storage::traits::{LocationStore, SessionStore, StorageError};

fn lock_err(context: &'static str) -> StorageError {
    StorageError::BackendError(format!("poisoned lock: {context}"))
}

/// Thread-safe in-memory session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    state: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: SessionId) -> Result<Option<Session>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("session.get"))?;
        Ok(state.get(&id).cloned())
    }

    fn put_metadata(
        &self,
        id: SessionId,
        metadata: serde_json::Value,
    ) -> Result<(), StorageError> {
        let mut state = self.state.write().map_err(|_| lock_err("session.put_metadata"))?;
        state.entry(id).or_default().metadata = metadata;
        Ok(())
    }

    fn merge_distance(
        &self,
        id: SessionId,
        distance_meters: f64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut state = self.state.write().map_err(|_| lock_err("session.merge_distance"))?;
        let session = state.entry(id).or_default();
        session.distance_meters = Some(distance_meters);
        session.updated_at = Some(updated_at);
        Ok(())
    }
}

/// Thread-safe in-memory location store.
///
/// `list` iterates a hash map, so the returned order is unspecified and may
/// differ between calls with identical contents.
#[derive(Debug, Default)]
pub struct InMemoryLocationStore {
    state: RwLock<HashMap<SessionId, HashMap<LocationId, LocationRecord>>>,
}

impl InMemoryLocationStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocationStore for InMemoryLocationStore {
    fn put(
        &self,
        session: SessionId,
        id: LocationId,
        record: LocationRecord,
    ) -> Result<bool, StorageError> {
        let mut state = self.state.write().map_err(|_| lock_err("location.put"))?;
        Ok(state.entry(session).or_default().insert(id, record).is_none())
    }

    fn get(
        &self,
        session: SessionId,
        id: LocationId,
    ) -> Result<Option<LocationRecord>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("location.get"))?;
        Ok(state.get(&session).and_then(|locs| locs.get(&id)).cloned())
    }

    fn delete(&self, session: SessionId, id: LocationId) -> Result<(), StorageError> {
        let mut state = self.state.write().map_err(|_| lock_err("location.delete"))?;
        let locs = state
            .get_mut(&session)
            .ok_or(StorageError::LocationNotFound { location: id, session })?;
        locs.remove(&id)
            .ok_or(StorageError::LocationNotFound { location: id, session })?;
        if locs.is_empty() {
            state.remove(&session);
        }
        Ok(())
    }

    fn list(&self, session: SessionId) -> Result<Vec<LocationRecord>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("location.list"))?;
        Ok(state
            .get(&session)
            .map(|locs| locs.values().cloned().collect())
            .unwrap_or_default())
    }
}

/// Bundle of in-memory stores for embedded use and tests.
#[derive(Debug, Default)]
pub struct InMemoryStores {
    /// Session documents.
    pub sessions: InMemorySessionStore,
    /// Location records.
    pub locations: InMemoryLocationStore,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Role;
    use serde_json::json;

    #[test]
    fn put_reports_creation_then_update() {
        let store = InMemoryLocationStore::new();
        let session = SessionId::new();
        let id = LocationId::new();

        let created = store.put(session, id, LocationRecord::new(Role::A, 1.0, 2.0)).unwrap();
        assert!(created);

        let created = store.put(session, id, LocationRecord::new(Role::A, 3.0, 4.0)).unwrap();
        assert!(!created);

        let rec = store.get(session, id).unwrap().unwrap();
        assert_eq!(rec, LocationRecord::new(Role::A, 3.0, 4.0));
    }

    #[test]
    fn list_returns_all_records_for_session_only() {
        let store = InMemoryLocationStore::new();
        let s1 = SessionId::new();
        let s2 = SessionId::new();

        store.put(s1, LocationId::new(), LocationRecord::new(Role::A, 0.0, 0.0)).unwrap();
        store.put(s1, LocationId::new(), LocationRecord::new(Role::B, 0.0, 1.0)).unwrap();
        store.put(s2, LocationId::new(), LocationRecord::new(Role::A, 5.0, 5.0)).unwrap();

        assert_eq!(store.list(s1).unwrap().len(), 2);
        assert_eq!(store.list(s2).unwrap().len(), 1);
        assert!(store.list(SessionId::new()).unwrap().is_empty());
    }

    #[test]
    fn delete_missing_location_errors() {
        let store = InMemoryLocationStore::new();
        let session = SessionId::new();
        let id = LocationId::new();

        let err = store.delete(session, id).unwrap_err();
        assert!(matches!(err, StorageError::LocationNotFound { .. }));

        store.put(session, id, LocationRecord::new(Role::B, 0.0, 0.0)).unwrap();
        store.delete(session, id).unwrap();
        assert!(store.get(session, id).unwrap().is_none());
    }

    #[test]
    fn merge_distance_creates_session_when_absent() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        let now = Utc::now();

        store.merge_distance(id, 1234.5, now).unwrap();

        let session = store.get(id).unwrap().unwrap();
        assert_eq!(session.distance_meters, Some(1234.5));
        assert_eq!(session.updated_at, Some(now));
        assert!(session.metadata.is_null());
    }

    #[test]
    fn merge_distance_preserves_existing_metadata() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        store.put_metadata(id, json!({"owner": "client-7", "label": "run"})).unwrap();
        store.merge_distance(id, 99.0, Utc::now()).unwrap();

        let session = store.get(id).unwrap().unwrap();
        assert_eq!(session.distance_meters, Some(99.0));
        assert_eq!(session.metadata, json!({"owner": "client-7", "label": "run"}));
    }

    #[test]
    fn put_metadata_preserves_derived_fields() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        let now = Utc::now();

        store.merge_distance(id, 7.0, now).unwrap();
        store.put_metadata(id, json!({"note": "late join"})).unwrap();

        let session = store.get(id).unwrap().unwrap();
        assert_eq!(session.distance_meters, Some(7.0));
        assert_eq!(session.updated_at, Some(now));
        assert_eq!(session.metadata, json!({"note": "late join"}));
    }

    #[test]
    fn get_unknown_session_is_none() {
        let store = InMemorySessionStore::new();
        assert!(store.get(SessionId::new()).unwrap().is_none());
    }
}
