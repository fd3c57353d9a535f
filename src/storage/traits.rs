//! Abstract storage traits.
//!
//! The reactor owns exactly two interactions with the store per invocation:
//! one read of a session's location sub-collection, and at most one
//! merge-write onto the session document. The traits keep that surface
//! narrow so any backend (in-memory, managed document database) can host it.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::location::{LocationId, LocationRecord};
use crate::session::{Session, SessionId};

/// Errors that can occur during storage operations.
///
/// The reactor does not translate or retry these; they propagate to whatever
/// dispatched the invocation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Session not found.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// Location record not found under the given session.
    #[error("Location not found: {location} (session {session})")]
    LocationNotFound {
        /// The missing record's id.
        location: LocationId,
        /// The session it was looked up under.
        session: SessionId,
    },

    /// Backend error.
    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// Storage trait for session documents.
///
/// # Merge Semantics
/// `merge_distance` must behave as a partial update: it sets exactly the two
/// derived fields and leaves everything else on the document untouched,
/// creating the document when absent.
pub trait SessionStore: Send + Sync {
    /// Get a session document by ID.
    fn get(&self, id: SessionId) -> Result<Option<Session>, StorageError>;

    /// Replace the client-owned metadata blob, creating the session if absent.
    ///
    /// Derived fields already on the document are preserved.
    fn put_metadata(&self, id: SessionId, metadata: serde_json::Value)
        -> Result<(), StorageError>;

    /// Merge-write the derived distance onto the session document.
    ///
    /// Sets `distance_meters` and `updated_at`, preserving all other fields.
    fn merge_distance(
        &self,
        id: SessionId,
        distance_meters: f64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

/// Storage trait for location records under sessions.
pub trait LocationStore: Send + Sync {
    /// Create or replace a location record. Returns true when the record did
    /// not previously exist.
    fn put(
        &self,
        session: SessionId,
        id: LocationId,
        record: LocationRecord,
    ) -> Result<bool, StorageError>;

    /// Get a location record by ID. Returns `Ok(None)` if absent.
    fn get(&self, session: SessionId, id: LocationId)
        -> Result<Option<LocationRecord>, StorageError>;

    /// Delete a location record. Returns an error if not found.
    fn delete(&self, session: SessionId, id: LocationId) -> Result<(), StorageError>;

    /// All location records currently stored under the session.
    ///
    /// Order is whatever the backend returns and is not guaranteed stable.
    fn list(&self, session: SessionId) -> Result<Vec<LocationRecord>, StorageError>;
}
