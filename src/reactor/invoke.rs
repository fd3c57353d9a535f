//! The single stateless reactor invocation.
//!
//! Each invocation is an independent unit of work: one read of the session's
//! location sub-collection, one pure reduction, and at most one merge-write.
//! The store handles are process-wide state initialized once and reused
//! across invocations; the invocation itself carries nothing between runs.

use std::sync::Arc;

use chrono::Utc;

use crate::reactor::compute::derive_distance;
use crate::reactor::events::LocationWrite;
use crate::storage::{LocationStore, SessionStore, StorageError};

/// Outcome of one reactor invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reaction {
    /// Both roles reported a valid position; the distance was recomputed and
    /// merged onto the session document.
    Updated {
        /// The persisted distance in meters.
        distance_meters: f64,
    },
    /// One or both roles are not yet reporting a valid position. Nothing was
    /// written; any previously derived distance stays in place.
    Incomplete,
}

/// The Distance Reactor.
///
/// Holds the long-lived store handles and exposes [`react`](Self::react),
/// the reaction to a single change notification. Concurrent invocations for
/// the same session are tolerated: the read-then-write sequence is not
/// transactional, and a write landing between the read and the write is
/// reconciled by the separate invocation that write itself triggers.
#[derive(Clone)]
pub struct DistanceReactor {
    sessions: Arc<dyn SessionStore>,
    locations: Arc<dyn LocationStore>,
}

impl DistanceReactor {
    /// Create a reactor over the given stores.
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionStore>, locations: Arc<dyn LocationStore>) -> Self {
        Self { sessions, locations }
    }

    /// React to one change notification.
    ///
    /// Reads the current full set of sibling locations (the event is only a
    /// signal; its payload is never trusted), derives the distance, and
    /// merge-writes it with a server-assigned timestamp. Returns
    /// [`Reaction::Incomplete`] without writing when the pair is not yet
    /// complete.
    ///
    /// # Errors
    /// Store failures propagate untranslated; no retry is attempted here.
    pub fn react(&self, event: &LocationWrite) -> Result<Reaction, StorageError> {
        let snapshot = self.locations.list(event.session_id)?;

        let Some(distance_meters) = derive_distance(&snapshot) else {
            return Ok(Reaction::Incomplete);
        };

        self.sessions
            .merge_distance(event.session_id, distance_meters, Utc::now())?;

        Ok(Reaction::Updated { distance_meters })
    }
}
