//! Event types for the reactor subsystem.
//!
//! These types are intentionally serializable so a transport layer can carry
//! them between the store and the reactor, or stream updates to subscribers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::location::LocationId;
use crate::session::SessionId;

/// Unique identifier for an update subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random subscription id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of write that produced a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteKind {
    /// The location record did not previously exist.
    Created,
    /// The location record replaced an existing one.
    Updated,
    /// The location record was removed.
    Deleted,
}

/// A change notification for one location record under one session.
///
/// The reactor treats this purely as a signal to re-derive: it reads the
/// current full set of sibling locations rather than relying on any payload
/// carried here. Only `session_id` determines what happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationWrite {
    /// The session whose derived distance must be refreshed.
    pub session_id: SessionId,
    /// The record whose write produced this notification.
    pub location_id: LocationId,
    /// What happened to the record.
    pub kind: WriteKind,
    /// When the notification was observed.
    pub observed_at: DateTime<Utc>,
}

impl LocationWrite {
    /// Create a notification observed now.
    #[must_use]
    pub fn new(session_id: SessionId, location_id: LocationId, kind: WriteKind) -> Self {
        Self {
            session_id,
            location_id,
            kind,
            observed_at: Utc::now(),
        }
    }
}

/// Emitted to subscribers after a successful distance merge-write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceUpdate {
    /// The session whose document was updated.
    pub session_id: SessionId,
    /// The freshly derived distance, as persisted.
    pub distance_meters: f64,
    /// When the reactor computed it.
    pub computed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn write_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_value(WriteKind::Created).unwrap(), json!("created"));
        assert_eq!(serde_json::to_value(WriteKind::Deleted).unwrap(), json!("deleted"));
    }

    #[test]
    fn location_write_round_trips() {
        let ev = LocationWrite::new(SessionId::new(), LocationId::new(), WriteKind::Updated);
        let v = serde_json::to_value(&ev).unwrap();
        let back: LocationWrite = serde_json::from_value(v).unwrap();
        assert_eq!(back, ev);
    }
}
