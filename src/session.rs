//! Session documents and identity.
//!
//! A session pairs two participants whose separation is tracked. The session
//! document owns the derived `distance_meters`/`updated_at` fields; everything
//! else on it belongs to external clients and must survive merge writes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, stable session identifier.
///
/// # Examples
///
/// ```
/// use distshare::SessionId;
///
/// let id = SessionId::new();
/// assert!(!id.is_nil());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns true if this is a nil (all zeros) UUID.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Creates a nil session ID (for testing or sentinel values).
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A session document.
///
/// `distance_meters` and `updated_at` are derived state: recomputed in full by
/// the reactor on every relevant change, absent until first computed, and
/// never incrementally updated. `metadata` is client-owned and opaque to this
/// crate; merge writes leave it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Great-circle separation of the two participants, in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,

    /// Server-assigned time of the last successful distance computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Client-owned fields, carried verbatim.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

impl Session {
    /// Creates an empty session document with no derived state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            distance_meters: None,
            updated_at: None,
            metadata: serde_json::Value::Null,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_session_has_no_derived_state() {
        let s = Session::new();
        assert!(s.distance_meters.is_none());
        assert!(s.updated_at.is_none());
        assert!(s.metadata.is_null());
    }

    #[test]
    fn absent_fields_are_skipped_in_serialization() {
        let s = Session::new();
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v, json!({}));
    }

    #[test]
    fn round_trips_with_metadata() {
        let s = Session {
            distance_meters: Some(42.5),
            updated_at: Some(Utc::now()),
            metadata: json!({"owner": "client-7"}),
        };
        let v = serde_json::to_value(&s).unwrap();
        let back: Session = serde_json::from_value(v).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn session_id_display_round_trip() {
        let id = SessionId::new();
        let parsed: Uuid = id.to_string().parse().unwrap();
        assert_eq!(SessionId::from_uuid(parsed), id);
    }
}
