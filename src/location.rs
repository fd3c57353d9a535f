//! Location records and participant roles.
//!
//! Location records are written by external clients and are read-only from
//! this crate's perspective. Their coordinate fields arrive as loosely typed
//! JSON values; a record only contributes a position when both fields are
//! well-formed numbers in range.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::geo::Coordinates;

/// Opaque, stable location record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(Uuid);

impl LocationId {
    /// Creates a new random location ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a location ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for LocationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Participant role carried on a location record.
///
/// Only the two designated roles `A` and `B` participate in the distance
/// derivation; any other string is preserved but ignored by the reactor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Role {
    /// The first designated participant.
    A,
    /// The second designated participant.
    B,
    /// An unrecognized role string; never contributes to the derivation.
    Other(String),
}

impl Role {
    /// The role's wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "A" => Self::A,
            "B" => Self::B,
            _ => Self::Other(s),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client-written location record under a session.
///
/// `lat`/`lon` are kept as raw JSON values because clients may write anything;
/// [`LocationRecord::position`] performs the validation. A record whose
/// coordinates don't validate reads as "role not yet reporting".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// The participant role claimed by this record.
    pub role: Role,

    /// Raw latitude in degrees; any JSON value.
    pub lat: Value,

    /// Raw longitude in degrees; any JSON value.
    pub lon: Value,
}

impl LocationRecord {
    /// Convenience constructor for a well-formed record.
    #[must_use]
    pub fn new(role: Role, lat: f64, lon: f64) -> Self {
        Self {
            role,
            lat: Value::from(lat),
            lon: Value::from(lon),
        }
    }

    /// Constructor taking raw JSON coordinate fields as clients wrote them.
    #[must_use]
    pub const fn from_raw(role: Role, lat: Value, lon: Value) -> Self {
        Self { role, lat, lon }
    }

    /// The validated position, if both coordinate fields are well-formed
    /// numbers within range. Anything else (strings, nulls, missing values,
    /// out-of-range degrees) reads as `None`.
    #[must_use]
    pub fn position(&self) -> Option<Coordinates> {
        let lat = self.lat.as_f64()?;
        let lon = self.lon.as_f64()?;
        Coordinates::new(lat, lon).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_serializes_as_plain_string() {
        assert_eq!(serde_json::to_value(Role::A).unwrap(), json!("A"));
        assert_eq!(serde_json::to_value(Role::B).unwrap(), json!("B"));
        assert_eq!(
            serde_json::to_value(Role::Other("observer".to_string())).unwrap(),
            json!("observer")
        );
    }

    #[test]
    fn role_deserializes_unknown_strings_as_other() {
        let role: Role = serde_json::from_value(json!("c")).unwrap();
        assert_eq!(role, Role::Other("c".to_string()));

        // Case-sensitive: lowercase "a" is not the designated role.
        let role: Role = serde_json::from_value(json!("a")).unwrap();
        assert_eq!(role, Role::Other("a".to_string()));
    }

    #[test]
    fn position_of_well_formed_record() {
        let rec = LocationRecord::new(Role::A, 51.5007, 0.1246);
        let pos = rec.position().unwrap();
        assert!((pos.lat() - 51.5007).abs() < f64::EPSILON);
        assert!((pos.lon() - 0.1246).abs() < f64::EPSILON);
    }

    #[test]
    fn string_latitude_reads_as_no_position() {
        let rec = LocationRecord::from_raw(Role::A, json!("51.5"), json!(0.1246));
        assert!(rec.position().is_none());
    }

    #[test]
    fn null_longitude_reads_as_no_position() {
        let rec = LocationRecord::from_raw(Role::B, json!(10.0), Value::Null);
        assert!(rec.position().is_none());
    }

    #[test]
    fn integer_coordinates_are_well_formed() {
        let rec = LocationRecord::from_raw(Role::B, json!(10), json!(-20));
        let pos = rec.position().unwrap();
        assert!((pos.lat() - 10.0).abs() < f64::EPSILON);
        assert!((pos.lon() + 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_coordinates_read_as_no_position() {
        let rec = LocationRecord::from_raw(Role::A, json!(95.0), json!(0.0));
        assert!(rec.position().is_none());
    }

    #[test]
    fn record_round_trips_through_json() {
        let rec = LocationRecord::from_raw(Role::Other("spectator".to_string()), json!("x"), json!(1.0));
        let v = serde_json::to_value(&rec).unwrap();
        let back: LocationRecord = serde_json::from_value(v).unwrap();
        assert_eq!(back, rec);
    }
}
