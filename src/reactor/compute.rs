//! Pure reduction from a location snapshot to a derived distance.
//!
//! This is the reactor's core isolated from all I/O: a single scan over
//! whatever the store returned, last valid record per role wins, and no
//! distance exists until both roles report a valid position.

use crate::geo::{haversine_meters, Coordinates};
use crate::location::{LocationRecord, Role};

/// Resolve the authoritative position for roles `A` and `B`.
///
/// Records are scanned once in the order given. A record contributes only
/// when its role is exactly `A` or `B` and its coordinates validate; each
/// contribution overwrites the previous candidate for the same role, so when
/// duplicates share a role the last one encountered wins. Unrecognized roles
/// and malformed positions are skipped silently.
///
/// Returns `None` unless both roles have a candidate: partial state is the
/// expected steady state before both participants have reported.
#[must_use]
pub fn resolve_pair(records: &[LocationRecord]) -> Option<(Coordinates, Coordinates)> {
    let mut a = None;
    let mut b = None;

    for record in records {
        let Some(position) = record.position() else {
            continue;
        };
        match record.role {
            Role::A => a = Some(position),
            Role::B => b = Some(position),
            Role::Other(_) => {}
        }
    }

    Some((a?, b?))
}

/// The full derivation: resolve the pair, then take their haversine distance.
///
/// Deterministic for a fixed snapshot; re-running on unchanged records yields
/// a bit-identical value.
#[must_use]
pub fn derive_distance(records: &[LocationRecord]) -> Option<f64> {
    resolve_pair(records).map(|(a, b)| haversine_meters(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_records_no_pair() {
        assert!(resolve_pair(&[]).is_none());
    }

    #[test]
    fn single_role_is_not_a_pair() {
        let records = vec![LocationRecord::new(Role::A, 10.0, 20.0)];
        assert!(resolve_pair(&records).is_none());
        assert!(derive_distance(&records).is_none());
    }

    #[test]
    fn both_roles_resolve() {
        let records = vec![
            LocationRecord::new(Role::A, 0.0, 0.0),
            LocationRecord::new(Role::B, 0.0, 1.0),
        ];
        let (a, b) = resolve_pair(&records).unwrap();
        assert_eq!((a.lat(), a.lon()), (0.0, 0.0));
        assert_eq!((b.lat(), b.lon()), (0.0, 1.0));

        let d = derive_distance(&records).unwrap();
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn last_record_per_role_wins() {
        let records = vec![
            LocationRecord::new(Role::A, 10.0, 10.0),
            LocationRecord::new(Role::B, 0.0, 0.0),
            LocationRecord::new(Role::A, 20.0, 20.0),
        ];
        let (a, _) = resolve_pair(&records).unwrap();
        assert_eq!((a.lat(), a.lon()), (20.0, 20.0));
    }

    #[test]
    fn malformed_coordinates_are_skipped() {
        // Role A appears, but with a string latitude: reads as not reporting.
        let records = vec![
            LocationRecord::from_raw(Role::A, json!("51.5"), json!(0.1)),
            LocationRecord::new(Role::B, 0.0, 0.0),
        ];
        assert!(resolve_pair(&records).is_none());
    }

    #[test]
    fn malformed_duplicate_does_not_clobber_valid_candidate() {
        // A valid A followed by a broken A: the broken record is skipped
        // before role matching, so the valid candidate stands.
        let records = vec![
            LocationRecord::new(Role::A, 5.0, 5.0),
            LocationRecord::from_raw(Role::A, json!(null), json!(6.0)),
            LocationRecord::new(Role::B, 0.0, 0.0),
        ];
        let (a, _) = resolve_pair(&records).unwrap();
        assert_eq!((a.lat(), a.lon()), (5.0, 5.0));
    }

    #[test]
    fn unrecognized_roles_never_contribute() {
        let records = vec![
            LocationRecord::new(Role::Other("observer".to_string()), 1.0, 1.0),
            LocationRecord::new(Role::A, 0.0, 0.0),
            LocationRecord::new(Role::B, 0.0, 1.0),
            LocationRecord::new(Role::Other("a".to_string()), 2.0, 2.0),
        ];
        let (a, b) = resolve_pair(&records).unwrap();
        assert_eq!((a.lat(), a.lon()), (0.0, 0.0));
        assert_eq!((b.lat(), b.lon()), (0.0, 1.0));
    }

    #[test]
    fn out_of_range_coordinates_read_as_not_reporting() {
        let records = vec![
            LocationRecord::new(Role::A, 0.0, 0.0),
            LocationRecord::from_raw(Role::B, json!(0.0), json!(181.0)),
        ];
        assert!(resolve_pair(&records).is_none());
    }

    #[test]
    fn derivation_is_deterministic() {
        let records = vec![
            LocationRecord::new(Role::A, 51.5007, 0.1246),
            LocationRecord::new(Role::B, 48.8566, 2.3522),
        ];
        let d1 = derive_distance(&records).unwrap();
        let d2 = derive_distance(&records).unwrap();
        assert_eq!(d1.to_bits(), d2.to_bits());
    }
}
