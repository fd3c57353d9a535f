//! Great-circle geometry.
//!
//! The distance kernel is a pure function of two validated coordinate pairs.
//! Keeping it free of any I/O lets the reactor's derivation be tested and
//! benchmarked in isolation from whatever mechanism delivers change events.

use serde::Serialize;

use crate::error::ValidationError;

/// Mean Earth radius in meters, as used by the haversine approximation.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A validated latitude/longitude pair in degrees.
///
/// Construction enforces finiteness and range (lat in [-90, 90], lon in
/// [-180, 180]); a `Coordinates` value is always safe to feed to
/// [`haversine_meters`].
///
/// # Examples
///
/// ```
/// use distshare::Coordinates;
///
/// let london = Coordinates::new(51.5007, 0.1246).unwrap();
/// assert!((london.lat() - 51.5007).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Create a validated coordinate pair.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when either component is non-finite or
    /// outside its valid degree range.
    pub fn new(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        if !lat.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate { axis: "lat" });
        }
        if !lon.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate { axis: "lon" });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::LatitudeOutOfRange { value: lat });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ValidationError::LongitudeOutOfRange { value: lon });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }
}

/// Great-circle distance between two points, in meters.
///
/// Haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`]:
/// `h = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)`,
/// `d = 2·R·atan2(√h, √(1−h))`.
///
/// Deterministic: identical inputs produce bit-identical output.
#[must_use]
pub fn haversine_meters(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}
