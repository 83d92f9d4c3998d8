//! Geographic primitives: points, bounding boxes, and distance math.
//!
//! All coordinates are WGS84-style decimal degrees. Distances use the
//! haversine great-circle formula on a spherical Earth; degree/kilometer
//! conversion uses a flat 111 km/degree constant. Both are deliberate
//! approximations: the dashboard draws coarse overlays, not survey geometry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius (km) for haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude (and, approximately, longitude at
/// mid latitudes). Used for cell sizing and jitter radii.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Rejected coordinate or bounding-box input.
///
/// Constructing a [`GeoPoint`] or [`GeoBounds`] is the only fallible
/// operation in the crate; every algorithm downstream assumes validated
/// input and is total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),
    /// Longitude outside [-180, 180] or not finite.
    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
    /// Bounding box with `north <= south`.
    #[error("inverted bounds: north {north} <= south {south}")]
    InvertedLatSpan { north: f64, south: f64 },
    /// Bounding box with `east <= west`.
    #[error("inverted bounds: east {east} <= west {west}")]
    InvertedLngSpan { east: f64, west: f64 },
}

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a validated point. Rejects NaN/infinite and out-of-range
    /// coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self, ValidationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::Latitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(ValidationError::Longitude(lng));
        }
        Ok(GeoPoint { lat, lng })
    }

    /// Construct without validation. For crate-internal geometry already
    /// derived from validated inputs (cell centers, clamped samples).
    pub(crate) fn new_unchecked(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Great-circle distance to another point (km).
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other)
    }

    /// Displace this point by `distance_km` along a compass bearing
    /// (degrees, 0 = north, 90 = east), using the flat-degree
    /// approximation. Result is clamped to valid coordinate ranges.
    pub fn offset_km(&self, bearing_deg: f64, distance_km: f64) -> GeoPoint {
        let deg = distance_km / KM_PER_DEGREE;
        let rad = bearing_deg.to_radians();
        GeoPoint {
            lat: (self.lat + deg * rad.cos()).clamp(-90.0, 90.0),
            lng: (self.lng + deg * rad.sin()).clamp(-180.0, 180.0),
        }
    }
}

/// An axis-aligned geographic rectangle in degrees.
///
/// Invariants (enforced at construction): `north > south`,
/// `east > west`, all edges within coordinate range. Immutable once
/// constructed; describes a rectangle, never a polygon. Regions that
/// cross the antimeridian are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Create validated bounds.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, ValidationError> {
        GeoPoint::new(north, east)?;
        GeoPoint::new(south, west)?;
        if north <= south {
            return Err(ValidationError::InvertedLatSpan { north, south });
        }
        if east <= west {
            return Err(ValidationError::InvertedLngSpan { east, west });
        }
        Ok(GeoBounds {
            north,
            south,
            east,
            west,
        })
    }

    /// Construct without validation, for geometry derived from already
    /// validated bounds (grid cell rectangles).
    pub(crate) fn new_unchecked(north: f64, south: f64, east: f64, west: f64) -> Self {
        GeoBounds {
            north,
            south,
            east,
            west,
        }
    }

    /// Containment test, inclusive on all edges.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat <= self.north
            && point.lat >= self.south
            && point.lng <= self.east
            && point.lng >= self.west
    }

    /// Geometric center of the rectangle.
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.north + self.south) / 2.0,
            lng: (self.east + self.west) / 2.0,
        }
    }

    /// North-south extent (degrees).
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// East-west extent (degrees).
    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }

    /// Clamp a point into the rectangle.
    pub fn clamp(&self, point: &GeoPoint) -> GeoPoint {
        GeoPoint {
            lat: point.lat.clamp(self.south, self.north),
            lng: point.lng.clamp(self.west, self.east),
        }
    }
}

/// Haversine great-circle distance between two points (km).
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Normalize an angle in degrees to [0, 360).
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn haversine_known_distance() {
        // São Paulo to Rio de Janeiro, ~360 km
        let sp = GeoPoint::new(-23.5505, -46.6333).unwrap();
        let rio = GeoPoint::new(-22.9068, -43.1729).unwrap();
        let d = haversine_km(&sp, &rio);
        assert!((350.0..375.0).contains(&d), "got {d}");
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let p = GeoPoint::new(-15.0, -47.0).unwrap();
        assert_relative_eq!(haversine_km(&p, &p), 0.0);
    }

    #[test]
    fn point_validation_rejects_bad_input() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
        assert!(GeoPoint::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn bounds_validation_rejects_inverted() {
        assert!(GeoBounds::new(5.0, -34.0, -34.0, -74.0).is_ok());
        assert!(matches!(
            GeoBounds::new(-34.0, 5.0, -34.0, -74.0),
            Err(ValidationError::InvertedLatSpan { .. })
        ));
        assert!(matches!(
            GeoBounds::new(5.0, -34.0, -74.0, -34.0),
            Err(ValidationError::InvertedLngSpan { .. })
        ));
    }

    #[test]
    fn bounds_contains_is_edge_inclusive() {
        let b = GeoBounds::new(10.0, 0.0, 10.0, 0.0).unwrap();
        assert!(b.contains(&GeoPoint::new_unchecked(5.0, 5.0)));
        assert!(b.contains(&GeoPoint::new_unchecked(10.0, 10.0)));
        assert!(b.contains(&GeoPoint::new_unchecked(0.0, 0.0)));
        assert!(!b.contains(&GeoPoint::new_unchecked(10.01, 5.0)));
        assert!(!b.contains(&GeoPoint::new_unchecked(5.0, -0.01)));
    }

    #[test]
    fn offset_moves_north_and_east() {
        let p = GeoPoint::new(0.0, 0.0).unwrap();
        let north = p.offset_km(0.0, KM_PER_DEGREE);
        assert_relative_eq!(north.lat, 1.0, epsilon = 1e-9);
        assert_relative_eq!(north.lng, 0.0, epsilon = 1e-9);

        let east = p.offset_km(90.0, KM_PER_DEGREE);
        assert_relative_eq!(east.lat, 0.0, epsilon = 1e-9);
        assert_relative_eq!(east.lng, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn normalize_deg_wraps_into_range() {
        assert_relative_eq!(normalize_deg(0.0), 0.0);
        assert_relative_eq!(normalize_deg(360.0), 0.0);
        assert_relative_eq!(normalize_deg(-10.0), 350.0);
        assert_relative_eq!(normalize_deg(725.0), 5.0);
    }
}
