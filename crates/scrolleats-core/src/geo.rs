//! Great-circle geometry.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Checks that both components are finite and inside the WGS84 ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinates`] otherwise.
    pub fn validate(self) -> Result<Self, CoreError> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lng_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lng_ok {
            Ok(self)
        } else {
            Err(CoreError::InvalidCoordinates {
                lat: self.latitude,
                lng: self.longitude,
            })
        }
    }

    /// Distance in kilometres to `other`.
    #[must_use]
    pub fn distance_to(self, other: Coordinates) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// `"lat,lng"` as the places API expects it in `location` parameters.
    #[must_use]
    pub fn to_query_value(self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Haversine distance in kilometres between two points given in degrees.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_pct(actual: f64, expected: f64, pct: f64) -> bool {
        ((actual - expected) / expected).abs() <= pct / 100.0
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = distance_km(0.0, 0.0, 0.0, 1.0);
        assert!(within_pct(d, 111.19, 0.5), "got {d}");
    }

    #[test]
    fn identical_points_are_zero_apart() {
        assert!(distance_km(37.7749, -122.4194, 37.7749, -122.4194).abs() < f64::EPSILON);
    }

    #[test]
    fn san_francisco_to_los_angeles() {
        // Reference great-circle distance on a 6371 km sphere: ~559.1 km.
        let d = distance_km(37.7749, -122.4194, 34.0522, -118.2437);
        assert!(within_pct(d, 559.1, 0.1), "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(51.5074, -0.1278);
        let b = Coordinates::new(48.8566, 2.3522);
        assert!((a.distance_to(b) - b.distance_to(a)).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_out_of_range_and_nan() {
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
        assert!(Coordinates::new(-33.86, 151.2).validate().is_ok());
    }

    #[test]
    fn query_value_is_comma_joined() {
        assert_eq!(
            Coordinates::new(37.7749, -122.4194).to_query_value(),
            "37.7749,-122.4194"
        );
    }
}
