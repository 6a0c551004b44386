//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used for great-circle distances
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A clicked map point (WGS84 degrees)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl PointCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Sum of absolute degree differences
    pub fn manhattan_degrees(&self, other: &PointCoordinate) -> f64 {
        (self.latitude - other.latitude).abs() + (self.longitude - other.longitude).abs()
    }

    /// Great-circle distance in meters (haversine)
    pub fn distance_meters(&self, other: &PointCoordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for PointCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
