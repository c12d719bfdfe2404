//! Great-circle distances between job sites.
//!
//! Straight-line distance ignores the road network, which is fine for
//! ordering a handful of stops inside one service area.

use crate::traits::DistanceMatrixProvider;
use crate::types::Coordinate;

/// Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance in miles using the standard Earth radius.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    haversine_miles(a.as_tuple(), b.as_tuple(), EARTH_RADIUS_MILES)
}

/// Haversine distance between two (lat, lng) points on a sphere of the
/// given radius. Inputs are degrees.
pub fn haversine_miles(from: (f64, f64), to: (f64, f64), radius_miles: f64) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    radius_miles * c
}

/// Haversine-based distance matrix provider.
#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    pub earth_radius_miles: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            earth_radius_miles: EARTH_RADIUS_MILES,
        }
    }
}

impl HaversineMatrix {
    pub fn new(earth_radius_miles: f64) -> Self {
        Self { earth_radius_miles }
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>> {
        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];

        // Fill the upper triangle and mirror it so the matrix is exactly symmetric.
        for i in 0..n {
            for j in (i + 1)..n {
                let miles = haversine_miles(locations[i], locations[j], self.earth_radius_miles);
                matrix[i][j] = miles;
                matrix[j][i] = miles;
            }
        }

        matrix
    }
}
