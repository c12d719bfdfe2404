//! Value types shared by the planner stages.
//!
//! Everything here lives for a single planning request: stops are built
//! from job records, ordered, turned into route stops, and dropped.

use serde::{Deserialize, Serialize};

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

impl Coordinate {
    /// Builds a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Checks a coordinate that arrived without going through `new`
    /// (e.g. deserialized from a job record).
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoordinateError::Latitude(self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoordinateError::Longitude(self.longitude));
        }
        Ok(())
    }

    /// (lat, lng) tuple form used by the distance matrix.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// One job site for the day, located.
///
/// A job whose location cannot be resolved never becomes a `Stop`; the
/// resolver reports it as a `ResolveFailure` instead, so the tour builder
/// only ever sees stops with a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub job_id: String,
    pub customer_name: String,
    pub address: String,
    pub coordinate: Coordinate,
    /// Crew is already en route to or on site at this job.
    pub is_active: bool,
}

/// A stop placed in the computed tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    /// 1-based position in the tour.
    pub order: u32,
    pub job_id: String,
    pub customer_name: String,
    pub address: String,
    pub distance_miles_from_previous: f64,
    pub estimated_drive_minutes_from_previous: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub stops: Vec<RouteStop>,
    pub total_distance_miles: f64,
    pub total_drive_minutes: u32,
    pub map_url: Option<String>,
}

impl RoutePlan {
    /// Assembles a plan whose totals are the sums of its legs.
    pub fn from_stops(stops: Vec<RouteStop>, map_url: Option<String>) -> Self {
        let total_distance_miles = stops.iter().map(|s| s.distance_miles_from_previous).sum();
        let total_drive_minutes = stops
            .iter()
            .map(|s| s.estimated_drive_minutes_from_previous)
            .fold(0u32, u32::saturating_add);

        Self {
            stops,
            total_distance_miles,
            total_drive_minutes,
            map_url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    UnresolvedStop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningWarning {
    pub kind: WarningKind,
    pub job_id: String,
    pub message: String,
}

impl PlanningWarning {
    pub fn unresolved(job_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::UnresolvedStop,
            job_id: job_id.into(),
            message: message.into(),
        }
    }
}
