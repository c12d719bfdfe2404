//! Seams to the collaborators around the planner core.
//!
//! The planner never talks to storage or a geocoding service directly;
//! hosts implement these for whatever backs their job data.

use crate::geocode::GeocodeError;
use crate::jobs::JobRecord;
use crate::resolver::ResolveFailure;
use crate::types::{Coordinate, Stop};

/// Turns a free-form address into a coordinate.
///
/// `Ok(None)` means the service answered but found nothing.
pub trait Geocoder: Sync {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError>;
}

/// Resolves a job record into a routable stop.
///
/// Jobs that need no lookup are resolved from a rayon pool, so
/// implementations must be `Sync`.
pub trait StopResolver: Sync {
    fn resolve(&self, job: &JobRecord) -> Result<Stop, ResolveFailure>;

    /// Whether resolving `job` calls out to a rate-limited service.
    ///
    /// Such jobs are resolved one at a time, in input order.
    fn requires_lookup(&self, _job: &JobRecord) -> bool {
        true
    }
}

/// Provides a pairwise distance matrix (miles) for a set of locations.
///
/// The matrix is indexed by the provided location order.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>>;
}
