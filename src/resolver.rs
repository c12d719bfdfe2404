//! Turning job records into routable stops.

use std::time::Instant;

use rayon::prelude::*;

use crate::geocode::{GeocodeError, NoGeocoder};
use crate::jobs::JobRecord;
use crate::traits::{Geocoder, StopResolver};
use crate::types::{Coordinate, CoordinateError, PlanningWarning, Stop};

/// Why a job could not be placed on the route. None of these abort planning.
#[derive(Debug, thiserror::Error)]
pub enum ResolveFailure {
    #[error("no location on file")]
    MissingLocation,

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),

    #[error("billing address could not be geocoded: {0}")]
    GeocodeFailed(#[from] GeocodeError),

    #[error("location lookup skipped, resolution deadline passed")]
    DeadlineExceeded,
}

/// Default resolver: property coordinate first, then the client's billing
/// address through the geocoder.
#[derive(Debug, Clone)]
pub struct RecordResolver<G = NoGeocoder> {
    geocoder: G,
}

impl RecordResolver<NoGeocoder> {
    /// Resolver that only uses coordinates already on the property record.
    pub fn offline() -> Self {
        Self {
            geocoder: NoGeocoder,
        }
    }
}

impl Default for RecordResolver<NoGeocoder> {
    fn default() -> Self {
        Self::offline()
    }
}

impl<G: Geocoder> RecordResolver<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }
}

impl<G: Geocoder> StopResolver for RecordResolver<G> {
    fn resolve(&self, job: &JobRecord) -> Result<Stop, ResolveFailure> {
        if let Some(coordinate) = job.property_coordinate {
            coordinate.validate()?;
            let address = job
                .property_address
                .as_deref()
                .or(job.client_billing_address.as_deref())
                .unwrap_or(&job.customer_name);
            return Ok(stop_for(job, address, coordinate));
        }

        let Some(billing) = job.client_billing_address.as_deref() else {
            return Err(ResolveFailure::MissingLocation);
        };

        let coordinate = self
            .geocoder
            .geocode(billing)?
            .ok_or(ResolveFailure::MissingLocation)?;
        coordinate.validate()?;
        Ok(stop_for(job, billing, coordinate))
    }

    fn requires_lookup(&self, job: &JobRecord) -> bool {
        job.property_coordinate.is_none() && job.client_billing_address.is_some()
    }
}

fn stop_for(job: &JobRecord, address: &str, coordinate: Coordinate) -> Stop {
    Stop {
        job_id: job.id.clone(),
        customer_name: job.customer_name.clone(),
        address: address.to_string(),
        coordinate,
        is_active: job.is_active(),
    }
}

/// Resolved stops (input order) plus one warning per job left out.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub stops: Vec<Stop>,
    pub warnings: Vec<PlanningWarning>,
}

/// Resolves every job, keeping input order.
///
/// Jobs the resolver can place without a lookup are resolved in parallel.
/// The rest go through the resolver one at a time so a public geocoding
/// service sees at most one request in flight. Jobs whose resolution would
/// start after `deadline` are skipped with a warning.
pub fn resolve_stops<R>(jobs: &[JobRecord], resolver: &R, deadline: Option<Instant>) -> Resolution
where
    R: StopResolver,
{
    let past_deadline = move || deadline.is_some_and(|d| Instant::now() >= d);

    let local: Vec<Option<Result<Stop, ResolveFailure>>> = jobs
        .par_iter()
        .map(|job| {
            if resolver.requires_lookup(job) {
                return None;
            }
            if past_deadline() {
                return Some(Err(ResolveFailure::DeadlineExceeded));
            }
            Some(resolver.resolve(job))
        })
        .collect();

    let lookups = local.iter().filter(|result| result.is_none()).count();
    if lookups > 0 {
        tracing::debug!(lookups, "resolving remaining stops sequentially");
    }

    let results = jobs.iter().zip(local).map(|(job, result)| {
        let result = result.unwrap_or_else(|| {
            if past_deadline() {
                Err(ResolveFailure::DeadlineExceeded)
            } else {
                resolver.resolve(job)
            }
        });
        (job, result)
    });

    let mut resolution = Resolution::default();
    for (job, result) in results {
        match result {
            Ok(stop) => resolution.stops.push(stop),
            Err(failure) => {
                tracing::warn!(job_id = %job.id, reason = %failure, "skipping stop");
                resolution
                    .warnings
                    .push(PlanningWarning::unresolved(&job.id, failure.to_string()));
            }
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::jobs::JobStatus;
    use crate::types::WarningKind;

    struct MapGeocoder(HashMap<&'static str, Coordinate>);

    impl Geocoder for MapGeocoder {
        fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
            Ok(self.0.get(address).copied())
        }
    }

    struct BrokenGeocoder;

    impl Geocoder for BrokenGeocoder {
        fn geocode(&self, _address: &str) -> Result<Option<Coordinate>, GeocodeError> {
            Err(GeocodeError::InvalidResponse("boom".to_string()))
        }
    }

    fn job(id: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            customer_name: format!("Customer {id}"),
            status: JobStatus::Scheduled,
            assigned_crew_id: Some("crew-1".to_string()),
            scheduled_date: "2026-10-18".to_string(),
            property_coordinate: None,
            property_address: None,
            client_billing_address: None,
        }
    }

    #[test]
    fn test_property_coordinate_and_address() {
        let mut record = job("1");
        record.property_coordinate = Some(Coordinate::new(40.0, -75.0).unwrap());
        record.property_address = Some("5 Birch Rd".to_string());
        record.client_billing_address = Some("PO Box 9".to_string());
        record.status = JobStatus::InProgress;

        let stop = RecordResolver::offline().resolve(&record).unwrap();
        assert_eq!(stop.address, "5 Birch Rd");
        assert_eq!(stop.coordinate, Coordinate::new(40.0, -75.0).unwrap());
        assert!(stop.is_active);
    }

    #[test]
    fn test_address_falls_back_to_billing_then_name() {
        let mut record = job("1");
        record.property_coordinate = Some(Coordinate::new(40.0, -75.0).unwrap());
        record.client_billing_address = Some("PO Box 9".to_string());
        assert_eq!(RecordResolver::offline().resolve(&record).unwrap().address, "PO Box 9");

        record.client_billing_address = None;
        assert_eq!(RecordResolver::offline().resolve(&record).unwrap().address, "Customer 1");
    }

    #[test]
    fn test_billing_address_is_geocoded() {
        let mut record = job("1");
        record.client_billing_address = Some("9 Pine St".to_string());
        let geocoder = MapGeocoder(HashMap::from([("9 Pine St", Coordinate::new(39.9, -75.3).unwrap())]));

        let stop = RecordResolver::new(geocoder).resolve(&record).unwrap();
        assert_eq!(stop.address, "9 Pine St");
        assert_eq!(stop.coordinate.latitude, 39.9);
    }

    #[test]
    fn test_missing_location() {
        let result = RecordResolver::offline().resolve(&job("1"));
        assert!(matches!(result, Err(ResolveFailure::MissingLocation)));

        let mut record = job("2");
        record.client_billing_address = Some("Nowhere".to_string());
        let result = RecordResolver::offline().resolve(&record);
        assert!(matches!(result, Err(ResolveFailure::MissingLocation)));
    }

    #[test]
    fn test_out_of_range_coordinate() {
        let mut record = job("1");
        record.property_coordinate = Some(Coordinate {
            latitude: 140.0,
            longitude: -75.0,
        });
        let result = RecordResolver::offline().resolve(&record);
        assert!(matches!(result, Err(ResolveFailure::InvalidCoordinate(_))));
    }

    #[test]
    fn test_geocoder_error_is_recoverable() {
        let mut record = job("1");
        record.client_billing_address = Some("9 Pine St".to_string());
        let result = RecordResolver::new(BrokenGeocoder).resolve(&record);
        assert!(matches!(result, Err(ResolveFailure::GeocodeFailed(_))));
    }

    #[test]
    fn test_resolve_stops_partitions_in_order() {
        let mut jobs: Vec<JobRecord> = (1..=6).map(|i| job(&i.to_string())).collect();
        for (i, record) in jobs.iter_mut().enumerate() {
            if i % 2 == 0 {
                record.property_coordinate = Some(Coordinate::new(40.0 + i as f64 * 0.01, -75.0).unwrap());
            }
        }

        let resolution = resolve_stops(&jobs, &RecordResolver::offline(), None);
        let stop_ids: Vec<&str> = resolution.stops.iter().map(|s| s.job_id.as_str()).collect();
        let warning_ids: Vec<&str> = resolution.warnings.iter().map(|w| w.job_id.as_str()).collect();
        assert_eq!(stop_ids, vec!["1", "3", "5"]);
        assert_eq!(warning_ids, vec!["2", "4", "6"]);
        assert!(resolution.warnings.iter().all(|w| w.kind == WarningKind::UnresolvedStop));
        assert_eq!(resolution.warnings[0].message, "no location on file");
    }

    #[test]
    fn test_passed_deadline_skips_everything() {
        let mut record = job("1");
        record.property_coordinate = Some(Coordinate::new(40.0, -75.0).unwrap());
        let deadline = Instant::now() - Duration::from_millis(1);

        let resolution = resolve_stops(&[record], &RecordResolver::offline(), Some(deadline));
        assert!(resolution.stops.is_empty());
        assert_eq!(resolution.warnings.len(), 1);
        assert!(resolution.warnings[0].message.contains("deadline"));
    }

    #[test]
    fn test_only_geocoded_jobs_require_lookup() {
        let resolver = RecordResolver::offline();
        let mut record = job("1");
        assert!(!resolver.requires_lookup(&record));

        record.client_billing_address = Some("9 Pine St".to_string());
        assert!(resolver.requires_lookup(&record));

        record.property_coordinate = Some(Coordinate::new(40.0, -75.0).unwrap());
        assert!(!resolver.requires_lookup(&record));
    }

    #[test]
    fn test_mixed_lookups_keep_input_order() {
        let mut jobs: Vec<JobRecord> = (1..=4).map(|i| job(&i.to_string())).collect();
        jobs[0].client_billing_address = Some("9 Pine St".to_string());
        jobs[1].property_coordinate = Some(Coordinate::new(40.0, -75.0).unwrap());
        jobs[2].client_billing_address = Some("Nowhere".to_string());
        jobs[3].property_coordinate = Some(Coordinate::new(40.1, -75.0).unwrap());
        let geocoder = MapGeocoder(HashMap::from([("9 Pine St", Coordinate::new(39.9, -75.3).unwrap())]));

        let resolution = resolve_stops(&jobs, &RecordResolver::new(geocoder), None);
        let stop_ids: Vec<&str> = resolution.stops.iter().map(|s| s.job_id.as_str()).collect();
        assert_eq!(stop_ids, vec!["1", "2", "4"]);
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.warnings[0].job_id, "3");
    }
}
