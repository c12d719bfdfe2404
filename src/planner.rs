//! Daily route planning: jobs in, ordered route plus warnings out.
//!
//! A request resolves each job to a stop, orders the resolved stops with
//! the nearest-neighbour tour, prices every leg and composes a navigation
//! link. Jobs that cannot be located are reported but never abort the plan.
//!
//! Nothing is shared between requests, so concurrent calls need no locking.

use std::collections::HashSet;
use std::time::Instant;

use crate::config::PlanOptions;
use crate::jobs::JobRecord;
use crate::resolver::{RecordResolver, resolve_stops};
use crate::tour::plan_tour;
use crate::traits::StopResolver;
use crate::types::{PlanningWarning, RoutePlan, RouteStop, Stop};

/// Failures that leave no route to show.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanningError {
    #[error("no jobs were supplied")]
    EmptyJobList,

    #[error("none of the jobs has a usable location")]
    NoGeocodedStops,

    #[error("job id {0} appears more than once")]
    DuplicateJobId(String),
}

impl PlanningError {
    /// Stable identifier for API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanningError::EmptyJobList => "EmptyJobList",
            PlanningError::NoGeocodedStops => "NoGeocodedStops",
            PlanningError::DuplicateJobId(_) => "DuplicateJobId",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanningOutcome {
    pub plan: RoutePlan,
    pub warnings: Vec<PlanningWarning>,
}

/// Plans a route using only the coordinates already on the job records.
pub fn plan_route(jobs: &[JobRecord], options: &PlanOptions) -> Result<PlanningOutcome, PlanningError> {
    plan_route_with(jobs, &RecordResolver::offline(), options)
}

/// Plans a route, resolving job locations through `resolver`.
pub fn plan_route_with<R>(
    jobs: &[JobRecord],
    resolver: &R,
    options: &PlanOptions,
) -> Result<PlanningOutcome, PlanningError>
where
    R: StopResolver,
{
    if jobs.is_empty() {
        return Err(PlanningError::EmptyJobList);
    }
    check_unique_ids(jobs)?;

    tracing::info!(jobs = jobs.len(), "planning route");

    let deadline = options.resolve_deadline.map(|limit| Instant::now() + limit);
    let resolution = resolve_stops(jobs, resolver, deadline);
    if resolution.stops.is_empty() {
        tracing::warn!(jobs = jobs.len(), "no job could be located");
        return Err(PlanningError::NoGeocodedStops);
    }

    let plan = plan_stops(&resolution.stops, options);

    tracing::info!(
        stops = plan.stops.len(),
        skipped = resolution.warnings.len(),
        total_miles = plan.total_distance_miles,
        total_minutes = plan.total_drive_minutes,
        "route planned"
    );

    Ok(PlanningOutcome {
        plan,
        warnings: resolution.warnings,
    })
}

/// Orders already-resolved stops and prices each leg.
pub fn plan_stops(stops: &[Stop], options: &PlanOptions) -> RoutePlan {
    let tour = plan_tour(stops, &options.distance_matrix());
    let estimator = options.drive_time_estimator();

    let route_stops: Vec<RouteStop> = tour
        .order
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            let stop = &stops[index];
            let miles = tour.leg_miles(position);
            let minutes = if position == 0 { 0 } else { estimator.estimate_minutes(miles) };
            tracing::debug!(job_id = %stop.job_id, miles, minutes, "leg");

            RouteStop {
                order: position as u32 + 1,
                job_id: stop.job_id.clone(),
                customer_name: stop.customer_name.clone(),
                address: stop.address.clone(),
                distance_miles_from_previous: miles,
                estimated_drive_minutes_from_previous: minutes,
            }
        })
        .collect();

    let addresses: Vec<&str> = route_stops.iter().map(|s| s.address.as_str()).collect();
    let map_url = options.map_link_composer().compose(&addresses);

    RoutePlan::from_stops(route_stops, map_url)
}

fn check_unique_ids(jobs: &[JobRecord]) -> Result<(), PlanningError> {
    let mut seen = HashSet::with_capacity(jobs.len());
    for job in jobs {
        if !seen.insert(job.id.as_str()) {
            return Err(PlanningError::DuplicateJobId(job.id.clone()));
        }
    }
    Ok(())
}
