//! Job records as handed over by the job-management backend.

use serde::{Deserialize, Serialize};

use crate::types::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    /// Completed and cancelled jobs never appear on a day's route.
    pub fn is_open(self) -> bool {
        !matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }
}

/// A job for the day, as seen by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub customer_name: String,
    pub status: JobStatus,
    #[serde(default)]
    pub assigned_crew_id: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub scheduled_date: String,
    #[serde(default)]
    pub property_coordinate: Option<Coordinate>,
    #[serde(default)]
    pub property_address: Option<String>,
    #[serde(default)]
    pub client_billing_address: Option<String>,
}

impl JobRecord {
    /// The crew is already on its way to (or working) this job.
    pub fn is_active(&self) -> bool {
        self.status == JobStatus::InProgress
    }
}

/// Picks the open jobs scheduled for `date` and assigned to `crew_id`,
/// keeping their input order. The result feeds straight into `plan_route`.
pub fn select_jobs_for_day(jobs: &[JobRecord], crew_id: &str, date: &str) -> Vec<JobRecord> {
    jobs.iter()
        .filter(|job| job.scheduled_date == date)
        .filter(|job| job.assigned_crew_id.as_deref() == Some(crew_id))
        .filter(|job| job.status.is_open())
        .cloned()
        .collect()
}
