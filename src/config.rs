//! Planner tuning knobs.
//!
//! Defaults cover a suburban tree-care crew. Speed and Earth radius can be
//! overridden from the environment.

use std::env;
use std::time::Duration;

use crate::drive_time::{DEFAULT_AVERAGE_SPEED_MPH, DEFAULT_MINIMUM_DRIVE_MINUTES, DriveTimeEstimator};
use crate::haversine::{EARTH_RADIUS_MILES, HaversineMatrix};
use crate::map_link::{DEFAULT_MAP_BASE_URL, DEFAULT_TRAVEL_MODE, MapLinkComposer};

pub const AVERAGE_SPEED_ENV: &str = "ROUTE_PLANNER_AVERAGE_SPEED_MPH";
pub const EARTH_RADIUS_ENV: &str = "ROUTE_PLANNER_EARTH_RADIUS_MILES";

#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Assumed average driving speed between stops.
    pub average_speed_mph: f64,
    /// Floor applied to every leg's drive estimate.
    pub minimum_drive_minutes: u32,
    pub earth_radius_miles: f64,
    pub map_base_url: String,
    pub travel_mode: String,
    /// Upper bound on time spent resolving job locations.
    pub resolve_deadline: Option<Duration>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            average_speed_mph: DEFAULT_AVERAGE_SPEED_MPH,
            minimum_drive_minutes: DEFAULT_MINIMUM_DRIVE_MINUTES,
            earth_radius_miles: EARTH_RADIUS_MILES,
            map_base_url: DEFAULT_MAP_BASE_URL.to_string(),
            travel_mode: DEFAULT_TRAVEL_MODE.to_string(),
            resolve_deadline: None,
        }
    }
}

impl PlanOptions {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from any key/value source. Values that do not parse
    /// as a positive finite number are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(speed) = positive_number(&lookup, AVERAGE_SPEED_ENV) {
            self.average_speed_mph = speed;
        }
        if let Some(radius) = positive_number(&lookup, EARTH_RADIUS_ENV) {
            self.earth_radius_miles = radius;
        }
        self
    }

    /// Drive-time estimator for these options. A speed that is not a
    /// positive finite number falls back to the default.
    pub fn drive_time_estimator(&self) -> DriveTimeEstimator {
        let speed = usable_or_default(self.average_speed_mph, DEFAULT_AVERAGE_SPEED_MPH, "average_speed_mph");
        DriveTimeEstimator::new(speed, self.minimum_drive_minutes)
    }

    /// Great-circle matrix for these options. An unusable radius falls back
    /// to the mean Earth radius.
    pub fn distance_matrix(&self) -> HaversineMatrix {
        let radius = usable_or_default(self.earth_radius_miles, EARTH_RADIUS_MILES, "earth_radius_miles");
        HaversineMatrix::new(radius)
    }

    pub fn map_link_composer(&self) -> MapLinkComposer {
        MapLinkComposer::new(self.map_base_url.clone(), self.travel_mode.clone())
    }
}

fn usable_or_default(value: f64, default: f64, setting: &'static str) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        tracing::warn!(setting, value, default, "planner setting out of range, using default");
        default
    }
}

fn positive_number<F>(lookup: &F, key: &str) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Some(value),
        _ => {
            tracing::warn!(key, value = %raw, "ignoring invalid planner setting");
            None
        }
    }
}
