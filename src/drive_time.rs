//! Drive time estimation from straight-line leg distance.

/// Average driving speed assumption for time estimation.
pub const DEFAULT_AVERAGE_SPEED_MPH: f64 = 30.0;

/// Park, unload and walk-in overhead charged even for adjacent stops.
pub const DEFAULT_MINIMUM_DRIVE_MINUTES: u32 = 5;

#[derive(Debug, Clone)]
pub struct DriveTimeEstimator {
    pub average_speed_mph: f64,
    pub minimum_minutes: u32,
}

impl Default for DriveTimeEstimator {
    fn default() -> Self {
        Self {
            average_speed_mph: DEFAULT_AVERAGE_SPEED_MPH,
            minimum_minutes: DEFAULT_MINIMUM_DRIVE_MINUTES,
        }
    }
}

impl DriveTimeEstimator {
    pub fn new(average_speed_mph: f64, minimum_minutes: u32) -> Self {
        Self {
            average_speed_mph,
            minimum_minutes,
        }
    }

    /// `max(minimum, round(miles / speed * 60))`.
    pub fn estimate_minutes(&self, distance_miles: f64) -> u32 {
        let minutes = (distance_miles / self.average_speed_mph * 60.0).round();
        // `as` saturates, so NaN becomes 0 and huge values clamp to u32::MAX.
        (minutes as u32).max(self.minimum_minutes)
    }
}
