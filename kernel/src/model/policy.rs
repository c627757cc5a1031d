use shared::config::PolicyConfig;
use shared::error::{AppError, AppResult};

use crate::model::time::TimeOfDay;

/// Booking rules every new reservation is checked against: the
/// kitchen's operating window and the allowed duration band.
#[derive(Debug, Clone, Copy)]
pub struct OperatingPolicy {
    opens_at: TimeOfDay,
    closes_at: TimeOfDay,
    min_duration_min: u16,
    max_duration_min: u16,
}

impl OperatingPolicy {
    pub fn new(
        opens_at: TimeOfDay,
        closes_at: TimeOfDay,
        min_duration_min: u16,
        max_duration_min: u16,
    ) -> Self {
        Self {
            opens_at,
            closes_at,
            min_duration_min,
            max_duration_min,
        }
    }

    pub fn opens_at(&self) -> TimeOfDay {
        self.opens_at
    }

    pub fn closes_at(&self) -> TimeOfDay {
        self.closes_at
    }

    pub fn min_duration_min(&self) -> u16 {
        self.min_duration_min
    }

    pub fn max_duration_min(&self) -> u16 {
        self.max_duration_min
    }

    /// Checks a candidate interval in policy order: ordering of the
    /// endpoints, then operating hours, then duration. The first
    /// violated rule is the one reported.
    ///
    /// Both bounds are inclusive: a booking may start exactly at
    /// opening time and end exactly at closing time.
    pub fn validate_interval(&self, starts_at: TimeOfDay, ends_at: TimeOfDay) -> AppResult<()> {
        if starts_at >= ends_at {
            return Err(AppError::InvalidTimeRange(format!(
                "start time {starts_at} must be before end time {ends_at}"
            )));
        }
        if starts_at < self.opens_at || ends_at > self.closes_at {
            return Err(AppError::InvalidTimeRange(format!(
                "slot {starts_at}-{ends_at} is outside operating hours {}-{}",
                self.opens_at, self.closes_at
            )));
        }
        let duration = ends_at.minutes() - starts_at.minutes();
        if duration < self.min_duration_min {
            return Err(AppError::DurationTooShort {
                actual: duration,
                min: self.min_duration_min,
            });
        }
        if duration > self.max_duration_min {
            return Err(AppError::DurationTooLong {
                actual: duration,
                max: self.max_duration_min,
            });
        }
        Ok(())
    }
}

impl Default for OperatingPolicy {
    fn default() -> Self {
        Self::new(TimeOfDay::at(6, 0), TimeOfDay::at(23, 0), 5, 120)
    }
}

impl TryFrom<&PolicyConfig> for OperatingPolicy {
    type Error = AppError;

    fn try_from(cfg: &PolicyConfig) -> Result<Self, Self::Error> {
        let opens_at = TimeOfDay::parse(&cfg.opening_time)?;
        let closes_at = TimeOfDay::parse(&cfg.closing_time)?;
        if opens_at >= closes_at {
            return Err(AppError::InvalidTimeRange(format!(
                "opening time {opens_at} must be before closing time {closes_at}"
            )));
        }
        Ok(Self::new(
            opens_at,
            closes_at,
            cfg.min_duration_min,
            cfg.max_duration_min,
        ))
    }
}
