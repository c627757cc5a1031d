use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::id::{ApplianceId, KitchenId, ReservationId, UserId};
use kernel::model::reservation::{Reservation, ReservationStatus};
use kernel::model::time::TimeOfDay;
use shared::error::{AppError, ConflictingInterval};
use uuid::Uuid;

/// Persisted form of a reservation. Times live in the database as
/// minutes since midnight, the Time Model's canonical representation.
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: Uuid,
    pub reserved_on: NaiveDate,
    pub starts_at_min: i32,
    pub ends_at_min: i32,
    pub kitchen_id: i32,
    pub appliance_id: String,
    pub user_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

pub(crate) fn time_from_db(minutes: i32) -> Result<TimeOfDay, AppError> {
    u16::try_from(minutes)
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .ok_or_else(|| {
            AppError::ConversionEntityError(format!("minute count {minutes} is not a time of day"))
        })
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            reserved_on,
            starts_at_min,
            ends_at_min,
            kitchen_id,
            appliance_id,
            user_id,
            status,
            created_at,
            cancelled_at,
        } = value;
        let status = ReservationStatus::from_str(&status).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "unknown reservation status \"{status}\" on reservation {reservation_id}"
            ))
        })?;
        Ok(Reservation {
            reservation_id: ReservationId::from(reservation_id),
            reserved_on,
            starts_at: time_from_db(starts_at_min)?,
            ends_at: time_from_db(ends_at_min)?,
            kitchen_id: KitchenId::new(kitchen_id),
            appliance_id: ApplianceId::new(appliance_id),
            reserved_by: UserId::new(user_id),
            status,
            created_at,
            cancelled_at,
        })
    }
}

/// Slimmer row for the conflict lookup inside the booking transaction;
/// only the bounds needed for the `TimeConflict` payload.
#[derive(sqlx::FromRow)]
pub struct ConflictRow {
    pub reservation_id: Uuid,
    pub starts_at_min: i32,
    pub ends_at_min: i32,
}

impl ConflictRow {
    pub fn into_conflicting_interval(self) -> Result<ConflictingInterval, AppError> {
        Ok(ConflictingInterval {
            reservation_id: self.reservation_id,
            starts_at: time_from_db(self.starts_at_min)?.to_string(),
            ends_at: time_from_db(self.ends_at_min)?.to_string(),
        })
    }
}
