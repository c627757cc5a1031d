use kernel::model::id::{ApplianceId, KitchenId, ReservationId};
use kernel::model::kitchen::{Appliance, ApplianceType, Kitchen};
use kernel::model::policy::OperatingPolicy;
use kernel::model::reservation::Reservation;
use serde::{Deserialize, Serialize};

/// How many appliances of each kind a kitchen has, for the floor
/// overview screen.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceCountsResponse {
    pub microwave: usize,
    pub oven: usize,
    pub stove_left: usize,
    pub stove_right: usize,
}

impl ApplianceCountsResponse {
    pub fn tally(appliances: &[Appliance]) -> Self {
        let mut counts = Self::default();
        for appliance in appliances {
            match appliance.appliance_type {
                ApplianceType::Microwave => counts.microwave += 1,
                ApplianceType::Oven => counts.oven += 1,
                ApplianceType::StoveLeft => counts.stove_left += 1,
                ApplianceType::StoveRight => counts.stove_right += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenResponse {
    pub id: KitchenId,
    pub kitchen_number: i32,
    pub floor: i32,
    pub name: String,
    pub appliance_counts: ApplianceCountsResponse,
}

impl KitchenResponse {
    pub fn build(kitchen: Kitchen, appliances: &[Appliance]) -> Self {
        let Kitchen {
            id,
            kitchen_number,
            floor,
            name,
        } = kitchen;
        Self {
            id,
            kitchen_number,
            floor,
            name,
            appliance_counts: ApplianceCountsResponse::tally(appliances),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchensResponse {
    pub kitchens: Vec<KitchenResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceResponse {
    pub id: ApplianceId,
    pub appliance_type: ApplianceType,
    pub name: String,
}

impl From<Appliance> for ApplianceResponse {
    fn from(value: Appliance) -> Self {
        let Appliance {
            id,
            kitchen_id: _,
            appliance_type,
            name,
        } = value;
        Self {
            id,
            appliance_type,
            name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliancesResponse {
    pub appliances: Vec<ApplianceResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub kitchen_id: KitchenId,
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHoursResponse {
    pub start: String,
    pub end: String,
}

/// One taken slot on an appliance. `start`/`end` are "HH:MM"; the
/// reservation id lets a client link the slot to its own bookings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedIntervalResponse {
    pub start: String,
    pub end: String,
    pub reservation_id: ReservationId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceAvailabilityResponse {
    pub appliance_id: ApplianceId,
    pub appliance_type: ApplianceType,
    pub appliance_name: String,
    pub booked_intervals: Vec<BookedIntervalResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub operating_hours: OperatingHoursResponse,
    pub min_duration: u16,
    pub max_duration: u16,
    pub per_appliance: Vec<ApplianceAvailabilityResponse>,
    pub total_reservations: usize,
}

impl AvailabilityResponse {
    /// Shapes the day view: every appliance of the kitchen appears,
    /// booked or not, and its confirmed reservations keep the store's
    /// start-time ordering.
    pub fn build(
        policy: OperatingPolicy,
        appliances: Vec<Appliance>,
        reservations: Vec<Reservation>,
    ) -> Self {
        let total_reservations = reservations.len();
        let per_appliance = appliances
            .into_iter()
            .map(|appliance| {
                let booked_intervals = reservations
                    .iter()
                    .filter(|r| r.appliance_id == appliance.id)
                    .map(|r| BookedIntervalResponse {
                        start: r.starts_at.to_string(),
                        end: r.ends_at.to_string(),
                        reservation_id: r.reservation_id,
                    })
                    .collect();
                ApplianceAvailabilityResponse {
                    appliance_id: appliance.id,
                    appliance_type: appliance.appliance_type,
                    appliance_name: appliance.name,
                    booked_intervals,
                }
            })
            .collect();
        Self {
            operating_hours: OperatingHoursResponse {
                start: policy.opens_at().to_string(),
                end: policy.closes_at().to_string(),
            },
            min_duration: policy.min_duration_min(),
            max_duration: policy.max_duration_min(),
            per_appliance,
            total_reservations,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use kernel::model::id::UserId;
    use kernel::model::reservation::ReservationStatus;
    use kernel::model::time::TimeOfDay;

    use super::*;

    fn appliance(id: &str, appliance_type: ApplianceType, name: &str) -> Appliance {
        Appliance {
            id: ApplianceId::new(id),
            kitchen_id: KitchenId::new(1),
            appliance_type,
            name: name.into(),
        }
    }

    fn booked(appliance_id: &str, starts_at: &str, ends_at: &str) -> Reservation {
        Reservation {
            reservation_id: ReservationId::new(),
            reserved_on: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            starts_at: TimeOfDay::parse(starts_at).unwrap(),
            ends_at: TimeOfDay::parse(ends_at).unwrap(),
            kitchen_id: KitchenId::new(1),
            appliance_id: ApplianceId::new(appliance_id),
            reserved_by: UserId::new("user-a"),
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
            cancelled_at: None,
        }
    }

    #[test]
    fn appliance_counts_tally_by_kind() {
        let appliances = vec![
            appliance("k1-microwave1", ApplianceType::Microwave, "Microwave 1"),
            appliance("k1-microwave2", ApplianceType::Microwave, "Microwave 2"),
            appliance("k1-oven3", ApplianceType::Oven, "Oven"),
            appliance("k1-stove_left4", ApplianceType::StoveLeft, "Left stove"),
            appliance("k1-stove_right5", ApplianceType::StoveRight, "Right stove"),
        ];
        let counts = ApplianceCountsResponse::tally(&appliances);
        assert_eq!(counts.microwave, 2);
        assert_eq!(counts.oven, 1);
        assert_eq!(counts.stove_left, 1);
        assert_eq!(counts.stove_right, 1);
    }

    #[test]
    fn idle_appliances_still_appear_in_the_day_view() {
        let view = AvailabilityResponse::build(
            OperatingPolicy::default(),
            vec![
                appliance("k1-microwave1", ApplianceType::Microwave, "Microwave 1"),
                appliance("k1-oven3", ApplianceType::Oven, "Oven"),
            ],
            vec![booked("k1-oven3", "10:00", "10:30")],
        );
        assert_eq!(view.per_appliance.len(), 2);
        assert!(view.per_appliance[0].booked_intervals.is_empty());
        assert_eq!(view.per_appliance[1].booked_intervals.len(), 1);
        assert_eq!(view.per_appliance[1].booked_intervals[0].start, "10:00");
        assert_eq!(view.total_reservations, 1);
    }

    #[test]
    fn day_view_carries_the_booking_policy() {
        let view =
            AvailabilityResponse::build(OperatingPolicy::default(), Vec::new(), Vec::new());
        let body = serde_json::to_value(&view).unwrap();
        assert_eq!(body["operatingHours"]["start"], "06:00");
        assert_eq!(body["operatingHours"]["end"], "23:00");
        assert_eq!(body["minDuration"], 5);
        assert_eq!(body["maxDuration"], 120);
        assert_eq!(body["totalReservations"], 0);
    }
}
