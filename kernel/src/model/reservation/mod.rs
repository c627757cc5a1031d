use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::error::ConflictingInterval;

use crate::model::id::{ApplianceId, KitchenId, ReservationId, UserId};
use crate::model::time::TimeOfDay;

pub mod event;

/// Lifecycle of a reservation: confirmed at creation, cancelled at
/// most once, never deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reserved_on: NaiveDate,
    pub starts_at: TimeOfDay,
    pub ends_at: TimeOfDay,
    pub kitchen_id: KitchenId,
    pub appliance_id: ApplianceId,
    pub reserved_by: UserId,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Reservation {
    pub fn conflicting_interval(&self) -> ConflictingInterval {
        ConflictingInterval {
            reservation_id: self.reservation_id.raw(),
            starts_at: self.starts_at.to_string(),
            ends_at: self.ends_at.to_string(),
        }
    }
}

/// Half-open interval overlap: `[a_start, a_end)` collides with
/// `[b_start, b_end)` iff `a_start < b_end && b_start < a_end`.
/// A booking ending exactly when the next one starts does not
/// conflict, so back-to-back slots pack densely.
pub fn intervals_overlap(
    a_start: TimeOfDay,
    a_end: TimeOfDay,
    b_start: TimeOfDay,
    b_end: TimeOfDay,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Scans the existing reservations of one appliance/date and returns
/// the first confirmed one that overlaps the candidate interval.
/// Cancelled rows never count.
pub fn find_conflict(
    starts_at: TimeOfDay,
    ends_at: TimeOfDay,
    existing: &[Reservation],
) -> Option<&Reservation> {
    existing.iter().find(|r| {
        r.status == ReservationStatus::Confirmed
            && intervals_overlap(starts_at, ends_at, r.starts_at, r.ends_at)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn reservation(starts_at: &str, ends_at: &str, status: ReservationStatus) -> Reservation {
        Reservation {
            reservation_id: ReservationId::new(),
            reserved_on: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            starts_at: t(starts_at),
            ends_at: t(ends_at),
            kitchen_id: KitchenId::new(3),
            appliance_id: ApplianceId::new("k3-oven3"),
            reserved_by: UserId::new("S420000000001"),
            status,
            created_at: Utc::now(),
            cancelled_at: None,
        }
    }

    #[test]
    fn back_to_back_slots_do_not_overlap() {
        assert!(!intervals_overlap(
            t("10:00"),
            t("10:30"),
            t("10:30"),
            t("11:00")
        ));
        assert!(!intervals_overlap(
            t("10:30"),
            t("11:00"),
            t("10:00"),
            t("10:30")
        ));
    }

    #[test]
    fn identical_and_partial_overlaps_are_detected() {
        // exact duplicate
        assert!(intervals_overlap(
            t("10:00"),
            t("10:30"),
            t("10:00"),
            t("10:30")
        ));
        // overlapping tail
        assert!(intervals_overlap(
            t("10:00"),
            t("10:30"),
            t("10:15"),
            t("10:45")
        ));
        // fully contained
        assert!(intervals_overlap(
            t("10:00"),
            t("11:00"),
            t("10:15"),
            t("10:30")
        ));
        // containing
        assert!(intervals_overlap(
            t("10:15"),
            t("10:30"),
            t("10:00"),
            t("11:00")
        ));
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        assert!(!intervals_overlap(
            t("08:00"),
            t("09:00"),
            t("12:00"),
            t("13:00")
        ));
    }

    #[test]
    fn find_conflict_skips_cancelled_reservations() {
        let existing = vec![
            reservation("09:00", "09:15", ReservationStatus::Confirmed),
            reservation("10:00", "10:30", ReservationStatus::Cancelled),
        ];
        // collides only with the cancelled slot, so it is free
        assert!(find_conflict(t("10:00"), t("10:30"), &existing).is_none());
        // collides with the confirmed slot
        let hit = find_conflict(t("09:10"), t("09:20"), &existing).unwrap();
        assert_eq!(hit.starts_at, t("09:00"));
    }

    #[test]
    fn conflict_payload_carries_the_existing_bounds() {
        let existing = reservation("14:00", "14:45", ReservationStatus::Confirmed);
        let interval = existing.conflicting_interval();
        assert_eq!(interval.starts_at, "14:00");
        assert_eq!(interval.ends_at, "14:45");
        assert_eq!(interval.reservation_id, existing.reservation_id.raw());
    }
}
