use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::id::{ApplianceId, KitchenId, ReservationId};
use kernel::model::reservation::{Reservation, ReservationStatus};
use serde::{Deserialize, Serialize};

/// Booking request as it arrives on the wire. Times and the date stay
/// strings here; the handler parses them through the domain parsers so
/// a malformed value surfaces as `InvalidTimeFormat`/`InvalidDateFormat`
/// rather than a generic deserialization error.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(length(min = 1))]
    pub date: String,
    #[garde(length(min = 1))]
    pub start_time: String,
    #[garde(length(min = 1))]
    pub end_time: String,
    #[garde(skip)]
    pub kitchen_id: i32,
    #[garde(length(min = 1))]
    pub appliance_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub kitchen_id: KitchenId,
    pub appliance_id: ApplianceId,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            reserved_on,
            starts_at,
            ends_at,
            kitchen_id,
            appliance_id,
            reserved_by: _,
            status,
            created_at,
            cancelled_at,
        } = value;
        Self {
            reservation_id,
            date: reserved_on.format("%Y-%m-%d").to_string(),
            start_time: starts_at.to_string(),
            end_time: ends_at.to_string(),
            kitchen_id,
            appliance_id,
            status,
            created_at,
            cancelled_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub reservations: Vec<ReservationResponse>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use kernel::model::id::UserId;
    use kernel::model::time::TimeOfDay;

    use super::*;

    #[test]
    fn request_field_names_are_camel_case() {
        let req: CreateReservationRequest = serde_json::from_str(
            r#"{
                "date": "2025-06-01",
                "startTime": "10:00",
                "endTime": "10:30",
                "kitchenId": 3,
                "applianceId": "k3-oven3"
            }"#,
        )
        .unwrap();
        assert_eq!(req.start_time, "10:00");
        assert_eq!(req.kitchen_id, 3);
        assert!(req.validate(&()).is_ok());
    }

    #[test]
    fn blank_appliance_id_fails_validation() {
        let req = CreateReservationRequest {
            date: "2025-06-01".into(),
            start_time: "10:00".into(),
            end_time: "10:30".into(),
            kitchen_id: 3,
            appliance_id: "".into(),
        };
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn response_renders_times_as_clock_strings() {
        let reservation = Reservation {
            reservation_id: ReservationId::new(),
            reserved_on: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            starts_at: TimeOfDay::at(9, 5),
            ends_at: TimeOfDay::at(10, 0),
            kitchen_id: KitchenId::new(3),
            appliance_id: ApplianceId::new("k3-oven3"),
            reserved_by: UserId::new("user-a"),
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
            cancelled_at: None,
        };
        let body = serde_json::to_value(ReservationResponse::from(reservation)).unwrap();
        assert_eq!(body["date"], "2025-06-01");
        assert_eq!(body["startTime"], "09:05");
        assert_eq!(body["endTime"], "10:00");
        assert_eq!(body["status"], "confirmed");
        assert!(body.get("reservedBy").is_none());
    }
}
