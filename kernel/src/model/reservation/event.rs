use chrono::NaiveDate;
use derive_new::new;

use crate::model::id::{ApplianceId, KitchenId, ReservationId, UserId};
use crate::model::time::TimeOfDay;

/// Fully validated booking request, ready for the store's atomic
/// conflict-checked insert. Times have already passed the operating
/// policy when this event is built.
#[derive(Debug, Clone, new)]
pub struct CreateReservation {
    pub reserved_on: NaiveDate,
    pub starts_at: TimeOfDay,
    pub ends_at: TimeOfDay,
    pub kitchen_id: KitchenId,
    pub appliance_id: ApplianceId,
    pub reserved_by: UserId,
}

#[derive(Debug, Clone, new)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
    pub requested_by: UserId,
}
