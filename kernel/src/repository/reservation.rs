use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

use crate::model::id::{KitchenId, UserId};
use crate::model::reservation::event::{CancelReservation, CreateReservation};
use crate::model::reservation::Reservation;

/// Durable store of reservation records. The sole shared mutable
/// resource of the scheduler; all mutation goes through `create` and
/// `cancel`, never through raw read-then-write primitives.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Atomic "insert if still non-conflicting". The conflict check
    /// against confirmed reservations of the same appliance/date and
    /// the insert happen in one serialized step, so two concurrent
    /// requests for an overlapping slot can never both land.
    /// Loses to an existing booking with `AppError::TimeConflict`.
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;

    /// One-way transition confirmed -> cancelled. Fails with
    /// `EntityNotFound` for unknown ids, `ForbiddenOperation` for
    /// non-owners and `AlreadyCancelled` when repeated.
    async fn cancel(&self, event: CancelReservation) -> AppResult<()>;

    /// Confirmed reservations of every appliance in a kitchen on one
    /// date, ordered by appliance id, then start time, then
    /// reservation id.
    async fn find_confirmed_by_kitchen_on(
        &self,
        kitchen_id: KitchenId,
        reserved_on: NaiveDate,
    ) -> AppResult<Vec<Reservation>>;

    /// Full history of one user, confirmed and cancelled, most recent
    /// first (date descending, then start time descending).
    async fn find_by_user(&self, user_id: &UserId) -> AppResult<Vec<Reservation>>;
}
