use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use garde::Validate;
use kernel::model::id::{ApplianceId, KitchenId, ReservationId};
use kernel::model::reservation::event::{CancelReservation, CreateReservation};
use kernel::model::time::{parse_date, TimeOfDay};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::extractor::RequestedUser;
use crate::model::reservation::{
    CreateReservationRequest, ReservationResponse, ReservationsResponse,
};

/// Books a slot. The catalog lookup runs first so an unknown kitchen
/// or appliance reports as not-found rather than as a policy error,
/// then the rules apply in order: format, range, duration. The conflict
/// check itself lives inside the store's atomic insert.
pub async fn register_reservation(
    user: RequestedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    req.validate(&())?;

    let kitchen_id = KitchenId::new(req.kitchen_id);
    let appliance_id = ApplianceId::new(req.appliance_id.clone());
    let appliance = registry
        .catalog_repository()
        .find_appliance(kitchen_id, &appliance_id)
        .await?;
    if appliance.is_none() {
        return Err(AppError::EntityNotFound(format!(
            "appliance {appliance_id} in kitchen {kitchen_id}"
        )));
    }

    let reserved_on = parse_date(&req.date)?;
    let starts_at = TimeOfDay::parse(&req.start_time)?;
    let ends_at = TimeOfDay::parse(&req.end_time)?;
    registry
        .operating_policy()
        .validate_interval(starts_at, ends_at)?;

    let created = registry
        .reservation_repository()
        .create(CreateReservation::new(
            reserved_on,
            starts_at,
            ends_at,
            kitchen_id,
            appliance_id,
            user.id(),
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(ReservationResponse::from(created))))
}

pub async fn show_my_reservations(
    user: RequestedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    let reservations = registry
        .reservation_repository()
        .find_by_user(&user.id())
        .await?
        .into_iter()
        .map(ReservationResponse::from)
        .collect();
    Ok(Json(ReservationsResponse { reservations }))
}

pub async fn cancel_reservation(
    user: RequestedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_repository()
        .cancel(CancelReservation::new(reservation_id, user.id()))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
