use axum::extract::{Path, Query, State};
use axum::Json;
use kernel::model::id::KitchenId;
use kernel::model::time::parse_date;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::kitchen::{
    ApplianceResponse, AppliancesResponse, AvailabilityQuery, AvailabilityResponse,
    KitchenResponse, KitchensResponse,
};

pub async fn show_kitchen_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<KitchensResponse>> {
    let catalog = registry.catalog_repository();
    let mut kitchens = Vec::new();
    for kitchen in catalog.find_all_kitchens().await? {
        let appliances = catalog.find_appliances_by_kitchen(kitchen.id).await?;
        kitchens.push(KitchenResponse::build(kitchen, &appliances));
    }
    Ok(Json(KitchensResponse { kitchens }))
}

pub async fn show_kitchen(
    Path(kitchen_id): Path<KitchenId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<KitchenResponse>> {
    let catalog = registry.catalog_repository();
    let kitchen = catalog
        .find_kitchen(kitchen_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("kitchen {kitchen_id}")))?;
    let appliances = catalog.find_appliances_by_kitchen(kitchen_id).await?;
    Ok(Json(KitchenResponse::build(kitchen, &appliances)))
}

pub async fn show_kitchen_appliances(
    Path(kitchen_id): Path<KitchenId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AppliancesResponse>> {
    if registry
        .catalog_repository()
        .find_kitchen(kitchen_id)
        .await?
        .is_none()
    {
        return Err(AppError::EntityNotFound(format!("kitchen {kitchen_id}")));
    }
    let appliances = registry
        .catalog_repository()
        .find_appliances_by_kitchen(kitchen_id)
        .await?
        .into_iter()
        .map(ApplianceResponse::from)
        .collect();
    Ok(Json(AppliancesResponse { appliances }))
}

/// Day view of one kitchen: the booking policy plus, for every
/// appliance, the confirmed slots taken on the requested date.
pub async fn show_availability(
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    if registry
        .catalog_repository()
        .find_kitchen(query.kitchen_id)
        .await?
        .is_none()
    {
        return Err(AppError::EntityNotFound(format!(
            "kitchen {}",
            query.kitchen_id
        )));
    }
    let reserved_on = parse_date(&query.date)?;

    let appliances = registry
        .catalog_repository()
        .find_appliances_by_kitchen(query.kitchen_id)
        .await?;
    let reservations = registry
        .reservation_repository()
        .find_confirmed_by_kitchen_on(query.kitchen_id, reserved_on)
        .await?;

    Ok(Json(AvailabilityResponse::build(
        registry.operating_policy(),
        appliances,
        reservations,
    )))
}
