use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::id::{ApplianceId, KitchenId};
use crate::model::kitchen::{Appliance, Kitchen};

/// Read-only view over the static kitchen/appliance inventory. The
/// catalog is reference data owned by an external collaborator; the
/// scheduler only ever looks things up here.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_all_kitchens(&self) -> AppResult<Vec<Kitchen>>;
    async fn find_kitchen(&self, kitchen_id: KitchenId) -> AppResult<Option<Kitchen>>;
    /// Resolves an appliance within a kitchen. Returns `None` when the
    /// appliance does not exist or belongs to a different kitchen.
    async fn find_appliance(
        &self,
        kitchen_id: KitchenId,
        appliance_id: &ApplianceId,
    ) -> AppResult<Option<Appliance>>;
    /// Appliances of one kitchen in stable id order.
    async fn find_appliances_by_kitchen(&self, kitchen_id: KitchenId)
        -> AppResult<Vec<Appliance>>;
}
