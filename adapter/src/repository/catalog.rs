use async_trait::async_trait;
use derive_new::new;
use kernel::model::id::{ApplianceId, KitchenId};
use kernel::model::kitchen::{Appliance, Kitchen};
use kernel::repository::catalog::CatalogRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::kitchen::{ApplianceRow, KitchenRow};
use crate::database::ConnectionPool;

#[derive(new)]
pub struct CatalogRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    async fn find_all_kitchens(&self) -> AppResult<Vec<Kitchen>> {
        let rows: Vec<KitchenRow> = sqlx::query_as(
            r#"
                SELECT id, kitchen_number, floor, name
                FROM kitchens
                ORDER BY floor
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Kitchen::from).collect())
    }

    async fn find_kitchen(&self, kitchen_id: KitchenId) -> AppResult<Option<Kitchen>> {
        let row: Option<KitchenRow> = sqlx::query_as(
            r#"
                SELECT id, kitchen_number, floor, name
                FROM kitchens
                WHERE id = $1
            "#,
        )
        .bind(kitchen_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Kitchen::from))
    }

    async fn find_appliance(
        &self,
        kitchen_id: KitchenId,
        appliance_id: &ApplianceId,
    ) -> AppResult<Option<Appliance>> {
        // membership is part of the lookup: an appliance id that exists
        // under another kitchen resolves to None here
        let row: Option<ApplianceRow> = sqlx::query_as(
            r#"
                SELECT id, kitchen_id, appliance_type, name
                FROM appliances
                WHERE id = $1 AND kitchen_id = $2
            "#,
        )
        .bind(appliance_id.as_str())
        .bind(kitchen_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Appliance::try_from).transpose()
    }

    async fn find_appliances_by_kitchen(
        &self,
        kitchen_id: KitchenId,
    ) -> AppResult<Vec<Appliance>> {
        let rows: Vec<ApplianceRow> = sqlx::query_as(
            r#"
                SELECT id, kitchen_id, appliance_type, name
                FROM appliances
                WHERE kitchen_id = $1
                ORDER BY id
            "#,
        )
        .bind(kitchen_id.raw())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Appliance::try_from).collect()
    }
}
