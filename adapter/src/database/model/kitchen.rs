use std::str::FromStr;

use kernel::model::id::{ApplianceId, KitchenId};
use kernel::model::kitchen::{Appliance, ApplianceType, Kitchen};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct KitchenRow {
    pub id: i32,
    pub kitchen_number: i32,
    pub floor: i32,
    pub name: String,
}

impl From<KitchenRow> for Kitchen {
    fn from(value: KitchenRow) -> Self {
        let KitchenRow {
            id,
            kitchen_number,
            floor,
            name,
        } = value;
        Kitchen {
            id: KitchenId::new(id),
            kitchen_number,
            floor,
            name,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct ApplianceRow {
    pub id: String,
    pub kitchen_id: i32,
    pub appliance_type: String,
    pub name: String,
}

impl TryFrom<ApplianceRow> for Appliance {
    type Error = AppError;

    fn try_from(value: ApplianceRow) -> Result<Self, Self::Error> {
        let ApplianceRow {
            id,
            kitchen_id,
            appliance_type,
            name,
        } = value;
        let appliance_type = ApplianceType::from_str(&appliance_type).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "unknown appliance type \"{appliance_type}\" on appliance {id}"
            ))
        })?;
        Ok(Appliance {
            id: ApplianceId::new(id),
            kitchen_id: KitchenId::new(kitchen_id),
            appliance_type,
            name,
        })
    }
}
