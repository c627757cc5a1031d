use serde::{Deserialize, Serialize};

use crate::model::id::{ApplianceId, KitchenId};

/// Closed set of appliance kinds found in every shared kitchen.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ApplianceType {
    Microwave,
    Oven,
    StoveLeft,
    StoveRight,
}

/// One physical resource inside a kitchen. Catalog data, immutable
/// after load.
#[derive(Debug, Clone)]
pub struct Appliance {
    pub id: ApplianceId,
    pub kitchen_id: KitchenId,
    pub appliance_type: ApplianceType,
    pub name: String,
}

/// A floor's shared cooking facility. Catalog data, immutable.
#[derive(Debug, Clone)]
pub struct Kitchen {
    pub id: KitchenId,
    pub kitchen_number: i32,
    pub floor: i32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn appliance_type_uses_snake_case_strings() {
        assert_eq!(ApplianceType::StoveLeft.to_string(), "stove_left");
        assert_eq!(
            ApplianceType::from_str("microwave").unwrap(),
            ApplianceType::Microwave
        );
        assert!(ApplianceType::from_str("dishwasher").is_err());
    }
}
