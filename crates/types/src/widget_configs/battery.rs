//! Battery details widget configuration.

use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which battery reading the widget shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryValueType {
    Watts,
    ChargingCurrent,
    Amperage,
    ChargeCycles,
}

impl BatteryValueType {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(BatteryValueType::Watts),
            1 => Some(BatteryValueType::ChargingCurrent),
            2 => Some(BatteryValueType::Amperage),
            3 => Some(BatteryValueType::ChargeCycles),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryConfig {
    #[serde(
        default,
        deserialize_with = "lenient::option_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub battery_value_type: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BatteryConfig {
    pub fn battery_value_type(&self) -> i64 {
        self.battery_value_type.unwrap_or(0)
    }

    /// Typed reading kind; `None` for indices written by a newer version
    pub fn value_type(&self) -> Option<BatteryValueType> {
        BatteryValueType::from_index(self.battery_value_type())
    }
}
