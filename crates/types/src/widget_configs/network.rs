//! Network speed widget configuration.

use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Smallest unit the speed readout drops to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedUnit {
    Bits,
    #[default]
    Kilobits,
    Megabits,
    Gigabits,
}

impl SpeedUnit {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(SpeedUnit::Bits),
            1 => Some(SpeedUnit::Kilobits),
            2 => Some(SpeedUnit::Megabits),
            3 => Some(SpeedUnit::Gigabits),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedUnit::Bits => "b",
            SpeedUnit::Kilobits => "Kb",
            SpeedUnit::Megabits => "Mb",
            SpeedUnit::Gigabits => "Gb",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Upload instead of download
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_up: Option<bool>,
    /// 0 = triangle arrow, 1 = line arrow
    #[serde(
        default,
        deserialize_with = "lenient::option_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub speed_icon: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient::option_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_unit: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub hide_speed_when_zero: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NetworkConfig {
    pub fn is_up(&self) -> bool {
        self.is_up.unwrap_or(false)
    }

    pub fn speed_icon(&self) -> i64 {
        self.speed_icon.unwrap_or(0)
    }

    pub fn min_unit(&self) -> i64 {
        self.min_unit.unwrap_or(1)
    }

    pub fn min_speed_unit(&self) -> SpeedUnit {
        SpeedUnit::from_index(self.min_unit()).unwrap_or_default()
    }

    pub fn hide_speed_when_zero(&self) -> bool {
        self.hide_speed_when_zero.unwrap_or(false)
    }

    /// Arrow glyph shown in front of the speed
    pub fn arrow(&self) -> &'static str {
        match (self.is_up(), self.speed_icon() == 0) {
            (true, true) => "▲",
            (true, false) => "↑",
            (false, true) => "▼",
            (false, false) => "↓",
        }
    }
}
