use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Battery percentage readout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCapacityConfig {
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_percentage: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrentCapacityConfig {
    pub fn show_percentage(&self) -> bool {
        self.show_percentage.unwrap_or(true)
    }
}
