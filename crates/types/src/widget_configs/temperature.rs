use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureConfig {
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub use_fahrenheit: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TemperatureConfig {
    pub fn use_fahrenheit(&self) -> bool {
        self.use_fahrenheit.unwrap_or(false)
    }
}
