use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeSymbolConfig {
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub filled: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChargeSymbolConfig {
    pub fn filled(&self) -> bool {
        self.filled.unwrap_or(true)
    }
}
