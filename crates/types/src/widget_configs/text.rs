use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Static text label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "lenient::is_blank"
    )]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextConfig {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
