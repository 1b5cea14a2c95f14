use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPageConfig {
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "lenient::is_blank"
    )]
    pub url: Option<String>,
    /// Show the url itself instead of a generic label
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_url: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebPageConfig {
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    pub fn show_url(&self) -> bool {
        self.show_url.unwrap_or(false)
    }
}
