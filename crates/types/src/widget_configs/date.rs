//! Date widget configuration.

use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pattern used when no `dateFormat` is configured
pub const DEFAULT_DATE_FORMAT: &str = "E MMM dd";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateConfig {
    /// ICU style date pattern (e.g. "E MMM dd")
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "lenient::is_blank"
    )]
    pub date_format: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DateConfig {
    pub fn date_format(&self) -> &str {
        match self.date_format.as_deref() {
            Some(format) if !format.is_empty() => format,
            _ => DEFAULT_DATE_FORMAT,
        }
    }
}
