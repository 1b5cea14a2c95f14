//! Time widget configuration.

use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_TIME_FORMAT: &str = "hh:mm";

/// Patterns offered by the time widget editor
pub const TIME_FORMATS: [&str; 9] = [
    "hh:mm", "hh:mm a", "hh:mm:ss", "hh", "HH:mm", "HH:mm:ss", "HH", "mm", "ss",
];

/// Time widget configuration.
///
/// The time widget shares the `dateFormat` key with the date widget; only the
/// default differs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeConfig {
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "lenient::is_blank"
    )]
    pub date_format: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimeConfig {
    pub fn date_format(&self) -> &str {
        match self.date_format.as_deref() {
            Some(format) if !format.is_empty() => format,
            _ => DEFAULT_TIME_FORMAT,
        }
    }

    /// Index of the configured pattern within `TIME_FORMATS` (0 if custom)
    pub fn preset_index(&self) -> usize {
        let format = self.date_format();
        TIME_FORMATS
            .iter()
            .position(|preset| *preset == format)
            .unwrap_or(0)
    }
}
