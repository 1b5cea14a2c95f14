//! Weather widget configuration.

use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Template used when no `format` is configured.
///
/// Placeholders: `{i}` icon, `{n}` condition, `{nt}`/`{dt}` night and day
/// temperature, `{t}` current temperature, `{h}` humidity.
pub const DEFAULT_WEATHER_FORMAT: &str = "{i}{n} {nt}°~{dt}° ({t}°)💧{h}%";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Location id returned by the location lookup
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "lenient::is_blank"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "lenient::is_blank"
    )]
    pub format: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WeatherConfig {
    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    pub fn format(&self) -> &str {
        match self.format.as_deref() {
            Some(format) if !format.is_empty() => format,
            _ => DEFAULT_WEATHER_FORMAT,
        }
    }
}
