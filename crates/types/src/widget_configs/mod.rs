//! Per-module widget configuration types.
//!
//! Every key is optional. An absent key means "use the module default", which
//! the accessor methods apply; defaults are never written back into the
//! config. Keys a module does not know about are kept in `extra` so they
//! survive a load/save cycle.

pub mod battery;
pub mod charge_symbol;
pub mod current_capacity;
pub mod date;
pub mod network;
pub mod temperature;
pub mod text;
pub mod time;
pub mod weather;
pub mod web_page;

// Re-export all widget config types for convenience
pub use battery::{BatteryConfig, BatteryValueType};
pub use charge_symbol::ChargeSymbolConfig;
pub use current_capacity::CurrentCapacityConfig;
pub use date::{DateConfig, DEFAULT_DATE_FORMAT};
pub use network::{NetworkConfig, SpeedUnit};
pub use temperature::TemperatureConfig;
pub use text::TextConfig;
pub use time::{TimeConfig, DEFAULT_TIME_FORMAT, TIME_FORMATS};
pub use weather::{WeatherConfig, DEFAULT_WEATHER_FORMAT};
pub use web_page::WebPageConfig;

use serde_json::{Map, Value};

/// Access to the keys a config keeps without modelling them
pub trait ExtraKeys {
    fn extra(&self) -> &Map<String, Value>;
    fn extra_mut(&mut self) -> &mut Map<String, Value>;
}

macro_rules! impl_extra_keys {
    ($($config:ty),* $(,)?) => {
        $(
            impl ExtraKeys for $config {
                fn extra(&self) -> &Map<String, Value> {
                    &self.extra
                }

                fn extra_mut(&mut self) -> &mut Map<String, Value> {
                    &mut self.extra
                }
            }
        )*
    };
}

impl_extra_keys!(
    BatteryConfig,
    ChargeSymbolConfig,
    CurrentCapacityConfig,
    DateConfig,
    NetworkConfig,
    TemperatureConfig,
    TextConfig,
    TimeConfig,
    WeatherConfig,
    WebPageConfig,
);

/// Drop a text value that was set to the empty string
pub(crate) fn clear_if_empty(value: &mut Option<String>) {
    if value.as_deref() == Some("") {
        *value = None;
    }
}
