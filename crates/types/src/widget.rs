//! Widget instances and their typed configuration.

use crate::module::WidgetModule;
use crate::widget_configs::{
    clear_if_empty, BatteryConfig, ExtraKeys, ChargeSymbolConfig, CurrentCapacityConfig, DateConfig,
    NetworkConfig, TemperatureConfig, TextConfig, TimeConfig, WeatherConfig, WebPageConfig,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// In-memory identity of a widget instance. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(Uuid);

impl WidgetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Type-safe union of all widget configurations, keyed by module.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetConfig {
    Date(DateConfig),
    Time(TimeConfig),
    Network(NetworkConfig),
    Battery(BatteryConfig),
    CurrentCapacity(CurrentCapacityConfig),
    ChargeSymbol(ChargeSymbolConfig),
    Temperature(TemperatureConfig),
    Text(TextConfig),
    Weather(WeatherConfig),
    WebPage(WebPageConfig),
}

impl WidgetConfig {
    pub fn module(&self) -> WidgetModule {
        match self {
            WidgetConfig::Date(_) => WidgetModule::Date,
            WidgetConfig::Time(_) => WidgetModule::Time,
            WidgetConfig::Network(_) => WidgetModule::Network,
            WidgetConfig::Battery(_) => WidgetModule::Battery,
            WidgetConfig::CurrentCapacity(_) => WidgetModule::CurrentCapacity,
            WidgetConfig::ChargeSymbol(_) => WidgetModule::ChargeSymbol,
            WidgetConfig::Temperature(_) => WidgetModule::Temperature,
            WidgetConfig::Text(_) => WidgetModule::Text,
            WidgetConfig::Weather(_) => WidgetModule::Weather,
            WidgetConfig::WebPage(_) => WidgetModule::WebPage,
        }
    }

    /// Empty config for a module (every key absent)
    pub fn default_for(module: WidgetModule) -> Self {
        match module {
            WidgetModule::Date => WidgetConfig::Date(DateConfig::default()),
            WidgetModule::Time => WidgetConfig::Time(TimeConfig::default()),
            WidgetModule::Network => WidgetConfig::Network(NetworkConfig::default()),
            WidgetModule::Battery => WidgetConfig::Battery(BatteryConfig::default()),
            WidgetModule::CurrentCapacity => {
                WidgetConfig::CurrentCapacity(CurrentCapacityConfig::default())
            }
            WidgetModule::ChargeSymbol => WidgetConfig::ChargeSymbol(ChargeSymbolConfig::default()),
            WidgetModule::Temperature => WidgetConfig::Temperature(TemperatureConfig::default()),
            WidgetModule::Text => WidgetConfig::Text(TextConfig::default()),
            WidgetModule::Weather => WidgetConfig::Weather(WeatherConfig::default()),
            WidgetModule::WebPage => WidgetConfig::WebPage(WebPageConfig::default()),
        }
    }

    /// Build a typed config from a flat key/value map.
    ///
    /// Unknown keys, and known keys whose value does not fit the field type,
    /// land in the config's `extra` bag unchanged.
    pub fn from_map(module: WidgetModule, map: Map<String, Value>) -> Self {
        match module {
            WidgetModule::Date => WidgetConfig::Date(parse_config(module, map)),
            WidgetModule::Time => WidgetConfig::Time(parse_config(module, map)),
            WidgetModule::Network => WidgetConfig::Network(parse_config(module, map)),
            WidgetModule::Battery => WidgetConfig::Battery(parse_config(module, map)),
            WidgetModule::CurrentCapacity => {
                WidgetConfig::CurrentCapacity(parse_config(module, map))
            }
            WidgetModule::ChargeSymbol => WidgetConfig::ChargeSymbol(parse_config(module, map)),
            WidgetModule::Temperature => WidgetConfig::Temperature(parse_config(module, map)),
            WidgetModule::Text => WidgetConfig::Text(parse_config(module, map)),
            WidgetModule::Weather => WidgetConfig::Weather(parse_config(module, map)),
            WidgetModule::WebPage => WidgetConfig::WebPage(parse_config(module, map)),
        }
    }

    /// Flatten into the persisted key/value form. Absent keys and empty text
    /// values are omitted. A typed field wins over an `extra` entry of the
    /// same name.
    pub fn to_map(&self) -> Map<String, Value> {
        match self {
            WidgetConfig::Date(cfg) => flatten(cfg),
            WidgetConfig::Time(cfg) => flatten(cfg),
            WidgetConfig::Network(cfg) => flatten(cfg),
            WidgetConfig::Battery(cfg) => flatten(cfg),
            WidgetConfig::CurrentCapacity(cfg) => flatten(cfg),
            WidgetConfig::ChargeSymbol(cfg) => flatten(cfg),
            WidgetConfig::Temperature(cfg) => flatten(cfg),
            WidgetConfig::Text(cfg) => flatten(cfg),
            WidgetConfig::Weather(cfg) => flatten(cfg),
            WidgetConfig::WebPage(cfg) => flatten(cfg),
        }
    }

    /// Remove text-like keys whose value is the empty string
    pub fn clear_empty_text(&mut self) {
        match self {
            WidgetConfig::Date(cfg) => clear_if_empty(&mut cfg.date_format),
            WidgetConfig::Time(cfg) => clear_if_empty(&mut cfg.date_format),
            WidgetConfig::Text(cfg) => clear_if_empty(&mut cfg.text),
            WidgetConfig::Weather(cfg) => {
                clear_if_empty(&mut cfg.location);
                clear_if_empty(&mut cfg.format);
            }
            WidgetConfig::WebPage(cfg) => clear_if_empty(&mut cfg.url),
            WidgetConfig::Network(_)
            | WidgetConfig::Battery(_)
            | WidgetConfig::CurrentCapacity(_)
            | WidgetConfig::ChargeSymbol(_)
            | WidgetConfig::Temperature(_) => {}
        }
    }

    /// Reinterpret this config's keys under another module
    pub fn coerce_to(&self, module: WidgetModule) -> Self {
        if self.module() == module {
            self.clone()
        } else {
            Self::from_map(module, self.to_map())
        }
    }
}

fn parse_config<T>(module: WidgetModule, map: Map<String, Value>) -> T
where
    T: DeserializeOwned + Serialize + Default + ExtraKeys,
{
    let mut config: T = serde_json::from_value(Value::Object(map.clone())).unwrap_or_else(|e| {
        log::warn!("Unreadable {} widget config, keeping raw keys: {}", module, e);
        T::default()
    });

    // Keys the typed fields rejected are carried over verbatim
    let read = to_object(&config);
    for (key, value) in map {
        if read.contains_key(&key) || matches!(&value, Value::String(s) if s.is_empty()) {
            continue;
        }
        log::debug!("Keeping unreadable {} key '{}' as-is", module, key);
        config.extra_mut().insert(key, value);
    }
    config
}

fn flatten<T>(config: &T) -> Map<String, Value>
where
    T: Serialize + Clone + ExtraKeys,
{
    let mut typed = config.clone();
    let extra = std::mem::take(typed.extra_mut());
    let mut map = to_object(&typed);
    for (key, value) in extra {
        map.entry(key).or_insert(value);
    }
    map
}

fn to_object<T: Serialize>(config: &T) -> Map<String, Value> {
    match serde_json::to_value(config) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            log::warn!("Failed to serialize widget config: {}", e);
            Map::new()
        }
    }
}

/// One configured widget inside a widget set.
///
/// The module is fixed at creation; replacing the config keeps it.
#[derive(Debug, Clone)]
pub struct WidgetInstance {
    id: WidgetId,
    config: WidgetConfig,
    /// Unsaved edits pending; never persisted
    pub modified: bool,
}

impl WidgetInstance {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            id: WidgetId::new(),
            config,
            modified: false,
        }
    }

    pub fn with_module(module: WidgetModule) -> Self {
        Self::new(WidgetConfig::default_for(module))
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn module(&self) -> WidgetModule {
        self.config.module()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Replace the config, keeping this instance's module and identity
    pub fn set_config(&mut self, config: &WidgetConfig) {
        let mut config = config.coerce_to(self.module());
        config.clear_empty_text();
        self.config = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_map_reads_known_keys() {
        let config = WidgetConfig::from_map(
            WidgetModule::Network,
            object(json!({"isUp": true, "speedIcon": 1})),
        );
        match config {
            WidgetConfig::Network(cfg) => {
                assert_eq!(cfg.is_up, Some(true));
                assert_eq!(cfg.speed_icon, Some(1));
                assert_eq!(cfg.min_unit, None);
                assert_eq!(cfg.min_unit(), 1);
                assert!(cfg.extra.is_empty());
            }
            other => panic!("expected network config, got {:?}", other),
        }
    }

    #[test]
    fn test_mistyped_and_unknown_keys_are_kept_verbatim() {
        let config = WidgetConfig::from_map(
            WidgetModule::ChargeSymbol,
            object(json!({"filled": "no", "glow": 3})),
        );
        match &config {
            WidgetConfig::ChargeSymbol(cfg) => {
                assert_eq!(cfg.filled, None);
                assert!(cfg.filled());
            }
            other => panic!("expected charge symbol config, got {:?}", other),
        }
        assert_eq!(
            Value::Object(config.to_map()),
            json!({"filled": "no", "glow": 3})
        );
    }

    #[test]
    fn test_network_keys_survive_with_loose_types() {
        let config = WidgetConfig::from_map(
            WidgetModule::Network,
            object(json!({"isUp": 1, "speedIcon": 1.0})),
        );
        match &config {
            WidgetConfig::Network(cfg) => {
                assert_eq!(cfg.speed_icon, Some(1));
                assert!(!cfg.is_up());
            }
            other => panic!("expected network config, got {:?}", other),
        }
        assert_eq!(
            Value::Object(config.to_map()),
            json!({"isUp": 1, "speedIcon": 1})
        );
    }

    #[test]
    fn test_typed_field_wins_over_extra_entry() {
        let mut config = NetworkConfig::default();
        config.extra.insert("isUp".to_string(), json!(1));
        config.is_up = Some(true);
        let map = WidgetConfig::Network(config).to_map();
        assert_eq!(map.get("isUp"), Some(&json!(true)));
    }

    #[test]
    fn test_empty_text_is_not_carried_over() {
        let config = WidgetConfig::from_map(WidgetModule::Text, object(json!({"text": ""})));
        assert!(config.to_map().is_empty());
    }

    #[test]
    fn test_to_map_omits_absent_and_empty_text() {
        let config = WidgetConfig::Weather(WeatherConfig {
            location: Some(String::new()),
            format: Some("{t}°".to_string()),
            extra: Map::new(),
        });
        assert_eq!(Value::Object(config.to_map()), json!({"format": "{t}°"}));
        assert!(WidgetConfig::default_for(WidgetModule::Date).to_map().is_empty());
    }

    #[test]
    fn test_set_config_keeps_module_and_identity() {
        let mut widget = WidgetInstance::with_module(WidgetModule::Text);
        let id = widget.id();
        let foreign = WidgetConfig::WebPage(WebPageConfig {
            url: Some("https://example.com".to_string()),
            show_url: None,
            extra: Map::new(),
        });

        widget.set_config(&foreign);

        assert_eq!(widget.id(), id);
        assert_eq!(widget.module(), WidgetModule::Text);
        assert_eq!(
            widget.config().to_map().get("url"),
            Some(&json!("https://example.com"))
        );
    }

    #[test]
    fn test_set_config_clears_empty_text() {
        let mut widget = WidgetInstance::with_module(WidgetModule::Text);
        widget.set_config(&WidgetConfig::Text(TextConfig {
            text: Some(String::new()),
            extra: Map::new(),
        }));
        match widget.config() {
            WidgetConfig::Text(cfg) => assert_eq!(cfg.text, None),
            other => panic!("expected text config, got {:?}", other),
        }
    }
}
