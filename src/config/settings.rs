//! Application preferences stored next to the widget sets.

use anyhow::{bail, Context, Result};
use helium_core::{
    PersistenceError, PersistenceGateway, ReloadNotifier, KEY_API_KEY, KEY_DATE_LOCALE,
    KEY_DEBUG_BORDER, KEY_HIDE_SAVE_CONFIRMATION, KEY_HIDE_WIDGETS_IN_SCREENSHOT,
    PREFERENCES_DOMAIN,
};
use log::{info, warn};
use serde_json::Value;

pub const DEFAULT_DATE_LOCALE: &str = "en_US";

/// Scalar preferences shared with the rendering host
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Locale used to render date and time widgets
    pub date_locale: String,
    /// Weather service API key
    pub api_key: String,
    pub hide_save_confirmation: bool,
    pub debug_border: bool,
    pub hide_widgets_in_screenshot: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            date_locale: DEFAULT_DATE_LOCALE.to_string(),
            api_key: String::new(),
            hide_save_confirmation: false,
            debug_border: false,
            hide_widgets_in_screenshot: false,
        }
    }
}

impl AppSettings {
    /// Setting names accepted by [`AppSettings::set_value`]
    pub const KEYS: [&'static str; 5] = [
        KEY_DATE_LOCALE,
        KEY_API_KEY,
        KEY_HIDE_SAVE_CONFIRMATION,
        KEY_DEBUG_BORDER,
        KEY_HIDE_WIDGETS_IN_SCREENSHOT,
    ];

    /// Read every preference, defaulting missing or mistyped values
    pub fn load(gateway: &dyn PersistenceGateway) -> Result<Self, PersistenceError> {
        let defaults = Self::default();
        let string = |key: &str, default: String| -> Result<String, PersistenceError> {
            Ok(match gateway.get(PREFERENCES_DOMAIN, key)? {
                Some(Value::String(s)) => s,
                _ => default,
            })
        };
        let flag = |key: &str, default: bool| -> Result<bool, PersistenceError> {
            Ok(gateway
                .get(PREFERENCES_DOMAIN, key)?
                .and_then(|v| v.as_bool())
                .unwrap_or(default))
        };

        Ok(Self {
            date_locale: string(KEY_DATE_LOCALE, defaults.date_locale)?,
            api_key: string(KEY_API_KEY, defaults.api_key)?,
            hide_save_confirmation: flag(
                KEY_HIDE_SAVE_CONFIRMATION,
                defaults.hide_save_confirmation,
            )?,
            debug_border: flag(KEY_DEBUG_BORDER, defaults.debug_border)?,
            hide_widgets_in_screenshot: flag(
                KEY_HIDE_WIDGETS_IN_SCREENSHOT,
                defaults.hide_widgets_in_screenshot,
            )?,
        })
    }

    /// Persist every preference and ask the overlay to reload
    pub fn save(
        &self,
        gateway: &dyn PersistenceGateway,
        notifier: &dyn ReloadNotifier,
    ) -> Result<(), PersistenceError> {
        let entries = [
            (KEY_DATE_LOCALE, Value::from(self.date_locale.as_str())),
            (KEY_API_KEY, Value::from(self.api_key.as_str())),
            (KEY_HIDE_SAVE_CONFIRMATION, Value::from(self.hide_save_confirmation)),
            (KEY_DEBUG_BORDER, Value::from(self.debug_border)),
            (
                KEY_HIDE_WIDGETS_IN_SCREENSHOT,
                Value::from(self.hide_widgets_in_screenshot),
            ),
        ];
        for (key, value) in entries {
            gateway.set(PREFERENCES_DOMAIN, key, value)?;
        }
        info!("Saved application settings");
        notifier.notify();
        Ok(())
    }

    /// Set one preference from its textual form
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_flag = |value: &str| -> Result<bool> {
            value
                .parse::<bool>()
                .with_context(|| format!("'{}' expects true or false", key))
        };

        match key {
            KEY_DATE_LOCALE => self.date_locale = value.to_string(),
            KEY_API_KEY => self.api_key = value.to_string(),
            KEY_HIDE_SAVE_CONFIRMATION => self.hide_save_confirmation = parse_flag(value)?,
            KEY_DEBUG_BORDER => self.debug_border = parse_flag(value)?,
            KEY_HIDE_WIDGETS_IN_SCREENSHOT => {
                self.hide_widgets_in_screenshot = parse_flag(value)?
            }
            _ => bail!(
                "unknown setting '{}' (expected one of: {})",
                key,
                Self::KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

/// Delete all user data: widget sets and preferences
pub fn reset_all(gateway: &dyn PersistenceGateway) -> Result<(), PersistenceError> {
    gateway.delete_all(PREFERENCES_DOMAIN).map_err(|e| {
        warn!("Failed to reset stored data: {}", e);
        e
    })?;
    info!("All stored data deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use helium_core::{ChannelNotifier, InMemoryGateway, KEY_WIDGET_PROPERTIES};
    use serde_json::json;

    #[test]
    fn test_defaults_when_nothing_stored() {
        let gateway = InMemoryGateway::new();
        let settings = AppSettings::load(&gateway).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.date_locale, "en_US");
        assert_eq!(settings.api_key, "");
    }

    #[test]
    fn test_mistyped_values_fall_back() {
        let gateway = InMemoryGateway::new();
        gateway.set(PREFERENCES_DOMAIN, KEY_DEBUG_BORDER, json!("yes")).unwrap();
        gateway.set(PREFERENCES_DOMAIN, KEY_DATE_LOCALE, json!(42)).unwrap();
        let settings = AppSettings::load(&gateway).unwrap();
        assert!(!settings.debug_border);
        assert_eq!(settings.date_locale, "en_US");
    }

    #[test]
    fn test_save_then_load_and_notify() {
        let gateway = InMemoryGateway::new();
        let (notifier, reloads) = ChannelNotifier::new();
        let mut settings = AppSettings::default();
        settings.set_value(KEY_DATE_LOCALE, "de_DE").unwrap();
        settings.set_value(KEY_DEBUG_BORDER, "true").unwrap();

        settings.save(&gateway, &notifier).unwrap();

        assert_eq!(reloads.try_iter().count(), 1);
        assert_eq!(AppSettings::load(&gateway).unwrap(), settings);
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut settings = AppSettings::default();
        assert!(settings.set_value("volume", "11").is_err());
        assert!(settings.set_value(KEY_DEBUG_BORDER, "maybe").is_err());
        assert!(!settings.debug_border);
    }

    #[test]
    fn test_reset_removes_everything() {
        let gateway = InMemoryGateway::new();
        gateway.set(PREFERENCES_DOMAIN, KEY_API_KEY, json!("k")).unwrap();
        gateway.set(PREFERENCES_DOMAIN, KEY_WIDGET_PROPERTIES, json!([{}])).unwrap();

        reset_all(&gateway).unwrap();

        assert!(!gateway.contains(PREFERENCES_DOMAIN, KEY_API_KEY));
        assert!(!gateway.contains(PREFERENCES_DOMAIN, KEY_WIDGET_PROPERTIES));
    }
}
