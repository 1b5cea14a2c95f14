//! Shared constants for the application

/// Namespace under which every preference key is stored
pub const PREFERENCES_DOMAIN: &str = "com.leemin.helium";

/// Key holding the persisted list of widget sets
pub const KEY_WIDGET_PROPERTIES: &str = "widgetProperties";

pub const KEY_DATE_LOCALE: &str = "dateLocale";
pub const KEY_API_KEY: &str = "apiKey";
pub const KEY_HIDE_SAVE_CONFIRMATION: &str = "hideSaveConfirmation";
pub const KEY_DEBUG_BORDER: &str = "debugBorder";
pub const KEY_HIDE_WIDGETS_IN_SCREENSHOT: &str = "hideWidgetsInScreenshot";
