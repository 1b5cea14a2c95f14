//! helium-core: Collaborator seams and static tables for the Helium overlay.
//!
//! This crate contains the traits the widget store talks to (persistence,
//! reload notification, overlay host), the widget catalog, the device
//! capability classification, and shared constants.

pub mod catalog;
pub mod constants;
pub mod device;
mod notifier;
mod overlay;
mod persistence;

pub use catalog::{describe, WidgetDescription};
pub use constants::{
    KEY_API_KEY, KEY_DATE_LOCALE, KEY_DEBUG_BORDER, KEY_HIDE_SAVE_CONFIRMATION,
    KEY_HIDE_WIDGETS_IN_SCREENSHOT, KEY_WIDGET_PROPERTIES, PREFERENCES_DOMAIN,
};
pub use device::{NotchSize, PlacementPreset};
pub use notifier::{BoxedNotifier, ChannelNotifier, LogNotifier, ReloadNotifier};
pub use overlay::{BoxedOverlayHost, OverlayFlag, OverlayHost};
pub use persistence::{BoxedGateway, InMemoryGateway, PersistenceError, PersistenceGateway};

// Re-export types used in trait signatures for convenience
pub use helium_types::WidgetModule;
