//! helium-types: Shared data types for the Helium widget overlay.
//!
//! This crate contains the pure data model (widget modules, typed widget
//! configs, widget instances and widget sets) that the store, codec and
//! preview code build on. It performs no I/O.

pub mod color;
pub mod lenient;
pub mod module;
pub mod widget;
pub mod widget_configs;
pub mod widget_set;

// Re-export commonly used types at the crate root for convenience
pub use color::Color;
pub use module::{UnknownModule, WidgetModule};
pub use widget::{WidgetConfig, WidgetId, WidgetInstance};
pub use widget_configs::{
    BatteryConfig, ChargeSymbolConfig, CurrentCapacityConfig, DateConfig, NetworkConfig,
    TemperatureConfig, TextConfig, TimeConfig, WeatherConfig, WebPageConfig,
};
pub use widget_set::{
    Anchor, AnchorY, BlurDetails, ColorDetails, OrientationMode, TextAlignment, WidgetSet,
    WidgetSetDetails, WidgetSetId,
};
