//! Static catalog of widget modules: display names and sample output.

use helium_types::WidgetModule;

/// How a widget module is presented in pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetDescription {
    pub name: &'static str,
    pub example: &'static str,
}

/// Describe a widget module.
///
/// Exhaustive over `WidgetModule`, so a new module cannot ship without an entry.
pub fn describe(module: WidgetModule) -> WidgetDescription {
    let (name, example) = match module {
        WidgetModule::Date => ("Date", "Mon Oct 16"),
        WidgetModule::Network => ("Network", "▲ 0 KB/s"),
        WidgetModule::Temperature => ("Device Temperature", "29.34ºC"),
        WidgetModule::Battery => ("Battery Details", "25 W"),
        WidgetModule::Time => ("Time", "14:57:05"),
        WidgetModule::Text => ("Text Label", "Example"),
        WidgetModule::CurrentCapacity => ("Battery Capacity", "50%"),
        WidgetModule::ChargeSymbol => ("Charging Symbol", "⚡️"),
        WidgetModule::Weather => ("Weather", "🌤 20℃"),
        WidgetModule::WebPage => ("Web Page", "https://example.com"),
    };
    WidgetDescription { name, example }
}

pub fn name(module: WidgetModule) -> &'static str {
    describe(module).name
}

pub fn example(module: WidgetModule) -> &'static str {
    describe(module).example
}
