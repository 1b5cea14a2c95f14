//! Widget module identifiers.

use std::fmt;
use std::str::FromStr;

/// Kind of widget that can be placed in a widget set.
///
/// Every variant carries a stable integer tag that is written to disk as the
/// `widgetID` discriminator. Tags must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetModule {
    Date,
    Time,
    Network,
    Battery,
    CurrentCapacity,
    ChargeSymbol,
    Temperature,
    Text,
    Weather,
    WebPage,
}

impl WidgetModule {
    /// All modules in catalog order
    pub const ALL: [WidgetModule; 10] = [
        WidgetModule::Date,
        WidgetModule::Time,
        WidgetModule::Network,
        WidgetModule::Battery,
        WidgetModule::CurrentCapacity,
        WidgetModule::ChargeSymbol,
        WidgetModule::Temperature,
        WidgetModule::Text,
        WidgetModule::Weather,
        WidgetModule::WebPage,
    ];

    /// Persisted discriminator
    pub fn tag(self) -> i64 {
        match self {
            WidgetModule::Date => 1,
            WidgetModule::Network => 2,
            WidgetModule::Temperature => 3,
            WidgetModule::Battery => 4,
            WidgetModule::Time => 5,
            WidgetModule::Text => 6,
            WidgetModule::CurrentCapacity => 7,
            WidgetModule::ChargeSymbol => 8,
            WidgetModule::Weather => 9,
            WidgetModule::WebPage => 10,
        }
    }

    /// Look up a module by its persisted tag
    pub fn from_tag(tag: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|module| module.tag() == tag)
    }

    /// Short identifier used on the command line and in logs
    pub fn id(self) -> &'static str {
        match self {
            WidgetModule::Date => "date",
            WidgetModule::Time => "time",
            WidgetModule::Network => "network",
            WidgetModule::Battery => "battery",
            WidgetModule::CurrentCapacity => "current_capacity",
            WidgetModule::ChargeSymbol => "charge_symbol",
            WidgetModule::Temperature => "temperature",
            WidgetModule::Text => "text",
            WidgetModule::Weather => "weather",
            WidgetModule::WebPage => "web_page",
        }
    }
}

impl fmt::Display for WidgetModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when parsing an unrecognised module identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModule(pub String);

impl fmt::Display for UnknownModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown widget module: {}", self.0)
    }
}

impl std::error::Error for UnknownModule {}

impl FromStr for WidgetModule {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|module| module.id() == normalized)
            .ok_or_else(|| UnknownModule(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tags_are_stable() {
        assert_eq!(WidgetModule::Date.tag(), 1);
        assert_eq!(WidgetModule::Network.tag(), 2);
        assert_eq!(WidgetModule::Temperature.tag(), 3);
        assert_eq!(WidgetModule::Battery.tag(), 4);
        assert_eq!(WidgetModule::Time.tag(), 5);
        assert_eq!(WidgetModule::Text.tag(), 6);
        assert_eq!(WidgetModule::CurrentCapacity.tag(), 7);
        assert_eq!(WidgetModule::ChargeSymbol.tag(), 8);
        assert_eq!(WidgetModule::Weather.tag(), 9);
        assert_eq!(WidgetModule::WebPage.tag(), 10);
    }

    #[test]
    fn test_tags_are_unique_and_resolvable() {
        let tags: HashSet<i64> = WidgetModule::ALL.iter().map(|m| m.tag()).collect();
        assert_eq!(tags.len(), WidgetModule::ALL.len());
        for module in WidgetModule::ALL {
            assert_eq!(WidgetModule::from_tag(module.tag()), Some(module));
        }
        assert_eq!(WidgetModule::from_tag(0), None);
        assert_eq!(WidgetModule::from_tag(999), None);
    }

    #[test]
    fn test_parse_module_id() {
        assert_eq!("network".parse::<WidgetModule>(), Ok(WidgetModule::Network));
        assert_eq!("Web-Page".parse::<WidgetModule>(), Ok(WidgetModule::WebPage));
        assert!("toaster".parse::<WidgetModule>().is_err());
    }
}
