//! Sample output for widgets, shown while configuring them.
//!
//! Live values (network speed, battery, weather) come from the rendering host;
//! the preview uses fixed sample values for those and only renders dates and
//! times for real.

use crate::config::AppSettings;
use chrono::{DateTime, FixedOffset, Local, Locale};
use helium_types::{WidgetConfig, WidgetInstance};
use log::warn;
use std::fmt::Write;

/// Preview of one widget
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Text(String),
    /// Name of a system symbol image
    Symbol(&'static str),
}

impl std::fmt::Display for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preview::Text(text) => f.write_str(text),
            Preview::Symbol(name) => write!(f, "[{}]", name),
        }
    }
}

/// Preview a widget at the current time and mark it as refreshed
pub fn preview(widget: &mut WidgetInstance, settings: &AppSettings) -> Preview {
    let now = DateTime::<FixedOffset>::from(Local::now());
    let rendered = render(widget.config(), settings, &now);
    widget.modified = false;
    rendered
}

/// Preview a widget config at a given instant
pub fn render(config: &WidgetConfig, settings: &AppSettings, now: &DateTime<FixedOffset>) -> Preview {
    let text = match config {
        WidgetConfig::Date(cfg) => format_date(now, cfg.date_format(), &settings.date_locale),
        WidgetConfig::Time(cfg) => format_date(now, cfg.date_format(), &settings.date_locale),
        WidgetConfig::Network(cfg) => format!("{} 30 KB/s", cfg.arrow()),
        WidgetConfig::Temperature(cfg) => {
            if cfg.use_fahrenheit() {
                "78.84ºF".to_string()
            } else {
                "26.02ºC".to_string()
            }
        }
        WidgetConfig::Battery(cfg) => {
            let sample = match cfg.battery_value_type() {
                0 => "0 W",
                1 | 2 => "0 mA",
                3 => "25",
                _ => "???",
            };
            sample.to_string()
        }
        WidgetConfig::Text(cfg) => cfg.text.as_deref().unwrap_or("Unknown").to_string(),
        WidgetConfig::Weather(_) => "Weather Preview".to_string(),
        WidgetConfig::CurrentCapacity(cfg) => {
            if cfg.show_percentage() {
                "50%".to_string()
            } else {
                "50".to_string()
            }
        }
        WidgetConfig::ChargeSymbol(cfg) => {
            return Preview::Symbol(if cfg.filled() { "bolt.fill" } else { "bolt" });
        }
        WidgetConfig::WebPage(cfg) => {
            if cfg.show_url() && !cfg.url().is_empty() {
                cfg.url().to_string()
            } else {
                "Web Page".to_string()
            }
        }
    };
    Preview::Text(text)
}

/// Format `now` with an ICU-style pattern in the given locale.
///
/// Empty output (or a pattern chrono refuses) renders as `ERROR`.
pub fn format_date(now: &DateTime<FixedOffset>, pattern: &str, locale: &str) -> String {
    let locale = parse_locale(locale);
    let strftime = icu_to_strftime(pattern);

    let mut out = String::new();
    if write!(out, "{}", now.format_localized(&strftime, locale)).is_err() {
        warn!("Could not format date with pattern '{}'", pattern);
        out.clear();
    }

    if out.is_empty() {
        "ERROR".to_string()
    } else {
        out
    }
}

fn parse_locale(name: &str) -> Locale {
    let normalized = name.replace('-', "_");
    Locale::try_from(normalized.as_str()).unwrap_or_else(|_| {
        warn!("Unknown locale '{}', using en_US", name);
        Locale::en_US
    })
}

/// Translate an ICU date pattern (`E MMM dd`, `hh:mm a`) to a strftime one.
///
/// Text inside single quotes is literal and `''` is a quote. Pattern letters
/// without a strftime counterpart are kept as literal text.
pub fn icu_to_strftime(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    i += 1;
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        match field(c, run) {
            Some(spec) => out.push_str(spec),
            None => (0..run).for_each(|_| push_literal(&mut out, c)),
        }
        i += run;
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn field(letter: char, run: usize) -> Option<&'static str> {
    let spec = match (letter, run) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', _) => "%d",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        ('a', _) => "%p",
        ('D', _) => "%j",
        _ => return None,
    };
    Some(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use helium_types::{
        BatteryConfig, ChargeSymbolConfig, NetworkConfig, TextConfig, TimeConfig, WebPageConfig,
        WidgetModule,
    };

    fn sample_time() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2023-10-16T14:57:05+00:00").unwrap()
    }

    fn text_of(config: &WidgetConfig) -> String {
        render(config, &AppSettings::default(), &sample_time()).to_string()
    }

    #[test]
    fn test_icu_translation() {
        assert_eq!(icu_to_strftime("E MMM dd"), "%a %b %d");
        assert_eq!(icu_to_strftime("hh:mm a"), "%I:%M %p");
        assert_eq!(icu_to_strftime("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(icu_to_strftime("EEEE, d MMMM yyyy"), "%A, %-d %B %Y");
        assert_eq!(icu_to_strftime("'at' HH 'o''clock'"), "at %H o'clock");
        assert_eq!(icu_to_strftime("100%"), "100%%");
    }

    #[test]
    fn test_default_date_and_time() {
        assert_eq!(text_of(&WidgetConfig::default_for(WidgetModule::Date)), "Mon Oct 16");
        assert_eq!(text_of(&WidgetConfig::default_for(WidgetModule::Time)), "02:57");

        let seconds = WidgetConfig::Time(TimeConfig {
            date_format: Some("HH:mm:ss".to_string()),
            ..TimeConfig::default()
        });
        assert_eq!(text_of(&seconds), "14:57:05");
    }

    #[test]
    fn test_date_uses_locale() {
        assert_eq!(format_date(&sample_time(), "EEEE", "de_DE"), "Montag");
        assert_eq!(format_date(&sample_time(), "EEEE", "xx_YY"), "Monday");
    }

    #[test]
    fn test_empty_output_is_error() {
        assert_eq!(format_date(&sample_time(), "", "en_US"), "ERROR");
    }

    #[test]
    fn test_sample_values() {
        let up = WidgetConfig::Network(NetworkConfig {
            is_up: Some(true),
            ..NetworkConfig::default()
        });
        assert_eq!(text_of(&up), "▲ 30 KB/s");
        assert_eq!(text_of(&WidgetConfig::default_for(WidgetModule::Network)), "▼ 30 KB/s");
        assert_eq!(text_of(&WidgetConfig::default_for(WidgetModule::Temperature)), "26.02ºC");
        assert_eq!(text_of(&WidgetConfig::default_for(WidgetModule::Battery)), "0 W");
        assert_eq!(text_of(&WidgetConfig::default_for(WidgetModule::Text)), "Unknown");
        assert_eq!(text_of(&WidgetConfig::default_for(WidgetModule::CurrentCapacity)), "50%");
        assert_eq!(text_of(&WidgetConfig::default_for(WidgetModule::WebPage)), "Web Page");

        let cycles = WidgetConfig::Battery(BatteryConfig {
            battery_value_type: Some(3),
            ..BatteryConfig::default()
        });
        assert_eq!(text_of(&cycles), "25");
        let unknown = WidgetConfig::Battery(BatteryConfig {
            battery_value_type: Some(8),
            ..BatteryConfig::default()
        });
        assert_eq!(text_of(&unknown), "???");
    }

    #[test]
    fn test_text_and_web_page() {
        let text = WidgetConfig::Text(TextConfig {
            text: Some("Hello".to_string()),
            ..TextConfig::default()
        });
        assert_eq!(text_of(&text), "Hello");

        let page = WidgetConfig::WebPage(WebPageConfig {
            url: Some("https://example.com".to_string()),
            show_url: Some(true),
            ..WebPageConfig::default()
        });
        assert_eq!(text_of(&page), "https://example.com");
    }

    #[test]
    fn test_charge_symbol_is_a_symbol() {
        let settings = AppSettings::default();
        let hollow = WidgetConfig::ChargeSymbol(ChargeSymbolConfig {
            filled: Some(false),
            ..ChargeSymbolConfig::default()
        });
        assert_eq!(render(&hollow, &settings, &sample_time()), Preview::Symbol("bolt"));
        assert_eq!(
            render(
                &WidgetConfig::default_for(WidgetModule::ChargeSymbol),
                &settings,
                &sample_time()
            ),
            Preview::Symbol("bolt.fill")
        );
    }

    #[test]
    fn test_preview_clears_modified() {
        let mut widget = WidgetInstance::with_module(WidgetModule::Weather);
        widget.modified = true;
        let shown = preview(&mut widget, &AppSettings::default());
        assert_eq!(shown, Preview::Text("Weather Preview".to_string()));
        assert!(!widget.modified);
    }
}
