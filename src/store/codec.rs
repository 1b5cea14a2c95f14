//! Conversion between widget sets and their persisted form.
//!
//! The persisted form is a list of JSON objects, one per widget set. Reading
//! never fails: missing or mistyped fields take their default, unknown widget
//! modules are dropped, and anything that is not a list of objects reads as
//! no widget sets at all.

use helium_types::lenient::{bool_or, f64_or, i64_or, string_or};
use helium_types::widget_set::{DEFAULT_FONT_NAME, DEFAULT_TITLE};
use helium_types::{
    Anchor, AnchorY, BlurDetails, Color, ColorDetails, OrientationMode, TextAlignment,
    WidgetConfig, WidgetInstance, WidgetModule, WidgetSet, WidgetSetDetails,
};
use log::{debug, warn};
use serde_json::{json, Map, Value};

/// Discriminator key inside each persisted widget entry
pub const WIDGET_ID_KEY: &str = "widgetID";
const WIDGETS_KEY: &str = "widgetIDs";
const BLUR_KEY: &str = "blurDetails";
const COLOR_KEY: &str = "colorDetails";

/// Read persisted widget sets. `None` means nothing was ever saved.
pub fn decode(raw: Option<&Value>) -> Vec<WidgetSet> {
    let entries = match raw {
        None => return Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            warn!(
                "Stored widget sets are not a list ({}), ignoring them",
                value_kind(other)
            );
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(map) => Some(decode_set(map)),
            other => {
                warn!("Skipping widget set stored as {}", value_kind(other));
                None
            }
        })
        .collect()
}

/// Persisted form of the given sets. Empty input gives an empty list, which
/// the caller stores as "no key".
pub fn encode(sets: &[WidgetSet]) -> Vec<Value> {
    sets.iter().map(encode_set).collect()
}

fn decode_set(map: &Map<String, Value>) -> WidgetSet {
    let defaults = WidgetSetDetails::default();

    let details = WidgetSetDetails {
        is_enabled: bool_or(map, "isEnabled", defaults.is_enabled),
        orientation_mode: OrientationMode::from_tag(i64_or(
            map,
            "orientationMode",
            defaults.orientation_mode.tag(),
        )),
        title: string_or(map, "title", DEFAULT_TITLE),
        update_interval: f64_or(map, "updateInterval", defaults.update_interval),

        anchor: Anchor::from_tag(i64_or(map, "anchor", defaults.anchor.tag())),
        anchor_y: AnchorY::from_tag(i64_or(map, "anchorY", defaults.anchor_y.tag())),
        offset_px: f64_or(map, "offsetPX", defaults.offset_px),
        offset_py: f64_or(map, "offsetPY", defaults.offset_py),
        offset_lx: f64_or(map, "offsetLX", defaults.offset_lx),
        offset_ly: f64_or(map, "offsetLY", defaults.offset_ly),

        auto_resizes: bool_or(map, "autoResizes", defaults.auto_resizes),
        scale: f64_or(map, "scale", defaults.scale),
        scale_y: f64_or(map, "scaleY", defaults.scale_y),

        blur: decode_blur(map.get(BLUR_KEY)),

        dynamic_color: bool_or(map, "dynamicColor", defaults.dynamic_color),
        color: decode_color(map.get(COLOR_KEY)),

        font_name: string_or(map, "fontName", DEFAULT_FONT_NAME),
        text_bold: bool_or(map, "textBold", defaults.text_bold),
        text_italic: bool_or(map, "textItalic", defaults.text_italic),
        text_alignment: TextAlignment::from_tag(i64_or(
            map,
            "textAlignment",
            defaults.text_alignment.tag(),
        )),
        font_size: f64_or(map, "fontSize", defaults.font_size),
        text_alpha: f64_or(map, "textAlpha", defaults.text_alpha),
    };

    let widgets = match map.get(WIDGETS_KEY) {
        Some(Value::Array(entries)) => entries.iter().filter_map(decode_widget).collect(),
        _ => Vec::new(),
    };

    WidgetSet::with_widgets(details, widgets)
}

fn decode_widget(entry: &Value) -> Option<WidgetInstance> {
    let map = entry.as_object()?;
    let tag = i64_or(map, WIDGET_ID_KEY, 0);
    let Some(module) = WidgetModule::from_tag(tag) else {
        debug!("Dropping widget with unknown module tag {}", tag);
        return None;
    };

    let mut config = map.clone();
    config.remove(WIDGET_ID_KEY);
    Some(WidgetInstance::new(WidgetConfig::from_map(module, config)))
}

fn decode_blur(raw: Option<&Value>) -> BlurDetails {
    let defaults = BlurDetails::default();
    let Some(map) = raw.and_then(Value::as_object) else {
        return defaults;
    };

    BlurDetails {
        has_blur: bool_or(map, "hasBlur", defaults.has_blur),
        corner_radius: f64_or(map, "cornerRadius", defaults.corner_radius),
        style_dark: bool_or(map, "styleDark", defaults.style_dark),
        alpha: f64_or(map, "alpha", defaults.alpha),
    }
}

fn decode_color(raw: Option<&Value>) -> ColorDetails {
    let Some(map) = raw.and_then(Value::as_object) else {
        return ColorDetails::default();
    };

    let color = map
        .get("color")
        .and_then(decode_color_value)
        .unwrap_or(Color::WHITE);

    ColorDetails {
        uses_custom_color: bool_or(map, "usesCustomColor", false),
        color,
    }
}

/// Channel floats, or the older four byte array
fn decode_color_value(raw: &Value) -> Option<Color> {
    match raw {
        Value::Object(_) => serde_json::from_value(raw.clone()).ok(),
        Value::Array(bytes) => {
            let bytes = bytes
                .iter()
                .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>()?;
            Color::from_blob(&bytes)
        }
        _ => None,
    }
}

fn encode_set(set: &WidgetSet) -> Value {
    let d = &set.details;
    let widgets: Vec<Value> = set.widgets.iter().map(encode_widget).collect();

    json!({
        "isEnabled": d.is_enabled,
        "orientationMode": d.orientation_mode.tag(),
        "title": d.title,
        "updateInterval": d.update_interval,

        "anchor": d.anchor.tag(),
        "anchorY": d.anchor_y.tag(),
        "offsetPX": d.offset_px,
        "offsetPY": d.offset_py,
        "offsetLX": d.offset_lx,
        "offsetLY": d.offset_ly,

        "autoResizes": d.auto_resizes,
        "scale": d.scale,
        "scaleY": d.scale_y,

        WIDGETS_KEY: widgets,

        BLUR_KEY: {
            "hasBlur": d.blur.has_blur,
            "cornerRadius": d.blur.corner_radius.trunc() as i64,
            "styleDark": d.blur.style_dark,
            "alpha": d.blur.alpha,
        },

        "dynamicColor": d.dynamic_color,
        COLOR_KEY: {
            "usesCustomColor": d.color.uses_custom_color,
            "color": d.color.color,
        },

        "fontName": d.font_name,
        "textBold": d.text_bold,
        "textItalic": d.text_italic,
        "textAlignment": d.text_alignment.tag(),
        "fontSize": d.font_size,
        "textAlpha": d.text_alpha,
    })
}

fn encode_widget(widget: &WidgetInstance) -> Value {
    let mut map = widget.config().to_map();
    map.insert(WIDGET_ID_KEY.to_string(), Value::from(widget.module().tag()));
    Value::Object(map)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helium_types::{NetworkConfig, TextConfig};

    /// Everything except identities
    fn assert_same_sets(left: &[WidgetSet], right: &[WidgetSet]) {
        assert_eq!(left.len(), right.len());
        for (l, r) in left.iter().zip(right) {
            assert_eq!(l.details, r.details);
            let l_configs: Vec<&WidgetConfig> = l.widgets.iter().map(|w| w.config()).collect();
            let r_configs: Vec<&WidgetConfig> = r.widgets.iter().map(|w| w.config()).collect();
            assert_eq!(l_configs, r_configs);
        }
    }

    fn one_of_each_module() -> WidgetSet {
        let mut details = WidgetSetDetails::for_new_set("Everything", Anchor::Right);
        details.anchor_y = AnchorY::Bottom;
        details.orientation_mode = OrientationMode::LandscapeOnly;
        details.blur.has_blur = true;
        details.blur.corner_radius = 7.0;
        details.color = ColorDetails {
            uses_custom_color: true,
            color: Color::from_rgba8(255, 128, 0, 255),
        };
        details.text_alignment = TextAlignment::Right;
        details.font_size = 13.5;

        let widgets = WidgetModule::ALL
            .into_iter()
            .map(WidgetInstance::with_module)
            .collect();
        WidgetSet::with_widgets(details, widgets)
    }

    #[test]
    fn test_absent_input_decodes_to_nothing() {
        assert!(decode(None).is_empty());
        assert!(encode(&[]).is_empty());
    }

    #[test]
    fn test_wrong_top_level_shape_decodes_to_nothing() {
        assert!(decode(Some(&json!({"title": "Main"}))).is_empty());
        assert!(decode(Some(&json!("widgets"))).is_empty());

        let sets = decode(Some(&json!([1, {"title": "Kept"}, null])));
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].title(), "Kept");
    }

    #[test]
    fn test_empty_entry_decodes_to_all_defaults() {
        let sets = decode(Some(&json!([{}])));
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].details, WidgetSetDetails::default());
        assert!(sets[0].widgets.is_empty());
    }

    #[test]
    fn test_mistyped_fields_take_defaults() {
        let raw = json!([{
            "isEnabled": "yes",
            "title": 12,
            "scale": "big",
            "anchor": 1.0,
            "textAlignment": 9,
            "blurDetails": [],
            "colorDetails": {"usesCustomColor": true, "color": "garbage"},
        }]);
        let details = &decode(Some(&raw))[0].details;

        assert!(details.is_enabled);
        assert_eq!(details.title, "Untitled");
        assert_eq!(details.scale, 100.0);
        assert_eq!(details.anchor, Anchor::Center);
        assert_eq!(details.text_alignment, TextAlignment::Center);
        assert_eq!(details.blur, BlurDetails::default());
        assert!(details.color.uses_custom_color);
        assert_eq!(details.color.color, Color::WHITE);
    }

    #[test]
    fn test_unknown_module_tag_is_dropped() {
        let raw = json!([{
            "widgetIDs": [
                {"widgetID": 6, "text": "first"},
                {"widgetID": 999, "text": "future"},
                {"text": "no tag"},
                {"widgetID": 1},
            ]
        }]);
        let widgets = &decode(Some(&raw))[0].widgets;

        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0].module(), WidgetModule::Text);
        assert_eq!(widgets[1].module(), WidgetModule::Date);
        match widgets[0].config() {
            WidgetConfig::Text(cfg) => assert_eq!(cfg.text.as_deref(), Some("first")),
            other => panic!("expected text config, got {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_with_every_module() {
        let mut set = one_of_each_module();
        set.widgets[2].set_config(&WidgetConfig::Network(NetworkConfig {
            is_up: Some(true),
            speed_icon: Some(1),
            ..NetworkConfig::default()
        }));
        let original = vec![set, WidgetSet::new(WidgetSetDetails::default())];

        let encoded = Value::Array(encode(&original));
        let decoded = decode(Some(&encoded));

        assert_same_sets(&original, &decoded);
        assert_ne!(original[0].id(), decoded[0].id());
        assert_ne!(original[0].widgets[0].id(), decoded[0].widgets[0].id());
    }

    #[test]
    fn test_corner_radius_is_truncated() {
        let mut set = WidgetSet::new(WidgetSetDetails::default());
        set.details.blur.corner_radius = 6.9;

        let encoded = encode(std::slice::from_ref(&set));
        assert_eq!(encoded[0]["blurDetails"]["cornerRadius"], json!(6));

        let decoded = decode(Some(&Value::Array(encoded)));
        assert_eq!(decoded[0].details.blur.corner_radius, 6.0);
    }

    #[test]
    fn test_widget_entry_is_flat() {
        let mut widget = WidgetInstance::with_module(WidgetModule::Text);
        widget.set_config(&WidgetConfig::Text(TextConfig {
            text: Some("Hi".to_string()),
            ..TextConfig::default()
        }));
        let set = WidgetSet::with_widgets(WidgetSetDetails::default(), vec![widget]);

        let encoded = encode(&[set]);
        assert_eq!(encoded[0]["widgetIDs"], json!([{"widgetID": 6, "text": "Hi"}]));
        assert_eq!(
            encoded[0]["colorDetails"]["color"],
            json!({"r": 1.0, "g": 1.0, "b": 1.0, "a": 1.0})
        );
    }

    #[test]
    fn test_color_off_the_byte_grid_round_trips() {
        let mut set = WidgetSet::new(WidgetSetDetails::default());
        set.details.color = ColorDetails {
            uses_custom_color: true,
            color: Color::new(0.3, 0.3, 0.3, 1.0),
        };

        let decoded = decode(Some(&Value::Array(encode(std::slice::from_ref(&set)))));
        assert_eq!(decoded[0].details, set.details);
    }

    #[test]
    fn test_byte_array_color_is_still_read() {
        let raw = json!([{"colorDetails": {"usesCustomColor": true, "color": [255, 128, 0, 255]}}]);
        let details = &decode(Some(&raw))[0].details;
        assert_eq!(details.color.color, Color::from_rgba8(255, 128, 0, 255));

        let partial = json!([{"colorDetails": {"color": {"r": 0.5}}}]);
        assert_eq!(decode(Some(&partial))[0].details.color.color, Color::WHITE);
    }

    #[test]
    fn test_loosely_typed_widget_keys_survive_round_trip() {
        let raw = json!([{"widgetIDs": [{"widgetID": 2, "isUp": 1, "speedIcon": 1.0}]}]);
        let encoded = encode(&decode(Some(&raw)));
        assert_eq!(
            encoded[0]["widgetIDs"],
            json!([{"widgetID": 2, "isUp": 1, "speedIcon": 1}])
        );
    }

    #[test]
    fn test_unknown_widget_keys_survive_round_trip() {
        let raw = json!([{"widgetIDs": [{"widgetID": 8, "filled": false, "glow": "soft"}]}]);
        let encoded = encode(&decode(Some(&raw)));
        assert_eq!(
            encoded[0]["widgetIDs"],
            json!([{"widgetID": 8, "filled": false, "glow": "soft"}])
        );
    }
}
