//! Widget sets: named, positioned groups of widgets rendered together.

use crate::color::Color;
use crate::widget::{WidgetId, WidgetInstance};
use std::fmt;
use uuid::Uuid;

/// In-memory identity of a widget set. Never persisted; on disk a set is
/// identified by its position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetSetId(Uuid);

impl WidgetSetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WidgetSetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Horizontal anchor of a widget set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Left,
    Center,
    Right,
}

impl Anchor {
    pub fn tag(self) -> i64 {
        match self {
            Anchor::Left => 0,
            Anchor::Center => 1,
            Anchor::Right => 2,
        }
    }

    /// Unknown tags fall back to the default anchor
    pub fn from_tag(tag: i64) -> Self {
        match tag {
            1 => Anchor::Center,
            2 => Anchor::Right,
            _ => Anchor::Left,
        }
    }
}

/// Vertical anchor of a widget set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorY {
    #[default]
    Top,
    Center,
    Bottom,
}

impl AnchorY {
    pub fn tag(self) -> i64 {
        match self {
            AnchorY::Top => 0,
            AnchorY::Center => 1,
            AnchorY::Bottom => 2,
        }
    }

    pub fn from_tag(tag: i64) -> Self {
        match tag {
            1 => AnchorY::Center,
            2 => AnchorY::Bottom,
            _ => AnchorY::Top,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlignment {
    pub fn tag(self) -> i64 {
        match self {
            TextAlignment::Left => 0,
            TextAlignment::Center => 1,
            TextAlignment::Right => 2,
        }
    }

    pub fn from_tag(tag: i64) -> Self {
        match tag {
            0 => TextAlignment::Left,
            2 => TextAlignment::Right,
            _ => TextAlignment::Center,
        }
    }
}

/// Which device orientations show the widget set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationMode {
    #[default]
    Both,
    PortraitOnly,
    LandscapeOnly,
}

impl OrientationMode {
    pub fn tag(self) -> i64 {
        match self {
            OrientationMode::Both => 0,
            OrientationMode::PortraitOnly => 1,
            OrientationMode::LandscapeOnly => 2,
        }
    }

    pub fn from_tag(tag: i64) -> Self {
        match tag {
            1 => OrientationMode::PortraitOnly,
            2 => OrientationMode::LandscapeOnly,
            _ => OrientationMode::Both,
        }
    }
}

/// Background blur behind a widget set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurDetails {
    pub has_blur: bool,
    /// Persisted truncated to an integer
    pub corner_radius: f64,
    pub style_dark: bool,
    pub alpha: f64,
}

impl Default for BlurDetails {
    fn default() -> Self {
        Self {
            has_blur: false,
            corner_radius: 4.0,
            style_dark: true,
            alpha: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorDetails {
    pub uses_custom_color: bool,
    pub color: Color,
}

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_FONT_NAME: &str = "System Font";

/// Every attribute of a widget set except its identity and its widgets.
///
/// `Default` yields the values used for keys missing from persisted data.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSetDetails {
    pub is_enabled: bool,
    pub orientation_mode: OrientationMode,
    pub title: String,
    /// Seconds between refreshes
    pub update_interval: f64,

    pub anchor: Anchor,
    pub anchor_y: AnchorY,
    pub offset_px: f64,
    pub offset_py: f64,
    pub offset_lx: f64,
    pub offset_ly: f64,

    pub auto_resizes: bool,
    pub scale: f64,
    pub scale_y: f64,

    pub blur: BlurDetails,

    pub dynamic_color: bool,
    pub color: ColorDetails,

    pub font_name: String,
    pub text_bold: bool,
    pub text_italic: bool,
    pub text_alignment: TextAlignment,
    pub font_size: f64,
    pub text_alpha: f64,
}

impl Default for WidgetSetDetails {
    fn default() -> Self {
        Self {
            is_enabled: true,
            orientation_mode: OrientationMode::Both,
            title: DEFAULT_TITLE.to_string(),
            update_interval: 1.0,
            anchor: Anchor::Left,
            anchor_y: AnchorY::Top,
            offset_px: 0.0,
            offset_py: 0.0,
            offset_lx: 0.0,
            offset_ly: 0.0,
            auto_resizes: false,
            scale: 100.0,
            scale_y: 12.0,
            blur: BlurDetails::default(),
            dynamic_color: true,
            color: ColorDetails::default(),
            font_name: DEFAULT_FONT_NAME.to_string(),
            text_bold: false,
            text_italic: false,
            text_alignment: TextAlignment::Center,
            font_size: 10.0,
            text_alpha: 1.0,
        }
    }
}

impl WidgetSetDetails {
    /// Attributes for a freshly created set.
    ///
    /// Centered sets start flush with the anchor, others are inset by 10.
    pub fn for_new_set(title: impl Into<String>, anchor: Anchor) -> Self {
        let inset = if anchor == Anchor::Center { 0.0 } else { 10.0 };
        Self {
            title: title.into(),
            anchor,
            offset_px: inset,
            offset_lx: inset,
            auto_resizes: true,
            ..Self::default()
        }
    }
}

/// A named, positioned collection of widgets
#[derive(Debug, Clone)]
pub struct WidgetSet {
    id: WidgetSetId,
    pub details: WidgetSetDetails,
    /// Render and list order
    pub widgets: Vec<WidgetInstance>,
}

impl WidgetSet {
    pub fn new(details: WidgetSetDetails) -> Self {
        Self::with_widgets(details, Vec::new())
    }

    pub fn with_widgets(details: WidgetSetDetails, widgets: Vec<WidgetInstance>) -> Self {
        Self {
            id: WidgetSetId::new(),
            details,
            widgets,
        }
    }

    pub fn id(&self) -> WidgetSetId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    /// Position of a widget within this set
    pub fn position_of(&self, widget: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id() == widget)
    }

    pub fn widget(&self, widget: WidgetId) -> Option<&WidgetInstance> {
        self.widgets.iter().find(|w| w.id() == widget)
    }
}
