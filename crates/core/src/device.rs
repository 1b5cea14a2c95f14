//! Device capability classification.

use std::env;
use std::fmt;

/// Environment variable holding the model identifier when running in a simulator
pub const MODEL_ENV_VAR: &str = "SIMULATOR_MODEL_IDENTIFIER";

/// Shape of the display cutout at the top of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotchSize {
    #[default]
    None,
    Small,
    Large,
    DynamicIsland,
}

impl NotchSize {
    pub fn tag(self) -> i64 {
        match self {
            NotchSize::None => 0,
            NotchSize::Small => 1,
            NotchSize::Large => 2,
            NotchSize::DynamicIsland => 3,
        }
    }

    /// Classify a hardware model identifier such as `iPhone14,2`
    pub fn classify(model: &str) -> Self {
        const LARGE_EXACT: [&str; 2] = ["iPhone10,3", "iPhone10,6"];
        const LARGE_FAMILIES: [&str; 3] = ["iPhone11", "iPhone12", "iPhone13"];
        const ISLAND_FAMILIES: [&str; 2] = ["iPhone15", "iPhone16"];

        if model.starts_with("iPhone14") {
            NotchSize::Small
        } else if LARGE_EXACT.contains(&model)
            || LARGE_FAMILIES.iter().any(|p| model.starts_with(p))
        {
            NotchSize::Large
        } else if ISLAND_FAMILIES.iter().any(|p| model.starts_with(p)) {
            NotchSize::DynamicIsland
        } else {
            NotchSize::None
        }
    }

    /// Classify the current device. Without a model identifier the result is `None`.
    pub fn detect() -> Self {
        match env::var(MODEL_ENV_VAR) {
            Ok(model) => {
                let size = Self::classify(&model);
                log::debug!("Model {} classified as {:?}", model, size);
                size
            }
            Err(_) => NotchSize::None,
        }
    }
}

impl fmt::Display for NotchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotchSize::None => "none",
            NotchSize::Small => "small",
            NotchSize::Large => "large",
            NotchSize::DynamicIsland => "dynamic island",
        };
        f.write_str(label)
    }
}

/// Quick placement choices offered when creating a widget set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementPreset {
    AboveStatusBar,
    BelowStatusBar,
}

impl PlacementPreset {
    pub const ALL: [PlacementPreset; 2] =
        [PlacementPreset::AboveStatusBar, PlacementPreset::BelowStatusBar];

    pub fn label(self) -> &'static str {
        match self {
            PlacementPreset::AboveStatusBar => "Above Status Bar",
            PlacementPreset::BelowStatusBar => "Below Status Bar",
        }
    }
}
