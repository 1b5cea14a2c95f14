//! Text color used by widget sets.
//!
//! Colors live in memory as floating point RGBA and are persisted as their
//! channel floats. The four byte blob is the older persisted form.

use serde::{Deserialize, Serialize};

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        )
    }

    /// Encode as the legacy blob (`[r, g, b, a]` bytes).
    pub fn to_blob(&self) -> [u8; 4] {
        let (r, g, b, a) = self.to_rgba8();
        [r, g, b, a]
    }

    /// Decode a legacy blob. Returns `None` unless it is exactly four bytes.
    pub fn from_blob(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [r, g, b, a] => Some(Self::from_rgba8(*r, *g, *b, *a)),
            _ => None,
        }
    }
}

fn channel_to_u8(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_preserves_rgba8_channels() {
        let color = Color::from_rgba8(200, 17, 0, 255);
        let decoded = Color::from_blob(&color.to_blob()).unwrap();
        assert_eq!(decoded.to_rgba8(), (200, 17, 0, 255));
    }

    #[test]
    fn test_from_blob_rejects_wrong_length() {
        assert!(Color::from_blob(&[1, 2, 3]).is_none());
        assert!(Color::from_blob(&[1, 2, 3, 4, 5]).is_none());
    }

    #[test]
    fn test_out_of_range_channels_are_clamped() {
        let color = Color::new(1.5, -0.2, 0.5, 1.0);
        assert_eq!(color.to_rgba8(), (255, 0, 128, 255));
    }
}
