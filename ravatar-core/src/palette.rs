//! Palette - Fixed Gradient Sets
//!
//! The order of `GradientSet::ALL` decides which palette a seed maps to.
//! Never reorder it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color '{0}': expected #rrggbb")]
    InvalidHex(String),
}

/// Opaque sRGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as floats in 0..=255.
    pub fn channels(self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }

    /// Straight sRGB interpolation, `t` clamped to [0, 1].
    pub fn lerp(self, other: Color, t: f64) -> [f64; 3] {
        let t = t.clamp(0.0, 1.0);
        let from = self.channels();
        let to = other.channels();
        [
            from[0] + (to[0] - from[0]) * t,
            from[1] + (to[1] - from[1]) * t,
            from[2] + (to[2] - from[2]) * t,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Fill for nodes that are not colored.
pub const NODE_FILL: Color = Color::rgb(0xf0, 0xf0, 0xf0);
/// Canvas background gradient endpoints.
pub const CANVAS_LOW: Color = Color::rgb(0, 0, 0);
pub const CANVAS_HIGH: Color = Color::rgb(42, 42, 42);

/// The four colors of a gradient set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientColors {
    pub low: Color,
    pub high: Color,
    pub bg_low: Color,
    pub bg_high: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientSet {
    LightBlue,
    LightGreen,
    Gold,
    Red,
    Purple,
    Lime,
}

impl GradientSet {
    /// Canonical selection order.
    pub const ALL: [GradientSet; 6] = [
        GradientSet::LightBlue,
        GradientSet::LightGreen,
        GradientSet::Gold,
        GradientSet::Red,
        GradientSet::Purple,
        GradientSet::Lime,
    ];

    pub const fn colors(self) -> GradientColors {
        let [low, high, bg_low, bg_high] = match self {
            GradientSet::LightBlue => [
                Color::rgb(0x71, 0x6b, 0xda),
                Color::rgb(0x69, 0xe6, 0xff),
                Color::rgb(0x1a, 0x18, 0x32),
                Color::rgb(0x15, 0x27, 0x42),
            ],
            GradientSet::LightGreen => [
                Color::rgb(0x65, 0xbb, 0x61),
                Color::rgb(0xb8, 0xfa, 0xb6),
                Color::rgb(0x1d, 0x22, 0x1d),
                Color::rgb(0x09, 0x28, 0x08),
            ],
            GradientSet::Gold => [
                Color::rgb(0xbb, 0xae, 0x61),
                Color::rgb(0xfa, 0xf7, 0xb6),
                Color::rgb(0x25, 0x22, 0x13),
                Color::rgb(0x3c, 0x3a, 0x2a),
            ],
            GradientSet::Red => [
                Color::rgb(0x86, 0x25, 0x25),
                Color::rgb(0xe9, 0x4f, 0x4f),
                Color::rgb(0x33, 0x10, 0x10),
                Color::rgb(0x38, 0x2d, 0x2d),
            ],
            GradientSet::Purple => [
                Color::rgb(0x72, 0x53, 0xa1),
                Color::rgb(0x99, 0x89, 0xb8),
                Color::rgb(0x1f, 0x17, 0x2a),
                Color::rgb(0x33, 0x2d, 0x40),
            ],
            GradientSet::Lime => [
                Color::rgb(0xb6, 0xcd, 0x3c),
                Color::rgb(0xf0, 0xfa, 0xc6),
                Color::rgb(0x1e, 0x21, 0x0c),
                Color::rgb(0x37, 0x3c, 0x27),
            ],
        };
        GradientColors { low, high, bg_low, bg_high }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GradientSet::LightBlue => "light_blue",
            GradientSet::LightGreen => "light_green",
            GradientSet::Gold => "gold",
            GradientSet::Red => "red",
            GradientSet::Purple => "purple",
            GradientSet::Lime => "lime",
        }
    }
}
