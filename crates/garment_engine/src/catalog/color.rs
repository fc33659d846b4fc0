//! Linear RGB color values and the per-part color palette

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::PartCategory;
use crate::foundation::math::utils;

/// Error raised when a color string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string is not of the form `#RRGGBB`
    #[error("Invalid color format: {0}")]
    InvalidFormat(String),
}

/// RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Color {
    /// Pure white, used to show diffuse textures unmodified
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    /// Neutral grey used for materials that carry no authored color
    pub const DEFAULT_GREY: Color = Color { r: 0.8, g: 0.8, b: 0.8 };

    /// Create a color from RGB values (0-1 range)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Create a color from a hex integer such as `0x2c2c2c`
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` (or bare `RRGGBB`) string
    pub fn from_hex_str(value: &str) -> Result<Self, ColorParseError> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidFormat(value.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| ColorParseError::InvalidFormat(value.to_string()))
    }

    /// Hex integer representation, rounding each channel
    pub fn to_hex(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Hex string representation (`#rrggbb`)
    pub fn to_hex_string(&self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    /// Interpolate from `self` towards `other` by `t`
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        Color {
            r: utils::lerp(self.r, other.r, t),
            g: utils::lerp(self.g, other.g, t),
            b: utils::lerp(self.b, other.b, t),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex_str(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}

/// A named color a shopper can pick for a part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorOption {
    /// Display name
    pub name: &'static str,
    /// Hex value of the swatch
    pub hex: u32,
}

impl ColorOption {
    /// The swatch as a color value
    pub fn color(&self) -> Color {
        Color::from_hex(self.hex)
    }
}

const BODY_OPTIONS: &[ColorOption] = &[
    ColorOption { name: "Green", hex: 0x7A8471 },
    ColorOption { name: "Grey", hex: 0x8B8B8B },
    ColorOption { name: "Cream", hex: 0xE8DCC6 },
];

const LINING_OPTIONS: &[ColorOption] = &[
    ColorOption { name: "Green", hex: 0x7A8471 },
    ColorOption { name: "Grey", hex: 0x8B8B8B },
    ColorOption { name: "Black", hex: 0x1C1C1C },
    ColorOption { name: "Cream", hex: 0xE8DCC6 },
];

const HARDWARE_OPTIONS: &[ColorOption] = &[
    ColorOption { name: "Bronze", hex: 0xCD7F32 },
    ColorOption { name: "Dark Grey", hex: 0x4A4A4A },
    ColorOption { name: "Light Grey", hex: 0x8B8B8B },
];

/// Color swatches offered for a part category
pub fn palette(category: PartCategory) -> &'static [ColorOption] {
    match category {
        PartCategory::Body => BODY_OPTIONS,
        PartCategory::Lining => LINING_OPTIONS,
        PartCategory::Hardware => HARDWARE_OPTIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_hex_string() {
        let color = Color::from_hex_str("#7A8471").unwrap();
        assert_eq!(color.to_hex(), 0x7A8471);
        assert_eq!(color.to_hex_string(), "#7a8471");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::from_hex_str("#12345").is_err());
        assert!(Color::from_hex_str("#zzzzzz").is_err());
        assert!(Color::from_hex_str("#+12345").is_err());
        assert!(Color::from_hex_str("+abcde").is_err());
    }

    #[test]
    fn test_lerp_towards_tint() {
        let tint = Color::from_hex(0x000000);
        let blended = Color::WHITE.lerp(&tint, 0.99);
        assert_relative_eq!(blended.r, 0.01, epsilon = 1e-6);
        assert_relative_eq!(blended.g, 0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_palette_sizes() {
        assert_eq!(palette(PartCategory::Body).len(), 3);
        assert_eq!(palette(PartCategory::Lining).len(), 4);
        assert_eq!(palette(PartCategory::Hardware)[0].name, "Bronze");
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        #[derive(Deserialize)]
        struct Swatch {
            c: Color,
        }

        let swatch: Swatch = toml::from_str("c = \"#c4c4c4\"").unwrap();
        assert_eq!(swatch.c.to_hex(), 0xc4c4c4);
    }
}
