//! Colors used to draw text fields
//!
//! Colors are written as `#RRGGBB` or `#RRGGBBAA` hex strings in YAML and
//! converted to [`Color`] on load.

use serde::{Deserialize, Serialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|e| e.to_string())
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#RRGGBB", or "#RRGGBBAA" when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Colors for every part of a text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTheme {
    /// Window background behind the fields
    pub background: Color,
    /// Outer border while the field has focus
    pub border_focused: Color,
    /// Outer border while the field does not have focus
    pub border_unfocused: Color,
    /// Interior fill; also the color of the clipped-text fades
    pub interior: Color,
    pub text: Color,
    pub label: Color,
    pub cursor: Color,
    /// Overlay drawn over inactive fields
    pub inactive_overlay: Color,
}

impl Default for FieldTheme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x20, 0x20, 0x20),
            border_focused: Color::rgb(0xFF, 0xFF, 0xFF),
            border_unfocused: Color::rgb(0x80, 0x80, 0x80),
            interior: Color::rgb(0x40, 0x40, 0x40),
            text: Color::rgb(0xFF, 0xFF, 0xFF),
            label: Color::rgb(0xFF, 0xFF, 0xFF),
            cursor: Color::rgba(0x00, 0x00, 0x00, 0x80),
            inactive_overlay: Color::rgba(0x00, 0x00, 0x00, 0x80),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex_rgb() {
        let color = Color::from_hex("#FF8000").unwrap();
        assert_eq!(color, Color::rgb(255, 128, 0));
    }

    #[test]
    fn test_color_from_hex_rgba() {
        let color = Color::from_hex("#00000080").unwrap();
        assert_eq!(color, Color::rgba(0, 0, 0, 128));
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_color_to_argb_u32() {
        let color = Color::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.to_argb_u32(), 0x78123456);
    }

    #[test]
    fn test_color_hex_roundtrip() {
        assert_eq!(Color::rgb(1, 2, 3).to_hex(), "#010203");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_theme_partial_yaml_uses_defaults() {
        let theme: FieldTheme = serde_yaml::from_str("text: \"#FF0000\"\n").unwrap();
        assert_eq!(theme.text, Color::rgb(255, 0, 0));
        assert_eq!(theme.interior, FieldTheme::default().interior);
    }
}
