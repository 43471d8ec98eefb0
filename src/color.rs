//! RGBA color values.
//!
//! Colors serialize as hex strings (`#rrggbb` or `#rrggbbaa`) so style
//! profiles stay readable. The RGB part is parsed with `palette`.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use palette::Srgb;
use serde::{Deserialize, Serialize};

/// An 8-bit per channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Semi-transparent white, the fill used by most glyph shapes.
    pub const fn white(a: u8) -> Self {
        Self::rgba(255, 255, 255, a)
    }

    /// Returns the same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates the RGB channels towards `other`.
    ///
    /// Each channel is computed as `self + (other - self) * t` and truncated
    /// toward zero. The alpha channel is taken from `self`.
    pub fn lerp_rgb(self, other: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.clamp(0.0, 255.0) as u8
        };
        Self::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            self.a,
        )
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        c.to_rgba()
    }
}

/// Error returned when a color string is not `#rrggbb` / `#rrggbbaa`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #rrggbb or #rrggbbaa")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(err());
        }

        let (rgb, alpha) = match hex.len() {
            6 => (hex, None),
            8 => (&hex[..6], Some(&hex[6..])),
            _ => return Err(err()),
        };

        let rgb: Srgb<u8> = Srgb::from_str(rgb).map_err(|_| err())?;
        let a = match alpha {
            Some(a) => u8::from_str_radix(a, 16).map_err(|_| err())?,
            None => 255,
        };

        Ok(Self::rgba(rgb.red, rgb.green, rgb.blue, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rgb_hex() {
        let c: Color = "#764ba2".parse().unwrap();
        assert_eq!(c, Color::rgb(118, 75, 162));

        let c: Color = "667eea".parse().unwrap();
        assert_eq!(c, Color::rgb(102, 126, 234));
    }

    #[test]
    fn parse_rgba_hex() {
        let c: Color = "#ffffff19".parse().unwrap();
        assert_eq!(c, Color::white(25));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("#fff".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
        assert!("#ffffffzz".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn display_omits_opaque_alpha() {
        assert_eq!(Color::rgb(102, 126, 234).to_string(), "#667eea");
        assert_eq!(Color::white(240).to_string(), "#fffffff0");
    }

    #[test]
    fn lerp_truncates_toward_zero() {
        let start = Color::rgb(118, 75, 162);
        let end = Color::rgb(102, 126, 234);

        assert_eq!(start.lerp_rgb(end, 0.0), start);
        // 118 - 16 * 0.5 = 110, 75 + 51 * 0.5 = 100.5, 162 + 72 * 0.5 = 198
        assert_eq!(start.lerp_rgb(end, 0.5), Color::rgb(110, 100, 198));
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::white(130)).unwrap();
        assert_eq!(json, "\"#ffffff82\"");

        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::white(130));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
