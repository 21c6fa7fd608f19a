use palette::{FromColor, Hsl, Srgb};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexError {
    #[error("Hex color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("Hex color must have exactly 6 hex digits: {0:?}")]
    Malformed(String),
}

/// A 24-bit color whose canonical text form is `#RRGGBB`.
#[derive(Debug, Clone, Copy)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// `hsl(hue, saturation%, lightness%)` with saturation and lightness given in percent.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let hsl: Hsl = Hsl::new(
            hue as f32,
            (saturation / 100.0) as f32,
            (lightness / 100.0) as f32,
        );
        let rgb: Srgb = Srgb::from_color(hsl);
        Self(rgb.into_format())
    }

    /// Accepts only `#` followed by exactly six hex digits, either case.
    pub fn parse(text: &str) -> Result<Self, HexError> {
        let digits = text
            .strip_prefix('#')
            .ok_or_else(|| HexError::MissingHash(text.to_string()))?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HexError::Malformed(text.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| HexError::Malformed(text.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn components(&self) -> (u8, u8, u8) {
        (self.0.red, self.0.green, self.0.blue)
    }

    /// Channels scaled to 0.0–1.0, for drawing backends.
    pub fn to_rgb_f64(&self) -> Srgb<f64> {
        self.0.into_format::<f64>()
    }
}

impl PartialEq for HexColor {
    fn eq(&self, other: &Self) -> bool {
        self.components() == other.components()
    }
}

impl Eq for HexColor {}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.components();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl FromStr for HexColor {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_six_digits_any_case() {
        assert_eq!(HexColor::parse("#AABBCC"), Ok(HexColor::new(0xAA, 0xBB, 0xCC)));
        assert_eq!(HexColor::parse("#aabbcc"), Ok(HexColor::new(0xAA, 0xBB, 0xCC)));
    }

    #[test]
    fn test_parse_rejects_partial_and_malformed() {
        for text in ["#ABC", "AABBCC", "#AABBC", "#AABBCCD", "#GGGGGG", "", "#"] {
            assert!(HexColor::parse(text).is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn test_display_is_uppercase_with_hash() {
        assert_eq!(HexColor::new(0x0a, 0xff, 0x10).to_string(), "#0AFF10");
    }

    #[test]
    fn test_from_hsl_primary_shades() {
        assert_eq!(HexColor::from_hsl(0.0, 100.0, 90.0).to_string(), "#FFCCCC");
        assert_eq!(HexColor::from_hsl(0.0, 100.0, 50.0).to_string(), "#FF0000");
        assert_eq!(HexColor::from_hsl(180.0, 100.0, 50.0).to_string(), "#00FFFF");
    }
}
