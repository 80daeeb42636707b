//! sRGB colors parsed from and written as `#rrggbb` hex strings.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Color from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgba(...)` string with the given alpha, as accepted by a 2D
    /// canvas `fillStyle`.
    #[must_use]
    pub fn css_rgba(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

/// Error returned when a string is not a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a #rrggbb color, got {:?}", self.0)
    }
}

impl std::error::Error for ColorParseError {}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| err())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lower_and_upper_hex() {
        assert_eq!("#00f3ff".parse(), Ok(Color::new(0x00, 0xf3, 0xff)));
        assert_eq!("#BC13FE".parse(), Ok(Color::new(0xbc, 0x13, 0xfe)));
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!("00f3ff".parse::<Color>().is_err());
        assert!("#00f3f".parse::<Color>().is_err());
        assert!("#00f3fg".parse::<Color>().is_err());
        assert!("#ééé".parse::<Color>().is_err());
    }

    #[test]
    fn rejects_signed_channels() {
        assert!("#+f+f+f".parse::<Color>().is_err());
        assert!("#-1ff00".parse::<Color>().is_err());
    }

    #[test]
    fn displays_as_lowercase_hex() {
        assert_eq!(Color::new(255, 0, 67).to_string(), "#ff0043");
    }

    #[test]
    fn css_rgba_matches_canvas_syntax() {
        assert_eq!(Color::new(5, 5, 5).css_rgba(0.1), "rgba(5, 5, 5, 0.1)");
    }
}
