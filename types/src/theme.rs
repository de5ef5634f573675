//! Host theme colors.
//!
//! The composer only reads a handful of presentational fields. None of them
//! affect state or control flow.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("color {0:?} must start with '#'")]
    MissingHash(String),
    #[error("color {0:?} must have 3 or 6 hex digits")]
    BadLength(String),
    #[error("color {0:?} contains a non-hex digit")]
    BadDigit(String),
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn parse(raw: &str) -> Result<Self, ThemeError> {
        let trimmed = raw.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ThemeError::MissingHash(raw.to_string()))?;
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(|| ThemeError::BadDigit(raw.to_string()))?;
        match digits.as_slice() {
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::new(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
            _ => Err(ThemeError::BadLength(raw.to_string())),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Blend `color` at `opacity` over `background`.
///
/// Terminals have no alpha channel, so the translucency the web client gets
/// from `rgba()` is flattened against the surface the color is drawn on.
#[must_use]
pub fn change_opacity(color: Rgb, opacity: f32, background: Rgb) -> Rgb {
    let alpha = opacity.clamp(0.0, 1.0);
    let mix = |fg: u8, bg: u8| -> u8 {
        let value = f32::from(fg) * alpha + f32::from(bg) * (1.0 - alpha);
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(
        mix(color.r, background.r),
        mix(color.g, background.g),
        mix(color.b, background.b),
    )
}

/// The subset of the host theme the composer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostTheme {
    #[serde(alias = "centerChannelColor")]
    pub center_channel_color: String,
    #[serde(alias = "centerChannelBg")]
    pub center_channel_bg: String,
    #[serde(alias = "buttonColor")]
    pub button_color: String,
    #[serde(alias = "buttonBg")]
    pub button_bg: String,
}

impl Default for HostTheme {
    fn default() -> Self {
        Self {
            center_channel_color: "#3d3c40".to_string(),
            center_channel_bg: "#ffffff".to_string(),
            button_color: "#ffffff".to_string(),
            button_bg: "#166de0".to_string(),
        }
    }
}

impl HostTheme {
    pub fn center_channel_color(&self) -> Result<Rgb, ThemeError> {
        Rgb::parse(&self.center_channel_color)
    }

    pub fn center_channel_bg(&self) -> Result<Rgb, ThemeError> {
        Rgb::parse(&self.center_channel_bg)
    }

    pub fn button_color(&self) -> Result<Rgb, ThemeError> {
        Rgb::parse(&self.button_color)
    }

    pub fn button_bg(&self) -> Result<Rgb, ThemeError> {
        Rgb::parse(&self.button_bg)
    }
}

#[cfg(test)]
mod tests {
    use super::{HostTheme, Rgb, ThemeError, change_opacity};

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::parse("#166de0").unwrap(), Rgb::new(0x16, 0x6d, 0xe0));
        assert_eq!(Rgb::parse("#fff").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::new(0x3d, 0x3c, 0x40).to_string(), "#3d3c40");
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(matches!(Rgb::parse("166de0"), Err(ThemeError::MissingHash(_))));
        assert!(matches!(Rgb::parse("#12345"), Err(ThemeError::BadLength(_))));
        assert!(matches!(Rgb::parse("#zzzzzz"), Err(ThemeError::BadDigit(_))));
    }

    #[test]
    fn opacity_blends_toward_background() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(change_opacity(black, 1.0, white), black);
        assert_eq!(change_opacity(black, 0.0, white), white);
        assert_eq!(change_opacity(white, 0.5, black), Rgb::new(128, 128, 128));
        assert_eq!(change_opacity(white, 4.0, black), white);
    }

    #[test]
    fn theme_accepts_host_field_names() {
        let theme: HostTheme = serde_json::from_str(
            r##"{"centerChannelColor":"#000000","buttonBg":"#ff0000"}"##,
        )
        .unwrap();
        assert_eq!(theme.center_channel_color().unwrap(), Rgb::new(0, 0, 0));
        assert_eq!(theme.button_bg().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(theme.center_channel_bg, HostTheme::default().center_channel_bg);
    }
}
