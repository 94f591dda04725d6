use derive_more::{Deref, From, Into};
use palette::Srgb;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color '{0}', expected #rgb or #rrggbb")]
pub struct ParseColorError(String);

/// An opaque sRGB color written as a CSS style hex code (`#fff`, `#1e90ff`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deref, From, Into, SerializeDisplay, DeserializeFromStr,
)]
pub struct Color(Srgb<u8>);

impl Color {
    pub const WHITE: Color = Color(Srgb::new(0xff, 0xff, 0xff));
    pub const BLACK: Color = Color(Srgb::new(0, 0, 0));

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    /// Components scaled to `0.0..=1.0`, the form cairo expects.
    pub fn to_f64(self) -> (f64, f64, f64) {
        self.0.into_format::<f64>().into_components()
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Srgb::<u8>::from_str(trimmed)
            .map(Self)
            .map_err(|_| ParseColorError(trimmed.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
