//! Background colors and their textual specs.

use std::fmt;
use std::str::FromStr;

use crate::background::estimate_background_color;
use crate::error::{Error, Result};
use crate::raster::RasterImage;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure white `(255, 255, 255)`.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black `(0, 0, 0)`.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` literal (hex digits in either case).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything but `#` followed by
    /// exactly six hex digits.
    pub fn from_hex(spec: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(spec.to_string());
        let digits = spec.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Squared euclidean distance to an RGB triple.
    #[must_use]
    pub fn distance_sq(self, rgb: [u8; 3]) -> u32 {
        let d = |a: u8, b: u8| {
            let diff = i32::from(a) - i32::from(b);
            diff.unsigned_abs().pow(2)
        };
        d(self.r, rgb[0]) + d(self.g, rgb[1]) + d(self.b, rgb[2])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Which color the chroma key treats as background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundSpec {
    /// Estimate from the image corners.
    #[default]
    Auto,
    /// A caller-supplied color.
    Fixed(Color),
}

impl BackgroundSpec {
    /// The concrete background color for `image`.
    #[must_use]
    pub fn resolve(&self, image: &RasterImage) -> Color {
        match self {
            Self::Auto => estimate_background_color(image),
            Self::Fixed(color) => *color,
        }
    }
}

impl FromStr for BackgroundSpec {
    type Err = Error;

    /// Accepts `white`, `black`, `auto` or `#RRGGBB`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "white" => Ok(Self::Fixed(Color::WHITE)),
            "black" => Ok(Self::Fixed(Color::BLACK)),
            _ => Color::from_hex(trimmed).map(Self::Fixed),
        }
    }
}

impl fmt::Display for BackgroundSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(color) => color.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_both_cases() {
        assert_eq!(Color::from_hex("#00ff00").unwrap(), Color::new(0, 255, 0));
        assert_eq!(Color::from_hex("#C86432").unwrap(), Color::new(200, 100, 50));
    }

    #[test]
    fn from_hex_rejects_malformed_literals() {
        for bad in ["00ff00", "#00ff0", "#00ff000", "#gg0000", "#", "", "#+1ff00"] {
            assert!(
                matches!(Color::from_hex(bad), Err(Error::InvalidColor(ref s)) if s == bad),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips_through_from_hex() {
        let c = Color::new(1, 171, 255);
        assert_eq!(c.to_string(), "#01abff");
        assert_eq!(Color::from_hex(&c.to_string()).unwrap(), c);
    }

    #[test]
    fn distance_sq_is_channel_sum() {
        assert_eq!(Color::BLACK.distance_sq([3, 4, 0]), 25);
        assert_eq!(Color::WHITE.distance_sq([0, 0, 0]), 3 * 255 * 255);
        assert_eq!(Color::new(10, 10, 10).distance_sq([10, 10, 10]), 0);
    }

    #[test]
    fn background_spec_keywords() {
        assert_eq!("auto".parse::<BackgroundSpec>().unwrap(), BackgroundSpec::Auto);
        assert_eq!(
            " White ".parse::<BackgroundSpec>().unwrap(),
            BackgroundSpec::Fixed(Color::WHITE)
        );
        assert_eq!(
            "BLACK".parse::<BackgroundSpec>().unwrap(),
            BackgroundSpec::Fixed(Color::BLACK)
        );
        assert_eq!(
            "#00FF00".parse::<BackgroundSpec>().unwrap(),
            BackgroundSpec::Fixed(Color::new(0, 255, 0))
        );
        assert!(matches!(
            "green".parse::<BackgroundSpec>(),
            Err(Error::InvalidColor(_))
        ));
    }

    #[test]
    fn resolve_uses_fixed_color_or_corners() {
        let img = RasterImage::filled(3, 3, [0, 0, 255, 255]).unwrap();
        assert_eq!(
            BackgroundSpec::Fixed(Color::WHITE).resolve(&img),
            Color::WHITE
        );
        assert_eq!(BackgroundSpec::Auto.resolve(&img), Color::new(0, 0, 255));
    }
}
