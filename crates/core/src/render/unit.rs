use crate::NumRange;
use anyhow::{anyhow, Context};
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

/// An RGBA color. Values are stored as floats between 0 and 1 (inclusive).
/// This uses f32 because the extra precision from f64 is pointless.
///
/// Colors print (and serialize) as CSS color strings, since that's what every
/// drawing surface we target consumes. See [Self::to_css].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    /// The valid range of values for each component
    const COMPONENT_RANGE: NumRange<f32> = NumRange::new(0.0, 1.0);

    pub const WHITE: Self = Self::new_int(255, 255, 255);
    pub const BLACK: Self = Self::new_int(0, 0, 0);

    /// Create a new opaque RGB color. Return an error if any of the components
    /// are out of the range [0.0, 1.0].
    pub fn new(red: f32, green: f32, blue: f32) -> anyhow::Result<Self> {
        fn check_component(
            component_name: &str,
            value: f32,
        ) -> anyhow::Result<f32> {
            Color::COMPONENT_RANGE
                .ensure_contains(value)
                .with_context(|| {
                    format!("invalid {} component", component_name)
                })?;
            Ok(value)
        }

        Ok(Self {
            red: check_component("red", red)?,
            green: check_component("green", green)?,
            blue: check_component("blue", blue)?,
            alpha: 1.0,
        })
    }

    /// Create a new opaque color from integer components in the [0,255] range.
    pub const fn new_int(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Create a color from a hue in degrees (any value, it wraps around),
    /// plus saturation and lightness in [0, 1]. Same semantics as CSS
    /// `hsl()`. Saturation and lightness are clamped into range.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let hue = hue.rem_euclid(360.0);
        let saturation = Self::COMPONENT_RANGE.clamp(saturation);
        let lightness = Self::COMPONENT_RANGE.clamp(lightness);

        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let sector = hue / 60.0;
        let secondary = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (red, green, blue) = match sector as u8 {
            0 => (chroma, secondary, 0.0),
            1 => (secondary, chroma, 0.0),
            2 => (0.0, chroma, secondary),
            3 => (0.0, secondary, chroma),
            4 => (secondary, 0.0, chroma),
            _ => (chroma, 0.0, secondary),
        };
        let lightness_shift = lightness - chroma / 2.0;

        // Rounding error can push components a hair outside [0, 1]
        let component =
            |value: f32| Self::COMPONENT_RANGE.clamp(value + lightness_shift);
        Self {
            red: component(red),
            green: component(green),
            blue: component(blue),
            alpha: 1.0,
        }
    }

    /// Get a copy of this color with a different alpha. The alpha is clamped
    /// to [0, 1].
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: Self::COMPONENT_RANGE.clamp(alpha),
            ..self
        }
    }

    /// Convert this color to a set of 3 bytes: `(red, green, blue)`. Alpha
    /// is dropped.
    pub fn to_ints(self) -> (u8, u8, u8) {
        (
            (self.red * 255.0).round() as u8,
            (self.green * 255.0).round() as u8,
            (self.blue * 255.0).round() as u8,
        )
    }

    /// Convert this color to a CSS color: `#rrggbb` for opaque colors,
    /// `rgba(r, g, b, a)` for anything translucent.
    pub fn to_css(self) -> String {
        let (r, g, b) = self.to_ints();
        if self.alpha >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("rgba({}, {}, {}, {})", r, g, b, self.alpha)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Parse a CSS hex color, `#rrggbb`. Shorthand (`#rgb`) and alpha aren't
/// supported.
impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.is_ascii())
            .ok_or_else(|| anyhow!("expected color as #rrggbb, got {:?}", s))?;
        let component = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .with_context(|| format!("invalid hex color {:?}", s))
        };
        Ok(Self::new_int(component(0)?, component(2)?, component(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
