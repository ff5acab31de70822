//! The globe's canonical color value.
//!
//! The strip in the globe is RGBW, so a color carries an optional white
//! channel. A color keeps the width it was written with: `ff00aa` reads back
//! as `ff00aa`, `ff00aa10` as `ff00aa10`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Rgb, add_colors, rgb_from_u32};
use crate::error::ValidationError;

const CHANNEL_NAMES: [char; 4] = ['r', 'g', 'b', 'w'];

/// RGB color with an optional white channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    rgb: Rgb,
    white: Option<u8>,
}

impl Default for Color {
    fn default() -> Self {
        Self::new(255, 255, 255)
    }
}

impl Color {
    /// Create a three-channel color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: Rgb { r, g, b },
            white: None,
        }
    }

    /// Add a white channel
    #[must_use]
    pub const fn with_white(mut self, white: u8) -> Self {
        self.white = Some(white);
        self
    }

    pub const fn rgb(self) -> Rgb {
        self.rgb
    }

    pub const fn white(self) -> Option<u8> {
        self.white
    }

    /// Color as painted on the RGB frame
    ///
    /// The white channel is mixed into red, green and blue, saturating.
    pub fn to_rgb(self) -> Rgb {
        match self.white {
            Some(w) => add_colors(self.rgb, Rgb { r: w, g: w, b: w }),
            None => self.rgb,
        }
    }

    fn parse_hex(input: &str) -> Result<Self, ValidationError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        let valid_len = digits.len() == 6 || digits.len() == 8;
        if !valid_len || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidColor(input.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ValidationError::InvalidColor(input.to_string()))?;

        if digits.len() == 6 {
            let rgb = rgb_from_u32(value);
            Ok(Self::new(rgb.r, rgb.g, rgb.b))
        } else {
            let rgb = rgb_from_u32(value >> 8);
            #[allow(clippy::cast_possible_truncation)]
            let white = (value & 0xFF) as u8;
            Ok(Self::new(rgb.r, rgb.g, rgb.b).with_white(white))
        }
    }

    fn parse_channels(input: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(ValidationError::InvalidColor(input.to_string()));
        }

        let mut channels = [0u8; 4];
        for ((slot, part), channel) in channels.iter_mut().zip(&parts).zip(CHANNEL_NAMES) {
            let value: i64 = part
                .parse()
                .map_err(|_| ValidationError::InvalidColor(input.to_string()))?;
            *slot = u8::try_from(value)
                .map_err(|_| ValidationError::ChannelOutOfRange { channel, value })?;
        }

        let [r, g, b, w] = channels;
        let color = Self::new(r, g, b);
        Ok(if parts.len() == 4 {
            color.with_white(w)
        } else {
            color
        })
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    /// Parse `rrggbb`, `rrggbbww` (optionally `#`-prefixed) or `r,g,b[,w]`
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.contains(',') {
            Self::parse_channels(input)
        } else {
            Self::parse_hex(input)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.rgb;
        write!(f, "{r:02x}{g:02x}{b:02x}")?;
        if let Some(w) = self.white {
            write!(f, "{w:02x}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
