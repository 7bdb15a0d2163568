//! Hex color values and the soft-failing normalizer used by the style policy.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("color value is empty")]
    Empty,

    #[error("color '{0}' must have 3 or 6 hex digits")]
    BadLength(String),

    #[error("color '{0}' contains non-hex characters")]
    NotHex(String),
}

/// An RGB color. Displays as `#RRGGBB`; the container wants `RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const BLACK: HexColor = HexColor::rgb(0x00, 0x00, 0x00);
    pub const BLUE: HexColor = HexColor::rgb(0x00, 0x00, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        HexColor([r, g, b])
    }

    /// Uppercase `RRGGBB` without the leading `#`.
    pub fn ooxml(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }

    /// Normalizes a string, falling back to black on any malformed input.
    pub fn normalize(input: &str) -> HexColor {
        input.parse().unwrap_or_else(|e: ColorError| {
            warn!("Invalid color {input:?}: {e}; using {}", HexColor::BLACK);
            HexColor::BLACK
        })
    }
}

impl Default for HexColor {
    fn default() -> Self {
        HexColor::BLACK
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        if digits.is_empty() {
            return Err(ColorError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::NotHex(s.to_string()));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ColorError::BadLength(s.to_string())),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| ColorError::NotHex(s.to_string()))
        };
        Ok(HexColor::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.ooxml())
    }
}
