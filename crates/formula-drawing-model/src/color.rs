use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ARGB color.
///
/// Serialized as a `#AARRGGBB` hex string for IPC friendliness.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub argb: u32,
}

impl Color {
    pub const WHITE: Color = Color::new_argb(0xFFFFFFFF);
    pub const BLACK: Color = Color::new_argb(0xFF000000);

    pub const fn new_argb(argb: u32) -> Self {
        Self { argb }
    }

    /// Opaque color from 8-bit RGB channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            argb: 0xFF000000 | (r as u32) << 16 | (g as u32) << 8 | b as u32,
        }
    }

    /// The 6 hex digit `RRGGBB` form used by DrawingML `a:srgbClr/@val`.
    pub fn to_rgb_hex(self) -> String {
        format!("{:06X}", self.argb & 0x00FF_FFFF)
    }

    /// Alpha channel scaled to DrawingML's 1/1000 percent units (`a:alpha/@val`).
    pub fn alpha_per_100k(self) -> u32 {
        ((self.argb >> 24) * 100_000) / 0xFF
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.argb)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let hex = s.trim().strip_prefix('#').ok_or_else(|| {
            D::Error::custom("color must be a #AARRGGBB hex string (missing '#')")
        })?;
        if hex.len() != 8 {
            return Err(D::Error::custom(
                "color must be a #AARRGGBB hex string (8 hex digits)",
            ));
        }
        let argb = u32::from_str_radix(hex, 16).map_err(|_| D::Error::custom("invalid hex"))?;
        Ok(Color { argb })
    }
}
