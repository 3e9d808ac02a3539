//! RGB text color (`w:color/@w:val`)

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A 24-bit RGB color, written as six hex digits (`RRGGBB`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex form used in WordprocessingML, e.g. `"1F4E79"`
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Parse `RRGGBB` (case-insensitive, optional leading `#`)
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidArgument(format!(
                "invalid color '{}': expected six hex digits (RRGGBB)",
                s
            )));
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Rgb::new(r, g, b)),
            _ => Err(Error::InvalidArgument(format!("invalid color '{}'", s))),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}
