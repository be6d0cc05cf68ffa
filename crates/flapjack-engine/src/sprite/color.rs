use core::fmt;

use image::Rgba;
use thiserror::Error;

/// RGB key identifying a sprite's region on the atlas mask.
///
/// Used only for lookup, never rendered.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MaskColor(pub [u8; 3]);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMaskColorError {
    #[error("expected 6 hex digits, got {0:?}")]
    Length(String),
    #[error("invalid hex digits in {0:?}")]
    Digits(String),
}

impl MaskColor {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parses `rrggbb`, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self, ParseMaskColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ParseMaskColorError::Length(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ParseMaskColorError::Digits(hex.to_string()))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Key of a mask pixel; alpha is ignored.
    #[inline]
    pub const fn from_pixel(pixel: &Rgba<u8>) -> Self {
        Self([pixel.0[0], pixel.0[1], pixel.0[2]])
    }

    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        self.0
    }
}

impl fmt::Display for MaskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(MaskColor::from_hex("70c5ce"), Ok(MaskColor::new(0x70, 0xc5, 0xce)));
        assert_eq!(MaskColor::from_hex("#FF290D"), Ok(MaskColor::new(0xff, 0x29, 0x0d)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(MaskColor::from_hex("fff"), Err(ParseMaskColorError::Length(_))));
        assert!(matches!(MaskColor::from_hex("zz0000"), Err(ParseMaskColorError::Digits(_))));
        assert!(matches!(MaskColor::from_hex("ééé"), Err(ParseMaskColorError::Length(_))));
    }

    #[test]
    fn pixel_alpha_is_ignored() {
        let a = MaskColor::from_pixel(&Rgba([1, 2, 3, 255]));
        let b = MaskColor::from_pixel(&Rgba([1, 2, 3, 7]));
        assert_eq!(a, b);
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(MaskColor::new(0xde, 0xd8, 0x95).to_string(), "#ded895");
    }
}
