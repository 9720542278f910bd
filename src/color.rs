//! Color type for 1-bit monochrome e-paper panels
//!
//! This module defines the [`Color`] enum for the two states a bistable
//! monochrome pixel can take.
//!
//! ## Color Representation
//!
//! Frames are bit-packed, 8 horizontal pixels per byte, MSB first.
//! A set bit is white, a cleared bit is black, matching the controller's
//! RAM encoding.
//!
//! ## Example
//!
//! ```
//! use epd_term::Color;
//!
//! // Byte fill values for solid regions
//! assert_eq!(Color::Black.byte(), 0x00);
//! assert_eq!(Color::White.byte(), 0xFF);
//!
//! assert_eq!(Color::Black.inverted(), Color::White);
//! ```

/// Pixel color on a monochrome e-paper panel
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Color {
    /// Black pixels (bit cleared)
    Black,
    /// White pixels (bit set)
    White,
}

impl Color {
    /// Byte value that fills 8 pixels of this color
    ///
    /// - Black: 0x00 (all bits 0)
    /// - White: 0xFF (all bits 1)
    pub fn byte(self) -> u8 {
        match self {
            Self::Black => 0x00,
            Self::White => 0xFF,
        }
    }

    /// The opposite color
    pub fn inverted(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Construct from a single bit (set = white)
    pub fn from_bit(set: bool) -> Self {
        if set { Self::White } else { Self::Black }
    }

    /// Whether the packed bit for this color is set
    pub fn is_set(self) -> bool {
        self == Self::White
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    /// `BinaryColor::On` is ink, i.e. black on paper
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::Black,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::White,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Self::On,
            Color::White => Self::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_bytes() {
        assert_eq!(Color::Black.byte(), 0x00);
        assert_eq!(Color::White.byte(), 0xFF);
    }

    #[test]
    fn test_inversion_round_trips() {
        assert_eq!(Color::Black.inverted().inverted(), Color::Black);
        assert_eq!(Color::White.inverted(), Color::Black);
    }

    #[test]
    fn test_bit_mapping() {
        assert_eq!(Color::from_bit(true), Color::White);
        assert_eq!(Color::from_bit(false), Color::Black);
        assert!(Color::White.is_set());
        assert!(!Color::Black.is_set());
    }
}
