//! embedded-graphics interop
//!
//! [`Frame`] implements
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) so
//! mono fonts, primitives and images from the embedded-graphics
//! ecosystem can rasterize straight into a frame before it is diffed and
//! streamed to the panel.
//!
//! `BinaryColor::On` is ink, which on this panel means black.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     text::Text,
//! };
//! use epd_term::Frame;
//!
//! let mut frame = Frame::new(128, 250);
//! let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
//! Text::new("status: ok", Point::new(2, 10), style)
//!     .draw(&mut frame)
//!     .unwrap();
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    Pixel,
};

use crate::color::Color;
use crate::framebuffer::Frame;

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
                continue;
            };
            self.set_pixel(x, y, Color::from(color));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        mono_font::{ascii::FONT_6X10, MonoTextStyle},
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
        text::Text,
    };

    #[test]
    fn test_size_matches_frame() {
        let frame = Frame::new(128, 250);
        assert_eq!(frame.size(), Size::new(128, 250));
    }

    #[test]
    fn test_on_pixels_become_black() {
        let mut frame = Frame::new(16, 16);
        Rectangle::new(Point::new(0, 0), Size::new(8, 1))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.pixel(0, 0), Some(Color::Black));
        assert_eq!(frame.pixel(7, 0), Some(Color::Black));
        assert_eq!(frame.pixel(8, 0), Some(Color::White));
    }

    #[test]
    fn test_negative_coordinates_are_clipped() {
        let mut frame = Frame::new(8, 8);
        Rectangle::new(Point::new(-4, -4), Size::new(6, 6))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.pixel(0, 0), Some(Color::Black));
        assert_eq!(frame.pixel(2, 2), Some(Color::White));
    }

    #[test]
    fn test_text_rasterizes_into_the_frame() {
        let mut frame = Frame::new(64, 16);
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::new("x", Point::new(0, 8), style).draw(&mut frame).unwrap();
        let any_black = (0..16).any(|y| (0..64).any(|x| frame.pixel(x, y) == Some(Color::Black)));
        assert!(any_black);
    }
}
