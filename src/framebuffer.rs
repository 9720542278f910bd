//! In-memory 1-bit frame buffer
//!
//! [`Frame`] holds a packed monochrome bitmap in the controller's RAM
//! layout: row-major, 8 pixels per byte, most significant bit first. A
//! set bit is white, a cleared bit is black, matching what opcode 0x24
//! expects on the wire.

use alloc::vec;
use alloc::vec::Vec;

use crate::color::Color;
use crate::diff::Rect;

/// Packed monochrome bitmap
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl Frame {
    /// Create a frame filled white
    pub fn new(width: u16, height: u16) -> Self {
        let bytes_per_row = (width as usize).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0xFF; bytes_per_row * height as usize],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Row stride in bytes
    pub fn bytes_per_row(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// The packed pixel data, ready for a RAM write
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Set a single pixel; out-of-bounds coordinates are ignored
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y as usize * self.bytes_per_row() + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        if color.is_set() {
            self.data[index] |= mask;
        } else {
            self.data[index] &= !mask;
        }
    }

    /// Read a single pixel, or `None` when out of bounds
    pub fn pixel(&self, x: u16, y: u16) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.bytes_per_row() + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        Some(Color::from_bit(self.data[index] & mask != 0))
    }

    /// Fill the whole frame with one color
    pub fn fill(&mut self, color: Color) {
        self.data.fill(color.byte());
    }

    /// Invert every pixel in a rectangle, clamped to the frame
    pub fn invert_rect(&mut self, x: u16, y: u16, w: u16, h: u16) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                let index = row as usize * self.bytes_per_row() + col as usize / 8;
                self.data[index] ^= 0x80 >> (col % 8);
            }
        }
    }

    /// Draw a horizontal line, clamped to the frame
    pub fn hline(&mut self, x: u16, y: u16, w: u16, color: Color) {
        if y >= self.height {
            return;
        }
        let x_end = x.saturating_add(w).min(self.width);
        for col in x..x_end {
            self.set_pixel(col, y, color);
        }
    }

    /// Extract the packed bytes of a rectangle
    ///
    /// When `rect` is byte-banded (X bounds on byte boundaries, the form
    /// [`Rect::banded`] produces) rows are copied as byte slices;
    /// otherwise pixels are re-packed bit by bit. The rectangle must lie
    /// within the frame.
    pub fn crop(&self, rect: &Rect) -> Vec<u8> {
        let stride = self.bytes_per_row();
        if rect.x_start % 8 == 0 && (rect.x_end + 1) % 8 == 0 {
            let first = rect.x_start as usize / 8;
            let last = (rect.x_end as usize + 1) / 8;
            let mut out = Vec::with_capacity((last - first) * rect.height() as usize);
            for row in rect.y_start..=rect.y_end {
                let offset = row as usize * stride;
                out.extend_from_slice(&self.data[offset + first..offset + last]);
            }
            return out;
        }

        let row_bytes = (rect.width() as usize).div_ceil(8);
        let mut out = vec![0x00u8; row_bytes * rect.height() as usize];
        for (dst_row, row) in (rect.y_start..=rect.y_end).enumerate() {
            for (dst_col, col) in (rect.x_start..=rect.x_end).enumerate() {
                let index = row as usize * stride + col as usize / 8;
                if self.data[index] & (0x80 >> (col % 8)) != 0 {
                    out[dst_row * row_bytes + dst_col / 8] |= 0x80 >> (dst_col % 8);
                }
            }
        }
        out
    }

    /// Force the frame to panel-native dimensions
    ///
    /// Identity when the frame already matches. A frame whose dimensions
    /// are the 90-degree swap of the panel's is rotated into place.
    /// Anything else is replaced by a blank white frame with a warning;
    /// a bad collaborator frame must never abort the update loop.
    pub fn conform(self, width: u16, height: u16) -> Self {
        if self.width == width && self.height == height {
            return self;
        }
        if self.width == height && self.height == width {
            return self.rotate90();
        }
        log::warn!(
            "frame is {}x{}, panel needs {}x{}; substituting blank frame",
            self.width,
            self.height,
            width,
            height
        );
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame_is_white() {
        let frame = Frame::new(16, 4);
        assert_eq!(frame.data(), &[0xFF; 8]);
        assert_eq!(frame.pixel(0, 0), Some(Color::White));
    }

    #[test]
    fn test_set_pixel_is_msb_first() {
        let mut frame = Frame::new(16, 2);
        frame.set_pixel(0, 0, Color::Black);
        frame.set_pixel(9, 1, Color::Black);
        assert_eq!(frame.data(), &[0x7F, 0xFF, 0xFF, 0xBF]);
        assert_eq!(frame.pixel(0, 0), Some(Color::Black));
        assert_eq!(frame.pixel(9, 1), Some(Color::Black));
        assert_eq!(frame.pixel(1, 0), Some(Color::White));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut frame = Frame::new(8, 8);
        frame.set_pixel(8, 0, Color::Black);
        frame.set_pixel(0, 8, Color::Black);
        assert_eq!(frame.data(), &[0xFF; 8]);
        assert_eq!(frame.pixel(8, 0), None);
    }

    #[test]
    fn test_unaligned_width_rounds_stride_up() {
        let frame = Frame::new(13, 2);
        assert_eq!(frame.bytes_per_row(), 2);
        assert_eq!(frame.data().len(), 4);
    }

    #[test]
    fn test_fill() {
        let mut frame = Frame::new(8, 2);
        frame.fill(Color::Black);
        assert_eq!(frame.data(), &[0x00, 0x00]);
    }

    #[test]
    fn test_invert_rect() {
        let mut frame = Frame::new(16, 2);
        frame.invert_rect(4, 0, 8, 1);
        assert_eq!(frame.data(), &[0xF0, 0x0F, 0xFF, 0xFF]);
        frame.invert_rect(4, 0, 8, 1);
        assert_eq!(frame.data(), &[0xFF; 4]);
    }

    #[test]
    fn test_hline() {
        let mut frame = Frame::new(16, 2);
        frame.hline(2, 1, 12, Color::Black);
        assert_eq!(frame.data(), &[0xFF, 0xFF, 0xC0, 0x03]);
    }

    #[test]
    fn test_hline_clamps_to_frame() {
        let mut frame = Frame::new(8, 1);
        frame.hline(4, 0, 100, Color::Black);
        assert_eq!(frame.data(), &[0xF0]);
    }

    #[test]
    fn test_extreme_extents_clamp_without_wrapping() {
        let mut frame = Frame::new(8, 4);
        frame.hline(4, 0, u16::MAX, Color::Black);
        assert_eq!(frame.data()[0], 0xF0);

        frame.invert_rect(4, 1, u16::MAX, u16::MAX);
        assert_eq!(frame.data()[1], 0xF0);
        assert_eq!(frame.data()[3], 0xF0);
    }

    #[test]
    fn test_crop_byte_aligned() {
        let mut frame = Frame::new(24, 4);
        frame.set_pixel(8, 1, Color::Black);
        frame.set_pixel(15, 2, Color::Black);
        let rect = Rect::new(8, 1, 15, 2);
        assert_eq!(frame.crop(&rect), alloc::vec![0x7F, 0xFE]);
    }

    #[test]
    fn test_crop_unaligned_repacks() {
        let mut frame = Frame::new(16, 2);
        frame.set_pixel(3, 0, Color::Black);
        frame.set_pixel(5, 0, Color::Black);
        let rect = Rect::new(3, 0, 6, 0);
        // region pixels: B W B W -> 0b0101 in the high nibble, MSB-first
        assert_eq!(frame.crop(&rect), alloc::vec![0b0101_0000]);
    }

    #[test]
    fn test_conform_identity() {
        let mut frame = Frame::new(128, 250);
        frame.set_pixel(10, 10, Color::Black);
        let conformed = frame.clone().conform(128, 250);
        assert_eq!(conformed, frame);
    }

    #[test]
    fn test_conform_rotates_swapped_dimensions() {
        let mut frame = Frame::new(250, 128);
        frame.set_pixel(0, 0, Color::Black);
        let conformed = frame.conform(128, 250);
        assert_eq!(conformed.width(), 128);
        assert_eq!(conformed.height(), 250);
        // counterclockwise: source (0, 0) lands at the bottom-left
        assert_eq!(conformed.pixel(0, 249), Some(Color::Black));
    }

    #[test]
    fn test_conform_wrong_dimensions_blanks() {
        let mut frame = Frame::new(64, 64);
        frame.fill(Color::Black);
        let conformed = frame.conform(128, 250);
        assert_eq!(conformed.width(), 128);
        assert_eq!(conformed.height(), 250);
        assert!(conformed.data().iter().all(|byte| *byte == 0xFF));
    }
}
