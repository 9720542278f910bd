//! Frame differencing
//!
//! Finds the smallest changed rectangle between two frames so the update
//! loop only streams and refreshes what actually changed. X bounds are
//! widened to byte boundaries because the controller addresses RAM in
//! 8-pixel units; Y bounds stay pixel-exact.

use crate::framebuffer::Frame;

/// Inclusive pixel rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Leftmost column, inclusive
    pub x_start: u16,
    /// Topmost row, inclusive
    pub y_start: u16,
    /// Rightmost column, inclusive
    pub x_end: u16,
    /// Bottom row, inclusive
    pub y_end: u16,
}

impl Rect {
    /// Create a rectangle from inclusive bounds
    pub fn new(x_start: u16, y_start: u16, x_end: u16, y_end: u16) -> Self {
        Self {
            x_start,
            y_start,
            x_end,
            y_end,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.x_end - self.x_start + 1
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.y_end - self.y_start + 1
    }

    /// Widen the X bounds to byte boundaries
    ///
    /// `x_start` rounds down to a multiple of 8 and `x_end + 1` rounds up
    /// to one, so the result always contains `self` and its X extent maps
    /// onto whole RAM bytes.
    pub fn banded(&self) -> Self {
        Self {
            x_start: self.x_start & !7,
            y_start: self.y_start,
            x_end: self.x_end | 7,
            y_end: self.y_end,
        }
    }
}

/// Bounding box of the pixels that differ between two frames
///
/// Returns `None` when the frames are identical (the caller skips the
/// bus entirely) and the full frame when dimensions disagree. The result
/// is already byte-banded.
pub fn diff(prev: &Frame, cur: &Frame) -> Option<Rect> {
    if prev.width() != cur.width() || prev.height() != cur.height() {
        return Some(
            Rect::new(0, 0, cur.width().saturating_sub(1), cur.height().saturating_sub(1))
                .banded(),
        );
    }

    let stride = cur.bytes_per_row();
    let mut bounds: Option<Rect> = None;

    for y in 0..cur.height() {
        let offset = y as usize * stride;
        let prev_row = &prev.data()[offset..offset + stride];
        let cur_row = &cur.data()[offset..offset + stride];
        if prev_row == cur_row {
            continue;
        }
        for (byte, (p, c)) in prev_row.iter().zip(cur_row).enumerate() {
            let changed = p ^ c;
            if changed == 0 {
                continue;
            }
            let first = byte as u16 * 8 + changed.leading_zeros() as u16;
            let last = byte as u16 * 8 + 7 - changed.trailing_zeros() as u16;
            bounds = Some(match bounds {
                None => Rect::new(first, y, last, y),
                Some(rect) => Rect::new(
                    rect.x_start.min(first),
                    rect.y_start,
                    rect.x_end.max(last),
                    y,
                ),
            });
        }
    }

    bounds.map(|rect| rect.banded())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_identical_frames_yield_none() {
        let frame = Frame::new(128, 250);
        assert_eq!(diff(&frame, &frame.clone()), None);
    }

    #[test]
    fn test_single_pixel_change_bands_to_byte() {
        let prev = Frame::new(128, 250);
        let mut cur = prev.clone();
        cur.set_pixel(13, 40, Color::Black);
        let rect = diff(&prev, &cur).unwrap();
        assert_eq!(rect, Rect::new(8, 40, 15, 40));
    }

    #[test]
    fn test_region_is_symmetric_in_arguments() {
        let a = Frame::new(64, 64);
        let mut b = a.clone();
        b.set_pixel(20, 10, Color::Black);
        b.set_pixel(41, 50, Color::Black);
        assert_eq!(diff(&a, &b), diff(&b, &a));
    }

    #[test]
    fn test_bounds_are_tight_in_y() {
        let prev = Frame::new(64, 64);
        let mut cur = prev.clone();
        cur.set_pixel(0, 7, Color::Black);
        cur.set_pixel(63, 23, Color::Black);
        let rect = diff(&prev, &cur).unwrap();
        assert_eq!(rect.y_start, 7);
        assert_eq!(rect.y_end, 23);
        assert_eq!(rect.x_start, 0);
        assert_eq!(rect.x_end, 63);
    }

    #[test]
    fn test_banded_contains_unbanded_box() {
        let prev = Frame::new(64, 8);
        let mut cur = prev.clone();
        cur.set_pixel(19, 2, Color::Black);
        cur.set_pixel(42, 5, Color::Black);
        let rect = diff(&prev, &cur).unwrap();
        assert_eq!(rect.x_start % 8, 0);
        assert_eq!((rect.x_end + 1) % 8, 0);
        assert!(rect.x_start <= 19 && rect.x_end >= 42);
    }

    #[test]
    fn test_banded_rounding() {
        assert_eq!(Rect::new(13, 3, 17, 9).banded(), Rect::new(8, 3, 23, 9));
        assert_eq!(Rect::new(8, 0, 15, 0).banded(), Rect::new(8, 0, 15, 0));
    }

    #[test]
    fn test_dimension_mismatch_yields_full_frame() {
        let prev = Frame::new(64, 64);
        let cur = Frame::new(128, 250);
        let rect = diff(&prev, &cur).unwrap();
        assert_eq!(rect, Rect::new(0, 0, 127, 249));
    }
}
