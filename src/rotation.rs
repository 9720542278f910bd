//! Whole-frame orientation transforms
//!
//! The renderer composes text on a logical canvas and then maps it onto
//! the panel's native coordinate system. Rotation here is a whole-frame
//! operation producing a new [`Frame`], not a per-pixel address remap;
//! the packed buffer it yields streams straight to RAM.

use crate::framebuffer::Frame;

/// Logical canvas orientation relative to the panel
///
/// `Portrait` matches the panel's native axes. `Landscape` composes on a
/// width/height-swapped canvas which is rotated into place before
/// streaming.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Orientation {
    /// Native panel axes
    #[default]
    Portrait,
    /// Width and height swapped; rotated 90 degrees before streaming
    Landscape,
}

impl Frame {
    /// Rotate 90 degrees counterclockwise
    ///
    /// The source's top-left pixel lands at the output's bottom-left.
    /// Width and height swap.
    pub fn rotate90(&self) -> Self {
        let mut out = Self::new(self.height(), self.width());
        let src_width = self.width();
        for y in 0..out.height() {
            for x in 0..out.width() {
                if let Some(color) = self.pixel(src_width - 1 - y, x) {
                    out.set_pixel(x, y, color);
                }
            }
        }
        out
    }

    /// Mirror along the vertical axis (left/right swap)
    pub fn mirror_x(&self) -> Self {
        let mut out = Self::new(self.width(), self.height());
        let width = self.width();
        for y in 0..self.height() {
            for x in 0..width {
                if let Some(color) = self.pixel(width - 1 - x, y) {
                    out.set_pixel(x, y, color);
                }
            }
        }
        out
    }

    /// Mirror along the horizontal axis (top/bottom swap)
    pub fn mirror_y(&self) -> Self {
        let mut out = Self::new(self.width(), self.height());
        let height = self.height();
        for y in 0..height {
            for x in 0..self.width() {
                if let Some(color) = self.pixel(x, height - 1 - y) {
                    out.set_pixel(x, y, color);
                }
            }
        }
        out
    }
}
