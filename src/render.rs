//! Text rasterization
//!
//! Turns terminal text plus a cursor into a panel-native [`Frame`]. Font
//! rasterization itself lives behind the [`TextFont`] trait so the crate
//! never depends on a particular font format; the collaborator draws
//! glyphs into the frame at positions this module computes.

use crate::config::Dimensions;
use crate::framebuffer::Frame;
use crate::rotation::Orientation;

/// Monospaced font collaborator
///
/// Implementations draw black-on-white glyphs into a frame. The metrics
/// are fixed for the whole font: `line_height` already folds in ascent,
/// descent and line spacing.
pub trait TextFont {
    /// Advance width of every glyph, in pixels
    fn glyph_width(&self) -> u16;

    /// Vertical distance between line tops, in pixels
    fn line_height(&self) -> u16;

    /// Draw one glyph with its top-left corner at `(x, y)`
    fn draw_glyph(&self, ch: char, x: u16, y: u16, frame: &mut Frame);
}

/// Cursor appearance
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CursorStyle {
    /// A one-pixel underline, raised `offset` pixels above the cell floor
    Underline {
        /// Pixels between the line and the bottom of the cell
        offset: u16,
    },
    /// The whole character cell, inverted
    Block,
}

impl Default for CursorStyle {
    fn default() -> Self {
        Self::Underline { offset: 0 }
    }
}

/// Cursor position in character cells
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    /// Character column, zero-based
    pub column: u16,
    /// Text row, zero-based
    pub row: u16,
    /// How to draw it
    pub style: CursorStyle,
}

/// Immutable rendering parameters
///
/// Orientation and flips are applied to the composed canvas in that
/// order; the output is always panel-native.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderConfig {
    /// Canvas orientation
    pub orientation: Orientation,
    /// Mirror left/right after rotation
    pub flip_x: bool,
    /// Mirror top/bottom after rotation
    pub flip_y: bool,
}

/// Rasterize text and cursor into a panel-native frame
///
/// The canvas is `cols x rows` in portrait and `rows x cols` in
/// landscape. Lines are split on `\n` and placed at multiples of the
/// font's line height; glyphs at multiples of its advance width. Content
/// past the canvas edge is clipped by the frame itself. A landscape
/// canvas is rotated into panel axes before the configured flips run,
/// so the returned frame always measures `cols x rows`.
pub fn render<F: TextFont>(
    dims: Dimensions,
    font: &F,
    text: &str,
    cursor: Option<Cursor>,
    config: &RenderConfig,
) -> Frame {
    let (width, height) = match config.orientation {
        Orientation::Portrait => (dims.cols, dims.rows),
        Orientation::Landscape => (dims.rows, dims.cols),
    };
    let mut frame = Frame::new(width, height);

    let glyph_width = font.glyph_width();
    let line_height = font.line_height();

    for (row, line) in text.split('\n').enumerate() {
        let y = row as u32 * u32::from(line_height);
        if y >= u32::from(height) {
            break;
        }
        for (col, ch) in line.chars().enumerate() {
            let x = col as u32 * u32::from(glyph_width);
            if x >= u32::from(width) {
                break;
            }
            font.draw_glyph(ch, x as u16, y as u16, &mut frame);
        }
    }

    if let Some(cursor) = cursor {
        draw_cursor(&mut frame, cursor, glyph_width, line_height);
    }

    let frame = match config.orientation {
        Orientation::Portrait => frame,
        Orientation::Landscape => frame.rotate90(),
    };
    let frame = if config.flip_x { frame.mirror_x() } else { frame };
    if config.flip_y { frame.mirror_y() } else { frame }
}

fn draw_cursor(frame: &mut Frame, cursor: Cursor, glyph_width: u16, line_height: u16) {
    // Cell coordinates are caller-supplied; saturate so an off-screen
    // cursor clamps into the frame's clipping instead of wrapping.
    let x = cursor.column.saturating_mul(glyph_width);
    match cursor.style {
        CursorStyle::Underline { offset } => {
            let baseline = (u32::from(cursor.row) + 1) * u32::from(line_height);
            let Some(y) = baseline.checked_sub(1 + u32::from(offset)) else {
                return;
            };
            let Ok(y) = u16::try_from(y) else {
                return;
            };
            // one pixel narrower than the cell so adjacent cursors
            // stay visually separate
            frame.hline(x, y, glyph_width.saturating_sub(1), crate::color::Color::Black);
        }
        CursorStyle::Block => {
            frame.invert_rect(
                x,
                cursor.row.saturating_mul(line_height),
                glyph_width,
                line_height,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    /// Fills the whole cell black for anything that is not a space
    struct CellFont {
        width: u16,
        height: u16,
    }

    impl TextFont for CellFont {
        fn glyph_width(&self) -> u16 {
            self.width
        }

        fn line_height(&self) -> u16 {
            self.height
        }

        fn draw_glyph(&self, ch: char, x: u16, y: u16, frame: &mut Frame) {
            if ch == ' ' {
                return;
            }
            for dy in 0..self.height {
                for dx in 0..self.width {
                    frame.set_pixel(x + dx, y + dy, Color::Black);
                }
            }
        }
    }

    fn font() -> CellFont {
        CellFont {
            width: 8,
            height: 10,
        }
    }

    fn dims() -> Dimensions {
        Dimensions::new(250, 128).unwrap()
    }

    #[test]
    fn test_output_is_panel_native_for_every_configuration() {
        let configs = [
            (Orientation::Portrait, false, false),
            (Orientation::Portrait, true, false),
            (Orientation::Portrait, false, true),
            (Orientation::Portrait, true, true),
            (Orientation::Landscape, false, false),
            (Orientation::Landscape, true, false),
            (Orientation::Landscape, false, true),
            (Orientation::Landscape, true, true),
        ];
        for (orientation, flip_x, flip_y) in configs {
            let config = RenderConfig {
                orientation,
                flip_x,
                flip_y,
            };
            let frame = render(dims(), &font(), "hi\nthere", None, &config);
            assert_eq!(frame.width(), 128);
            assert_eq!(frame.height(), 250);
        }
    }

    #[test]
    fn test_glyphs_land_on_cell_grid() {
        let config = RenderConfig::default();
        let frame = render(dims(), &font(), " x", None, &config);
        // first cell is a space, second is filled
        assert_eq!(frame.pixel(0, 0), Some(Color::White));
        assert_eq!(frame.pixel(8, 0), Some(Color::Black));
        assert_eq!(frame.pixel(15, 9), Some(Color::Black));
        assert_eq!(frame.pixel(16, 0), Some(Color::White));
    }

    #[test]
    fn test_second_line_starts_at_line_height() {
        let config = RenderConfig::default();
        let frame = render(dims(), &font(), "x\nx", None, &config);
        assert_eq!(frame.pixel(0, 9), Some(Color::Black));
        assert_eq!(frame.pixel(0, 10), Some(Color::Black));
        assert_eq!(frame.pixel(0, 20), Some(Color::White));
    }

    #[test]
    fn test_underline_cursor_position() {
        let config = RenderConfig::default();
        let cursor = Cursor {
            column: 2,
            row: 1,
            style: CursorStyle::Underline { offset: 2 },
        };
        let frame = render(dims(), &font(), "", Some(cursor), &config);
        // rows 10..20 are the second text row; underline sits at
        // 2*10 - 1 - 2 = 17, spanning 7 px from column 16
        assert_eq!(frame.pixel(16, 17), Some(Color::Black));
        assert_eq!(frame.pixel(22, 17), Some(Color::Black));
        assert_eq!(frame.pixel(23, 17), Some(Color::White));
        assert_eq!(frame.pixel(16, 16), Some(Color::White));
        assert_eq!(frame.pixel(16, 18), Some(Color::White));
    }

    #[test]
    fn test_block_cursor_inverts_the_cell() {
        let config = RenderConfig::default();
        let cursor = Cursor {
            column: 0,
            row: 0,
            style: CursorStyle::Block,
        };
        // the cell holds a glyph; inversion turns it back to white
        let frame = render(dims(), &font(), "x", Some(cursor), &config);
        assert_eq!(frame.pixel(0, 0), Some(Color::White));
        assert_eq!(frame.pixel(7, 9), Some(Color::White));
        // outside the cell the glyph from the next column is untouched
        let frame = render(dims(), &font(), "xx", Some(cursor), &config);
        assert_eq!(frame.pixel(8, 0), Some(Color::Black));
    }

    #[test]
    fn test_landscape_rotates_into_panel_axes() {
        let config = RenderConfig {
            orientation: Orientation::Landscape,
            flip_x: false,
            flip_y: false,
        };
        // a glyph at the landscape origin ends up at the panel's
        // bottom-left after the counterclockwise rotation
        let frame = render(dims(), &font(), "x", None, &config);
        assert_eq!(frame.pixel(0, 249), Some(Color::Black));
        assert_eq!(frame.pixel(9, 242), Some(Color::Black));
        assert_eq!(frame.pixel(10, 249), Some(Color::White));
        assert_eq!(frame.pixel(0, 241), Some(Color::White));
    }

    #[test]
    fn test_far_offscreen_cursor_renders_cleanly() {
        let config = RenderConfig::default();
        for style in [CursorStyle::Block, CursorStyle::Underline { offset: 0 }] {
            let cursor = Cursor {
                column: u16::MAX,
                row: u16::MAX,
                style,
            };
            // nothing to draw, but layout math must not wrap
            let frame = render(dims(), &font(), "x", Some(cursor), &config);
            assert_eq!(frame.width(), 128);
            assert_eq!(frame.height(), 250);
            assert_eq!(frame.pixel(0, 0), Some(Color::Black));
        }
    }

    #[test]
    fn test_overflowing_text_is_clipped() {
        let config = RenderConfig::default();
        let long_line: alloc::string::String = core::iter::repeat('x').take(100).collect();
        let frame = render(dims(), &font(), &long_line, None, &config);
        assert_eq!(frame.width(), 128);
        // last full cell ends at x = 127
        assert_eq!(frame.pixel(127, 0), Some(Color::Black));
    }
}
