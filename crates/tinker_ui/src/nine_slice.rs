//! Stretchable nine-slice backgrounds.
//!
//! The source image is cut into a 3×3 grid. Corners are copied at their
//! native size, edges stretch along one axis and the center stretches along
//! both, so borders stay crisp at any panel size.

use std::rc::Rc;

use crate::layout::Rect;
use crate::style::Color;
use crate::surface::{PixelBuffer, Surface};

#[derive(Debug, Clone)]
enum Source {
    Solid(Color),
    Image {
        image: Rc<PixelBuffer>,
        columns: [i32; 3],
        rows: [i32; 3],
    },
}

/// A nine-slice background.
#[derive(Debug, Clone)]
pub struct NineSlice {
    source: Source,
}

impl NineSlice {
    /// A flat color that fills whatever rect it is drawn into.
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self {
            source: Source::Solid(color),
        }
    }

    /// Slices `image` into columns `[left, center, right]` and rows
    /// `[top, middle, bottom]`, measured in source pixels.
    #[must_use]
    pub fn new(image: Rc<PixelBuffer>, columns: [i32; 3], rows: [i32; 3]) -> Self {
        Self {
            source: Source::Image {
                image,
                columns,
                rows,
            },
        }
    }

    /// Slices `image` with a fixed corner size and the remainder as the center.
    #[must_use]
    pub fn with_corners(image: Rc<PixelBuffer>, corner_width: i32, corner_height: i32) -> Self {
        let (w, h) = image.size();
        let columns = [corner_width, (w - 2 * corner_width).max(0), corner_width];
        let rows = [corner_height, (h - 2 * corner_height).max(0), corner_height];
        Self::new(image, columns, rows)
    }

    /// Draws the background stretched over `rect`.
    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        match &self.source {
            Source::Solid(color) => surface.fill_rect(rect, *color),
            Source::Image {
                image,
                columns,
                rows,
            } => {
                let src_x = [0, columns[0], columns[0] + columns[1]];
                let src_y = [0, rows[0], rows[0] + rows[1]];
                let (dst_x, dst_w) = split_axis(rect.x, rect.width, columns);
                let (dst_y, dst_h) = split_axis(rect.y, rect.height, rows);

                for row in 0..3 {
                    for col in 0..3 {
                        let src = Rect::new(src_x[col], src_y[row], columns[col], rows[row]);
                        let dst = Rect::new(dst_x[col], dst_y[row], dst_w[col], dst_h[row]);
                        surface.blit_scaled(image, src, dst);
                    }
                }
            }
        }
    }
}

/// Destination offsets and extents for the three slices of one axis.
///
/// When the target is smaller than both fixed ends, the ends shrink
/// proportionally and the center collapses.
fn split_axis(start: i32, extent: i32, slices: &[i32; 3]) -> ([i32; 3], [i32; 3]) {
    let fixed = slices[0] + slices[2];
    let (lead, trail) = if fixed > extent && fixed > 0 {
        let lead = slices[0] * extent / fixed;
        (lead, extent - lead)
    } else {
        (slices[0], slices[2])
    };
    let middle = (extent - lead - trail).max(0);
    (
        [start, start + lead, start + lead + middle],
        [lead, middle, trail],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Rgba8;

    /// 3×3 source with a distinct color per slice.
    fn checker() -> Rc<PixelBuffer> {
        let pixels = (0..9u8).map(|i| Rgba8::new(i * 20, 0, 0, 255)).collect();
        Rc::new(PixelBuffer::from_pixels(3, 3, pixels).expect("3x3"))
    }

    #[test]
    fn test_solid_fills_rect() {
        let mut buf = PixelBuffer::new(8, 8);
        NineSlice::solid(Color::WHITE).draw(&mut buf, Rect::new(2, 2, 4, 4));

        assert_eq!(buf.pixel(2, 2), Some(Rgba8::new(255, 255, 255, 255)));
        assert_eq!(buf.pixel(6, 6), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_corners_keep_native_size() {
        let slice = NineSlice::with_corners(checker(), 1, 1);
        let mut buf = PixelBuffer::new(10, 6);
        let bounds = buf.bounds();
        slice.draw(&mut buf, bounds);

        // Corners
        assert_eq!(buf.pixel(0, 0).map(|p| p.r), Some(0));
        assert_eq!(buf.pixel(9, 0).map(|p| p.r), Some(40));
        assert_eq!(buf.pixel(0, 5).map(|p| p.r), Some(120));
        assert_eq!(buf.pixel(9, 5).map(|p| p.r), Some(160));
        // Stretched top edge and center
        assert_eq!(buf.pixel(5, 0).map(|p| p.r), Some(20));
        assert_eq!(buf.pixel(5, 3).map(|p| p.r), Some(80));
    }

    #[test]
    fn test_split_axis_shrinks_ends() {
        let (offsets, extents) = split_axis(0, 10, &[10, 4, 10]);
        assert_eq!(extents, [5, 0, 5]);
        assert_eq!(offsets, [0, 5, 5]);
    }
}
