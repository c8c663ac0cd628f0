//! Software render targets.
//!
//! Widgets draw into anything implementing [`Surface`]. [`PixelBuffer`] is
//! the offscreen implementation used by the render caches; its pixel data
//! can be handed to the host engine as raw bytes for upload.

use crate::layout::Rect;
use crate::style::{Color, FontFace};

/// One RGBA pixel, 8 bits per channel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent pixel.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates a pixel from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Composites `self` over `dst` (source-over).
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let a = u32::from(a);
                let inv = 255 - a;
                let mix = |s: u8, d: u8| ((u32::from(s) * a + u32::from(d) * inv) / 255) as u8;
                Self {
                    r: mix(self.r, dst.r),
                    g: mix(self.g, dst.g),
                    b: mix(self.b, dst.b),
                    a: (a + u32::from(dst.a) * inv / 255) as u8,
                }
            }
        }
    }
}

/// A positioned run of text awaiting glyph rasterization by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Text content.
    pub text: String,
    /// X position of the run's top-left corner.
    pub x: i32,
    /// Y position of the run's top-left corner.
    pub y: i32,
    /// Font face.
    pub font: FontFace,
    /// Text color.
    pub color: Color,
}

/// A render target.
///
/// Coordinates are in the surface's own space; `bounds` tells callers which
/// part of that space is backed by pixels.
pub trait Surface {
    /// The drawable area.
    fn bounds(&self) -> Rect;

    /// Fills a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws a rectangle outline `width` pixels thick, inside `rect`.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32) {
        let w = width.min(rect.width).min(rect.height).max(0);
        if w == 0 {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, w), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - w, rect.width, w), color);
        self.fill_rect(Rect::new(rect.x, rect.y + w, w, rect.height - 2 * w), color);
        self.fill_rect(Rect::new(rect.right() - w, rect.y + w, w, rect.height - 2 * w), color);
    }

    /// Queues a run of text at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &FontFace, color: Color);

    /// Copies `source` with its top-left corner at `(x, y)`.
    fn blit(&mut self, source: &PixelBuffer, x: i32, y: i32);

    /// Copies the `src` region of `source` into `dst`, nearest-neighbour scaled.
    fn blit_scaled(&mut self, source: &PixelBuffer, src: Rect, dst: Rect);
}

/// An offscreen RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Rgba8>,
    text: Vec<TextRun>,
}

impl PixelBuffer {
    /// Allocates a transparent buffer. Negative dimensions are treated as zero.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; (width as usize) * (height as usize)],
            text: Vec::new(),
        }
    }

    /// Creates a buffer from existing pixel rows. Returns None if the
    /// pixel count doesn't match the dimensions.
    #[must_use]
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Rgba8>) -> Option<Self> {
        if width < 0 || height < 0 || pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            text: Vec::new(),
        })
    }

    /// Buffer width.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Buffer height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// `(width, height)`.
    #[must_use]
    pub const fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Resets every pixel to transparent and drops queued text.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba8::TRANSPARENT);
        self.text.clear();
    }

    /// Returns the pixel at `(x, y)`, if inside the buffer.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Text runs queued on this buffer.
    #[must_use]
    pub fn text_runs(&self) -> &[TextRun] {
        &self.text
    }

    /// Raw pixel bytes in RGBA order, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + x as usize)
    }

    fn put(&mut self, x: i32, y: i32, color: Rgba8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }
}

impl Surface for PixelBuffer {
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clip) = rect.intersection(&self.bounds()) else {
            return;
        };
        let px = color.to_rgba8();
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                self.put(x, y, px);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &FontFace, color: Color) {
        if text.is_empty() {
            return;
        }
        self.text.push(TextRun {
            text: text.to_owned(),
            x,
            y,
            font: font.clone(),
            color,
        });
    }

    fn blit(&mut self, source: &PixelBuffer, x: i32, y: i32) {
        let dst = Rect::new(x, y, source.width, source.height);
        if let Some(clip) = dst.intersection(&self.bounds()) {
            for py in clip.y..clip.bottom() {
                for px in clip.x..clip.right() {
                    if let Some(p) = source.pixel(px - x, py - y) {
                        self.put(px, py, p);
                    }
                }
            }
        }

        let bounds = self.bounds();
        self.text.extend(
            source
                .text
                .iter()
                .filter(|run| bounds.contains(run.x + x, run.y + y))
                .map(|run| TextRun {
                    x: run.x + x,
                    y: run.y + y,
                    ..run.clone()
                }),
        );
    }

    fn blit_scaled(&mut self, source: &PixelBuffer, src: Rect, dst: Rect) {
        if src.is_empty() || dst.is_empty() {
            return;
        }
        let Some(clip) = dst.intersection(&self.bounds()) else {
            return;
        };
        for py in clip.y..clip.bottom() {
            let sy = src.y + (py - dst.y) * src.height / dst.height;
            for px in clip.x..clip.right() {
                let sx = src.x + (px - dst.x) * src.width / dst.width;
                if let Some(p) = source.pixel(sx, sy) {
                    self.put(px, py, p);
                }
            }
        }
    }
}

/// Translates every draw call by a fixed offset before forwarding it.
///
/// The render cache uses this to draw a widget laid out at screen
/// coordinates into a buffer whose origin is the widget's top-left corner.
pub struct Offset<'a> {
    inner: &'a mut dyn Surface,
    dx: i32,
    dy: i32,
}

impl<'a> Offset<'a> {
    /// Wraps `inner`; a call at `(x, y)` lands at `(x + dx, y + dy)`.
    pub fn new(inner: &'a mut dyn Surface, dx: i32, dy: i32) -> Self {
        Self { inner, dx, dy }
    }
}

impl Surface for Offset<'_> {
    fn bounds(&self) -> Rect {
        self.inner.bounds().translate(-self.dx, -self.dy)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.inner.fill_rect(rect.translate(self.dx, self.dy), color);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &FontFace, color: Color) {
        self.inner.draw_text(text, x + self.dx, y + self.dy, font, color);
    }

    fn blit(&mut self, source: &PixelBuffer, x: i32, y: i32) {
        self.inner.blit(source, x + self.dx, y + self.dy);
    }

    fn blit_scaled(&mut self, source: &PixelBuffer, src: Rect, dst: Rect) {
        self.inner.blit_scaled(source, src, dst.translate(self.dx, self.dy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips_to_buffer() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_rect(Rect::new(2, 2, 10, 10), Color::WHITE);

        assert_eq!(buf.pixel(1, 1), Some(Rgba8::TRANSPARENT));
        assert_eq!(buf.pixel(3, 3), Some(Rgba8::new(255, 255, 255, 255)));
        assert_eq!(buf.pixel(4, 4), None);
    }

    #[test]
    fn test_blend_half_alpha() {
        let src = Rgba8::new(255, 0, 0, 128);
        let out = src.over(Rgba8::new(0, 0, 255, 255));

        assert!(out.r > 120 && out.r < 135);
        assert!(out.b > 120 && out.b < 135);
        assert_eq!(out.a, 255);
    }

    #[test]
    fn test_blit_translates_text() {
        let mut src = PixelBuffer::new(2, 2);
        src.fill_rect(src.bounds(), Color::BLACK);
        src.draw_text("hp", 0, 0, &FontFace::small(), Color::WHITE);

        let mut dst = PixelBuffer::new(10, 10);
        dst.blit(&src, 5, 6);

        assert_eq!(dst.pixel(5, 6), Some(Rgba8::new(0, 0, 0, 255)));
        assert_eq!(dst.pixel(4, 6), Some(Rgba8::TRANSPARENT));
        assert_eq!(dst.text_runs()[0].x, 5);
        assert_eq!(dst.text_runs()[0].y, 6);
    }

    #[test]
    fn test_offset_surface() {
        let mut buf = PixelBuffer::new(10, 10);
        {
            let mut shifted = Offset::new(&mut buf, -100, -200);
            shifted.fill_rect(Rect::new(100, 200, 1, 1), Color::WHITE);
            assert_eq!(shifted.bounds(), Rect::new(100, 200, 10, 10));
        }
        assert_eq!(buf.pixel(0, 0), Some(Rgba8::new(255, 255, 255, 255)));
    }

    #[test]
    fn test_as_bytes_layout() {
        let mut buf = PixelBuffer::new(1, 1);
        buf.fill_rect(buf.bounds(), Color::rgba(1.0, 0.0, 0.0, 1.0));
        assert_eq!(buf.as_bytes(), &[255, 0, 0, 255]);
    }
}
