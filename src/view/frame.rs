//! Software rendering backend
//!
//! [`Frame`] wraps a softbuffer pixel buffer with clipped fill and blend
//! primitives, [`FontFace`] and [`TextPainter`] measure and rasterize text with
//! fontdue, and [`FrameCanvas`] puts them together behind [`Canvas`].

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings, Metrics};

use super::geometry::{Point, Rect, TextAlign};
use super::{Canvas, TextMeasure};
use crate::theme::Color;

pub type GlyphCacheKey = (char, u32);
pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). Returns an opaque color.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let channel = |shift: u32| {
        let b = ((bg >> shift) & 0xFF) as f32;
        let f = ((fg >> shift) & 0xFF) as f32;
        ((b * (1.0 - alpha) + f * alpha) as u32) << shift
    };

    0xFF000000 | channel(16) | channel(8) | channel(0)
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds operations are clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, the height is reduced
    /// to match the actual buffer size.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width > 0 && buffer.len() < width * height {
            buffer.len() / width
        } else {
            height
        };

        Self {
            buffer,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel span of `rect` clipped to the frame, as (x0, y0, x1, y1)
    fn span(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let x0 = (rect.x.max(0.0) as usize).min(self.width);
        let y0 = (rect.y.max(0.0) as usize).min(self.height);
        let x1 = (rect.right().max(0.0) as usize).min(self.width);
        let y1 = (rect.bottom().max(0.0) as usize).min(self.height);
        (x0, y0, x1.max(x0), y1.max(y0))
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            let row = y * self.width;
            self.buffer[row + x0..row + x1].fill(color);
        }
    }

    /// Fill a rectangle with alpha blending (color is ARGB format)
    pub fn fill_rect_blended(&mut self, rect: Rect, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color | 0xFF000000);
        }

        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            let row = y * self.width;
            for x in x0..x1 {
                let idx = row + x;
                self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
            }
        }
    }

    /// Fill a rectangle with a color interpolated from `left` to `right`,
    /// alpha included, blended onto what is already there.
    pub fn fill_horizontal_gradient(&mut self, rect: Rect, left: u32, right: u32) {
        if rect.width <= 0.0 {
            return;
        }

        let (x0, y0, x1, y1) = self.span(rect);
        for x in x0..x1 {
            let t = ((x as f32 + 0.5 - rect.x) / rect.width).clamp(0.0, 1.0);
            let color = lerp_argb(left, right, t);
            for y in y0..y1 {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Blend a pixel with alpha (ARGB format, alpha in high byte)
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = y * self.width + x;
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            self.buffer[idx] = color | 0xFF000000;
            return;
        }

        self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
    }
}

/// Interpolate every ARGB channel, alpha included
fn lerp_argb(from: u32, to: u32, t: f32) -> u32 {
    let channel = |shift: u32| {
        let a = ((from >> shift) & 0xFF) as f32;
        let b = ((to >> shift) & 0xFF) as f32;
        ((a + (b - a) * t).round() as u32 & 0xFF) << shift
    };
    channel(24) | channel(16) | channel(8) | channel(0)
}

/// A font at one pixel size.
pub struct FontFace {
    font: Font,
    size: f32,
    ascent: f32,
    line_height: f32,
}

impl FontFace {
    /// Parse a TTF/OTF font from memory
    pub fn from_bytes(bytes: &[u8], size: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow!("Failed to parse font: {e}"))?;

        let (ascent, line_height) = match font.horizontal_line_metrics(size) {
            Some(metrics) => (metrics.ascent, (metrics.ascent - metrics.descent).ceil()),
            None => (size * 0.8, size.ceil()),
        };

        tracing::debug!(size, ascent, line_height, "font loaded");

        Ok(Self {
            font,
            size,
            ascent,
            line_height,
        })
    }

    /// Read and parse a font file
    pub fn load(path: &Path, size: f32) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        Self::from_bytes(&bytes, size)
            .with_context(|| format!("Failed to load font {}", path.display()))
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn ascent(&self) -> f32 {
        self.ascent
    }
}

impl TextMeasure for FontFace {
    fn measure(&self, text: &str) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, self.size).advance_width)
            .sum()
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn char_spacing(&self) -> f32 {
        0.0
    }
}

/// Text rasterizer wrapping a font face and glyph cache.
pub struct TextPainter<'a> {
    face: &'a FontFace,
    glyph_cache: &'a mut GlyphCache,
}

impl<'a> TextPainter<'a> {
    pub fn new(face: &'a FontFace, glyph_cache: &'a mut GlyphCache) -> Self {
        Self { face, glyph_cache }
    }

    pub fn face(&self) -> &FontFace {
        self.face
    }

    /// Draw text with the top of its line box at `top`
    pub fn draw(&mut self, frame: &mut Frame, x: f32, top: f32, text: &str, color: u32) {
        let face = self.face;
        let mut current_x = x;
        let baseline = top + face.ascent;

        for ch in text.chars() {
            let key = (ch, face.size.to_bits());
            let (metrics, bitmap) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| face.font.rasterize(ch, face.size));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let alpha = bitmap[bitmap_y * metrics.width + bitmap_x];
                    if alpha == 0 {
                        continue;
                    }

                    let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let py = (glyph_top + bitmap_y as f32) as isize;
                    if px < 0 || py < 0 {
                        continue;
                    }

                    // Scale the color's own alpha by glyph coverage
                    let coverage = (alpha as u32 * ((color >> 24) & 0xFF)) / 255;
                    frame.blend_pixel(
                        px as usize,
                        py as usize,
                        (coverage << 24) | (color & 0x00FFFFFF),
                    );
                }
            }

            current_x += metrics.advance_width;
        }
    }
}

/// [`Canvas`] over a [`Frame`], drawing text with a [`TextPainter`].
pub struct FrameCanvas<'a, 'buf> {
    frame: &'a mut Frame<'buf>,
    painter: TextPainter<'a>,
}

impl<'a, 'buf> FrameCanvas<'a, 'buf> {
    pub fn new(frame: &'a mut Frame<'buf>, painter: TextPainter<'a>) -> Self {
        Self { frame, painter }
    }
}

impl Canvas for FrameCanvas<'_, '_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.frame.fill_rect_blended(rect, color.to_argb_u32());
    }

    fn fill_horizontal_gradient(&mut self, rect: Rect, left: Color, right: Color) {
        self.frame
            .fill_horizontal_gradient(rect, left.to_argb_u32(), right.to_argb_u32());
    }

    fn draw_text(&mut self, text: &str, at: Point, align: TextAlign, color: Color) {
        let face = self.painter.face();
        let x = match align {
            TextAlign::Left => at.x,
            TextAlign::Right => at.x - face.measure(text),
        };
        let top = at.y - face.line_height() / 2.0;
        self.painter
            .draw(self.frame, x, top, text, color.to_argb_u32());
    }
}
