//! Text layout for the bitmap font
//!
//! Turns strings into one quad per printable character. Positions are in
//! playfield units with y pointing up; a quad's origin is its bottom-left.

use glam::Vec2;

use super::sheet::GlyphSheet;
use crate::consts::{GLYPH_HEIGHT, GLYPH_WIDTH};

/// Quad size and pen advance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub glyph_width: f32,
    pub glyph_height: f32,
    pub advance: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            glyph_width: GLYPH_WIDTH,
            glyph_height: GLYPH_HEIGHT,
            advance: GLYPH_WIDTH,
        }
    }
}

/// A single textured quad to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Index into the glyph sheet (0 = space)
    pub glyph: usize,
    /// Bottom-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

impl TextStyle {
    /// Lay out `text` starting at `pen`. Unprintable characters advance the
    /// pen without emitting a quad.
    pub fn layout(&self, text: &str, pen: Vec2) -> Vec<GlyphQuad> {
        let size = Vec2::new(self.glyph_width, self.glyph_height);
        text.chars()
            .enumerate()
            .filter_map(|(i, ch)| {
                GlyphSheet::glyph_index(ch).map(|glyph| GlyphQuad {
                    glyph,
                    origin: pen + Vec2::new(i as f32 * self.advance, 0.0),
                    size,
                })
            })
            .collect()
    }

    /// Lay out an integer in decimal
    pub fn layout_int(&self, value: i64, pen: Vec2) -> Vec<GlyphQuad> {
        self.layout(&value.to_string(), pen)
    }

    pub fn width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    /// Pen position that centres `text` horizontally on `center_x`
    pub fn centered(&self, text: &str, center_x: f32, y: f32) -> Vec2 {
        Vec2::new(center_x - self.width(text) / 2.0, y)
    }
}
