//! Glyph sheet slicing
//!
//! A glyph sheet is a single image holding fixed-size cells for the printable
//! ASCII characters (32..=126), read left-to-right, top-to-bottom. Each cell is
//! cut out into its own RGBA image so it can be uploaded as its own texture.
//! Pure black pixels are treated as transparent.

use std::path::Path;

use image::RgbaImage;

use crate::consts::{FIRST_GLYPH, GLYPH_COUNT, LAST_GLYPH};

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while loading a glyph sheet
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// The image could not be read or decoded
    #[error("Failed to load glyph sheet: {0}")]
    Image(#[from] image::ImageError),

    /// Cell dimensions must be non-zero
    #[error("Invalid glyph cell size {width}x{height}")]
    InvalidCell { width: u32, height: u32 },

    /// The sheet runs out of rows before all glyphs are cut
    #[error("Glyph sheet {width}x{height} holds only {available} of {needed} glyphs")]
    SheetTooSmall {
        width: u32,
        height: u32,
        available: usize,
        needed: usize,
    },
}

/// One glyph cut from the sheet, tightly packed RGBA8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl GlyphImage {
    /// RGBA of the pixel at (x, y), row 0 at the top
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// The 95 printable ASCII glyphs
#[derive(Debug, Clone)]
pub struct GlyphSheet {
    glyphs: Vec<GlyphImage>,
    cell_width: u32,
    cell_height: u32,
}

impl GlyphSheet {
    /// Load and slice a sheet from disk
    pub fn open<P: AsRef<Path>>(path: P, cell_width: u32, cell_height: u32) -> FontResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading glyph sheet from: {:?}", path);
        let image = image::open(path)?.to_rgba8();
        log::info!(
            "Loaded glyph sheet {}x{} from {:?}",
            image.width(),
            image.height(),
            path
        );
        Self::from_rgba(&image, cell_width, cell_height)
    }

    /// Decode and slice an encoded image held in memory
    pub fn from_bytes(bytes: &[u8], cell_width: u32, cell_height: u32) -> FontResult<Self> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        log::debug!(
            "Decoded glyph sheet {}x{} from memory",
            image.width(),
            image.height()
        );
        Self::from_rgba(&image, cell_width, cell_height)
    }

    /// Slice an already decoded sheet
    pub fn from_rgba(image: &RgbaImage, cell_width: u32, cell_height: u32) -> FontResult<Self> {
        if cell_width == 0 || cell_height == 0 {
            return Err(FontError::InvalidCell {
                width: cell_width,
                height: cell_height,
            });
        }

        let (width, height) = image.dimensions();
        let mut glyphs = Vec::with_capacity(GLYPH_COUNT);
        let (mut off_x, mut off_y) = (0u32, 0u32);

        while glyphs.len() < GLYPH_COUNT {
            if off_x + cell_width > width {
                off_x = 0;
                off_y += cell_height;
            }
            if off_x + cell_width > width || off_y + cell_height > height {
                return Err(FontError::SheetTooSmall {
                    width,
                    height,
                    available: glyphs.len(),
                    needed: GLYPH_COUNT,
                });
            }

            glyphs.push(cut_cell(image, off_x, off_y, cell_width, cell_height));
            off_x += cell_width;
        }

        Ok(Self {
            glyphs,
            cell_width,
            cell_height,
        })
    }

    /// Glyph slot for a character, if printable
    pub fn glyph_index(ch: char) -> Option<usize> {
        let code = u32::from(ch);
        (u32::from(FIRST_GLYPH)..=u32::from(LAST_GLYPH))
            .contains(&code)
            .then(|| (code - u32::from(FIRST_GLYPH)) as usize)
    }

    pub fn glyph(&self, ch: char) -> Option<&GlyphImage> {
        Self::glyph_index(ch).map(|i| &self.glyphs[i])
    }

    pub fn glyphs(&self) -> &[GlyphImage] {
        &self.glyphs
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }
}

/// Copy one cell, keying out pure black
fn cut_cell(image: &RgbaImage, off_x: u32, off_y: u32, width: u32, height: u32) -> GlyphImage {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let [r, g, b, a] = image.get_pixel(off_x + x, off_y + y).0;
            let a = if r == 0 && g == 0 && b == 0 { 0 } else { a };
            pixels.extend_from_slice(&[r, g, b, a]);
        }
    }
    GlyphImage {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Sheet where every cell is filled with a grey level equal to its index + 1,
    /// except the top-left pixel of each cell which is black
    fn numbered_sheet(columns: u32, rows: u32, cell_w: u32, cell_h: u32) -> RgbaImage {
        RgbaImage::from_fn(columns * cell_w, rows * cell_h, |x, y| {
            if x % cell_w == 0 && y % cell_h == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                let index = (y / cell_h) * columns + (x / cell_w);
                let level = (index + 1).min(255) as u8;
                Rgba([level, level, level, 255])
            }
        })
    }

    #[test]
    fn test_slices_all_printable_glyphs() {
        let image = numbered_sheet(16, 6, 12, 16);
        let sheet = GlyphSheet::from_rgba(&image, 12, 16).unwrap();
        assert_eq!(sheet.glyphs().len(), 95);
        assert_eq!(sheet.cell_size(), (12, 16));

        let space = sheet.glyph(' ').unwrap();
        assert_eq!(space.width, 12);
        assert_eq!(space.height, 16);
        assert_eq!(space.pixel(5, 5), [1, 1, 1, 255]);

        // 'A' is code 65 -> index 33 -> third row, column 1
        let a = sheet.glyph('A').unwrap();
        assert_eq!(a.pixel(3, 3), [34, 34, 34, 255]);

        let tilde = sheet.glyph('~').unwrap();
        assert_eq!(tilde.pixel(1, 1), [95, 95, 95, 255]);
    }

    #[test]
    fn test_black_is_transparent() {
        let image = numbered_sheet(16, 6, 12, 16);
        let sheet = GlyphSheet::from_rgba(&image, 12, 16).unwrap();
        for glyph in sheet.glyphs() {
            assert_eq!(glyph.pixel(0, 0), [0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_partial_columns_are_skipped() {
        // 16 full cells plus a 5px sliver per row
        let image = numbered_sheet(16, 6, 12, 16);
        let mut wide = RgbaImage::new(image.width() + 5, image.height());
        image::imageops::replace(&mut wide, &image, 0, 0);
        let sheet = GlyphSheet::from_rgba(&wide, 12, 16).unwrap();
        assert_eq!(sheet.glyph('0').unwrap().pixel(2, 2), [17, 17, 17, 255]);
    }

    #[test]
    fn test_sheet_too_small() {
        let image = numbered_sheet(16, 5, 12, 16);
        match GlyphSheet::from_rgba(&image, 12, 16) {
            Err(FontError::SheetTooSmall {
                available, needed, ..
            }) => {
                assert_eq!(available, 80);
                assert_eq!(needed, 95);
            }
            other => panic!("unexpected result: {:?}", other.map(|s| s.glyphs().len())),
        }
    }

    #[test]
    fn test_zero_cell_rejected() {
        let image = numbered_sheet(16, 6, 12, 16);
        assert!(matches!(
            GlyphSheet::from_rgba(&image, 0, 16),
            Err(FontError::InvalidCell { .. })
        ));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(matches!(
            GlyphSheet::from_bytes(b"not a png", 12, 16),
            Err(FontError::Image(_))
        ));
    }

    #[test]
    fn test_glyph_index() {
        assert_eq!(GlyphSheet::glyph_index(' '), Some(0));
        assert_eq!(GlyphSheet::glyph_index('~'), Some(94));
        assert_eq!(GlyphSheet::glyph_index('\n'), None);
        assert_eq!(GlyphSheet::glyph_index('é'), None);
    }
}
