//! Bitmap font
//!
//! Glyph sheets are sliced into one image per printable ASCII character at
//! load time; text is drawn as one textured quad per character.

pub mod sheet;
pub mod text;

pub use sheet::{FontError, FontResult, GlyphImage, GlyphSheet};
pub use text::{GlyphQuad, TextStyle};
