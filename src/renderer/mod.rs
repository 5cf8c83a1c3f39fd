//! WebGPU rendering module
//!
//! Scenes are assembled on the CPU as triangle lists plus glyph quads, then
//! drawn by `RenderState`.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::{Frame, font_demo_frame, game_frame};
