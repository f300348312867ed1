//! Rendering module
//!
//! The scene is drawn through the small [`Surface`] trait so the same code
//! paints a browser canvas or a recording surface in tests.

pub mod scene;

pub use scene::{render_frame, render_game_over};

/// A write-only 2D drawing target
pub trait Surface {
    /// Clear the whole play area
    fn clear(&mut self, width: f32, height: f32);

    /// Fill an axis-aligned rectangle; (x, y) is the top-left corner
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str);

    /// Draw text horizontally centred on x with its baseline at y
    fn fill_text_centered(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str);
}
