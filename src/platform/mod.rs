//! Host platforms
//!
//! - `headless`: in-memory surface, HUD and scheduler (tests, native demo)
//! - `web`: canvas, DOM and `requestAnimationFrame` (WASM only)

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod web;
