//! Rasterization of braillegrid pixel buffers: upscaling, image files, and
//! terminal preview.

pub mod preview;
pub mod rasterizer;

pub use rasterizer::{save, upscale};
