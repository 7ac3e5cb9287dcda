//! Braille grid engine for braillegrid.
//!
//! Turns a line of text into a wrapped, spaced, margined dot grid.

pub mod assemble;
pub mod margin;
pub mod normalize;
pub mod pipeline;
pub mod resolve;
pub mod spacing;

pub use pipeline::{Converter, Layout};
pub use spacing::Spacing;
