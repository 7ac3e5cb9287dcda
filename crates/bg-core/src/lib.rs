/// Data model, lookup table, and configuration for braillegrid.
///
/// This crate contains the shared types used across the braillegrid
/// workspace: dot cells and grids, the immutable lookup table, the error
/// taxonomy, and the TOML configuration.

pub mod config;
pub mod error;
pub mod grid;
pub mod table;

pub use config::{RenderConfig, UnknownPolicy};
pub use error::BrailleError;
pub use grid::{DotCell, DotGrid, PixelBuffer};
pub use table::LookupTable;
