//! Product catalog: fabrics, color swatches and the shopper's selections

pub mod color;
pub mod fabric;
pub mod selection;

pub use color::{palette, Color, ColorOption, ColorParseError};
pub use fabric::FabricId;
pub use selection::{ColorSelection, FabricSelection};
