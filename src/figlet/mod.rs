//! FIGlet-style banner rendering: font parsing, resolution, and layout

pub mod font;
pub mod render;
pub mod resolve;

pub use font::{FigFont, FontParseError};
pub use render::render;
pub use resolve::{available_fonts, resolve, FontError, Resolution, DEFAULT_FONT};
