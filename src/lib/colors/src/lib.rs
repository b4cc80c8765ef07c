//! Color conversions, harmony based palettes and css gradients.

mod color;
mod gradient;
mod palette;

pub use crate::color::*;
pub use crate::gradient::*;
pub use crate::palette::*;
