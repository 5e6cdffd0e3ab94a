//! Color and passthrough style values handed to the stylist

mod color;
mod style;

pub use color::Color;
pub use style::PassthroughStyle;
