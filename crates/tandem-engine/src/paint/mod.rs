//! Paint model shared between the scene and renderers.
//!
//! Only solid colors exist; sprites carry their own texels.

pub mod color;

pub use color::Color;
