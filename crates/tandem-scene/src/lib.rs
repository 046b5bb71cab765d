//! Two textured sprites animated by accumulated transforms.
//!
//! The first sprite pulses (grows, then shrinks, every two seconds) while
//! spinning clockwise; the second spins counter-clockwise while drifting
//! along its own X axis, which traces a circle.

pub mod animate;
pub mod app;
pub mod config;
pub mod state;
