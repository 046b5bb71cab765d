//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window events into `InputEvent`s, which the
//! runtime collects into one `InputFrame` per redraw. `Controller` holds the
//! first gamepad open for the runtime's lifetime.

mod controller;
mod frame;
mod types;

pub mod platform;

pub use controller::Controller;
pub use frame::InputFrame;
pub use types::InputEvent;
