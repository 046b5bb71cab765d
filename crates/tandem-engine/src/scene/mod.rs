//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands
//! - keep a deterministic paint order (insertion order, back-to-front)

mod cmd;
mod list;

pub use cmd::{DrawCmd, SpriteCmd, TextureId};
pub use list::{DrawItem, DrawList};
