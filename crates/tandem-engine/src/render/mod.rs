//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers, textures) and
//! creates them lazily on first use, once a device exists.
//!
//! Convention:
//! - geometry is in world units, +Y up
//! - the vertex shader applies `projection * view * model`

mod ctx;
pub mod shader;
pub mod sprite;
pub mod texture;

pub use ctx::{RenderCtx, RenderTarget};
