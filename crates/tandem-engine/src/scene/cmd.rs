use crate::coords::Mat4;

/// Opaque handle to a texture registered with the sprite renderer.
///
/// Handles are assigned in registration order and stay valid for the
/// renderer's lifetime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

/// One textured unit quad, placed by `model`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub texture: TextureId,
    pub model: Mat4,
}

/// Renderer-agnostic draw command stream.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Sprite(SpriteCmd),
}
