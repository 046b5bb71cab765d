use crate::coords::Mat4;

use super::{DrawCmd, SpriteCmd, TextureId};

/// A single draw item.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// Position in the frame's paint order.
    pub order: u32,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Items paint in insertion order: the first item pushed is drawn first and
/// ends up at the back. `clear()` keeps capacity, so a list reused across
/// frames stops allocating once warmed.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { order, cmd });
    }

    /// Pushes a sprite draw.
    #[inline]
    pub fn push_sprite(&mut self, texture: TextureId, model: Mat4) {
        self.push(DrawCmd::Sprite(SpriteCmd { texture, model }));
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates sprite commands in paint order.
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteCmd> {
        self.items.iter().map(|item| match &item.cmd {
            DrawCmd::Sprite(s) => s,
        })
    }
}
