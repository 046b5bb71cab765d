use tandem_engine::coords::Mat4;
use tandem_engine::scene::{DrawList, TextureId};

/// A textured quad placed by an accumulated model transform.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableObject {
    pub name: &'static str,
    pub transform: Mat4,
    pub texture: TextureId,
}

impl RenderableObject {
    pub fn new(name: &'static str, texture: TextureId) -> Self {
        Self {
            name,
            transform: Mat4::IDENTITY,
            texture,
        }
    }
}

/// Grow/shrink phase of the pulsing sprite.
///
/// `time_stack` is the time spent in the current phase, in seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PulsePhase {
    pub growing: bool,
    pub time_stack: f32,
}

impl Default for PulsePhase {
    fn default() -> Self {
        Self {
            growing: true,
            time_stack: 0.0,
        }
    }
}

/// Everything the animator mutates between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// Pulses and spins in place.
    pub chrome: RenderableObject,
    /// Circles around the origin.
    pub firefox: RenderableObject,
    pub pulse: PulsePhase,
}

impl SceneState {
    pub fn new(chrome_texture: TextureId, firefox_texture: TextureId) -> Self {
        Self {
            chrome: RenderableObject::new("chrome", chrome_texture),
            firefox: RenderableObject::new("firefox", firefox_texture),
            pulse: PulsePhase::default(),
        }
    }

    /// Objects in paint order; later ones draw on top.
    pub fn objects(&self) -> [&RenderableObject; 2] {
        [&self.chrome, &self.firefox]
    }

    /// Appends one sprite per object, chrome first.
    pub fn draw(&self, list: &mut DrawList) {
        for obj in self.objects() {
            list.push_sprite(obj.texture, obj.transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_identity_growing() {
        let s = SceneState::new(TextureId(0), TextureId(1));
        assert_eq!(s.chrome.transform, Mat4::IDENTITY);
        assert_eq!(s.firefox.transform, Mat4::IDENTITY);
        assert!(s.pulse.growing);
        assert_eq!(s.pulse.time_stack, 0.0);
    }

    #[test]
    fn draw_emits_chrome_then_firefox() {
        let mut s = SceneState::new(TextureId(7), TextureId(3));
        s.firefox.transform = Mat4::from_translation(tandem_engine::coords::Vec3::new(1.0, 0.0, 0.0));

        let mut list = DrawList::new();
        s.draw(&mut list);

        let sprites: Vec<_> = list.sprites().collect();
        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites[0].texture, TextureId(7));
        assert_eq!(sprites[0].model, Mat4::IDENTITY);
        assert_eq!(sprites[1].texture, TextureId(3));
        assert_eq!(sprites[1].model, s.firefox.transform);
    }
}
