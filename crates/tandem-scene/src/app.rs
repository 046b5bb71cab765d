use anyhow::Result;

use tandem_engine::coords::Mat4;
use tandem_engine::core::{App, AppControl, FrameCtx};
use tandem_engine::input::InputFrame;
use tandem_engine::paint::Color;
use tandem_engine::render::shader::ShaderProgram;
use tandem_engine::render::sprite::SpriteRenderer;
use tandem_engine::render::texture::TextureImage;
use tandem_engine::scene::DrawList;

use crate::animate;
use crate::config::SceneConfig;
use crate::state::SceneState;

/// Visible world rectangle: 10 x 7.5 units centered on the origin (4:3).
pub const VIEW_HALF_WIDTH: f32 = 5.0;
pub const VIEW_HALF_HEIGHT: f32 = 3.75;

/// Orthographic projection shared by both sprites.
pub fn scene_projection() -> Mat4 {
    Mat4::orthographic(
        -VIEW_HALF_WIDTH,
        VIEW_HALF_WIDTH,
        -VIEW_HALF_HEIGHT,
        VIEW_HALF_HEIGHT,
        -1.0,
        1.0,
    )
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Everything read from disk before the window opens.
#[derive(Debug)]
pub struct SceneAssets {
    pub program: ShaderProgram,
    pub chrome: TextureImage,
    pub firefox: TextureImage,
}

impl SceneAssets {
    /// Reads the shaders and decodes both sprites. Any failure is fatal.
    pub fn load(config: &SceneConfig) -> Result<Self> {
        let program =
            ShaderProgram::load(&config.vertex_shader_path(), &config.fragment_shader_path())?;

        let mut images = config
            .sprite_paths()
            .iter()
            .map(|p| TextureImage::decode(p))
            .collect::<Result<Vec<_>>>()?;

        anyhow::ensure!(images.len() == 2, "expected 2 sprite images, got {}", images.len());
        let firefox = images.remove(1);
        let chrome = images.remove(0);

        Ok(Self {
            program,
            chrome,
            firefox,
        })
    }
}

/// The two-sprite scene: poll input, animate, draw.
pub struct SceneApp {
    loop_state: LoopState,
    state: SceneState,
    renderer: SpriteRenderer,
    draw_list: DrawList,
    clear: Color,
}

impl SceneApp {
    pub fn new(config: &SceneConfig, assets: SceneAssets) -> Self {
        let SceneAssets {
            mut program,
            chrome,
            firefox,
        } = assets;

        program.set_projection(scene_projection());
        program.set_view(Mat4::IDENTITY);

        let mut renderer = SpriteRenderer::new(program);
        let chrome = renderer.register(chrome);
        let firefox = renderer.register(firefox);

        Self {
            loop_state: LoopState::Running,
            state: SceneState::new(chrome, firefox),
            renderer,
            draw_list: DrawList::new(),
            clear: config.clear_color(),
        }
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Consumes this frame's input and advances the animation.
    ///
    /// A quit signal stops the loop before anything is updated; once stopped
    /// the scene no longer changes.
    pub fn step(&mut self, input: &InputFrame, dt: f32) -> LoopState {
        if self.loop_state == LoopState::Stopped {
            return LoopState::Stopped;
        }

        if input.quit_requested() {
            log::info!("quit requested; stopping");
            self.loop_state = LoopState::Stopped;
            return LoopState::Stopped;
        }

        animate::update(&mut self.state, dt);

        self.draw_list.clear();
        self.state.draw(&mut self.draw_list);

        LoopState::Running
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}

impl App for SceneApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.step(ctx.input, ctx.time.dt) == LoopState::Stopped {
            return AppControl::Exit;
        }

        let renderer = &mut self.renderer;
        let draw_list = &self.draw_list;
        ctx.render(self.clear, |rctx, target| renderer.render(rctx, target, draw_list))
    }

    fn on_exit(&mut self) {
        log::info!(
            "scene stopped; pulse {} at {:.3}s",
            if self.state.pulse.growing { "growing" } else { "shrinking" },
            self.state.pulse.time_stack
        );
    }
}
