use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::input::InputFrame;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// The window being drawn.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

/// Everything `App::on_frame` may touch during one redraw.
///
/// `'a` bounds the callback; `'w` is the window borrow inside `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputFrame,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl FrameCtx<'_, '_> {
    /// Draws one frame: clear to `clear`, run `draw`, present.
    ///
    /// When no surface texture can be acquired the frame is skipped, or the
    /// loop is told to exit if the surface cannot recover.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let Some(mut frame) = self.acquire() else {
            return if self.runtime.exit_requested() {
                AppControl::Exit
            } else {
                AppControl::Continue
            };
        };

        {
            let GpuFrame { encoder, view, .. } = &mut frame;
            let mut target = RenderTarget::new(encoder, view);
            target.clear(clear);
            draw(&RenderCtx::from_gpu(self.gpu), &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }

    fn acquire(&mut self) -> Option<GpuFrame> {
        match self.gpu.begin_frame() {
            Ok(frame) => Some(frame),
            Err(err) => {
                if self.gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    log::error!("surface cannot be recovered; stopping");
                    self.runtime.exit();
                }
                None
            }
        }
    }
}
