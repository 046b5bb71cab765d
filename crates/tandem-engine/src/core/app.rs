use super::ctx::FrameCtx;

/// What the runtime should do after a callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// A program driven by [`crate::window::Runtime`].
///
/// The runtime owns the window, GPU and clock; the app sees them only through
/// the per-frame [`FrameCtx`].
pub trait App {
    /// One redraw. `ctx.input` holds every event since the last redraw and
    /// `ctx.time.dt` the seconds elapsed since it.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Runs once, after the last frame and before the window is dropped.
    fn on_exit(&mut self) {}
}
