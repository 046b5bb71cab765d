/// What the frame loop should do after `get_current_texture` fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next redraw may succeed.
    Reconfigured,
    /// Transient error; drop this frame and keep running.
    SkipFrame,
    /// Unrecoverable (out of memory); stop the loop.
    Fatal,
}
