/// Platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The user asked to close the window, or the window is gone.
    Quit,

    /// Window focus changed.
    Focused(bool),

    /// Drawable size changed, in physical pixels.
    Resized { width: u32, height: u32 },
}
