use winit::event::WindowEvent;

use crate::input::InputEvent;

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(InputEvent::Quit),

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::Resized(size) => Some(InputEvent::Resized {
            width: size.width,
            height: size.height,
        }),

        _ => None,
    }
}
