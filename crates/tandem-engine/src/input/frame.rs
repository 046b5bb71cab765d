use super::types::InputEvent;

/// Events received since the previous redraw, in arrival order.
///
/// The runtime fills this between redraws and clears it after each frame
/// callback, so every event is seen by exactly one frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Returns true if a quit/close signal arrived this frame.
    pub fn quit_requested(&self) -> bool {
        self.events.iter().any(|ev| matches!(ev, InputEvent::Quit))
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_is_detected_among_other_events() {
        let mut frame = InputFrame::default();
        frame.push_event(InputEvent::Focused(true));
        assert!(!frame.quit_requested());

        frame.push_event(InputEvent::Quit);
        frame.push_event(InputEvent::Resized { width: 1, height: 1 });
        assert!(frame.quit_requested());
    }

    #[test]
    fn clear_drops_pending_events() {
        let mut frame = InputFrame::default();
        frame.push_event(InputEvent::Quit);
        frame.clear();
        assert!(frame.is_empty());
        assert!(!frame.quit_requested());
    }

    #[test]
    fn events_keep_arrival_order() {
        let mut frame = InputFrame::default();
        frame.push_event(InputEvent::Resized { width: 640, height: 480 });
        frame.push_event(InputEvent::Quit);
        assert_eq!(
            frame.events,
            vec![InputEvent::Resized { width: 640, height: 480 }, InputEvent::Quit]
        );
    }
}
