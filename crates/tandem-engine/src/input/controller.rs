use gilrs::{GamepadId, Gilrs};

/// Handle on the first connected gamepad, held open while the window lives.
///
/// Only opened and closed; its state is never polled.
pub struct Controller {
    gilrs: Gilrs,
    active: Option<GamepadId>,
}

impl Controller {
    /// Starts the gamepad backend and claims the first connected pad.
    ///
    /// Returns `None` when the backend cannot start at all. A platform
    /// without gamepad support still yields a handle, with no pad.
    pub fn open() -> Option<Self> {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => gilrs,
            Err(gilrs::Error::NotImplemented(dummy)) => {
                log::info!("gamepads are not supported on this platform");
                dummy
            }
            Err(err) => {
                log::warn!("gamepad backend failed to start: {err}");
                return None;
            }
        };

        let active = first_connected(gilrs.gamepads().map(|(id, pad)| (id, pad.is_connected())));
        match active {
            Some(id) => log::info!("controller opened: {}", gilrs.gamepad(id).name()),
            None => log::info!("no controller connected"),
        }

        Some(Self { gilrs, active })
    }

    pub fn active(&self) -> Option<GamepadId> {
        self.active
    }

    pub fn name(&self) -> Option<String> {
        self.active.map(|id| self.gilrs.gamepad(id).name().to_string())
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if let Some(name) = self.name() {
            log::info!("controller closed: {name}");
        }
    }
}

/// First id whose pad reports connected, in enumeration order.
fn first_connected<T>(pads: impl IntoIterator<Item = (T, bool)>) -> Option<T> {
    pads.into_iter()
        .find(|(_, connected)| *connected)
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_connected_pad() {
        assert_eq!(first_connected([(3, false), (5, true), (7, true)]), Some(5));
    }

    #[test]
    fn no_connected_pad_is_none() {
        assert_eq!(first_connected([(0, false), (1, false)]), None);
        assert_eq!(first_connected(Vec::<(u32, bool)>::new()), None);
    }
}
