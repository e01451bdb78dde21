//! Overlay Models
//!
//! The observable state behind the overlay. Each model owns one
//! [`PropertyDispatcher`](crate::dispatch::PropertyDispatcher) and a closed
//! property enum; widgets register with the dispatcher of the model they
//! draw.

mod keyboard;
mod mouse;

pub use keyboard::{Key, KeyboardModel, KeyboardProperty};
pub use mouse::{MouseButton, MouseModel, MouseProperty, Point};

use tracing::trace;

use crate::config::Config;
use crate::error::DispatchError;
use crate::input::InputEvent;

/// Keyboard and mouse models driven by one stream of input events.
#[derive(Debug, Default)]
pub struct InputModels {
    pub keyboard: KeyboardModel,
    pub mouse: MouseModel,
}

impl InputModels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            keyboard: KeyboardModel::with_config(config),
            mouse: MouseModel::with_config(config),
        }
    }

    /// Route one event to the model it concerns.
    ///
    /// Returns the number of observer deliveries the event caused.
    pub fn apply(&mut self, event: &InputEvent) -> Result<usize, DispatchError> {
        trace!(?event, "applying input event");
        match event {
            InputEvent::KeyPressed(key) => self.keyboard.key_pressed(key),
            InputEvent::KeyReleased(key) => self.keyboard.key_released(key),
            InputEvent::ButtonPressed(button) => self.mouse.button_pressed(*button),
            InputEvent::ButtonReleased(button) => self.mouse.button_released(*button),
            InputEvent::MouseMoved(point) => self.mouse.moved(*point),
            InputEvent::Scrolled(delta) => self.mouse.scrolled(*delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_events_to_models() {
        let mut models = InputModels::new();

        models.apply(&InputEvent::KeyPressed(Key::Ctrl)).unwrap();
        models.apply(&InputEvent::ButtonPressed(MouseButton::Left)).unwrap();
        models.apply(&InputEvent::MouseMoved(Point::new(4, 2))).unwrap();
        models.apply(&InputEvent::Scrolled(-2)).unwrap();

        assert!(models.keyboard.is_held(&Key::Ctrl));
        assert!(models.mouse.is_pressed(MouseButton::Left));
        assert_eq!(models.mouse.position(), Point::new(4, 2));
        assert_eq!(models.mouse.scroll(), -2);
    }

    #[test]
    fn models_use_separate_sources() {
        let models = InputModels::new();
        assert_ne!(
            models.keyboard.dispatcher().source(),
            models.mouse.dispatcher().source()
        );
    }
}
