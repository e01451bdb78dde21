//! # Input Event Types
//!
//! The vocabulary the capture layer speaks. Events are plain data so they can
//! cross threads and be recorded or replayed as JSON.
//!
//! ```rust,ignore
//! let event: InputEvent = serde_json::from_str(r#"{"key_pressed":"shift"}"#)?;
//! models.apply(&event)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::model::{Key, MouseButton, Point};

/// One raw keyboard or mouse event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    ButtonPressed(MouseButton),
    ButtonReleased(MouseButton),
    MouseMoved(Point),
    /// Wheel movement in notches; negative scrolls up.
    Scrolled(i32),
}
