//! Mouse Model
//!
//! Tracks button state, pointer position, and the accumulated wheel offset.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::dispatch::{PropertyDispatcher, PropertyKey};
use crate::error::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// The property announcing this button's state.
    pub fn property(self) -> MouseProperty {
        match self {
            MouseButton::Left => MouseProperty::Left,
            MouseButton::Middle => MouseProperty::Middle,
            MouseButton::Right => MouseProperty::Right,
        }
    }

    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// Pointer position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Observable attributes of [`MouseModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseProperty {
    Left,
    Middle,
    Right,
    /// Pointer position, delivered as JSON (`{"x":..,"y":..}`).
    Position,
    /// Accumulated wheel offset.
    Scroll,
}

impl PropertyKey for MouseProperty {
    fn name(&self) -> &'static str {
        match self {
            MouseProperty::Left => "MOUSE_LEFT",
            MouseProperty::Middle => "MOUSE_MIDDLE",
            MouseProperty::Right => "MOUSE_RIGHT",
            MouseProperty::Position => "MOUSE_POSITION",
            MouseProperty::Scroll => "MOUSE_SCROLL",
        }
    }
}

/// Mouse state plus the dispatcher that announces its changes.
#[derive(Debug)]
pub struct MouseModel {
    dispatcher: PropertyDispatcher<MouseProperty>,
    buttons: [bool; 3],
    position: Point,
    scroll: i64,
}

impl MouseModel {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            dispatcher: PropertyDispatcher::from_config(config),
            buttons: [false; 3],
            position: Point::default(),
            scroll: 0,
        }
    }

    /// The dispatcher observers register with.
    pub fn dispatcher(&self) -> &PropertyDispatcher<MouseProperty> {
        &self.dispatcher
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn scroll(&self) -> i64 {
        self.scroll
    }

    pub fn button_pressed(&mut self, button: MouseButton) -> Result<usize, DispatchError> {
        self.set_button(button, true)
    }

    pub fn button_released(&mut self, button: MouseButton) -> Result<usize, DispatchError> {
        self.set_button(button, false)
    }

    /// Move the pointer. Reporting the current position again is silent.
    pub fn moved(&mut self, to: Point) -> Result<usize, DispatchError> {
        let old = mem::replace(&mut self.position, to);
        self.dispatcher.try_notify_serialized(MouseProperty::Position, &old, &to)
    }

    /// Apply one wheel movement; a zero delta is silent.
    pub fn scrolled(&mut self, delta: i32) -> Result<usize, DispatchError> {
        let old = self.scroll;
        self.scroll = old.saturating_add(i64::from(delta));
        self.dispatcher.try_notify_with(MouseProperty::Scroll, &old, &self.scroll)
    }

    fn set_button(&mut self, button: MouseButton, pressed: bool) -> Result<usize, DispatchError> {
        let old = mem::replace(&mut self.buttons[button.index()], pressed);
        self.dispatcher.try_notify(button.property(), old, pressed)
    }
}

impl Default for MouseModel {
    fn default() -> Self {
        Self::new()
    }
}
