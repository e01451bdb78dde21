//! Keyboard Model
//!
//! Tracks the three modifier keys, the regular key currently shown on the
//! overlay, and how many times in a row that key has been pressed.
//!
//! # Repeats
//!
//! Holding a key makes the OS deliver the same press over and over. Those
//! presses must not look like new key strokes to the widgets, so the key
//! label is dispatched only when it changes. Each repeated press instead
//! bumps a counter, and the counter is dispatched under its own property.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::dispatch::{PropertyDispatcher, PropertyKey};
use crate::error::DispatchError;

/// A key as reported by the capture layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Shift,
    Ctrl,
    Alt,
    /// Any non-modifier key, carrying the label to display.
    Regular(String),
}

impl Key {
    pub fn regular(label: impl Into<String>) -> Self {
        Key::Regular(label.into())
    }
}

/// Observable attributes of [`KeyboardModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardProperty {
    Shift,
    Ctrl,
    Alt,
    /// Label of the held regular key, empty when none is held.
    Regular,
    /// Consecutive presses of the last regular key.
    RepeatCount,
}

impl PropertyKey for KeyboardProperty {
    fn name(&self) -> &'static str {
        match self {
            KeyboardProperty::Shift => "KEY_SHIFT",
            KeyboardProperty::Ctrl => "KEY_CTRL",
            KeyboardProperty::Alt => "KEY_ALT",
            KeyboardProperty::Regular => "KEY_REGULAR",
            KeyboardProperty::RepeatCount => "KEY_REPEAT_COUNT",
        }
    }
}

/// Keyboard state plus the dispatcher that announces its changes.
#[derive(Debug)]
pub struct KeyboardModel {
    dispatcher: PropertyDispatcher<KeyboardProperty>,
    shift: bool,
    ctrl: bool,
    alt: bool,
    regular: String,
    /// Last regular key pressed, kept after release for repeat counting.
    last_regular: Option<String>,
    repeat_count: u32,
    max_repeat_count: u32,
}

impl KeyboardModel {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            dispatcher: PropertyDispatcher::from_config(config),
            shift: false,
            ctrl: false,
            alt: false,
            regular: String::new(),
            last_regular: None,
            repeat_count: 0,
            max_repeat_count: config.max_repeat_count,
        }
    }

    /// The dispatcher observers register with.
    pub fn dispatcher(&self) -> &PropertyDispatcher<KeyboardProperty> {
        &self.dispatcher
    }

    /// Whether the given key is currently held.
    pub fn is_held(&self, key: &Key) -> bool {
        match key {
            Key::Shift => self.shift,
            Key::Ctrl => self.ctrl,
            Key::Alt => self.alt,
            Key::Regular(label) => !self.regular.is_empty() && self.regular == *label,
        }
    }

    /// Label of the held regular key, empty when none is held.
    pub fn regular(&self) -> &str {
        &self.regular
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// Apply a key press. Returns the number of observer deliveries made.
    pub fn key_pressed(&mut self, key: &Key) -> Result<usize, DispatchError> {
        match key {
            Key::Regular(label) => self.regular_pressed(label),
            modifier => self.set_modifier(modifier, true),
        }
    }

    /// Apply a key release. Returns the number of observer deliveries made.
    pub fn key_released(&mut self, key: &Key) -> Result<usize, DispatchError> {
        match key {
            Key::Regular(label) => {
                if self.regular != *label {
                    return Ok(0);
                }
                let old = mem::take(&mut self.regular);
                self.dispatcher.try_notify_with(KeyboardProperty::Regular, old.as_str(), "")
            }
            modifier => self.set_modifier(modifier, false),
        }
    }

    fn set_modifier(&mut self, key: &Key, held: bool) -> Result<usize, DispatchError> {
        let (flag, property) = match key {
            Key::Shift => (&mut self.shift, KeyboardProperty::Shift),
            Key::Ctrl => (&mut self.ctrl, KeyboardProperty::Ctrl),
            Key::Alt => (&mut self.alt, KeyboardProperty::Alt),
            Key::Regular(_) => return Ok(0),
        };
        let old = mem::replace(flag, held);
        self.dispatcher.try_notify(property, old, held)
    }

    fn regular_pressed(&mut self, label: &str) -> Result<usize, DispatchError> {
        let old_count = self.repeat_count;
        let new_count = if self.last_regular.as_deref() == Some(label) {
            old_count.saturating_add(1).min(self.max_repeat_count)
        } else {
            1
        };
        self.repeat_count = new_count;
        self.last_regular = Some(label.to_owned());

        let old = mem::replace(&mut self.regular, label.to_owned());

        // Send the counter even when the label dispatch aborts; first error wins.
        let label_sent =
            self.dispatcher.try_notify_with(KeyboardProperty::Regular, old.as_str(), label);
        let count_sent =
            self.dispatcher.try_notify_with(KeyboardProperty::RepeatCount, &old_count, &new_count);
        Ok(label_sent? + count_sent?)
    }
}

impl Default for KeyboardModel {
    fn default() -> Self {
        Self::new()
    }
}
