//! KmCaster Core
//!
//! This crate provides the observable state behind the KmCaster overlay,
//! which shows keyboard and mouse activity on screen. It implements:
//!
//! - A change-suppressing property dispatcher
//! - Keyboard and mouse models built on that dispatcher
//! - A channel for moving captured input onto the model thread
//!
//! Capturing input from the operating system and painting the overlay are
//! left to the embedding application.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `dispatch`: Property keys, change records, observers, and the dispatcher
//! - `model`: Keyboard and mouse state
//! - `input`: Raw input events and the event pump
//! - `config`: Configuration loaded from JSON
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use kmcaster_core::dispatch::{ChangeRecord, FnObserver};
//! use kmcaster_core::input::{event_channel, InputEvent};
//! use kmcaster_core::model::{InputModels, Key, KeyboardProperty};
//!
//! let mut models = InputModels::new();
//! models.keyboard.dispatcher().register_observer(Rc::new(FnObserver::new(
//!     |change: &ChangeRecord<KeyboardProperty>| {
//!         println!("{}: {} -> {}", change.property_id(), change.old_value(), change.new_value());
//!         Ok(())
//!     },
//! )));
//!
//! let (sender, mut pump) = event_channel();
//! sender.send(InputEvent::KeyPressed(Key::Shift))?;
//! sender.send(InputEvent::KeyPressed(Key::Shift))?; // held: suppressed
//! pump.drain(&mut models)?;
//! // Prints once: "KEY_SHIFT: false -> true"
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod model;

pub use config::{Config, FailurePolicy};
pub use error::{ConfigError, DispatchError, InputError, ObserverError};
