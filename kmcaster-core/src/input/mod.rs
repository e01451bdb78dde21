//! Input Marshaling
//!
//! Raw keyboard and mouse events, and the channel that carries them from the
//! capture thread to the thread that owns the models. Capturing the events
//! from the operating system is left to the embedding application.

mod events;
mod pump;

pub use events::InputEvent;
pub use pump::{event_channel, EventPump, InputSender};
