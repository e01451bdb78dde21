//! Property Dispatch
//!
//! This module implements the change-suppressing publish/subscribe layer
//! that every overlay model uses to keep its widgets in sync.
//!
//! # Concepts
//!
//! ## Property Keys
//!
//! Each model defines a small enum of the attributes it exposes (a modifier
//! being held, the pointer position, ...). The enum implements
//! [`PropertyKey`] to give each variant a stable name.
//!
//! ## Change Records
//!
//! A [`ChangeRecord`] is built only when a value really changed. It names the
//! source dispatcher, the property, and the old and new values as text.
//!
//! ## Observers
//!
//! An [`Observer`] is registered once, by `Rc`, and is identified by that
//! allocation. The same observer registered twice still hears each change
//! once.

mod change;
mod dispatcher;
mod observer;

pub use change::{ChangeRecord, PropertyKey, SourceId};
pub use dispatcher::{DispatchStats, PropertyDispatcher};
pub use observer::{FnObserver, Observer, ObserverId};
