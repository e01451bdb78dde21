//! Error types shared across the crate.

use thiserror::Error;

/// Failure reported by an observer while handling a change record.
///
/// Observers build these themselves; the dispatcher only decides whether a
/// failure stops the remaining deliveries (see [`FailurePolicy`]).
///
/// [`FailurePolicy`]: crate::config::FailurePolicy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    /// Create an observer error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message supplied by the observer.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors surfaced by [`PropertyDispatcher`](crate::dispatch::PropertyDispatcher).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The property identifier has no usable string form.
    #[error("property identifier {debug} has an empty name")]
    InvalidProperty { debug: String },

    /// An observer failed and the dispatcher is configured to abort.
    #[error("observer #{position} failed handling \"{property}\": {source}")]
    Observer {
        property: &'static str,
        position: usize,
        #[source]
        source: ObserverError,
    },

    /// A value could not be encoded for delivery.
    #[error("failed to encode value for \"{property}\": {source}")]
    Encode {
        property: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors produced while loading [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_repeat_count must be at least 1")]
    ZeroRepeatLimit,
}

/// Errors produced by the input marshaling channel.
#[derive(Debug, Error)]
pub enum InputError {
    /// The event pump on the owning thread has been dropped.
    #[error("input event pump is closed")]
    Closed,

    /// Applying an event to the models failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
