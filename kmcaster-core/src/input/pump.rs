//! Event Pump
//!
//! Global input hooks usually call back on a thread of their own, while the
//! models and their observers live on the UI thread. The pump is the bridge:
//! the hook thread holds an [`InputSender`], the UI thread owns the
//! [`EventPump`] and applies events to the models one at a time.

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use super::events::InputEvent;
use crate::error::InputError;
use crate::model::InputModels;

/// Create a connected sender/pump pair.
pub fn event_channel() -> (InputSender, EventPump) {
    let (tx, rx) = mpsc::unbounded_channel();
    (InputSender { tx }, EventPump { rx })
}

/// Sending half, safe to move to the capture thread and to clone.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: UnboundedSender<InputEvent>,
}

impl InputSender {
    /// Queue an event for the owning thread.
    pub fn send(&self, event: InputEvent) -> Result<(), InputError> {
        self.tx.send(event).map_err(|_| InputError::Closed)
    }

    /// Whether the pump has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half, owned by the thread that owns the models.
#[derive(Debug)]
pub struct EventPump {
    rx: UnboundedReceiver<InputEvent>,
}

impl EventPump {
    /// Apply every event queued so far without waiting for more.
    ///
    /// Returns the number of events applied.
    pub fn drain(&mut self, models: &mut InputModels) -> Result<usize, InputError> {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    models.apply(&event)?;
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        Ok(applied)
    }

    /// Apply events as they arrive until every sender has been dropped.
    ///
    /// Stops at the first dispatch error. Returns the number of events
    /// applied.
    pub async fn run(mut self, models: &mut InputModels) -> Result<usize, InputError> {
        let mut applied = 0;
        while let Some(event) = self.rx.recv().await {
            models.apply(&event)?;
            applied += 1;
        }
        debug!(applied, "all input senders closed");
        Ok(applied)
    }
}
