//! Property Dispatcher
//!
//! The dispatcher is the piece every model embeds to tell observers that one
//! of its properties changed.
//!
//! # How Dispatch Works
//!
//! 1. Observers register during setup. Each registration rebuilds a cached,
//!    read-only snapshot of the observer list.
//!
//! 2. A model calls one of the `try_notify*` methods with the previous and
//!    current value of a property. Equal values are dropped on the spot: no
//!    record is built and no observer is touched.
//!
//! 3. Different values become a [`ChangeRecord`] that is handed to every
//!    observer in the snapshot, in registration order.
//!
//! # Re-entrancy
//!
//! Every method takes `&self`. Dispatch clones the snapshot handle before
//! the first delivery, so an observer that registers, removes, or notifies
//! from inside its callback never changes the delivery already in flight.
//!
//! # Thread Safety
//!
//! None. The dispatcher is `!Send` and belongs to the thread that processes
//! input and paints the overlay. Events captured elsewhere are marshaled
//! through [`crate::input`] first.

use std::cell::{Cell, RefCell};
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::change::{ChangeRecord, PropertyKey, SourceId};
use super::observer::{Observer, ObserverId};
use crate::config::{Config, FailurePolicy};
use crate::error::DispatchError;

/// Running totals kept by a dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Change records built.
    pub records: u64,
    /// Observer callbacks invoked.
    pub deliveries: u64,
    /// Notifications dropped because old and new were equal.
    pub suppressed: u64,
}

type ObserverList<P> = Rc<[Rc<dyn Observer<P>>]>;

/// Change-suppressing fan-out for the properties of one model.
///
/// # Type Parameters
///
/// - `P`: The model's property enum.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = PropertyDispatcher::<KeyboardProperty>::new();
/// dispatcher.register_observer(widget);
///
/// dispatcher.try_notify(KeyboardProperty::Shift, false, true)?; // delivered
/// dispatcher.try_notify(KeyboardProperty::Shift, true, true)?;  // suppressed
/// ```
pub struct PropertyDispatcher<P: PropertyKey> {
    /// Identifier stamped on every record this dispatcher builds.
    source: SourceId,

    policy: FailurePolicy,

    /// Registered observers, deduplicated by identity, in registration order.
    observers: RefCell<IndexMap<ObserverId, Rc<dyn Observer<P>>>>,

    /// Flattened copy of `observers`, rebuilt on registration and removal
    /// only, so dispatch never allocates for iteration.
    snapshot: RefCell<ObserverList<P>>,

    stats: Cell<DispatchStats>,
}

impl<P: PropertyKey> PropertyDispatcher<P> {
    /// Create a dispatcher that logs observer failures and keeps going.
    pub fn new() -> Self {
        Self::with_policy(FailurePolicy::default())
    }

    /// Create a dispatcher with an explicit failure policy.
    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            source: SourceId::new(),
            policy,
            observers: RefCell::new(IndexMap::new()),
            snapshot: RefCell::new(Rc::from(Vec::new())),
            stats: Cell::new(DispatchStats::default()),
        }
    }

    /// Create a dispatcher from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_policy(config.failure_policy)
    }

    /// Get the source ID carried by this dispatcher's records.
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Get the policy applied when an observer fails.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Get the number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Check whether `observer` is currently registered.
    pub fn contains<O: ?Sized>(&self, observer: &Rc<O>) -> bool {
        self.observers.borrow().contains_key(&ObserverId::of(observer))
    }

    /// Get the running totals since construction.
    pub fn stats(&self) -> DispatchStats {
        self.stats.get()
    }

    /// Register an observer.
    ///
    /// Registering an observer that is already present has no effect, so no
    /// observer ever receives the same record twice. Returns whether the
    /// observer was newly added.
    pub fn register_observer(&self, observer: Rc<dyn Observer<P>>) -> bool {
        let id = ObserverId::of(&observer);
        {
            let mut observers = self.observers.borrow_mut();
            if observers.contains_key(&id) {
                trace!(source = self.source.raw(), ?id, "observer already registered");
                return false;
            }
            observers.insert(id, observer);
        }

        self.rebuild_snapshot();
        debug!(
            source = self.source.raw(),
            ?id,
            count = self.observer_count(),
            "observer registered"
        );
        true
    }

    /// Register an observer that may be absent. `None` is a no-op.
    pub fn register_optional(&self, observer: Option<Rc<dyn Observer<P>>>) -> bool {
        match observer {
            Some(observer) => self.register_observer(observer),
            None => false,
        }
    }

    /// Remove a previously registered observer.
    ///
    /// The relative order of the remaining observers is preserved. Returns
    /// whether anything was removed.
    pub fn remove_observer<O: ?Sized>(&self, observer: &Rc<O>) -> bool {
        let id = ObserverId::of(observer);
        let removed = self.observers.borrow_mut().shift_remove(&id).is_some();

        if removed {
            self.rebuild_snapshot();
            debug!(
                source = self.source.raw(),
                ?id,
                count = self.observer_count(),
                "observer removed"
            );
        }
        removed
    }

    /// Deliver a change to every observer, whether or not the values differ.
    ///
    /// This is the low-level primitive; callers wanting suppression use the
    /// `try_notify*` family. Returns the number of observers called.
    pub fn notify(
        &self,
        property: P,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Result<usize, DispatchError> {
        let name = checked_name(property)?;

        // Hold our own handle so registrations made by observers during
        // delivery only affect the next dispatch.
        let snapshot = Rc::clone(&*self.snapshot.borrow());
        let change = ChangeRecord::new(self.source, property, old_value.into(), new_value.into());
        self.record(|stats| stats.records += 1);

        trace!(
            source = self.source.raw(),
            property = name,
            old = change.old_value(),
            new = change.new_value(),
            observers = snapshot.len(),
            "dispatching change"
        );

        let mut delivered = 0;
        for (position, observer) in snapshot.iter().enumerate() {
            let outcome = observer.property_changed(&change);
            delivered += 1;
            self.record(|stats| stats.deliveries += 1);

            if let Err(source) = outcome {
                match self.policy {
                    FailurePolicy::Continue => {
                        warn!(
                            source = self.source.raw(),
                            property = name,
                            position,
                            error = %source,
                            "observer failed; continuing delivery"
                        );
                    }
                    FailurePolicy::Abort => {
                        return Err(DispatchError::Observer {
                            property: name,
                            position,
                            source,
                        });
                    }
                }
            }
        }

        Ok(delivered)
    }

    /// Deliver a boolean change unless `old_value == new_value`.
    ///
    /// Values reach observers as `"true"` / `"false"`. A suppressed call
    /// builds nothing, allocates nothing, and returns `Ok(0)`.
    pub fn try_notify(
        &self,
        property: P,
        old_value: bool,
        new_value: bool,
    ) -> Result<usize, DispatchError> {
        self.try_notify_with(property, &old_value, &new_value)
    }

    /// Deliver a change of any comparable value unless the values are equal.
    ///
    /// Values reach observers in their `Display` form.
    pub fn try_notify_with<V>(
        &self,
        property: P,
        old_value: &V,
        new_value: &V,
    ) -> Result<usize, DispatchError>
    where
        V: PartialEq + Display + ?Sized,
    {
        checked_name(property)?;
        if old_value == new_value {
            self.suppress(property);
            return Ok(0);
        }
        self.notify(property, old_value.to_string(), new_value.to_string())
    }

    /// Deliver a change of serializable values, encoded as JSON text.
    ///
    /// Like [`notify`](Self::notify), this never suppresses.
    pub fn notify_serialized<V>(
        &self,
        property: P,
        old_value: &V,
        new_value: &V,
    ) -> Result<usize, DispatchError>
    where
        V: Serialize + ?Sized,
    {
        let name = checked_name(property)?;
        let encode = |value: &V| {
            serde_json::to_string(value).map_err(|source| DispatchError::Encode {
                property: name,
                source,
            })
        };
        let old_value = encode(old_value)?;
        let new_value = encode(new_value)?;
        self.notify(property, old_value, new_value)
    }

    /// Deliver a change of serializable values unless they compare equal.
    pub fn try_notify_serialized<V>(
        &self,
        property: P,
        old_value: &V,
        new_value: &V,
    ) -> Result<usize, DispatchError>
    where
        V: PartialEq + Serialize + ?Sized,
    {
        checked_name(property)?;
        if old_value == new_value {
            self.suppress(property);
            return Ok(0);
        }
        self.notify_serialized(property, old_value, new_value)
    }

    fn suppress(&self, property: P) {
        self.record(|stats| stats.suppressed += 1);
        trace!(
            source = self.source.raw(),
            property = property.name(),
            "suppressed unchanged value"
        );
    }

    fn rebuild_snapshot(&self) {
        let flattened: ObserverList<P> = self.observers.borrow().values().cloned().collect();
        *self.snapshot.borrow_mut() = flattened;
    }

    fn record(&self, update: impl FnOnce(&mut DispatchStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

/// Reject identifiers without a usable name before anything is built.
fn checked_name<P: PropertyKey>(property: P) -> Result<&'static str, DispatchError> {
    let name = property.name();
    if name.is_empty() {
        return Err(DispatchError::InvalidProperty {
            debug: format!("{property:?}"),
        });
    }
    Ok(name)
}

impl<P: PropertyKey> Default for PropertyDispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PropertyKey> Debug for PropertyDispatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDispatcher")
            .field("source", &self.source)
            .field("policy", &self.policy)
            .field("observer_count", &self.observer_count())
            .field("stats", &self.stats())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
