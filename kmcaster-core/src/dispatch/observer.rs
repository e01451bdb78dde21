//! Observer types for the dispatch layer.
//!
//! An Observer is anything that wants to hear about property changes,
//! typically a widget that redraws a key cap or a mouse button.

use std::rc::Rc;

use super::change::ChangeRecord;
use crate::error::ObserverError;

/// Identity of a registered observer.
///
/// Derived from the address of the observer's `Rc` allocation, so every clone
/// of one `Rc` maps to the same ID while distinct allocations never collide
/// for as long as the dispatcher keeps them alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

impl ObserverId {
    /// Get the ID of the observer behind `observer`.
    pub fn of<O: ?Sized>(observer: &Rc<O>) -> Self {
        Self(Rc::as_ptr(observer).cast::<()>() as usize)
    }
}

/// Receiver of change records.
pub trait Observer<P> {
    /// Called synchronously, once per delivered change.
    fn property_changed(&self, change: &ChangeRecord<P>) -> Result<(), ObserverError>;
}

/// An observer backed by a closure.
///
/// ```rust,ignore
/// let observer = Rc::new(FnObserver::new(|change: &ChangeRecord<KeyboardProperty>| {
///     println!("{} -> {}", change.property_id(), change.new_value());
///     Ok(())
/// }));
/// dispatcher.register_observer(observer);
/// ```
pub struct FnObserver<F> {
    /// The callback to invoke for each change.
    callback: F,
}

impl<F> FnObserver<F> {
    /// Wrap the given callback.
    pub fn new<P>(callback: F) -> Self
    where
        F: Fn(&ChangeRecord<P>) -> Result<(), ObserverError>,
    {
        Self { callback }
    }
}

impl<P, F> Observer<P> for FnObserver<F>
where
    F: Fn(&ChangeRecord<P>) -> Result<(), ObserverError>,
{
    fn property_changed(&self, change: &ChangeRecord<P>) -> Result<(), ObserverError> {
        (self.callback)(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::dispatch::change::{PropertyKey, SourceId};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Position;

    impl PropertyKey for Position {
        fn name(&self) -> &'static str {
            "POSITION"
        }
    }

    #[test]
    fn observer_id_follows_allocation() {
        let a = Rc::new(FnObserver::new(|_: &ChangeRecord<Position>| Ok(())));
        let b = Rc::new(FnObserver::new(|_: &ChangeRecord<Position>| Ok(())));

        assert_eq!(ObserverId::of(&a), ObserverId::of(&a.clone()));
        assert_ne!(ObserverId::of(&a), ObserverId::of(&b));
    }

    #[test]
    fn observer_id_survives_unsizing() {
        let concrete = Rc::new(FnObserver::new(|_: &ChangeRecord<Position>| Ok(())));
        let erased: Rc<dyn Observer<Position>> = concrete.clone();

        assert_eq!(ObserverId::of(&concrete), ObserverId::of(&erased));
    }

    #[test]
    fn fn_observer_calls_callback() {
        let seen = Rc::new(Cell::new(0));
        let seen_clone = seen.clone();
        let observer = FnObserver::new(move |change: &ChangeRecord<Position>| {
            assert_eq!(change.property_id(), "POSITION");
            seen_clone.set(seen_clone.get() + 1);
            Ok(())
        });

        let change = ChangeRecord::new(SourceId::new(), Position, "1".into(), "2".into());
        observer.property_changed(&change).unwrap();
        assert_eq!(seen.get(), 1);
    }
}
