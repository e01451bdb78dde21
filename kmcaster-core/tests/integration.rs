//! Integration Tests for Property Dispatch
//!
//! These tests drive the dispatcher and the models through the public API
//! only, the way the overlay's widgets and capture layer use them.

use std::cell::RefCell;
use std::rc::Rc;

use kmcaster_core::dispatch::{ChangeRecord, Observer, PropertyDispatcher, PropertyKey};
use kmcaster_core::input::{event_channel, InputEvent};
use kmcaster_core::model::{InputModels, Key, KeyboardProperty, MouseButton, Point};
use kmcaster_core::{Config, FailurePolicy, ObserverError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prop {
    KeyPressed,
    MouseX,
}

impl PropertyKey for Prop {
    fn name(&self) -> &'static str {
        match self {
            Prop::KeyPressed => "KEY_PRESSED",
            Prop::MouseX => "MOUSE_X",
        }
    }
}

/// A widget stand-in that keeps every record it was handed.
#[derive(Default)]
struct Widget {
    changes: RefCell<Vec<(String, String, String)>>,
}

impl Widget {
    fn received(&self) -> Vec<(String, String, String)> {
        self.changes.borrow().clone()
    }
}

impl<P> Observer<P> for Widget
where
    P: PropertyKey,
{
    fn property_changed(&self, change: &ChangeRecord<P>) -> Result<(), ObserverError> {
        self.changes.borrow_mut().push((
            change.property_id().to_owned(),
            change.old_value().to_owned(),
            change.new_value().to_owned(),
        ));
        Ok(())
    }
}

fn record(property: &str, old: &str, new: &str) -> (String, String, String) {
    (property.to_owned(), old.to_owned(), new.to_owned())
}

/// Unchanged values never reach any observer.
#[test]
fn unchanged_value_reaches_nobody() {
    let dispatcher = PropertyDispatcher::<Prop>::new();
    let a = Rc::new(Widget::default());
    let b = Rc::new(Widget::default());
    dispatcher.register_observer(a.clone());
    dispatcher.register_observer(b.clone());

    dispatcher.try_notify(Prop::KeyPressed, false, false).unwrap();

    assert!(a.received().is_empty());
    assert!(b.received().is_empty());
    assert_eq!(dispatcher.stats().records, 0);
}

/// A real change is delivered once, with text values.
#[test]
fn changed_value_reaches_observer() {
    let dispatcher = PropertyDispatcher::<Prop>::new();
    let a = Rc::new(Widget::default());
    dispatcher.register_observer(a.clone());

    dispatcher.try_notify(Prop::KeyPressed, false, true).unwrap();

    assert_eq!(a.received(), vec![record("KEY_PRESSED", "false", "true")]);
}

/// The same observer registered twice is still called once.
#[test]
fn double_registration_is_deduplicated() {
    let dispatcher = PropertyDispatcher::<Prop>::new();
    let a = Rc::new(Widget::default());
    dispatcher.register_observer(a.clone());
    dispatcher.register_observer(a.clone());

    dispatcher.try_notify(Prop::KeyPressed, false, true).unwrap();

    assert_eq!(a.received().len(), 1);
}

/// Dispatching with nobody listening is fine.
#[test]
fn notify_with_no_observers() {
    let dispatcher = PropertyDispatcher::<Prop>::new();
    assert_eq!(dispatcher.notify(Prop::MouseX, "10", "20").unwrap(), 0);
}

/// An absent observer is ignored and nothing fails.
#[test]
fn absent_observer_then_real_change() {
    let dispatcher = PropertyDispatcher::<Prop>::new();
    dispatcher.register_optional(None);

    assert_eq!(dispatcher.try_notify(Prop::KeyPressed, false, true).unwrap(), 0);
    assert_eq!(dispatcher.observer_count(), 0);
}

/// The caller feeds the prior value back in; the second call is a repeat.
#[test]
fn repeat_after_change_is_suppressed() {
    let dispatcher = PropertyDispatcher::<Prop>::new();
    let a = Rc::new(Widget::default());
    dispatcher.register_observer(a.clone());

    dispatcher.try_notify(Prop::KeyPressed, false, true).unwrap();
    dispatcher.try_notify(Prop::KeyPressed, true, true).unwrap();

    assert_eq!(a.received(), vec![record("KEY_PRESSED", "false", "true")]);
}

/// Observers hear about changes in the order they registered.
#[test]
fn delivery_follows_registration_order() {
    let order = Rc::new(RefCell::new(Vec::new()));

    struct Tagged {
        tag: usize,
        order: Rc<RefCell<Vec<usize>>>,
    }

    impl Observer<Prop> for Tagged {
        fn property_changed(&self, _: &ChangeRecord<Prop>) -> Result<(), ObserverError> {
            self.order.borrow_mut().push(self.tag);
            Ok(())
        }
    }

    let dispatcher = PropertyDispatcher::<Prop>::new();
    for tag in 0..5 {
        dispatcher.register_observer(Rc::new(Tagged {
            tag,
            order: order.clone(),
        }));
    }

    dispatcher.notify(Prop::MouseX, "0", "1").unwrap();
    assert_eq!(*order.borrow(), vec![0, 1, 2, 3, 4]);
}

/// Events captured on another thread end up as suppressed, ordered changes
/// on the model thread.
#[test]
fn captured_events_drive_widgets() {
    let mut models = InputModels::new();
    let keys = Rc::new(Widget::default());
    let mouse = Rc::new(Widget::default());
    models.keyboard.dispatcher().register_observer(keys.clone());
    models.mouse.dispatcher().register_observer(mouse.clone());

    let (sender, mut pump) = event_channel();
    std::thread::spawn(move || {
        let events = [
            InputEvent::KeyPressed(Key::Shift),
            InputEvent::KeyPressed(Key::Shift),
            InputEvent::KeyPressed(Key::regular("A")),
            InputEvent::KeyPressed(Key::regular("A")),
            InputEvent::KeyReleased(Key::regular("A")),
            InputEvent::KeyReleased(Key::Shift),
            InputEvent::ButtonPressed(MouseButton::Left),
            InputEvent::MouseMoved(Point::new(1, 1)),
            InputEvent::ButtonReleased(MouseButton::Left),
        ];
        for event in events {
            sender.send(event).unwrap();
        }
    })
    .join()
    .unwrap();

    assert_eq!(pump.drain(&mut models).unwrap(), 9);

    assert_eq!(
        keys.received(),
        vec![
            record("KEY_SHIFT", "false", "true"),
            record("KEY_REGULAR", "", "A"),
            record("KEY_REPEAT_COUNT", "0", "1"),
            record("KEY_REPEAT_COUNT", "1", "2"),
            record("KEY_REGULAR", "A", ""),
            record("KEY_SHIFT", "true", "false"),
        ]
    );
    assert_eq!(
        mouse.received(),
        vec![
            record("MOUSE_LEFT", "false", "true"),
            record("MOUSE_POSITION", r#"{"x":0,"y":0}"#, r#"{"x":1,"y":1}"#),
            record("MOUSE_LEFT", "true", "false"),
        ]
    );
    assert_eq!(models.keyboard.repeat_count(), 2);
}

/// Configuration flows into every model's dispatcher.
#[test]
fn configuration_reaches_dispatchers() {
    let config = Config::from_json(r#"{ "failure_policy": "abort" }"#).unwrap();
    let models = InputModels::with_config(&config);

    assert_eq!(models.keyboard.dispatcher().policy(), FailurePolicy::Abort);
    assert_eq!(models.mouse.dispatcher().policy(), FailurePolicy::Abort);
}

/// A widget can be detached and stops hearing about changes.
#[test]
fn removed_widget_is_not_updated() {
    let mut models = InputModels::new();
    let widget = Rc::new(Widget::default());
    models.keyboard.dispatcher().register_observer(widget.clone());

    models.keyboard.key_pressed(&Key::Alt).unwrap();
    assert!(models.keyboard.dispatcher().remove_observer(&widget));
    models.keyboard.key_released(&Key::Alt).unwrap();

    assert_eq!(widget.received(), vec![record(KeyboardProperty::Alt.name(), "false", "true")]);
}
