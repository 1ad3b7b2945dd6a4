// External lifecycle handlers registered through the annotator

use std::cell::RefCell;
use std::rc::Rc;

use annotator_wasm::{Annotation, Annotator, Event, EventType, Geometry, ImageHandle, Shape, StateKind};

fn annotator() -> Annotator {
    Annotator::new(ImageHandle::new("map.png", 300.0, 200.0))
}

type Log = Rc<RefCell<Vec<String>>>;

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn test_handlers_fire_in_registration_order() {
    let mut annotator = annotator();
    let calls = log();

    for name in ["first", "second", "third"] {
        let calls = calls.clone();
        annotator.add_handler(EventType::MouseOverAnnotatableMedia, move |_, _| {
            calls.borrow_mut().push(name.to_string());
        });
    }

    annotator.pointer_enter().unwrap();
    assert_eq!(*calls.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn test_fire_without_listeners_is_noop() {
    let mut annotator = annotator();
    annotator.fire_event(Event::MouseOutOfAnnotatableMedia).unwrap();
    assert_eq!(annotator.state_kind(), StateKind::Idle);
}

#[test]
fn test_handlers_see_post_transition_state() {
    let mut annotator = annotator();
    let seen = Rc::new(RefCell::new(None));

    let sink = seen.clone();
    annotator.add_handler(EventType::AnnotationEditSave, move |annotator, _| {
        *sink.borrow_mut() = Some((annotator.state_kind(), annotator.annotations().len()));
    });

    annotator.pointer_down(1.0, 1.0).unwrap();
    annotator.pointer_up(20.0, 20.0).unwrap();
    annotator.save_edit().unwrap();

    assert_eq!(*seen.borrow(), Some((StateKind::Idle, 1)));
}

#[test]
fn test_rejected_event_reaches_no_handler() {
    let mut annotator = annotator();
    let calls = log();

    let sink = calls.clone();
    annotator.add_handler(EventType::AnnotationEditCancel, move |_, _| {
        sink.borrow_mut().push("cancel".to_string());
    });

    assert!(annotator.fire_event(Event::AnnotationEditCancel).is_err());
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_handler_added_during_fire_waits_for_next_pass() {
    let mut annotator = annotator();
    let calls = log();

    let outer = calls.clone();
    annotator.add_handler(EventType::MouseOverAnnotatableMedia, move |annotator, _| {
        outer.borrow_mut().push("outer".to_string());
        let inner = outer.clone();
        annotator.add_handler(EventType::MouseOverAnnotatableMedia, move |_, _| {
            inner.borrow_mut().push("inner".to_string());
        });
    });

    annotator.pointer_enter().unwrap();
    assert_eq!(*calls.borrow(), vec!["outer"]);

    annotator.pointer_enter().unwrap();
    assert_eq!(*calls.borrow(), vec!["outer", "outer", "inner"]);
}

#[test]
fn test_handler_can_drive_the_annotator() {
    // auto-save every selection with a fixed label
    let mut annotator = annotator();
    annotator.add_handler(EventType::SelectionCompleted, |annotator, _| {
        annotator.set_editor_text("auto").unwrap();
        annotator.save_edit().unwrap();
    });

    annotator.pointer_down(10.0, 10.0).unwrap();
    annotator.pointer_up(40.0, 30.0).unwrap();

    assert_eq!(annotator.state_kind(), StateKind::Idle);
    assert_eq!(annotator.annotations().len(), 1);
    assert_eq!(annotator.annotations()[0].text, "auto");
    assert_eq!(
        annotator.annotations()[0].shape.geometry,
        Geometry::new(10.0, 10.0, 30.0, 20.0)
    );
}

#[test]
fn test_self_refiring_handler_is_not_reentered() {
    let mut annotator = annotator();
    let count = Rc::new(RefCell::new(0));

    let counter = count.clone();
    annotator.add_handler(EventType::MouseOverAnnotatableMedia, move |annotator, _| {
        *counter.borrow_mut() += 1;
        annotator.fire_event(Event::MouseOverAnnotatableMedia).unwrap();
    });

    annotator.pointer_enter().unwrap();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_delete_fired_from_any_state() {
    let mut annotator = annotator();
    let a = Annotation::new(Shape::rect(Geometry::new(0.0, 0.0, 10.0, 10.0)), "old");
    annotator.add_annotation(a.clone());

    annotator.pointer_down(50.0, 50.0).unwrap();
    annotator.pointer_up(80.0, 80.0).unwrap();
    assert_eq!(annotator.state_kind(), StateKind::Editing);

    annotator.fire_event(Event::PopupBtnDelete { annotation: a }).unwrap();
    assert!(annotator.annotations().is_empty());
    assert_eq!(annotator.state_kind(), StateKind::Editing);
}
