//! Tests for change notification when the viewport is resized.

use std::cell::RefCell;
use std::rc::Rc;

use breakpoint_test::prelude::*;

#[test]
fn test_every_handle_called_once_on_large_transition() {
    init_tracing();
    let (viewport, broadcaster) = viewport_at(500.0);
    let tracker = CallTracker::new();
    for name in ["drawer", "shader", "menu"] {
        broadcaster.subscribe(&tracker.handle(name));
    }

    viewport.set_width(1920.0);

    assert_eq!(tracker.called_names(), vec!["drawer", "shader", "menu"]);
    assert_eq!(broadcaster.current().is_large, Some(true));
}

#[test]
fn test_binding_reflects_new_state() {
    let (viewport, broadcaster) = viewport_at(500.0);
    let screen = use_screen_size(&broadcaster);
    assert_eq!(screen.get().is_xsmall, Some(true));

    viewport.set_width(1920.0);
    assert_eq!(screen.get().is_large, Some(true));
    assert_eq!(screen.get().is_xsmall, Some(false));
    assert_eq!(screen.version(), 1);
}

#[test]
fn test_shrinking_across_one_boundary() {
    let (viewport, broadcaster) = viewport_at(1000.0);
    let tracker = CallTracker::new();
    broadcaster.subscribe(&tracker.handle("layout"));

    // medium stops matching, small starts matching
    viewport.set_width(800.0);
    assert_eq!(tracker.call_count(), 1);

    // still small
    viewport.set_width(700.0);
    assert_eq!(tracker.call_count(), 1);
}

#[test]
fn test_no_filtering_by_query() {
    let (viewport, broadcaster) = viewport_at(500.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let handle = Handle::new({
        let seen = seen.clone();
        let broadcaster = broadcaster.clone();
        move || seen.borrow_mut().push(broadcaster.current().active())
    });
    broadcaster.subscribe(&handle);

    for width in [700.0, 1000.0, 1500.0, 300.0] {
        viewport.set_width(width);
    }

    assert_eq!(
        *seen.borrow(),
        vec![
            Some(Breakpoint::Small),
            Some(Breakpoint::Medium),
            Some(Breakpoint::Large),
            Some(Breakpoint::XSmall),
        ]
    );
    broadcaster.unsubscribe(&handle);
}

#[test]
fn test_registration_order_is_call_order() {
    let (viewport, broadcaster) = viewport_at(500.0);
    let tracker = CallTracker::new();
    let a = tracker.handle("a");
    let b = tracker.handle("b");
    let c = tracker.handle("c");
    broadcaster.subscribe(&b);
    broadcaster.subscribe(&a);
    broadcaster.subscribe(&c);
    broadcaster.unsubscribe(&a);
    broadcaster.subscribe(&a);

    viewport.set_width(1300.0);
    assert_eq!(tracker.called_names(), vec!["b", "c", "a"]);
}

#[test]
fn test_unsubscribe_during_dispatch_keeps_snapshot() {
    let (viewport, broadcaster) = viewport_at(500.0);
    let tracker = CallTracker::new();
    let second = tracker.handle("second");
    let first = tracker.handle_with("first", {
        let broadcaster = broadcaster.clone();
        let second = second.clone();
        move || broadcaster.unsubscribe(&second)
    });
    broadcaster.subscribe(&first);
    broadcaster.subscribe(&second);

    viewport.set_width(1300.0);
    assert_eq!(tracker.called_names(), vec!["first", "second"]);
    assert!(!broadcaster.is_subscribed(&second));

    tracker.reset();
    viewport.set_width(500.0);
    assert_eq!(tracker.called_names(), vec!["first"]);

    broadcaster.unsubscribe(&first);
}

#[test]
fn test_forced_notify() {
    let (_viewport, broadcaster) = viewport_at(500.0);
    let tracker = CallTracker::new();
    broadcaster.subscribe(&tracker.handle("layout"));

    broadcaster.notify();
    assert_eq!(tracker.count_of("layout"), 1);
}
