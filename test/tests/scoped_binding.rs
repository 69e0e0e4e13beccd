//! Tests for the scoped lifecycle of `ScreenSizeBinding`.

use std::cell::RefCell;
use std::rc::Rc;

use breakpoint_test::prelude::*;

#[test]
fn test_binding_released_at_end_of_scope() {
    let (viewport, broadcaster) = viewport_at(500.0);
    let tracker = CallTracker::new();
    let on_change = tracker.handle("screen");
    {
        let screen = ScreenSizeBinding::with_callback(&broadcaster, move |_| on_change.call());
        assert_eq!(broadcaster.listener_count(), 1);
        assert!(broadcaster.is_subscribed(screen.handle()));

        viewport.set_width(1000.0);
        assert_eq!(tracker.call_count(), 1);
    }
    assert_eq!(broadcaster.listener_count(), 0);

    viewport.set_width(1920.0);
    assert_eq!(tracker.call_count(), 1);
}

#[test]
fn test_independent_bindings() {
    let (viewport, broadcaster) = viewport_at(500.0);
    let published = Rc::new(RefCell::new(Vec::new()));

    let drawer = ScreenSizeBinding::with_callback(&broadcaster, {
        let published = published.clone();
        move |set| published.borrow_mut().push(("drawer", set.active()))
    });
    let footer = ScreenSizeBinding::with_callback(&broadcaster, {
        let published = published.clone();
        move |set| published.borrow_mut().push(("footer", set.active()))
    });
    assert_ne!(drawer.handle(), footer.handle());

    viewport.set_width(1000.0);
    drop(footer);
    viewport.set_width(1400.0);

    assert_eq!(
        *published.borrow(),
        vec![
            ("drawer", Some(Breakpoint::Medium)),
            ("footer", Some(Breakpoint::Medium)),
            ("drawer", Some(Breakpoint::Large)),
        ]
    );
    assert_eq!(drawer.version(), 2);
}

#[test]
fn test_binding_dropped_inside_its_own_callback() {
    let (viewport, broadcaster) = viewport_at(500.0);
    let slot: Rc<RefCell<Option<ScreenSizeBinding>>> = Rc::new(RefCell::new(None));

    let binding = ScreenSizeBinding::with_callback(&broadcaster, {
        let slot = slot.clone();
        move |_| {
            slot.borrow_mut().take();
        }
    });
    *slot.borrow_mut() = Some(binding);

    viewport.set_width(1920.0);
    assert!(slot.borrow().is_none());
    assert_eq!(broadcaster.listener_count(), 0);
}

#[test]
fn test_binding_outlives_broadcaster_clone() {
    let viewport = HeadlessViewport::new(500.0);
    let screen = {
        let broadcaster = Broadcaster::new(&viewport);
        use_screen_size(&broadcaster)
    };

    // The binding holds the broadcaster, so notifications still arrive.
    viewport.set_width(1920.0);
    assert_eq!(screen.get().is_large, Some(true));
}
