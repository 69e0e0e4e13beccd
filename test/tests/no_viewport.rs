//! Tests for runtimes without a viewport.

use breakpoint_test::prelude::*;

#[test]
fn test_all_flags_unknown() {
    let broadcaster = Broadcaster::without_viewport();
    assert!(!broadcaster.has_viewport());
    assert_eq!(broadcaster.current(), BreakpointSet::unknown());
    assert!(!broadcaster.current().is_known());
}

#[test]
fn test_handles_never_invoked_by_resize() {
    init_tracing();
    let viewport = HeadlessViewport::new(500.0);
    let broadcaster = Broadcaster::detect(None);
    let tracker = CallTracker::new();
    broadcaster.subscribe(&tracker.handle("layout"));

    viewport.set_width(1920.0);
    viewport.set_width(320.0);

    assert!(!tracker.was_called());
    assert_eq!(viewport.query_count(), 0);
}

#[test]
fn test_binding_stays_unknown() {
    let broadcaster = Broadcaster::without_viewport();
    let screen = use_screen_size(&broadcaster);
    assert_eq!(screen.get(), BreakpointSet::unknown());
    assert_eq!(screen.get().active(), None);
}

#[test]
fn test_default_global_has_no_viewport() {
    let global = Broadcaster::global();
    assert!(!global.has_viewport());

    // The first instance wins for the rest of the thread.
    let viewport = HeadlessViewport::new(800.0);
    let host: &dyn MediaQueryHost = &viewport;
    let installed = Broadcaster::init_global(Some(host));
    assert!(!installed.has_viewport());
    assert_eq!(viewport.query_count(), 0);
}
