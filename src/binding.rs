use std::{cell::Cell, fmt, rc::Rc};

use crate::{
    breakpoint_set::BreakpointSet,
    broadcaster::{Broadcaster, Handle},
};

struct BindingState {
    current: Cell<BreakpointSet>,
    version: Cell<u64>,
}

/// A live view of the current [`BreakpointSet`].
///
/// Creating the binding reads the current breakpoints and subscribes a
/// private handle; every notification re-reads them. Dropping the binding
/// unsubscribes the handle, so the subscription lives exactly as long as the
/// value does.
pub struct ScreenSizeBinding {
    broadcaster: Broadcaster,
    state: Rc<BindingState>,
    handle: Handle,
}

/// Bind to `broadcaster`'s breakpoints. See [`ScreenSizeBinding`].
pub fn use_screen_size(broadcaster: &Broadcaster) -> ScreenSizeBinding {
    ScreenSizeBinding::new(broadcaster)
}

impl ScreenSizeBinding {
    pub fn new(broadcaster: &Broadcaster) -> Self {
        Self::with_callback(broadcaster, |_| {})
    }

    /// Like [`new`](Self::new), also calling `on_change` with the re-read
    /// breakpoints after every notification.
    pub fn with_callback(
        broadcaster: &Broadcaster,
        on_change: impl Fn(BreakpointSet) + 'static,
    ) -> Self {
        let state = Rc::new(BindingState {
            current: Cell::new(broadcaster.current()),
            version: Cell::new(0),
        });

        let handle = Handle::new({
            let state = Rc::downgrade(&state);
            let broadcaster = broadcaster.downgrade();
            move || {
                let (Some(state), Some(broadcaster)) =
                    (state.upgrade(), Broadcaster::upgrade(&broadcaster))
                else {
                    return;
                };
                let current = broadcaster.current();
                state.current.set(current);
                state.version.set(state.version.get() + 1);
                on_change(current);
            }
        });
        broadcaster.subscribe(&handle);

        Self {
            broadcaster: broadcaster.clone(),
            state,
            handle,
        }
    }

    /// The breakpoints as of the last notification.
    pub fn get(&self) -> BreakpointSet {
        self.state.current.get()
    }

    /// Number of notifications received so far.
    pub fn version(&self) -> u64 {
        self.state.version.get()
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Drop for ScreenSizeBinding {
    fn drop(&mut self) {
        self.broadcaster.unsubscribe(&self.handle);
    }
}

impl fmt::Debug for ScreenSizeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenSizeBinding")
            .field("current", &self.get())
            .field("version", &self.version())
            .finish()
    }
}
