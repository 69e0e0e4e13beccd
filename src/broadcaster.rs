//! The breakpoint broadcaster.
//!
//! A [`Broadcaster`] owns one [`MediaQueryList`] per breakpoint and a
//! registry of [`Handle`]s. When any of the four queries starts matching,
//! every registered handle is called, in registration order, with no
//! payload: handles re-read [`Broadcaster::current`] themselves. There is no
//! diffing and no filtering by which query changed, so a resize that crosses
//! two boundaries at once can notify a handle twice.
//!
//! Dispatch works on a snapshot of the registry taken when it starts. A
//! handle subscribed during a dispatch is first called on the next one, and
//! a handle unsubscribed during a dispatch may still be called in the
//! current one.

use std::{
    cell::{OnceCell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::{
    breakpoint_set::BreakpointSet,
    media_query::{MediaQueryHost, MediaQueryList},
    responsive::Breakpoint,
};

thread_local! {
    static GLOBAL: OnceCell<Broadcaster> = const { OnceCell::new() };
}

/// A zero-argument callback, compared by identity.
///
/// Clones of a handle are the same handle: subscribing one clone and
/// unsubscribing another removes the registration.
#[derive(Clone)]
pub struct Handle(Rc<dyn Fn()>);

impl Handle {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Handle {}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

struct Queries {
    xsmall: Rc<dyn MediaQueryList>,
    small: Rc<dyn MediaQueryList>,
    medium: Rc<dyn MediaQueryList>,
    large: Rc<dyn MediaQueryList>,
}

impl Queries {
    fn attach(host: &dyn MediaQueryHost, inner: &Weak<BroadcasterInner>) -> Self {
        let attach = |breakpoint: Breakpoint| {
            let query = breakpoint.query();
            let list = host.match_media(&query);
            debug!(%breakpoint, %query, matches = list.matches(), "created breakpoint query");

            let inner = inner.clone();
            list.add_listener(Box::new(move |matches| {
                if !matches {
                    return;
                }
                if let Some(inner) = inner.upgrade() {
                    debug!(%breakpoint, "breakpoint query started matching");
                    inner.dispatch();
                }
            }));
            list
        };

        Self {
            xsmall: attach(Breakpoint::XSmall),
            small: attach(Breakpoint::Small),
            medium: attach(Breakpoint::Medium),
            large: attach(Breakpoint::Large),
        }
    }

    fn current(&self) -> BreakpointSet {
        BreakpointSet {
            is_xsmall: Some(self.xsmall.matches()),
            is_small: Some(self.small.matches()),
            is_medium: Some(self.medium.matches()),
            is_large: Some(self.large.matches()),
        }
    }
}

pub(crate) struct BroadcasterInner {
    queries: Option<Queries>,
    listeners: RefCell<SmallVec<[Handle; 4]>>,
}

impl BroadcasterInner {
    fn dispatch(&self) {
        let snapshot = self.listeners.borrow().clone();
        trace!(listeners = snapshot.len(), "notifying breakpoint listeners");
        for handle in &snapshot {
            handle.call();
        }
    }
}

/// Single source of truth for the active breakpoint.
///
/// Construct one at application start and hand clones to consumers; clones
/// share the same queries and registry.
#[derive(Clone)]
pub struct Broadcaster {
    inner: Rc<BroadcasterInner>,
}

impl Broadcaster {
    /// Create a broadcaster, building the four breakpoint queries through
    /// `host` exactly once.
    pub fn new(host: &dyn MediaQueryHost) -> Self {
        Self::detect(Some(host))
    }

    /// Create a broadcaster for whatever viewport capability the runtime
    /// has.
    ///
    /// Without a host no queries are built: [`current`](Self::current)
    /// reports every flag as unknown and subscribed handles are never
    /// called.
    pub fn detect(host: Option<&dyn MediaQueryHost>) -> Self {
        if host.is_none() {
            debug!("no viewport available, breakpoints stay unknown");
        }
        let inner = Rc::new_cyclic(|weak| BroadcasterInner {
            queries: host.map(|host| Queries::attach(host, weak)),
            listeners: RefCell::new(SmallVec::new()),
        });
        Self { inner }
    }

    pub fn without_viewport() -> Self {
        Self::detect(None)
    }

    /// Install the broadcaster for the current thread.
    ///
    /// Only the first call builds anything; later calls ignore `host` and
    /// return the installed instance.
    pub fn init_global(host: Option<&dyn MediaQueryHost>) -> Self {
        GLOBAL.with(|global| global.get_or_init(|| Self::detect(host)).clone())
    }

    /// The broadcaster installed with [`init_global`](Self::init_global),
    /// or a viewport-less one if nothing was installed.
    pub fn global() -> Self {
        GLOBAL.with(|global| global.get_or_init(Self::without_viewport).clone())
    }

    pub fn has_viewport(&self) -> bool {
        self.inner.queries.is_some()
    }

    /// Evaluate the four breakpoint queries now.
    pub fn current(&self) -> BreakpointSet {
        match &self.inner.queries {
            Some(queries) => queries.current(),
            None => BreakpointSet::unknown(),
        }
    }

    /// Register `handle` for change notifications.
    ///
    /// Registering the same handle twice keeps both entries and the handle
    /// is called twice per change.
    pub fn subscribe(&self, handle: &Handle) {
        let mut listeners = self.inner.listeners.borrow_mut();
        if listeners.contains(handle) {
            warn!(?handle, "breakpoint handle subscribed more than once");
        }
        listeners.push(handle.clone());
        trace!(?handle, listeners = listeners.len(), "subscribed");
    }

    /// Remove every registration of `handle`. Does nothing if it was never
    /// subscribed.
    pub fn unsubscribe(&self, handle: &Handle) {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|h| *h != *handle);
        trace!(
            ?handle,
            removed = before - listeners.len(),
            listeners = listeners.len(),
            "unsubscribed"
        );
    }

    pub fn is_subscribed(&self, handle: &Handle) -> bool {
        self.inner.listeners.borrow().contains(handle)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Call every registered handle as if a breakpoint query had started
    /// matching.
    pub fn notify(&self) {
        self.inner.dispatch();
    }

    pub(crate) fn downgrade(&self) -> Weak<BroadcasterInner> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn upgrade(inner: &Weak<BroadcasterInner>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }
}

impl fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("has_viewport", &self.has_viewport())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
