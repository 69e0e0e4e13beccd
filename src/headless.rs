//! Headless viewport for tests, benchmarks, and hosts without a browser.
//!
//! [`HeadlessViewport`] is a [`MediaQueryHost`] whose width is set by the
//! caller instead of a window. A windowing layer can forward its resize
//! events to [`HeadlessViewport::set_width`] and get the same listener
//! behavior a browser gives.
//!
//! # Example
//!
//! ```rust
//! use breakpoint_broadcast::{Broadcaster, HeadlessViewport};
//!
//! let viewport = HeadlessViewport::new(800.0);
//! let broadcaster = Broadcaster::new(&viewport);
//! assert_eq!(broadcaster.current().is_small, Some(true));
//!
//! viewport.set_width(1400.0);
//! assert_eq!(broadcaster.current().is_large, Some(true));
//! ```

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use crate::media_query::{MediaQuery, MediaQueryHost, MediaQueryList};

type Listener = Rc<dyn Fn(bool)>;

/// A query list created by [`HeadlessViewport::match_media`].
struct HeadlessQueryList {
    media: MediaQuery,
    matches: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

impl MediaQueryList for HeadlessQueryList {
    fn media(&self) -> MediaQuery {
        self.media
    }

    fn matches(&self) -> bool {
        self.matches.get()
    }

    fn add_listener(&self, listener: Box<dyn Fn(bool)>) {
        self.listeners.borrow_mut().push(Rc::from(listener));
    }
}

struct ViewportState {
    width: f64,
    lists: Vec<Rc<HeadlessQueryList>>,
}

/// An in-process viewport driven by [`set_width`](Self::set_width).
///
/// Clones share the same viewport.
#[derive(Clone)]
pub struct HeadlessViewport {
    state: Rc<RefCell<ViewportState>>,
}

impl HeadlessViewport {
    /// Create a viewport with the given width in pixels.
    pub fn new(width: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewportState {
                width,
                lists: Vec::new(),
            })),
        }
    }

    pub fn width(&self) -> f64 {
        self.state.borrow().width
    }

    /// Number of query lists handed out so far.
    pub fn query_count(&self) -> usize {
        self.state.borrow().lists.len()
    }

    /// Resize the viewport.
    ///
    /// Every list is re-evaluated first; then the listeners of each list whose
    /// match state flipped are called with the new state, lists in creation
    /// order. Listeners observe the final state of all lists and may call back
    /// into the viewport; a list whose state changed again during delivery is
    /// skipped, so listeners never receive a state the list no longer has.
    pub fn set_width(&self, width: f64) {
        let flipped: Vec<(Rc<HeadlessQueryList>, bool)> = {
            let mut state = self.state.borrow_mut();
            state.width = width;
            state
                .lists
                .iter()
                .filter_map(|list| {
                    let matches = list.media.matches(width);
                    (list.matches.replace(matches) != matches).then(|| (list.clone(), matches))
                })
                .collect()
        };

        for (list, matches) in flipped {
            // An earlier listener may have resized again; that resize already
            // delivered the newer state.
            if list.matches.get() != matches {
                continue;
            }
            let listeners = list.listeners.borrow().clone();
            for listener in listeners {
                listener(matches);
            }
        }
    }
}

impl MediaQueryHost for HeadlessViewport {
    fn match_media(&self, query: &MediaQuery) -> Rc<dyn MediaQueryList> {
        let mut state = self.state.borrow_mut();
        let list = Rc::new(HeadlessQueryList {
            media: *query,
            matches: Cell::new(query.matches(state.width)),
            listeners: RefCell::new(Vec::new()),
        });
        state.lists.push(list.clone());
        list
    }
}

impl fmt::Debug for HeadlessViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessViewport")
            .field("width", &state.width)
            .field("queries", &state.lists.len())
            .finish()
    }
}
