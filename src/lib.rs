//! # breakpoint_broadcast
//!
//! Responsive breakpoints for UI hosts, with one shared change-notification
//! registry.
//!
//! The viewport width is classified into four breakpoints, each backed by
//! its own media query:
//!
//! | Breakpoint | Query                                            |
//! |------------|--------------------------------------------------|
//! | xsmall     | `(max-width: 599.99px)`                          |
//! | small      | `(min-width: 600px) and (max-width: 959.99px)`   |
//! | medium     | `(min-width: 960px) and (max-width: 1279.99px)`  |
//! | large      | `(min-width: 1280px)`                            |
//!
//! A [`Broadcaster`] builds these queries once through a [`MediaQueryHost`]
//! and calls every subscribed [`Handle`] whenever one of them starts
//! matching. Handles receive no payload; they re-read
//! [`Broadcaster::current`]. [`use_screen_size`] packages that pattern as a
//! [`ScreenSizeBinding`] that keeps the latest [`BreakpointSet`] and
//! unsubscribes when dropped.
//!
//! ```rust
//! use breakpoint_broadcast::{Broadcaster, HeadlessViewport, use_screen_size};
//!
//! let viewport = HeadlessViewport::new(500.0);
//! let broadcaster = Broadcaster::new(&viewport);
//! let screen = use_screen_size(&broadcaster);
//! assert_eq!(screen.get().is_xsmall, Some(true));
//!
//! viewport.set_width(1920.0);
//! assert_eq!(screen.get().is_large, Some(true));
//! ```
//!
//! ## Without a viewport
//!
//! Runtimes with no viewport build the broadcaster with
//! [`Broadcaster::without_viewport`] (or [`Broadcaster::detect`] with
//! `None`). Every flag then reads as `None` and handles are never called.
//!
//! ## Threading
//!
//! Everything here is `!Send`: the broadcaster lives on the UI thread and is
//! driven by the host's event dispatch. [`Broadcaster::init_global`] and
//! [`Broadcaster::global`] give each thread at most one default instance.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events under its own target: `debug` when
//! queries are built or start matching, `trace` for registry changes and
//! dispatch, `warn` when a handle is subscribed twice.

pub mod binding;
pub mod breakpoint_set;
pub mod broadcaster;
pub mod headless;
pub mod media_query;
pub mod responsive;

pub use binding::{ScreenSizeBinding, use_screen_size};
pub use breakpoint_set::BreakpointSet;
pub use broadcaster::{Broadcaster, Handle};
pub use headless::HeadlessViewport;
pub use media_query::{
    LARGE_QUERY, MEDIUM_QUERY, MediaQuery, MediaQueryError, MediaQueryHost, MediaQueryList,
    SMALL_QUERY, XSMALL_QUERY,
};
pub use responsive::{Breakpoint, ScreenSize, SizeFlags, range};
