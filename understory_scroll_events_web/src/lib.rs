// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_events_web --heading-base-level=0

//! Browser document host for `understory_scroll_events`.
//!
//! When targeting `wasm32`, this crate provides:
//!
//! - `DomHost`: a [`ScrollHost`](understory_scroll_events::ScrollHost) over
//!   `web_sys::Element`, resolving selectors with `Document::query_selector`,
//!   reading geometry from `Element::get_bounding_client_rect`, and the viewport
//!   height from `Window::inner_height` (reusing the last readable height, with a
//!   `tracing` warning, when the window cannot report one).
//! - `ScrollEvents`: one tracker per page, subscribed to the document `scroll`
//!   event on construction and unsubscribed on drop.
//! - `class_toggle`: callbacks that remove a class on entrance and add it back on exit.
//!
//! # Usage
//!
//! Reveal every `.scroll-element` once its top edge rises above the bottom of
//! the window, and hide it again when it drops back below:
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn reveal_on_scroll() -> Result<understory_scroll_events_web::ScrollEvents, understory_scroll_events_web::WebError> {
//!     use understory_scroll_events::{BoundaryCondition, Target};
//!     use understory_scroll_events_web::{ScrollEvents, class_toggle};
//!
//!     let events = ScrollEvents::new()?;
//!     let elements = events.host().document().get_elements_by_class_name("scroll-element");
//!     for i in 0..elements.length() {
//!         let Some(el) = elements.item(i) else { continue };
//!         let (entrance, exit) = class_toggle(&el, BoundaryCondition::BottomTop, "hidden");
//!         events.add_element(Target::Element(el), entrance, exit)?;
//!     }
//!     Ok(events)
//! }
//! ```
//!
//! Notes:
//! - Callbacks run synchronously inside the `scroll` listener. They must not call
//!   back into the same `ScrollEvents`; such calls return [`WebError::Busy`], and
//!   a notification that arrives while the tracker is borrowed is dropped with a
//!   `tracing` warning.
//! - An element removed from the document reports no geometry; see
//!   [`DetachedPolicy`](understory_scroll_events::DetachedPolicy).

#![no_std]

extern crate alloc;

use alloc::string::String;
use core::error::Error;
use core::fmt;

use understory_scroll_events::RegisterError;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "driven by the DOM binding and by tests")
)]
mod shared;
#[cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "driven by the DOM binding and by tests")
)]
mod viewport;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomHost, ScrollEvents, class_toggle};

/// Errors raised while binding a tracker to the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebError {
    /// No global `window` (for example, running in a worker).
    NoWindow,
    /// The window has no `document`.
    NoDocument,
    /// Installing the `scroll` listener failed.
    Listener(String),
    /// The tracker is borrowed, typically because a callback called back into it.
    Busy,
    /// Registration was rejected.
    Register(RegisterError),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => f.write_str("no global window"),
            Self::NoDocument => f.write_str("window has no document"),
            Self::Listener(msg) => write!(f, "failed to install scroll listener: {msg}"),
            Self::Busy => f.write_str("scroll tracker is already borrowed"),
            Self::Register(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl Error for WebError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Register(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegisterError> for WebError {
    fn from(e: RegisterError) -> Self {
        Self::Register(e)
    }
}
