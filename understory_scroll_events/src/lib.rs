// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_events --heading-base-level=0

//! Understory Scroll Events: edge-triggered boundary tracking for scrolled content.
//!
//! This crate watches a set of elements and, on every scroll notification,
//! recomputes four boundary conditions per element against the viewport:
//!
//! - [`BoundaryCondition::TopTop`]: the element's top is at or below the viewport top.
//! - [`BoundaryCondition::TopBottom`]: the element's bottom is at or below the viewport top.
//! - [`BoundaryCondition::BottomTop`]: the element's top is at or above the viewport bottom.
//! - [`BoundaryCondition::BottomBottom`]: the element's bottom is at or above the viewport bottom.
//!
//! Each element carries an optional entrance and exit callback per condition.
//! Callbacks are edge-triggered: they run when a condition flips, never while
//! it merely keeps holding.
//!
//! The crate does not own layout or an event loop. Hosts implement
//! [`ScrollHost`] to resolve selectors and report element rectangles and the
//! viewport height, and call [`ScrollTracker::on_scroll`] whenever the content
//! scrolls. `understory_scroll_events_web` provides a host for browser documents.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use understory_scroll_events::{
//!     BoundaryCondition, Callbacks, ScrollHost, ScrollTracker, SelectorError, Target,
//! };
//!
//! // A host with one element whose vertical position is driven by the test.
//! struct Page {
//!     top: Rc<Cell<f64>>,
//! }
//!
//! impl ScrollHost for Page {
//!     type Element = ();
//!     fn query_selector(&self, _selector: &str) -> Result<Option<()>, SelectorError> {
//!         Ok(Some(()))
//!     }
//!     fn bounding_rect(&self, _element: &()) -> Option<Rect> {
//!         let top = self.top.get();
//!         Some(Rect::new(0.0, top, 100.0, top + 100.0))
//!     }
//!     fn viewport_height(&self) -> f64 {
//!         800.0
//!     }
//! }
//!
//! let top = Rc::new(Cell::new(900.0));
//! let mut tracker = ScrollTracker::new(Page { top: top.clone() });
//!
//! let shown = Rc::new(Cell::new(false));
//! let (on, off) = (shown.clone(), shown.clone());
//! tracker
//!     .register(
//!         Target::Element(()),
//!         Callbacks::new().on(BoundaryCondition::BottomTop, move || on.set(true)),
//!         Callbacks::new().on(BoundaryCondition::BottomTop, move || off.set(false)),
//!     )
//!     .unwrap();
//! assert!(!shown.get());
//!
//! // Scroll the element's top above the viewport bottom.
//! top.set(700.0);
//! tracker.on_scroll();
//! assert!(shown.get());
//!
//! // Scroll it back below.
//! top.set(850.0);
//! tracker.on_scroll();
//! assert!(!shown.get());
//! ```
//!
//! ## Registration fires current state
//!
//! Flags start cleared and [`ScrollTracker::register`] runs one recompute pass
//! immediately, so any condition that already holds fires its entrance
//! callback during registration. Use [`InitialPass::Seed`] in
//! [`TrackerConfig`] to seed the flags silently instead.
//!
//! ## Failures
//!
//! Callbacks installed with [`Callbacks::try_on`] may return a
//! [`CallbackError`]. Failures are collected into the [`ScrollReport`] of the
//! pass and never stop it. Entries whose element lost its geometry are reported
//! as [`PassFailure::Detached`] and handled according to [`DetachedPolicy`].
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with `std`.
//! - `libm`: build Kurbo with `libm` for `no_std` targets.
//! - `tracing`: emit `tracing` events for registrations, transitions, and failures.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod callbacks;
mod condition;
mod config;
mod error;
mod host;
mod report;
mod tracker;

pub use callbacks::{CallbackResult, Callbacks};
pub use condition::{BoundaryCondition, BoundaryFlags, Edge};
pub use config::{DetachedPolicy, InitialPass, TrackerConfig};
pub use error::{CallbackError, PassFailure, RegisterError, SelectorError};
pub use host::{ScrollHost, Target};
pub use report::{ScrollReport, Transition};
pub use tracker::{Registered, ScrollTracker, WatchId};
