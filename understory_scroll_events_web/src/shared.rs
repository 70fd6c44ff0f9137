// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tracker shared between an event listener and its owner.

use alloc::rc::Rc;
use core::cell::RefCell;

use understory_scroll_events::{Callbacks, ScrollHost, ScrollReport, ScrollTracker, Target, WatchId};

use crate::WebError;

/// Shared handle to one tracker.
///
/// Every access goes through `try_borrow_mut`, so a callback that re-enters the
/// tracker gets [`WebError::Busy`] instead of a panic.
pub(crate) struct SharedTracker<H: ScrollHost> {
    inner: Rc<RefCell<ScrollTracker<H>>>,
}

impl<H: ScrollHost> Clone for SharedTracker<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: ScrollHost> SharedTracker<H> {
    pub(crate) fn new(tracker: ScrollTracker<H>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(tracker)),
        }
    }

    /// Scroll notification handler.
    ///
    /// Holds the tracker weakly: once every handle is dropped it does nothing.
    /// A notification that arrives while the tracker is borrowed is dropped.
    pub(crate) fn listener(&self) -> impl FnMut() + use<H>
    where
        H: 'static,
    {
        let weak = Rc::downgrade(&self.inner);
        move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match inner.try_borrow_mut() {
                Ok(mut tracker) => {
                    tracker.on_scroll();
                }
                Err(_) => tracing::warn!("scroll notification dropped: tracker is busy"),
            }
        }
    }

    pub(crate) fn with_tracker<R>(
        &self,
        f: impl FnOnce(&mut ScrollTracker<H>) -> R,
    ) -> Result<R, WebError> {
        let mut tracker = self.inner.try_borrow_mut().map_err(|_| WebError::Busy)?;
        Ok(f(&mut tracker))
    }

    pub(crate) fn register<'a>(
        &self,
        target: impl Into<Target<'a, H::Element>>,
        entrance: Callbacks,
        exit: Callbacks,
    ) -> Result<WatchId, WebError> {
        self.with_tracker(|t| t.register(target, entrance, exit))?
            .map(|registered| registered.id)
            .map_err(WebError::from)
    }

    pub(crate) fn unregister(&self, id: WatchId) -> Result<bool, WebError> {
        self.with_tracker(|t| t.unregister(id))
    }

    pub(crate) fn scroll(&self) -> Result<ScrollReport, WebError> {
        self.with_tracker(ScrollTracker::on_scroll)
    }

    /// Number of entries, or `None` while the tracker is borrowed.
    pub(crate) fn len(&self) -> Option<usize> {
        self.inner.try_borrow().map(|t| t.len()).ok()
    }
}
