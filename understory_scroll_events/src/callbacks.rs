// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional per-condition callbacks.
//!
//! A watched element carries two [`Callbacks`] sets: one fired on entrance
//! (a condition becomes true) and one fired on exit (a condition becomes false).
//! Each set holds at most one callback per [`BoundaryCondition`]; a missing
//! callback simply means that flip is not observed.
//!
//! ```
//! use understory_scroll_events::{BoundaryCondition, Callbacks, CallbackError};
//!
//! let entrance = Callbacks::new()
//!     .on(BoundaryCondition::BottomTop, || { /* reveal */ })
//!     .try_on(BoundaryCondition::TopBottom, || Err(CallbackError::msg("not yet")));
//!
//! assert!(entrance.has(BoundaryCondition::BottomTop));
//! assert!(!entrance.has(BoundaryCondition::TopTop));
//! assert_eq!(entrance.len(), 2);
//! ```

use alloc::boxed::Box;
use core::fmt;

use crate::condition::BoundaryCondition;
use crate::error::CallbackError;

/// Result type returned by boundary callbacks.
pub type CallbackResult = Result<(), CallbackError>;

type BoxedCallback = Box<dyn FnMut() -> CallbackResult>;

/// At most one callback per boundary condition.
#[derive(Default)]
pub struct Callbacks {
    slots: [Option<BoxedCallback>; 4],
}

impl Callbacks {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs an infallible callback for `condition`, replacing any previous one.
    #[must_use]
    pub fn on(mut self, condition: BoundaryCondition, mut f: impl FnMut() + 'static) -> Self {
        self.set(condition, move || {
            f();
            Ok(())
        });
        self
    }

    /// Installs a fallible callback for `condition`, replacing any previous one.
    ///
    /// Errors are collected into the pass report instead of aborting the pass.
    #[must_use]
    pub fn try_on(
        mut self,
        condition: BoundaryCondition,
        f: impl FnMut() -> CallbackResult + 'static,
    ) -> Self {
        self.set(condition, f);
        self
    }

    /// Installs a fallible callback for `condition` in place.
    pub fn set(
        &mut self,
        condition: BoundaryCondition,
        f: impl FnMut() -> CallbackResult + 'static,
    ) {
        self.slots[condition.index()] = Some(Box::new(f));
    }

    /// Removes the callback for `condition`, returning whether one was installed.
    pub fn clear(&mut self, condition: BoundaryCondition) -> bool {
        self.slots[condition.index()].take().is_some()
    }

    /// Returns `true` if a callback is installed for `condition`.
    #[must_use]
    pub fn has(&self, condition: BoundaryCondition) -> bool {
        self.slots[condition.index()].is_some()
    }

    /// Number of installed callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns `true` if no callback is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Invokes the callback for `condition`.
    ///
    /// Returns `None` when no callback is installed.
    pub(crate) fn invoke(&mut self, condition: BoundaryCondition) -> Option<CallbackResult> {
        self.slots[condition.index()].as_mut().map(|f| f())
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for c in BoundaryCondition::ALL {
            if self.has(c) {
                set.entry(&c);
            }
        }
        set.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn invoke_runs_only_installed_slot() {
        let hits = Rc::new(Cell::new(0_u32));
        let h = hits.clone();
        let mut cbs = Callbacks::new().on(BoundaryCondition::BottomBottom, move || {
            h.set(h.get() + 1);
        });

        assert!(cbs.invoke(BoundaryCondition::TopTop).is_none());
        assert!(matches!(
            cbs.invoke(BoundaryCondition::BottomBottom),
            Some(Ok(()))
        ));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn later_install_replaces_earlier() {
        let which = Rc::new(Cell::new(0_u8));
        let (a, b) = (which.clone(), which.clone());
        let mut cbs = Callbacks::new()
            .on(BoundaryCondition::TopTop, move || a.set(1))
            .on(BoundaryCondition::TopTop, move || b.set(2));

        assert_eq!(cbs.len(), 1);
        cbs.invoke(BoundaryCondition::TopTop);
        assert_eq!(which.get(), 2);
    }

    #[test]
    fn clear_reports_previous_presence() {
        let mut cbs = Callbacks::new().on(BoundaryCondition::TopBottom, || {});
        assert!(cbs.clear(BoundaryCondition::TopBottom));
        assert!(!cbs.clear(BoundaryCondition::TopBottom));
        assert!(cbs.is_empty());
    }

    #[test]
    fn fallible_callback_surfaces_error() {
        let mut cbs = Callbacks::new().try_on(BoundaryCondition::BottomTop, || {
            Err(CallbackError::msg("nope"))
        });
        assert!(matches!(
            cbs.invoke(BoundaryCondition::BottomTop),
            Some(Err(_))
        ));
    }

    #[test]
    fn set_installs_in_place() {
        let hits = Rc::new(Cell::new(0_u32));
        let mut cbs = Callbacks::new();
        for condition in [BoundaryCondition::TopTop, BoundaryCondition::BottomBottom] {
            let h = hits.clone();
            cbs.set(condition, move || {
                h.set(h.get() + 1);
                Ok(())
            });
        }

        assert_eq!(cbs.len(), 2);
        assert!(cbs.has(BoundaryCondition::BottomBottom));
        assert!(!cbs.has(BoundaryCondition::TopBottom));
        assert!(matches!(cbs.invoke(BoundaryCondition::TopTop), Some(Ok(()))));
        assert!(matches!(
            cbs.invoke(BoundaryCondition::BottomBottom),
            Some(Ok(()))
        ));
        assert_eq!(hits.get(), 2);
    }
}
