// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::cell::Cell;

/// Last usable viewport height.
///
/// Clones share the same value, so a host and its copies agree on the fallback.
#[derive(Clone, Debug, Default)]
pub(crate) struct ViewportHeight {
    last: Rc<Cell<f64>>,
    stale: Rc<Cell<bool>>,
}

impl ViewportHeight {
    /// Accepts a fresh reading, or falls back to the last usable one.
    ///
    /// Before any usable reading the fallback is `0.0`. A warning is logged when
    /// readings start failing, not on every failed read.
    pub(crate) fn resolve(&self, reading: Option<f64>) -> f64 {
        match reading.filter(|h| h.is_finite() && *h >= 0.0) {
            Some(height) => {
                self.last.set(height);
                self.stale.set(false);
                height
            }
            None => {
                let fallback = self.last.get();
                if !self.stale.replace(true) {
                    tracing::warn!(fallback, "viewport height unavailable, reusing last value");
                }
                fallback
            }
        }
    }
}
