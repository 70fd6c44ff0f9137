// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::condition::{BoundaryCondition, Edge};
use crate::error::PassFailure;
use crate::tracker::WatchId;

/// One flag flip observed during a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Entry whose flag flipped.
    pub watch: WatchId,
    /// Condition that flipped.
    pub condition: BoundaryCondition,
    /// Direction of the flip.
    pub edge: Edge,
    /// Whether a callback was installed and invoked for this flip.
    pub fired: bool,
}

/// Everything a recompute pass observed, in evaluation order.
#[derive(Debug, Default)]
pub struct ScrollReport {
    /// Flag flips, including those with no callback installed.
    pub transitions: Vec<Transition>,
    /// Non-fatal problems hit during the pass.
    pub failures: Vec<PassFailure>,
}

impl ScrollReport {
    /// Returns `true` if no flag flipped and nothing failed.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.transitions.is_empty() && self.failures.is_empty()
    }

    /// Returns `true` if any failure was recorded.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Flips that invoked a callback.
    pub fn fired(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.iter().filter(|t| t.fired)
    }

    /// Flips recorded for one entry.
    pub fn for_watch(&self, watch: WatchId) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.iter().filter(move |t| t.watch == watch)
    }

    /// Appends the contents of another report.
    pub fn extend(&mut self, other: Self) {
        self.transitions.extend(other.transitions);
        self.failures.extend(other.failures);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn flip(watch: u64, condition: BoundaryCondition, fired: bool) -> Transition {
        Transition {
            watch: WatchId::from_raw(watch),
            condition,
            edge: Edge::Entrance,
            fired,
        }
    }

    #[test]
    fn extend_appends_in_order() {
        let mut first = ScrollReport {
            transitions: vec![flip(0, BoundaryCondition::TopTop, true)],
            failures: vec![],
        };
        let second = ScrollReport {
            transitions: vec![
                flip(1, BoundaryCondition::BottomTop, false),
                flip(0, BoundaryCondition::BottomBottom, true),
            ],
            failures: vec![PassFailure::Detached {
                watch: WatchId::from_raw(1),
            }],
        };
        assert!(!first.has_failures());

        first.extend(second);
        assert_eq!(
            first
                .transitions
                .iter()
                .map(|t| t.condition)
                .collect::<Vec<_>>(),
            [
                BoundaryCondition::TopTop,
                BoundaryCondition::BottomTop,
                BoundaryCondition::BottomBottom,
            ]
        );
        assert!(first.has_failures());
        assert_eq!(first.fired().count(), 2);
        assert_eq!(first.for_watch(WatchId::from_raw(0)).count(), 2);

        first.extend(ScrollReport::default());
        assert_eq!(first.transitions.len(), 3);
        assert_eq!(first.failures.len(), 1);
    }
}
