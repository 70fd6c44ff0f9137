// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary conditions and the per-element flag record.
//!
//! Each watched element carries four flags, one per [`BoundaryCondition`].
//! A flag is derived from a single comparison between one edge of the element's
//! bounding rectangle and one edge of the viewport:
//!
//! | Condition      | Holds when                  |
//! |----------------|-----------------------------|
//! | `TopTop`       | `top >= 0`                  |
//! | `TopBottom`    | `bottom >= 0`               |
//! | `BottomTop`    | `top <= viewport_height`    |
//! | `BottomBottom` | `bottom <= viewport_height` |
//!
//! Rectangles are viewport-relative: `y0` is the element's top edge and `y1`
//! its bottom edge. Comparisons against NaN are false, so a NaN edge clears
//! the conditions that read it.
//!
//! ```
//! use kurbo::Rect;
//! use understory_scroll_events::{BoundaryCondition, BoundaryFlags};
//!
//! // Element straddling the top of an 800px viewport.
//! let flags = BoundaryFlags::evaluate(Rect::new(0.0, -50.0, 100.0, 50.0), 800.0);
//! assert!(!flags.holds(BoundaryCondition::TopTop));
//! assert!(flags.holds(BoundaryCondition::TopBottom));
//! assert!(flags.holds(BoundaryCondition::BottomTop));
//! assert!(flags.holds(BoundaryCondition::BottomBottom));
//! ```

use kurbo::Rect;

/// One of the four fixed comparisons between a viewport edge and an element edge.
///
/// The first half of the name is the viewport edge, the second half the element edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoundaryCondition {
    /// Viewport top vs element top: the element's top edge is at or below the viewport top.
    TopTop,
    /// Viewport top vs element bottom: the element's bottom edge is at or below the viewport top.
    TopBottom,
    /// Viewport bottom vs element top: the element's top edge is at or above the viewport bottom.
    BottomTop,
    /// Viewport bottom vs element bottom: the element's bottom edge is at or above the viewport bottom.
    BottomBottom,
}

impl BoundaryCondition {
    /// All conditions, in evaluation order.
    pub const ALL: [Self; 4] = [
        Self::TopTop,
        Self::TopBottom,
        Self::BottomTop,
        Self::BottomBottom,
    ];

    /// Dense index of this condition, in `0..4`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::TopTop => 0,
            Self::TopBottom => 1,
            Self::BottomTop => 2,
            Self::BottomBottom => 3,
        }
    }

    /// The flag bit backing this condition.
    #[must_use]
    pub const fn flag(self) -> BoundaryFlags {
        match self {
            Self::TopTop => BoundaryFlags::TOP_TOP,
            Self::TopBottom => BoundaryFlags::TOP_BOTTOM,
            Self::BottomTop => BoundaryFlags::BOTTOM_TOP,
            Self::BottomBottom => BoundaryFlags::BOTTOM_BOTTOM,
        }
    }

    /// Evaluates this condition for a viewport-relative rectangle.
    #[must_use]
    pub fn holds_for(self, rect: Rect, viewport_height: f64) -> bool {
        let (top, bottom) = (rect.y0, rect.y1);
        match self {
            Self::TopTop => top >= 0.0,
            Self::TopBottom => bottom >= 0.0,
            Self::BottomTop => top <= viewport_height,
            Self::BottomBottom => bottom <= viewport_height,
        }
    }

    /// Option key used by the browser-side API for this condition,
    /// for example `windowBottomElementTop`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TopTop => "windowTopElementTop",
            Self::TopBottom => "windowTopElementBottom",
            Self::BottomTop => "windowBottomElementTop",
            Self::BottomBottom => "windowBottomElementBottom",
        }
    }

    /// Parses an option key produced by [`BoundaryCondition::key`].
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Direction of a flag flip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The condition became true.
    Entrance,
    /// The condition became false.
    Exit,
}

bitflags::bitflags! {
    /// The four boundary flags of one watched element.
    ///
    /// Each bit mirrors one [`BoundaryCondition`] as of the last recompute.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BoundaryFlags: u8 {
        /// [`BoundaryCondition::TopTop`] holds.
        const TOP_TOP       = 0b0001;
        /// [`BoundaryCondition::TopBottom`] holds.
        const TOP_BOTTOM    = 0b0010;
        /// [`BoundaryCondition::BottomTop`] holds.
        const BOTTOM_TOP    = 0b0100;
        /// [`BoundaryCondition::BottomBottom`] holds.
        const BOTTOM_BOTTOM = 0b1000;
    }
}

impl BoundaryFlags {
    /// Computes all four flags for a viewport-relative rectangle.
    #[must_use]
    pub fn evaluate(rect: Rect, viewport_height: f64) -> Self {
        BoundaryCondition::ALL
            .into_iter()
            .filter(|c| c.holds_for(rect, viewport_height))
            .fold(Self::empty(), |acc, c| acc | c.flag())
    }

    /// Returns `true` if `condition` is set.
    #[must_use]
    pub fn holds(self, condition: BoundaryCondition) -> bool {
        self.contains(condition.flag())
    }

    /// The element lies entirely inside the viewport (edges inclusive).
    #[must_use]
    pub fn fully_visible(self) -> bool {
        self.is_all()
    }

    /// Some part of the element overlaps the viewport (edges inclusive).
    #[must_use]
    pub fn partially_visible(self) -> bool {
        self.contains(Self::TOP_BOTTOM | Self::BOTTOM_TOP)
    }

    /// Yields the flips needed to go from `self` to `next`, in condition order.
    pub fn transitions_to(self, next: Self) -> impl Iterator<Item = (BoundaryCondition, Edge)> {
        let changed = self ^ next;
        BoundaryCondition::ALL
            .into_iter()
            .filter(move |c| changed.holds(*c))
            .map(move |c| {
                let edge = if next.holds(c) {
                    Edge::Entrance
                } else {
                    Edge::Exit
                };
                (c, edge)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn span(top: f64, bottom: f64) -> Rect {
        Rect::new(0.0, top, 100.0, bottom)
    }

    #[test]
    fn below_viewport_only_top_conditions_hold() {
        let flags = BoundaryFlags::evaluate(span(900.0, 1000.0), 800.0);
        assert_eq!(flags, BoundaryFlags::TOP_TOP | BoundaryFlags::TOP_BOTTOM);
    }

    #[test]
    fn above_viewport_only_bottom_conditions_hold() {
        let flags = BoundaryFlags::evaluate(span(-300.0, -100.0), 800.0);
        assert_eq!(flags, BoundaryFlags::BOTTOM_TOP | BoundaryFlags::BOTTOM_BOTTOM);
        assert!(!flags.partially_visible());
    }

    #[test]
    fn inside_viewport_sets_everything() {
        let flags = BoundaryFlags::evaluate(span(100.0, 200.0), 800.0);
        assert!(flags.fully_visible());
        assert!(flags.partially_visible());
    }

    #[test]
    fn edges_are_inclusive() {
        let flags = BoundaryFlags::evaluate(span(0.0, 800.0), 800.0);
        assert!(flags.fully_visible());
    }

    #[test]
    fn taller_than_viewport_straddles_both_edges() {
        let flags = BoundaryFlags::evaluate(span(-10.0, 900.0), 800.0);
        assert_eq!(flags, BoundaryFlags::TOP_BOTTOM | BoundaryFlags::BOTTOM_TOP);
        assert!(flags.partially_visible());
        assert!(!flags.fully_visible());
    }

    #[test]
    fn nan_edges_clear_their_conditions() {
        let flags = BoundaryFlags::evaluate(span(f64::NAN, 50.0), 800.0);
        assert!(!flags.holds(BoundaryCondition::TopTop));
        assert!(!flags.holds(BoundaryCondition::BottomTop));
        assert!(flags.holds(BoundaryCondition::TopBottom));
        assert!(flags.holds(BoundaryCondition::BottomBottom));
    }

    #[test]
    fn index_and_flag_agree_with_all_order() {
        for (i, c) in BoundaryCondition::ALL.into_iter().enumerate() {
            assert_eq!(c.index(), i, "index of {c:?}");
            assert_eq!(c.flag().bits(), 1 << i, "bit of {c:?}");
        }
    }

    #[test]
    fn keys_round_trip() {
        for c in BoundaryCondition::ALL {
            assert_eq!(BoundaryCondition::from_key(c.key()), Some(c));
        }
        assert_eq!(BoundaryCondition::from_key("windowLeftElementTop"), None);
    }

    #[test]
    fn transitions_report_only_changed_bits() {
        let from = BoundaryFlags::TOP_TOP | BoundaryFlags::TOP_BOTTOM;
        let to = BoundaryFlags::TOP_BOTTOM | BoundaryFlags::BOTTOM_TOP;
        let flips: Vec<_> = from.transitions_to(to).collect();
        assert_eq!(
            flips,
            [
                (BoundaryCondition::TopTop, Edge::Exit),
                (BoundaryCondition::BottomTop, Edge::Entrance),
            ]
        );
        assert_eq!(to.transitions_to(to).count(), 0);
    }
}
