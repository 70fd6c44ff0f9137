// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the tracker and the environment that owns layout.

use kurbo::Rect;

use crate::error::SelectorError;

/// Supplies element lookup and geometry to a [`ScrollTracker`](crate::ScrollTracker).
///
/// Rectangles are viewport-relative: `y0` is the element's top edge and `y1`
/// its bottom edge, in the same units as [`ScrollHost::viewport_height`].
pub trait ScrollHost {
    /// Handle to a watched element.
    type Element;

    /// Resolves a selector to the first matching element.
    ///
    /// Returns `Ok(None)` when the selector is well formed but matches nothing,
    /// and an error when the host cannot parse it.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>, SelectorError>;

    /// Current bounding rectangle of `element`, or `None` if it has no geometry
    /// (for example, it was removed from the document).
    fn bounding_rect(&self, element: &Self::Element) -> Option<Rect>;

    /// Current viewport height.
    fn viewport_height(&self) -> f64;
}

/// What to register: an element handle, or a selector resolved through the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target<'a, E> {
    /// An element handle.
    Element(E),
    /// A selector passed to [`ScrollHost::query_selector`].
    Selector(&'a str),
}

impl<'a, E> From<&'a str> for Target<'a, E> {
    fn from(selector: &'a str) -> Self {
        Self::Selector(selector)
    }
}
