// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless scrolling page: a column of blocks laid out in document space.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use kurbo::Rect;
use understory_scroll_events::{ScrollHost, SelectorError};

/// One block of the page.
#[derive(Clone, Debug)]
pub struct Block {
    /// Id used by `#id` selectors.
    pub id: String,
    /// Class used by `.class` selectors.
    pub class: String,
    /// Document-space rectangle.
    pub rect: Rect,
    /// Classes toggled at runtime by callbacks.
    pub classes: Rc<RefCell<BTreeSet<String>>>,
}

/// A page of blocks, scrolled vertically.
///
/// Cloning shares the same blocks and scroll position, so one clone can be
/// handed to a tracker while another drives scrolling.
#[derive(Clone, Debug)]
pub struct Page {
    blocks: Rc<RefCell<Vec<Block>>>,
    scroll_y: Rc<Cell<f64>>,
    viewport_height: f64,
}

impl Page {
    /// Creates an empty page with the given viewport height.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            blocks: Rc::default(),
            scroll_y: Rc::default(),
            viewport_height,
        }
    }

    /// Appends a block of `height` below the last one, after `gap` of spacing.
    ///
    /// Returns the block index.
    pub fn push(&self, id: &str, class: &str, gap: f64, height: f64) -> usize {
        let mut blocks = self.blocks.borrow_mut();
        let top = blocks.last().map_or(0.0, |b| b.rect.y1) + gap;
        blocks.push(Block {
            id: id.into(),
            class: class.into(),
            rect: Rect::new(0.0, top, 600.0, top + height),
            classes: Rc::default(),
        });
        blocks.len() - 1
    }

    /// Indices of every block with `class`.
    pub fn by_class(&self, class: &str) -> Vec<usize> {
        self.blocks
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.class == class)
            .map(|(i, _)| i)
            .collect()
    }

    /// Runtime class set of a block, or `None` for an unknown index.
    pub fn classes(&self, index: usize) -> Option<Rc<RefCell<BTreeSet<String>>>> {
        self.blocks.borrow().get(index).map(|b| b.classes.clone())
    }

    /// Id of a block, or `None` for an unknown index.
    pub fn id(&self, index: usize) -> Option<String> {
        self.blocks.borrow().get(index).map(|b| b.id.clone())
    }

    /// Current scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    /// Sets the scroll offset.
    pub fn scroll_to(&self, y: f64) {
        self.scroll_y.set(y);
    }
}

impl ScrollHost for Page {
    type Element = usize;

    fn query_selector(&self, selector: &str) -> Result<Option<usize>, SelectorError> {
        let blocks = self.blocks.borrow();
        match selector.split_at_checked(1) {
            Some(("#", id)) if !id.is_empty() => Ok(blocks.iter().position(|b| b.id == id)),
            Some((".", class)) if !class.is_empty() => {
                Ok(blocks.iter().position(|b| b.class == class))
            }
            _ => Err(SelectorError::new(format!(
                "`{selector}` is neither `#id` nor `.class`"
            ))),
        }
    }

    fn bounding_rect(&self, element: &usize) -> Option<Rect> {
        let rect = self.blocks.borrow().get(*element)?.rect;
        Some(rect - kurbo::Vec2::new(0.0, self.scroll_y.get()))
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}
