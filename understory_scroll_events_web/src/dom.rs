// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;
use core::fmt;

use kurbo::Rect;
use understory_scroll_events::{
    BoundaryCondition, CallbackError, Callbacks, ScrollHost, ScrollReport, ScrollTracker,
    SelectorError, Target, TrackerConfig, WatchId,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, EventTarget, Window};

use crate::WebError;
use crate::shared::SharedTracker;
use crate::viewport::ViewportHeight;

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// [`ScrollHost`] over the elements of a browser document.
#[derive(Clone, Debug)]
pub struct DomHost {
    window: Window,
    document: Document,
    height: ViewportHeight,
}

impl DomHost {
    /// Binds to the global window and its document.
    ///
    /// # Errors
    ///
    /// [`WebError::NoWindow`] or [`WebError::NoDocument`] outside a browsing context.
    pub fn new() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        Ok(Self {
            window,
            document,
            height: ViewportHeight::default(),
        })
    }

    /// The window whose viewport is measured.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The document selectors are resolved against.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl ScrollHost for DomHost {
    type Element = Element;

    fn query_selector(&self, selector: &str) -> Result<Option<Element>, SelectorError> {
        // Throws a `SyntaxError` for selectors the browser cannot parse.
        self.document
            .query_selector(selector)
            .map_err(|e| SelectorError::new(js_message(&e)))
    }

    fn bounding_rect(&self, element: &Element) -> Option<Rect> {
        // Disconnected elements report an all-zero rectangle rather than failing.
        if !element.is_connected() {
            return None;
        }
        let r = element.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }

    /// `Window::inner_height`; when it cannot be read, the last height that could.
    fn viewport_height(&self) -> f64 {
        self.height
            .resolve(self.window.inner_height().ok().and_then(|h| h.as_f64()))
    }
}

/// A page-wide tracker driven by the document `scroll` event.
///
/// The listener is installed by [`ScrollEvents::new`] and removed on drop.
pub struct ScrollEvents {
    host: DomHost,
    tracker: SharedTracker<DomHost>,
    target: EventTarget,
    listener: Closure<dyn FnMut()>,
}

impl ScrollEvents {
    /// Creates an empty tracker and subscribes it to the document `scroll` event.
    ///
    /// # Errors
    ///
    /// See [`DomHost::new`]; also [`WebError::Listener`] if the listener cannot be added.
    pub fn new() -> Result<Self, WebError> {
        Self::with_config(TrackerConfig::default())
    }

    /// Like [`ScrollEvents::new`], with an explicit tracker configuration.
    ///
    /// # Errors
    ///
    /// See [`ScrollEvents::new`].
    pub fn with_config(config: TrackerConfig) -> Result<Self, WebError> {
        let host = DomHost::new()?;
        let target: EventTarget = host.document().clone().into();
        let tracker = SharedTracker::new(ScrollTracker::with_config(host.clone(), config));
        let listener = Closure::<dyn FnMut()>::new(tracker.listener());
        target
            .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref())
            .map_err(|e| WebError::Listener(js_message(&e)))?;

        Ok(Self {
            host,
            tracker,
            target,
            listener,
        })
    }

    /// The document host.
    pub fn host(&self) -> &DomHost {
        &self.host
    }

    /// Starts watching an element; see [`ScrollTracker::register`].
    ///
    /// # Errors
    ///
    /// [`WebError::Register`] if registration is rejected, [`WebError::Busy`] if
    /// called from inside a callback of this tracker.
    pub fn add_element<'a>(
        &self,
        target: impl Into<Target<'a, Element>>,
        entrance: Callbacks,
        exit: Callbacks,
    ) -> Result<WatchId, WebError> {
        self.tracker.register(target, entrance, exit)
    }

    /// Stops watching an element. Returns `false` if the id is unknown.
    ///
    /// # Errors
    ///
    /// [`WebError::Busy`] if called from inside a callback of this tracker.
    pub fn remove_element(&self, id: WatchId) -> Result<bool, WebError> {
        self.tracker.unregister(id)
    }

    /// Runs a pass now, as if the document had scrolled.
    ///
    /// # Errors
    ///
    /// [`WebError::Busy`] if called from inside a callback of this tracker.
    pub fn scroll(&self) -> Result<ScrollReport, WebError> {
        self.tracker.scroll()
    }

    /// Runs `f` with exclusive access to the tracker.
    ///
    /// # Errors
    ///
    /// [`WebError::Busy`] if the tracker is already borrowed.
    pub fn with_tracker<R>(
        &self,
        f: impl FnOnce(&mut ScrollTracker<DomHost>) -> R,
    ) -> Result<R, WebError> {
        self.tracker.with_tracker(f)
    }
}

impl Drop for ScrollEvents {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback("scroll", self.listener.as_ref().unchecked_ref())
        {
            tracing::warn!(error = %js_message(&e), "failed to remove scroll listener");
        }
    }
}

impl fmt::Debug for ScrollEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollEvents")
            .field("host", &self.host)
            .field("watched", &self.tracker.len())
            .field("target", &self.target)
            .field("listener", &self.listener)
            .finish()
    }
}

/// Callbacks that remove `class` from `element` when `condition` becomes true,
/// and add it back when it becomes false.
///
/// Returns `(entrance, exit)`.
pub fn class_toggle(
    element: &Element,
    condition: BoundaryCondition,
    class: &str,
) -> (Callbacks, Callbacks) {
    let (show, hide) = (element.clone(), element.clone());
    let (shown_class, hidden_class) = (String::from(class), String::from(class));
    let entrance = Callbacks::new().try_on(condition, move || {
        show.class_list()
            .remove_1(&shown_class)
            .map_err(|e| CallbackError::msg(js_message(&e)))
    });
    let exit = Callbacks::new().try_on(condition, move || {
        hide.class_list()
            .add_1(&hidden_class)
            .map_err(|e| CallbackError::msg(js_message(&e)))
    });
    (entrance, exit)
}
