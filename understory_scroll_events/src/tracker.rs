// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The registry of watched elements and the recompute pass.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::callbacks::Callbacks;
use crate::condition::{BoundaryFlags, Edge};
use crate::config::{DetachedPolicy, InitialPass, TrackerConfig};
use crate::error::{PassFailure, RegisterError};
use crate::host::{ScrollHost, Target};
use crate::report::{ScrollReport, Transition};

/// Handle to one registered element.
///
/// Ids are handed out in registration order and never reused by a tracker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(u64);

impl WatchId {
    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value of this id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Result of a successful [`ScrollTracker::register`].
#[derive(Debug)]
pub struct Registered {
    /// Id of the new entry.
    pub id: WatchId,
    /// What the initial pass observed.
    pub report: ScrollReport,
}

#[derive(Debug)]
struct Entry<E> {
    id: WatchId,
    element: E,
    flags: BoundaryFlags,
    entrance: Callbacks,
    exit: Callbacks,
}

impl<E> Entry<E> {
    /// Stores the flags for `rect`, invoking the callback of every flip.
    fn apply(&mut self, rect: Rect, viewport_height: f64, report: &mut ScrollReport) {
        let next = BoundaryFlags::evaluate(rect, viewport_height);
        for (condition, edge) in self.flags.transitions_to(next) {
            let callbacks = match edge {
                Edge::Entrance => &mut self.entrance,
                Edge::Exit => &mut self.exit,
            };
            let outcome = callbacks.invoke(condition);
            report.transitions.push(Transition {
                watch: self.id,
                condition,
                edge,
                fired: outcome.is_some(),
            });
            if let Some(Err(error)) = outcome {
                report.failures.push(PassFailure::Callback {
                    watch: self.id,
                    condition,
                    edge,
                    error,
                });
            }
        }
        self.flags = next;
    }
}

/// Tracks boundary conditions for a set of elements and fires edge-triggered callbacks.
///
/// Call [`ScrollTracker::on_scroll`] for every scroll notification delivered by
/// the host; each call recomputes every entry in registration order.
///
/// See the [crate docs](crate) for an example.
pub struct ScrollTracker<H: ScrollHost> {
    host: H,
    config: TrackerConfig,
    entries: Vec<Entry<H::Element>>,
    next_id: u64,
}

impl<H: ScrollHost> ScrollTracker<H> {
    /// Creates an empty tracker over `host` with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, TrackerConfig::default())
    }

    /// Creates an empty tracker over `host`.
    pub fn with_config(host: H, config: TrackerConfig) -> Self {
        Self {
            host,
            config,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns the configuration.
    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    /// Replaces the configuration. Existing flags are kept.
    pub fn set_config(&mut self, config: TrackerConfig) {
        self.config = config;
    }

    /// Starts watching an element.
    ///
    /// A selector target is resolved through [`ScrollHost::query_selector`]. The
    /// entry then runs one recompute pass before it joins the registry; with
    /// [`InitialPass::Fire`] (the default) every condition that already holds
    /// fires its entrance callback before this returns.
    ///
    /// # Errors
    ///
    /// - [`RegisterError::ElementNotFound`] if a selector matches nothing.
    /// - [`RegisterError::InvalidSelector`] if the host cannot parse a selector.
    /// - [`RegisterError::Detached`] if the host has no geometry for the element.
    pub fn register<'a>(
        &mut self,
        target: impl Into<Target<'a, H::Element>>,
        entrance: Callbacks,
        exit: Callbacks,
    ) -> Result<Registered, RegisterError> {
        let element = match target.into() {
            Target::Element(element) => element,
            Target::Selector(selector) => match self.host.query_selector(selector) {
                Ok(Some(element)) => element,
                Ok(None) => {
                    return Err(RegisterError::ElementNotFound {
                        selector: selector.into(),
                    });
                }
                Err(reason) => {
                    return Err(RegisterError::InvalidSelector {
                        selector: selector.into(),
                        reason,
                    });
                }
            },
        };
        let rect = self
            .host
            .bounding_rect(&element)
            .ok_or(RegisterError::Detached)?;

        let id = WatchId(self.next_id);
        self.next_id += 1;

        let mut entry = Entry {
            id,
            element,
            flags: BoundaryFlags::empty(),
            entrance,
            exit,
        };
        let mut report = ScrollReport::default();
        let viewport_height = self.host.viewport_height();
        match self.config.initial_pass {
            InitialPass::Fire => entry.apply(rect, viewport_height, &mut report),
            InitialPass::Seed => entry.flags = BoundaryFlags::evaluate(rect, viewport_height),
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            watch = id.get(),
            flags = entry.flags.bits(),
            "registered scroll watch"
        );
        trace_report(&report);

        self.entries.push(entry);
        Ok(Registered { id, report })
    }

    /// Stops watching an entry. No callbacks fire.
    ///
    /// Returns `false` if the id is unknown.
    pub fn unregister(&mut self, id: WatchId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.entries.remove(index);

        #[cfg(feature = "tracing")]
        tracing::debug!(watch = id.get(), "unregistered scroll watch");

        true
    }

    /// Handles one scroll notification: recomputes every entry in registration order.
    pub fn on_scroll(&mut self) -> ScrollReport {
        let mut report = ScrollReport::default();
        let host = &self.host;
        let detached = self.config.detached;
        self.entries
            .retain_mut(|entry| recompute(host, detached, entry, &mut report));
        trace_report(&report);
        report
    }

    /// Recomputes a single entry, outside of a scroll notification.
    ///
    /// Returns `None` if the id is unknown.
    pub fn refresh(&mut self, id: WatchId) -> Option<ScrollReport> {
        let index = self.position(id)?;
        let mut report = ScrollReport::default();
        if !recompute(
            &self.host,
            self.config.detached,
            &mut self.entries[index],
            &mut report,
        ) {
            self.entries.remove(index);
        }
        trace_report(&report);
        Some(report)
    }

    /// Flags of an entry as of its last recompute.
    pub fn flags(&self, id: WatchId) -> Option<BoundaryFlags> {
        self.position(id).map(|i| self.entries[i].flags)
    }

    /// Element of an entry.
    pub fn element(&self, id: WatchId) -> Option<&H::Element> {
        self.position(id).map(|i| &self.entries[i].element)
    }

    /// Ids of all entries, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = WatchId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Entries stay sorted by id: they are appended with increasing ids and only
    // ever removed.
    fn position(&self, id: WatchId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |e| e.id).ok()
    }
}

/// Recomputes one entry. Returns whether it stays registered.
fn recompute<H: ScrollHost>(
    host: &H,
    detached: DetachedPolicy,
    entry: &mut Entry<H::Element>,
    report: &mut ScrollReport,
) -> bool {
    match host.bounding_rect(&entry.element) {
        Some(rect) => {
            entry.apply(rect, host.viewport_height(), report);
            true
        }
        None => {
            report
                .failures
                .push(PassFailure::Detached { watch: entry.id });
            detached == DetachedPolicy::Keep
        }
    }
}

#[cfg(feature = "tracing")]
fn trace_report(report: &ScrollReport) {
    for t in &report.transitions {
        tracing::debug!(
            watch = t.watch.get(),
            condition = t.condition.key(),
            edge = ?t.edge,
            fired = t.fired,
            "boundary transition"
        );
    }
    for failure in &report.failures {
        tracing::warn!(watch = failure.watch().get(), "{failure}");
    }
}

#[cfg(not(feature = "tracing"))]
fn trace_report(_report: &ScrollReport) {}

impl<H> fmt::Debug for ScrollTracker<H>
where
    H: ScrollHost + fmt::Debug,
    H::Element: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollTracker")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("entries", &self.entries)
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoundaryCondition, SelectorError};
    use alloc::rc::Rc;
    use core::cell::Cell;

    /// One element per index; each element is just its rectangle.
    struct FixedHost {
        rects: Vec<Option<Rect>>,
        height: f64,
    }

    impl ScrollHost for FixedHost {
        type Element = usize;

        fn query_selector(&self, selector: &str) -> Result<Option<usize>, SelectorError> {
            let index: usize = selector
                .strip_prefix('#')
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| SelectorError::new("expected `#<index>`"))?;
            Ok((index < self.rects.len()).then_some(index))
        }

        fn bounding_rect(&self, element: &usize) -> Option<Rect> {
            self.rects.get(*element).copied().flatten()
        }

        fn viewport_height(&self) -> f64 {
            self.height
        }
    }

    fn host(rects: &[(f64, f64)]) -> FixedHost {
        FixedHost {
            rects: rects
                .iter()
                .map(|&(t, b)| Some(Rect::new(0.0, t, 10.0, b)))
                .collect(),
            height: 800.0,
        }
    }

    #[test]
    fn ids_are_monotonic_and_lookup_survives_removal() {
        let mut tracker = ScrollTracker::new(host(&[(0.0, 10.0); 3]));
        let a = tracker
            .register(Target::Element(0), Callbacks::new(), Callbacks::new())
            .unwrap()
            .id;
        let b = tracker
            .register("#1", Callbacks::new(), Callbacks::new())
            .unwrap()
            .id;
        let c = tracker
            .register(Target::Element(2), Callbacks::new(), Callbacks::new())
            .unwrap()
            .id;
        assert!(a < b && b < c, "ids follow registration order");

        assert!(tracker.unregister(b));
        assert!(!tracker.unregister(b));
        assert_eq!(tracker.element(c), Some(&2));
        assert_eq!(tracker.ids().collect::<Vec<_>>(), [a, c]);
    }

    #[test]
    fn seed_pass_sets_flags_silently() {
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let mut tracker = ScrollTracker::with_config(
            host(&[(10.0, 20.0)]),
            TrackerConfig::default().with_initial_pass(InitialPass::Seed),
        );
        let reg = tracker
            .register(
                Target::Element(0),
                Callbacks::new().on(BoundaryCondition::TopTop, move || f.set(true)),
                Callbacks::new(),
            )
            .unwrap();

        assert!(reg.report.is_quiet());
        assert!(!fired.get());
        assert_eq!(tracker.flags(reg.id), Some(BoundaryFlags::all()));
    }

    #[test]
    fn refresh_recomputes_one_entry() {
        let mut tracker = ScrollTracker::new(host(&[(10.0, 20.0), (10.0, 20.0)]));
        let a = tracker
            .register(Target::Element(0), Callbacks::new(), Callbacks::new())
            .unwrap()
            .id;
        let b = tracker
            .register(Target::Element(1), Callbacks::new(), Callbacks::new())
            .unwrap()
            .id;

        tracker.host_mut().rects[0] = Some(Rect::new(0.0, -100.0, 10.0, -50.0));
        tracker.host_mut().rects[1] = Some(Rect::new(0.0, -100.0, 10.0, -50.0));

        let report = tracker.refresh(a).unwrap();
        assert_eq!(report.for_watch(a).count(), 2);
        assert_eq!(report.for_watch(b).count(), 0);
        assert_eq!(tracker.flags(b), Some(BoundaryFlags::all()));
        assert!(tracker.refresh(WatchId(99)).is_none());
    }

    #[test]
    fn malformed_selector_is_not_a_missing_element() {
        let mut tracker = ScrollTracker::new(host(&[(0.0, 10.0)]));
        let missing = tracker
            .register("#5", Callbacks::new(), Callbacks::new())
            .unwrap_err();
        assert_eq!(
            missing,
            RegisterError::ElementNotFound {
                selector: "#5".into()
            }
        );

        let malformed = tracker
            .register("row-0", Callbacks::new(), Callbacks::new())
            .unwrap_err();
        assert_eq!(
            malformed,
            RegisterError::InvalidSelector {
                selector: "row-0".into(),
                reason: SelectorError::new("expected `#<index>`"),
            }
        );
        assert!(tracker.is_empty());
    }

    #[test]
    fn set_config_applies_to_later_passes() {
        let mut tracker = ScrollTracker::new(host(&[(10.0, 20.0), (10.0, 20.0)]));
        let a = tracker
            .register(Target::Element(0), Callbacks::new(), Callbacks::new())
            .unwrap()
            .id;
        tracker.host_mut().rects[0] = None;

        let report = tracker.on_scroll();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(tracker.len(), 2, "kept under the default policy");

        tracker.set_config(tracker.config().with_detached(DetachedPolicy::Unregister));
        assert_eq!(tracker.config().detached, DetachedPolicy::Unregister);
        assert_eq!(tracker.flags(a), Some(BoundaryFlags::all()), "flags survive");

        let report = tracker.on_scroll();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(tracker.len(), 1);
        assert!(tracker.flags(a).is_none());

        // Seeding only affects registrations made after the switch.
        tracker.set_config(tracker.config().with_initial_pass(InitialPass::Seed));
        let b = tracker
            .register(Target::Element(1), Callbacks::new(), Callbacks::new())
            .unwrap();
        assert!(b.report.is_quiet());
    }
}
