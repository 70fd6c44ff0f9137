// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How the recompute pass run by [`register`](crate::ScrollTracker::register) treats
/// conditions that already hold.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InitialPass {
    /// Flags start cleared and the pass runs like any other: every condition that
    /// already holds fires its entrance callback before `register` returns.
    #[default]
    Fire,
    /// Flags are seeded from the current geometry without firing callbacks.
    Seed,
}

/// What a pass does with an entry whose element has no geometry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DetachedPolicy {
    /// Leave the entry and its flags untouched; it is evaluated again next pass.
    #[default]
    Keep,
    /// Drop the entry from the registry.
    Unregister,
}

/// Tracker configuration.
///
/// ```
/// use understory_scroll_events::{DetachedPolicy, InitialPass, TrackerConfig};
///
/// let config = TrackerConfig::default()
///     .with_initial_pass(InitialPass::Seed)
///     .with_detached(DetachedPolicy::Unregister);
/// assert_eq!(config.initial_pass, InitialPass::Seed);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TrackerConfig {
    /// Behavior of the pass run at registration.
    pub initial_pass: InitialPass,
    /// Behavior for entries whose element lost its geometry.
    pub detached: DetachedPolicy,
}

impl TrackerConfig {
    /// Sets [`TrackerConfig::initial_pass`].
    #[must_use]
    pub fn with_initial_pass(mut self, initial_pass: InitialPass) -> Self {
        self.initial_pass = initial_pass;
        self
    }

    /// Sets [`TrackerConfig::detached`].
    #[must_use]
    pub fn with_detached(mut self, detached: DetachedPolicy) -> Self {
        self.detached = detached;
        self
    }
}
