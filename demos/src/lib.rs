// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the scroll events demos.

pub mod page;

/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG`.
///
/// Defaults to `debug` for `understory_scroll_events` so transitions show up.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("understory_scroll_events=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
