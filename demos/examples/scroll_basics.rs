// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary condition basics.
//!
//! Scroll one block through the viewport and print every entrance/exit for
//! the four boundary conditions, plus a fallible callback whose failure is
//! reported without stopping the pass.
//!
//! Run:
//! - `RUST_LOG=understory_scroll_events=debug cargo run -p understory_scroll_events_demos --example scroll_basics`

use understory_scroll_events::{BoundaryCondition, CallbackError, Callbacks, ScrollTracker};
use understory_scroll_events_demos::{init_tracing, page::Page};

fn main() {
    init_tracing();

    let page = Page::new(400.0);
    page.push("spacer", "spacer", 0.0, 600.0);
    page.push("target", "box", 0.0, 150.0);

    let mut entrance = Callbacks::new();
    let mut exit = Callbacks::new();
    for condition in BoundaryCondition::ALL {
        entrance = entrance.on(condition, move || {
            println!("  enter {}", condition.key());
        });
        exit = exit.on(condition, move || println!("  exit  {}", condition.key()));
    }
    // Replace one exit callback with a fallible one.
    exit = exit.try_on(BoundaryCondition::TopBottom, || {
        Err(CallbackError::msg("element left through the top"))
    });

    let mut tracker = ScrollTracker::new(page.clone());
    println!("register #target:");
    let registered = match tracker.register("#target", entrance, exit) {
        Ok(registered) => registered,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    for y in (0..=900).step_by(150) {
        page.scroll_to(f64::from(y));
        println!("scroll to {y}:");
        let report = tracker.on_scroll();
        for failure in &report.failures {
            println!("  failure: {failure}");
        }
    }

    println!(
        "final flags: {:?}",
        tracker.flags(registered.id).unwrap_or_default()
    );
}
