// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal-on-scroll over a headless page.
//!
//! Every `.scroll-element` block loses its `hidden` class once its top edge
//! rises above the bottom of the viewport, and gets it back when it drops
//! below again.
//!
//! Run:
//! - `cargo run -p understory_scroll_events_demos --example reveal_on_scroll`

use understory_scroll_events::{BoundaryCondition, Callbacks, ScrollTracker, Target};
use understory_scroll_events_demos::{init_tracing, page::Page};

fn main() {
    init_tracing();

    let page = Page::new(600.0);
    page.push("intro", "header", 0.0, 500.0);
    for i in 0..6 {
        page.push(&format!("card-{i}"), "scroll-element", 80.0, 240.0);
    }

    let mut tracker = ScrollTracker::new(page.clone());
    for index in page.by_class("scroll-element") {
        let Some(classes) = page.classes(index) else {
            continue;
        };
        classes.borrow_mut().insert("hidden".into());

        let (show, hide) = (classes.clone(), classes);
        let entrance = Callbacks::new().on(BoundaryCondition::BottomTop, move || {
            show.borrow_mut().remove("hidden");
        });
        let exit = Callbacks::new().on(BoundaryCondition::BottomTop, move || {
            hide.borrow_mut().insert("hidden".into());
        });
        if let Err(e) = tracker.register(Target::Element(index), entrance, exit) {
            eprintln!("skipping block {index}: {e}");
        }
    }

    let print_state = |label: &str| {
        let shown: Vec<String> = page
            .by_class("scroll-element")
            .into_iter()
            .filter(|&i| {
                page.classes(i)
                    .is_some_and(|classes| !classes.borrow().contains("hidden"))
            })
            .filter_map(|i| page.id(i))
            .collect();
        println!("{label:>10} (scroll {:>6.1}): visible {shown:?}", page.scroll_y());
    };

    print_state("loaded");
    for y in [300.0, 800.0, 1400.0, 2200.0, 900.0, 0.0] {
        page.scroll_to(y);
        let report = tracker.on_scroll();
        print_state(&format!("{} flips", report.transitions.len()));
    }
}
