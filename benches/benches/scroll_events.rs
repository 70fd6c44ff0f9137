// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_scroll_events::{
    BoundaryCondition, Callbacks, ScrollHost, ScrollTracker, SelectorError, Target,
};

const ROW: f64 = 40.0;
const VIEWPORT: f64 = 800.0;

/// Uniform column of rows, scrolled by a shared offset.
struct Column {
    scroll_y: Rc<Cell<f64>>,
}

impl ScrollHost for Column {
    type Element = u32;

    fn query_selector(&self, _selector: &str) -> Result<Option<u32>, SelectorError> {
        Ok(None)
    }

    fn bounding_rect(&self, row: &u32) -> Option<Rect> {
        let top = f64::from(*row) * ROW - self.scroll_y.get();
        Some(Rect::new(0.0, top, 100.0, top + ROW))
    }

    fn viewport_height(&self) -> f64 {
        VIEWPORT
    }
}

fn build(rows: u32, with_callbacks: bool) -> (ScrollTracker<Column>, Rc<Cell<f64>>) {
    let scroll_y = Rc::new(Cell::new(0.0));
    let mut tracker = ScrollTracker::new(Column {
        scroll_y: scroll_y.clone(),
    });
    let hits = Rc::new(Cell::new(0_u64));
    for row in 0..rows {
        let mut entrance = Callbacks::new();
        let mut exit = Callbacks::new();
        if with_callbacks {
            for c in BoundaryCondition::ALL {
                let (a, b) = (hits.clone(), hits.clone());
                entrance = entrance.on(c, move || a.set(a.get() + 1));
                exit = exit.on(c, move || b.set(b.get() + 1));
            }
        }
        tracker
            .register(Target::Element(row), entrance, exit)
            .expect("row has geometry");
    }
    (tracker, scroll_y)
}

fn bench_steady_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_events/steady");

    // No geometry change between passes: measures evaluation cost alone.
    for rows in [128_u32, 1_024, 8_192] {
        let (mut tracker, _) = build(rows, true);
        group.throughput(Throughput::Elements(u64::from(rows)));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| black_box(tracker.on_scroll()));
        });
    }

    group.finish();
}

fn bench_flipping_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_events/flipping");

    // Alternate between two offsets a viewport apart so every visible row flips.
    for rows in [128_u32, 1_024, 8_192] {
        for with_callbacks in [false, true] {
            let (mut tracker, scroll_y) = build(rows, with_callbacks);
            let label = if with_callbacks { "callbacks" } else { "bare" };
            group.throughput(Throughput::Elements(u64::from(rows)));
            group.bench_with_input(BenchmarkId::new(label, rows), &rows, |b, _| {
                let mut flip = false;
                b.iter(|| {
                    flip = !flip;
                    scroll_y.set(if flip { VIEWPORT } else { 0.0 });
                    black_box(tracker.on_scroll())
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_steady_pass, bench_flipping_pass);
criterion_main!(benches);
