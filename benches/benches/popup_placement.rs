// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_popup::event::{PointerEvent, PointerKind};
use understory_popup::host::ScreenMetrics;
use understory_popup::panel::{ContentSource, ListPanel, PopupContent};
use understory_popup::placement::{PlacementRequest, compute_placement};
use understory_popup::router::{EventRouter, Localizer};
use understory_popup::settings::PopupSettings;
use understory_popup::types::{AnchorQuad, WritingDirection};

struct Rows(usize);

impl ContentSource for Rows {
    fn refresh_items_and_selection(&mut self) {}
    fn item_count(&self) -> usize {
        self.0
    }
    fn current_selection_index(&self) -> Option<usize> {
        Some(self.0 / 2)
    }
    fn row_height(&self, index: usize) -> f64 {
        if index % 5 == 0 { 24.0 } else { 18.0 }
    }
    fn item_width(&self, index: usize) -> f64 {
        (index % 37) as f64 * 4.0 + 40.0
    }
    fn item_tooltip(&self, _index: usize) -> String {
        String::new()
    }
    fn value_changed(&mut self, _index: usize) {}
}

struct Screen;

impl ScreenMetrics for Screen {
    fn rect_to_screen(&self, rect: Rect) -> Rect {
        rect
    }
    fn current_window_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 800.0)
    }
    fn current_screen_bounds(&self, _anchor_hint: Rect) -> Rect {
        self.current_window_rect()
    }
}

/// Anchors spread over the screen so every containment branch runs.
fn gen_anchors(n: usize) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * 1280.0 / n as f64;
            let y0 = y as f64 * 800.0 / n as f64;
            out.push(Rect::new(x0, y0, x0 + 160.0, y0 + 22.0));
        }
    }
    out
}

fn request(anchor: Rect, direction: WritingDirection) -> PlacementRequest {
    let quad = AnchorQuad::from_rect(anchor);
    PlacementRequest {
        anchor: quad,
        control_height: anchor.height(),
        transform_offset: quad.transform_offset(anchor.height()),
        initial_corner: quad.p4,
        direction,
    }
}

fn bench_placement(c: &mut Criterion) {
    let settings = PopupSettings::default();
    let anchors = gen_anchors(16);
    let mut group = c.benchmark_group("placement");
    group.throughput(Throughput::Elements(anchors.len() as u64));
    for &items in &[10_usize, 100, 1000] {
        for direction in [WritingDirection::Ltr, WritingDirection::Rtl] {
            group.bench_function(format!("{items}_items_{direction:?}"), |b| {
                b.iter_batched(
                    || {
                        let mut panel = ListPanel::new(Rows(items), settings);
                        panel.set_base_width(158.0);
                        panel.update_from_source();
                        panel
                    },
                    |mut panel| {
                        for &anchor in &anchors {
                            let p = compute_placement(
                                &mut panel,
                                &Screen,
                                &request(anchor, direction),
                                &settings,
                            );
                            black_box(p);
                        }
                        black_box(panel.size());
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let settings = PopupSettings::default();
    let mut group = c.benchmark_group("layout");
    for &items in &[100_usize, 10_000] {
        let mut panel = ListPanel::new(Rows(items), settings);
        panel.update_from_source();
        group.bench_function(format!("{items}_items"), |b| {
            b.iter(|| {
                panel.set_max_height(black_box(300.0));
                panel.layout();
                black_box(panel.popup_content_height())
            });
        });
    }
    group.finish();
}

fn bench_routing(c: &mut Criterion) {
    let router = EventRouter::new(Localizer::new(Point::new(1.0, 1.0)), 120.0);
    let events: Vec<PointerEvent> = (0..1024)
        .map(|i| PointerEvent::new(PointerKind::Move, Point::new(i as f64 % 200.0, i as f64)))
        .collect();
    let mut group = c.benchmark_group("routing");
    group.throughput(Throughput::Elements(events.len() as u64));
    group.bench_function("route_pointer", |b| {
        b.iter(|| {
            let mut acc = Vec2::ZERO;
            for ev in &events {
                acc += router.route_pointer(black_box(ev)).position.to_vec2();
            }
            black_box(acc)
        });
    });
    group.bench_function("row_hit_test", |b| {
        let mut panel = ListPanel::new(Rows(1000), tall_settings());
        panel.update_from_source();
        b.iter(|| {
            let mut hits = 0;
            for ev in &events {
                if panel.row_at(router.route_pointer(ev).position).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        });
    });
    group.finish();
}

fn tall_settings() -> PopupSettings {
    PopupSettings {
        default_max_height: 800.0,
        ..PopupSettings::default()
    }
}

criterion_group!(benches, bench_placement, bench_layout, bench_routing);
criterion_main!(benches);
