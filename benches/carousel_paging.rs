// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for carousel paging and the activation hot path.
//!
//! Measures the performance of:
//! - Scroll-settle computation across a swipe's worth of offsets
//! - The visibility tracker's message handling
//! - The provider-transform URL rewrite

use criterion::{criterion_group, criterion_main, Criterion};
use iced_feed::carousel::{visibility, CarouselState, VisibilityTracker};
use iced_feed::media::{build_items, MediaSource};
use iced_feed::thumbnail::{still_frame_url, StillWidth};
use std::hint::black_box;

const PAGE_WIDTH: f32 = 360.0;

fn sample_carousel(pages: usize) -> CarouselState {
    let sources: Vec<MediaSource> = (0..pages)
        .map(|i| MediaSource::new(format!("https://cdn.example/media_{i}.mp4")))
        .collect();
    CarouselState::new(build_items(&sources))
}

/// Benchmark settle computation over a full swipe of scroll reports.
fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel_paging");

    group.bench_function("settle_swipe", |b| {
        b.iter(|| {
            let mut state = sample_carousel(10);
            for step in 0..100_u32 {
                let offset = (step as f32) * (PAGE_WIDTH * 10.0 / 100.0);
                black_box(state.settle(offset, PAGE_WIDTH));
            }
            black_box(&state);
        });
    });

    group.finish();
}

/// Benchmark the visibility tracker's arm/cancel/fire cycle.
fn bench_visibility(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel_paging");

    group.bench_function("visibility_cycle", |b| {
        b.iter(|| {
            let mut tracker = VisibilityTracker::new();
            for _ in 0..50 {
                let effect = tracker.handle(visibility::Message::PostVisibility(true));
                if let visibility::Effect::ArmDwell { generation } = effect {
                    black_box(
                        tracker.handle(visibility::Message::DwellElapsed { generation }),
                    );
                }
                black_box(tracker.handle(visibility::Message::PostVisibility(false)));
            }
            black_box(&tracker);
        });
    });

    group.finish();
}

/// Benchmark the provider-transform rewrite.
fn bench_provider_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel_paging");

    group.bench_function("still_frame_url", |b| {
        b.iter(|| {
            black_box(still_frame_url(
                black_box("https://media.example.com/upload/abc/def.mp4"),
                StillWidth::default(),
            ))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_settle,
    bench_visibility,
    bench_provider_transform
);
criterion_main!(benches);
