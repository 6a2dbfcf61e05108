//! Benchmarks for waveform generation and the mutation operators.
//!
//! Run with: cargo bench
//!
//! A mutation cycle copies, transforms, and reinstalls the whole loop every
//! 200ms tick, so per-operator cost over a realistic loop length is what
//! matters here.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use driftloop::{mutate, wave, MutationKind, WaveKind};

/// Loop lengths from a high pitch up to a 32-period noise buffer.
const LOOP_SIZES: &[usize] = &[64, 256, 1024, 3200];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for kind in WaveKind::ALL {
        group.bench_function(kind.name(), |b| {
            b.iter(|| wave::generate(black_box(440.0), kind, 44_100).unwrap());
        });
    }
    group.finish();
}

fn bench_mutate(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutate");
    for &size in LOOP_SIZES {
        let base = wave::generate(44_100.0 / size as f32, WaveKind::Saw, 44_100)
            .unwrap()
            .into_samples();
        for kind in MutationKind::ALL {
            group.bench_function(format!("{}/{}", kind.name(), size), |b| {
                let mut work = base.clone();
                b.iter(|| {
                    kind.apply(black_box(&mut work), black_box(5.0));
                });
            });
        }
    }
    group.finish();
}

fn bench_smoothify_convergence(c: &mut Criterion) {
    // smoothify is the only operator needing a scratch copy per call.
    c.bench_function("smoothify/1024x8", |b| {
        let base = wave::generate(43.0, WaveKind::Square, 44_100)
            .unwrap()
            .into_samples();
        b.iter(|| {
            let mut work = base.clone();
            for _ in 0..8 {
                mutate::smoothify(black_box(&mut work));
            }
            work
        });
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_mutate,
    bench_smoothify_convergence
);
criterion_main!(benches);
