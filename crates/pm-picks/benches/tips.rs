use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pm_core::Point2i;
use pm_picks::{SpacingEstimator, TipMatcher, suppress_horizontal_neighbors, topmost_per_block};

/// Saw-tooth outline with `teeth` apexes across `width` pixels.
fn sawtooth(width: i32, teeth: i32, step: i32) -> Vec<Point2i> {
    let period = width / teeth;
    (0..width)
        .step_by(step as usize)
        .map(|x| {
            let phase = x % period;
            let y = (phase - period / 2).abs();
            Point2i::new(x, y)
        })
        .collect()
}

fn bench_suppress(c: &mut Criterion) {
    let points = sawtooth(5120, 24, 4);
    c.bench_function("suppress_horizontal_neighbors_1280pts", |b| {
        b.iter(|| {
            let kept = suppress_horizontal_neighbors(black_box(&points), 80);
            black_box(kept.len());
        });
    });
}

fn bench_block_scan_and_match(c: &mut Criterion) {
    let points = sawtooth(5120, 24, 1);
    let reference = suppress_horizontal_neighbors(&sawtooth(5120, 24, 8), 80);
    let matcher = TipMatcher::default();

    c.bench_function("block_scan_and_match_5120", |b| {
        b.iter(|| {
            let raw = topmost_per_block(black_box(&points), 5120, 500);
            let pairs = matcher.match_tips(&raw, &reference);
            black_box(pairs.len());
        });
    });
}

fn bench_spacing(c: &mut Criterion) {
    let xs: Vec<i32> = (0..64).map(|i| i * 213 + (i * 7) % 5).collect();
    let est = SpacingEstimator::default();
    c.bench_function("spacing_estimate_64", |b| {
        b.iter(|| {
            let s = est.estimate(black_box(&xs), 16384);
            black_box(s.lattice.len());
        });
    });
}

criterion_group!(benches, bench_suppress, bench_block_scan_and_match, bench_spacing);
criterion_main!(benches);
