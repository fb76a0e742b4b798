use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pm_core::Image;
use pm_mask::{MaskConfig, MaskParams, SilhouetteAccumulator, binarize};

fn synthetic_frame(width: usize, height: usize, phase: usize) -> Image<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(((x + 3 * y + phase) % 251) as u8);
        }
    }
    Image::from_vec(width, height, data).expect("valid image")
}

fn bench_binarize(c: &mut Criterion) {
    let frame = synthetic_frame(1280, 720, 0);
    let view = frame.as_view();
    let params = MaskParams::default();
    let cfg = MaskConfig::default();

    c.bench_function("binarize_1280x720", |b| {
        b.iter(|| {
            let out = binarize(black_box(&view), &params, &cfg, Some(600));
            black_box(out);
        });
    });
}

fn bench_accumulate(c: &mut Criterion) {
    let params = MaskParams::default();
    let cfg = MaskConfig::default();
    let masks: Vec<Image<u8>> = (0..8)
        .map(|i| binarize(&synthetic_frame(1280, 720, i * 17).as_view(), &params, &cfg, None))
        .collect();

    c.bench_function("accumulate_8_masks_1280x720", |b| {
        b.iter(|| {
            let mut acc = SilhouetteAccumulator::new();
            for m in &masks {
                acc.ingest(black_box(&m.as_view())).expect("same extent");
            }
            black_box(acc.frames());
        });
    });
}

criterion_group!(benches, bench_binarize, bench_accumulate);
criterion_main!(benches);
