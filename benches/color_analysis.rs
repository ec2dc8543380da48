use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use urine_colorscan::{image_loader, AnalysisEngine, AnalysisMode, RoiStrategy};
use urine_colorscan::sampling::RegionSampler;

fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([200 + (x % 40) as u8, 150 + (y % 50) as u8, 40 + ((x + y) % 30) as u8])
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode benchmark image");
    buf
}

fn benchmark_color_analysis(c: &mut Criterion) {
    let bytes = sample_png(1600, 1200);
    let engine = AnalysisEngine::default();

    c.bench_function("analyze_1600x1200_png", |b| {
        b.iter(|| engine.analyze_bytes(black_box(&bytes), AnalysisMode::NitriteWhite))
    });

    let image = image_loader::decode(&bytes).expect("decode benchmark image");
    let sampler = RegionSampler::new();

    c.bench_function("sample_proportional_crop", |b| {
        b.iter(|| sampler.sample(black_box(&image), RoiStrategy::ProportionalCrop))
    });

    c.bench_function("sample_fixed_canonical", |b| {
        b.iter(|| sampler.sample(black_box(&image), RoiStrategy::FixedCanonical))
    });
}

criterion_group!(benches, benchmark_color_analysis);
criterion_main!(benches);
