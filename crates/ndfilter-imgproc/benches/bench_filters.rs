use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ndfilter_image::Image;
use ndfilter_imgproc::filter::{gaussian_filter, median_filter, wiener};
use ndfilter_imgproc::padding::PaddingMode;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Denoise Filters");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image_data = (0..width * height)
            .map(|i| (i % 255) as f32)
            .collect::<Vec<_>>();
        let image_size = [*width, *height].into();

        let image_f32 = Image::<_, 1>::new(image_size, image_data).unwrap();
        let output_f32 = Image::<_, 1>::from_size_val(image_size, 0.0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("gaussian_filter_sigma3", &parameter_string),
            &(&image_f32, &output_f32),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| {
                    black_box(gaussian_filter(
                        src,
                        &mut dst,
                        (3.0, 3.0),
                        PaddingMode::Reflect,
                    ))
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("median_filter_5x5", &parameter_string),
            &(&image_f32, &output_f32),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(median_filter(src, &mut dst, (5, 5), PaddingMode::Reflect)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("wiener_5x5", &parameter_string),
            &(&image_f32, &output_f32),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| black_box(wiener(src, &mut dst, (5, 5), None)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
