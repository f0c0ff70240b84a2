use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use blurlab_filter::{
    convolve_accelerated, convolve_direct, convolve_fft, convolve_separable, Kernel1d, Kernel2d,
    ScalarDot, SimdDot,
};
use blurlab_image::PlanarImage;

fn bench_image(width: usize, height: usize) -> PlanarImage {
    let data: Vec<f32> = (0..width * height * 3).map(|i| (i % 256) as f32).collect();
    PlanarImage::from_planar(&data, width, height, 3).unwrap()
}

fn bench_convolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolve");

    for (width, height) in [(256, 256), (512, 512)].iter() {
        for kernel_size in [3, 7, 15].iter() {
            group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            let image = bench_image(*width, *height);
            let kernel_2d = Kernel2d::gaussian(*kernel_size, 2.0);
            let kernel_1d = Kernel1d::gaussian(*kernel_size, 2.0);

            group.bench_with_input(
                BenchmarkId::new("direct", &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(convolve_direct(i, &kernel_2d))),
            );

            group.bench_with_input(
                BenchmarkId::new("accelerated_scalar", &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(convolve_accelerated(i, &kernel_2d, &ScalarDot))),
            );

            group.bench_with_input(
                BenchmarkId::new("accelerated_simd", &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(convolve_accelerated(i, &kernel_2d, &SimdDot))),
            );

            group.bench_with_input(
                BenchmarkId::new("separable", &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(convolve_separable(i, &kernel_1d))),
            );

            group.bench_with_input(
                BenchmarkId::new("fft", &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(convolve_fft(i, &kernel_2d))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_convolve);
criterion_main!(benches);
