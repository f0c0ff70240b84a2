use blurlab_filter::{
    convolve_accelerated, convolve_direct, convolve_fft, convolve_separable, FilterError,
    Kernel1d, Kernel2d, SimdDot,
};
use blurlab_image::PlanarImage;

/// Smooth deterministic content with gradients along both axes.
fn test_image(width: usize, height: usize, channels: usize) -> PlanarImage {
    let mut data = vec![0.0f32; width * height * channels];
    for c in 0..channels {
        for y in 0..height {
            for x in 0..width {
                let fx = x as f32 / width as f32;
                let fy = y as f32 / height as f32;
                let phase = c as f32 * 0.7;
                data[(c * height + y) * width + x] = 128.0
                    + 80.0 * (fx * 9.2 + phase).sin() * (fy * 6.1 - phase).cos()
                    + 20.0 * fx
                    - 15.0 * fy;
            }
        }
    }
    PlanarImage::from_planar(&data, width, height, channels)
        .unwrap_or_else(|e| panic!("test image: {e}"))
}

fn max_abs_diff(a: &PlanarImage, b: &PlanarImage) -> f32 {
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}

fn max_abs_diff_interior(a: &PlanarImage, b: &PlanarImage, margin: usize) -> f32 {
    let width = a.width();
    let height = a.height();
    let mut max = 0.0f32;
    for c in 0..a.num_channels() {
        let pa = a.channel(c).unwrap_or_else(|e| panic!("channel: {e}"));
        let pb = b.channel(c).unwrap_or_else(|e| panic!("channel: {e}"));
        for y in margin..height - margin {
            for x in margin..width - margin {
                let i = y * width + x;
                max = max.max((pa[i] - pb[i]).abs());
            }
        }
    }
    max
}

#[test]
fn engines_agree_on_rgb_image() -> Result<(), FilterError> {
    let src = test_image(32, 24, 3);
    let kernel_2d = Kernel2d::gaussian(7, 2.0);
    let kernel_1d = Kernel1d::gaussian(7, 2.0);

    let direct = convolve_direct(&src, &kernel_2d)?;
    let accelerated = convolve_accelerated(&src, &kernel_2d, &SimdDot)?;
    let separable = convolve_separable(&src, &kernel_1d)?;
    let fft = convolve_fft(&src, &kernel_2d)?;

    let diff = max_abs_diff(&direct, &accelerated);
    assert!(diff < 1e-3, "direct vs accelerated: max diff {diff}");

    let diff = max_abs_diff(&direct, &separable);
    assert!(diff < 1e-3, "direct vs separable: max diff {diff}");

    // circular borders differ from clamped ones, the interior must agree
    let diff = max_abs_diff_interior(&direct, &fft, kernel_2d.half());
    assert!(diff < 1e-2, "direct vs fft interior: max diff {diff}");
    Ok(())
}

#[test]
fn engines_agree_on_prime_sized_gray_image() -> Result<(), FilterError> {
    // prime extents exercise the slow transform paths
    let src = test_image(17, 13, 1);
    let kernel_2d = Kernel2d::gaussian(5, 1.0);
    let kernel_1d = Kernel1d::gaussian(5, 1.0);

    let direct = convolve_direct(&src, &kernel_2d)?;
    let accelerated = convolve_accelerated(&src, &kernel_2d, &SimdDot)?;
    let separable = convolve_separable(&src, &kernel_1d)?;
    let fft = convolve_fft(&src, &kernel_2d)?;

    assert!(max_abs_diff(&direct, &accelerated) < 1e-3);
    assert!(max_abs_diff(&direct, &separable) < 1e-3);
    assert!(max_abs_diff_interior(&direct, &fft, kernel_2d.half()) < 1e-2);
    Ok(())
}

#[test]
fn outputs_are_fresh_and_deterministic() -> Result<(), FilterError> {
    let src = test_image(16, 12, 2);
    let kernel = Kernel2d::gaussian(5, 1.5);

    let first = convolve_direct(&src, &kernel)?;
    let second = convolve_direct(&src, &kernel)?;

    // every call owns its own storage and reproduces the same values
    assert_ne!(first.as_slice().as_ptr(), src.as_slice().as_ptr());
    assert_ne!(first.as_slice().as_ptr(), second.as_slice().as_ptr());
    assert_eq!(first.as_slice(), second.as_slice());
    Ok(())
}
