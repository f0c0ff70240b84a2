use blurlab_image::PlanarImage;

use crate::direct::clamp_coord;
use crate::dot::DotProduct;
use crate::error::FilterError;
use crate::kernels::Kernel2d;

/// Convolves `src` with a dense 2D kernel through a dot-product backend.
///
/// Semantically identical to [`crate::convolve_direct`]: same clamp-to-edge
/// borders, same scan order. Each `K x K` neighborhood is gathered into a flat
/// scratch buffer and reduced against the flattened kernel by `dot`, so only
/// the summation grouping (and therefore the floating-point rounding) may
/// differ from the reference.
///
/// # Arguments
///
/// * `src` - The input image; read only, never mutated.
/// * `kernel` - The 2D kernel to apply.
/// * `dot` - The dot-product backend, e.g. [`crate::ScalarDot`] or
///   [`crate::SimdDot`].
///
/// # Errors
///
/// Returns [`FilterError::Image`] if the output allocation fails.
pub fn convolve_accelerated<D: DotProduct>(
    src: &PlanarImage,
    kernel: &Kernel2d,
    dot: &D,
) -> Result<PlanarImage, FilterError> {
    let width = src.width();
    let height = src.height();
    let mut dst = PlanarImage::new(width, height, src.num_channels())?;

    let size = kernel.size();
    let half = kernel.half() as isize;
    let weights = kernel.weights();

    // one scratch patch per call, reused across every pixel
    let mut patch = vec![0.0f32; size * size];

    for c in 0..src.num_channels() {
        let src_plane = src.channel(c)?;
        let dst_plane = dst.channel_mut(c)?;
        for y in 0..height {
            for x in 0..width {
                gather_patch(src_plane, width, height, x, y, size, half, &mut patch);
                dst_plane[y * width + x] = dot.dot(&patch, weights);
            }
        }
    }
    Ok(dst)
}

/// Copies the clamp-to-edge `K x K` neighborhood of `(x, y)` into `patch`,
/// row-major, matching the direct engine's tap order.
#[allow(clippy::too_many_arguments)]
fn gather_patch(
    plane: &[f32],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    size: usize,
    half: isize,
    patch: &mut [f32],
) {
    for ky in 0..size {
        let sy = clamp_coord(y as isize + ky as isize - half, height);
        let src_row = &plane[sy * width..(sy + 1) * width];
        let patch_row = &mut patch[ky * size..(ky + 1) * size];
        for (kx, tap) in patch_row.iter_mut().enumerate() {
            let sx = clamp_coord(x as isize + kx as isize - half, width);
            *tap = src_row[sx];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direct::convolve_direct;
    use crate::dot::{ScalarDot, SimdDot};

    fn test_image(width: usize, height: usize, channels: usize) -> PlanarImage {
        let data: Vec<f32> = (0..width * height * channels)
            .map(|i| ((i * 7 + 3) % 251) as f32)
            .collect();
        PlanarImage::from_planar(&data, width, height, channels)
            .unwrap_or_else(|e| panic!("test image: {e}"))
    }

    #[test]
    fn scalar_backend_matches_direct_exactly() -> Result<(), FilterError> {
        let src = test_image(9, 7, 3);
        let kernel = Kernel2d::gaussian(5, 2.0);
        let direct = convolve_direct(&src, &kernel)?;
        let accelerated = convolve_accelerated(&src, &kernel, &ScalarDot)?;
        // same values, same summation order
        assert_eq!(direct.as_slice(), accelerated.as_slice());
        Ok(())
    }

    #[test]
    fn simd_backend_matches_direct_within_tolerance() -> Result<(), FilterError> {
        let src = test_image(16, 11, 3);
        let kernel = Kernel2d::gaussian(7, 2.0);
        let direct = convolve_direct(&src, &kernel)?;
        let accelerated = convolve_accelerated(&src, &kernel, &SimdDot)?;
        for (a, b) in direct.as_slice().iter().zip(accelerated.as_slice()) {
            assert!((a - b).abs() < 1e-3, "direct {a} vs simd {b}");
        }
        Ok(())
    }

    #[test]
    fn even_kernel_size_keeps_engine_parity() -> Result<(), FilterError> {
        let src = test_image(8, 8, 1);
        let kernel = Kernel2d::gaussian(4, 1.5);
        let direct = convolve_direct(&src, &kernel)?;
        let accelerated = convolve_accelerated(&src, &kernel, &ScalarDot)?;
        assert_eq!(direct.as_slice(), accelerated.as_slice());
        Ok(())
    }

    #[test]
    fn gather_patch_clamps_to_edges() {
        // 3x3 ramp plane, patch at the top-left corner
        let plane: Vec<f32> = (0..9).map(|i| i as f32).collect();
        let mut patch = vec![0.0f32; 9];
        gather_patch(&plane, 3, 3, 0, 0, 3, 1, &mut patch);
        #[rustfmt::skip]
        let expected = [
            0.0, 0.0, 1.0,
            0.0, 0.0, 1.0,
            3.0, 3.0, 4.0,
        ];
        assert_eq!(patch, expected);
    }
}
