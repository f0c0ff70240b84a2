use blurlab_image::PlanarImage;

use crate::direct::clamp_coord;
use crate::error::FilterError;
use crate::kernels::Kernel1d;

/// Convolves `src` with the separable Gaussian `kernel`, one axis at a time.
///
/// Runs a horizontal 1D pass into an intermediate image, then a vertical 1D
/// pass over that intermediate. The composition equals a dense convolution
/// with the outer product `kernel x kernel` (up to floating-point rounding)
/// at `O(2 * W * H * K)` cost instead of `O(W * H * K^2)`. Borders are
/// clamp-to-edge on both passes. The intermediate is dropped before this
/// function returns.
///
/// # Arguments
///
/// * `src` - The input image; read only, never mutated.
/// * `kernel` - The 1D kernel applied along each axis.
///
/// # Errors
///
/// Returns [`FilterError::Image`] if the output or intermediate allocation
/// fails.
///
/// # Example
///
/// ```
/// use blurlab_filter::{convolve_separable, Kernel1d};
/// use blurlab_image::PlanarImage;
///
/// let src = PlanarImage::from_planar(&[100.0; 64], 8, 8, 1)?;
/// let dst = convolve_separable(&src, &Kernel1d::gaussian(3, 1.0))?;
/// assert!(dst.as_slice().iter().all(|v| (v - 100.0).abs() < 1e-3));
/// # Ok::<(), blurlab_filter::FilterError>(())
/// ```
pub fn convolve_separable(
    src: &PlanarImage,
    kernel: &Kernel1d,
) -> Result<PlanarImage, FilterError> {
    let horizontal = convolve_rows(src, kernel)?;
    convolve_cols(&horizontal, kernel)
}

/// Horizontal pass: convolves every row with `kernel`.
fn convolve_rows(src: &PlanarImage, kernel: &Kernel1d) -> Result<PlanarImage, FilterError> {
    let width = src.width();
    let height = src.height();
    let mut dst = PlanarImage::new(width, height, src.num_channels())?;

    let half = kernel.half() as isize;
    let weights = kernel.weights();

    for c in 0..src.num_channels() {
        let src_plane = src.channel(c)?;
        let dst_plane = dst.channel_mut(c)?;
        for y in 0..height {
            let src_row = &src_plane[y * width..(y + 1) * width];
            let dst_row = &mut dst_plane[y * width..(y + 1) * width];
            for (x, out) in dst_row.iter_mut().enumerate() {
                let mut sum = 0.0f32;
                for (k, w) in weights.iter().enumerate() {
                    let sx = clamp_coord(x as isize + k as isize - half, width);
                    sum += src_row[sx] * w;
                }
                *out = sum;
            }
        }
    }
    Ok(dst)
}

/// Vertical pass: convolves every column with `kernel`.
fn convolve_cols(src: &PlanarImage, kernel: &Kernel1d) -> Result<PlanarImage, FilterError> {
    let width = src.width();
    let height = src.height();
    let mut dst = PlanarImage::new(width, height, src.num_channels())?;

    let half = kernel.half() as isize;
    let weights = kernel.weights();

    for c in 0..src.num_channels() {
        let src_plane = src.channel(c)?;
        let dst_plane = dst.channel_mut(c)?;
        for y in 0..height {
            let dst_row = &mut dst_plane[y * width..(y + 1) * width];
            for (x, out) in dst_row.iter_mut().enumerate() {
                let mut sum = 0.0f32;
                for (k, w) in weights.iter().enumerate() {
                    let sy = clamp_coord(y as isize + k as isize - half, height);
                    sum += src_plane[sy * width + x] * w;
                }
                *out = sum;
            }
        }
    }
    Ok(dst)
}
