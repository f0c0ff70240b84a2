use blurlab_image::PlanarImage;

use crate::error::FilterError;
use crate::kernels::Kernel2d;

/// Convolves `src` with a dense 2D kernel, clamping reads to the image edge.
///
/// Walks every output pixel and accumulates the full `K x K` window in
/// row-major tap order, `O(W*H*K^2)`. This engine is the semantic reference:
/// the accelerated, separable and fourier engines are all judged against its
/// output.
///
/// # Arguments
///
/// * `src` - The input image; read only, never mutated.
/// * `kernel` - The 2D kernel to apply.
///
/// # Returns
///
/// A freshly allocated image of the same size, owned by the caller.
///
/// # Errors
///
/// Returns [`FilterError::Image`] if the output allocation fails.
///
/// # Example
///
/// ```
/// use blurlab_filter::{convolve_direct, Kernel2d};
/// use blurlab_image::PlanarImage;
///
/// let src = PlanarImage::from_planar(&[100.0; 64], 8, 8, 1).unwrap();
/// let kernel = Kernel2d::gaussian(3, 1.0);
/// let dst = convolve_direct(&src, &kernel).unwrap();
/// // a constant field is invariant under a normalized kernel
/// assert!(dst.as_slice().iter().all(|&x| (x - 100.0).abs() < 1e-3));
/// ```
pub fn convolve_direct(src: &PlanarImage, kernel: &Kernel2d) -> Result<PlanarImage, FilterError> {
    let width = src.width();
    let height = src.height();
    let mut dst = PlanarImage::new(width, height, src.num_channels())?;

    let size = kernel.size();
    let half = kernel.half() as isize;
    let weights = kernel.weights();

    for c in 0..src.num_channels() {
        let src_plane = src.channel(c)?;
        let dst_plane = dst.channel_mut(c)?;
        for y in 0..height {
            for x in 0..width {
                let mut sum = 0.0f32;
                for ky in 0..size {
                    let sy = clamp_coord(y as isize + ky as isize - half, height);
                    let src_row = &src_plane[sy * width..(sy + 1) * width];
                    let weight_row = &weights[ky * size..(ky + 1) * size];
                    for kx in 0..size {
                        let sx = clamp_coord(x as isize + kx as isize - half, width);
                        sum += src_row[sx] * weight_row[kx];
                    }
                }
                dst_plane[y * width + x] = sum;
            }
        }
    }
    Ok(dst)
}

/// Clamp-to-edge index resolution shared by the spatial engines.
#[inline]
pub(crate) fn clamp_coord(v: isize, len: usize) -> usize {
    v.clamp(0, len as isize - 1) as usize
}
