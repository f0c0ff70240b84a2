use blurlab_image::PlanarImage;

use crate::error::FilterError;
use crate::kernels::Kernel2d;
use crate::spectral::Fft2d;

/// Convolves `src` with `kernel` through the frequency domain.
///
/// The kernel is zero-padded to the plane size with its center wrapped to the
/// origin, transformed once, and its spectrum is reused for every channel:
/// each plane is transformed, multiplied bin by bin with the kernel spectrum,
/// transformed back and scaled by `1/(width*height)` to undo the unnormalized
/// round trip.
///
/// Borders are circular, not clamped: taps that fall off one edge wrap around
/// to the opposite edge. For odd sizes, where the Gaussian is symmetric about
/// its center tap, the result away from the borders (at least `kernel.half()`
/// pixels in) matches [`crate::convolve_direct`] up to floating-point error.
/// Even sizes are asymmetric about the `size/2` center and the cyclic path
/// applies them mirrored, so they track no spatial engine. Kernels wider or
/// taller than the plane alias under the wrap and are not meaningful.
///
/// # Arguments
///
/// * `src` - The input image; read only, never mutated.
/// * `kernel` - The 2D kernel to apply.
///
/// # Errors
///
/// Returns [`FilterError::Image`] if the output allocation fails, or
/// [`FilterError::Transform`] if any forward or inverse transform fails. A
/// failure on any channel aborts the whole call; no partial image is
/// returned.
///
/// # Example
///
/// ```
/// use blurlab_filter::{convolve_fft, Kernel2d};
/// use blurlab_image::PlanarImage;
///
/// let src = PlanarImage::from_planar(&[100.0; 64], 8, 8, 1)?;
/// let dst = convolve_fft(&src, &Kernel2d::gaussian(3, 1.0))?;
/// assert!(dst.as_slice().iter().all(|v| (v - 100.0).abs() < 1e-3));
/// # Ok::<(), blurlab_filter::FilterError>(())
/// ```
pub fn convolve_fft(src: &PlanarImage, kernel: &Kernel2d) -> Result<PlanarImage, FilterError> {
    let width = src.width();
    let height = src.height();
    let mut dst = PlanarImage::new(width, height, src.num_channels())?;

    let fft = Fft2d::new(width, height);
    let kernel_spectrum = {
        let padded = wrap_pad_kernel(kernel, width, height);
        fft.forward(&padded)?
    };

    let scale = 1.0 / (width * height) as f32;
    for c in 0..src.num_channels() {
        let mut spectrum = fft.forward(src.channel(c)?)?;
        spectrum.pointwise_mul(&kernel_spectrum);
        let dst_plane = dst.channel_mut(c)?;
        fft.inverse(spectrum, dst_plane)?;
        for v in dst_plane.iter_mut() {
            *v *= scale;
        }
    }
    Ok(dst)
}

/// Embeds `kernel` into a zeroed `width x height` plane with its center tap
/// at the origin and the remaining taps wrapped modulo the plane size, the
/// layout cyclic convolution expects.
fn wrap_pad_kernel(kernel: &Kernel2d, width: usize, height: usize) -> Vec<f32> {
    let size = kernel.size();
    let half = kernel.half() as isize;
    let weights = kernel.weights();
    let mut padded = vec![0.0f32; width * height];
    for ky in 0..size {
        let py = (ky as isize - half).rem_euclid(height as isize) as usize;
        for kx in 0..size {
            let px = (kx as isize - half).rem_euclid(width as isize) as usize;
            padded[py * width + px] = weights[ky * size + kx];
        }
    }
    padded
}
