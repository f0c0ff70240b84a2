use std::sync::Arc;

use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::FilterError;

/// Frequency-domain representation of one real 2D plane.
///
/// Stored with Hermitian symmetry: `height` rows of `width/2 + 1` complex
/// bins; the negative x-frequencies are implied. A spectrum is transient — it
/// belongs to the convolution call that produced it and is consumed by the
/// inverse transform.
pub struct Spectrum {
    bins: Vec<Complex<f32>>,
    stride: usize,
    height: usize,
}

impl Spectrum {
    /// Multiplies this spectrum elementwise by `other`, in place.
    ///
    /// `(a+bi)(c+di) = (ac-bd) + (ad+bc)i`, the frequency-domain counterpart
    /// of cyclic convolution.
    pub fn pointwise_mul(&mut self, other: &Spectrum) {
        debug_assert_eq!(self.bins.len(), other.bins.len());
        for (a, b) in self.bins.iter_mut().zip(other.bins.iter()) {
            *a *= *b;
        }
    }

    /// Number of complex bins per row (`width/2 + 1`).
    pub fn row_bins(&self) -> usize {
        self.stride
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Forward/inverse real-to-complex 2D transform pair for one plane size.
///
/// Rows go through a real transform, columns through a complex one; all four
/// plans are built once and reused for every plane of that size, which is what
/// lets the fourier engine transform the kernel once and each channel after
/// it. Pure Rust planners pick a SIMD path at runtime where available.
///
/// The inverse is unnormalized: a forward/inverse round trip scales every
/// sample by `width * height`.
pub struct Fft2d {
    width: usize,
    height: usize,
    row_fwd: Arc<dyn RealToComplex<f32>>,
    row_inv: Arc<dyn ComplexToReal<f32>>,
    col_fwd: Arc<dyn Fft<f32>>,
    col_inv: Arc<dyn Fft<f32>>,
}

impl Fft2d {
    /// Plans transforms for `width x height` planes.
    pub fn new(width: usize, height: usize) -> Self {
        let mut real_planner = RealFftPlanner::<f32>::new();
        let mut complex_planner = FftPlanner::<f32>::new();
        Self {
            width,
            height,
            row_fwd: real_planner.plan_fft_forward(width),
            row_inv: real_planner.plan_fft_inverse(width),
            col_fwd: complex_planner.plan_fft_forward(height),
            col_inv: complex_planner.plan_fft_inverse(height),
        }
    }

    /// Plane width the pair was planned for.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height the pair was planned for.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Forward transform of one `width * height` real plane.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Transform`] if the row transform rejects its
    /// buffers.
    pub fn forward(&self, plane: &[f32]) -> Result<Spectrum, FilterError> {
        debug_assert_eq!(plane.len(), self.width * self.height);
        let stride = self.width / 2 + 1;
        let mut bins = vec![Complex::new(0.0f32, 0.0); stride * self.height];

        // real rows
        let mut row = vec![0.0f32; self.width];
        for (y, src_row) in plane.chunks_exact(self.width).enumerate() {
            row.copy_from_slice(src_row);
            self.row_fwd
                .process(&mut row, &mut bins[y * stride..(y + 1) * stride])?;
        }

        // complex columns over the stored half-plane
        let mut col = vec![Complex::new(0.0f32, 0.0); self.height];
        for x in 0..stride {
            for y in 0..self.height {
                col[y] = bins[y * stride + x];
            }
            self.col_fwd.process(&mut col);
            for y in 0..self.height {
                bins[y * stride + x] = col[y];
            }
        }

        Ok(Spectrum {
            bins,
            stride,
            height: self.height,
        })
    }

    /// Inverse transform into `out`, consuming the spectrum.
    ///
    /// The output is left unnormalized; callers scale by `1/(width*height)`
    /// to undo the round-trip factor.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Transform`] if the row transform rejects its
    /// buffers.
    pub fn inverse(&self, mut spectrum: Spectrum, out: &mut [f32]) -> Result<(), FilterError> {
        debug_assert_eq!(out.len(), self.width * self.height);
        debug_assert_eq!(spectrum.height, self.height);
        debug_assert_eq!(spectrum.stride, self.width / 2 + 1);
        let stride = spectrum.stride;
        let bins = &mut spectrum.bins;

        let mut col = vec![Complex::new(0.0f32, 0.0); self.height];
        for x in 0..stride {
            for y in 0..self.height {
                col[y] = bins[y * stride + x];
            }
            self.col_inv.process(&mut col);
            for y in 0..self.height {
                bins[y * stride + x] = col[y];
            }
        }

        let nyquist = (self.width % 2 == 0).then_some(stride - 1);
        for (y, dst_row) in out.chunks_exact_mut(self.width).enumerate() {
            let row = &mut bins[y * stride..(y + 1) * stride];
            // The DC bin (and Nyquist bin for even widths) of a real signal is
            // purely real; the column pass can leave a rounding-sized
            // imaginary residue there that the real-output transform rejects.
            row[0].im = 0.0;
            if let Some(n) = nyquist {
                row[n].im = 0.0;
            }
            self.row_inv.process(row, dst_row)?;
        }
        Ok(())
    }
}
