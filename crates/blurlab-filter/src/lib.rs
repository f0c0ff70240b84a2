#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Patch-gather spatial convolution with a pluggable dot product.
pub mod accelerated;

/// Direct spatial convolution, the semantic reference engine.
pub mod direct;

/// Dot-product capability used by the accelerated engine.
pub mod dot;

/// Error types for the filter module.
pub mod error;

/// Frequency-domain convolution.
pub mod fourier;

/// Gaussian kernel construction.
pub mod kernels;

/// Two-pass separable convolution.
pub mod separable;

/// Real-to-complex 2D transform capability.
pub mod spectral;

pub use crate::accelerated::convolve_accelerated;
pub use crate::direct::convolve_direct;
pub use crate::dot::{DotProduct, ScalarDot, SimdDot};
pub use crate::error::FilterError;
pub use crate::fourier::convolve_fft;
pub use crate::kernels::{Kernel1d, Kernel2d};
pub use crate::separable::convolve_separable;
pub use crate::spectral::{Fft2d, Spectrum};
