#![deny(missing_docs)]
//! Planar float image buffers and the elementwise operations shared by the
//! blur engines.

/// Error types for the image module.
pub mod error;

/// Planar image representation and layout conversions.
pub mod image;

/// Image quality metrics: mean squared error and PSNR.
pub mod metrics;

/// Elementwise operations: min/max, normalize, noise injection.
pub mod ops;

mod buffer;

pub use crate::buffer::BUFFER_ALIGNMENT;
pub use crate::error::ImageError;
pub use crate::image::PlanarImage;
