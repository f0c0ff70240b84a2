#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access and codec failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// Dispatch on the file extension to the PNG or JPEG codec.
pub mod functional;

/// JPEG image encoding and decoding.
///
/// Pure Rust JPEG codec; decoded samples are widened to planar floats.
pub mod jpeg;

/// Synthetic test card generation.
///
/// Deterministic gradient and sine-plate content for runs without an input
/// file.
pub mod pattern;

/// PNG image encoding and decoding.
///
/// Reads and writes 8-bit grayscale and RGB files.
pub mod png;
