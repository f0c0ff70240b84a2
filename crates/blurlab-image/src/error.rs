/// An error type for image buffer operations.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when an image extent is zero or the total length overflows.
    #[error("Invalid image size: {0}x{1} with {2} channels")]
    InvalidSize(usize, usize, usize),

    /// Error when the aligned buffer allocation fails.
    #[error("Failed to allocate {0} bytes for the image buffer")]
    AllocationFailed(usize),

    /// Error when the data length does not match the image dimensions.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidLayout(usize, usize),

    /// Error when a channel index is out of range.
    #[error("Channel index {0} out of range for {1} channels")]
    ChannelOutOfRange(usize, usize),

    /// Error when a noise standard deviation is negative or not finite.
    #[error("Invalid noise standard deviation: {0}")]
    InvalidNoiseSigma(f32),

    /// Error when two images that must share a shape do not.
    #[error("Image shapes do not match: {0}x{1}x{2} vs {3}x{4}x{5}")]
    ShapeMismatch(usize, usize, usize, usize, usize, usize),
}
