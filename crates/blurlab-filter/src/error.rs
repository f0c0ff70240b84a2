/// An error type for the convolution engines.
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    /// Error when allocating an output or intermediate image fails.
    #[error(transparent)]
    Image(#[from] blurlab_image::ImageError),

    /// Error when the transform primitive rejects its buffers.
    #[error("Fourier transform failed: {0}")]
    Transform(#[from] realfft::FftError),
}
