use rayon::prelude::*;

use crate::buffer::AlignedBuffer;
use crate::error::ImageError;

/// A planar float image: every channel stored as one contiguous plane.
///
/// Channel `c` occupies `data[c*width*height..(c+1)*width*height]`, so an
/// engine can sweep a whole plane without striding over other channels. The
/// backing buffer is 64-byte aligned, zero-initialized and exclusively owned;
/// dropping the image releases it.
///
/// # Example
///
/// ```
/// use blurlab_image::PlanarImage;
///
/// let image = PlanarImage::new(10, 8, 3).unwrap();
/// assert_eq!(image.width(), 10);
/// assert_eq!(image.height(), 8);
/// assert_eq!(image.num_channels(), 3);
/// assert!(image.as_slice().iter().all(|&x| x == 0.0));
/// ```
#[derive(Clone)]
pub struct PlanarImage {
    data: AlignedBuffer,
    width: usize,
    height: usize,
    channels: usize,
}

impl PlanarImage {
    /// Allocates a zero-initialized planar image.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of the image in pixels.
    /// * `height` - The height of the image in pixels.
    /// * `channels` - The number of channels, typically 1 or 3.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidSize`] if any extent is zero and
    /// [`ImageError::AllocationFailed`] if the aligned allocation fails.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self, ImageError> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(ImageError::InvalidSize(width, height, channels));
        }
        let len = width
            .checked_mul(height)
            .and_then(|p| p.checked_mul(channels))
            .ok_or(ImageError::InvalidSize(width, height, channels))?;
        let data = AlignedBuffer::zeroed(len)?;
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Builds a planar image from channel-interleaved 8-bit samples.
    ///
    /// Each byte is widened to float and scattered to its channel plane, so
    /// `[r, g, b, r, g, b, ...]` becomes `[r, r, ..., g, g, ..., b, b, ...]`.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Interleaved samples of length `width * height * channels`.
    /// * `width` - The width of the image in pixels.
    /// * `height` - The height of the image in pixels.
    /// * `channels` - The number of channels, typically 1 or 3.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidLayout`] if the byte length does not match
    /// the dimensions.
    ///
    /// # Example
    ///
    /// ```
    /// use blurlab_image::PlanarImage;
    ///
    /// let bytes = [10u8, 20, 30, 40, 50, 60];
    /// let image = PlanarImage::from_interleaved(&bytes, 2, 1, 3).unwrap();
    /// assert_eq!(image.channel(0).unwrap(), [10.0, 40.0]);
    /// assert_eq!(image.channel(2).unwrap(), [30.0, 60.0]);
    /// ```
    pub fn from_interleaved(
        bytes: &[u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, ImageError> {
        let mut image = Self::new(width, height, channels)?;
        let expected = image.data.len();
        if bytes.len() != expected {
            return Err(ImageError::InvalidLayout(bytes.len(), expected));
        }
        let row_stride = width * channels;
        image
            .data
            .as_mut_slice()
            .par_chunks_exact_mut(width)
            .enumerate()
            .for_each(|(chunk_idx, plane_row)| {
                let c = chunk_idx / height;
                let y = chunk_idx % height;
                let src_row = &bytes[y * row_stride..(y + 1) * row_stride];
                for (x, sample) in plane_row.iter_mut().enumerate() {
                    *sample = f32::from(src_row[x * channels + c]);
                }
            });
        Ok(image)
    }

    /// Copies already-planar float samples into a fresh aligned buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidLayout`] if the slice length does not
    /// match the dimensions.
    pub fn from_planar(
        data: &[f32],
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, ImageError> {
        let mut image = Self::new(width, height, channels)?;
        if data.len() != image.data.len() {
            return Err(ImageError::InvalidLayout(data.len(), image.data.len()));
        }
        image.data.as_mut_slice().copy_from_slice(data);
        Ok(image)
    }

    /// Converts back to channel-interleaved bytes.
    ///
    /// Every sample is clamped to `[0, 255]`, rounded half-up and narrowed,
    /// so a [`PlanarImage::from_interleaved`] round trip reproduces the input
    /// bytes exactly.
    pub fn to_interleaved(&self) -> Vec<u8> {
        let plane = self.plane_len();
        let row_stride = self.width * self.channels;
        let src = self.data.as_slice();
        let mut out = vec![0u8; self.data.len()];
        out.par_chunks_exact_mut(row_stride)
            .enumerate()
            .for_each(|(y, dst_row)| {
                for x in 0..self.width {
                    for c in 0..self.channels {
                        let val = src[c * plane + y * self.width + x].clamp(0.0, 255.0);
                        dst_row[x * self.channels + c] = (val + 0.5) as u8;
                    }
                }
            });
        out
    }

    /// Width of the image in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// Number of samples in one channel plane.
    pub fn plane_len(&self) -> usize {
        self.width * self.height
    }

    /// All samples, channel planes back to back.
    pub fn as_slice(&self) -> &[f32] {
        self.data.as_slice()
    }

    /// Mutable view of all samples.
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        self.data.as_mut_slice()
    }

    /// One channel plane as a slice.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ChannelOutOfRange`] if `channel` is not below
    /// [`PlanarImage::num_channels`].
    pub fn channel(&self, channel: usize) -> Result<&[f32], ImageError> {
        if channel >= self.channels {
            return Err(ImageError::ChannelOutOfRange(channel, self.channels));
        }
        let plane = self.plane_len();
        Ok(&self.data.as_slice()[channel * plane..(channel + 1) * plane])
    }

    /// One channel plane as a mutable slice.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ChannelOutOfRange`] if `channel` is not below
    /// [`PlanarImage::num_channels`].
    pub fn channel_mut(&mut self, channel: usize) -> Result<&mut [f32], ImageError> {
        if channel >= self.channels {
            return Err(ImageError::ChannelOutOfRange(channel, self.channels));
        }
        let plane = self.plane_len();
        Ok(&mut self.data.as_mut_slice()[channel * plane..(channel + 1) * plane])
    }
}
