use std::f32::consts::TAU;

use blurlab_image::PlanarImage;

use crate::error::IoError;

/// Sine plate cycles across each axis of the blue channel.
const PLATE_CYCLES: f32 = 10.0;

/// Builds the synthetic RGB test card used when no input file is given.
///
/// Red ramps left to right, green ramps top to bottom, and blue carries a
/// `sin x cos` plate with [`PLATE_CYCLES`] periods per axis. All samples lie
/// in `[0, 255]`, so the card survives the byte round trip.
///
/// # Arguments
///
/// * `width` - Card width in pixels.
/// * `height` - Card height in pixels.
///
/// # Errors
///
/// Returns [`IoError::ImageCreationError`] if either extent is zero or the
/// allocation fails.
///
/// # Example
///
/// ```
/// use blurlab_io::pattern::synthetic_rgb;
///
/// let card = synthetic_rgb(64, 48)?;
/// assert_eq!(card.num_channels(), 3);
/// # Ok::<(), blurlab_io::error::IoError>(())
/// ```
pub fn synthetic_rgb(width: usize, height: usize) -> Result<PlanarImage, IoError> {
    let mut image = PlanarImage::new(width, height, 3)?;

    let red = image.channel_mut(0)?;
    for row in red.chunks_exact_mut(width) {
        for (x, sample) in row.iter_mut().enumerate() {
            *sample = 255.0 * x as f32 / width as f32;
        }
    }

    let green = image.channel_mut(1)?;
    for (y, row) in green.chunks_exact_mut(width).enumerate() {
        let value = 255.0 * y as f32 / height as f32;
        row.fill(value);
    }

    let blue = image.channel_mut(2)?;
    for (y, row) in blue.chunks_exact_mut(width).enumerate() {
        let fy = y as f32 / height as f32;
        for (x, sample) in row.iter_mut().enumerate() {
            let fx = x as f32 / width as f32;
            let plate = (TAU * PLATE_CYCLES * fx).sin() * (TAU * PLATE_CYCLES * fy).cos();
            *sample = 255.0 * (0.5 + 0.5 * plate);
        }
    }

    Ok(image)
}
