use crate::error::ImageError;
use crate::image::PlanarImage;

/// Computes the mean squared error between two images of the same shape.
///
/// # Arguments
///
/// * `image1` - The first image.
/// * `image2` - The second image.
///
/// # Returns
///
/// The average of the squared sample differences.
///
/// # Errors
///
/// Returns [`ImageError::ShapeMismatch`] if the images differ in width,
/// height or channel count.
pub fn mse(image1: &PlanarImage, image2: &PlanarImage) -> Result<f32, ImageError> {
    check_same_shape(image1, image2)?;

    let sum = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice())
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f32>();
    Ok(sum / image1.as_slice().len() as f32)
}

/// Computes the peak signal-to-noise ratio between two images, in decibels.
///
/// `PSNR = 20 * log10(max_value / sqrt(MSE))`. Identical images produce
/// positive infinity.
///
/// # Arguments
///
/// * `image1` - The reference image.
/// * `image2` - The reconstructed image.
/// * `max_value` - The maximum possible sample value, 255 for byte-range
///   images.
///
/// # Errors
///
/// Returns [`ImageError::ShapeMismatch`] if the images differ in width,
/// height or channel count.
///
/// # Example
///
/// ```
/// use blurlab_image::{metrics::psnr, PlanarImage};
///
/// let clean = PlanarImage::from_planar(&[100.0; 16], 4, 4, 1)?;
/// let noisy = PlanarImage::from_planar(&[102.0; 16], 4, 4, 1)?;
/// let db = psnr(&clean, &noisy, 255.0)?;
/// assert!((db - 42.11).abs() < 0.01);
/// # Ok::<(), blurlab_image::ImageError>(())
/// ```
pub fn psnr(
    image1: &PlanarImage,
    image2: &PlanarImage,
    max_value: f32,
) -> Result<f32, ImageError> {
    let mse = mse(image1, image2)?;
    Ok(20.0 * (max_value / mse.sqrt()).log10())
}

fn check_same_shape(image1: &PlanarImage, image2: &PlanarImage) -> Result<(), ImageError> {
    if image1.width() != image2.width()
        || image1.height() != image2.height()
        || image1.num_channels() != image2.num_channels()
    {
        return Err(ImageError::ShapeMismatch(
            image1.width(),
            image1.height(),
            image1.num_channels(),
            image2.width(),
            image2.height(),
            image2.num_channels(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mse_of_identical_images_is_zero() -> Result<(), ImageError> {
        let image = PlanarImage::from_planar(&[1.0, 2.0, 3.0, 4.0], 2, 2, 1)?;
        assert_eq!(mse(&image, &image)?, 0.0);
        assert_eq!(psnr(&image, &image, 255.0)?, f32::INFINITY);
        Ok(())
    }

    #[test]
    fn mse_averages_squared_differences() -> Result<(), ImageError> {
        let a = PlanarImage::from_planar(&[0.0, 0.0, 0.0, 0.0], 2, 2, 1)?;
        let b = PlanarImage::from_planar(&[1.0, 2.0, 3.0, 4.0], 2, 2, 1)?;
        // (1 + 4 + 9 + 16) / 4
        assert_relative_eq!(mse(&a, &b)?, 7.5);
        Ok(())
    }

    #[test]
    fn psnr_matches_hand_computed_value() -> Result<(), ImageError> {
        let a = PlanarImage::from_planar(&[100.0; 8], 4, 2, 1)?;
        let b = PlanarImage::from_planar(&[110.0; 8], 4, 2, 1)?;
        // mse = 100, psnr = 20 log10(255 / 10)
        assert_relative_eq!(psnr(&a, &b, 255.0)?, 28.130804, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn shape_mismatch_is_rejected() -> Result<(), ImageError> {
        let a = PlanarImage::new(2, 2, 1)?;
        let b = PlanarImage::new(2, 2, 3)?;
        assert!(matches!(mse(&a, &b), Err(ImageError::ShapeMismatch(..))));
        Ok(())
    }
}
