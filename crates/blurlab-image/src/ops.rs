use rand::Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

use crate::error::ImageError;
use crate::image::PlanarImage;

/// Range below which an image is treated as constant and left unnormalized.
const MIN_NORMALIZE_RANGE: f32 = 1e-6;

/// Find the minimum and maximum sample values in an image.
///
/// # Example
///
/// ```
/// use blurlab_image::{ops, PlanarImage};
///
/// let image = PlanarImage::from_planar(&[3.0, -1.0, 7.0, 2.0], 2, 2, 1).unwrap();
/// assert_eq!(ops::find_min_max(&image), (-1.0, 7.0));
/// ```
pub fn find_min_max(image: &PlanarImage) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for &x in image.as_slice() {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }
    (min, max)
}

/// Rescales the image in place so `[min, max]` maps onto `[0, 255]`.
///
/// An image whose value range is below `1e-6` is considered constant and left
/// untouched; rescaling it would only amplify rounding noise.
pub fn normalize(image: &mut PlanarImage) {
    let (min, max) = find_min_max(image);
    let range = max - min;
    if range < MIN_NORMALIZE_RANGE {
        return;
    }
    let scale = 255.0 / range;
    let row = image.width();
    image
        .as_slice_mut()
        .par_chunks_mut(row)
        .for_each(|plane_row| {
            for val in plane_row {
                *val = (*val - min) * scale;
            }
        });
}

/// Adds zero-mean Gaussian noise to every sample, in place.
///
/// Samples are drawn sequentially from `rng`, so a seeded generator
/// reproduces the same noise field on every run.
///
/// # Errors
///
/// Returns [`ImageError::InvalidNoiseSigma`] if `sigma` is negative or not
/// finite. The image is untouched on error.
pub fn add_gaussian_noise<R: Rng>(
    image: &mut PlanarImage,
    sigma: f32,
    rng: &mut R,
) -> Result<(), ImageError> {
    // Normal::new only rejects non-finite values, not negative ones
    if sigma.is_nan() || sigma < 0.0 {
        return Err(ImageError::InvalidNoiseSigma(sigma));
    }
    let normal = Normal::new(0.0, sigma).map_err(|_| ImageError::InvalidNoiseSigma(sigma))?;
    for val in image.as_slice_mut() {
        *val += normal.sample(rng);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn normalize_stretches_to_full_range() -> Result<(), ImageError> {
        let data = [50.0f32, 100.0, 150.0, 200.0];
        let mut image = PlanarImage::from_planar(&data, 2, 2, 1)?;
        normalize(&mut image);
        let (min, max) = find_min_max(&image);
        assert!((min - 0.0).abs() < 1e-4);
        assert!((max - 255.0).abs() < 1e-4);
        // interior values keep their relative spacing
        assert!((image.as_slice()[1] - 85.0).abs() < 1e-3);
        assert!((image.as_slice()[2] - 170.0).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn normalize_leaves_constant_image_unchanged() -> Result<(), ImageError> {
        let data = [100.0f32; 16];
        let mut image = PlanarImage::from_planar(&data, 4, 4, 1)?;
        normalize(&mut image);
        assert_eq!(image.as_slice(), data);
        Ok(())
    }

    #[test]
    fn noise_is_deterministic_per_seed() -> Result<(), ImageError> {
        let data = [100.0f32; 64];
        let mut a = PlanarImage::from_planar(&data, 8, 8, 1)?;
        let mut b = PlanarImage::from_planar(&data, 8, 8, 1)?;
        let mut c = PlanarImage::from_planar(&data, 8, 8, 1)?;

        add_gaussian_noise(&mut a, 20.0, &mut StdRng::seed_from_u64(7))?;
        add_gaussian_noise(&mut b, 20.0, &mut StdRng::seed_from_u64(7))?;
        add_gaussian_noise(&mut c, 20.0, &mut StdRng::seed_from_u64(8))?;

        assert_eq!(a.as_slice(), b.as_slice());
        assert_ne!(a.as_slice(), c.as_slice());
        assert!(a.as_slice().iter().any(|&x| x != 100.0));
        Ok(())
    }

    #[test]
    fn noise_rejects_negative_sigma() -> Result<(), ImageError> {
        let mut image = PlanarImage::from_planar(&[100.0f32; 4], 2, 2, 1)?;
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            add_gaussian_noise(&mut image, -1.0, &mut rng),
            Err(ImageError::InvalidNoiseSigma(_))
        ));
        assert!(matches!(
            add_gaussian_noise(&mut image, f32::NAN, &mut rng),
            Err(ImageError::InvalidNoiseSigma(_))
        ));
        assert!(matches!(
            add_gaussian_noise(&mut image, f32::INFINITY, &mut rng),
            Err(ImageError::InvalidNoiseSigma(_))
        ));
        // rejected calls leave the samples alone
        assert_eq!(image.as_slice(), [100.0; 4]);
        Ok(())
    }
}
