//! Image quality metrics.
//!
//! Used to measure how close a restored image is to its clean reference.

use ndfilter_image::{Image, ImageError};

/// Compute the mean squared error (MSE) between two images.
///
/// $ MSE = \frac{1}{n} \sum_{i=1}^{n} (I_1 - I_2)^2 $
///
/// # Example
///
/// ```
/// use ndfilter_image::{Image, ImageSize};
/// use ndfilter_imgproc::metrics::mse;
///
/// let image1 = Image::<f32, 1>::new(
///     ImageSize { width: 2, height: 1 },
///     vec![0f32, 1f32],
/// ).unwrap();
/// let image2 = Image::<f32, 1>::new(
///     ImageSize { width: 2, height: 1 },
///     vec![0f32, 3f32],
/// ).unwrap();
///
/// assert_eq!(mse(&image1, &image2).unwrap(), 2.0);
/// ```
pub fn mse<const C: usize>(
    image1: &Image<f32, C>,
    image2: &Image<f32, C>,
) -> Result<f32, ImageError> {
    if image1.size() != image2.size() {
        return Err(ImageError::InvalidImageSize(
            image1.width(),
            image1.height(),
            image2.width(),
            image2.height(),
        ));
    }

    if image1.numel() == 0 {
        return Ok(0.0);
    }

    let sum = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice().iter())
        .map(|(&a, &b)| {
            let d = (a - b) as f64;
            d * d
        })
        .sum::<f64>();

    Ok((sum / image1.numel() as f64) as f32)
}

/// Compute the peak signal-to-noise ratio (PSNR) between two images, in decibels.
///
/// $ PSNR = 20 \log_{10} \left( \frac{MAX}{\sqrt{MSE}} \right) $
///
/// Identical images yield `f32::INFINITY`.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
/// * `max_value` - The maximum possible pixel value, e.g. 255 for 8-bit data.
pub fn psnr<const C: usize>(
    image1: &Image<f32, C>,
    image2: &Image<f32, C>,
    max_value: f32,
) -> Result<f32, ImageError> {
    let mse = mse(image1, image2)?;

    if mse == 0f32 {
        return Ok(f32::INFINITY);
    }

    Ok(20f32 * (max_value / mse.sqrt()).log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndfilter_image::ImageSize;

    #[test]
    fn test_mse() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let image1 = Image::<_, 1>::new(size, vec![0f32, 1f32, 2f32, 3f32])?;
        let image2 = Image::<_, 1>::new(size, vec![0f32, 3f32, 2f32, 3f32])?;

        assert_eq!(mse(&image1, &image1)?, 0.0);
        assert_eq!(mse(&image1, &image2)?, 1.0);

        Ok(())
    }

    #[test]
    fn test_psnr() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let image1 = Image::<_, 1>::new(size, vec![0f32, 1f32, 2f32, 3f32])?;
        let image2 = Image::<_, 1>::new(size, vec![0f32, 3f32, 2f32, 3f32])?;

        // mse = 1, so psnr = 20 * log10(255)
        assert_relative_eq!(psnr(&image1, &image2, 255.0)?, 48.130804, epsilon = 1e-4);
        assert_eq!(psnr(&image1, &image1, 255.0)?, f32::INFINITY);

        Ok(())
    }

    #[test]
    fn test_size_mismatch() -> Result<(), ImageError> {
        let image1 = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;
        let image2 = Image::<f32, 1>::from_size_val([2, 3].into(), 0.0)?;
        assert_eq!(
            mse(&image1, &image2),
            Err(ImageError::InvalidImageSize(2, 2, 2, 3))
        );
        Ok(())
    }
}
