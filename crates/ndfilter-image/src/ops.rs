use crate::{Image, ImageError};

/// Cast the pixel data of an image to a different type and scale it.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `scale` - The scale to multiply the pixel data with.
///
/// Example:
///
/// ```
/// use ndfilter_image::{Image, ImageSize};
/// use ndfilter_image::ops::cast_and_scale;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0u8, 255],
/// ).unwrap();
///
/// let mut image_f32 = Image::from_size_val(image.size(), 0.0f32).unwrap();
///
/// cast_and_scale(&image, &mut image_f32, 1. / 255.0).unwrap();
///
/// assert_eq!(image_f32.get_pixel(0, 0, 0).unwrap(), 0.0f32);
/// assert_eq!(image_f32.get_pixel(1, 0, 0).unwrap(), 1.0f32);
/// ```
pub fn cast_and_scale<T, U, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<U, C>,
    scale: U,
) -> Result<(), ImageError>
where
    T: Copy + num_traits::NumCast,
    U: Copy + num_traits::NumCast + std::ops::Mul<U, Output = U>,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .try_for_each(|(out, &inp)| {
            let x = U::from(inp).ok_or_else(|| {
                ImageError::CastError(std::any::type_name::<U>().to_string())
            })?;
            *out = x * scale;
            Ok::<(), ImageError>(())
        })?;

    Ok(())
}

/// Compute the mean and the population standard deviation of all the samples in an image.
///
/// The standard deviation uses `N` in the denominator, so a constant image has a deviation
/// of exactly zero. An empty image yields `(0.0, 0.0)`.
pub fn mean_std<const C: usize>(image: &Image<f32, C>) -> (f32, f32) {
    let n = image.numel();
    if n == 0 {
        return (0.0, 0.0);
    }

    // accumulate in f64 to keep large images stable
    let mean = image.as_slice().iter().map(|&v| v as f64).sum::<f64>() / n as f64;
    let var = image
        .as_slice()
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n as f64;

    (mean as f32, var.sqrt() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageSize;

    #[test]
    fn test_cast_and_scale() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            vec![0u8, 0, 255, 0, 0, 255],
        )?;

        let mut image_f64 = Image::from_size_val(image.size(), 0.0f64)?;
        cast_and_scale(&image, &mut image_f64, 1. / 255.0)?;

        assert_eq!(image_f64.as_slice(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);

        Ok(())
    }

    #[test]
    fn test_cast_and_scale_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;
        let mut dst = Image::<f32, 1>::from_size_val([3, 2].into(), 0.0)?;
        assert_eq!(
            cast_and_scale(&image, &mut dst, 1.0),
            Err(ImageError::InvalidImageSize(2, 2, 3, 2))
        );
        Ok(())
    }

    #[test]
    fn test_mean_std() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([4, 2].into(), vec![2., 4., 4., 4., 5., 5., 7., 9.])?;
        let (mean, std) = mean_std(&image);
        approx::assert_relative_eq!(mean, 5.0);
        approx::assert_relative_eq!(std, 2.0);

        let flat = Image::<f32, 1>::from_size_val([3, 3].into(), 1.5)?;
        assert_eq!(mean_std(&flat), (1.5, 0.0));

        Ok(())
    }
}
