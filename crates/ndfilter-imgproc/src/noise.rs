use ndfilter_image::{ops::mean_std, Image, ImageError};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Add independent gaussian noise to every sample of an image.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `mean` - The mean of the noise.
/// * `std` - The standard deviation of the noise, must be finite and non-negative.
/// * `rng` - The random number generator to draw the samples from.
///
/// # Example
///
/// ```
/// use ndfilter_image::{Image, ImageSize};
/// use ndfilter_imgproc::noise::add_gaussian_noise;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let src = Image::<f32, 1>::from_size_val(ImageSize { width: 4, height: 4 }, 0.5).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(0);
/// add_gaussian_noise(&src, &mut dst, 0.0, 0.1, &mut rng).unwrap();
/// ```
pub fn add_gaussian_noise<R, const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    mean: f32,
    std: f32,
    rng: &mut R,
) -> Result<(), ImageError>
where
    R: Rng + ?Sized,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if !mean.is_finite() || !std.is_finite() || std < 0.0 {
        return Err(ImageError::InvalidNoiseParameters(mean, std));
    }

    let normal =
        Normal::new(mean, std).map_err(|_| ImageError::InvalidNoiseParameters(mean, std))?;

    // sampled serially so a seeded rng always yields the same image
    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(out, &v)| *out = v + normal.sample(rng));

    Ok(())
}

/// Add zero-mean gaussian noise scaled to the spread of the image itself.
///
/// The noise standard deviation is `scale * std(src)`, with the population
/// standard deviation taken over all samples.
///
/// # Returns
///
/// The standard deviation of the noise that was added.
pub fn add_gaussian_noise_relative<R, const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    scale: f32,
    rng: &mut R,
) -> Result<f32, ImageError>
where
    R: Rng + ?Sized,
{
    let (_, image_std) = mean_std(src);
    let std = image_std * scale;
    log::debug!(
        "adding gaussian noise: image std={:.3}, noise std={:.3}",
        image_std,
        std
    );
    add_gaussian_noise(src, dst, 0.0, std, rng)?;
    Ok(std)
}
