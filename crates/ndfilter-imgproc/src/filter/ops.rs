use ndfilter_image::{Image, ImageError};

use super::{kernels, separable_filter, separable_filter_with_strategy};
use crate::padding::PaddingMode;
use crate::parallel::ExecutionStrategy;

/// Blur an image using a box blur filter
///
/// Samples outside the image are read as zero.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn box_blur<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_size: (usize, usize),
) -> Result<(), ImageError> {
    let kernel_x = kernels::box_blur_kernel_1d(kernel_size.0);
    let kernel_y = kernels::box_blur_kernel_1d(kernel_size.1);
    separable_filter(src, dst, &kernel_x, &kernel_y)?;
    Ok(())
}

/// Replace each sample by the mean of the `size.0 x size.1` window around it.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `size` - The window size (width, height).
/// * `mode` - How samples outside the image are read.
/// * `cval` - The value read outside the image under [`PaddingMode::Constant`].
pub fn uniform_filter<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    size: (usize, usize),
    mode: PaddingMode,
    cval: f32,
) -> Result<(), ImageError> {
    let kernel_x = kernels::box_blur_kernel_1d(size.0);
    let kernel_y = kernels::box_blur_kernel_1d(size.1);
    separable_filter_with_strategy(
        src,
        dst,
        &kernel_x,
        &kernel_y,
        mode,
        cval,
        ExecutionStrategy::Auto,
    )
}

/// Blur an image using a gaussian blur filter with a fixed kernel size
///
/// Samples outside the image are read as zero.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
/// * `sigma` - The sigma of the gaussian kernel.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_blur<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
) -> Result<(), ImageError> {
    let kernel_x = kernels::gaussian_kernel_1d(kernel_size.0, sigma.0);
    let kernel_y = kernels::gaussian_kernel_1d(kernel_size.1, sigma.1);
    separable_filter(src, dst, &kernel_x, &kernel_y)?;
    Ok(())
}

/// Smooth an image with a gaussian whose support is derived from sigma.
///
/// Each kernel spans `floor(truncate * sigma + 0.5)` pixels on either side of the
/// center. A sigma of zero leaves that axis untouched.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `sigma` - The standard deviation of the gaussian (sigma_x, sigma_y).
/// * `truncate` - The kernel radius in units of sigma.
/// * `mode` - How samples outside the image are read.
pub fn gaussian_filter_with_truncate<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    sigma: (f32, f32),
    truncate: f32,
    mode: PaddingMode,
) -> Result<(), ImageError> {
    let kernel_x = kernels::gaussian_kernel_1d_truncated(sigma.0, truncate)?;
    let kernel_y = kernels::gaussian_kernel_1d_truncated(sigma.1, truncate)?;

    log::debug!(
        "gaussian filter: sigma={:?}, kernel={}x{}, mode={:?}",
        sigma,
        kernel_x.len(),
        kernel_y.len(),
        mode
    );

    separable_filter_with_strategy(
        src,
        dst,
        &kernel_x,
        &kernel_y,
        mode,
        0.0,
        ExecutionStrategy::Auto,
    )
}

/// Smooth an image with a gaussian truncated at four standard deviations.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `sigma` - The standard deviation of the gaussian (sigma_x, sigma_y).
/// * `mode` - How samples outside the image are read, usually [`PaddingMode::Reflect`].
///
/// # Example
///
/// ```
/// use ndfilter_image::{Image, ImageSize};
/// use ndfilter_imgproc::filter::gaussian_filter;
/// use ndfilter_imgproc::padding::PaddingMode;
///
/// let src = Image::<f32, 1>::from_size_val(ImageSize { width: 8, height: 8 }, 3.0).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// gaussian_filter(&src, &mut dst, (3.0, 3.0), PaddingMode::Reflect).unwrap();
///
/// // a constant image stays constant
/// assert!(dst.as_slice().iter().all(|&v| (v - 3.0).abs() < 1e-4));
/// ```
pub fn gaussian_filter<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    sigma: (f32, f32),
    mode: PaddingMode,
) -> Result<(), ImageError> {
    gaussian_filter_with_truncate(src, dst, sigma, kernels::DEFAULT_GAUSSIAN_TRUNCATE, mode)
}
