use ndfilter_image::ImageError;

/// Default gaussian truncation, in units of sigma.
pub const DEFAULT_GAUSSIAN_TRUNCATE: f32 = 4.0;

// below this a gaussian is treated as the identity
const SIGMA_EPS: f32 = 1e-15;

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A normalized vector of the kernel. A sigma of zero gives a discrete impulse at `kernel_size / 2`.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);

    if sigma < SIGMA_EPS {
        for i in 0..kernel_size {
            kernel.push(if i == kernel_size / 2 { 1.0 } else { 0.0 });
        }
        return kernel;
    }

    let mean = kernel_size.saturating_sub(1) as f32 / 2.0;

    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Radius of a gaussian kernel truncated at `truncate` standard deviations.
///
/// Computed as `floor(truncate * sigma + 0.5)`. Returns `None` when the radius
/// does not fit in a `usize`.
pub fn gaussian_kernel_radius(sigma: f32, truncate: f32) -> Option<usize> {
    let radius = (truncate * sigma + 0.5).max(0.0).floor();
    if !radius.is_finite() || radius >= usize::MAX as f32 {
        return None;
    }
    Some(radius as usize)
}

// longest kernel whose buffer can be allocated
const MAX_KERNEL_LEN: usize = isize::MAX as usize / std::mem::size_of::<f32>();

/// Create a gaussian kernel whose size follows from `sigma` and `truncate`.
///
/// The kernel has `2 * radius + 1` taps, see [`gaussian_kernel_radius`].
///
/// # Errors
///
/// Returns [`ImageError::InvalidSigmaValue`] for a negative or non-finite sigma,
/// or when the kernel would be too long to allocate, and
/// [`ImageError::InvalidTruncateValue`] for a negative or non-finite truncation.
///
/// # Example
///
/// ```
/// use ndfilter_imgproc::filter::kernels::gaussian_kernel_1d_truncated;
///
/// let kernel = gaussian_kernel_1d_truncated(3.0, 4.0).unwrap();
/// assert_eq!(kernel.len(), 25);
/// ```
pub fn gaussian_kernel_1d_truncated(sigma: f32, truncate: f32) -> Result<Vec<f32>, ImageError> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(ImageError::InvalidSigmaValue(sigma));
    }
    if !truncate.is_finite() || truncate < 0.0 {
        return Err(ImageError::InvalidTruncateValue(truncate));
    }

    let kernel_size = gaussian_kernel_radius(sigma, truncate)
        .and_then(|radius| radius.checked_mul(2))
        .and_then(|len| len.checked_add(1))
        .filter(|&len| len <= MAX_KERNEL_LEN)
        .ok_or(ImageError::InvalidSigmaValue(sigma))?;

    Ok(gaussian_kernel_1d(kernel_size, sigma))
}
