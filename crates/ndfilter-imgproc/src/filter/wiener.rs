use ndfilter_image::{Image, ImageError};

use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// Apply a local adaptive Wiener filter to an image.
///
/// For every sample the local mean `μ` and variance `σ²` are estimated over a
/// `size.0 x size.1` window, reading zeros outside the image. The output is
///
/// ```text
/// out = μ                              if σ² < noise (or σ² is zero)
/// out = μ + (1 - noise / σ²) (x - μ)   otherwise
/// ```
///
/// so flat regions are replaced by their local mean and high-variance regions
/// such as edges are mostly kept. The local statistics are accumulated in `f64`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `size` - The window size (width, height).
/// * `noise` - The noise power. When `None` it is estimated per channel as the
///   average of the local variances.
///
/// # Returns
///
/// The noise power used for each channel.
///
/// # Example
///
/// ```
/// use ndfilter_image::{Image, ImageSize};
/// use ndfilter_imgproc::filter::wiener;
///
/// let src = Image::<f32, 1>::from_size_val(ImageSize { width: 6, height: 6 }, 1.0).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// let noise = wiener(&src, &mut dst, (3, 3), Some(0.5)).unwrap();
/// assert_eq!(noise, [0.5]);
/// ```
pub fn wiener<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    size: (usize, usize),
    noise: Option<f32>,
) -> Result<[f32; C], ImageError> {
    if size.0 == 0 || size.1 == 0 {
        return Err(ImageError::InvalidFilterSize(size.0, size.1, 0));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if src.numel() == 0 {
        return Ok([noise.unwrap_or(0.0); C]);
    }

    let stats = local_stats(src, size);

    let noise_power = match noise {
        Some(n) => [n as f64; C],
        None => estimate_noise_power::<C>(&stats),
    };

    log::debug!(
        "wiener filter: size={:?}, noise power={:?}",
        size,
        noise_power
    );

    let row_stride = src.cols() * C;
    let parallel = ExecutionStrategy::Auto.is_parallel(src.rows() * src.cols());
    let src_data = src.as_slice();

    for_each_row_mut(dst.as_slice_mut(), row_stride, parallel, |r, out_row| {
        let offset = r * row_stride;
        let src_row = &src_data[offset..offset + row_stride];
        let stats_row = &stats[offset..offset + row_stride];
        for (i, out) in out_row.iter_mut().enumerate() {
            let (x, (mean, var)) = (src_row[i] as f64, stats_row[i]);
            let power = noise_power[i % C];
            let value = if var < power || var <= 0.0 {
                mean
            } else {
                mean + (1.0 - power / var) * (x - mean)
            };
            *out = value as f32;
        }
    });

    Ok(noise_power.map(|n| n as f32))
}

/// Per-channel summed-area table, with a leading zero row and column.
struct IntegralImage<const C: usize> {
    stride: usize,
    table: Vec<f64>,
}

impl<const C: usize> IntegralImage<C> {
    fn new(src: &Image<f32, C>, f: impl Fn(f64) -> f64) -> Self {
        let stride = (src.cols() + 1) * C;
        let mut table = vec![0f64; stride * (src.rows() + 1)];

        for (y, row) in src.as_slice().chunks_exact(src.cols() * C).enumerate() {
            let mut row_sum = [0f64; C];
            for (x, pixel) in row.chunks_exact(C).enumerate() {
                for ch in 0..C {
                    row_sum[ch] += f(pixel[ch] as f64);
                    let idx = (y + 1) * stride + (x + 1) * C + ch;
                    table[idx] = row_sum[ch] + table[idx - stride];
                }
            }
        }

        Self { stride, table }
    }

    /// Sum of channel `ch` over columns `x0..x1` and rows `y0..y1`.
    fn sum(&self, (x0, x1): (usize, usize), (y0, y1): (usize, usize), ch: usize) -> f64 {
        let at = |x: usize, y: usize| self.table[y * self.stride + x * C + ch];
        at(x1, y1) - at(x0, y1) - at(x1, y0) + at(x0, y0)
    }
}

/// Local mean and variance of every sample, laid out like the image data.
///
/// The window origin is at `(size.0 / 2, size.1 / 2)` and samples outside the
/// image count as zeros.
fn local_stats<const C: usize>(src: &Image<f32, C>, size: (usize, usize)) -> Vec<(f64, f64)> {
    let (cols, rows) = (src.cols(), src.rows());
    let sums = IntegralImage::new(src, |v| v);
    let sq_sums = IntegralImage::new(src, |v| v * v);
    let area = (size.0 * size.1) as f64;

    let window = |center: usize, len: usize, k: usize| {
        (center.saturating_sub(k / 2), (center + k - k / 2).min(len))
    };

    let row_stride = cols * C;
    let mut stats = vec![(0f64, 0f64); rows * row_stride];
    let parallel = ExecutionStrategy::Auto.is_parallel(rows * cols);

    for_each_row_mut(&mut stats, row_stride, parallel, |y, row| {
        let ys = window(y, rows, size.1);
        for (i, stat) in row.iter_mut().enumerate() {
            let (x, ch) = (i / C, i % C);
            let xs = window(x, cols, size.0);
            let mean = sums.sum(xs, ys, ch) / area;
            let var = sq_sums.sum(xs, ys, ch) / area - mean * mean;
            *stat = (mean, var.max(0.0));
        }
    });

    stats
}

/// Average local variance of each channel.
fn estimate_noise_power<const C: usize>(stats: &[(f64, f64)]) -> [f64; C] {
    let mut sums = [0f64; C];
    for pixel in stats.chunks_exact(C) {
        for (sum, &(_, var)) in sums.iter_mut().zip(pixel.iter()) {
            *sum += var;
        }
    }

    let num_pixels = (stats.len() / C).max(1) as f64;
    sums.map(|s| s / num_pixels)
}
