use std::cmp::Ordering;

use ndfilter_image::{Image, ImageError};
use num_traits::Zero;

use crate::padding::{spatial_padding, Padding2D, PaddingMode};
use crate::parallel::{for_each_row_mut, ExecutionStrategy};

fn validate_window(size: (usize, usize), rank: usize) -> Result<(), ImageError> {
    if size.0 == 0 || size.1 == 0 || rank >= size.0 * size.1 {
        return Err(ImageError::InvalidFilterSize(size.0, size.1, rank));
    }
    Ok(())
}

/// Replace each sample by the `rank`-th smallest value of the window around it.
///
/// Each channel is ranked independently. The window origin is at `(size.0 / 2, size.1 / 2)`
/// and under [`PaddingMode::Constant`] samples outside the image are read as zero.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `size` - The window size (width, height).
/// * `rank` - The zero-based rank to select, must be below `size.0 * size.1`.
/// * `mode` - How samples outside the image are read.
///
/// # Errors
///
/// Returns [`ImageError::InvalidFilterSize`] for an empty window or an out of range rank,
/// and [`ImageError::InvalidImageSize`] if `src` and `dst` differ in size.
pub fn rank_filter<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    size: (usize, usize),
    rank: usize,
    mode: PaddingMode,
) -> Result<(), ImageError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    validate_window(size, rank)?;

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (kx, ky) = size;
    let padded = spatial_padding(src, Padding2D::from_window(kx, ky), mode, [T::zero(); C])?;
    let padded_data = padded.as_slice();
    let padded_stride = padded.cols() * C;

    let cols = src.cols();
    let parallel = ExecutionStrategy::Auto.is_parallel(src.rows() * cols);

    for_each_row_mut(dst.as_slice_mut(), cols * C, parallel, |r, row_dst| {
        let mut window = Vec::with_capacity(kx * ky);
        for c in 0..cols {
            for ch in 0..C {
                window.clear();
                for wy in 0..ky {
                    let row_start = (r + wy) * padded_stride;
                    for wx in 0..kx {
                        window.push(padded_data[row_start + (c + wx) * C + ch]);
                    }
                }
                let (_, value, _) = window.select_nth_unstable_by(rank, |a, b| {
                    a.partial_cmp(b).unwrap_or(Ordering::Equal)
                });
                row_dst[c * C + ch] = *value;
            }
        }
    });

    Ok(())
}

/// Replace each sample by the median of the `size.0 x size.1` window around it.
///
/// For windows with an even number of samples the upper of the two middle values is
/// taken, i.e. the rank `size.0 * size.1 / 2`.
///
/// # Example
///
/// ```
/// use ndfilter_image::{Image, ImageSize};
/// use ndfilter_imgproc::filter::median_filter;
/// use ndfilter_imgproc::padding::PaddingMode;
///
/// let src = Image::<u8, 1>::new(
///     ImageSize { width: 5, height: 1 },
///     vec![1, 200, 3, 4, 5],
/// ).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// median_filter(&src, &mut dst, (3, 1), PaddingMode::Reflect).unwrap();
/// assert_eq!(dst.as_slice(), &[1, 3, 4, 4, 5]);
/// ```
pub fn median_filter<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    size: (usize, usize),
    mode: PaddingMode,
) -> Result<(), ImageError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    log::debug!("median filter: size={:?}, mode={:?}", size, mode);
    rank_filter(src, dst, size, size.0 * size.1 / 2, mode)
}

/// Replace each sample by the minimum of the window around it (grey erosion).
pub fn minimum_filter<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    size: (usize, usize),
    mode: PaddingMode,
) -> Result<(), ImageError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    rank_filter(src, dst, size, 0, mode)
}

/// Replace each sample by the maximum of the window around it (grey dilation).
pub fn maximum_filter<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    size: (usize, usize),
    mode: PaddingMode,
) -> Result<(), ImageError>
where
    T: Copy + PartialOrd + Zero + Send + Sync,
{
    validate_window(size, 0)?;
    rank_filter(src, dst, size, size.0 * size.1 - 1, mode)
}
