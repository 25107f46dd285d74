use ndfilter_image::{Image, ImageError};

use crate::padding::PaddingMode;
use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// Trait for floating point casting
pub trait FloatConversion {
    /// Convert the type to f32
    fn to_f32(&self) -> f32;
    /// Convert the type from f32
    fn from_f32(val: f32) -> Self;
}

impl FloatConversion for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }

    fn from_f32(val: f32) -> Self {
        val
    }
}

impl FloatConversion for f64 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    fn from_f32(val: f32) -> Self {
        val as f64
    }
}

impl FloatConversion for u8 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    fn from_f32(val: f32) -> Self {
        val.round().clamp(0.0, 255.0) as u8
    }
}

impl FloatConversion for u16 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    fn from_f32(val: f32) -> Self {
        val.round().clamp(0.0, u16::MAX as f32) as u16
    }
}

/// For every output position and kernel tap, the source index to read, or `None` for `cval`.
fn build_index_map(len: usize, kernel_len: usize, mode: PaddingMode) -> Vec<Option<usize>> {
    let half = kernel_len as isize / 2;
    (0..len)
        .flat_map(|i| {
            (0..kernel_len).map(move |k| mode.map_index(i as isize + k as isize - half, len))
        })
        .collect()
}

/// A separable 2D filter that applies horizontal and vertical 1D correlations sequentially.
///
/// The origin of a kernel of length `n` is at `n / 2`.
struct SeparableFilter<'a> {
    kernel_x: &'a [f32],
    kernel_y: &'a [f32],
    mode: PaddingMode,
    cval: f32,
}

impl SeparableFilter<'_> {
    fn apply<T, const C: usize>(
        &self,
        src: &Image<T, C>,
        dst: &mut Image<T, C>,
        strategy: ExecutionStrategy,
    ) -> Result<(), ImageError>
    where
        T: FloatConversion + Send + Sync,
    {
        let rows = src.rows();
        let cols = src.cols();
        let parallel = strategy.is_parallel(rows * cols);
        let row_stride = cols * C;

        let x_map = build_index_map(cols, self.kernel_x.len(), self.mode);
        let y_map = build_index_map(rows, self.kernel_y.len(), self.mode);

        let src_data = src.as_slice();
        let mut temp = vec![0.0f32; src_data.len()];

        // horizontal
        for_each_row_mut(&mut temp, row_stride, parallel, |r, row_temp| {
            let src_row = &src_data[r * row_stride..(r + 1) * row_stride];
            for c in 0..cols {
                let taps = &x_map[c * self.kernel_x.len()..(c + 1) * self.kernel_x.len()];
                let mut acc = [0.0f32; C];
                for (&k, &x) in self.kernel_x.iter().zip(taps.iter()) {
                    match x {
                        Some(x) => {
                            let px = &src_row[x * C..(x + 1) * C];
                            for (acc_val, v) in acc.iter_mut().zip(px.iter()) {
                                *acc_val += v.to_f32() * k;
                            }
                        }
                        None => acc.iter_mut().for_each(|a| *a += self.cval * k),
                    }
                }
                row_temp[c * C..(c + 1) * C].copy_from_slice(&acc);
            }
        });

        // vertical
        let temp = &temp;
        for_each_row_mut(dst.as_slice_mut(), row_stride, parallel, |r, row_dst| {
            let taps = &y_map[r * self.kernel_y.len()..(r + 1) * self.kernel_y.len()];
            for c in 0..cols {
                let mut acc = [0.0f32; C];
                for (&k, &y) in self.kernel_y.iter().zip(taps.iter()) {
                    match y {
                        Some(y) => {
                            let idx = y * row_stride + c * C;
                            for (acc_val, v) in acc.iter_mut().zip(temp[idx..idx + C].iter()) {
                                *acc_val += v * k;
                            }
                        }
                        None => acc.iter_mut().for_each(|a| *a += self.cval * k),
                    }
                }
                for (out, &acc_val) in row_dst[c * C..(c + 1) * C].iter_mut().zip(acc.iter()) {
                    *out = T::from_f32(acc_val);
                }
            }
        });

        Ok(())
    }
}

/// Apply a separable filter with explicit border handling and execution strategy.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
/// * `mode` - How samples outside the image are read.
/// * `cval` - The value read outside the image under [`PaddingMode::Constant`].
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, or `Auto`.
pub fn separable_filter_with_strategy<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
    mode: PaddingMode,
    cval: f32,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError>
where
    T: FloatConversion + Send + Sync,
{
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImageError::InvalidKernelLength(
            kernel_x.len(),
            kernel_y.len(),
        ));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let filter = SeparableFilter {
        kernel_x,
        kernel_y,
        mode,
        cval,
    };
    filter.apply(src, dst, strategy)
}

/// Apply a separable filter to an image.
///
/// Samples outside the image are read as zero. Uses [`ExecutionStrategy::Auto`];
/// for explicit control, use [`separable_filter_with_strategy`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
pub fn separable_filter<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<(), ImageError>
where
    T: FloatConversion + Send + Sync,
{
    separable_filter_with_strategy(
        src,
        dst,
        kernel_x,
        kernel_y,
        PaddingMode::Constant,
        0.0,
        ExecutionStrategy::Auto,
    )
}
