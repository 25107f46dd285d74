use ndfilter_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;

/// A border type for reading samples outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingMode {
    /// Fills the border with a single constant value.
    ///
    /// Example: ...d c b a | k k k k...
    Constant,

    /// Repeats the outermost row or column of pixels.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// Reflects about the edge, repeating the edge pixel itself.
    ///
    /// Example: ...d c b a | a b c d...
    #[default]
    Reflect,

    /// Reflects about the center of the edge pixel, without repeating it.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,

    /// Wraps the content around from the opposite side.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

impl PaddingMode {
    #[inline]
    fn reflect(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let period = 2 * len as isize;
        let i = i.rem_euclid(period);
        if i < len as isize {
            i as usize
        } else {
            (period - i - 1) as usize
        }
    }

    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let period = 2 * len as isize - 2;
        let i = i.rem_euclid(period);
        if i < len as isize {
            i as usize
        } else {
            (period - i) as usize
        }
    }

    /// Maps index `i` to a valid index within `[0, len)` according to the padding mode.
    ///
    /// Returns `None` when `i` falls outside the image under [`PaddingMode::Constant`],
    /// meaning the caller must read its constant value instead.
    ///
    /// # Arguments
    ///
    /// * `i` - The (possibly out-of-range) coordinate index.
    /// * `len` - The valid length of the dimension, must be greater than zero.
    ///
    /// # Example
    ///
    /// ```
    /// use ndfilter_imgproc::padding::PaddingMode;
    ///
    /// assert_eq!(PaddingMode::Reflect.map_index(-1, 4), Some(0));
    /// assert_eq!(PaddingMode::Reflect101.map_index(-1, 4), Some(1));
    /// assert_eq!(PaddingMode::Constant.map_index(4, 4), None);
    /// ```
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            PaddingMode::Constant => None,
            PaddingMode::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
            PaddingMode::Reflect => Some(Self::reflect(i, len)),
            PaddingMode::Reflect101 => Some(Self::reflect101(i, len)),
            PaddingMode::Wrap => Some(i.rem_euclid(len as isize) as usize),
        }
    }
}

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// Padding that places the origin of a `kx x ky` window at `(kx / 2, ky / 2)`.
    pub fn from_window(kx: usize, ky: usize) -> Self {
        Self {
            top: ky / 2,
            bottom: ky.saturating_sub(1) - ky / 2,
            left: kx / 2,
            right: kx.saturating_sub(1) - kx / 2,
        }
    }

    /// The size of an image of `size` once this padding is applied.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

/// Creates a new image with the source surrounded by a border filled according to `padding_mode`.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `padding` - The amount of padding for all four sides.
/// * `padding_mode` - The border handling to use.
/// * `constant_value` - The pixel value used by [`PaddingMode::Constant`].
///
/// # Example
///
/// ```
/// use ndfilter_image::{Image, ImageSize};
/// use ndfilter_imgproc::padding::{spatial_padding, Padding2D, PaddingMode};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![1, 2]).unwrap();
/// let padding = Padding2D { top: 0, bottom: 0, left: 2, right: 2 };
///
/// let dst = spatial_padding(&src, padding, PaddingMode::Reflect, [0]).unwrap();
/// assert_eq!(dst.as_slice(), &[2, 1, 1, 2, 2, 1]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    padding: Padding2D,
    padding_mode: PaddingMode,
    constant_value: [T; C],
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let new_size = padding.padded_size(src.size());
    let mut dst = Image::<T, C>::from_size_val(new_size, constant_value[0])?;

    let (old_width, old_height) = (src.width(), src.height());
    if old_width == 0 || old_height == 0 || new_size.width == 0 {
        return Ok(dst);
    }

    let src_data = src.as_slice();
    let row_stride = new_size.width * C;

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let src_y = padding_mode.map_index(y as isize - padding.top as isize, old_height);
            for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
                let src_x = padding_mode.map_index(x as isize - padding.left as isize, old_width);
                match (src_x, src_y) {
                    (Some(sx), Some(sy)) => {
                        let idx = (sy * old_width + sx) * C;
                        dst_pixel.copy_from_slice(&src_data[idx..idx + C]);
                    }
                    _ => dst_pixel.copy_from_slice(&constant_value),
                }
            }
        });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_src_2x2() -> Result<Image<u8, 1>, ImageError> {
        Image::new([2, 2].into(), vec![1, 2, 3, 4])
    }

    fn pad_one() -> Padding2D {
        Padding2D {
            top: 1,
            bottom: 1,
            left: 1,
            right: 1,
        }
    }

    #[test]
    fn test_map_index_modes() {
        // len 4: a b c d
        assert_eq!(PaddingMode::Replicate.map_index(-3, 4), Some(0));
        assert_eq!(PaddingMode::Replicate.map_index(6, 4), Some(3));
        assert_eq!(PaddingMode::Reflect.map_index(-2, 4), Some(1));
        assert_eq!(PaddingMode::Reflect.map_index(5, 4), Some(2));
        assert_eq!(PaddingMode::Reflect.map_index(-9, 4), Some(0));
        assert_eq!(PaddingMode::Reflect101.map_index(-2, 4), Some(2));
        assert_eq!(PaddingMode::Reflect101.map_index(5, 4), Some(1));
        assert_eq!(PaddingMode::Wrap.map_index(-1, 4), Some(3));
        assert_eq!(PaddingMode::Wrap.map_index(9, 4), Some(1));
        assert_eq!(PaddingMode::Constant.map_index(-1, 4), None);
        assert_eq!(PaddingMode::Constant.map_index(2, 4), Some(2));
        assert_eq!(PaddingMode::Reflect101.map_index(-5, 1), Some(0));
    }

    #[test]
    fn test_spatial_padding_constant() -> Result<(), ImageError> {
        let dst = spatial_padding(&make_src_2x2()?, pad_one(), PaddingMode::Constant, [9])?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                9, 9, 9, 9,
                9, 1, 2, 9,
                9, 3, 4, 9,
                9, 9, 9, 9,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_spatial_padding_replicate() -> Result<(), ImageError> {
        let dst = spatial_padding(&make_src_2x2()?, pad_one(), PaddingMode::Replicate, [0])?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                1, 1, 2, 2,
                1, 1, 2, 2,
                3, 3, 4, 4,
                3, 3, 4, 4,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_spatial_padding_reflect101() -> Result<(), ImageError> {
        let dst = spatial_padding(&make_src_2x2()?, pad_one(), PaddingMode::Reflect101, [0])?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                4, 3, 4, 3,
                2, 1, 2, 1,
                4, 3, 4, 3,
                2, 1, 2, 1,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_spatial_padding_wrap_multichannel() -> Result<(), ImageError> {
        let src = Image::<u8, 2>::new([2, 1].into(), vec![1, 10, 2, 20])?;
        let padding = Padding2D {
            top: 0,
            bottom: 0,
            left: 1,
            right: 2,
        };
        let dst = spatial_padding(&src, padding, PaddingMode::Wrap, [0, 0])?;
        assert_eq!(dst.size(), [5, 1].into());
        assert_eq!(dst.as_slice(), &[2, 20, 1, 10, 2, 20, 1, 10, 2, 20]);
        Ok(())
    }

    #[test]
    fn test_padding_from_window() {
        assert_eq!(
            Padding2D::from_window(5, 3),
            Padding2D {
                top: 1,
                bottom: 1,
                left: 2,
                right: 2
            }
        );
        // even windows are anchored at size / 2
        assert_eq!(
            Padding2D::from_window(4, 1),
            Padding2D {
                top: 0,
                bottom: 0,
                left: 2,
                right: 1
            }
        );
    }
}
