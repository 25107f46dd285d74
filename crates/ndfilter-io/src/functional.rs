use std::path::Path;

use ndfilter_image::{Image, ImageSize};

use crate::error::IoError;

/// A decoded image in one of the supported pixel formats.
#[derive(Debug, Clone)]
pub enum GenericImage {
    /// 8-bit grayscale image
    L8(Image<u8, 1>),
    /// 8-bit grayscale image with alpha channel
    La8(Image<u8, 2>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
    /// 16-bit grayscale image
    L16(Image<u16, 1>),
}

impl GenericImage {
    /// The size of the decoded image.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::L8(img) => img.size(),
            GenericImage::La8(img) => img.size(),
            GenericImage::Rgb8(img) => img.size(),
            GenericImage::Rgba8(img) => img.size(),
            GenericImage::L16(img) => img.size(),
        }
    }

    /// The number of channels of the decoded image.
    pub fn num_channels(&self) -> usize {
        match self {
            GenericImage::L8(_) | GenericImage::L16(_) => 1,
            GenericImage::La8(_) => 2,
            GenericImage::Rgb8(_) => 3,
            GenericImage::Rgba8(_) => 4,
        }
    }
}

fn decode_image(file_path: impl AsRef<Path>) -> Result<image::DynamicImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {}: {}x{} {:?}",
        file_path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img)
}

fn image_size(img: &image::DynamicImage) -> ImageSize {
    ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    }
}

/// Reads an image from the given file path.
///
/// The method reads any image format supported by the image crate. Color types
/// without a dedicated variant are converted to 8-bit RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// The decoded image, keeping its channel layout.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let img = decode_image(file_path)?;
    let size = image_size(&img);

    let image = match img.color() {
        image::ColorType::L8 => GenericImage::L8(Image::new(size, img.into_luma8().into_raw())?),
        image::ColorType::La8 => {
            GenericImage::La8(Image::new(size, img.into_luma_alpha8().into_raw())?)
        }
        image::ColorType::Rgba8 => {
            GenericImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?)
        }
        image::ColorType::L16 => GenericImage::L16(Image::new(size, img.into_luma16().into_raw())?),
        _ => GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?),
    };

    Ok(image)
}

/// Reads an image from the given file path as 8-bit grayscale.
///
/// Color images are converted to luma by the image crate.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_gray8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let img = decode_image(file_path)?;
    let size = image_size(&img);
    Ok(Image::new(size, img.into_luma8().into_raw())?)
}

fn write_png_impl(
    file_path: &Path,
    data: &[u8],
    size: ImageSize,
    color_type: image::ColorType,
) -> Result<(), IoError> {
    image::save_buffer_with_format(
        file_path,
        data,
        size.width as u32,
        size.height as u32,
        color_type,
        image::ImageFormat::Png,
    )
    .map_err(IoError::ImageEncodeError)
}

/// Writes a grayscale image to the given file path as PNG.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
/// * `image` - The grayscale image to write.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    write_png_impl(
        file_path.as_ref(),
        image.as_slice(),
        image.size(),
        image::ColorType::L8,
    )
}

/// Writes a RGB image to the given file path as PNG.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
/// * `image` - The RGB image to write.
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    write_png_impl(
        file_path.as_ref(),
        image.as_slice(),
        image.size(),
        image::ColorType::Rgb8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_file() {
        let res = read_image_any("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_write_gray8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");

        let data = (0..6 * 4).map(|i| (i * 10) as u8).collect();
        let image = Image::<u8, 1>::new([6, 4].into(), data)?;
        write_image_png_gray8(&file_path, &image)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_gray8(&file_path)?;
        assert_eq!(image_back.size(), image.size());
        assert_eq!(image_back.as_slice(), image.as_slice());

        let generic = read_image_any(&file_path)?;
        assert!(matches!(generic, GenericImage::L8(_)));
        assert_eq!(generic.num_channels(), 1);

        Ok(())
    }

    #[test]
    fn read_rgb8_as_gray() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgb.png");

        // gray pixels stored as rgb keep their value once converted to luma
        let image = Image::<u8, 3>::new([2, 1].into(), vec![10, 10, 10, 200, 200, 200])?;
        write_image_png_rgb8(&file_path, &image)?;

        let generic = read_image_any(&file_path)?;
        assert_eq!(generic.size(), image.size());
        assert_eq!(generic.num_channels(), 3);

        let gray = read_image_gray8(&file_path)?;
        assert_eq!(gray.as_slice(), &[10, 200]);

        Ok(())
    }

    #[test]
    fn read_la8_and_rgba8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let size = ImageSize {
            width: 2,
            height: 1,
        };

        let la8_path = tmp_dir.path().join("la8.png");
        let la8_data = [10, 255, 200, 128];
        write_png_impl(&la8_path, &la8_data, size, image::ColorType::La8)?;

        match read_image_any(&la8_path)? {
            GenericImage::La8(img) => {
                assert_eq!(img.size(), size);
                assert_eq!(img.as_slice(), &la8_data);
            }
            other => panic!("expected La8, got {} channels", other.num_channels()),
        }

        let rgba8_path = tmp_dir.path().join("rgba8.png");
        let rgba8_data = [1, 2, 3, 255, 40, 50, 60, 0];
        write_png_impl(&rgba8_path, &rgba8_data, size, image::ColorType::Rgba8)?;

        match read_image_any(&rgba8_path)? {
            GenericImage::Rgba8(img) => {
                assert_eq!(img.size(), size);
                assert_eq!(img.as_slice(), &rgba8_data);
            }
            other => panic!("expected Rgba8, got {} channels", other.num_channels()),
        }

        Ok(())
    }

    #[test]
    fn read_16bit_images() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;

        let l16_path = tmp_dir.path().join("l16.png");
        let l16_data = vec![0u16, 1000, 40000, u16::MAX];
        image::ImageBuffer::<image::Luma<u16>, _>::from_raw(2, 2, l16_data.clone())
            .expect("buffer matches the image size")
            .save(&l16_path)?;

        match read_image_any(&l16_path)? {
            GenericImage::L16(img) => {
                assert_eq!(img.size(), [2, 2].into());
                assert_eq!(img.as_slice(), l16_data.as_slice());
            }
            other => panic!("expected L16, got {} channels", other.num_channels()),
        }

        // other color types come back as 8-bit rgb
        let rgb16_path = tmp_dir.path().join("rgb16.png");
        let rgb16_data = vec![0u16, 257 * 100, u16::MAX];
        image::ImageBuffer::<image::Rgb<u16>, _>::from_raw(1, 1, rgb16_data)
            .expect("buffer matches the image size")
            .save(&rgb16_path)?;

        match read_image_any(&rgb16_path)? {
            GenericImage::Rgb8(img) => {
                assert_eq!(img.size(), [1, 1].into());
                assert_eq!(img.as_slice(), &[0, 100, 255]);
            }
            other => panic!("expected Rgb8, got {} channels", other.num_channels()),
        }

        Ok(())
    }
}
