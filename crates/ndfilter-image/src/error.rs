/// An error type for the image crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must match have different sizes.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel data cannot be represented in the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds for {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel ({0}, {1}) is out of bounds for an image of size {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a filter kernel has an invalid length.
    #[error("Invalid kernel length: kernel_x={0}, kernel_y={1}")]
    InvalidKernelLength(usize, usize),

    /// Error when a gaussian sigma is negative or not finite.
    #[error("Invalid sigma value: {0}")]
    InvalidSigmaValue(f32),

    /// Error when a gaussian truncation is negative or not finite.
    #[error("Invalid truncate value: {0}")]
    InvalidTruncateValue(f32),

    /// Error when a filter window or rank is not valid.
    #[error("Invalid filter size {0}x{1} with rank {2}")]
    InvalidFilterSize(usize, usize, usize),

    /// Error when the noise distribution cannot be built.
    #[error("Invalid noise parameters: mean={0}, std={1}")]
    InvalidNoiseParameters(f32, f32),
}
