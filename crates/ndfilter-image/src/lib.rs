#![deny(missing_docs)]
//! Image types and basic operations shared by the ndfilter crates

/// image representation for filtering purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// basic image operations.
pub mod ops;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
