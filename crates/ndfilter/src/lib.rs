#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use ndfilter_image as image;

#[doc(inline)]
pub use ndfilter_imgproc as imgproc;

#[doc(inline)]
pub use ndfilter_io as io;
