//! Filter operations
//!
//! This module provides linear and rank filters for image smoothing and denoising.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;

/// Rank (order-statistic) filters
mod rank;
pub use rank::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;

/// Adaptive Wiener filter
mod wiener;
pub use wiener::*;
