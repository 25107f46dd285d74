#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image filtering module.
pub mod filter;

/// image quality metrics module.
pub mod metrics;

/// noise generation module.
pub mod noise;

/// border handling utilities.
pub mod padding;

/// module containing parallelization utilities.
pub mod parallel;
