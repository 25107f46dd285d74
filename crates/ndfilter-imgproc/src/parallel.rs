use rayon::prelude::*;

/// Number of pixels from which [`ExecutionStrategy::Auto`] switches to parallel execution.
pub const AUTO_PARALLEL_MIN_PIXELS: usize = 100_000;

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Process rows in parallel on the global Rayon thread pool.
    Parallel,

    /// Parallel for images with at least [`AUTO_PARALLEL_MIN_PIXELS`] pixels, serial otherwise.
    #[default]
    Auto,
}

impl ExecutionStrategy {
    /// Whether an image with `num_pixels` pixels should be processed in parallel.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => num_pixels >= AUTO_PARALLEL_MIN_PIXELS,
        }
    }
}

/// Apply `f` to every row of `data`, passing the row index and the mutable row slice.
///
/// # Arguments
///
/// * `data` - The flat buffer to process.
/// * `row_stride` - The number of elements per row (width * channels).
/// * `parallel` - Whether to dispatch the rows on the Rayon thread pool.
/// * `f` - The function to apply to each row.
pub fn for_each_row_mut<T, F>(data: &mut [T], row_stride: usize, parallel: bool, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if data.is_empty() || row_stride == 0 {
        return;
    }

    if parallel {
        data.par_chunks_exact_mut(row_stride)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    } else {
        data.chunks_exact_mut(row_stride)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_parallel() {
        assert!(!ExecutionStrategy::Serial.is_parallel(usize::MAX));
        assert!(ExecutionStrategy::Parallel.is_parallel(1));
        assert!(!ExecutionStrategy::Auto.is_parallel(AUTO_PARALLEL_MIN_PIXELS - 1));
        assert!(ExecutionStrategy::Auto.is_parallel(AUTO_PARALLEL_MIN_PIXELS));
    }

    #[test]
    fn test_for_each_row_mut() {
        for parallel in [false, true] {
            let mut data = vec![0usize; 12];
            for_each_row_mut(&mut data, 4, parallel, |r, row| {
                row.iter_mut().for_each(|v| *v = r);
            });
            assert_eq!(data, vec![0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2]);
        }

        let mut empty: Vec<u8> = vec![];
        for_each_row_mut(&mut empty, 0, true, |_, _| unreachable!());
    }
}
