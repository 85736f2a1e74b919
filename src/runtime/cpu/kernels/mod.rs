//! Unsafe CPU kernels operating on raw device pointers
//!
//! Kernels receive contiguous operands and flat task spaces; all shape and
//! argument validation happens in the helper layer before dispatch. Raw
//! pointers are moved into parallel loops as `usize` addresses because raw
//! pointers are not `Send`.

pub mod blas;
pub mod index;
pub mod norm;
pub mod reduce;
pub mod transform;

/// Minimum per-task work before a pointwise loop is split across threads
pub(crate) const PAR_MIN_LEN: usize = 4096;

/// Run `f` for every index in `0..n`, in parallel when worthwhile.
#[cfg(feature = "rayon")]
pub(crate) fn parallel_for(n: usize, min_len: usize, f: impl Fn(usize) + Send + Sync) {
    use rayon::prelude::*;

    if n > min_len {
        (0..n).into_par_iter().with_min_len(min_len).for_each(f);
    } else {
        for i in 0..n {
            f(i);
        }
    }
}

/// Run `f` for every index in `0..n` (serial fallback).
#[cfg(not(feature = "rayon"))]
pub(crate) fn parallel_for(n: usize, _min_len: usize, f: impl Fn(usize) + Send + Sync) {
    for i in 0..n {
        f(i);
    }
}
