//! Reduction kernels
//!
//! Two strategies for single-dimension reductions over a contiguous source:
//!
//! - **Innermost dimension**: each task owns one output row and reduces it
//!   in fixed-width tiles through a scratch buffer with a halving tree
//!   combine, the CPU rendition of a cooperative tile + barrier reduction.
//! - **Outer dimension**: each task owns one (outer, inner) coordinate pair
//!   and serially accumulates across the reduced extent at `inner_size`
//!   stride, unrolled by 8.
//!
//! Whole-tensor reductions accumulate in f64 and combine per-chunk partials;
//! all operators are associative and commutative, so the grouping is free.

use super::parallel_for;
use crate::dtype::Element;
use crate::ops::{ReduceMap, ReduceOp, ZipMap};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Tile width of the tree-combine strategies
pub const REDUCE_TILE: usize = 32;

/// Chunk size for whole-tensor reductions
const REDUCE_CHUNK: usize = 32 * 1024;

/// Reduce the innermost (contiguous) dimension of `rows` rows of `row_len`
/// elements each: `out[row] = combine over map(a[row * row_len + i])`.
///
/// # Safety
/// `a` must be valid for `rows * row_len` elements of `T`; `out` for `rows`.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn reduce_innermost_kernel<T: Element>(
    op: ReduceOp,
    map: ReduceMap,
    a: *const T,
    out: *mut T,
    row_len: usize,
    rows: usize,
) {
    let a_addr = a as usize;
    let out_addr = out as usize;
    parallel_for(rows, 64, move |row| unsafe {
        let a = (a_addr as *const T).add(row * row_len);
        let out = out_addr as *mut T;

        let mut acc = op.identity::<T>();
        let mut tile = [op.identity::<T>(); REDUCE_TILE];
        let mut base = 0;
        while base < row_len {
            // Identity-padded tile load
            for (lane, slot) in tile.iter_mut().enumerate() {
                let i = base + lane;
                *slot = if i < row_len {
                    map.apply(*a.add(i))
                } else {
                    op.identity::<T>()
                };
            }
            // Halving tree combine: 16 -> 8 -> 4 -> 2 -> 1
            let mut stride = REDUCE_TILE / 2;
            while stride > 0 {
                for lane in 0..stride {
                    tile[lane] = op.combine(tile[lane], tile[lane + stride]);
                }
                stride /= 2;
            }
            acc = op.combine(acc, tile[0]);
            base += REDUCE_TILE;
        }
        *out.add(row) = acc;
    });
}

/// Reduce a non-innermost dimension:
/// `out[outer * inner_size + inner] = combine over
/// map(a[outer * reduce_size * inner_size + r * inner_size + inner])`.
///
/// # Safety
/// `a` must be valid for `outer_size * reduce_size * inner_size` elements of
/// `T`; `out` for `outer_size * inner_size`.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn reduce_outer_kernel<T: Element>(
    op: ReduceOp,
    map: ReduceMap,
    a: *const T,
    out: *mut T,
    outer_size: usize,
    reduce_size: usize,
    inner_size: usize,
) {
    let a_addr = a as usize;
    let out_addr = out as usize;
    parallel_for(outer_size, 1, move |outer| unsafe {
        let a = a_addr as *const T;
        let out = out_addr as *mut T;

        for inner in 0..inner_size {
            let base = outer * reduce_size * inner_size + inner;
            let mut acc = op.identity::<T>();
            let mut r = 0;
            // Serial accumulation at inner_size stride, unrolled by 8
            while r + 8 <= reduce_size {
                let mut i = base + r * inner_size;
                acc = op.combine(acc, map.apply(*a.add(i)));
                i += inner_size;
                acc = op.combine(acc, map.apply(*a.add(i)));
                i += inner_size;
                acc = op.combine(acc, map.apply(*a.add(i)));
                i += inner_size;
                acc = op.combine(acc, map.apply(*a.add(i)));
                i += inner_size;
                acc = op.combine(acc, map.apply(*a.add(i)));
                i += inner_size;
                acc = op.combine(acc, map.apply(*a.add(i)));
                i += inner_size;
                acc = op.combine(acc, map.apply(*a.add(i)));
                i += inner_size;
                acc = op.combine(acc, map.apply(*a.add(i)));
                r += 8;
            }
            while r < reduce_size {
                acc = op.combine(acc, map.apply(*a.add(base + r * inner_size)));
                r += 1;
            }
            *out.add(outer * inner_size + inner) = acc;
        }
    });
}

/// Reduce an entire contiguous buffer to one f64.
///
/// Returns the operator identity for `len == 0`.
///
/// # Safety
/// `a` must be valid for `len` elements of `T`.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn reduce_all_kernel<T: Element>(
    op: ReduceOp,
    map: ReduceMap,
    a: *const T,
    len: usize,
) -> f64 {
    let a_addr = a as usize;
    let nchunks = len.div_ceil(REDUCE_CHUNK).max(1);

    let partial = move |chunk: usize| -> f64 {
        let a = a_addr as *const T;
        let start = chunk * REDUCE_CHUNK;
        let end = (start + REDUCE_CHUNK).min(len);
        let mut acc = op.identity_f64();
        for i in start..end {
            let v = unsafe { map.apply(*a.add(i)) }.to_f64();
            acc = op.combine_f64(acc, v);
        }
        acc
    };

    #[cfg(feature = "rayon")]
    {
        if nchunks > 1 {
            return (0..nchunks)
                .into_par_iter()
                .map(partial)
                .reduce(|| op.identity_f64(), |x, y| op.combine_f64(x, y));
        }
    }

    let mut acc = op.identity_f64();
    for chunk in 0..nchunks {
        acc = op.combine_f64(acc, partial(chunk));
    }
    acc
}

/// Fused pairwise sum-reduction over two contiguous buffers:
/// `sum over i of map(a[i], b[i])`, in one pass.
///
/// # Safety
/// `a` and `b` must be valid for `len` elements of `T`.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn zip_reduce_all_kernel<T: Element>(
    map: ZipMap,
    a: *const T,
    b: *const T,
    len: usize,
) -> f64 {
    let a_addr = a as usize;
    let b_addr = b as usize;
    let nchunks = len.div_ceil(REDUCE_CHUNK).max(1);

    let partial = move |chunk: usize| -> f64 {
        let a = a_addr as *const T;
        let b = b_addr as *const T;
        let start = chunk * REDUCE_CHUNK;
        let end = (start + REDUCE_CHUNK).min(len);
        let mut acc = 0.0;
        for i in start..end {
            let (x, y) = unsafe { ((*a.add(i)).to_f64(), (*b.add(i)).to_f64()) };
            acc += map.apply(x, y);
        }
        acc
    };

    #[cfg(feature = "rayon")]
    {
        if nchunks > 1 {
            return (0..nchunks).into_par_iter().map(partial).sum();
        }
    }

    let mut acc = 0.0;
    for chunk in 0..nchunks {
        acc += partial(chunk);
    }
    acc
}
