//! Index gather/scatter kernels
//!
//! All three kernels run on contiguous operands decomposed as
//! `[outer, dim, inner]` around the indexed dimension and iterate the flat
//! task space of the non-indexed coordinates, looping over the index vector
//! inside each task. Indices arrive validated but still 1-based; the
//! kernels subtract 1.

use super::parallel_for;
use crate::dtype::Element;

/// Gather: `out[o, j, i] = src[o, indices[j] - 1, i]`.
///
/// # Safety
/// `src` must be valid for `outer * src_dim * inner` elements of `T`, `out`
/// for `outer * n_index * inner`, and `indices` for `n_index` entries, each
/// in `[1, src_dim]`.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn index_select_kernel<T: Element>(
    src: *const T,
    out: *mut T,
    indices: *const i64,
    outer: usize,
    src_dim: usize,
    n_index: usize,
    inner: usize,
) {
    let src_addr = src as usize;
    let out_addr = out as usize;
    let idx_addr = indices as usize;
    parallel_for(outer, 1, move |o| unsafe {
        let src = src_addr as *const T;
        let out = out_addr as *mut T;
        let indices = idx_addr as *const i64;
        for j in 0..n_index {
            let sel = (*indices.add(j) - 1) as usize;
            let src_row = src.add((o * src_dim + sel) * inner);
            let out_row = out.add((o * n_index + j) * inner);
            std::ptr::copy_nonoverlapping(src_row, out_row, inner);
        }
    });
}

/// Scatter copy: `dst[o, indices[j] - 1, i] = src[o, j, i]`.
///
/// Duplicate indices resolve to the last occurrence because the index loop
/// is serial within each task.
///
/// # Safety
/// `dst` must be valid for `outer * dst_dim * inner` elements of `T`, `src`
/// for `outer * n_index * inner`, and `indices` for `n_index` entries, each
/// in `[1, dst_dim]`.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn index_copy_kernel<T: Element>(
    dst: *mut T,
    src: *const T,
    indices: *const i64,
    outer: usize,
    dst_dim: usize,
    n_index: usize,
    inner: usize,
) {
    let dst_addr = dst as usize;
    let src_addr = src as usize;
    let idx_addr = indices as usize;
    parallel_for(outer, 1, move |o| unsafe {
        let dst = dst_addr as *mut T;
        let src = src_addr as *const T;
        let indices = idx_addr as *const i64;
        for j in 0..n_index {
            let sel = (*indices.add(j) - 1) as usize;
            let src_row = src.add((o * n_index + j) * inner);
            let dst_row = dst.add((o * dst_dim + sel) * inner);
            std::ptr::copy_nonoverlapping(src_row, dst_row, inner);
        }
    });
}

/// Scatter fill: `dst[o, indices[j] - 1, i] = value`.
///
/// # Safety
/// `dst` must be valid for `outer * dst_dim * inner` elements of `T` and
/// `indices` for `n_index` entries, each in `[1, dst_dim]`.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn index_fill_kernel<T: Element>(
    dst: *mut T,
    indices: *const i64,
    value: f64,
    outer: usize,
    dst_dim: usize,
    n_index: usize,
    inner: usize,
) {
    let dst_addr = dst as usize;
    let idx_addr = indices as usize;
    let v = T::from_f64(value);
    parallel_for(outer, 1, move |o| unsafe {
        let dst = dst_addr as *mut T;
        let indices = idx_addr as *const i64;
        for j in 0..n_index {
            let sel = (*indices.add(j) - 1) as usize;
            let dst_row = dst.add((o * dst_dim + sel) * inner);
            for i in 0..inner {
                *dst_row.add(i) = v;
            }
        }
    });
}
