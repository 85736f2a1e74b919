//! Reduction helpers
//!
//! Single-dimension reductions pick one of two kernel strategies based on
//! which dimension is reduced: the innermost (contiguous) dimension goes
//! through the tiled tree kernel, anything else through the strided
//! accumulation kernel. Whole-tensor reductions return an f64 scalar and are
//! a host synchronization point.

use super::{check_same_dtype, check_same_numel};
use crate::dispatch_dtype;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::ops::{reduce_output_shape, ReduceMap, ReduceOp, ZipMap, MAX_KERNEL_DIMS};
use crate::runtime::cpu::kernels::{reduce, transform};
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::runtime::helpers::ensure_contiguous;
use crate::tensor::Tensor;

/// Reduce one dimension, keeping it with extent 1
pub fn reduce_dim_impl(
    client: &CpuClient,
    op: ReduceOp,
    map: ReduceMap,
    a: &Tensor<CpuRuntime>,
    dim: usize,
) -> Result<Tensor<CpuRuntime>> {
    let ndim = a.ndim();
    if ndim > MAX_KERNEL_DIMS {
        return Err(Error::UnsupportedRank {
            ndim,
            max: MAX_KERNEL_DIMS,
        });
    }
    if dim >= ndim {
        return Err(Error::InvalidDimension {
            dim: dim as isize,
            ndim,
        });
    }

    let src = ensure_contiguous(a);
    let out_shape = reduce_output_shape(a.shape(), dim);
    let out = Tensor::try_empty(&out_shape, a.dtype(), &client.device)?;

    let reduce_size = a.shape()[dim];
    let outer: usize = a.shape()[..dim].iter().product();
    let inner: usize = a.shape()[dim + 1..].iter().product();

    if reduce_size == 0 {
        // Nothing to combine: seed the output with the operator identity
        let out_ptr = out.storage().ptr();
        let len = out.numel();
        dispatch_dtype!(a.dtype(), T => {
            let identity = op.identity::<T>().to_f64();
            unsafe { transform::fill_kernel::<T>(out_ptr as *mut T, identity, len) };
        });
        return Ok(out);
    }

    let src_ptr = src.storage().ptr();
    let out_ptr = out.storage().ptr();
    dispatch_dtype!(a.dtype(), T => {
        unsafe {
            if dim == ndim - 1 {
                reduce::reduce_innermost_kernel::<T>(
                    op,
                    map,
                    src_ptr as *const T,
                    out_ptr as *mut T,
                    reduce_size,
                    outer,
                );
            } else {
                reduce::reduce_outer_kernel::<T>(
                    op,
                    map,
                    src_ptr as *const T,
                    out_ptr as *mut T,
                    outer,
                    reduce_size,
                    inner,
                );
            }
        }
    });
    Ok(out)
}

/// Reduce every element to one f64
pub fn reduce_all_impl(op: ReduceOp, map: ReduceMap, a: &Tensor<CpuRuntime>) -> Result<f64> {
    let src = ensure_contiguous(a);
    let len = src.numel();
    let src_ptr = src.storage().ptr();

    let result = dispatch_dtype!(a.dtype(), T => {
        unsafe { reduce::reduce_all_kernel::<T>(op, map, src_ptr as *const T, len) }
    });
    Ok(result)
}

/// Fused pairwise sum-reduction of two tensors
pub fn zip_reduce_all_impl(
    map: ZipMap,
    a: &Tensor<CpuRuntime>,
    b: &Tensor<CpuRuntime>,
) -> Result<f64> {
    check_same_dtype(a, b)?;
    check_same_numel(a, b)?;

    let a_c = ensure_contiguous(a);
    let b_c = ensure_contiguous(b);
    let len = a_c.numel();

    let a_ptr = a_c.storage().ptr();
    let b_ptr = b_c.storage().ptr();
    let result = dispatch_dtype!(a.dtype(), T => {
        unsafe {
            reduce::zip_reduce_all_kernel::<T>(map, a_ptr as *const T, b_ptr as *const T, len)
        }
    });
    Ok(result)
}
